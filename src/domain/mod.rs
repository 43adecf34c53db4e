pub mod burndown;
pub mod calendar;
pub mod run_config;
pub mod schema;
pub mod snapshot;
