pub mod aggregation;
pub mod analysis;
pub mod analysis_types;
pub mod burndown_plot;
pub mod calendar_adjustment;
pub mod dataset_export;
pub mod duration_parser;
pub mod forecast;
pub mod report_file;
pub mod run_config_yaml;
pub mod schema_resolver;
pub mod snapshot_loader;
pub mod vacation_matrix;
