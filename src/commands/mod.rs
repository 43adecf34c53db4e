pub mod base_commands;
pub mod completions_cmd;
pub mod forecast_cmd;
pub mod plot_burndown_cmd;
pub mod report_format;
