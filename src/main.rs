mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::completions_cmd::completions_command;
use crate::commands::forecast_cmd::forecast_command;
use crate::commands::plot_burndown_cmd::plot_burndown_command;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    let args = CliArgs::parse();
    match args.command {
        Commands::Forecast(forecast_args) => forecast_command(forecast_args),
        cmd @ Commands::PlotBurndown { .. } => plot_burndown_command(cmd),
        Commands::Completions { shell } => {
            completions_command(shell);
            ExitCode::SUCCESS
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
