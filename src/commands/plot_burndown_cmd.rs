use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::services::burndown_plot::plot_burndown_from_report_file;

pub fn plot_burndown_command(cmd: Commands) -> ExitCode {
    if let Commands::PlotBurndown { input, output } = cmd {
        match plot_burndown_from_report_file(&input, &output) {
            Ok(()) => println!("Burn-down plot written to {output}"),
            Err(e) => {
                eprintln!("Failed to plot burn-down: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
