use std::process::ExitCode;

use crate::commands::base_commands::{ForecastArgs, parse_fallback_date};
use crate::commands::report_format::format_analysis_report;
use crate::domain::run_config::RunSettings;
use crate::services::analysis::{AnalysisError, run_analysis};
use crate::services::dataset_export::write_dataset_csv;
use crate::services::report_file::write_report_file;
use crate::services::run_config_yaml::load_run_settings_from_yaml_file;
use crate::services::schema_resolver::SchemaError;

pub fn forecast_command(args: ForecastArgs) -> ExitCode {
    let file_settings = match &args.config {
        Some(path) => match load_run_settings_from_yaml_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Failed to load run config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => RunSettings::default(),
    };
    let config = args.run_settings().or(file_settings).into_run_config();

    let fallback_date = match parse_fallback_date(&args.fallback_date) {
        Ok(date) => date,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let output = match run_analysis(&args.inputs, &config, fallback_date) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Failed to analyse snapshots: {e}");
            if let AnalysisError::Columns(SchemaError::Unresolved { roles, .. }) = &e {
                let flags: Vec<&str> = roles.iter().map(|role| role.override_flag()).collect();
                eprintln!("Choose the columns explicitly with {}", flags.join(", "));
            }
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_report_file(&args.output, &output.report) {
        eprintln!("Failed to write forecast report: {e}");
        return ExitCode::FAILURE;
    }

    if let Some(export_path) = &args.export {
        let written = std::fs::File::create(export_path)
            .map_err(csv::Error::from)
            .and_then(|file| write_dataset_csv(file, &output.dataset.records));
        if let Err(e) = written {
            eprintln!("Failed to export normalized data: {e}");
            return ExitCode::FAILURE;
        }
        println!("Normalized data written to {export_path}");
    }

    println!("{}", format_analysis_report(&output.report));
    println!();
    println!("Forecast report written to {}", args.output);
    ExitCode::SUCCESS
}
