use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::calendar::MonthDay;
use crate::domain::run_config::RunSettings;
use crate::domain::schema::ColumnOverrides;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate snapshot exports and forecast the completion date
    Forecast(ForecastArgs),
    /// Plot total and remaining hours from a forecast report into a PNG chart
    PlotBurndown {
        /// Forecast report file (YAML or JSON)
        #[arg(short, long)]
        input: String,
        /// Output PNG file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Snapshot export files, one per capture date (e.g. export_snapshot_2024_03_15.csv)
    #[arg(short, long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<String>,
    /// Output report file (.json for JSON, YAML otherwise)
    #[arg(short, long)]
    pub output: String,
    /// Optional run config YAML; command-line values take precedence
    #[arg(short, long)]
    pub config: Option<String>,
    /// Keep only rows whose iteration/release contains this text (case-insensitive)
    #[arg(short, long)]
    pub filter: Option<String>,
    /// Extra non-working days to add to the forecast
    #[arg(short, long, value_parser = parse_manual_days)]
    pub manual_days: Option<f64>,
    /// Fixed holiday (MM-DD) observed every year; repeat for several
    #[arg(long = "holiday", value_parser = parse_month_day)]
    pub holidays: Vec<MonthDay>,
    /// Ignore fixed holidays entirely
    #[arg(long, conflicts_with = "holidays")]
    pub no_holidays: bool,
    /// Vacation matrix (CSV) whose cells marked "x" each count one day
    #[arg(short, long)]
    pub vacation_matrix: Option<String>,
    /// Column holding the iteration or release
    #[arg(long)]
    pub iteration_column: Option<String>,
    /// Column holding the original estimate
    #[arg(long)]
    pub original_column: Option<String>,
    /// Column holding the remaining estimate
    #[arg(long)]
    pub remaining_column: Option<String>,
    /// Also write the normalized rows to this CSV file
    #[arg(short, long)]
    pub export: Option<String>,
    /// Capture date for files whose name carries no snapshot date (YYYY-MM-DD)
    #[arg(long, default_value_t = default_fallback_date())]
    pub fallback_date: String,
}

impl ForecastArgs {
    pub fn run_settings(&self) -> RunSettings {
        let fixed_holidays = if self.no_holidays {
            Some(BTreeSet::new())
        } else if self.holidays.is_empty() {
            None
        } else {
            Some(self.holidays.iter().copied().collect())
        };

        RunSettings {
            group_filter: self.filter.clone(),
            manual_extra_days: self.manual_days,
            fixed_holidays,
            vacation_matrix: self.vacation_matrix.as_ref().map(Into::into),
            columns: ColumnOverrides {
                group_key: self.iteration_column.clone(),
                original_estimate: self.original_column.clone(),
                remaining_estimate: self.remaining_column.clone(),
            },
        }
    }
}

fn default_fallback_date() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn parse_manual_days(value: &str) -> Result<f64, String> {
    let days: f64 = value
        .parse()
        .map_err(|_| format!("{value} is not a number"))?;
    if !days.is_finite() || days < 0.0 {
        return Err(format!("{value} must be zero or more"));
    }
    Ok(days)
}

fn parse_month_day(value: &str) -> Result<MonthDay, String> {
    value.parse::<MonthDay>().map_err(|e| e.to_string())
}

pub fn parse_fallback_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid fallback date: {value} (expected YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_forecast(args: &[&str]) -> ForecastArgs {
        let mut argv = vec!["burndown", "forecast"];
        argv.extend_from_slice(args);
        match CliArgs::parse_from(argv).command {
            Commands::Forecast(args) => args,
            _ => panic!("expected forecast command"),
        }
    }

    #[test]
    fn forecast_defaults_fallback_date_to_today() {
        let args = parse_forecast(&["-i", "snapshot_2026_01_01.csv", "-o", "report.yaml"]);
        assert_eq!(args.fallback_date, default_fallback_date());
    }

    #[test]
    fn forecast_accepts_several_inputs_and_holidays() {
        let args = parse_forecast(&[
            "-i",
            "a.csv",
            "b.csv",
            "-o",
            "report.yaml",
            "--holiday",
            "12-24",
            "--holiday",
            "1-6",
            "-m",
            "2.5",
        ]);

        assert_eq!(args.inputs, vec!["a.csv".to_string(), "b.csv".to_string()]);
        let settings = args.run_settings();
        assert_eq!(settings.manual_extra_days, Some(2.5));
        let holidays = settings.fixed_holidays.unwrap();
        assert!(holidays.contains(&MonthDay { month: 1, day: 6 }));
        assert_eq!(holidays.len(), 2);
    }

    #[test]
    fn unset_holidays_stay_unset_and_no_holidays_clears_them() {
        let args = parse_forecast(&["-i", "a.csv", "-o", "r.yaml"]);
        assert_eq!(args.run_settings().fixed_holidays, None);

        let args = parse_forecast(&["-i", "a.csv", "-o", "r.yaml", "--no-holidays"]);
        assert_eq!(args.run_settings().fixed_holidays, Some(BTreeSet::new()));
    }

    #[test]
    fn rejects_negative_manual_days_and_bad_holidays() {
        assert!(
            CliArgs::try_parse_from(["burndown", "forecast", "-i", "a.csv", "-o", "r.yaml", "-m", "-1"])
                .is_err()
        );
        assert!(
            CliArgs::try_parse_from([
                "burndown", "forecast", "-i", "a.csv", "-o", "r.yaml", "--holiday", "12-40"
            ])
            .is_err()
        );
    }

    #[test]
    fn column_flags_become_overrides() {
        let args = parse_forecast(&[
            "-i",
            "a.csv",
            "-o",
            "r.yaml",
            "--iteration-column",
            "Sprint",
            "--remaining-column",
            "Left",
        ]);

        let columns = args.run_settings().columns;
        assert_eq!(columns.group_key.as_deref(), Some("Sprint"));
        assert_eq!(columns.original_estimate, None);
        assert_eq!(columns.remaining_estimate.as_deref(), Some("Left"));
    }

    #[test]
    fn parse_fallback_date_validates_format() {
        assert!(parse_fallback_date("2026-10-18").is_ok());
        assert!(parse_fallback_date("18/10/2026").is_err());
    }
}
