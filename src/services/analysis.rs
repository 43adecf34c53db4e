use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::burndown::{DailyTotals, ForecastResult};
use crate::domain::calendar::CalendarConfig;
use crate::domain::run_config::RunConfig;
use crate::domain::snapshot::{LoadWarning, SnapshotDataset};
use crate::services::aggregation::aggregate_daily_totals;
use crate::services::analysis_types::{
    AnalysisReport, CalendarReport, ColumnsReport, DailyTotalsReport, DiagnosticsReport,
    ForecastReport, LatestSnapshotReport,
};
use crate::services::forecast::forecast_completion;
use crate::services::schema_resolver::SchemaError;
use crate::services::snapshot_loader::{LoadOptions, SnapshotLoadError, load_snapshot_files};
use crate::services::vacation_matrix::count_vacation_days_in_file;

/// Terminal states that stop a run before anything is forecast.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no snapshot files given")]
    NoSnapshotFiles,
    #[error("none of the {0} snapshot file(s) could be parsed")]
    NoParseableSnapshots(usize),
    #[error(transparent)]
    Columns(#[from] SchemaError),
    #[error("no rows match the group filter {filter:?}")]
    EmptyDataset { filter: String },
}

impl From<SnapshotLoadError> for AnalysisError {
    fn from(error: SnapshotLoadError) -> Self {
        match error {
            SnapshotLoadError::NoFiles => AnalysisError::NoSnapshotFiles,
            SnapshotLoadError::NoParseableFiles(count) => AnalysisError::NoParseableSnapshots(count),
            SnapshotLoadError::Schema(error) => AnalysisError::Columns(error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub report: AnalysisReport,
    /// Normalized rows behind the report, kept for export.
    pub dataset: SnapshotDataset,
}

/// Loads the snapshots, aggregates them per date and forecasts completion.
///
/// `today` is the capture date for files whose name carries none.
pub fn run_analysis<P: AsRef<Path>>(
    snapshot_paths: &[P],
    config: &RunConfig,
    today: NaiveDate,
) -> Result<AnalysisOutput, AnalysisError> {
    let options = LoadOptions {
        group_filter: config.group_filter.clone(),
        overrides: config.columns.clone(),
        fallback_date: today,
    };
    let mut dataset = load_snapshot_files(snapshot_paths, &options)?;
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyDataset {
            filter: config.group_filter.clone(),
        });
    }

    let mut calendar = config.calendar.clone();
    if let Some(path) = &config.vacation_matrix {
        match count_vacation_days_in_file(path) {
            Ok(days) => {
                info!(path = %path.display(), days, "read vacation matrix");
                calendar.vacation_matrix_days = days;
            }
            Err(e) => {
                warn!(error = %e, "ignoring vacation matrix");
                dataset.warnings.push(LoadWarning::VacationMatrix {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let daily_totals = aggregate_daily_totals(&dataset.records);
    let forecast = forecast_completion(&daily_totals, &calendar);
    let report = build_report(&dataset, &daily_totals, &forecast, &calendar, &config.group_filter);

    Ok(AnalysisOutput { report, dataset })
}

fn build_report(
    dataset: &SnapshotDataset,
    daily_totals: &[DailyTotals],
    forecast: &ForecastResult,
    calendar: &CalendarConfig,
    group_filter: &str,
) -> AnalysisReport {
    AnalysisReport {
        data_sources: dataset.source_files.clone(),
        group_filter: group_filter.to_string(),
        columns: ColumnsReport {
            group_key: dataset.columns.group_key.clone(),
            original_estimate: dataset.columns.original_estimate.clone(),
            remaining_estimate: dataset.columns.remaining_estimate.clone(),
        },
        calendar: CalendarReport {
            fixed_holidays: calendar
                .fixed_holidays
                .iter()
                .map(|holiday| holiday.to_string())
                .collect(),
            manual_extra_days: calendar.manual_extra_days,
            vacation_matrix_days: calendar.vacation_matrix_days,
        },
        diagnostics: DiagnosticsReport {
            rows_read: dataset.rows_read,
            rows_used: dataset.records.len(),
            rows_filtered_out: dataset.rows_filtered_out,
            defaulted_values: dataset.defaulted_values,
            warnings: dataset.warnings.iter().map(LoadWarning::describe).collect(),
        },
        daily_totals: daily_totals.iter().map(daily_totals_report).collect(),
        forecast: ForecastReport {
            trend_slope: forecast.trend_slope,
            trend_intercept: forecast.trend_intercept,
            raw_finish_date: forecast.raw_finish_date.map(format_date),
            extra_nonworking_days: forecast.extra_nonworking_days,
            adjusted_finish_date: forecast.adjusted_finish_date.map(format_date),
        },
        latest_snapshot: daily_totals.last().map(|latest| LatestSnapshotReport {
            date: format_date(latest.date),
            remaining_hours: latest.remaining_hours(),
        }),
    }
}

fn daily_totals_report(totals: &DailyTotals) -> DailyTotalsReport {
    DailyTotalsReport {
        date: format_date(totals.date),
        total_minutes: totals.total_minutes,
        remaining_minutes: totals.remaining_minutes,
        total_hours: totals.total_hours(),
        remaining_hours: totals.remaining_hours(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
