use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColumnsReport {
    pub group_key: String,
    pub original_estimate: String,
    pub remaining_estimate: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiagnosticsReport {
    pub rows_read: usize,
    pub rows_used: usize,
    pub rows_filtered_out: usize,
    pub defaulted_values: usize,
    pub warnings: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyTotalsReport {
    pub date: String,
    pub total_minutes: u64,
    pub remaining_minutes: u64,
    pub total_hours: f64,
    pub remaining_hours: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub trend_slope: f64,
    pub trend_intercept: f64,
    pub raw_finish_date: Option<String>,
    pub extra_nonworking_days: f64,
    pub adjusted_finish_date: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalendarReport {
    pub fixed_holidays: Vec<String>,
    pub manual_extra_days: f64,
    pub vacation_matrix_days: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LatestSnapshotReport {
    pub date: String,
    pub remaining_hours: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub data_sources: Vec<String>,
    pub group_filter: String,
    pub columns: ColumnsReport,
    pub calendar: CalendarReport,
    pub diagnostics: DiagnosticsReport,
    pub daily_totals: Vec<DailyTotalsReport>,
    pub forecast: ForecastReport,
    pub latest_snapshot: Option<LatestSnapshotReport>,
}
