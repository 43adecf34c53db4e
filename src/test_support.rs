use chrono::NaiveDate;

use crate::domain::burndown::DailyTotals;
use crate::domain::calendar::CalendarConfig;
use crate::domain::snapshot::NormalizedRecord;
use crate::services::analysis_types::{
    AnalysisReport, CalendarReport, ColumnsReport, DailyTotalsReport, DiagnosticsReport,
    ForecastReport, LatestSnapshotReport,
};

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn calendar_with_holidays(holidays: &[&str], manual_extra_days: f64) -> CalendarConfig {
    CalendarConfig::new(
        holidays.iter().map(|value| value.parse().unwrap()).collect(),
        manual_extra_days,
    )
}

pub fn build_record(date: NaiveDate, original_minutes: u32, remaining_minutes: u32) -> NormalizedRecord {
    NormalizedRecord {
        snapshot_date: date,
        group_key: "Release 1".to_string(),
        original_minutes,
        remaining_minutes,
    }
}

pub fn build_totals(date: NaiveDate, total_minutes: u64, remaining_minutes: u64) -> DailyTotals {
    DailyTotals {
        date,
        total_minutes,
        remaining_minutes,
    }
}

pub fn build_report() -> AnalysisReport {
    AnalysisReport {
        data_sources: vec![
            "snapshot_2026_03_02.csv".to_string(),
            "snapshot_2026_03_09.csv".to_string(),
        ],
        group_filter: "Release 1".to_string(),
        columns: ColumnsReport {
            group_key: "Iteration".to_string(),
            original_estimate: "Original Estimate".to_string(),
            remaining_estimate: "Remaining Estimate".to_string(),
        },
        calendar: CalendarReport {
            fixed_holidays: vec!["03-11".to_string()],
            manual_extra_days: 0.0,
            vacation_matrix_days: 0.0,
        },
        diagnostics: DiagnosticsReport {
            rows_read: 4,
            rows_used: 4,
            rows_filtered_out: 0,
            defaulted_values: 1,
            warnings: vec![],
        },
        daily_totals: vec![
            DailyTotalsReport {
                date: "2026-03-02".to_string(),
                total_minutes: 6000,
                remaining_minutes: 6000,
                total_hours: 100.0,
                remaining_hours: 100.0,
            },
            DailyTotalsReport {
                date: "2026-03-09".to_string(),
                total_minutes: 6000,
                remaining_minutes: 3000,
                total_hours: 100.0,
                remaining_hours: 50.0,
            },
        ],
        forecast: ForecastReport {
            trend_slope: -50.0,
            trend_intercept: 100.0,
            raw_finish_date: Some("2026-03-11".to_string()),
            extra_nonworking_days: 1.0,
            adjusted_finish_date: Some("2026-03-12".to_string()),
        },
        latest_snapshot: Some(LatestSnapshotReport {
            date: "2026-03-09".to_string(),
            remaining_hours: 50.0,
        }),
    }
}
