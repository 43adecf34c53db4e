use crate::services::analysis_types::{AnalysisReport, DailyTotalsReport};

pub fn format_analysis_report(report: &AnalysisReport) -> String {
    let filter = if report.group_filter.is_empty() {
        "(none)".to_string()
    } else {
        report.group_filter.clone()
    };

    let mut lines = Vec::new();
    lines.push("Burn-down Forecast".to_string());
    lines.push(format!("Data sources: {}", report.data_sources.join(", ")));
    lines.push(format!("Group filter: {filter}"));
    lines.push(format!(
        "Columns: {} / {} / {}",
        report.columns.group_key, report.columns.original_estimate, report.columns.remaining_estimate
    ));
    lines.push(String::new());
    lines.push("Date | Total h | Remaining h".to_string());
    lines.push("-----|---------|------------".to_string());
    lines.extend(report.daily_totals.iter().map(format_totals_row));
    lines.push(String::new());
    lines.extend(format_forecast_lines(report));

    if let Some(latest) = &report.latest_snapshot {
        lines.push(format!("Latest snapshot: {}", latest.date));
        lines.push(format!("Remaining work: {:.1} hours", latest.remaining_hours));
    }

    let diagnostics = &report.diagnostics;
    if diagnostics.defaulted_values > 0 {
        lines.push(format!(
            "Warning: {} estimate value(s) could not be read and were counted as zero",
            diagnostics.defaulted_values
        ));
    }
    for warning in &diagnostics.warnings {
        lines.push(format!("Warning: {warning}"));
    }

    lines.join("\n")
}

fn format_totals_row(totals: &DailyTotalsReport) -> String {
    format!(
        "{date} | {total:.1} | {remaining:.1}",
        date = totals.date,
        total = totals.total_hours,
        remaining = totals.remaining_hours
    )
}

fn format_forecast_lines(report: &AnalysisReport) -> Vec<String> {
    let forecast = &report.forecast;
    match (&forecast.raw_finish_date, &forecast.adjusted_finish_date) {
        (Some(raw), Some(adjusted)) => vec![
            format!("Forecast without adjustment: {raw}"),
            format!(
                "Forecast with holidays & vacation: {adjusted} (+{:.1} days)",
                forecast.extra_nonworking_days
            ),
        ],
        _ if report.daily_totals.len() < 2 => {
            vec!["Forecast: n/a (at least two snapshot dates are needed)".to_string()]
        }
        _ => vec![format!(
            "Forecast: no projected finish (remaining work is not decreasing, trend {:+.2} h per snapshot)",
            forecast.trend_slope
        )],
    }
}
