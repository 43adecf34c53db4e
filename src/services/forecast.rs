use tracing::{debug, info, warn};

use crate::domain::burndown::{DailyTotals, ForecastResult};
use crate::domain::calendar::CalendarConfig;
use crate::services::calendar_adjustment::{add_whole_days, nonworking_days_in_window};

/// Least-squares line `y ≈ slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

/// Fits a line through `(index, value)` for every value in order.
///
/// Returns `None` for fewer than two points.
pub fn fit_index_trend(values: &[f64]) -> Option<LinearTrend> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (idx, value) in values.iter().enumerate() {
        let dx = idx as f64 - mean_x;
        covariance += dx * (value - mean_y);
        variance += dx * dx;
    }

    let slope = covariance / variance;
    Some(LinearTrend {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Projects when remaining work reaches zero.
///
/// The trend is fitted over remaining hours against the position of each
/// snapshot in the series, not the elapsed calendar days between them. A flat
/// or growing backlog has no finish date. Otherwise the finish is
/// `ceil(-intercept / slope)` days after the last snapshot, then pushed out by
/// the non-working days found in that window.
pub fn forecast_completion(daily_totals: &[DailyTotals], calendar: &CalendarConfig) -> ForecastResult {
    let remaining_hours: Vec<f64> = daily_totals.iter().map(DailyTotals::remaining_hours).collect();
    let (Some(trend), Some(last)) = (fit_index_trend(&remaining_hours), daily_totals.last()) else {
        debug!(points = daily_totals.len(), "not enough snapshots for a forecast");
        return ForecastResult::insufficient_data();
    };

    if trend.slope >= 0.0 || trend.slope.is_nan() {
        info!(slope = trend.slope, "remaining work is not shrinking; no finish date projected");
        return no_projected_finish(trend);
    }

    let days_needed = (-trend.intercept / trend.slope).ceil().max(0.0);
    let Some(raw_finish_date) = add_whole_days(last.date, days_needed) else {
        warn!(slope = trend.slope, days_needed, "projected finish is beyond the calendar range");
        return no_projected_finish(trend);
    };
    let extra_nonworking_days = nonworking_days_in_window(last.date, raw_finish_date, calendar);
    let Some(adjusted_finish_date) = add_whole_days(raw_finish_date, extra_nonworking_days) else {
        warn!(
            %raw_finish_date,
            extra_nonworking_days,
            "adjusted finish is beyond the calendar range"
        );
        return no_projected_finish(trend);
    };

    info!(
        slope = trend.slope,
        days_needed,
        %raw_finish_date,
        extra_nonworking_days,
        %adjusted_finish_date,
        "projected completion"
    );

    ForecastResult {
        trend_slope: trend.slope,
        trend_intercept: trend.intercept,
        raw_finish_date: Some(raw_finish_date),
        extra_nonworking_days,
        adjusted_finish_date: Some(adjusted_finish_date),
    }
}

fn no_projected_finish(trend: LinearTrend) -> ForecastResult {
    ForecastResult {
        trend_slope: trend.slope,
        trend_intercept: trend.intercept,
        raw_finish_date: None,
        extra_nonworking_days: 0.0,
        adjusted_finish_date: None,
    }
}
