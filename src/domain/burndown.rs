use chrono::NaiveDate;

/// Summed effort for one snapshot date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub total_minutes: u64,
    pub remaining_minutes: u64,
}

impl DailyTotals {
    pub fn total_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }

    pub fn remaining_hours(&self) -> f64 {
        self.remaining_minutes as f64 / 60.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    /// Remaining hours per snapshot step.
    pub trend_slope: f64,
    pub trend_intercept: f64,
    /// `None` when the backlog is flat or growing, or there is too little data.
    pub raw_finish_date: Option<NaiveDate>,
    pub extra_nonworking_days: f64,
    pub adjusted_finish_date: Option<NaiveDate>,
}

impl ForecastResult {
    pub fn insufficient_data() -> Self {
        Self {
            trend_slope: 0.0,
            trend_intercept: 0.0,
            raw_finish_date: None,
            extra_nonworking_days: 0.0,
            adjusted_finish_date: None,
        }
    }
}
