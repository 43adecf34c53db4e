use chrono::{Duration, NaiveDate};

use crate::domain::calendar::CalendarConfig;

/// Counts non-working days that push a forecast beyond `end_inclusive`.
///
/// Starts from the manual and vacation-matrix days, then walks every day in
/// `(start_exclusive, end_inclusive]` adding one per fixed holiday. The scan
/// bound moves out by the whole days accumulated so far, so holidays that
/// fall inside the extended window also count.
pub fn nonworking_days_in_window(
    start_exclusive: NaiveDate,
    end_inclusive: NaiveDate,
    config: &CalendarConfig,
) -> f64 {
    let mut extra_days = config.base_extra_days();
    let mut cursor = start_exclusive.succ_opt();

    while let Some(day) = cursor {
        // An extended end past the last representable date cannot be reached.
        let Some(end) = add_whole_days(end_inclusive, extra_days) else {
            break;
        };
        if day > end {
            break;
        }
        if config.is_fixed_holiday(day) {
            extra_days += 1.0;
        }
        cursor = day.succ_opt();
    }

    extra_days
}

/// Adds the whole part of a possibly fractional day count to `date`.
///
/// Negative and non-finite counts add nothing. Returns `None` when the result
/// would lie beyond [`NaiveDate::MAX`].
pub fn add_whole_days(date: NaiveDate, days: f64) -> Option<NaiveDate> {
    if !days.is_finite() || days <= 0.0 {
        return Some(date);
    }
    let headroom = NaiveDate::MAX.signed_duration_since(date).num_days();
    let whole = days.floor();
    if whole > headroom as f64 {
        return None;
    }
    date.checked_add_signed(Duration::days(whole as i64))
}
