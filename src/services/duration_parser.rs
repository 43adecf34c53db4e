use std::sync::LazyLock;

use regex::Regex;

static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d*)?)h").unwrap());
static MINUTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)m").unwrap());
static BARE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

const NULL_LIKE: [&str; 4] = ["", "-", "null", "nan"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDuration {
    pub minutes: u32,
    /// True when the text held something but nothing in it could be read as a duration.
    pub defaulted: bool,
}

/// Converts a free-text effort value into whole minutes.
///
/// Recognises `"3h 20m"`, `"2.5h"`, `"45m"` and bare numbers (read as
/// minutes). Empty and null-like values are zero. Anything else that cannot
/// be read is also zero but comes back flagged as `defaulted`.
pub fn parse_duration(value: &str) -> ParsedDuration {
    let text = value.trim().to_lowercase();
    if NULL_LIKE.contains(&text.as_str()) {
        return ParsedDuration {
            minutes: 0,
            defaulted: false,
        };
    }

    let hours = HOURS
        .captures(&text)
        .and_then(|caps| caps[1].parse::<f64>().ok());
    let minutes = MINUTES
        .captures(&text)
        .and_then(|caps| caps[1].parse::<f64>().ok());

    let total = if hours.is_some() || minutes.is_some() {
        hours.unwrap_or(0.0) * 60.0 + minutes.unwrap_or(0.0)
    } else {
        match BARE_NUMBER
            .find(&text)
            .and_then(|m| m.as_str().parse::<f64>().ok())
        {
            Some(number) => number,
            None => {
                return ParsedDuration {
                    minutes: 0,
                    defaulted: true,
                };
            }
        }
    };

    ParsedDuration {
        minutes: to_whole_minutes(total),
        defaulted: false,
    }
}

fn to_whole_minutes(total: f64) -> u32 {
    if !total.is_finite() || total <= 0.0 {
        return 0;
    }
    total.round().min(u32::MAX as f64) as u32
}
