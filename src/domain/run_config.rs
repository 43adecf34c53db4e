use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::calendar::{CalendarConfig, MonthDay, default_fixed_holidays};
use crate::domain::schema::ColumnOverrides;

/// Settings for one analysis run where every field may be left unset, so
/// that command-line values can be layered over a config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSettings {
    pub group_filter: Option<String>,
    pub manual_extra_days: Option<f64>,
    pub fixed_holidays: Option<BTreeSet<MonthDay>>,
    pub vacation_matrix: Option<PathBuf>,
    pub columns: ColumnOverrides,
}

impl RunSettings {
    /// Fills every unset field from `fallback`.
    pub fn or(self, fallback: RunSettings) -> RunSettings {
        RunSettings {
            group_filter: self.group_filter.or(fallback.group_filter),
            manual_extra_days: self.manual_extra_days.or(fallback.manual_extra_days),
            fixed_holidays: self.fixed_holidays.or(fallback.fixed_holidays),
            vacation_matrix: self.vacation_matrix.or(fallback.vacation_matrix),
            columns: self.columns.or(fallback.columns),
        }
    }

    pub fn into_run_config(self) -> RunConfig {
        RunConfig {
            group_filter: self.group_filter.unwrap_or_default(),
            calendar: CalendarConfig::new(
                self.fixed_holidays.unwrap_or_else(default_fixed_holidays),
                self.manual_extra_days.unwrap_or(0.0),
            ),
            vacation_matrix: self.vacation_matrix,
            columns: self.columns,
        }
    }
}

/// Everything one analysis run needs besides the snapshot files.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub group_filter: String,
    /// `vacation_matrix_days` is filled in once the matrix has been read.
    pub calendar: CalendarConfig,
    pub vacation_matrix: Option<PathBuf>,
    pub columns: ColumnOverrides,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunSettings::default().into_run_config()
    }
}
