use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::calendar::MonthDay;
use crate::domain::run_config::RunSettings;
use crate::domain::schema::ColumnOverrides;

#[derive(Error, Debug)]
pub enum RunConfigYamlError {
    #[error("failed to read run config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse run config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid holiday in {path}: {value} (expected MM-DD)")]
    InvalidHoliday { path: PathBuf, value: String },
    #[error("invalid manual_extra_days in {path}: {value} (expected a non-negative number)")]
    InvalidManualDays { path: PathBuf, value: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RunConfigRecord {
    group_filter: Option<String>,
    manual_extra_days: Option<f64>,
    fixed_holidays: Option<Vec<String>>,
    vacation_matrix: Option<PathBuf>,
    columns: Option<ColumnsRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnsRecord {
    group_key: Option<String>,
    original_estimate: Option<String>,
    remaining_estimate: Option<String>,
}

/// Loads run settings from a YAML file.
///
/// A relative `vacation_matrix` path is taken relative to the config file.
///
/// # Errors
/// - Returns an error on I/O or parse failures.
/// - Returns an error for malformed holidays or a negative `manual_extra_days`.
pub fn load_run_settings_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<RunSettings, RunConfigYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| RunConfigYamlError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut settings = deserialize_run_settings_from_yaml_str(&contents, path)?;
    if let (Some(matrix), Some(dir)) = (settings.vacation_matrix.as_mut(), path.parent()) {
        if matrix.is_relative() {
            let joined = dir.join(&*matrix);
            *matrix = joined;
        }
    }
    Ok(settings)
}

fn deserialize_run_settings_from_yaml_str(
    input: &str,
    origin_path: &Path,
) -> Result<RunSettings, RunConfigYamlError> {
    let record: RunConfigRecord =
        serde_yaml::from_str(input).map_err(|source| RunConfigYamlError::Parse {
            path: origin_path.to_path_buf(),
            source,
        })?;

    if let Some(value) = record.manual_extra_days {
        if !value.is_finite() || value < 0.0 {
            return Err(RunConfigYamlError::InvalidManualDays {
                path: origin_path.to_path_buf(),
                value,
            });
        }
    }

    let fixed_holidays = record
        .fixed_holidays
        .map(|values| {
            values
                .into_iter()
                .map(|value| {
                    value
                        .parse::<MonthDay>()
                        .map_err(|_| RunConfigYamlError::InvalidHoliday {
                            path: origin_path.to_path_buf(),
                            value,
                        })
                })
                .collect::<Result<BTreeSet<_>, _>>()
        })
        .transpose()?;

    let columns = record
        .columns
        .map(|columns| ColumnOverrides {
            group_key: columns.group_key,
            original_estimate: columns.original_estimate,
            remaining_estimate: columns.remaining_estimate,
        })
        .unwrap_or_default();

    Ok(RunSettings {
        group_filter: record.group_filter,
        manual_extra_days: record.manual_extra_days,
        fixed_holidays,
        vacation_matrix: record.vacation_matrix,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;

    #[test]
    fn loads_full_run_config() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("run.yaml");
        file.write_str(
            "group_filter: Release 4.6.1\nmanual_extra_days: 2.5\nfixed_holidays: [\"12-24\", \"01-06\"]\nvacation_matrix: vacation.csv\ncolumns:\n  group_key: Sprint\n",
        )
        .unwrap();

        let settings = load_run_settings_from_yaml_file(file.path()).unwrap();

        assert_eq!(settings.group_filter.as_deref(), Some("Release 4.6.1"));
        assert_eq!(settings.manual_extra_days, Some(2.5));
        let holidays = settings.fixed_holidays.unwrap();
        assert_eq!(holidays.len(), 2);
        assert!(holidays.contains(&MonthDay { month: 1, day: 6 }));
        assert_eq!(settings.vacation_matrix, Some(temp.path().join("vacation.csv")));
        assert_eq!(settings.columns.group_key.as_deref(), Some("Sprint"));
        assert_eq!(settings.columns.original_estimate, None);
    }

    #[test]
    fn empty_mapping_leaves_everything_unset() {
        let file = assert_fs::NamedTempFile::new("run.yaml").unwrap();
        file.write_str("{}\n").unwrap();

        let settings = load_run_settings_from_yaml_file(file.path()).unwrap();
        assert_eq!(settings, RunSettings::default());
    }

    #[test]
    fn returns_error_on_invalid_holiday() {
        let file = assert_fs::NamedTempFile::new("run.yaml").unwrap();
        file.write_str("fixed_holidays: [\"12-32\"]\n").unwrap();

        let err = load_run_settings_from_yaml_file(file.path()).unwrap_err();
        assert!(matches!(err, RunConfigYamlError::InvalidHoliday { value, .. } if value == "12-32"));
    }

    #[test]
    fn returns_error_on_negative_manual_days() {
        let file = assert_fs::NamedTempFile::new("run.yaml").unwrap();
        file.write_str("manual_extra_days: -1\n").unwrap();

        let err = load_run_settings_from_yaml_file(file.path()).unwrap_err();
        assert!(matches!(err, RunConfigYamlError::InvalidManualDays { .. }));
    }

    #[test]
    fn returns_error_on_unknown_key() {
        let file = assert_fs::NamedTempFile::new("run.yaml").unwrap();
        file.write_str("iteration_filter: Release 1\n").unwrap();

        let err = load_run_settings_from_yaml_file(file.path()).unwrap_err();
        assert!(matches!(err, RunConfigYamlError::Parse { .. }));
    }

    #[test]
    fn returns_error_when_file_is_missing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = load_run_settings_from_yaml_file(temp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, RunConfigYamlError::Read { .. }));
    }
}
