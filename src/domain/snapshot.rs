use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::schema::ResolvedColumns;

/// One work item row from one snapshot, with both estimates in minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub snapshot_date: NaiveDate,
    pub group_key: String,
    pub original_minutes: u32,
    pub remaining_minutes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// No delimiter produced a usable header, or the file could not be read.
    SkippedFile { path: PathBuf, reason: String },
    /// The filename carried no parseable capture date.
    DateFallback { path: PathBuf, used: NaiveDate },
    /// Malformed lines dropped from an otherwise readable file.
    SkippedLines { path: PathBuf, count: usize },
    /// An optional vacation matrix could not be read.
    VacationMatrix { path: PathBuf, reason: String },
}

impl LoadWarning {
    pub fn describe(&self) -> String {
        match self {
            LoadWarning::SkippedFile { path, reason } => {
                format!("skipped {}: {reason}", path.display())
            }
            LoadWarning::DateFallback { path, used } => {
                format!("no snapshot date in {}, using {used}", path.display())
            }
            LoadWarning::SkippedLines { path, count } => {
                format!("skipped {count} malformed line(s) in {}", path.display())
            }
            LoadWarning::VacationMatrix { path, reason } => {
                format!("could not read vacation matrix {}: {reason}", path.display())
            }
        }
    }
}

/// All normalized rows of one run, sorted by snapshot date and already
/// filtered to the configured group key.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDataset {
    pub records: Vec<NormalizedRecord>,
    pub columns: ResolvedColumns,
    pub source_files: Vec<String>,
    pub rows_read: usize,
    pub rows_filtered_out: usize,
    /// Non-empty estimate cells that matched no duration pattern and were counted as zero.
    pub defaulted_values: usize,
    pub warnings: Vec<LoadWarning>,
}

impl SnapshotDataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
