use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Cell value that marks one person-day of vacation.
const VACATION_MARKER: &str = "x";

#[derive(Error, Debug)]
pub enum VacationMatrixError {
    #[error("failed to read vacation matrix {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse vacation matrix {path}: {source}")]
    Parse { path: PathBuf, source: csv::Error },
}

/// Counts the marked cells of a vacation matrix exported as comma- or
/// semicolon-separated text. Every cell is inspected, including the first row.
pub fn count_vacation_days_in_file<P: AsRef<Path>>(path: P) -> Result<f64, VacationMatrixError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| VacationMatrixError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    count_vacation_days(&contents).map_err(|source| VacationMatrixError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn count_vacation_days(contents: &str) -> Result<f64, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(contents))
        .from_reader(contents.as_bytes());

    let mut marked = 0usize;
    for record in reader.records() {
        let record = record?;
        marked += record
            .iter()
            .filter(|cell| cell.trim().eq_ignore_ascii_case(VACATION_MARKER))
            .count();
    }
    Ok(marked as f64)
}

fn sniff_delimiter(contents: &str) -> u8 {
    let first_line = contents.lines().next().unwrap_or_default();
    if first_line.matches(';').count() > first_line.matches(',').count() {
        b';'
    } else {
        b','
    }
}
