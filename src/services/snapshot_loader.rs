use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::schema::ColumnOverrides;
use crate::domain::snapshot::{LoadWarning, NormalizedRecord, SnapshotDataset};
use crate::services::duration_parser::parse_duration;
use crate::services::schema_resolver::{SchemaError, resolve_all};

/// Token that precedes the capture date in snapshot file names.
pub const SNAPSHOT_MARKER: &str = "snapshot_";

/// Delimiters tried in order; the first one that yields enough columns wins.
const DELIMITERS: [u8; 2] = [b',', b';'];
const MIN_COLUMNS: usize = 3;

#[derive(Error, Debug)]
pub enum SnapshotLoadError {
    #[error("no snapshot files given")]
    NoFiles,
    #[error("none of the {0} snapshot file(s) could be parsed")]
    NoParseableFiles(usize),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Case-insensitive substring the group key must contain. Empty keeps every row.
    pub group_filter: String,
    pub overrides: ColumnOverrides,
    /// Capture date for files whose name carries none.
    pub fallback_date: NaiveDate,
}

/// One parsed export. Rows are kept positionally aligned with `headers`.
struct RawTable {
    path: PathBuf,
    snapshot_date: NaiveDate,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Header positions by name. A repeated header keeps its leftmost position.
    fn column_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::new();
        for (idx, name) in self.headers.iter().enumerate() {
            index.entry(name.as_str()).or_insert(idx);
        }
        index
    }
}

struct DelimitedText {
    delimiter: u8,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    skipped_lines: usize,
}

/// Reads every snapshot export, tags its rows with the capture date from the
/// file name, resolves the estimate columns and returns the filtered,
/// date-ordered dataset.
///
/// Unreadable files and unparseable file names only produce warnings.
///
/// # Errors
/// - [`SnapshotLoadError::NoFiles`] when `paths` is empty.
/// - [`SnapshotLoadError::NoParseableFiles`] when no file could be parsed.
/// - [`SnapshotLoadError::Schema`] when the required columns cannot be resolved.
pub fn load_snapshot_files<P: AsRef<Path>>(
    paths: &[P],
    options: &LoadOptions,
) -> Result<SnapshotDataset, SnapshotLoadError> {
    if paths.is_empty() {
        return Err(SnapshotLoadError::NoFiles);
    }

    let mut warnings = Vec::new();
    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        if let Some(table) = read_snapshot_file(path.as_ref(), options.fallback_date, &mut warnings) {
            tables.push(table);
        }
    }
    if tables.is_empty() {
        return Err(SnapshotLoadError::NoParseableFiles(paths.len()));
    }

    let columns = merged_columns(&tables);
    let resolved = resolve_all(&columns, &options.overrides)?;
    info!(
        group_key = %resolved.group_key,
        original = %resolved.original_estimate,
        remaining = %resolved.remaining_estimate,
        "resolved snapshot columns"
    );

    let filter = options.group_filter.trim().to_lowercase();
    let mut records = Vec::new();
    let mut rows_read = 0;
    let mut rows_filtered_out = 0;
    let mut defaulted_values = 0;

    for table in &tables {
        let index = table.column_index();
        let cell = |row: &[String], column: &str| -> String {
            index
                .get(column)
                .and_then(|idx| row.get(*idx))
                .cloned()
                .unwrap_or_default()
        };

        for row in &table.rows {
            rows_read += 1;
            let group_key = cell(row, &resolved.group_key);
            if !filter.is_empty() && !group_key.to_lowercase().contains(&filter) {
                rows_filtered_out += 1;
                continue;
            }

            let original = parse_duration(&cell(row, &resolved.original_estimate));
            let remaining = parse_duration(&cell(row, &resolved.remaining_estimate));
            defaulted_values += usize::from(original.defaulted) + usize::from(remaining.defaulted);

            records.push(NormalizedRecord {
                snapshot_date: table.snapshot_date,
                group_key,
                original_minutes: original.minutes,
                remaining_minutes: remaining.minutes,
            });
        }
    }

    records.sort_by_key(|record| record.snapshot_date);

    if defaulted_values > 0 {
        warn!(defaulted_values, "estimate values could not be read and were counted as zero");
    }
    info!(
        rows_read,
        rows_kept = records.len(),
        rows_filtered_out,
        "snapshot rows normalized"
    );

    Ok(SnapshotDataset {
        records,
        columns: resolved,
        source_files: tables.iter().map(|table| file_name(&table.path)).collect(),
        rows_read,
        rows_filtered_out,
        defaulted_values,
        warnings,
    })
}

fn read_snapshot_file(
    path: &Path,
    fallback_date: NaiveDate,
    warnings: &mut Vec<LoadWarning>,
) -> Option<RawTable> {
    let contents = match std::fs::read(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable snapshot file");
            warnings.push(LoadWarning::SkippedFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            return None;
        }
    };

    let Some(parsed) = parse_delimited(&contents) else {
        warn!(path = %path.display(), "skipping snapshot file with no usable delimiter");
        warnings.push(LoadWarning::SkippedFile {
            path: path.to_path_buf(),
            reason: format!("no delimiter produced at least {MIN_COLUMNS} columns"),
        });
        return None;
    };
    debug!(
        path = %path.display(),
        delimiter = %char::from(parsed.delimiter),
        columns = parsed.headers.len(),
        rows = parsed.rows.len(),
        "parsed snapshot file"
    );
    if parsed.skipped_lines > 0 {
        warn!(path = %path.display(), count = parsed.skipped_lines, "skipped malformed lines");
        warnings.push(LoadWarning::SkippedLines {
            path: path.to_path_buf(),
            count: parsed.skipped_lines,
        });
    }

    let snapshot_date = match snapshot_date_from_filename(&file_name(path)) {
        Some(date) => date,
        None => {
            warn!(path = %path.display(), fallback = %fallback_date, "no snapshot date in file name");
            warnings.push(LoadWarning::DateFallback {
                path: path.to_path_buf(),
                used: fallback_date,
            });
            fallback_date
        }
    };

    Some(RawTable {
        path: path.to_path_buf(),
        snapshot_date,
        headers: parsed.headers,
        rows: parsed.rows,
    })
}

/// Extracts the capture date from names like `export_snapshot_2024_03_15_v2.csv`.
///
/// Takes the text after [`SNAPSHOT_MARKER`] up to the first `.`, turns
/// underscores into hyphens and reads the first ten characters as `YYYY-MM-DD`.
pub fn snapshot_date_from_filename(name: &str) -> Option<NaiveDate> {
    let (_, rest) = name.split_once(SNAPSHOT_MARKER)?;
    let stem = rest.split('.').next().unwrap_or(rest);
    let candidate: String = stem.replace('_', "-").chars().take(10).collect();
    NaiveDate::parse_from_str(&candidate, "%Y-%m-%d").ok()
}

fn parse_delimited(contents: &[u8]) -> Option<DelimitedText> {
    DELIMITERS
        .iter()
        .find_map(|delimiter| parse_with_delimiter(contents, *delimiter))
}

fn parse_with_delimiter(contents: &[u8], delimiter: u8) -> Option<DelimitedText> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(contents);

    let headers: Vec<String> = reader
        .byte_headers()
        .ok()?
        .iter()
        .map(|name| normalize_header_name(&String::from_utf8_lossy(name)))
        .collect();
    if headers.len() < MIN_COLUMNS {
        return None;
    }

    let mut rows = Vec::new();
    let mut skipped_lines = 0;
    // Cells that are not UTF-8 (legacy spreadsheet encodings) are decoded lossily.
    for result in reader.byte_records() {
        match result {
            // Short rows are kept; their missing cells read as empty.
            Ok(record) if record.len() <= headers.len() => {
                rows.push(
                    record
                        .iter()
                        .map(|cell| String::from_utf8_lossy(cell).into_owned())
                        .collect(),
                );
            }
            _ => skipped_lines += 1,
        }
    }

    Some(DelimitedText {
        delimiter,
        headers,
        rows,
        skipped_lines,
    })
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet tools often prefix the first header with a BOM.
    name.trim_start_matches('\u{feff}').trim().to_string()
}

/// Union of all headers, in first-seen order.
fn merged_columns(tables: &[RawTable]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for header in tables.iter().flat_map(|table| table.headers.iter()) {
        if !columns.contains(header) {
            columns.push(header.clone());
        }
    }
    columns
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
