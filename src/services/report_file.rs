use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::analysis_types::AnalysisReport;

#[derive(Error, Debug)]
pub enum ReportFileError {
    #[error("failed to access report file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to encode or decode yaml report {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("failed to encode or decode json report {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Yaml,
    Json,
}

fn format_for(path: &Path) -> ReportFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
        _ => ReportFormat::Yaml,
    }
}

/// Writes the report as JSON when the path ends in `.json`, YAML otherwise.
pub fn write_report_file<P: AsRef<Path>>(path: P, report: &AnalysisReport) -> Result<(), ReportFileError> {
    let path = path.as_ref();
    let contents = match format_for(path) {
        ReportFormat::Json => serde_json::to_string_pretty(report).map_err(|source| ReportFileError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        ReportFormat::Yaml => serde_yaml::to_string(report).map_err(|source| ReportFileError::Yaml {
            path: path.to_path_buf(),
            source,
        })?,
    };
    std::fs::write(path, contents).map_err(|source| ReportFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_report_file<P: AsRef<Path>>(path: P) -> Result<AnalysisReport, ReportFileError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ReportFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match format_for(path) {
        ReportFormat::Json => serde_json::from_str(&contents).map_err(|source| ReportFileError::Json {
            path: path.to_path_buf(),
            source,
        }),
        ReportFormat::Yaml => serde_yaml::from_str(&contents).map_err(|source| ReportFileError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}
