/// Log-to-CSV conversion: read the log, extract every metric, then write the CSV.
///
/// Nothing is written unless extraction fully succeeds.
use crate::extract::{self, ExtractError, LogReport};
use crate::report;
use std::path::{Path, PathBuf};

/// Errors that can occur during a conversion.
#[derive(Debug)]
pub enum ConvertError {
    /// The input log is missing or unreadable.
    ReadLog {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A mandatory summary line is absent.
    Extract(ExtractError),
    /// The CSV could not be written.
    WriteCsv {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::ReadLog { path, source } => {
                write!(f, "failed to read log {}: {}", path.display(), source)
            }
            ConvertError::Extract(e) => write!(f, "{e}"),
            ConvertError::WriteCsv { path, source } => {
                write!(f, "failed to write csv {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::ReadLog { source, .. } => Some(source),
            ConvertError::Extract(e) => Some(e),
            ConvertError::WriteCsv { source, .. } => Some(source),
        }
    }
}

impl From<ExtractError> for ConvertError {
    fn from(e: ExtractError) -> Self {
        ConvertError::Extract(e)
    }
}

/// Read the log at `log_path` and extract its report without writing anything.
pub fn read_report(log_path: &Path) -> Result<LogReport, ConvertError> {
    let text = std::fs::read_to_string(log_path).map_err(|source| ConvertError::ReadLog {
        path: log_path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %log_path.display(), bytes = text.len(), "read log");

    let report = extract::extract_report(&text)?;
    if report.records.is_empty() {
        tracing::warn!(
            path = %log_path.display(),
            "no per-class IoU lines found; csv will only hold summary columns"
        );
    }
    Ok(report)
}

/// Convert the log at `log_path` into a two-row CSV at `csv_path`.
pub fn convert(log_path: &Path, csv_path: &Path) -> Result<LogReport, ConvertError> {
    let report = read_report(log_path)?;

    report::write_csv(
        csv_path,
        &report.records,
        report.mean_iou,
        report.pixel_wise_accuracy,
    )
    .map_err(|source| ConvertError::WriteCsv {
        path: csv_path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        log = %log_path.display(),
        csv = %csv_path.display(),
        classes = report.records.len(),
        mean_iou = report.mean_iou,
        pixel_wise_accuracy = report.pixel_wise_accuracy,
        "converted log"
    );
    Ok(report)
}
