// NewsSleuth - core/export.rs
//
// CSV and JSON export of analysis history.
// Core layer: writes to any Write trait object; the path is for error
// context only.

use crate::core::model::HistoryItem;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ExportError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Export in the given format. Returns the number of items written.
pub fn export<W: Write>(
    format: ExportFormat,
    items: &[HistoryItem],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Json => export_json(items, writer, export_path),
        ExportFormat::Csv => export_csv(items, writer, export_path),
    }
}

/// Export history items to CSV, one row per item.
///
/// Writes: id, timestamp, type, verdict, confidence, red_flags, content.
/// Red flags are joined with "; ".
pub fn export_csv<W: Write>(
    items: &[HistoryItem],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id",
            "timestamp",
            "type",
            "verdict",
            "confidence",
            "red_flags",
            "content",
        ])
        .map_err(csv_err)?;

    let mut count = 0;
    for item in items {
        let timestamp = item.timestamp.to_rfc3339();
        let confidence = item.result.confidence.to_string();
        let red_flags = item.result.red_flags.join("; ");
        csv_writer
            .write_record([
                item.id.as_str(),
                timestamp.as_str(),
                item.input_type.as_str(),
                item.result.verdict.label(),
                confidence.as_str(),
                red_flags.as_str(),
                item.content.as_str(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export history items to JSON (the same array shape as the history file).
pub fn export_json<W: Write>(
    items: &[HistoryItem],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, items).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(items.len())
}
