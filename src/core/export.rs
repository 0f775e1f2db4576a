// AgroCast - core/export.rs
//
// CSV and JSON export of scan records.
// Core layer: writes to any Write trait object.
//
// Both formats carry the full image path (CSV `file` column, JSON `path`),
// not the bare file name the history list shows, so rows from a batch over
// nested plots stay distinguishable. Treatment text is written as given;
// callers localize records first.

use crate::core::model::ScanRecord;
use crate::util::constants::MAX_EXPORT_RECORDS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Output format for an export, inferred from the destination extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.csv` or `.json` (case-insensitive); anything else is an error.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ExportError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn check_count(records: &[ScanRecord]) -> Result<(), ExportError> {
    if records.len() > MAX_EXPORT_RECORDS {
        return Err(ExportError::TooManyRecords {
            count: records.len(),
            max: MAX_EXPORT_RECORDS,
        });
    }
    Ok(())
}

/// Export records to CSV format.
///
/// Writes: timestamp, file (full path), label, confidence, healthy, treatment
pub fn export_csv<W: Write>(
    records: &[ScanRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_count(records)?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    csv_writer
        .write_record(["timestamp", "file", "label", "confidence", "healthy", "treatment"])
        .map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        let timestamp = record.timestamp.to_rfc3339();
        let file = record.path.display().to_string();
        let confidence = format!("{:.3}", record.confidence);
        csv_writer
            .write_record([
                timestamp.as_str(),
                file.as_str(),
                record.label.as_str(),
                confidence.as_str(),
                if record.is_healthy { "true" } else { "false" },
                record.treatment.as_str(),
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

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[ScanRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_count(records)?;
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

/// Create `path` and export `records` in the format its extension names.
pub fn export_to_file(records: &[ScanRecord], path: &Path) -> Result<usize, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);
    let count = match format {
        ExportFormat::Csv => export_csv(records, writer, path)?,
        ExportFormat::Json => export_json(records, writer, path)?,
    };
    tracing::info!(path = %path.display(), records = count, ?format, "Scan records exported");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn make_record(id: u64, label: &str) -> ScanRecord {
        ScanRecord {
            id,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            path: PathBuf::from(format!("leaf_{id}.jpg")),
            label: label.to_string(),
            confidence: 0.858,
            is_healthy: label == "Healthy",
            treatment: "Use sulfur-based fungicide, then monitor.".to_string(),
        }
    }

    #[test]
    fn test_csv_export() {
        let records = vec![make_record(1, "Powdery Mildew"), make_record(2, "Healthy")];
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("timestamp,file,label,confidence,healthy,treatment"));
        assert!(output.contains("leaf_1.jpg,Powdery Mildew,0.858,false"));
        assert!(output.contains("Healthy,0.858,true"));
        // Treatment contains a comma, so it must be quoted.
        assert!(output.contains("\"Use sulfur-based fungicide, then monitor.\""));
    }

    #[test]
    fn test_csv_file_column_is_full_path() {
        let mut record = make_record(1, "Rust Disease");
        record.path = PathBuf::from("north").join("plot_b").join("leaf_1.jpg");
        let mut buf = Vec::new();
        export_csv(std::slice::from_ref(&record), &mut buf, Path::new("out.csv")).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[1], record.path.display().to_string());
        assert_ne!(&row[1], record.file_name());
    }

    #[test]
    fn test_json_export() {
        let records = vec![make_record(1, "Anthracnose")];
        let mut buf = Vec::new();
        let count = export_json(&records, &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 1);

        let parsed: Vec<ScanRecord> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a.CSV")).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("a.json")).unwrap(), ExportFormat::Json);
        assert!(matches!(
            ExportFormat::from_path(Path::new("a.txt")),
            Err(ExportError::UnknownFormat { .. })
        ));
    }
}
