// AgroCast - app/headless.rs
//
// Command-line classification without the GUI: one image or a directory,
// printed as text or JSON, optionally exported to CSV/JSON.

use crate::app::analysis::analyze_file;
use crate::app::batch::{classify_directory, BatchLimits};
use crate::core::catalog;
use crate::core::classifier::Classifier;
use crate::core::export;
use crate::core::history::ScanHistory;
use crate::core::model::{Language, ScanRecord};
use crate::util::error::{AgroCastError, Result};
use chrono::{TimeZone, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What to classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Image(PathBuf),
    Directory(PathBuf),
}

/// A headless run as requested on the command line.
#[derive(Debug, Clone)]
pub struct HeadlessRequest {
    pub target: Target,
    pub json: bool,
    pub export: Option<PathBuf>,
    pub language: Language,
    pub limits: BatchLimits,
}

/// Summary of a headless run.
#[derive(Debug, Default)]
pub struct HeadlessOutcome {
    pub records: Vec<ScanRecord>,
    pub warnings: Vec<String>,
}

/// Classify the requested target, print results to `out`, and export if asked.
///
/// `now_millis` supplies analysis timestamps (called once per image).
pub fn run<W: Write>(
    request: &HeadlessRequest,
    classifier: &dyn Classifier,
    now_millis: impl FnMut() -> u64,
    out: &mut W,
) -> Result<HeadlessOutcome> {
    let mut outcome = match &request.target {
        Target::Image(path) => classify_single(path, classifier, now_millis)?,
        Target::Directory(root) => {
            let report = classify_directory(root, request.limits, classifier, now_millis)?;
            HeadlessOutcome {
                records: report.records,
                warnings: report.warnings,
            }
        }
    };

    catalog::localize_records(&mut outcome.records, request.language);
    print_records(&outcome.records, request.json, out)?;

    if let Some(dest) = &request.export {
        export::export_to_file(&outcome.records, dest)?;
    }
    Ok(outcome)
}

fn classify_single(
    path: &Path,
    classifier: &dyn Classifier,
    mut now_millis: impl FnMut() -> u64,
) -> Result<HeadlessOutcome> {
    let ts = now_millis();
    let (_, result) = analyze_file(path, classifier, ts)?;
    let timestamp = Utc
        .timestamp_millis_opt(i64::try_from(ts).unwrap_or(i64::MAX))
        .single()
        .unwrap_or_else(Utc::now);
    let mut history = ScanHistory::new(1);
    let record = history.push(&result, path.to_path_buf(), timestamp).clone();
    Ok(HeadlessOutcome {
        records: vec![record],
        warnings: Vec::new(),
    })
}

fn print_records<W: Write>(
    records: &[ScanRecord],
    json: bool,
    out: &mut W,
) -> Result<()> {
    let io_err = |e| AgroCastError::Io {
        path: PathBuf::from("<stdout>"),
        operation: "write results",
        source: e,
    };

    if json {
        let text = serde_json::to_string_pretty(records).map_err(|e| AgroCastError::Io {
            path: PathBuf::from("<stdout>"),
            operation: "serialise results",
            source: e.into(),
        })?;
        writeln!(out, "{text}").map_err(io_err)?;
        return Ok(());
    }

    for record in records {
        writeln!(
            out,
            "{}: {} ({}%)",
            record.path.display(),
            record.label,
            record.confidence_percent()
        )
        .map_err(io_err)?;
        writeln!(out, "    {}", record.treatment).map_err(io_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::MockClassifier;

    fn request(target: Target) -> HeadlessRequest {
        HeadlessRequest {
            target,
            json: false,
            export: None,
            language: Language::En,
            limits: BatchLimits {
                max_depth: 4,
                max_files: 100,
            },
        }
    }

    /// File name `leaf.jpg` (8) + 2000 bytes; ts chosen so the seed is 0.25.
    fn healthy_fixture() -> (tempfile::TempDir, PathBuf, u64) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.jpg");
        std::fs::write(&path, vec![0u8; 2000]).unwrap();
        (dir, path, 1_700_000_000_000 - 2008 + 250)
    }

    #[test]
    fn test_single_image_text_output() {
        let (_dir, path, ts) = healthy_fixture();
        let mut out = Vec::new();
        let outcome = run(&request(Target::Image(path)), &MockClassifier, || ts, &mut out).unwrap();

        assert_eq!(outcome.records.len(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("leaf.jpg: Healthy (88%)"), "{text}");
    }

    #[test]
    fn test_tamil_treatment_in_json() {
        let (_dir, path, ts) = healthy_fixture();
        let mut req = request(Target::Image(path));
        req.json = true;
        req.language = Language::Ta;
        let mut out = Vec::new();
        run(&req, &MockClassifier, || ts, &mut out).unwrap();

        let parsed: Vec<ScanRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0].label, "Healthy");
        assert_eq!(parsed[0].treatment, catalog::HEALTHY_TREATMENT_TA);
    }

    #[test]
    fn test_missing_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = run(
            &request(Target::Image(dir.path().join("none.jpg"))),
            &MockClassifier,
            || 0,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, AgroCastError::Image(_)));
        assert!(out.is_empty());
    }
}
