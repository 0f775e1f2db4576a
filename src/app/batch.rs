// AgroCast - app/batch.rs
//
// Headless batch classification of a directory tree.
//
// Discovery walks the tree with walkdir, bounded by depth and file count,
// and keeps only supported image extensions. Files are classified in sorted
// path order so repeated runs over the same tree list results identically.
// Unreadable entries become warnings, never hard errors.

use crate::app::analysis::analyze_file;
use crate::core::classifier::Classifier;
use crate::core::history::ScanHistory;
use crate::core::model::ScanRecord;
use crate::platform::fs::is_supported_image;
use crate::util::constants::{ABSOLUTE_MAX_BATCH_DEPTH, ABSOLUTE_MAX_BATCH_FILES};
use crate::util::error::{AgroCastError, Result};
use chrono::{TimeZone, Utc};
use std::path::{Path, PathBuf};

/// Limits for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLimits {
    /// Maximum directory depth below the root (0 = root entry only).
    pub max_depth: usize,
    /// Maximum number of images to classify.
    pub max_files: usize,
}

impl BatchLimits {
    /// Clamp to the absolute ceilings.
    fn clamped(self) -> Self {
        Self {
            max_depth: self.max_depth.min(ABSOLUTE_MAX_BATCH_DEPTH),
            max_files: self.max_files.min(ABSOLUTE_MAX_BATCH_FILES),
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Records in sorted path order, IDs assigned from 1.
    pub records: Vec<ScanRecord>,
    /// Non-fatal problems encountered along the way.
    pub warnings: Vec<String>,
    /// True if `max_files` cut discovery short.
    pub truncated: bool,
}

/// Find supported image files under `root`, sorted by path.
fn discover_images(root: &Path, limits: BatchLimits, warnings: &mut Vec<String>) -> (Vec<PathBuf>, bool) {
    let mut found = Vec::new();
    let mut truncated = false;

    let walker = walkdir::WalkDir::new(root)
        .max_depth(limits.max_depth)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path_str = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                let msg = format!("Cannot access '{path_str}': {e}");
                tracing::debug!(warning = %msg, "Batch discovery warning");
                warnings.push(msg);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_supported_image(entry.path()) {
            continue;
        }

        if found.len() >= limits.max_files {
            truncated = true;
            let msg = format!(
                "Stopped after {} images (batch max_files limit)",
                limits.max_files
            );
            tracing::warn!(root = %root.display(), max_files = limits.max_files, "Batch file limit reached");
            warnings.push(msg);
            break;
        }
        found.push(entry.into_path());
    }

    found.sort();
    (found, truncated)
}

/// Classify every supported image under `root`.
///
/// `now_millis` supplies the analysis timestamp for each file in turn; it
/// is called once per image so callers can pin it in tests.
pub fn classify_directory(
    root: &Path,
    limits: BatchLimits,
    classifier: &dyn Classifier,
    mut now_millis: impl FnMut() -> u64,
) -> Result<BatchReport> {
    let metadata = std::fs::metadata(root).map_err(|e| AgroCastError::Io {
        path: root.to_path_buf(),
        operation: "batch scan",
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(AgroCastError::Io {
            path: root.to_path_buf(),
            operation: "batch scan",
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    let limits = limits.clamped();
    tracing::info!(
        root = %root.display(),
        max_depth = limits.max_depth,
        max_files = limits.max_files,
        "Batch classification started"
    );

    let mut report = BatchReport::default();
    let (paths, truncated) = discover_images(root, limits, &mut report.warnings);
    report.truncated = truncated;

    let mut history = ScanHistory::new(paths.len().max(1));
    for path in paths {
        let ts = now_millis();
        match analyze_file(&path, classifier, ts) {
            Ok((_, result)) => {
                let timestamp = Utc
                    .timestamp_millis_opt(i64::try_from(ts).unwrap_or(i64::MAX))
                    .single()
                    .unwrap_or_else(Utc::now);
                history.push(&result, path, timestamp);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Batch entry skipped");
                report.warnings.push(e.to_string());
            }
        }
    }

    // History is newest-first; batch output follows discovery order.
    report.records = history.to_vec();
    report.records.reverse();

    tracing::info!(
        classified = report.records.len(),
        warnings = report.warnings.len(),
        truncated = report.truncated,
        "Batch classification complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::MockClassifier;

    const LIMITS: BatchLimits = BatchLimits {
        max_depth: 4,
        max_files: 100,
    };

    fn make_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_leaf.jpg"), vec![0u8; 300]).unwrap();
        std::fs::write(dir.path().join("a_leaf.png"), vec![0u8; 100]).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "field notes").unwrap();
        std::fs::create_dir(dir.path().join("plot2")).unwrap();
        std::fs::write(dir.path().join("plot2").join("c_leaf.webp"), vec![0u8; 50]).unwrap();
        dir
    }

    #[test]
    fn test_classifies_images_in_sorted_order() {
        let dir = make_tree();
        let report = classify_directory(dir.path(), LIMITS, &MockClassifier, || 1_700_000_000_000).unwrap();

        let names: Vec<String> = report.records.iter().map(|r| r.file_name()).collect();
        assert_eq!(names, vec!["a_leaf.png", "b_leaf.jpg", "c_leaf.webp"]);
        assert_eq!(report.records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(!report.truncated);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_depth_limit_skips_subdirectories() {
        let dir = make_tree();
        let limits = BatchLimits {
            max_depth: 1,
            ..LIMITS
        };
        let report = classify_directory(dir.path(), limits, &MockClassifier, || 0).unwrap();
        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn test_file_limit_truncates_with_warning() {
        let dir = make_tree();
        let limits = BatchLimits {
            max_files: 1,
            ..LIMITS
        };
        let report = classify_directory(dir.path(), limits, &MockClassifier, || 0).unwrap();
        assert_eq!(report.records.len(), 1);
        assert!(report.truncated);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_results_are_reproducible_with_pinned_clock() {
        let dir = make_tree();
        let a = classify_directory(dir.path(), LIMITS, &MockClassifier, || 42).unwrap();
        let b = classify_directory(dir.path(), LIMITS, &MockClassifier, || 42).unwrap();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn test_root_must_be_directory() {
        let dir = make_tree();
        let file = dir.path().join("a_leaf.png");
        assert!(classify_directory(&file, LIMITS, &MockClassifier, || 0).is_err());
        assert!(classify_directory(&dir.path().join("missing"), LIMITS, &MockClassifier, || 0).is_err());
    }
}
