// AgroCast - app/analysis.rs
//
// Analysis lifecycle management. Runs the classifier behind a simulated
// model latency on a background thread, sending progress messages to the UI
// thread via an mpsc channel.
//
// Architecture:
//   - `AnalysisManager` lives on the UI thread; `run_analysis` runs on a
//     background thread.
//   - An `Arc<AtomicBool>` cancel flag lets the UI abandon an analysis; the
//     latency wait is sliced so cancellation is noticed promptly.
//   - All cross-thread communication is via `AnalysisProgress` messages.
//   - The classifier is stateless, so concurrent analyses never interfere;
//     starting a new one simply cancels the old one.

use crate::core::classifier::{Classifier, MockClassifier};
use crate::core::model::{AnalysisProgress, ClassificationResult, SeedValue};
use crate::platform::fs::{self, LeafImage};
use crate::util::constants::ANALYSIS_CANCEL_CHECK_INTERVAL_MS;
use crate::util::error::ImageError;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

// =============================================================================
// AnalysisManager
// =============================================================================

/// Manages a single in-flight analysis on a background thread.
pub struct AnalysisManager {
    /// Channel receiver for the UI to poll progress messages.
    pub progress_rx: Option<mpsc::Receiver<AnalysisProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,

    classifier: Arc<dyn Classifier>,
}

impl AnalysisManager {
    pub fn new() -> Self {
        Self::with_classifier(Arc::new(MockClassifier))
    }

    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
            classifier,
        }
    }

    /// Start analysing `path` after `delay` of simulated latency.
    ///
    /// Spawns a background thread immediately. If an analysis is already
    /// running it is cancelled first.
    pub fn start_analysis(&mut self, path: PathBuf, delay: Duration) {
        self.cancel_analysis();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        let classifier = Arc::clone(&self.classifier);
        tracing::info!(path = %path.display(), delay_ms = delay.as_millis() as u64, "Analysis started");

        std::thread::spawn(move || {
            run_analysis(path, delay, classifier, tx, cancel);
        });
    }

    /// Request cancellation of the running analysis.
    /// The background thread will send `AnalysisProgress::Cancelled` and exit.
    pub fn cancel_analysis(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
    }

    /// Poll for progress messages without blocking. Returns all pending messages.
    pub fn poll_progress(&self) -> Vec<AnalysisProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }
}

impl Default for AnalysisManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Analysis pipeline
// =============================================================================

/// Validate `path` and classify it as of `timestamp_millis`.
///
/// Shared by the background worker and headless mode.
pub fn analyze_file(
    path: &Path,
    classifier: &dyn Classifier,
    timestamp_millis: u64,
) -> Result<(LeafImage, ClassificationResult), ImageError> {
    let image = fs::inspect_image(path)?;
    let input = image.classification_input(timestamp_millis);
    let seed = SeedValue::derive(&input);

    tracing::debug!(
        file = %image.file_name,
        name_length = input.name_length,
        byte_size = input.byte_size,
        timestamp_millis = input.timestamp_millis,
        seed = seed.value(),
        "Detection analysis with seed"
    );

    let result = classifier.classify(&input);

    tracing::info!(
        file = %image.file_name,
        label = %result.label,
        confidence = result.confidence,
        healthy = result.is_healthy,
        "Leaf classified"
    );

    Ok((image, result))
}

/// Background pipeline: simulated latency, validation, classification.
///
/// Runs on a background thread. Sends `AnalysisProgress` messages to `tx`.
fn run_analysis(
    path: PathBuf,
    delay: Duration,
    classifier: Arc<dyn Classifier>,
    tx: mpsc::Sender<AnalysisProgress>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped (UI closed); exit quietly.
            }
        };
    }

    send!(AnalysisProgress::Started { path: path.clone() });

    if !wait_unless_cancelled(delay, &cancel) {
        tracing::info!(path = %path.display(), "Analysis cancelled");
        send!(AnalysisProgress::Cancelled);
        return;
    }

    match analyze_file(&path, classifier.as_ref(), fs::now_millis()) {
        Ok((_, result)) => {
            if cancel.load(Ordering::SeqCst) {
                send!(AnalysisProgress::Cancelled);
                return;
            }
            send!(AnalysisProgress::Completed { path, result });
        }
        Err(e) => {
            tracing::warn!(error = %e, "Analysis failed");
            send!(AnalysisProgress::Failed {
                error: e.to_string(),
            });
        }
    }
}

/// Sleep for `delay` in short slices. Returns false if cancelled first.
fn wait_unless_cancelled(delay: Duration, cancel: &AtomicBool) -> bool {
    let deadline = Instant::now() + delay;
    let slice = Duration::from_millis(ANALYSIS_CANCEL_CHECK_INTERVAL_MS);
    loop {
        if cancel.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep(slice.min(deadline - now));
    }
}
