// AgroCast - app/state.rs
//
// Application state management. Holds the current page, language, selected
// image, latest result, scan history and weather reading.
// Owned by the eframe::App implementation.

use crate::core::catalog;
use crate::core::history::ScanHistory;
use crate::core::i18n;
use crate::core::model::{AnalysisProgress, ClassificationResult, Language, WeatherReading};
use crate::core::speech::{plan_speech, Speaker};
use crate::core::weather::{MockWeather, WeatherSource};
use crate::platform::config::AppConfig;
use crate::platform::fs::{self, LeafImage, PreviewImage};
use crate::util::error::{AgroCastError, ImageError, SpeechError};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Upload,
}

/// Top-level application state.
pub struct AppState {
    pub page: Page,

    pub language: Language,

    /// Image chosen on the Upload page (None until the user picks one).
    pub selected_image: Option<LeafImage>,

    /// Decoded preview of `selected_image`, if decodable.
    pub preview: Option<PreviewImage>,

    /// Result of the most recent completed analysis of `selected_image`.
    pub last_result: Option<ClassificationResult>,

    /// Completed analyses this session, newest first.
    pub history: ScanHistory,

    pub weather: WeatherReading,

    /// Whether an analysis is currently in progress.
    pub analysis_in_progress: bool,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems, speech failures).
    pub warnings: Vec<String>,

    pub show_about: bool,

    pub show_history: bool,

    /// Set by the Upload page; the GUI starts the analysis thread.
    pub request_analysis: bool,

    /// Set by the status bar; the GUI cancels the running analysis.
    pub request_cancel: bool,

    pub config: AppConfig,

    weather_source: Box<dyn WeatherSource>,

    speaker: Box<dyn Speaker + Send>,
}

impl AppState {
    /// Create initial state from validated config.
    pub fn new(config: AppConfig, warnings: Vec<String>, speaker: Box<dyn Speaker + Send>) -> Self {
        Self::with_weather(config, warnings, speaker, Box::new(MockWeather::from_entropy()))
    }

    /// Create initial state with an explicit weather source.
    pub fn with_weather(
        config: AppConfig,
        warnings: Vec<String>,
        speaker: Box<dyn Speaker + Send>,
        mut weather_source: Box<dyn WeatherSource>,
    ) -> Self {
        let weather = weather_source.current();
        let language = config.language;
        let mut state = Self {
            page: Page::Dashboard,
            language,
            selected_image: None,
            preview: None,
            last_result: None,
            history: ScanHistory::new(config.history_limit),
            weather,
            analysis_in_progress: false,
            status_message: String::new(),
            warnings,
            show_about: false,
            show_history: false,
            request_analysis: false,
            request_cancel: false,
            config,
            weather_source,
            speaker,
        };
        state.status_message = state.t("statusReady").to_string();
        state
    }

    /// Translate `key` into the current language.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        i18n::translate(self.language, key)
    }

    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            tracing::info!(from = %self.language, to = %language, "Language changed");
            self.language = language;
        }
    }

    /// Simulated model latency from config.
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.config.analysis_delay_ms)
    }

    /// Select `path` for analysis. Clears any previous result.
    pub fn select_image(&mut self, path: &Path) -> Result<(), ImageError> {
        let image = match fs::inspect_image(path) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(error = %e, "Image selection rejected");
                self.status_message = e.to_string();
                return Err(e);
            }
        };
        tracing::info!(file = %image.file_name, size = image.byte_size, "Image selected");
        self.preview = fs::load_preview(&image.path);
        self.status_message = format!("{}: {}", self.t("selectedImage"), image.file_name);
        self.selected_image = Some(image);
        self.last_result = None;
        self.page = Page::Upload;
        Ok(())
    }

    /// Path to analyse next. Fails when nothing has been selected.
    pub fn begin_analysis(&mut self) -> Result<PathBuf, ImageError> {
        let Some(image) = &self.selected_image else {
            self.status_message = self.t("selectImageFirst").to_string();
            return Err(ImageError::NoSelection);
        };
        let path = image.path.clone();
        self.analysis_in_progress = true;
        self.last_result = None;
        self.status_message = self.t("analyzing").to_string();
        Ok(path)
    }

    /// Apply one progress message from the analysis thread.
    pub fn apply_progress(&mut self, progress: AnalysisProgress) {
        match progress {
            AnalysisProgress::Started { .. } => {
                self.analysis_in_progress = true;
            }
            AnalysisProgress::Completed { path, result } => {
                self.analysis_in_progress = false;
                self.history.push(&result, path, chrono::Utc::now());
                self.status_message = format!(
                    "{}: {} ({}%)",
                    self.t("analysisComplete"),
                    result.label,
                    result.confidence_percent()
                );
                self.last_result = Some(result);
            }
            AnalysisProgress::Failed { error } => {
                self.analysis_in_progress = false;
                self.status_message = format!("{}: {error}", self.t("analysisFailed"));
            }
            AnalysisProgress::Cancelled => {
                self.analysis_in_progress = false;
                self.status_message = self.t("statusReady").to_string();
            }
        }
    }

    /// Treatment for the latest result in the current language.
    pub fn localized_treatment(&self) -> Option<String> {
        self.last_result
            .as_ref()
            .map(|r| catalog::localized_treatment(r, self.language))
    }

    /// Read the latest treatment aloud.
    pub fn speak_treatment(&mut self) -> Result<(), SpeechError> {
        let text = self.localized_treatment().ok_or(SpeechError::EmptyText)?;
        let voices = self.speaker.voices();
        let request = plan_speech(&text, self.language, &voices);
        match self.speaker.speak(&request) {
            Ok(()) => Ok(()),
            Err(e) => {
                let msg = match e {
                    SpeechError::Unavailable => self.t("speechNotSupported").to_string(),
                    ref other => other.to_string(),
                };
                self.status_message = msg.clone();
                self.warnings.push(msg);
                Err(e)
            }
        }
    }

    pub fn refresh_weather(&mut self) {
        self.weather = self.weather_source.current();
        tracing::debug!(
            temperature = self.weather.temperature_c,
            humidity = self.weather.humidity_pct,
            risk = self.weather.risk_level.label(),
            "Weather refreshed"
        );
    }

    /// Write the scan history to `path` (CSV or JSON by extension).
    ///
    /// Treatments are written in the current language, as the command-line
    /// export does.
    pub fn export_history(&mut self, path: &Path) -> Result<usize, AgroCastError> {
        let mut records = self.history.to_vec();
        catalog::localize_records(&mut records, self.language);
        match crate::core::export::export_to_file(&records, path) {
            Ok(count) => {
                self.status_message = format!("Exported {count} scans to {}", path.display());
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.status_message = format!("Export failed: {e}");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{RiskLevel, ScanRecord};
    use crate::core::speech::{SpeechRequest, Voice};
    use crate::platform::speech::NullSpeaker;
    use std::sync::{Arc, Mutex};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_state() -> AppState {
        AppState::with_weather(
            AppConfig::default(),
            Vec::new(),
            Box::new(NullSpeaker),
            Box::new(MockWeather::new(StdRng::seed_from_u64(7))),
        )
    }

    fn sample_result() -> ClassificationResult {
        ClassificationResult {
            label: "Powdery Mildew".to_string(),
            confidence: 0.858,
            treatment: "Use sulfur-based fungicide".to_string(),
            is_healthy: false,
            catalog_index: Some(1),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = make_state();
        assert_eq!(state.page, Page::Dashboard);
        assert_eq!(state.language, Language::En);
        assert!(state.history.is_empty());
        assert!(RiskLevel::all().contains(&state.weather.risk_level));
    }

    #[test]
    fn test_begin_analysis_requires_selection() {
        let mut state = make_state();
        assert!(matches!(state.begin_analysis(), Err(ImageError::NoSelection)));
        assert!(!state.analysis_in_progress);
    }

    #[test]
    fn test_select_and_complete_records_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.jpg");
        std::fs::write(&path, vec![0u8; 10]).unwrap();

        let mut state = make_state();
        state.select_image(&path).unwrap();
        assert_eq!(state.page, Page::Upload);
        assert_eq!(state.begin_analysis().unwrap(), path);
        assert!(state.analysis_in_progress);

        state.apply_progress(AnalysisProgress::Completed {
            path: path.clone(),
            result: sample_result(),
        });
        assert!(!state.analysis_in_progress);
        assert_eq!(state.history.len(), 1);
        assert!(state.status_message.contains("86%"));
    }

    #[test]
    fn test_select_rejects_unsupported_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "x").unwrap();

        let mut state = make_state();
        assert!(state.select_image(&path).is_err());
        assert!(state.selected_image.is_none());
    }

    #[test]
    fn test_tamil_treatment_follows_language() {
        let mut state = make_state();
        state.last_result = Some(sample_result());
        let english = state.localized_treatment().unwrap();
        state.set_language(Language::Ta);
        let tamil = state.localized_treatment().unwrap();
        assert_ne!(english, tamil);
    }

    #[test]
    fn test_speech_unavailable_sets_warning() {
        let mut state = make_state();
        state.last_result = Some(sample_result());
        assert!(state.speak_treatment().is_err());
        assert_eq!(state.warnings.len(), 1);
    }

    /// Records every request it is asked to speak.
    struct RecordingSpeaker {
        voices: Vec<Voice>,
        spoken: Arc<Mutex<Vec<SpeechRequest>>>,
    }

    impl Speaker for RecordingSpeaker {
        fn speak(&mut self, request: &SpeechRequest) -> Result<(), SpeechError> {
            self.spoken.lock().unwrap().push(request.clone());
            Ok(())
        }

        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }
    }

    #[test]
    fn test_tamil_speech_reaches_backend_with_voice() {
        let spoken = Arc::new(Mutex::new(Vec::new()));
        let lekha = Voice {
            name: "Lekha".to_string(),
            lang: "ta-IN".to_string(),
        };
        let speaker = RecordingSpeaker {
            voices: vec![lekha.clone()],
            spoken: Arc::clone(&spoken),
        };
        let mut state = AppState::with_weather(
            AppConfig::default(),
            Vec::new(),
            Box::new(speaker),
            Box::new(MockWeather::new(StdRng::seed_from_u64(7))),
        );
        state.last_result = Some(sample_result());
        state.set_language(Language::Ta);
        state.speak_treatment().unwrap();

        let spoken = spoken.lock().unwrap();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].locale, "ta-IN");
        assert_eq!(spoken[0].voice, Some(lekha));
        assert_eq!(spoken[0].text, catalog::DISEASES[1].treatment_tamil);
    }

    #[test]
    fn test_export_history_uses_current_language() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("scans.json");
        let mut state = make_state();
        state.apply_progress(AnalysisProgress::Completed {
            path: dir.path().join("leaf.jpg"),
            result: sample_result(),
        });
        state.set_language(Language::Ta);

        assert_eq!(state.export_history(&dest).unwrap(), 1);
        let exported: Vec<ScanRecord> =
            serde_json::from_slice(&std::fs::read(&dest).unwrap()).unwrap();
        assert_eq!(exported[0].treatment, catalog::DISEASES[1].treatment_tamil);
        // Export does not rewrite the in-memory history.
        assert_eq!(state.history.to_vec()[0].treatment, "Use sulfur-based fungicide");
    }
}
