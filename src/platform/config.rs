// AgroCast - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::Language;
use crate::core::speech::Voice;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for AgroCast configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/agrocast/ or %APPDATA%\AgroCast\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Paths rooted at an explicit config directory (CLI override).
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub ui: UiSection,
    pub analysis: AnalysisSection,
    pub batch: BatchSection,
    pub speech: SpeechSection,
    pub logging: LoggingSection,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Language code: "en" or "ta".
    pub language: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
    /// Name shown in the dashboard greeting.
    pub display_name: Option<String>,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Simulated model latency in ms.
    pub delay_ms: Option<u64>,
    /// Number of scan records kept in memory.
    pub history_limit: Option<usize>,
}

/// `[batch]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct BatchSection {
    pub max_depth: Option<usize>,
    pub max_files: Option<usize>,
}

/// `[speech]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SpeechSection {
    /// Program and argument template; see platform::speech for placeholders.
    /// e.g. `["espeak-ng", "-v", "{voice}", "-s", "{wpm}"]`
    pub command: Option<Vec<String>>,
    /// Set false to disable read-aloud entirely.
    pub enabled: Option<bool>,
    /// Voices the command can use, as `[[speech.voices]]` tables with
    /// `name` and `lang`.
    pub voices: Option<Vec<Voice>>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    pub language: Language,
    pub font_size: f32,
    pub display_name: Option<String>,

    // -- Analysis --
    pub analysis_delay_ms: u64,
    pub history_limit: usize,

    // -- Batch --
    pub batch_max_depth: usize,
    pub batch_max_files: usize,

    // -- Speech --
    pub speech_enabled: bool,
    pub speech_command: Option<Vec<String>>,
    pub speech_voices: Vec<Voice>,

    // -- Logging --
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            language: Language::En,
            font_size: constants::DEFAULT_FONT_SIZE,
            display_name: None,
            analysis_delay_ms: constants::DEFAULT_ANALYSIS_DELAY_MS,
            history_limit: constants::DEFAULT_HISTORY_LIMIT,
            batch_max_depth: constants::DEFAULT_BATCH_MAX_DEPTH,
            batch_max_files: constants::DEFAULT_BATCH_MAX_FILES,
            speech_enabled: true,
            speech_command: None,
            speech_voices: Vec::new(),
            log_level: None,
            log_file: None,
        }
    }
}

/// Location of config.toml inside `config_dir`.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(constants::CONFIG_FILE_NAME)
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning;
/// the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_path(config_dir);

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(source) => {
            let msg = format!("{}. Using defaults.", ConfigError::Io { path, source });
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            let msg = format!("{}. Using defaults.", ConfigError::TomlParse { path, source });
            tracing::warn!("{}", msg);
            return (AppConfig::default(), vec![msg]);
        }
    };

    tracing::info!(path = %path.display(), "Loaded config.toml");
    validate(raw)
}

/// Validate each field against named constants, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => warnings.push(format!(
                "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (light).",
            )),
        }
    }

    // -- UI: language --
    if let Some(ref code) = raw.ui.language {
        match Language::from_code(code) {
            Some(lang) => config.language = lang,
            None => warnings.push(format!(
                "[ui] language = \"{code}\" is not recognised. Expected \"en\" or \"ta\". Using default (en).",
            )),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(out_of_range(
                "[ui] font_size",
                size,
                format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- UI: display_name --
    if let Some(name) = raw.ui.display_name {
        let name = name.trim().to_string();
        if name.chars().count() > constants::MAX_DISPLAY_NAME_LEN {
            warnings.push(format!(
                "[ui] display_name is longer than {} characters. Ignored.",
                constants::MAX_DISPLAY_NAME_LEN
            ));
        } else if !name.is_empty() {
            config.display_name = Some(name);
        }
    }

    // -- Analysis: delay_ms --
    if let Some(delay) = raw.analysis.delay_ms {
        if delay <= constants::MAX_ANALYSIS_DELAY_MS {
            config.analysis_delay_ms = delay;
        } else {
            warnings.push(out_of_range(
                "[analysis] delay_ms",
                delay,
                format!("0-{}", constants::MAX_ANALYSIS_DELAY_MS),
                constants::DEFAULT_ANALYSIS_DELAY_MS,
            ));
        }
    }

    // -- Analysis: history_limit --
    if let Some(limit) = raw.analysis.history_limit {
        if (constants::MIN_HISTORY_LIMIT..=constants::MAX_HISTORY_LIMIT).contains(&limit) {
            config.history_limit = limit;
        } else {
            warnings.push(out_of_range(
                "[analysis] history_limit",
                limit,
                format!("{}-{}", constants::MIN_HISTORY_LIMIT, constants::MAX_HISTORY_LIMIT),
                constants::DEFAULT_HISTORY_LIMIT,
            ));
        }
    }

    // -- Batch: max_depth --
    if let Some(depth) = raw.batch.max_depth {
        if (1..=constants::ABSOLUTE_MAX_BATCH_DEPTH).contains(&depth) {
            config.batch_max_depth = depth;
        } else {
            warnings.push(out_of_range(
                "[batch] max_depth",
                depth,
                format!("1-{}", constants::ABSOLUTE_MAX_BATCH_DEPTH),
                constants::DEFAULT_BATCH_MAX_DEPTH,
            ));
        }
    }

    // -- Batch: max_files --
    if let Some(files) = raw.batch.max_files {
        if (1..=constants::ABSOLUTE_MAX_BATCH_FILES).contains(&files) {
            config.batch_max_files = files;
        } else {
            warnings.push(out_of_range(
                "[batch] max_files",
                files,
                format!("1-{}", constants::ABSOLUTE_MAX_BATCH_FILES),
                constants::DEFAULT_BATCH_MAX_FILES,
            ));
        }
    }

    // -- Speech --
    if let Some(enabled) = raw.speech.enabled {
        config.speech_enabled = enabled;
    }
    if let Some(command) = raw.speech.command {
        match command.first() {
            Some(program) if !program.trim().is_empty() => {
                config.speech_command = Some(command);
            }
            _ => warnings.push(
                "[speech] command is empty. Read-aloud is unavailable until a program is set."
                    .to_string(),
            ),
        }
    }
    if let Some(voices) = raw.speech.voices {
        for voice in voices {
            if voice.name.trim().is_empty() || voice.lang.trim().is_empty() {
                warnings.push(
                    "[speech] voices entry needs both name and lang. Entry ignored.".to_string(),
                );
            } else if config.speech_voices.len() >= constants::MAX_CONFIGURED_VOICES {
                warnings.push(format!(
                    "[speech] voices lists more than {} entries. Extra voices ignored.",
                    constants::MAX_CONFIGURED_VOICES
                ));
                break;
            } else {
                config.speech_voices.push(voice);
            }
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Warning text for a numeric setting outside its allowed range.
fn out_of_range(
    field: &str,
    value: impl std::fmt::Display,
    expected: String,
    default: impl std::fmt::Display,
) -> String {
    let err = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    };
    format!("{err}. Using default ({default}).")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> (AppConfig, Vec<String>) {
        validate(toml::from_str(toml_text).unwrap())
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_values_applied() {
        let (config, warnings) = parse(
            r#"
            [ui]
            theme = "dark"
            language = "ta"
            display_name = "  Meena  "

            [analysis]
            delay_ms = 0
            history_limit = 10

            [speech]
            command = ["espeak-ng", "-v", "{voice}", "-s", "{wpm}"]

            [[speech.voices]]
            name = "ta"
            lang = "ta-IN"

            [logging]
            level = "debug"
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert!(config.dark_mode);
        assert_eq!(config.language, Language::Ta);
        assert_eq!(config.display_name.as_deref(), Some("Meena"));
        assert_eq!(config.analysis_delay_ms, 0);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.speech_command.unwrap()[0], "espeak-ng");
        assert_eq!(
            config.speech_voices,
            vec![Voice {
                name: "ta".to_string(),
                lang: "ta-IN".to_string(),
            }]
        );
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_default() {
        let (config, warnings) = parse(
            r#"
            [ui]
            language = "fr"
            font_size = 99.0

            [analysis]
            delay_ms = 60000
            history_limit = 0

            [batch]
            max_depth = 0
            "#,
        );
        assert_eq!(warnings.len(), 5, "{warnings:?}");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
        assert_eq!(config.analysis_delay_ms, constants::DEFAULT_ANALYSIS_DELAY_MS);
        assert_eq!(config.history_limit, constants::DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.batch_max_depth, constants::DEFAULT_BATCH_MAX_DEPTH);
    }

    #[test]
    fn test_empty_speech_command_warns() {
        let (config, warnings) = parse("[speech]\ncommand = []\n");
        assert!(config.speech_command.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_incomplete_speech_voice_warns() {
        let (config, warnings) = parse(
            "[[speech.voices]]\nname = \"Lekha\"\nlang = \"ta-IN\"\n\n[[speech.voices]]\nname = \"\"\nlang = \"en-US\"\n",
        );
        assert_eq!(config.speech_voices.len(), 1);
        assert_eq!(config.speech_voices[0].name, "Lekha");
        assert_eq!(warnings.len(), 1, "{warnings:?}");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (_, warnings) = parse("[future]\nsetting = 1\n[ui]\nshiny = true\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_config_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(config_path(dir.path()), "[ui\nlanguage = ").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
    }

    #[test]
    fn test_load_config_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(config_path(dir.path()), "[ui]\nlanguage = \"ta\"\n").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.language, Language::Ta);
    }
}
