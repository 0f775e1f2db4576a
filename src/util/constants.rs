// AgroCast - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "AgroCast";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "AgroCast";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Classification
// =============================================================================

/// Modulus applied to the summed file metadata before normalising.
pub const SEED_MODULUS: u128 = 1_000;

/// Seeds strictly below this value are classified as healthy.
pub const HEALTHY_SEED_THRESHOLD: f64 = 0.3;

/// Upper (exclusive) seed bounds selecting each catalog index in turn.
/// Seeds at or above the last bound select the final catalog entry.
pub const DISEASE_SEED_BOUNDS: [f64; 4] = [0.5, 0.65, 0.78, 0.9];

/// Healthy confidence = HEALTHY_CONFIDENCE_BASE + seed * HEALTHY_CONFIDENCE_SCALE.
pub const HEALTHY_CONFIDENCE_BASE: f64 = 0.85;
pub const HEALTHY_CONFIDENCE_SCALE: f64 = 0.12;

/// Disease confidence = DISEASE_CONFIDENCE_BASE + seed * DISEASE_CONFIDENCE_SCALE.
pub const DISEASE_CONFIDENCE_BASE: f64 = 0.72;
pub const DISEASE_CONFIDENCE_SCALE: f64 = 0.23;

// =============================================================================
// Analysis
// =============================================================================

/// Simulated model latency before a result is reported (ms).
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 2_000;

/// Maximum user-configurable simulated latency (ms).
pub const MAX_ANALYSIS_DELAY_MS: u64 = 10_000;

/// How often the analysis thread checks its cancel flag while waiting (ms).
pub const ANALYSIS_CANCEL_CHECK_INTERVAL_MS: u64 = 50;

/// Image file extensions accepted for analysis (lower case, no dot).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "webp", "bmp", "gif", "heic", "tif", "tiff"];

/// Images larger than this are still classified but not decoded for preview.
pub const MAX_PREVIEW_FILE_SIZE: u64 = 32 * 1024 * 1024; // 32 MB

/// Longest edge of the preview texture in pixels.
pub const PREVIEW_MAX_EDGE: u32 = 512;

// =============================================================================
// Scan history
// =============================================================================

/// Default number of scan records kept in memory.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Minimum user-configurable history size.
pub const MIN_HISTORY_LIMIT: usize = 1;

/// Maximum user-configurable history size.
pub const MAX_HISTORY_LIMIT: usize = 500;

/// Number of records shown in the dashboard "Recent Scans" card.
pub const DASHBOARD_RECENT_SCANS: usize = 3;

// =============================================================================
// Batch classification
// =============================================================================

/// Default directory recursion depth for `--batch`.
pub const DEFAULT_BATCH_MAX_DEPTH: usize = 4;

/// Hard upper bound on batch recursion depth.
pub const ABSOLUTE_MAX_BATCH_DEPTH: usize = 32;

/// Default maximum number of images classified in one batch.
pub const DEFAULT_BATCH_MAX_FILES: usize = 1_000;

/// Hard upper bound on images per batch.
pub const ABSOLUTE_MAX_BATCH_FILES: usize = 20_000;

// =============================================================================
// Weather
// =============================================================================

/// Mock temperature range in degrees Celsius (min, span).
pub const MOCK_TEMPERATURE_C: (f64, f64) = (28.0, 10.0);

/// Mock relative humidity range in percent (min, span).
pub const MOCK_HUMIDITY_PCT: (f64, f64) = (60.0, 30.0);

/// Mock wind speed range in km/h (min, span).
pub const MOCK_WIND_KMH: (f64, f64) = (5.0, 10.0);

/// Description attached to every mock reading.
pub const MOCK_WEATHER_DESCRIPTION: &str = "Partly cloudy";

// =============================================================================
// Speech
// =============================================================================

/// Speaking rate applied to every utterance.
pub const SPEECH_RATE: f32 = 0.8;

/// Words per minute at rate 1.0, for backends that take an absolute speed.
pub const SPEECH_BASE_WPM: f32 = 175.0;

/// Maximum number of voices accepted from `[speech] voices`.
pub const MAX_CONFIGURED_VOICES: usize = 32;

/// Pitch applied to every utterance.
pub const SPEECH_PITCH: f32 = 1.0;

/// Volume applied to every utterance.
pub const SPEECH_VOLUME: f32 = 1.0;

/// Locale tag used for Tamil speech.
pub const TAMIL_SPEECH_LOCALE: &str = "ta-IN";

/// Locale tag used for English speech.
pub const ENGLISH_SPEECH_LOCALE: &str = "en-US";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Longest display name accepted from config.
pub const MAX_DISPLAY_NAME_LEN: usize = 64;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum number of characters of treatment text included in debug output.
pub const DEBUG_MAX_TEXT_PREVIEW: usize = 50;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of records that can be exported in a single operation.
pub const MAX_EXPORT_RECORDS: usize = 100_000;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
