// AgroCast - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Language
// =============================================================================

/// Display and speech language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ta,
}

impl Language {
    /// Returns all variants in selector order.
    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Ta]
    }

    /// Short code used in config files and on the CLI.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ta => "ta",
        }
    }

    /// Label shown on the language selector button.
    pub fn selector_label(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Ta => "தமிழ்",
        }
    }

    /// Parse a language code, case-insensitively. Returns `None` for anything
    /// other than `en` or `ta`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "ta" => Some(Language::Ta),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Classification
// =============================================================================

/// File metadata the mock classifier is seeded from.
///
/// Constructed fresh for every analysis; `timestamp_millis` is the wall-clock
/// time at which the analysis ran, so repeating an analysis of the same file
/// normally yields a different seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassificationInput {
    /// Length of the file name in UTF-16 code units.
    pub name_length: u64,

    /// File size in bytes.
    pub byte_size: u64,

    /// Milliseconds since the Unix epoch.
    pub timestamp_millis: u64,
}

impl ClassificationInput {
    pub fn new(name_length: u64, byte_size: u64, timestamp_millis: u64) -> Self {
        Self {
            name_length,
            byte_size,
            timestamp_millis,
        }
    }

    /// Build an input from a file name, measuring its length in UTF-16 code
    /// units so non-ASCII names seed the same way a browser file object would.
    pub fn from_file_name(file_name: &str, byte_size: u64, timestamp_millis: u64) -> Self {
        Self::new(
            file_name.encode_utf16().count() as u64,
            byte_size,
            timestamp_millis,
        )
    }
}

/// Normalised pseudo-random value in `[0, 1)` derived from a
/// `ClassificationInput`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SeedValue(f64);

impl SeedValue {
    /// Derive the seed as `((name_length + byte_size + timestamp_millis) mod 1000) / 1000`.
    ///
    /// The sum is widened to 128 bits so it can never overflow.
    pub fn derive(input: &ClassificationInput) -> Self {
        let sum = u128::from(input.name_length)
            + u128::from(input.byte_size)
            + u128::from(input.timestamp_millis);
        let modulus = crate::util::constants::SEED_MODULUS;
        // Remainder is < 1000, so the cast to f64 is exact.
        Self((sum % modulus) as f64 / modulus as f64)
    }

    /// Construct a seed directly. Values outside `[0, 1)` are clamped.
    pub fn from_raw(value: f64) -> Self {
        if value.is_nan() || value < 0.0 {
            Self(0.0)
        } else if value >= 1.0 {
            Self(0.999)
        } else {
            Self(value)
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// One fixed disease record with bilingual treatment advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiseaseCatalogEntry {
    pub name: &'static str,
    pub treatment_english: &'static str,
    pub treatment_tamil: &'static str,
}

/// Outcome of a single classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// "Healthy" or one of the catalog disease names.
    pub label: String,

    /// Confidence in `[0, 1]`, within the sub-range of the result's branch.
    pub confidence: f64,

    /// English treatment recommendation.
    pub treatment: String,

    pub is_healthy: bool,

    /// Index into the disease catalog; `None` when healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_index: Option<usize>,
}

impl ClassificationResult {
    /// Confidence as a whole percentage, rounded to nearest.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

// =============================================================================
// Scan records
// =============================================================================

/// A completed analysis, as shown under "Recent Scans" and exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Monotonically increasing ID within the session.
    pub id: u64,

    /// When the analysis completed.
    pub timestamp: DateTime<Utc>,

    /// Path of the analysed image.
    pub path: PathBuf,

    pub label: String,

    pub confidence: f64,

    pub is_healthy: bool,

    /// English treatment recommendation.
    pub treatment: String,
}

impl ScanRecord {
    /// File name component of `path`, or the full path if it has none.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Confidence as a whole percentage, rounded to nearest.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

// =============================================================================
// Weather
// =============================================================================

/// Disease pressure implied by current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn all() -> &'static [RiskLevel] {
        &[RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
    }

    /// Translation key for the risk badge.
    pub fn translation_key(&self) -> &'static str {
        match self {
            RiskLevel::Low => "riskLow",
            RiskLevel::Medium => "riskMedium",
            RiskLevel::High => "riskHigh",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// A single weather observation for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub description: String,
    pub risk_level: RiskLevel,
}

// =============================================================================
// Analysis progress (for UI updates)
// =============================================================================

/// Progress messages sent from the analysis thread to the UI thread.
#[derive(Debug, Clone)]
pub enum AnalysisProgress {
    /// The simulated model run has begun.
    Started { path: PathBuf },

    /// Classification finished.
    Completed {
        path: PathBuf,
        result: ClassificationResult,
    },

    /// The image could not be analysed.
    Failed { error: String },

    /// Analysis was cancelled before completion.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code(" TA "), Some(Language::Ta));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn test_seed_derivation() {
        let seed = SeedValue::derive(&ClassificationInput::new(10, 2000, 240));
        assert!((seed.value() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_seed_never_overflows() {
        let seed = SeedValue::derive(&ClassificationInput::new(u64::MAX, u64::MAX, u64::MAX));
        assert!((0.0..1.0).contains(&seed.value()));
    }

    #[test]
    fn test_utf16_name_length() {
        // "இலை.png": 3 Tamil code points (each one UTF-16 unit) + ".png".
        let input = ClassificationInput::from_file_name("இலை.png", 0, 0);
        assert_eq!(input.name_length, 7);
        // A supplementary-plane char counts as two units.
        let input = ClassificationInput::from_file_name("\u{1F33F}.jpg", 0, 0);
        assert_eq!(input.name_length, 6);
    }

    #[test]
    fn test_seed_from_raw_clamps() {
        assert_eq!(SeedValue::from_raw(-1.0).value(), 0.0);
        assert!(SeedValue::from_raw(1.5).value() < 1.0);
        assert_eq!(SeedValue::from_raw(f64::NAN).value(), 0.0);
    }

    #[test]
    fn test_confidence_percent_rounds() {
        let r = ClassificationResult {
            label: "Healthy".to_string(),
            confidence: 0.858,
            treatment: String::new(),
            is_healthy: true,
            catalog_index: None,
        };
        assert_eq!(r.confidence_percent(), 86);
    }
}
