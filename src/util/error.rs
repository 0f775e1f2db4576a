// AgroCast - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.
// The classifier itself is total and has no error type.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all AgroCast operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum AgroCastError {
    /// The selected leaf image could not be used for analysis.
    Image(ImageError),

    /// Export of scan records failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for AgroCastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image(e) => write!(f, "Image error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for AgroCastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Image errors
// ---------------------------------------------------------------------------

/// Errors raised while validating a leaf image before classification.
#[derive(Debug)]
pub enum ImageError {
    /// Analysis was requested with no file selected.
    NoSelection,

    /// The selected path does not exist.
    NotFound { path: PathBuf },

    /// The selected path is not a regular file.
    NotAFile { path: PathBuf },

    /// The file extension is not a supported image type.
    UnsupportedType {
        path: PathBuf,
        extension: Option<String>,
    },

    /// The file name could not be determined.
    MissingFileName { path: PathBuf },

    /// I/O error reading file metadata.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => write!(f, "No image selected. Choose a leaf photo first."),
            Self::NotFound { path } => {
                write!(f, "Image '{}' does not exist", path.display())
            }
            Self::NotAFile { path } => {
                write!(f, "'{}' is not a regular file", path.display())
            }
            Self::UnsupportedType { path, extension } => match extension {
                Some(ext) => write!(
                    f,
                    "'{}' has unsupported extension '.{ext}'. Expected an image file.",
                    path.display()
                ),
                None => write!(
                    f,
                    "'{}' has no file extension. Expected an image file.",
                    path.display()
                ),
            },
            Self::MissingFileName { path } => {
                write!(f, "Cannot determine file name of '{}'", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Cannot read metadata of '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ImageError> for AgroCastError {
    fn from(e: ImageError) -> Self {
        Self::Image(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to scan-record export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum record count.
    TooManyRecords { count: usize, max: usize },

    /// Export destination has an extension other than .csv or .json.
    UnknownFormat { path: PathBuf },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyRecords { count, max } => write!(
                f,
                "Export of {count} records exceeds maximum of {max}."
            ),
            Self::UnknownFormat { path } => write!(
                f,
                "Cannot infer export format of '{}'. Use a .csv or .json file name.",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for AgroCastError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Speech errors
// ---------------------------------------------------------------------------

/// Errors related to reading treatment text aloud.
#[derive(Debug)]
pub enum SpeechError {
    /// No speech backend is configured on this system.
    Unavailable,

    /// There was nothing to say.
    EmptyText,

    /// The configured speech command could not be started.
    Spawn { program: String, source: io::Error },
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(
                f,
                "Speech synthesis not supported. Set [speech] command in config.toml."
            ),
            Self::EmptyText => write!(f, "Nothing to read aloud"),
            Self::Spawn { program, source } => {
                write!(f, "Failed to start speech command '{program}': {source}")
            }
        }
    }
}

impl std::error::Error for SpeechError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for AgroCast results.
pub type Result<T> = std::result::Result<T, AgroCastError>;
