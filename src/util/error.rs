// NewsSleuth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation between layers.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all NewsSleuth operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum NewsSleuthError {
    /// The submitted content was rejected before analysis.
    Input(InputError),

    /// Reading or writing the analysis history failed.
    History(HistoryError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl NewsSleuthError {
    /// True when the error was caused by what the user submitted rather
    /// than by the environment. Used by the CLI to pick an exit code.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

impl fmt::Display for NewsSleuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "Input error: {e}"),
            Self::History(e) => write!(f, "History error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
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

impl std::error::Error for NewsSleuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) => Some(e),
            Self::History(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors raised while validating content submitted for analysis.
#[derive(Debug)]
pub enum InputError {
    /// No content was provided, or it was whitespace only.
    EmptyContent,

    /// Content exceeds the maximum accepted length.
    ContentTooLong { length: usize, max: usize },

    /// Both inline content and a content file were given.
    ConflictingContent,

    /// The input type string is not one of the known types.
    UnknownInputType { value: String },

    /// Content file exceeds the maximum allowed size.
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    /// No history item carries the requested id.
    UnknownHistoryId { id: String },

    /// Clearing history was not confirmed.
    ClearNotConfirmed,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "Please provide content to analyze"),
            Self::ContentTooLong { length, max } => write!(
                f,
                "Content is {length} characters, exceeds maximum of {max}"
            ),
            Self::ConflictingContent => write!(
                f,
                "Provide either inline content or --file, not both"
            ),
            Self::UnknownInputType { value } => write!(
                f,
                "Unknown input type '{value}'. Expected one of: text, url, image, video, headline"
            ),
            Self::FileTooLarge { path, size, max } => write!(
                f,
                "Content file '{}' is {size} bytes, exceeds maximum of {max} bytes",
                path.display()
            ),
            Self::UnknownHistoryId { id } => {
                write!(f, "No history item with id '{id}'")
            }
            Self::ClearNotConfirmed => write!(
                f,
                "History was not cleared. Pass --yes to clear without a prompt"
            ),
        }
    }
}

impl std::error::Error for InputError {}

impl From<InputError> for NewsSleuthError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// History errors
// ---------------------------------------------------------------------------

/// Errors related to the persisted analysis history.
#[derive(Debug)]
pub enum HistoryError {
    /// I/O error reading or writing the history file.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// The history collection could not be serialised.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Another thread panicked while holding the history writer lock.
    LockPoisoned,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on history file '{}': {source}",
                path.display()
            ),
            Self::Serialize { path, source } => write!(
                f,
                "Failed to serialise history for '{}': {source}",
                path.display()
            ),
            Self::LockPoisoned => write!(f, "History writer lock was poisoned"),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize { source, .. } => Some(source),
            Self::LockPoisoned => None,
        }
    }
}

impl From<HistoryError> for NewsSleuthError {
    fn from(e: HistoryError) -> Self {
        Self::History(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to history export.
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

    /// The requested export format is not supported.
    UnknownFormat { format: String },
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
            Self::UnknownFormat { format } => {
                write!(f, "Unknown export format '{format}'. Expected json or csv")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::UnknownFormat { .. } => None,
        }
    }
}

impl From<ExportError> for NewsSleuthError {
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

impl From<ConfigError> for NewsSleuthError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for NewsSleuth results.
pub type Result<T> = std::result::Result<T, NewsSleuthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_input_error_is_user_error() {
        let err: NewsSleuthError = InputError::EmptyContent.into();
        assert!(err.is_user_error());
        assert_eq!(
            err.to_string(),
            "Input error: Please provide content to analyze"
        );
    }

    #[test]
    fn test_history_error_preserves_source_chain() {
        let err: NewsSleuthError = HistoryError::Io {
            path: PathBuf::from("/tmp/history.json"),
            operation: "write",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(!err.is_user_error());

        let history = err.source().expect("top-level error should have a source");
        let io_err = history.source().expect("history error should wrap io error");
        assert_eq!(io_err.to_string(), "denied");
    }

    #[test]
    fn test_config_out_of_range_message() {
        let err = ConfigError::ValueOutOfRange {
            field: "history.max_items".to_string(),
            value: "0".to_string(),
            expected: "1-500".to_string(),
        };
        assert!(err.to_string().contains("history.max_items"));
        assert!(err.source().is_none());
    }
}
