// NewsSleuth - platform/config.rs
//
// Platform-specific data directory resolution and config.toml loading
// with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for NewsSleuth data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/newssleuth/ or %APPDATA%\NewsSleuth\config\)
    pub config_dir: PathBuf,

    /// Data directory holding history.json.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
    /// `[history]` section.
    pub history: HistorySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Simulated remote-call delay in milliseconds.
    pub delay_ms: Option<u64>,
}

/// `[history]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct HistorySection {
    /// Number of analyses retained.
    pub max_items: Option<usize>,
    /// Whether analyses are recorded at all.
    pub enabled: Option<bool>,
    /// Override for the directory holding history.json.
    pub data_dir: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Simulated remote-call delay in milliseconds.
    pub analysis_delay_ms: u64,

    /// Number of analyses retained.
    pub history_max_items: usize,

    /// Whether analyses are recorded.
    pub history_enabled: bool,

    /// Directory override for history.json.
    pub data_dir: Option<PathBuf>,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: constants::DEFAULT_ANALYSIS_DELAY_MS,
            history_max_items: constants::DEFAULT_HISTORY_MAX_ITEMS,
            history_enabled: true,
            data_dir: None,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning;
/// the application still starts but the user is informed.
///
/// Called before logging is initialised (the log level lives in this
/// file), so problems are returned rather than logged.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let (config, range_errors) = validate(raw);
    warnings.extend(range_errors.iter().map(|e| format!("{e}. Using default.")));
    (config, warnings)
}

/// Check each field against named constants, accumulating all errors.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<ConfigError>) {
    let mut config = AppConfig::default();
    let mut errors = Vec::new();

    // -- Analysis: delay_ms --
    if let Some(delay) = raw.analysis.delay_ms {
        if delay <= constants::MAX_ANALYSIS_DELAY_MS {
            config.analysis_delay_ms = delay;
        } else {
            errors.push(ConfigError::ValueOutOfRange {
                field: "analysis.delay_ms".to_string(),
                value: delay.to_string(),
                expected: format!("0-{}", constants::MAX_ANALYSIS_DELAY_MS),
            });
        }
    }

    // -- History: max_items --
    if let Some(max) = raw.history.max_items {
        if (constants::MIN_HISTORY_MAX_ITEMS..=constants::ABSOLUTE_MAX_HISTORY_ITEMS)
            .contains(&max)
        {
            config.history_max_items = max;
        } else {
            errors.push(ConfigError::ValueOutOfRange {
                field: "history.max_items".to_string(),
                value: max.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_HISTORY_MAX_ITEMS,
                    constants::ABSOLUTE_MAX_HISTORY_ITEMS
                ),
            });
        }
    }

    if let Some(enabled) = raw.history.enabled {
        config.history_enabled = enabled;
    }

    if let Some(ref dir) = raw.history.data_dir {
        if !dir.trim().is_empty() {
            config.data_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            errors.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level.clone(),
                expected: "error, warn, info, debug, trace".to_string(),
            });
        }
    }

    (config, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_missing_config_uses_defaults_silently() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(&dir.path().join("absent.toml"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_config_applied() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            [analysis]
            delay_ms = 0

            [history]
            max_items = 10
            enabled = false
            data_dir = "/var/lib/newssleuth"

            [logging]
            level = "DEBUG"
            "#,
        );
        let (config, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.analysis_delay_ms, 0);
        assert_eq!(config.history_max_items, 10);
        assert!(!config.history_enabled);
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/newssleuth")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_fall_back_with_warnings() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            [analysis]
            delay_ms = 999999

            [history]
            max_items = 0

            [logging]
            level = "loud"
            "#,
        );
        let (config, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 3, "warnings: {warnings:?}");
        assert_eq!(config.analysis_delay_ms, constants::DEFAULT_ANALYSIS_DELAY_MS);
        assert_eq!(config.history_max_items, constants::DEFAULT_HISTORY_MAX_ITEMS);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_malformed_toml_falls_back_with_warning() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[history\nmax_items = ");
        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[future]\nfeature = true\n");
        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }
}
