// NewsSleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Heuristic thresholds live here too so the scoring rules can be audited
// in one place.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "NewsSleuth";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "NewsSleuth";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Heuristic thresholds
// =============================================================================

/// Phrases that mark content as sensational. Matched against the
/// lower-cased content as plain substrings.
pub const SUSPICIOUS_PHRASES: &[&str] = &[
    "shocking",
    "unbelievable",
    "miracle",
    "secret",
    "they dont want you to know",
];

/// Fraction of the total content length (in chars) that uppercase letters
/// must exceed before the content is flagged for excessive caps.
pub const CAPS_RATIO_THRESHOLD: f64 = 0.3;

/// Pattern for a run of repeated `!`/`?` characters.
pub const PUNCTUATION_RUN_PATTERN: &str = "[!?]{2,}";

/// Number of punctuation runs that must be exceeded to raise a flag.
pub const PUNCTUATION_RUN_LIMIT: usize = 2;

/// Content shorter than this (in chars) with no other trigger is UNCERTAIN.
pub const UNCERTAIN_LENGTH_THRESHOLD: usize = 50;

/// Content shorter than this (in chars) always carries the "short" red flag.
pub const SHORT_CONTENT_THRESHOLD: usize = 100;

// =============================================================================
// Confidence ranges (base + random offset below span)
// =============================================================================

/// FAKE confidence: 75..=94.
pub const FAKE_CONFIDENCE_BASE: u8 = 75;
pub const FAKE_CONFIDENCE_SPAN: u32 = 20;

/// UNCERTAIN confidence: 40..=59.
pub const UNCERTAIN_CONFIDENCE_BASE: u8 = 40;
pub const UNCERTAIN_CONFIDENCE_SPAN: u32 = 20;

/// REAL confidence: 70..=94.
pub const REAL_CONFIDENCE_BASE: u8 = 70;
pub const REAL_CONFIDENCE_SPAN: u32 = 25;

// =============================================================================
// Input limits
// =============================================================================

/// Maximum content length accepted for analysis (chars).
pub const MAX_CONTENT_CHARS: usize = 100_000;

/// Maximum size of a content file read via `--file` (bytes).
pub const MAX_CONTENT_FILE_SIZE: u64 = 4 * 1024 * 1024; // 4 MB

// =============================================================================
// Analysis delay
// =============================================================================

/// Default artificial delay before scoring (ms), mimicking a remote call.
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 2_000;

/// Maximum user-configurable analysis delay (ms).
pub const MAX_ANALYSIS_DELAY_MS: u64 = 10_000;

// =============================================================================
// History limits
// =============================================================================

/// Default number of history items retained.
pub const DEFAULT_HISTORY_MAX_ITEMS: usize = 50;

/// Minimum user-configurable history cap.
pub const MIN_HISTORY_MAX_ITEMS: usize = 1;

/// Maximum user-configurable history cap.
pub const ABSOLUTE_MAX_HISTORY_ITEMS: usize = 500;

/// Number of content characters kept in a history item.
pub const HISTORY_CONTENT_MAX_CHARS: usize = 200;

/// Maximum size of the history file accepted on load (bytes). Larger files
/// are treated as corrupt rather than read into memory.
pub const MAX_HISTORY_FILE_SIZE: u64 = 16 * 1024 * 1024; // 16 MB

/// Number of content characters shown per row in `history list`.
pub const LIST_PREVIEW_CHARS: usize = 60;

// =============================================================================
// Fact-checking references
// =============================================================================

/// Fact-checking sites attached to URL analyses and listed by `sources`.
pub const FACT_CHECK_SOURCES: &[&str] = &[
    "https://www.snopes.com",
    "https://www.factcheck.org",
    "https://www.politifact.com",
];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum number of content characters included in debug output.
/// Prevents accidental exposure of long user-submitted text in logs.
pub const DEBUG_MAX_CONTENT_PREVIEW: usize = 40;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// History persistence file name (stored in the platform data directory).
pub const HISTORY_FILE_NAME: &str = "history.json";
