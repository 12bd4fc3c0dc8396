//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Boundary pre-filter settings.
///
/// Filtering attachments by filename suffix and byte size happens before the
/// pipeline ever sees an item; the pipeline itself does not re-check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Filename suffixes accepted for inspection (lowercase, no dot)
    pub extensions: Vec<String>,

    /// Maximum attachment size in mebibytes
    pub max_file_size_mb: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "png".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "webp".to_string(),
            ],
            max_file_size_mb: 10,
        }
    }
}

impl FilterConfig {
    /// Maximum accepted attachment size in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Whether a filename passes the suffix filter (case-insensitive).
    pub fn matches_extension(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.extensions
            .iter()
            .any(|ext| lower.ends_with(&format!(".{ext}")))
    }
}

/// Extraction settings for batch fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum concurrent attachment fetches in a batch
    pub parallel_fetches: usize,

    /// Per-fetch timeout in milliseconds (applied by the boundary's HTTP client)
    pub fetch_timeout_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            parallel_fetches: 4,
            fetch_timeout_ms: 30_000,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("text" or "json")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
