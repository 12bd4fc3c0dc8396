//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "filter.extensions must not be empty".into(),
            ));
        }
        if self.filter.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "filter.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.extraction.parallel_fetches == 0 {
            return Err(ConfigError::ValidationError(
                "extraction.parallel_fetches must be > 0".into(),
            ));
        }
        if self.extraction.fetch_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "extraction.fetch_timeout_ms must be > 0".into(),
            ));
        }
        if !matches!(self.output.format.as_str(), "text" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "output.format must be \"text\" or \"json\", got {:?}",
                self.output.format
            )));
        }
        Ok(())
    }
}
