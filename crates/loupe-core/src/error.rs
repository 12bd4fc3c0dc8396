//! Error types for the Loupe extraction pipeline.
//!
//! Extraction errors are deliberately narrow: everything that can go wrong
//! for a single image (bad bytes, failed fetch) is per-item and non-fatal to
//! a batch. "No metadata found" is not an error at all, just an absent
//! result.

use thiserror::Error;

/// Top-level error type for Loupe operations.
#[derive(Error, Debug)]
pub enum LoupeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Per-item extraction errors
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors from extracting metadata out of a single image.
///
/// Both variants are reported per-item by the batch coordinator and never
/// abort sibling extractions.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The bytes are not a decodable image container
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// The attachment's bytes could not be fetched
    #[error("Fetch error for {input}: {message}")]
    Fetch { input: String, message: String },
}

/// Convenience type alias for Loupe results.
pub type Result<T> = std::result::Result<T, LoupeError>;

/// Convenience type alias for per-item extraction results.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
