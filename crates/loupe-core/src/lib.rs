//! Loupe Core - Embeddable generation-metadata extraction library.
//!
//! Loupe reads the metadata that image-generation tools embed in their
//! output files (PNG text chunks, EXIF fields, steganographic payloads) and
//! turns it into structured data: raw text, a schema tag, and for
//! A1111-style parameter blocks an ordered field mapping.
//!
//! # Architecture
//!
//! Loupe is a pure pipeline over in-memory bytes, with byte acquisition
//! behind a trait:
//!
//! ```text
//! Source → Fetch → Decode → Classify → (Parse | Passthrough)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use loupe_core::{Config, Inspector, ParameterSet};
//!
//! #[tokio::main]
//! async fn main() -> loupe_core::Result<()> {
//!     let config = Config::load()?;
//!     let inspector = Inspector::new(&config);
//!
//!     let bytes = tokio::fs::read("./image.png").await?;
//!     if let Some(found) = inspector.extract_bytes(bytes)? {
//!         if found.is_standard() {
//!             let params = ParameterSet::parse(&found.text);
//!             println!("Steps: {:?}", params.get("Steps"));
//!         } else {
//!             println!("{}", found.text);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ExtractError, ExtractResult, LoupeError, Result};
pub use pipeline::{
    extract_all, scan_first, AttachmentSource, BytesSource, FileSource, Inspector, ParameterSet,
    StealthDecoder, UrlSource,
};
pub use render::{FieldLayout, Presentation};
pub use types::{ExtractedText, Schema, TextOrigin};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_config_builds_an_inspector() {
        let config = Config::default();
        assert_eq!(config.extraction.parallel_fetches, 4);
        let _inspector = Inspector::new(&config);
    }
}
