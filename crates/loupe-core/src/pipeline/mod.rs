//! Metadata extraction pipeline components.
//!
//! This module contains all the stages of the extraction pipeline:
//! - **source**: Where attachment bytes come from (file, URL, memory)
//! - **decode**: Open image containers and surface their text fields
//! - **classify**: Decide which metadata convention the text follows
//! - **params**: Parse A1111-style parameter blocks into ordered fields
//! - **stealth**: Pluggable decoding of pixel-embedded payloads
//! - **inspector**: Orchestrates decode and classify for one image
//! - **batch**: Concurrent extraction over many attachments

pub mod batch;
pub mod classify;
pub mod decode;
pub mod inspector;
pub mod params;
pub mod source;
pub mod stealth;

// Re-exports for convenient access
pub use batch::{extract_all, scan_first};
pub use classify::SchemaClassifier;
pub use decode::{DecodedImage, ImageDecoder};
pub use inspector::Inspector;
pub use params::{ParameterSet, STEP_MARKER};
pub use source::{AttachmentSource, BytesSource, FileSource, UrlSource};
pub use stealth::{NoStealth, StealthDecoder};
