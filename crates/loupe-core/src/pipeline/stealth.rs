//! Pluggable decoding of payloads hidden in pixel data.
//!
//! Some tools embed their metadata steganographically (for example in the
//! alpha channel) instead of, or in addition to, the container's text
//! fields. The classifier only consults this decoder when every text field
//! has come up empty, so implementations may be arbitrarily expensive.

use image::DynamicImage;

/// A decoder for metadata hidden in pixel data.
///
/// Implementations are pure pixel computations: no I/O, no async. Any
/// internal failure (malformed payload, bad magic, truncated stream) is
/// reported as `None`; the pipeline treats "no payload" and "unreadable
/// payload" identically.
pub trait StealthDecoder: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Attempt to recover a hidden text payload from the decoded pixels.
    fn try_decode(&self, image: &DynamicImage) -> Option<String>;
}

/// The default decoder: never finds anything.
///
/// Keeps the pipeline total for deployments that do not care about
/// steganographic metadata, without a special case at the call site.
pub struct NoStealth;

impl StealthDecoder for NoStealth {
    fn name(&self) -> &str {
        "none"
    }

    fn try_decode(&self, _image: &DynamicImage) -> Option<String> {
        None
    }
}
