//! Single-image orchestration - decode then classify.

use std::sync::Arc;

use crate::config::Config;
use crate::error::ExtractResult;
use crate::types::ExtractedText;

use super::classify::SchemaClassifier;
use super::decode::ImageDecoder;
use super::stealth::{NoStealth, StealthDecoder};

/// Runs the extraction stages over one image's bytes.
///
/// Owns the stealth decoder handle and the batch tuning read from config.
/// Cheap to clone; the batch coordinator hands one clone to every task.
#[derive(Clone)]
pub struct Inspector {
    stealth: Arc<dyn StealthDecoder>,
    parallel_fetches: usize,
}

impl Inspector {
    /// Create an inspector with the default (no-op) stealth decoder.
    pub fn new(config: &Config) -> Self {
        Self::with_stealth(config, Arc::new(NoStealth))
    }

    /// Create an inspector with a custom stealth decoder.
    pub fn with_stealth(config: &Config, stealth: Arc<dyn StealthDecoder>) -> Self {
        Self {
            stealth,
            parallel_fetches: config.extraction.parallel_fetches,
        }
    }

    /// Extract generation metadata from raw image bytes.
    ///
    /// Pure computation over the buffer: no I/O, no await points. `Ok(None)`
    /// means a well-formed image that simply carries no metadata; `Err` only
    /// ever means the bytes were not a decodable image.
    pub fn extract_bytes(&self, bytes: Vec<u8>) -> ExtractResult<Option<ExtractedText>> {
        let start = std::time::Instant::now();

        let decoded = ImageDecoder::decode(bytes)?;
        tracing::trace!("  Decode: {:?}", start.elapsed());

        let classify_start = std::time::Instant::now();
        let extracted = SchemaClassifier::classify(&decoded, self.stealth.as_ref());
        tracing::trace!("  Classify: {:?}", classify_start.elapsed());

        match &extracted {
            Some(found) => tracing::debug!(
                "Found {:?} metadata via {:?} in {:?}",
                found.schema,
                found.origin,
                start.elapsed()
            ),
            None => tracing::debug!("No metadata ({:?})", start.elapsed()),
        }
        Ok(extracted)
    }

    /// Concurrency bound the batch coordinator should use.
    pub fn parallel_fetches(&self) -> usize {
        self.parallel_fetches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Schema, TextOrigin};

    fn png_with_text(fields: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, 2, 2);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            for (keyword, text) in fields {
                encoder
                    .add_text_chunk(keyword.to_string(), text.to_string())
                    .unwrap();
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0u8; 16]).unwrap();
        }
        buf
    }

    #[test]
    fn test_extract_bytes_finds_parameters() {
        let inspector = Inspector::new(&Config::default());
        let bytes = png_with_text(&[("parameters", "a cat, Steps: 20, Sampler: Euler")]);

        let extracted = inspector.extract_bytes(bytes).unwrap().unwrap();
        assert_eq!(extracted.schema, Schema::StandardParameters);
        assert_eq!(extracted.origin, TextOrigin::PrimaryField);
    }

    #[test]
    fn test_extract_bytes_without_metadata_is_none() {
        let inspector = Inspector::new(&Config::default());
        let bytes = png_with_text(&[]);
        assert!(inspector.extract_bytes(bytes).unwrap().is_none());
    }

    #[test]
    fn test_extract_bytes_rejects_garbage() {
        let inspector = Inspector::new(&Config::default());
        assert!(inspector.extract_bytes(b"not an image".to_vec()).is_err());
    }

    #[test]
    fn test_custom_stealth_decoder_is_consulted() {
        struct FixedPayload;
        impl StealthDecoder for FixedPayload {
            fn name(&self) -> &str {
                "fixed"
            }
            fn try_decode(&self, _image: &image::DynamicImage) -> Option<String> {
                Some("hidden, Steps: 3".to_string())
            }
        }

        let inspector = Inspector::with_stealth(&Config::default(), Arc::new(FixedPayload));
        let extracted = inspector
            .extract_bytes(png_with_text(&[]))
            .unwrap()
            .unwrap();
        assert_eq!(extracted.origin, TextOrigin::Stealth);
        assert_eq!(extracted.schema, Schema::StandardParameters);
    }
}
