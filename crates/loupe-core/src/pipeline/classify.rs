//! Schema classification over a decoded image's text fields.
//!
//! Tools disagree on where generation metadata lives. The classifier walks a
//! fixed decision order over the known conventions and produces the raw text
//! plus a schema tag; it never parses, that stays downstream.

use crate::types::{ExtractedText, Schema, TextOrigin};

use super::decode::DecodedImage;
use super::params::STEP_MARKER;
use super::stealth::StealthDecoder;

/// Field holding an A1111-style parameter block.
pub const PARAMETERS_FIELD: &str = "parameters";
/// Field holding a serialized ComfyUI workflow graph.
pub const PROMPT_FIELD: &str = "prompt";
/// Field declaring the software that wrote the image.
pub const SOFTWARE_FIELD: &str = "Software";
/// Software value identifying the NovelAI composite layout.
pub const NOVELAI_SOFTWARE: &str = "NovelAI";
/// NovelAI's prose field.
pub const DESCRIPTION_FIELD: &str = "Description";
/// NovelAI's settings field (serialized JSON).
pub const COMMENT_FIELD: &str = "Comment";

/// Marker confirming a serialized node graph: every exported workflow
/// carries at least one quoted `inputs` key.
const WORKFLOW_MARKER: &str = "\"inputs\"";

/// Decides which metadata convention an image follows and extracts its text.
pub struct SchemaClassifier;

impl SchemaClassifier {
    /// Classify a decoded image, first match wins:
    ///
    /// 1. `parameters` field → `StandardParameters` if the step marker is
    ///    present, else `Unknown`.
    /// 2. `prompt` field → `ComfyWorkflow` if the node-graph marker is
    ///    present, else `Unknown`.
    /// 3. `Software` equal to `NovelAI` → `Description` then `Comment`
    ///    concatenated, `NovelAiComposite`. Either field missing means the
    ///    image yields nothing.
    /// 4. Otherwise the stealth decoder runs over the pixels; its text is
    ///    `StandardParameters` or `Unknown` by the same step-marker check.
    ///
    /// A matching rule decides the item: a present-but-empty field yields
    /// `None` rather than falling through to a later rule. `None` always
    /// means "no metadata", never an error.
    pub fn classify(image: &DecodedImage, stealth: &dyn StealthDecoder) -> Option<ExtractedText> {
        if let Some(text) = image.field(PARAMETERS_FIELD) {
            return Self::step_tagged(text.to_string(), TextOrigin::PrimaryField);
        }

        if let Some(text) = image.field(PROMPT_FIELD) {
            let schema = if text.contains(WORKFLOW_MARKER) {
                Schema::ComfyWorkflow
            } else {
                Schema::Unknown
            };
            return Self::non_empty(ExtractedText {
                text: text.to_string(),
                schema,
                origin: TextOrigin::SecondaryField,
            });
        }

        if image.field(SOFTWARE_FIELD) == Some(NOVELAI_SOFTWARE) {
            let (Some(description), Some(comment)) =
                (image.field(DESCRIPTION_FIELD), image.field(COMMENT_FIELD))
            else {
                tracing::debug!("NovelAI software tag without both descriptive fields");
                return None;
            };
            return Self::non_empty(ExtractedText {
                text: format!("{description}{comment}"),
                schema: Schema::NovelAiComposite,
                origin: TextOrigin::VendorComposite,
            });
        }

        let pixels = match image.decode_pixels() {
            Ok(pixels) => pixels,
            Err(e) => {
                tracing::debug!("pixel decode for stealth fallback failed: {e}");
                return None;
            }
        };
        let text = stealth.try_decode(&pixels)?;
        tracing::debug!(decoder = stealth.name(), "stealth payload recovered");
        Self::step_tagged(text, TextOrigin::Stealth)
    }

    fn step_tagged(text: String, origin: TextOrigin) -> Option<ExtractedText> {
        let schema = if text.contains(STEP_MARKER) {
            Schema::StandardParameters
        } else {
            Schema::Unknown
        };
        Self::non_empty(ExtractedText {
            text,
            schema,
            origin,
        })
    }

    fn non_empty(extracted: ExtractedText) -> Option<ExtractedText> {
        if extracted.text.is_empty() {
            None
        } else {
            Some(extracted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::decode::ImageDecoder;
    use super::super::stealth::NoStealth;
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// A stealth decoder that records invocations and returns a canned
    /// payload.
    struct RecordingStealth {
        calls: AtomicU32,
        payload: Option<String>,
    }

    impl RecordingStealth {
        fn new(payload: Option<&str>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                payload: payload.map(String::from),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StealthDecoder for RecordingStealth {
        fn name(&self) -> &str {
            "recording"
        }

        fn try_decode(&self, _image: &image::DynamicImage) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payload.clone()
        }
    }

    /// Build a DecodedImage from a tiny PNG carrying the given tEXt fields.
    fn image_with(fields: &[(&str, &str)]) -> DecodedImage {
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
        ImageDecoder::decode(buf).unwrap()
    }

    #[test]
    fn test_parameters_field_with_step_marker() {
        let image = image_with(&[("parameters", "a cat, Steps: 20, Sampler: Euler")]);
        let stealth = RecordingStealth::new(Some("never used"));

        let extracted = SchemaClassifier::classify(&image, &stealth).unwrap();
        assert_eq!(extracted.schema, Schema::StandardParameters);
        assert_eq!(extracted.origin, TextOrigin::PrimaryField);
        assert_eq!(extracted.text, "a cat, Steps: 20, Sampler: Euler");
        assert_eq!(stealth.calls(), 0);
    }

    #[test]
    fn test_parameters_field_without_step_marker_is_unknown() {
        let image = image_with(&[("parameters", "freeform note")]);
        let extracted = SchemaClassifier::classify(&image, &NoStealth).unwrap();
        assert_eq!(extracted.schema, Schema::Unknown);
        assert_eq!(extracted.origin, TextOrigin::PrimaryField);
    }

    #[test]
    fn test_empty_parameters_field_yields_nothing() {
        let image = image_with(&[("parameters", ""), ("prompt", "{\"inputs\": {}}")]);
        let stealth = RecordingStealth::new(Some("hidden"));

        // The empty field decides the item; later rules never run.
        assert!(SchemaClassifier::classify(&image, &stealth).is_none());
        assert_eq!(stealth.calls(), 0);
    }

    #[test]
    fn test_prompt_field_with_graph_marker() {
        let image = image_with(&[("prompt", "{\"3\": {\"inputs\": {\"seed\": 5}}}")]);
        let extracted = SchemaClassifier::classify(&image, &NoStealth).unwrap();
        assert_eq!(extracted.schema, Schema::ComfyWorkflow);
        assert_eq!(extracted.origin, TextOrigin::SecondaryField);
    }

    #[test]
    fn test_prompt_field_without_graph_marker_is_unknown() {
        let image = image_with(&[("prompt", "just some text")]);
        let extracted = SchemaClassifier::classify(&image, &NoStealth).unwrap();
        assert_eq!(extracted.schema, Schema::Unknown);
        assert_eq!(extracted.origin, TextOrigin::SecondaryField);
    }

    #[test]
    fn test_parameters_takes_precedence_over_prompt() {
        let image = image_with(&[
            ("prompt", "{\"inputs\": {}}"),
            ("parameters", "a dog, Steps: 8"),
        ]);
        let extracted = SchemaClassifier::classify(&image, &NoStealth).unwrap();
        assert_eq!(extracted.origin, TextOrigin::PrimaryField);
        assert_eq!(extracted.schema, Schema::StandardParameters);
    }

    #[test]
    fn test_novelai_composite_concatenates_in_order() {
        let image = image_with(&[
            ("Software", "NovelAI"),
            ("Description", "a cat"),
            ("Comment", "{\"steps\": 28}"),
        ]);
        let extracted = SchemaClassifier::classify(&image, &NoStealth).unwrap();
        assert_eq!(extracted.schema, Schema::NovelAiComposite);
        assert_eq!(extracted.origin, TextOrigin::VendorComposite);
        assert_eq!(extracted.text, "a cat{\"steps\": 28}");
    }

    #[test]
    fn test_novelai_with_missing_field_yields_nothing() {
        let image = image_with(&[("Software", "NovelAI"), ("Description", "a cat")]);
        assert!(SchemaClassifier::classify(&image, &NoStealth).is_none());
    }

    #[test]
    fn test_unrecognized_software_falls_through_to_stealth() {
        let image = image_with(&[("Software", "GIMP")]);
        let stealth = RecordingStealth::new(None);

        assert!(SchemaClassifier::classify(&image, &stealth).is_none());
        assert_eq!(stealth.calls(), 1);
    }

    #[test]
    fn test_stealth_payload_with_step_marker() {
        let image = image_with(&[]);
        let stealth = RecordingStealth::new(Some("hidden, Steps: 12, Seed: 7"));

        let extracted = SchemaClassifier::classify(&image, &stealth).unwrap();
        assert_eq!(extracted.schema, Schema::StandardParameters);
        assert_eq!(extracted.origin, TextOrigin::Stealth);
        assert_eq!(stealth.calls(), 1);
    }

    #[test]
    fn test_stealth_payload_without_marker_is_unknown() {
        let image = image_with(&[]);
        let stealth = RecordingStealth::new(Some("{\"opaque\": true}"));

        let extracted = SchemaClassifier::classify(&image, &stealth).unwrap();
        assert_eq!(extracted.schema, Schema::Unknown);
        assert_eq!(extracted.origin, TextOrigin::Stealth);
    }

    #[test]
    fn test_bare_image_yields_nothing() {
        let image = image_with(&[]);
        let stealth = RecordingStealth::new(None);

        assert!(SchemaClassifier::classify(&image, &stealth).is_none());
        assert_eq!(stealth.calls(), 1);
    }
}
