//! Core data types for the Loupe extraction pipeline.
//!
//! These types carry raw generation text from the classifier to the
//! presentation boundary. They are built once per extraction, never mutated
//! afterwards, and dropped when the caller has rendered them.

use serde::{Deserialize, Serialize};

/// The schema a raw metadata payload was classified as.
///
/// This is a decision outcome, not a parse result: only
/// [`StandardParameters`](Schema::StandardParameters) text is parsed further
/// (into a [`ParameterSet`](crate::pipeline::ParameterSet)); every other
/// schema is passed through verbatim as opaque text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    /// The common prompt + `"Steps: ..."` settings text convention.
    StandardParameters,

    /// A serialized node-graph workflow (contains an `"inputs"` marker).
    ComfyWorkflow,

    /// Generation data split across two vendor descriptive fields,
    /// concatenated in a fixed order.
    NovelAiComposite,

    /// Non-empty text that matches no known schema; treated as opaque.
    Unknown,
}

/// Where a raw metadata payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOrigin {
    /// The container's `parameters` text field.
    PrimaryField,

    /// The container's `prompt` text field.
    SecondaryField,

    /// Concatenation of a vendor's two descriptive fields.
    VendorComposite,

    /// Recovered from pixel data by the stealth fallback decoder.
    Stealth,
}

/// Raw generation text extracted from one image, tagged with its classified
/// schema and origin.
///
/// Produced by the classifier, consumed exhaustively by the presentation
/// layer: `StandardParameters` is parsed into fields, everything else is
/// rendered as raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    /// The raw extracted text, verbatim.
    pub text: String,

    /// Classified schema.
    pub schema: Schema,

    /// Extraction channel the text came from.
    pub origin: TextOrigin,
}

impl ExtractedText {
    /// Whether this text should be parsed as a standard parameter block.
    pub fn is_standard(&self) -> bool {
        self.schema == Schema::StandardParameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_serde_snake_case() {
        let json = serde_json::to_string(&Schema::StandardParameters).unwrap();
        assert_eq!(json, "\"standard_parameters\"");
        let json = serde_json::to_string(&Schema::NovelAiComposite).unwrap();
        assert_eq!(json, "\"novel_ai_composite\"");
    }

    #[test]
    fn test_extracted_text_roundtrip() {
        let extracted = ExtractedText {
            text: "a cat, Steps: 20".to_string(),
            schema: Schema::StandardParameters,
            origin: TextOrigin::PrimaryField,
        };
        let json = serde_json::to_string(&extracted).unwrap();
        assert!(json.contains("\"schema\":\"standard_parameters\""));
        assert!(json.contains("\"origin\":\"primary_field\""));

        let parsed: ExtractedText = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.text, "a cat, Steps: 20");
        assert!(parsed.is_standard());
    }

    #[test]
    fn test_is_standard_only_for_standard_schema() {
        for (schema, expected) in [
            (Schema::StandardParameters, true),
            (Schema::ComfyWorkflow, false),
            (Schema::NovelAiComposite, false),
            (Schema::Unknown, false),
        ] {
            let extracted = ExtractedText {
                text: "x".to_string(),
                schema,
                origin: TextOrigin::Stealth,
            };
            assert_eq!(extracted.is_standard(), expected);
        }
    }
}
