//! Presentation rules for extracted metadata.
//!
//! The pipeline hands back raw text and parsed fields; boundaries (CLI,
//! bots) still have to decide how to show them. The rules live here so
//! every boundary renders the same way: when text goes inline vs. as a
//! file, which fields get block layout, and how a batch's texts combine.

use std::collections::BTreeMap;

use crate::types::{ExtractedText, Schema};

/// Longest text that is still presented inline.
pub const INLINE_TEXT_LIMIT: usize = 1980;
/// Filename used when text is shipped as a file instead.
pub const ATTACHMENT_FILENAME: &str = "parameters.yaml";

/// How a piece of extracted text should reach the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Short enough to print in place, already fenced for display.
    Inline(String),
    /// Too long to inline; ship as a file.
    Attachment {
        filename: &'static str,
        contents: String,
    },
}

impl Presentation {
    /// Choose a presentation for raw text.
    ///
    /// Strictly more than [`INLINE_TEXT_LIMIT`] characters selects the
    /// attachment form, with the text untouched; anything shorter is
    /// wrapped in a yaml code fence.
    pub fn for_text(text: &str) -> Presentation {
        if text.chars().count() > INLINE_TEXT_LIMIT {
            Presentation::Attachment {
                filename: ATTACHMENT_FILENAME,
                contents: text.to_string(),
            }
        } else {
            Presentation::Inline(format!("```yaml\n{text}```"))
        }
    }
}

/// Layout of a single parsed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLayout {
    /// Full-width: prompt text runs long.
    Block,
    /// Compact label/value pair.
    Inline,
}

/// Prompt-carrying fields render block, everything else inline.
pub fn field_layout(name: &str) -> FieldLayout {
    if name.contains("Prompt") {
        FieldLayout::Block
    } else {
        FieldLayout::Inline
    }
}

/// Join a batch's texts with blank lines, in ascending index order.
pub fn combine_texts(results: &BTreeMap<usize, ExtractedText>) -> String {
    let texts: Vec<&str> = results
        .values()
        .map(|extracted| extracted.text.as_str())
        .collect();
    texts.join("\n\n")
}

/// Display label for a schema.
pub fn schema_title(schema: Schema) -> &'static str {
    match schema {
        Schema::StandardParameters => "Parameters",
        Schema::ComfyWorkflow => "ComfyUI",
        Schema::NovelAiComposite => "NovelAI",
        Schema::Unknown => "Unknown",
    }
}
