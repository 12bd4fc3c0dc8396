//! Parsing of A1111-style parameter blocks into an ordered field mapping.
//!
//! The block format puts the prompt first, an optional negative prompt after
//! a literal marker, then a `key: value, key: value` settings tail starting
//! at `Steps: `. Field order is part of the format, so the mapping preserves
//! insertion order end to end, including through serialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Start of the settings tail; also the signal that text is a parameter
/// block at all.
pub const STEP_MARKER: &str = "Steps: ";
/// Separates prompt from negative prompt inside the prompt section.
const NEGATIVE_MARKER: &str = "Negative prompt: ";

/// Key under which the prompt section lands.
pub const PROMPT_KEY: &str = "Prompt";
/// Key under which the negative prompt lands.
pub const NEGATIVE_PROMPT_KEY: &str = "Negative Prompt";

/// Prompt values longer than this many characters are cut and marked.
const TRUNCATE_AT: usize = 1000;
const ELLIPSIS: &str = "...";

/// An ordered mapping of parameter names to values.
///
/// Serializes as a plain map whose key order matches insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    fields: IndexMap<String, String>,
}

impl ParameterSet {
    /// Parse a raw parameter block.
    ///
    /// Splits at the first `Steps: ` into a prompt section and a settings
    /// section (marker inclusive, so a later stray marker stays inside a
    /// settings value). The prompt section becomes `Prompt`, plus
    /// `Negative Prompt` when its marker is present; both are truncated
    /// independently past 1000 characters. The settings section splits on
    /// `", "`, each entry once on `": "`; entries without that separator
    /// are dropped silently. Duplicate keys keep their first position and
    /// take the last value.
    ///
    /// Values are never trimmed; the prompt keeps its trailing delimiter
    /// exactly as written.
    ///
    /// # Panics
    ///
    /// Panics if `raw` does not contain `Steps: `. Callers gate on
    /// `Schema::StandardParameters` before parsing; anything else is passed
    /// through as opaque text, not parsed.
    pub fn parse(raw: &str) -> ParameterSet {
        let marker = match raw.find(STEP_MARKER) {
            Some(index) => index,
            None => panic!("parameter text does not contain {STEP_MARKER:?}"),
        };
        let prompt_section = &raw[..marker];
        let settings_section = &raw[marker..];

        let mut fields = IndexMap::new();
        match prompt_section.split_once(NEGATIVE_MARKER) {
            Some((prompt, negative)) => {
                fields.insert(PROMPT_KEY.to_string(), truncate(prompt));
                fields.insert(NEGATIVE_PROMPT_KEY.to_string(), truncate(negative));
            }
            None => {
                fields.insert(PROMPT_KEY.to_string(), truncate(prompt_section));
            }
        }

        for entry in settings_section.split(", ") {
            if let Some((key, value)) = entry.split_once(": ") {
                fields.insert(key.to_string(), value.to_string());
            }
        }

        ParameterSet { fields }
    }

    /// Look up a field by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Character-based cut so multi-byte prompts never split inside a code
/// point.
fn truncate(value: &str) -> String {
    if value.chars().count() > TRUNCATE_AT {
        let mut cut: String = value.chars().take(TRUNCATE_AT).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        value.to_string()
    }
}
