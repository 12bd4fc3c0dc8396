//! Image container decoding that surfaces textual side-channel metadata.
//!
//! Generation tools embed their parameters as text alongside the pixel data:
//! PNG tEXt/zTXt/iTXt chunks for most tools, EXIF descriptive fields for
//! JPEG/WebP exports. This decoder reads those side channels without paying
//! for a full pixel decode; pixels are decoded lazily, only when the stealth
//! fallback asks for them.

use image::{DynamicImage, ImageFormat};
use indexmap::IndexMap;
use std::io::Cursor;

use crate::error::ExtractError;

use super::classify::{DESCRIPTION_FIELD, PARAMETERS_FIELD, SOFTWARE_FIELD};

/// Decodes image containers into their textual metadata fields.
pub struct ImageDecoder;

/// An opened image container: detected format, side-channel text fields, and
/// the raw bytes retained for on-demand pixel decoding.
pub struct DecodedImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    fields: IndexMap<String, String>,
}

impl ImageDecoder {
    /// Open raw bytes as an image container and collect its text fields.
    ///
    /// Size and format pre-filtering are the caller's responsibility; this
    /// only fails on bytes that are not a recognizable image container.
    /// The failure is per-item; batch callers report it and move on.
    pub fn decode(bytes: Vec<u8>) -> Result<DecodedImage, ExtractError> {
        let format = image::guess_format(&bytes).map_err(|e| ExtractError::Decode {
            message: format!("cannot detect image format: {e}"),
        })?;

        let fields = match format {
            ImageFormat::Png => Self::png_text_fields(&bytes)?,
            _ => Self::exif_fields(&bytes),
        };

        tracing::trace!(?format, fields = fields.len(), "decoded container");
        Ok(DecodedImage {
            bytes,
            format,
            fields,
        })
    }

    /// Read PNG tEXt/zTXt/iTXt chunks ahead of the pixel data.
    fn png_text_fields(bytes: &[u8]) -> Result<IndexMap<String, String>, ExtractError> {
        let decoder = png::Decoder::new(Cursor::new(bytes));
        let reader = decoder.read_info().map_err(|e| ExtractError::Decode {
            message: format!("invalid PNG: {e}"),
        })?;
        let info = reader.info();

        let mut fields = IndexMap::new();
        for chunk in &info.uncompressed_latin1_text {
            fields.insert(chunk.keyword.clone(), chunk.text.clone());
        }
        for chunk in &info.compressed_latin1_text {
            match chunk.get_text() {
                Ok(text) => {
                    fields.insert(chunk.keyword.clone(), text);
                }
                Err(e) => tracing::debug!("skipping unreadable zTXt {:?}: {e}", chunk.keyword),
            }
        }
        for chunk in &info.utf8_text {
            match chunk.get_text() {
                Ok(text) => {
                    fields.insert(chunk.keyword.clone(), text);
                }
                Err(e) => tracing::debug!("skipping unreadable iTXt {:?}: {e}", chunk.keyword),
            }
        }
        Ok(fields)
    }

    /// Map EXIF descriptive fields into the PNG keyword namespace.
    ///
    /// `UserComment` is where A1111-style tools put the parameter block in
    /// JPEG exports, so it lands under the same `parameters` name the
    /// classifier already checks. A missing or unreadable EXIF segment just
    /// means no fields.
    fn exif_fields(bytes: &[u8]) -> IndexMap<String, String> {
        let mut fields = IndexMap::new();
        let mut cursor = Cursor::new(bytes);
        let exif = match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => exif,
            Err(e) => {
                tracing::trace!("no EXIF metadata: {e}");
                return fields;
            }
        };

        if let Some(comment) = Self::user_comment(&exif) {
            fields.insert(PARAMETERS_FIELD.to_string(), comment);
        }
        if let Some(description) = Self::ascii_field(&exif, exif::Tag::ImageDescription) {
            fields.insert(DESCRIPTION_FIELD.to_string(), description);
        }
        if let Some(software) = Self::ascii_field(&exif, exif::Tag::Software) {
            fields.insert(SOFTWARE_FIELD.to_string(), software);
        }
        fields
    }

    /// Get an ASCII string field from EXIF data.
    fn ascii_field(exif: &exif::Exif, tag: exif::Tag) -> Option<String> {
        let field = exif.get_field(tag, exif::In::PRIMARY)?;
        match &field.value {
            exif::Value::Ascii(lines) => lines
                .first()
                .map(|line| String::from_utf8_lossy(line).trim_end_matches('\0').to_string()),
            _ => None,
        }
    }

    /// Get the UserComment field, honoring its 8-byte character-code header.
    fn user_comment(exif: &exif::Exif) -> Option<String> {
        let field = exif.get_field(exif::Tag::UserComment, exif::In::PRIMARY)?;
        match &field.value {
            exif::Value::Undefined(raw, _) => decode_user_comment(raw),
            exif::Value::Ascii(lines) => lines
                .first()
                .map(|line| String::from_utf8_lossy(line).into_owned()),
            _ => None,
        }
    }
}

/// Decode a raw UserComment payload.
///
/// The first 8 bytes declare the character set (`ASCII`, `UNICODE`, or all
/// zero for undefined); some writers skip the header entirely.
fn decode_user_comment(raw: &[u8]) -> Option<String> {
    const ASCII: &[u8] = b"ASCII\0\0\0";
    const UNICODE: &[u8] = b"UNICODE\0";
    const UNDEFINED: [u8; 8] = [0; 8];

    let text = if raw.starts_with(ASCII) {
        String::from_utf8_lossy(&raw[8..]).into_owned()
    } else if raw.starts_with(UNICODE) {
        decode_utf16_comment(&raw[8..])
    } else if raw.starts_with(&UNDEFINED) {
        String::from_utf8_lossy(&raw[8..]).into_owned()
    } else {
        String::from_utf8_lossy(raw).into_owned()
    };

    let text = text.trim_matches('\0');
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// UTF-16 with optional BOM; big-endian when unmarked, per the EXIF habit of
/// the tools that write this field.
fn decode_utf16_comment(data: &[u8]) -> String {
    let (data, big_endian) = match data {
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        _ => (data, true),
    };
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16_lossy(&units)
}

impl DecodedImage {
    /// Detected container format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// All textual metadata fields, in container order.
    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    /// Look up a single text field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Decode the pixel data.
    ///
    /// Deferred until the stealth fallback needs it; the side-channel path
    /// never touches pixels.
    pub fn decode_pixels(&self) -> Result<DynamicImage, ExtractError> {
        image::load_from_memory_with_format(&self.bytes, self.format).map_err(|e| {
            ExtractError::Decode {
                message: format!("pixel decode failed: {e}"),
            }
        })
    }
}
