//! Import and export of whole wardrobes.
//!
//! Two export projections exist: the binary blob produced by the codec and
//! a JSON document for people and other tools. Only the binary form can be
//! imported back; JSON import is refused explicitly.

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::codec::{decode_wardrobe, encode_wardrobe};
use crate::error::{EncodeError, ImportError};
use crate::limits::{BINARY_EXTENSION, JSON_EXTENSION, MAX_TAGS, MIME_BINARY, MIME_JSON};
use crate::model::{Outfit, Wardrobe};
use crate::validate::{parse_untyped, validate_wardrobe};

/// Output projection for [`export_wardrobe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// JSON text with base64 thumbnails.
    Json,
    /// The versioned binary blob.
    #[default]
    Binary,
}

impl ExportFormat {
    /// Returns the MIME type carried alongside exported bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => MIME_JSON,
            ExportFormat::Binary => MIME_BINARY,
        }
    }

    /// Returns the file extension (with the leading dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => JSON_EXTENSION,
            ExportFormat::Binary => BINARY_EXTENSION,
        }
    }

    /// Detects the format from a MIME type.
    pub fn from_mime(mime: &str) -> Option<ExportFormat> {
        match mime {
            MIME_JSON => Some(ExportFormat::Json),
            MIME_BINARY => Some(ExportFormat::Binary),
            _ => None,
        }
    }

    /// Detects the format from a file name's extension.
    pub fn from_file_name(file_name: &str) -> Option<ExportFormat> {
        if file_name.ends_with(BINARY_EXTENSION) {
            Some(ExportFormat::Binary)
        } else if file_name.ends_with(JSON_EXTENSION) {
            Some(ExportFormat::Json)
        } else {
            None
        }
    }
}

/// Exported bytes tagged with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

// =============================================================================
// EXPORT
// =============================================================================

/// Exports a wardrobe in the requested format.
///
/// Both projections validate first, so an export never contains data the
/// binary codec would refuse.
pub fn export_wardrobe(format: ExportFormat, wardrobe: &Wardrobe) -> Result<Exported, EncodeError> {
    let bytes = match format {
        ExportFormat::Binary => encode_wardrobe(&wardrobe.tags, &wardrobe.outfits)?,
        ExportFormat::Json => to_json(wardrobe)?.into_bytes(),
    };
    debug!(format = ?format, bytes = bytes.len(), "exported wardrobe");
    Ok(Exported {
        mime_type: format.mime_type(),
        bytes,
    })
}

/// Renders the JSON projection: `{version, tags, outfits}` with base64
/// thumbnails.
pub fn to_json(wardrobe: &Wardrobe) -> Result<String, EncodeError> {
    validate_wardrobe(wardrobe)?;
    serde_json::to_string(wardrobe).map_err(|e| EncodeError::Json(e.to_string()))
}

/// Encodes untyped tags and outfits after strict deserialization.
///
/// Anything that is not an array of strings and an array of well-formed
/// outfits is refused before the codec sees it.
pub fn encode_untyped(tags: &Value, outfits: &Value) -> Result<Vec<u8>, EncodeError> {
    let (tags, outfits) = parse_untyped(tags, outfits).inspect_err(|e| {
        warn!(error = %e, "refusing to encode untyped input");
    })?;
    encode_wardrobe(&tags, &outfits)
}

// =============================================================================
// IMPORT
// =============================================================================

/// JSON import. Always refused: the JSON projection is export-only.
pub fn from_json(_text: &str) -> Result<Wardrobe, ImportError> {
    warn!("JSON wardrobe import is not supported");
    Err(ImportError::JsonUnsupported)
}

/// Imports a wardrobe file, choosing the decoder by file extension.
pub fn import_wardrobe(file_name: &str, bytes: &[u8]) -> Result<Wardrobe, ImportError> {
    match ExportFormat::from_file_name(file_name) {
        Some(ExportFormat::Binary) => {
            let wardrobe = decode_wardrobe(bytes)?;
            info!(
                file_name,
                tags = wardrobe.tags.len(),
                outfits = wardrobe.outfits.len(),
                "imported wardrobe"
            );
            Ok(wardrobe)
        }
        Some(ExportFormat::Json) => from_json(&String::from_utf8_lossy(bytes)),
        None => Err(ImportError::UnsupportedFormat {
            file_name: file_name.to_string(),
        }),
    }
}

/// Merges an imported wardrobe into an existing registry and outfit list.
///
/// Imported tag labels already in `registry` reuse their index; new labels
/// are appended. Imported tag references are rewritten to the merged
/// indices and the imported outfits are placed ahead of the existing ones,
/// in their original order. On error nothing is modified.
pub fn merge_into(
    registry: &mut Vec<String>,
    outfits: &mut Vec<Outfit>,
    imported: Wardrobe,
) -> Result<(), ImportError> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, label) in registry.iter().enumerate() {
        index.entry(label.as_str()).or_insert(i);
    }

    let mut appended: Vec<&str> = Vec::new();
    let mut remap: Vec<u8> = Vec::with_capacity(imported.tags.len());
    for label in &imported.tags {
        let merged = match index.get(label.as_str()) {
            Some(&i) => i,
            None => {
                let i = registry.len() + appended.len();
                if i >= MAX_TAGS {
                    return Err(ImportError::TagRegistryFull { max: MAX_TAGS });
                }
                index.insert(label.as_str(), i);
                appended.push(label.as_str());
                i
            }
        };
        // i < MAX_TAGS, so the cast cannot truncate
        remap.push(merged as u8);
    }

    let mut rewritten = Vec::with_capacity(imported.outfits.len());
    for (position, mut outfit) in imported.outfits.into_iter().enumerate() {
        for tag in &mut outfit.tags {
            *tag = *remap.get(*tag as usize).ok_or(ImportError::DanglingTagRef {
                outfit: position,
                tag: *tag,
                available: remap.len(),
            })?;
        }
        rewritten.push(outfit);
    }

    let added = appended.len();
    let new_labels: Vec<String> = appended.into_iter().map(str::to_owned).collect();
    registry.extend(new_labels);

    let imported_count = rewritten.len();
    rewritten.append(outfits);
    *outfits = rewritten;

    info!(tags_added = added, outfits_added = imported_count, "merged imported wardrobe");
    Ok(())
}
