//! Wire-format bounds and well-known constants.
//!
//! Every u8-prefixed field caps its count or byte length at 255; the
//! validator enforces these before encoding and the decoder relies on them.

/// Current (and only) binary format version.
pub const FORMAT_VERSION: u16 = 0;

/// Size of the version prefix at the start of every blob.
pub const VERSION_PREFIX_LEN: usize = 2;

/// Smallest decodable blob: version prefix plus the tag count byte.
pub const MIN_WARDROBE_LEN: usize = VERSION_PREFIX_LEN + 1;

/// Fixed-size head of an outfit record:
/// timestamps and use count (26) + colors (18) + half floats (12) + avatar type (1).
pub const OUTFIT_HEADER_LEN: usize = 57;

/// Size of an asset entry without metadata (the u64 id).
pub const ASSET_ID_LEN: usize = 8;

/// Size of an asset entry with metadata:
/// id (8) + order (1) + puffiness (2) + position, rotation and scale (3 × 12).
pub const ASSET_WITH_METADATA_LEN: usize = ASSET_ID_LEN + 1 + 2 + 12 + 12 + 12;

/// Maximum number of tags in the registry.
pub const MAX_TAGS: usize = 255;

/// Maximum UTF-8 byte length of a tag label.
pub const MAX_TAG_LEN: usize = 255;

/// Maximum UTF-8 byte length of an outfit name.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum number of tag references on one outfit.
pub const MAX_TAG_REFS: usize = 255;

/// Maximum number of assets in each of the two per-record runs.
pub const MAX_ASSETS_PER_RUN: usize = 255;

/// Maximum thumbnail size (u32 length prefix).
pub const MAX_THUMBNAIL_LEN: u64 = u32::MAX as u64;

/// Largest integer exactly representable as an IEEE-754 double (2^53 - 1).
///
/// Timestamps and asset ids are kept at or below this ceiling so the format
/// stays compatible with hosts whose numbers are doubles.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Largest finite half-precision value.
pub const MAX_F16: f32 = 65504.0;

/// MIME type for binary wardrobe blobs.
pub const MIME_BINARY: &str = "application/vanita";

/// MIME type for the JSON projection.
pub const MIME_JSON: &str = "application/json";

/// File extension for binary wardrobe blobs.
pub const BINARY_EXTENSION: &str = ".vanita";

/// File extension for the JSON projection.
pub const JSON_EXTENSION: &str = ".json";

/// Storage key holding the persisted wardrobe.
pub const WARDROBE_STORE_KEY: &str = "wardrobe";
