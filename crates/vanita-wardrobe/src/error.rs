//! Error types for wardrobe encoding/decoding, validation, import and storage.

use thiserror::Error;

/// Error raised by [`ByteBuffer`](crate::codec::ByteBuffer) accessors.
///
/// The buffer never clamps or grows; any access outside the region is
/// reported here and propagated by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("range {offset}..+{width} is outside a buffer of {capacity} bytes")]
    OutOfRange {
        offset: usize,
        width: usize,
        capacity: usize,
    },

    #[error("invalid UTF-8 in {len} bytes at offset {offset}")]
    InvalidUtf8 { offset: usize, len: usize },
}

/// Failure classes surfaced to callers of the versioned decoder.
///
/// Callers message these differently: a newer file vs. a corrupted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeFailureKind {
    /// Data is truncated, corrupted, or not a wardrobe at all.
    DecoderFail,
    /// The version prefix names a format no decoder understands.
    UnsupportedVersion,
}

impl DecodeFailureKind {
    /// Returns the stable name used by collaborators ("DecoderFail", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodeFailureKind::DecoderFail => "DecoderFail",
            DecodeFailureKind::UnsupportedVersion => "UnsupportedVersion",
        }
    }
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("input of {len} bytes is too short for a wardrobe header")]
    TooShort { len: usize },

    #[error("unsupported wardrobe version: {version}")]
    UnsupportedVersion { version: u16 },

    #[error("malformed wardrobe data: {0}")]
    Buffer(#[from] BufferError),

    #[error("invalid avatar type: {value}")]
    InvalidAvatarType { value: u8 },

    #[error("{remaining} trailing bytes at offset {offset} do not form an outfit record")]
    TrailingBytes { offset: usize, remaining: usize },

    #[error("decoded wardrobe failed validation: {0}")]
    Validation(#[from] ValidationError),
}

impl DecodeError {
    /// Returns the failure class for this error.
    pub fn kind(&self) -> DecodeFailureKind {
        match self {
            DecodeError::UnsupportedVersion { .. } => DecodeFailureKind::UnsupportedVersion,
            _ => DecodeFailureKind::DecoderFail,
        }
    }
}

/// Error during binary (or JSON) encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("refusing to encode: {0}")]
    Validation(#[from] ValidationError),

    /// A write fell outside the pre-sized buffer. This is a bug in the
    /// length calculation, never a property of the input.
    #[error("record layout mismatch: {0}")]
    Layout(#[from] BufferError),

    #[error("wrote {written} bytes into a buffer sized for {expected}")]
    LengthMismatch { expected: usize, written: usize },

    #[error("JSON serialization failed: {0}")]
    Json(String),
}

/// Error during schema validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} value {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} is NaN")]
    NotANumber { field: &'static str },

    #[error("{field} value {value} exceeds the safe integer ceiling {max}")]
    UnsafeInteger {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("tag {index}: {source}")]
    Tag {
        index: usize,
        source: Box<ValidationError>,
    },

    #[error("outfit {index}: {source}")]
    Outfit {
        index: usize,
        source: Box<ValidationError>,
    },

    #[error("asset {index}: {source}")]
    Asset {
        index: usize,
        source: Box<ValidationError>,
    },

    #[error("unsupported wardrobe version: {version}")]
    UnsupportedVersion { version: u16 },

    /// Untyped input did not have the shape of a tag list or outfit list.
    #[error("malformed {what}: {message}")]
    Malformed { what: &'static str, message: String },
}

/// Error while importing a wardrobe file into an existing registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("unsupported file format: {file_name:?}")]
    UnsupportedFormat { file_name: String },

    #[error("JSON wardrobe import is not supported")]
    JsonUnsupported,

    #[error("binary deserialization failed: {0}")]
    Binary(#[from] DecodeError),

    #[error("tag registry is full ({max} tags)")]
    TagRegistryFull { max: usize },

    #[error("outfit {outfit} references tag {tag} but only {available} tags were imported")]
    DanglingTagRef {
        outfit: usize,
        tag: u8,
        available: usize,
    },
}

/// Error from a blob store or from the codec around it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("blob {key:?} failed its integrity check")]
    Corrupted { key: String },

    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
