//! Vanita wardrobe: compact binary persistence for saved avatar outfits.
//!
//! This crate provides encoding, decoding, and validation for the wardrobe
//! blob: a tag registry plus a list of outfit presets, each with timestamps,
//! body colors, body scales, worn assets and a thumbnail.
//!
//! # Quick Start
//!
//! ```rust
//! use vanita_wardrobe::{decode_wardrobe, encode_wardrobe, OutfitBuilder, Rgb24};
//!
//! let tags = vec!["Casual".to_string(), "Formal".to_string()];
//! let outfit = OutfitBuilder::new("Weekend")
//!     .created(1727368869884)
//!     .tag(0)
//!     .uniform_color(Rgb24::new(234, 184, 146))
//!     .asset(112752184)
//!     .build();
//!
//! // Encode to binary
//! let bytes = encode_wardrobe(&tags, &[outfit]).unwrap();
//!
//! // Decode back
//! let wardrobe = decode_wardrobe(&bytes).unwrap();
//! assert_eq!(wardrobe.tags, tags);
//! assert_eq!(wardrobe.outfits[0].name, "Weekend");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Outfit, Asset, Wardrobe)
//! - [`codec`]: Byte buffer, half floats, and the versioned binary format
//! - [`validate`]: Field constraints checked before every encode
//! - [`transfer`]: Binary/JSON export, file import, registry merge
//! - [`store`]: Key-value blob storage boundary
//! - [`error`]: Error types
//! - [`limits`]: Wire bounds and format constants
//!
//! # Wire Format
//!
//! A little-endian u16 version prefix, a length-prefixed tag table, then
//! self-delimiting outfit records back to back. Body scales are stored as
//! half-precision floats, so values round-trip to about three decimals.
//! Decoding rejects truncated, trailing, or unknown-version data.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod store;
pub mod transfer;
pub mod validate;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, decode_wardrobe, decode_wardrobe_with_options, encode_wardrobe, peek_version,
};
pub use error::{
    BufferError, DecodeError, DecodeFailureKind, EncodeError, ImportError, StoreError,
    ValidationError,
};
pub use model::{
    Asset, AssetId, AssetWithMetadata, AvatarType, Outfit, OutfitBuilder, Rgb24, Vec3, Wardrobe,
};
pub use store::{BlobStore, MemoryStore, load_wardrobe, save_wardrobe};
pub use transfer::{
    ExportFormat, Exported, encode_untyped, export_wardrobe, import_wardrobe, merge_into,
};
pub use validate::{is_valid, validate_batch, validate_outfit, validate_wardrobe};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
