//! Data model types for wardrobes.
//!
//! This module contains the in-memory shape of persisted data:
//! - Outfits (one avatar preset each)
//! - Assets (worn items, with or without placement metadata)
//! - Wardrobes (version + tag registry + outfits)
//! - Builders (ergonomic construction)

pub mod asset;
pub mod builder;
pub mod outfit;
pub mod wardrobe;

pub use asset::{Asset, AssetId, AssetWithMetadata};
pub use builder::OutfitBuilder;
pub use outfit::{AvatarType, Outfit, Rgb24, Vec3};
pub use wardrobe::Wardrobe;

/// Serde adapter carrying raw bytes as standard base64 text.
pub(crate) mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::codec::{ByteBuffer, Endian};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ByteBuffer::wrap(bytes, Endian::Little).to_base64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        BASE64.decode(text.as_bytes()).map_err(serde::de::Error::custom)
    }
}
