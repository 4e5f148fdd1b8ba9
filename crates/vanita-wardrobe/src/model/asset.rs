//! Worn asset references.
//!
//! The variant is never written to the wire. Records store two runs, one per
//! variant, and the variant is recovered from the run an entry sits in.

use serde::{Deserialize, Serialize};

use crate::model::Vec3;

/// Asset identifier. Kept at or below [`MAX_SAFE_INTEGER`](crate::limits::MAX_SAFE_INTEGER).
pub type AssetId = u64;

/// An asset with layering and placement metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetWithMetadata {
    pub id: AssetId,
    /// Layering order.
    pub order: u8,
    /// Stored as f16.
    pub puffiness: f32,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl AssetWithMetadata {
    /// Creates metadata for `id` with a neutral placement.
    pub fn new(id: AssetId) -> Self {
        Self {
            id,
            order: 0,
            puffiness: 1.0,
            position: Vec3::default(),
            rotation: Vec3::default(),
            scale: Vec3::ONE,
        }
    }
}

/// One worn item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAsset", into = "RawAsset")]
pub enum Asset {
    WithoutMetadata { id: AssetId },
    WithMetadata(AssetWithMetadata),
}

impl Asset {
    /// Returns the asset identifier.
    pub fn id(&self) -> AssetId {
        match self {
            Asset::WithoutMetadata { id } => *id,
            Asset::WithMetadata(meta) => meta.id,
        }
    }

    /// Returns true if the asset carries placement metadata.
    pub fn has_metadata(&self) -> bool {
        matches!(self, Asset::WithMetadata(_))
    }
}

impl From<AssetWithMetadata> for Asset {
    fn from(meta: AssetWithMetadata) -> Self {
        Asset::WithMetadata(meta)
    }
}

/// Flat JSON shape of an asset, discriminated by `hasMetadata`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawAsset {
    has_metadata: bool,
    id: AssetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    puffiness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotation: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<Vec3>,
}

impl TryFrom<RawAsset> for Asset {
    type Error = String;

    fn try_from(raw: RawAsset) -> Result<Self, Self::Error> {
        if !raw.has_metadata {
            let has_extra = raw.order.is_some()
                || raw.puffiness.is_some()
                || raw.position.is_some()
                || raw.rotation.is_some()
                || raw.scale.is_some();
            if has_extra {
                return Err(format!("asset {} has metadata fields but hasMetadata is false", raw.id));
            }
            return Ok(Asset::WithoutMetadata { id: raw.id });
        }

        let missing = |field: &str| format!("asset {} is missing {field}", raw.id);
        Ok(Asset::WithMetadata(AssetWithMetadata {
            id: raw.id,
            order: raw.order.ok_or_else(|| missing("order"))?,
            puffiness: raw.puffiness.ok_or_else(|| missing("puffiness"))?,
            position: raw.position.ok_or_else(|| missing("position"))?,
            rotation: raw.rotation.ok_or_else(|| missing("rotation"))?,
            scale: raw.scale.ok_or_else(|| missing("scale"))?,
        }))
    }
}

impl From<Asset> for RawAsset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::WithoutMetadata { id } => RawAsset {
                has_metadata: false,
                id,
                order: None,
                puffiness: None,
                position: None,
                rotation: None,
                scale: None,
            },
            Asset::WithMetadata(meta) => RawAsset {
                has_metadata: true,
                id: meta.id,
                order: Some(meta.order),
                puffiness: Some(meta.puffiness),
                position: Some(meta.position),
                rotation: Some(meta.rotation),
                scale: Some(meta.scale),
            },
        }
    }
}
