//! Builder API for ergonomic Outfit construction.
//!
//! # Example
//!
//! ```rust
//! use vanita_wardrobe::model::{AvatarType, OutfitBuilder, Rgb24};
//!
//! let outfit = OutfitBuilder::new("Beach day")
//!     .created(1727368869884)
//!     .tag(0)
//!     .uniform_color(Rgb24::new(255, 204, 153))
//!     .scales(1.05, 0.95, 1.0, 1.0, 0.5)
//!     .avatar_type(AvatarType::R15)
//!     .asset(112752184)
//!     .build();
//!
//! assert_eq!(outfit.assets.len(), 1);
//! ```

use crate::model::{Asset, AssetId, AssetWithMetadata, AvatarType, Outfit, Rgb24};

/// Builder for constructing an [`Outfit`].
#[derive(Debug, Clone)]
pub struct OutfitBuilder {
    outfit: Outfit,
}

impl OutfitBuilder {
    /// Creates a builder with default scales and no assets.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            outfit: Outfit::new(name),
        }
    }

    /// Sets the creation timestamp (milliseconds since Unix epoch).
    pub fn created(mut self, timestamp: u64) -> Self {
        self.outfit.created = timestamp;
        self
    }

    /// Sets the modification timestamp.
    pub fn modified(mut self, timestamp: u64) -> Self {
        self.outfit.modified = timestamp;
        self
    }

    /// Sets the last-used timestamp.
    pub fn last_used(mut self, timestamp: u64) -> Self {
        self.outfit.last_used = timestamp;
        self
    }

    /// Sets the use counter.
    pub fn use_count(mut self, count: u16) -> Self {
        self.outfit.use_count = count;
        self
    }

    /// Adds a tag reference (an index into the tag registry).
    pub fn tag(mut self, index: u8) -> Self {
        self.outfit.tags.push(index);
        self
    }

    /// Sets all six body-part colors to `color`.
    pub fn uniform_color(self, color: Rgb24) -> Self {
        self.colors([color; 6])
    }

    /// Sets body-part colors in wire order: head, torso, left arm, right arm, left leg, right leg.
    pub fn colors(mut self, colors: [Rgb24; 6]) -> Self {
        let [head, torso, left_arm, right_arm, left_leg, right_leg] = colors;
        self.outfit.head_color = head;
        self.outfit.torso_color = torso;
        self.outfit.left_arm_color = left_arm;
        self.outfit.right_arm_color = right_arm;
        self.outfit.left_leg_color = left_leg;
        self.outfit.right_leg_color = right_leg;
        self
    }

    /// Sets height, width, head, depth and proportion scales.
    pub fn scales(mut self, height: f32, width: f32, head: f32, depth: f32, proportion: f32) -> Self {
        self.outfit.height = height;
        self.outfit.width = width;
        self.outfit.head = head;
        self.outfit.depth = depth;
        self.outfit.proportion = proportion;
        self
    }

    /// Sets the normalized body type.
    pub fn body_type(mut self, body_type: f32) -> Self {
        self.outfit.body_type = body_type;
        self
    }

    /// Sets the rig type.
    pub fn avatar_type(mut self, avatar_type: AvatarType) -> Self {
        self.outfit.avatar_type = avatar_type;
        self
    }

    /// Adds an asset without metadata.
    pub fn asset(mut self, id: AssetId) -> Self {
        self.outfit.assets.push(Asset::WithoutMetadata { id });
        self
    }

    /// Adds an asset with placement metadata.
    pub fn asset_with_metadata(mut self, meta: AssetWithMetadata) -> Self {
        self.outfit.assets.push(Asset::WithMetadata(meta));
        self
    }

    /// Sets the thumbnail image bytes.
    pub fn thumbnail(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.outfit.thumbnail = bytes.into();
        self
    }

    /// Builds the outfit.
    pub fn build(self) -> Outfit {
        self.outfit
    }
}
