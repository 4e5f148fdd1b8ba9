//! Outfit records: one saved avatar appearance preset.

use serde::{Deserialize, Serialize};

use crate::model::Asset;

/// A color as three 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rgb24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb24 {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A 3-axis vector of f32 components (12 bytes on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Creates a vector from its components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The unit scale vector.
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
}

/// Avatar rig type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum AvatarType {
    R6 = 0,
    #[default]
    R15 = 1,
}

impl AvatarType {
    /// Creates an AvatarType from its wire representation.
    pub fn from_u8(v: u8) -> Option<AvatarType> {
        match v {
            0 => Some(AvatarType::R6),
            1 => Some(AvatarType::R15),
            _ => None,
        }
    }
}

impl TryFrom<u8> for AvatarType {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        AvatarType::from_u8(v).ok_or_else(|| format!("unknown avatar type {v}"))
    }
}

impl From<AvatarType> for u8 {
    fn from(t: AvatarType) -> u8 {
        t as u8
    }
}

/// One saved avatar preset.
///
/// Timestamps are milliseconds since the Unix epoch, 0 meaning "never".
/// `tags` holds positions in the wardrobe's tag registry. Asset order is
/// not preserved by the binary format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Outfit {
    pub name: String,

    pub created: u64,
    pub modified: u64,
    pub last_used: u64,
    pub use_count: u16,
    pub tags: Vec<u8>,

    pub head_color: Rgb24,
    pub torso_color: Rgb24,
    pub left_arm_color: Rgb24,
    pub right_arm_color: Rgb24,
    pub left_leg_color: Rgb24,
    pub right_leg_color: Rgb24,

    /// Stored as f16, range [0, 2].
    pub height: f32,
    /// Stored as f16, range [0, 2].
    pub width: f32,
    /// Stored as f16, range [0, 2].
    pub head: f32,
    /// Stored as f16, range [0, 2].
    pub depth: f32,
    /// Stored as f16, range [0, 2].
    pub proportion: f32,
    /// Stored as f16, range [0, 1].
    pub body_type: f32,
    pub avatar_type: AvatarType,

    pub assets: Vec<Asset>,

    /// Opaque image bytes; base64 text in JSON.
    #[serde(with = "crate::model::base64_bytes")]
    pub thumbnail: Vec<u8>,
}

impl Outfit {
    /// Creates an outfit with default body scales and no assets.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: 0,
            modified: 0,
            last_used: 0,
            use_count: 0,
            tags: Vec::new(),
            head_color: Rgb24::default(),
            torso_color: Rgb24::default(),
            left_arm_color: Rgb24::default(),
            right_arm_color: Rgb24::default(),
            left_leg_color: Rgb24::default(),
            right_leg_color: Rgb24::default(),
            height: 1.0,
            width: 1.0,
            head: 1.0,
            depth: 1.0,
            proportion: 0.0,
            body_type: 0.0,
            avatar_type: AvatarType::R15,
            assets: Vec::new(),
            thumbnail: Vec::new(),
        }
    }

    /// Body-part colors in wire order: head, torso, left arm, right arm, left leg, right leg.
    pub fn colors(&self) -> [Rgb24; 6] {
        [
            self.head_color,
            self.torso_color,
            self.left_arm_color,
            self.right_arm_color,
            self.left_leg_color,
            self.right_leg_color,
        ]
    }

    /// Number of assets carrying placement metadata.
    pub fn assets_with_metadata(&self) -> usize {
        self.assets.iter().filter(|a| a.has_metadata()).count()
    }

    /// Sorts assets by identifier.
    ///
    /// Decoding yields assets partitioned by variant, so comparisons against
    /// a source record should sort both sides first.
    pub fn sort_assets(&mut self) {
        self.assets.sort_by_key(Asset::id);
    }
}
