//! Shared fixtures for unit tests.

use crate::model::{Asset, AssetWithMetadata, AvatarType, Outfit, OutfitBuilder, Rgb24, Vec3};

pub const ASCII_TAGS: [&str; 4] = ["Dog", "Cat", "Bunny", "Chick"];

pub fn ascii_tags() -> Vec<String> {
    ASCII_TAGS.iter().map(|t| t.to_string()).collect()
}

fn placed(id: u64, order: u8) -> Asset {
    Asset::WithMetadata(AssetWithMetadata {
        id,
        order,
        puffiness: 1.0,
        position: Vec3::new(3.265, -38.345, 61.491),
        rotation: Vec3::new(7.812, -4.591, 1.581),
        scale: Vec3::new(82.351, -42.455, 7.456),
    })
}

/// A fully populated outfit mixing both asset variants.
pub fn sample_outfit() -> Outfit {
    let mut outfit = OutfitBuilder::new("Regulus Corneas - レグルス・コルニアス")
        .created(1727368869884)
        .modified(1727368882829)
        .last_used(0)
        .use_count(8471)
        .colors([
            Rgb24::new(255, 50, 0),
            Rgb24::new(36, 98, 254),
            Rgb24::new(25, 20, 73),
            Rgb24::new(32, 61, 9),
            Rgb24::new(1, 2, 3),
            Rgb24::new(4, 22, 63),
        ])
        .scales(2.0, 0.043, 1.253, 0.591, 0.333)
        .body_type(0.5)
        .avatar_type(AvatarType::R15)
        .build();
    outfit.assets = vec![
        placed(1817955101345922, 1),
        placed(2153791566, 2),
        Asset::WithoutMetadata { id: 112752184 },
    ];
    outfit
}

/// Small Fast Counting generator (sfc32) with a fixed seed, so "random"
/// inputs are identical on every run.
pub struct Sfc32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl Sfc32 {
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    pub fn seeded() -> Self {
        Self::new(2903328393, 4273514075, 2021432224, 1453261564)
    }

    pub fn next_u32(&mut self) -> u32 {
        let t = self.a.wrapping_add(self.b).wrapping_add(self.d);
        self.d = self.d.wrapping_add(1);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21).wrapping_add(t);
        t
    }

    /// Fills `len` bytes, one generator step per byte (top 8 bits).
    pub fn bytes(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| (self.next_u32() >> 24) as u8).collect()
    }
}
