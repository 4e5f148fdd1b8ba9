//! The top-level persisted unit.

use serde::Serialize;

use crate::limits::FORMAT_VERSION;
use crate::model::Outfit;

/// A format version, a tag registry, and the outfits referencing it.
///
/// Only serialization is derived: the JSON projection is export-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wardrobe {
    /// Binary format version the wardrobe was read from or will be written as.
    pub version: u16,
    /// Tag labels; outfits reference them by position.
    pub tags: Vec<String>,
    pub outfits: Vec<Outfit>,
}

impl Wardrobe {
    /// Creates a wardrobe at the current format version.
    pub fn new(tags: Vec<String>, outfits: Vec<Outfit>) -> Self {
        Self {
            version: FORMAT_VERSION,
            tags,
            outfits,
        }
    }

    /// Returns true if there are no tags and no outfits.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.outfits.is_empty()
    }

    /// Resolves an outfit's tag references to labels.
    ///
    /// References past the end of the registry are skipped.
    pub fn tag_labels<'a>(&'a self, outfit: &'a Outfit) -> impl Iterator<Item = &'a str> + 'a {
        outfit
            .tags
            .iter()
            .filter_map(|&index| self.tags.get(index as usize).map(String::as_str))
    }
}

impl Default for Wardrobe {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}
