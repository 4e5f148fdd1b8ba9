//! Key-value blob storage boundary.
//!
//! The codec never touches storage itself. Callers hand encoded blobs to a
//! [`BlobStore`] and read them back by key; [`load_wardrobe`] and
//! [`save_wardrobe`] wire the codec to the store under the wardrobe key.

use rustc_hash::FxHashMap;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::codec::{decode_wardrobe, encode_wardrobe};
use crate::error::StoreError;
use crate::limits::WARDROBE_STORE_KEY;
use crate::model::{Outfit, Wardrobe};

/// A key-value store for opaque blobs.
pub trait BlobStore {
    /// Returns the blob under `key`, or `None` if nothing was written there.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces the blob under `key`.
    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct Entry {
    bytes: Vec<u8>,
    digest: [u8; 32],
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

/// In-process [`BlobStore`].
///
/// Each blob is stored with its SHA-256 digest; a read whose bytes no
/// longer match fails with [`StoreError::Corrupted`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the blob under `key`, returning whether one existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    #[cfg(test)]
    fn corrupt(&mut self, key: &str, at: usize) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.bytes[at] ^= 0xff;
        }
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };
        if digest(&entry.bytes) != entry.digest {
            warn!(key, len = entry.bytes.len(), "stored blob failed its digest check");
            return Err(StoreError::Corrupted {
                key: key.to_string(),
            });
        }
        Ok(Some(entry.bytes.clone()))
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                bytes: bytes.to_vec(),
                digest: digest(bytes),
            },
        );
        Ok(())
    }
}

/// Loads the persisted wardrobe, or `None` if none was saved yet.
pub fn load_wardrobe(store: &impl BlobStore) -> Result<Option<Wardrobe>, StoreError> {
    let Some(bytes) = store.read(WARDROBE_STORE_KEY)? else {
        debug!("no stored wardrobe");
        return Ok(None);
    };
    let wardrobe = decode_wardrobe(&bytes)?;
    debug!(outfits = wardrobe.outfits.len(), bytes = bytes.len(), "loaded wardrobe");
    Ok(Some(wardrobe))
}

/// Encodes and persists a wardrobe; returns the stored size in bytes.
///
/// If encoding is refused the previous blob is left untouched.
pub fn save_wardrobe(
    store: &mut impl BlobStore,
    tags: &[String],
    outfits: &[Outfit],
) -> Result<usize, StoreError> {
    let bytes = encode_wardrobe(tags, outfits)?;
    store.write(WARDROBE_STORE_KEY, &bytes)?;
    debug!(outfits = outfits.len(), bytes = bytes.len(), "saved wardrobe");
    Ok(bytes.len())
}
