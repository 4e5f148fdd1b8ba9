//! Wardrobe binary format, version 0.
//!
//! ```text
//! [u16]            format version (= 0)
//! [u8]             tag count
//!   [u8 + utf8]    tag label, per tag
//! outfit record, zero or more, back to back:
//!   [u64] created  [u64] modified  [u64] lastUsed  [u16] useCount
//!   [u8 u8 u8] × 6 colors: head, torso, left arm, right arm, left leg, right leg
//!   [f16] width  height  head  depth  proportion  bodyType
//!   [u8]  avatarType
//!   [u8 + utf8]    name
//!   [u8 + u8...]   tag references
//!   [u8] with-metadata count  [u8] without-metadata count
//!   [u64] id, per asset without metadata
//!   [u64 id, u8 order, f16 puffiness, 3×f32 position, 3×f32 rotation, 3×f32 scale],
//!                  per asset with metadata
//!   [u32 + bin]    thumbnail
//! ```
//!
//! All scalars are little-endian, with no padding or alignment. Every
//! variable-length field is preceded by its count or byte length, so the
//! encoder sizes the buffer once and writes straight through, while the
//! decoder probes each record's extent before reading it.

use tracing::{debug, error, warn};

use crate::codec::buffer::{ByteBuffer, Endian};
use crate::error::{BufferError, DecodeError, EncodeError, ValidationError};
use crate::limits::{
    ASSET_ID_LEN, ASSET_WITH_METADATA_LEN, FORMAT_VERSION, MAX_SAFE_INTEGER, MIN_WARDROBE_LEN,
    OUTFIT_HEADER_LEN, VERSION_PREFIX_LEN,
};
use crate::model::{Asset, AssetWithMetadata, AvatarType, Outfit, Rgb24, Vec3, Wardrobe};
use crate::validate::{validate_batch, validate_wardrobe};

// Field offsets inside the fixed record header.
const CREATED: usize = 0;
const MODIFIED: usize = 8;
const LAST_USED: usize = 16;
const USE_COUNT: usize = 24;
const COLORS: usize = 26;
const WIDTH: usize = 44;
const HEIGHT: usize = 46;
const HEAD: usize = 48;
const DEPTH: usize = 50;
const PROPORTION: usize = 52;
const BODY_TYPE: usize = 54;
const AVATAR_TYPE: usize = 56;

// Field offsets inside an asset entry with metadata.
const ASSET_ORDER: usize = 8;
const ASSET_PUFFINESS: usize = 9;
const ASSET_POSITION: usize = 11;
const ASSET_ROTATION: usize = 23;
const ASSET_SCALE: usize = 35;

// =============================================================================
// LENGTHS
// =============================================================================

/// Returns the encoded size of the tag table (count byte included).
pub fn tags_len(tags: &[String]) -> usize {
    1 + tags.iter().map(|t| 1 + t.len()).sum::<usize>()
}

/// Returns the encoded size of one outfit record.
pub fn outfit_len(outfit: &Outfit) -> usize {
    let name_len = 1 + outfit.name.len();
    let tags_len = 1 + outfit.tags.len();

    let with_metadata = outfit.assets_with_metadata();
    let without_metadata = outfit.assets.len() - with_metadata;
    let assets_len =
        2 + with_metadata * ASSET_WITH_METADATA_LEN + without_metadata * ASSET_ID_LEN;

    let thumbnail_len = 4 + outfit.thumbnail.len();

    OUTFIT_HEADER_LEN + name_len + tags_len + assets_len + thumbnail_len
}

/// Returns the total encoded size of a wardrobe.
pub fn wardrobe_len(tags: &[String], outfits: &[Outfit]) -> usize {
    VERSION_PREFIX_LEN + tags_len(tags) + outfits.iter().map(outfit_len).sum::<usize>()
}

/// Probes the length of the outfit record starting at `offset`.
///
/// Returns 0 when no complete record fits in the rest of the buffer: the
/// header, each count byte, the asset runs, the thumbnail length and the
/// thumbnail itself are checked in turn before anything past them is read.
pub fn read_outfit_len<B: AsRef<[u8]>>(buf: &ByteBuffer<B>, offset: usize) -> usize {
    probe_outfit_len(buf, offset).unwrap_or(0)
}

fn probe_outfit_len<B: AsRef<[u8]>>(buf: &ByteBuffer<B>, offset: usize) -> Option<usize> {
    let mut cursor = offset.checked_add(OUTFIT_HEADER_LEN)?;

    cursor += 1 + buf.read_u8(cursor).ok()? as usize;
    cursor += 1 + buf.read_u8(cursor).ok()? as usize;

    let with_metadata = buf.read_u8(cursor).ok()? as usize;
    let without_metadata = buf.read_u8(cursor + 1).ok()? as usize;
    cursor += 2 + with_metadata * ASSET_WITH_METADATA_LEN + without_metadata * ASSET_ID_LEN;

    let thumbnail_len = buf.read_u32(cursor).ok()? as usize;
    let end = (cursor + 4).checked_add(thumbnail_len)?;

    (end <= buf.len()).then_some(end - offset)
}

// =============================================================================
// FIELD HELPERS
// =============================================================================

fn count_u8(field: &'static str, len: usize) -> Result<u8, EncodeError> {
    u8::try_from(len).map_err(|_| {
        EncodeError::Validation(ValidationError::LengthExceedsLimit {
            field,
            len,
            max: u8::MAX as usize,
        })
    })
}

/// Reads a u64 clamped to the safe-integer ceiling.
fn read_clamped_u64<B: AsRef<[u8]>>(buf: &ByteBuffer<B>, offset: usize) -> Result<u64, BufferError> {
    Ok(buf.read_u64(offset)?.min(MAX_SAFE_INTEGER))
}

fn write_rgb24(buf: &mut ByteBuffer, offset: usize, color: Rgb24) -> Result<(), BufferError> {
    buf.write_u8(offset, color.r)?;
    buf.write_u8(offset + 1, color.g)?;
    buf.write_u8(offset + 2, color.b)
}

fn read_rgb24<B: AsRef<[u8]>>(buf: &ByteBuffer<B>, offset: usize) -> Result<Rgb24, BufferError> {
    Ok(Rgb24 {
        r: buf.read_u8(offset)?,
        g: buf.read_u8(offset + 1)?,
        b: buf.read_u8(offset + 2)?,
    })
}

fn write_vec3(buf: &mut ByteBuffer, offset: usize, v: &Vec3) -> Result<(), BufferError> {
    buf.write_f32(offset, v.x)?;
    buf.write_f32(offset + 4, v.y)?;
    buf.write_f32(offset + 8, v.z)
}

fn read_vec3<B: AsRef<[u8]>>(buf: &ByteBuffer<B>, offset: usize) -> Result<Vec3, BufferError> {
    Ok(Vec3 {
        x: buf.read_f32(offset)?,
        y: buf.read_f32(offset + 4)?,
        z: buf.read_f32(offset + 8)?,
    })
}

/// Writes a u8 byte length followed by UTF-8 bytes; returns bytes written.
fn write_short_str(
    buf: &mut ByteBuffer,
    offset: usize,
    value: &str,
    field: &'static str,
) -> Result<usize, EncodeError> {
    let len = count_u8(field, value.len())?;
    buf.write_u8(offset, len)?;
    let written = buf.write_utf8(offset + 1, value)?;
    Ok(1 + written)
}

fn read_short_str<B: AsRef<[u8]>>(
    buf: &ByteBuffer<B>,
    offset: usize,
) -> Result<(String, usize), BufferError> {
    let len = buf.read_u8(offset)? as usize;
    Ok((buf.read_utf8(offset + 1, len)?, 1 + len))
}

fn write_tag_ids(buf: &mut ByteBuffer, offset: usize, tags: &[u8]) -> Result<usize, EncodeError> {
    buf.write_u8(offset, count_u8("tags", tags.len())?)?;
    buf.fill(offset + 1, tags)?;
    Ok(1 + tags.len())
}

fn read_tag_ids<B: AsRef<[u8]>>(
    buf: &ByteBuffer<B>,
    offset: usize,
) -> Result<(Vec<u8>, usize), BufferError> {
    let len = buf.read_u8(offset)? as usize;
    Ok((buf.slice(offset + 1, offset + 1 + len)?, 1 + len))
}

fn write_asset_with_metadata(
    buf: &mut ByteBuffer,
    offset: usize,
    meta: &AssetWithMetadata,
) -> Result<(), BufferError> {
    buf.write_u64(offset, meta.id)?;
    buf.write_u8(offset + ASSET_ORDER, meta.order)?;
    buf.write_f16(offset + ASSET_PUFFINESS, meta.puffiness)?;
    write_vec3(buf, offset + ASSET_POSITION, &meta.position)?;
    write_vec3(buf, offset + ASSET_ROTATION, &meta.rotation)?;
    write_vec3(buf, offset + ASSET_SCALE, &meta.scale)
}

fn read_asset_with_metadata<B: AsRef<[u8]>>(
    buf: &ByteBuffer<B>,
    offset: usize,
) -> Result<AssetWithMetadata, BufferError> {
    Ok(AssetWithMetadata {
        id: read_clamped_u64(buf, offset)?,
        order: buf.read_u8(offset + ASSET_ORDER)?,
        puffiness: buf.read_f16(offset + ASSET_PUFFINESS)?,
        position: read_vec3(buf, offset + ASSET_POSITION)?,
        rotation: read_vec3(buf, offset + ASSET_ROTATION)?,
        scale: read_vec3(buf, offset + ASSET_SCALE)?,
    })
}

/// Writes both asset runs: counts, then bare ids, then entries with metadata.
fn write_assets(buf: &mut ByteBuffer, offset: usize, assets: &[Asset]) -> Result<usize, EncodeError> {
    let (with_metadata, without_metadata): (Vec<&Asset>, Vec<&Asset>) =
        assets.iter().partition(|a| a.has_metadata());

    buf.write_u8(offset, count_u8("assets with metadata", with_metadata.len())?)?;
    buf.write_u8(offset + 1, count_u8("assets without metadata", without_metadata.len())?)?;

    let mut cursor = offset + 2;
    for asset in &without_metadata {
        buf.write_u64(cursor, asset.id())?;
        cursor += ASSET_ID_LEN;
    }
    for asset in &with_metadata {
        if let Asset::WithMetadata(meta) = asset {
            write_asset_with_metadata(buf, cursor, meta)?;
        }
        cursor += ASSET_WITH_METADATA_LEN;
    }

    Ok(cursor - offset)
}

/// Reads both asset runs. Assets without metadata come first.
fn read_assets<B: AsRef<[u8]>>(
    buf: &ByteBuffer<B>,
    offset: usize,
) -> Result<(Vec<Asset>, usize), BufferError> {
    let with_metadata = buf.read_u8(offset)? as usize;
    let without_metadata = buf.read_u8(offset + 1)? as usize;

    let mut assets = Vec::with_capacity(with_metadata + without_metadata);
    let mut cursor = offset + 2;
    for _ in 0..without_metadata {
        assets.push(Asset::WithoutMetadata {
            id: read_clamped_u64(buf, cursor)?,
        });
        cursor += ASSET_ID_LEN;
    }
    for _ in 0..with_metadata {
        assets.push(Asset::WithMetadata(read_asset_with_metadata(buf, cursor)?));
        cursor += ASSET_WITH_METADATA_LEN;
    }

    Ok((assets, cursor - offset))
}

fn write_thumbnail(buf: &mut ByteBuffer, offset: usize, image: &[u8]) -> Result<usize, EncodeError> {
    let len = u32::try_from(image.len()).map_err(|_| {
        EncodeError::Validation(ValidationError::LengthExceedsLimit {
            field: "thumbnail",
            len: image.len(),
            max: u32::MAX as usize,
        })
    })?;
    buf.write_u32(offset, len)?;
    buf.fill(offset + 4, image)?;
    Ok(4 + image.len())
}

fn read_thumbnail<B: AsRef<[u8]>>(
    buf: &ByteBuffer<B>,
    offset: usize,
) -> Result<(Vec<u8>, usize), BufferError> {
    let len = buf.read_u32(offset)? as usize;
    let start = offset + 4;
    Ok((buf.slice(start, start.saturating_add(len))?, 4 + len))
}

// =============================================================================
// TAG TABLE
// =============================================================================

/// Writes the tag table at `offset`; returns bytes written.
pub fn write_tags(buf: &mut ByteBuffer, offset: usize, tags: &[String]) -> Result<usize, EncodeError> {
    buf.write_u8(offset, count_u8("tags", tags.len())?)?;

    let mut cursor = offset + 1;
    for tag in tags {
        cursor += write_short_str(buf, cursor, tag, "tag")?;
    }
    Ok(cursor - offset)
}

/// Reads the tag table at `offset`; returns the tags and bytes consumed.
pub fn read_tags<B: AsRef<[u8]>>(
    buf: &ByteBuffer<B>,
    offset: usize,
) -> Result<(Vec<String>, usize), BufferError> {
    let count = buf.read_u8(offset)? as usize;

    let mut tags = Vec::with_capacity(count);
    let mut cursor = offset + 1;
    for _ in 0..count {
        let (tag, len) = read_short_str(buf, cursor)?;
        tags.push(tag);
        cursor += len;
    }
    Ok((tags, cursor - offset))
}

// =============================================================================
// OUTFIT RECORD
// =============================================================================

/// Writes one outfit record at `offset`; returns bytes written.
///
/// The buffer must have room for [`outfit_len`] bytes at `offset`.
pub fn write_outfit(buf: &mut ByteBuffer, offset: usize, outfit: &Outfit) -> Result<usize, EncodeError> {
    buf.write_u64(offset + CREATED, outfit.created)?;
    buf.write_u64(offset + MODIFIED, outfit.modified)?;
    buf.write_u64(offset + LAST_USED, outfit.last_used)?;
    buf.write_u16(offset + USE_COUNT, outfit.use_count)?;

    for (i, color) in outfit.colors().into_iter().enumerate() {
        write_rgb24(buf, offset + COLORS + i * 3, color)?;
    }

    buf.write_f16(offset + WIDTH, outfit.width)?;
    buf.write_f16(offset + HEIGHT, outfit.height)?;
    buf.write_f16(offset + HEAD, outfit.head)?;
    buf.write_f16(offset + DEPTH, outfit.depth)?;
    buf.write_f16(offset + PROPORTION, outfit.proportion)?;
    buf.write_f16(offset + BODY_TYPE, outfit.body_type)?;
    buf.write_u8(offset + AVATAR_TYPE, outfit.avatar_type.into())?;

    let mut cursor = offset + OUTFIT_HEADER_LEN;
    cursor += write_short_str(buf, cursor, &outfit.name, "name")?;
    cursor += write_tag_ids(buf, cursor, &outfit.tags)?;
    cursor += write_assets(buf, cursor, &outfit.assets)?;
    cursor += write_thumbnail(buf, cursor, &outfit.thumbnail)?;

    Ok(cursor - offset)
}

/// Reads one outfit record at `offset`.
pub fn read_outfit<B: AsRef<[u8]>>(buf: &ByteBuffer<B>, offset: usize) -> Result<Outfit, DecodeError> {
    let created = read_clamped_u64(buf, offset + CREATED)?;
    let modified = read_clamped_u64(buf, offset + MODIFIED)?;
    let last_used = read_clamped_u64(buf, offset + LAST_USED)?;
    let use_count = buf.read_u16(offset + USE_COUNT)?;

    let color = |i: usize| read_rgb24(buf, offset + COLORS + i * 3);
    let (head_color, torso_color, left_arm_color) = (color(0)?, color(1)?, color(2)?);
    let (right_arm_color, left_leg_color, right_leg_color) = (color(3)?, color(4)?, color(5)?);

    let width = buf.read_f16(offset + WIDTH)?;
    let height = buf.read_f16(offset + HEIGHT)?;
    let head = buf.read_f16(offset + HEAD)?;
    let depth = buf.read_f16(offset + DEPTH)?;
    let proportion = buf.read_f16(offset + PROPORTION)?;
    let body_type = buf.read_f16(offset + BODY_TYPE)?;

    let avatar_byte = buf.read_u8(offset + AVATAR_TYPE)?;
    let avatar_type = AvatarType::from_u8(avatar_byte)
        .ok_or(DecodeError::InvalidAvatarType { value: avatar_byte })?;

    let mut cursor = offset + OUTFIT_HEADER_LEN;
    let (name, name_len) = read_short_str(buf, cursor)?;
    cursor += name_len;
    let (tags, tags_len) = read_tag_ids(buf, cursor)?;
    cursor += tags_len;
    let (assets, assets_len) = read_assets(buf, cursor)?;
    cursor += assets_len;
    let (thumbnail, _) = read_thumbnail(buf, cursor)?;

    Ok(Outfit {
        name,
        created,
        modified,
        last_used,
        use_count,
        tags,
        head_color,
        torso_color,
        left_arm_color,
        right_arm_color,
        left_leg_color,
        right_leg_color,
        height,
        width,
        head,
        depth,
        proportion,
        body_type,
        avatar_type,
        assets,
        thumbnail,
    })
}

// =============================================================================
// ENCODING
// =============================================================================

/// Validates and encodes a tag registry and outfit list.
///
/// Nothing is produced unless the whole batch validates.
pub fn encode(tags: &[String], outfits: &[Outfit]) -> Result<Vec<u8>, EncodeError> {
    if let Err(e) = validate_batch(tags, outfits) {
        warn!(error = %e, "encoding refused: wardrobe did not validate");
        return Err(e.into());
    }

    encode_validated(tags, outfits).inspect_err(report_layout_bug)
}

/// Logs an encode failure that got past validation and trips a debug
/// assertion: the computed length and the written layout disagree.
fn report_layout_bug(e: &EncodeError) {
    error!(error = %e, "wardrobe layout does not match its computed length");
    debug_assert!(
        !matches!(e, EncodeError::Layout(_) | EncodeError::LengthMismatch { .. }),
        "wardrobe layout bug: {e}"
    );
}

fn encode_validated(tags: &[String], outfits: &[Outfit]) -> Result<Vec<u8>, EncodeError> {
    let total = wardrobe_len(tags, outfits);
    let mut buf = ByteBuffer::zeroed(total, Endian::Little);

    buf.write_u16(0, FORMAT_VERSION)?;

    let mut offset = VERSION_PREFIX_LEN;
    offset += write_tags(&mut buf, offset, tags)?;
    for outfit in outfits {
        offset += write_outfit(&mut buf, offset, outfit)?;
    }

    debug_assert_eq!(offset, total, "computed and written lengths differ");
    if offset != total {
        return Err(EncodeError::LengthMismatch {
            expected: total,
            written: offset,
        });
    }

    debug!(tags = tags.len(), outfits = outfits.len(), bytes = total, "encoded wardrobe");
    Ok(buf.into_vec())
}

// =============================================================================
// DECODING
// =============================================================================

/// Options for decoding wardrobes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Run the schema validator over the decoded wardrobe.
    ///
    /// Off by default: data this crate wrote already passed validation,
    /// and checking every record slows down large loads. Enable it for
    /// files from outside sources.
    pub validate: bool,
}

impl DecodeOptions {
    /// Creates default (non-validating) decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that validate decoded data.
    pub fn validating() -> Self {
        Self { validate: true }
    }
}

/// Decodes a version 0 wardrobe.
pub fn decode(data: &[u8]) -> Result<Wardrobe, DecodeError> {
    decode_with_options(data, DecodeOptions::default())
}

/// Decodes a version 0 wardrobe with the given options.
///
/// Records are read until the length probe finds no complete record. The
/// blob must end exactly there; leftover bytes mean truncation or corruption.
pub fn decode_with_options(data: &[u8], options: DecodeOptions) -> Result<Wardrobe, DecodeError> {
    if data.len() < MIN_WARDROBE_LEN {
        return Err(DecodeError::TooShort { len: data.len() });
    }

    let buf = ByteBuffer::wrap(data, Endian::Little);

    let version = buf.read_u16(0)?;
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion { version });
    }

    let (tags, tags_len) = read_tags(&buf, VERSION_PREFIX_LEN)?;
    debug!(tags = tags.len(), bytes = tags_len, "decoded tag table");

    let mut outfits = Vec::new();
    let mut offset = VERSION_PREFIX_LEN + tags_len;
    loop {
        let len = read_outfit_len(&buf, offset);
        if len == 0 {
            break;
        }
        outfits.push(read_outfit(&buf, offset)?);
        offset += len;
    }

    if offset != buf.len() {
        return Err(DecodeError::TrailingBytes {
            offset,
            remaining: buf.len() - offset,
        });
    }

    let wardrobe = Wardrobe {
        version,
        tags,
        outfits,
    };
    if options.validate {
        validate_wardrobe(&wardrobe)?;
    }

    debug!(outfits = wardrobe.outfits.len(), bytes = data.len(), "decoded wardrobe");
    Ok(wardrobe)
}
