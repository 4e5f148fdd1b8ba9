//! Versioned entry points.
//!
//! Every wardrobe blob starts with a little-endian u16 format version. The
//! dispatcher reads only that prefix and hands the whole blob to the decoder
//! for that version.

use tracing::warn;

use crate::codec::v0;
use crate::codec::v0::DecodeOptions;
use crate::error::{DecodeError, EncodeError};
use crate::limits::FORMAT_VERSION;
use crate::model::{Outfit, Wardrobe};

/// Reads the format version without decoding anything else.
pub fn peek_version(data: &[u8]) -> Result<u16, DecodeError> {
    match data {
        [lo, hi, ..] => Ok(u16::from_le_bytes([*lo, *hi])),
        _ => Err(DecodeError::TooShort { len: data.len() }),
    }
}

/// Decodes a wardrobe blob of any supported version.
pub fn decode_wardrobe(data: &[u8]) -> Result<Wardrobe, DecodeError> {
    decode_wardrobe_with_options(data, DecodeOptions::default())
}

/// Decodes a wardrobe blob of any supported version with the given options.
///
/// Failures are logged with their kind: `UnsupportedVersion` for a blob from
/// a newer writer, `DecoderFail` for anything truncated or corrupted.
pub fn decode_wardrobe_with_options(
    data: &[u8],
    options: DecodeOptions,
) -> Result<Wardrobe, DecodeError> {
    let result = match peek_version(data) {
        Ok(FORMAT_VERSION) => v0::decode_with_options(data, options),
        Ok(version) => Err(DecodeError::UnsupportedVersion { version }),
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        warn!(
            kind = e.kind().as_str(),
            error = %e,
            len = data.len(),
            "failed to decode wardrobe"
        );
    }
    result
}

/// Encodes a wardrobe at the current format version.
pub fn encode_wardrobe(tags: &[String], outfits: &[Outfit]) -> Result<Vec<u8>, EncodeError> {
    v0::encode(tags, outfits)
}
