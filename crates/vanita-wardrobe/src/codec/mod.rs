//! Binary encoding/decoding for wardrobes.
//!
//! - [`buffer`]: offset-addressed byte region with typed accessors
//! - [`half`]: f32 ⇄ f16 bit conversion
//! - [`v0`]: the version 0 record layout
//! - [`entry`]: version-prefix dispatch

pub mod buffer;
pub mod entry;
pub mod half;
pub mod v0;

pub use buffer::{ByteBuffer, Endian};
pub use entry::{decode_wardrobe, decode_wardrobe_with_options, encode_wardrobe, peek_version};
pub use half::{f16_to_f32, f32_to_f16, quantize};
pub use v0::{DecodeOptions, outfit_len, read_outfit_len, wardrobe_len};
