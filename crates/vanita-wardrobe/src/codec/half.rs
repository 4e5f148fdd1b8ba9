//! Half-precision (binary16) float packing.
//!
//! Layout: 1 sign bit, 5 exponent bits (bias 15), 10 mantissa bits.
//! Packing is deliberately simple: no gradual underflow, no rounding.
//! Anything below the smallest normal becomes a signed zero, anything above
//! the largest exponent (including NaN and infinities) becomes a signed
//! infinity, and the mantissa is truncated. Stored blobs depend on these
//! exact bits, so the rules must not change.

const F16_SIGN: u16 = 0x8000;
const F16_INFINITY: u16 = 0x7c00;
const F16_MANTISSA_MASK: u16 = 0x03ff;

/// Smallest unbiased exponent packed as a normal half.
const MIN_EXPONENT: i32 = -14;
/// Largest unbiased exponent packed as a normal half.
const MAX_EXPONENT: i32 = 15;

/// Packs an f32 into half-precision bits.
#[inline]
pub fn f32_to_f16(value: f32) -> u16 {
    let bits = value.to_bits();

    let sign = ((bits >> 16) & 0x8000) as u16;
    let exponent = ((bits >> 23) & 0xff) as i32 - 127;
    let fraction = bits & 0x007f_ffff;

    if exponent < MIN_EXPONENT {
        return sign;
    }
    if exponent > MAX_EXPONENT {
        return sign | F16_INFINITY;
    }

    let half_exponent = ((exponent + 15) & 0x1f) as u16;
    let half_fraction = (fraction >> 13) as u16;

    sign | (half_exponent << 10) | half_fraction
}

/// Unpacks half-precision bits into an f32.
///
/// Every half value is exactly representable as an f32, including
/// subnormals, so this direction is lossless.
#[inline]
pub fn f16_to_f32(bits: u16) -> f32 {
    let sign = ((bits & F16_SIGN) as u32) << 16;
    let exponent = ((bits >> 10) & 0x1f) as u32;
    let fraction = (bits & F16_MANTISSA_MASK) as u32;

    match exponent {
        0 if fraction == 0 => f32::from_bits(sign),
        0 => {
            // fraction * 2^-24
            let magnitude = fraction as f32 * f32::from_bits((127 - 24) << 23);
            if sign != 0 { -magnitude } else { magnitude }
        }
        0x1f if fraction == 0 => f32::from_bits(sign | 0x7f80_0000),
        0x1f => f32::NAN,
        _ => f32::from_bits(sign | ((exponent + 127 - 15) << 23) | (fraction << 13)),
    }
}

/// Round-trips a value through half precision.
///
/// Useful for comparing a decoded record against its source.
pub fn quantize(value: f32) -> f32 {
    f16_to_f32(f32_to_f16(value))
}
