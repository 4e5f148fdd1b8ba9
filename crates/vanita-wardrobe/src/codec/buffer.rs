//! Fixed-capacity, offset-addressed byte buffer.
//!
//! Unlike a streaming cursor, every accessor takes an explicit byte offset,
//! which is what the wardrobe layout is computed in. The region never
//! grows: an access past the end returns [`BufferError::OutOfRange`] and
//! the caller decides what that means.

use std::ops::Range;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::codec::half::{f16_to_f32, f32_to_f16};
use crate::error::BufferError;

/// Byte order used by a [`ByteBuffer`] for multi-byte scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Little-endian; the wardrobe format uses this throughout.
    #[default]
    Little,
    Big,
}

/// A byte region with a fixed byte order.
///
/// `B` is the backing storage: `Vec<u8>` for buffers being written,
/// `&[u8]` for read-only views over caller data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer<B = Vec<u8>> {
    bytes: B,
    endian: Endian,
}

impl ByteBuffer<Vec<u8>> {
    /// Allocates a zero-filled buffer of `len` bytes.
    pub fn zeroed(len: usize, endian: Endian) -> Self {
        Self {
            bytes: vec![0u8; len],
            endian,
        }
    }

    /// Returns the backing bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

macro_rules! scalar_accessors {
    ($($ty:ty => $read:ident, $write:ident;)*) => {
        impl<B: AsRef<[u8]>> ByteBuffer<B> {
            $(
                #[doc = concat!("Reads a `", stringify!($ty), "` at `offset`.")]
                #[inline]
                pub fn $read(&self, offset: usize) -> Result<$ty, BufferError> {
                    let raw = self.read_array(offset)?;
                    Ok(match self.endian {
                        Endian::Little => <$ty>::from_le_bytes(raw),
                        Endian::Big => <$ty>::from_be_bytes(raw),
                    })
                }
            )*
        }

        impl<B: AsRef<[u8]> + AsMut<[u8]>> ByteBuffer<B> {
            $(
                #[doc = concat!("Writes a `", stringify!($ty), "` at `offset`.")]
                #[inline]
                pub fn $write(&mut self, offset: usize, value: $ty) -> Result<(), BufferError> {
                    let raw = match self.endian {
                        Endian::Little => value.to_le_bytes(),
                        Endian::Big => value.to_be_bytes(),
                    };
                    self.write_array(offset, raw)
                }
            )*
        }
    };
}

scalar_accessors! {
    u8 => read_u8, write_u8;
    u16 => read_u16, write_u16;
    u32 => read_u32, write_u32;
    u64 => read_u64, write_u64;
    i8 => read_i8, write_i8;
    i16 => read_i16, write_i16;
    i32 => read_i32, write_i32;
    i64 => read_i64, write_i64;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

impl<B: AsRef<[u8]>> ByteBuffer<B> {
    /// Wraps an existing region without copying it.
    pub fn wrap(bytes: B, endian: Endian) -> Self {
        Self { bytes, endian }
    }

    /// Returns the byte order of this buffer.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Returns the size of the region in bytes.
    pub fn len(&self) -> usize {
        self.bytes.as_ref().len()
    }

    /// Returns true if the region is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the whole region.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Returns the byte range `offset..offset + width` if it lies inside the region.
    #[inline]
    fn range(&self, offset: usize, width: usize) -> Result<Range<usize>, BufferError> {
        let capacity = self.len();
        match offset.checked_add(width) {
            Some(end) if end <= capacity => Ok(offset..end),
            _ => Err(BufferError::OutOfRange {
                offset,
                width,
                capacity,
            }),
        }
    }

    #[inline]
    fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], BufferError> {
        let range = self.range(offset, N)?;
        let mut raw = [0u8; N];
        raw.copy_from_slice(&self.bytes.as_ref()[range]);
        Ok(raw)
    }

    /// Reads a half-precision float at `offset`, widened to f32.
    #[inline]
    pub fn read_f16(&self, offset: usize) -> Result<f32, BufferError> {
        Ok(f16_to_f32(self.read_u16(offset)?))
    }

    /// Decodes `len` bytes at `offset` as UTF-8.
    pub fn read_utf8(&self, offset: usize, len: usize) -> Result<String, BufferError> {
        let range = self.range(offset, len)?;
        std::str::from_utf8(&self.bytes.as_ref()[range])
            .map(str::to_owned)
            .map_err(|_| BufferError::InvalidUtf8 { offset, len })
    }

    /// Copies `start..end` into a new, independent vector.
    pub fn slice(&self, start: usize, end: usize) -> Result<Vec<u8>, BufferError> {
        let width = end.checked_sub(start).ok_or(BufferError::OutOfRange {
            offset: start,
            width: 0,
            capacity: self.len(),
        })?;
        let range = self.range(start, width)?;
        Ok(self.bytes.as_ref()[range].to_vec())
    }

    /// Encodes the whole region as standard (padded) base64.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.bytes.as_ref())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> ByteBuffer<B> {
    #[inline]
    fn write_array<const N: usize>(&mut self, offset: usize, raw: [u8; N]) -> Result<(), BufferError> {
        let range = self.range(offset, N)?;
        self.bytes.as_mut()[range].copy_from_slice(&raw);
        Ok(())
    }

    /// Writes an f32 at `offset` packed as half precision.
    #[inline]
    pub fn write_f16(&mut self, offset: usize, value: f32) -> Result<(), BufferError> {
        self.write_u16(offset, f32_to_f16(value))
    }

    /// Writes the UTF-8 encoding of `value` at `offset`.
    ///
    /// Returns the number of bytes written, which is what length prefixes
    /// must carry (not the character count).
    pub fn write_utf8(&mut self, offset: usize, value: &str) -> Result<usize, BufferError> {
        self.fill(offset, value.as_bytes())?;
        Ok(value.len())
    }

    /// Copies `source` into the region starting at `offset`.
    pub fn fill(&mut self, offset: usize, source: &[u8]) -> Result<(), BufferError> {
        let range = self.range(offset, source.len())?;
        self.bytes.as_mut()[range].copy_from_slice(source);
        Ok(())
    }
}

impl<B: AsRef<[u8]>> AsRef<[u8]> for ByteBuffer<B> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_has_fixed_size() {
        let buf = ByteBuffer::zeroed(16, Endian::Little);
        assert_eq!(buf.len(), 16);
        assert!(buf.as_bytes().iter().all(|b| *b == 0));
        assert!(ByteBuffer::zeroed(0, Endian::Little).is_empty());
    }

    #[test]
    fn test_endianness() {
        let mut le = ByteBuffer::zeroed(4, Endian::Little);
        le.write_u32(0, 0x0102_0304).unwrap();
        assert_eq!(le.as_bytes(), &[4, 3, 2, 1]);

        let mut be = ByteBuffer::zeroed(4, Endian::Big);
        be.write_u32(0, 0x0102_0304).unwrap();
        assert_eq!(be.as_bytes(), &[1, 2, 3, 4]);

        let view = ByteBuffer::wrap(&[0x34u8, 0x12][..], Endian::Little);
        assert_eq!(view.read_u16(0).unwrap(), 0x1234);
    }

    #[test]
    fn test_scalars_at_offsets() {
        let mut buf = ByteBuffer::zeroed(64, Endian::Little);
        buf.write_u8(0, 0xff).unwrap();
        buf.write_i8(1, -5).unwrap();
        buf.write_i16(2, -1234).unwrap();
        buf.write_i32(4, -123_456).unwrap();
        buf.write_u64(8, u64::MAX - 1).unwrap();
        buf.write_i64(16, i64::MIN).unwrap();
        buf.write_f32(24, -38.345).unwrap();
        buf.write_f64(28, std::f64::consts::PI).unwrap();
        buf.write_f16(36, 1.5).unwrap();

        assert_eq!(buf.read_u8(0).unwrap(), 0xff);
        assert_eq!(buf.read_i8(1).unwrap(), -5);
        assert_eq!(buf.read_i16(2).unwrap(), -1234);
        assert_eq!(buf.read_i32(4).unwrap(), -123_456);
        assert_eq!(buf.read_u64(8).unwrap(), u64::MAX - 1);
        assert_eq!(buf.read_i64(16).unwrap(), i64::MIN);
        assert_eq!(buf.read_f32(24).unwrap(), -38.345);
        assert_eq!(buf.read_f64(28).unwrap(), std::f64::consts::PI);
        assert_eq!(buf.read_f16(36).unwrap(), 1.5);
        assert_eq!(buf.read_u16(36).unwrap(), 0x3e00);
    }

    #[test]
    fn test_out_of_range() {
        let mut buf = ByteBuffer::zeroed(4, Endian::Little);
        assert_eq!(
            buf.read_u32(1),
            Err(BufferError::OutOfRange {
                offset: 1,
                width: 4,
                capacity: 4
            })
        );
        assert!(buf.write_u64(0, 1).is_err());
        assert!(buf.read_u8(4).is_err());
        assert!(buf.read_u8(usize::MAX).is_err());
        assert!(buf.fill(3, &[1, 2]).is_err());
        // Failed writes leave the region untouched.
        assert_eq!(buf.as_bytes(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_utf8_returns_byte_count() {
        let mut buf = ByteBuffer::zeroed(32, Endian::Little);
        let written = buf.write_utf8(0, "レグルス").unwrap();
        assert_eq!(written, 12);
        assert_eq!(buf.read_utf8(0, written).unwrap(), "レグルス");
        assert_eq!(buf.write_utf8(12, "").unwrap(), 0);
    }

    #[test]
    fn test_invalid_utf8() {
        let buf = ByteBuffer::wrap(vec![b'o', b'k', 0xff, 0xfe], Endian::Little);
        assert_eq!(buf.read_utf8(0, 2).unwrap(), "ok");
        assert_eq!(
            buf.read_utf8(1, 3),
            Err(BufferError::InvalidUtf8 { offset: 1, len: 3 })
        );
    }

    #[test]
    fn test_fill_and_slice() {
        let mut buf = ByteBuffer::zeroed(8, Endian::Little);
        buf.fill(2, &[9, 8, 7]).unwrap();
        assert_eq!(buf.as_bytes(), &[0, 0, 9, 8, 7, 0, 0, 0]);

        let mut copy = buf.slice(2, 5).unwrap();
        assert_eq!(copy, vec![9, 8, 7]);
        copy[0] = 1;
        assert_eq!(buf.read_u8(2).unwrap(), 9);

        assert!(buf.slice(0, 0).unwrap().is_empty());
        assert!(buf.slice(6, 9).is_err());
        assert!(buf.slice(5, 2).is_err());
    }

    #[test]
    fn test_base64() {
        let buf = ByteBuffer::wrap(b"wardrobe".to_vec(), Endian::Little);
        assert_eq!(buf.to_base64(), "d2FyZHJvYmU=");
        assert_eq!(ByteBuffer::zeroed(0, Endian::Little).to_base64(), "");
    }

    #[test]
    fn test_buffer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ByteBuffer<Vec<u8>>>();
        assert_send_sync::<ByteBuffer<&[u8]>>();
    }
}
