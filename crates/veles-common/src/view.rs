//! Bounds-checked reading from byte slices.
//!
//! This module provides [`OffsetView`], a read-only window over a byte
//! buffer anchored at a base offset. Every structured read validates its
//! byte range against the buffer before the value is materialized, and
//! every failure carries a caller-supplied label naming the field that was
//! being read.

use std::mem::size_of;

use memchr::memchr;
use zerocopy::FromBytes;

use crate::{Error, Result};

/// A read-only window over a byte buffer, anchored at a base offset.
///
/// Offsets passed to the read methods are relative to the base; the
/// returned absolute offsets are relative to the start of the underlying
/// buffer, which keeps diagnostics meaningful after re-anchoring with
/// [`OffsetView::with_offset`]. Decoded values are copied out of the
/// buffer, so they carry no lifetime dependency on it.
///
/// # Example
///
/// ```
/// use veles_common::OffsetView;
///
/// let data = [0x01u8, 0x02, 0x03, 0x04];
/// let view = OffsetView::new(&data);
///
/// let (value, offset) = view.read_struct::<[u8; 2]>(1, "sample field").unwrap();
/// assert_eq!(value, [0x02, 0x03]);
/// assert_eq!(offset, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct OffsetView<'a> {
    data: &'a [u8],
    base: usize,
}

impl<'a> OffsetView<'a> {
    /// Create a view over a buffer, anchored at its start.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, base: 0 }
    }

    /// A view over the same buffer anchored at a different base offset.
    ///
    /// The base may lie anywhere, including past the end of the buffer;
    /// reads through such a view simply fail their bounds check.
    #[inline]
    pub const fn with_offset(&self, base: usize) -> Self {
        Self {
            data: self.data,
            base,
        }
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the underlying buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The base offset reads are relative to.
    #[inline]
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Resolve `base + relative` and verify that `needed` bytes fit within
    /// the buffer, returning the absolute offset.
    fn locate(&self, relative: usize, needed: usize, label: &'static str) -> Result<usize> {
        let offset = self.base.saturating_add(relative);
        match offset.checked_add(needed) {
            Some(end) if end <= self.data.len() => Ok(offset),
            _ => Err(Error::OutOfBounds {
                label,
                offset,
                needed,
                buffer_len: self.data.len(),
            }),
        }
    }

    /// Decode one `T` at `base + relative`.
    ///
    /// Returns the decoded value together with the absolute offset it was
    /// read from.
    pub fn read_struct<T: FromBytes>(
        &self,
        relative: usize,
        label: &'static str,
    ) -> Result<(T, usize)> {
        let size = size_of::<T>();
        let offset = self.locate(relative, size, label)?;
        let value =
            T::read_from_bytes(&self.data[offset..offset + size]).map_err(|_| Error::OutOfBounds {
                label,
                offset,
                needed: size,
                buffer_len: self.data.len(),
            })?;
        Ok((value, offset))
    }

    /// Decode `count` consecutive `T`s starting at `base + relative`.
    ///
    /// Each element is tagged with its own absolute offset. The bounds
    /// check covers the whole array before any element is decoded.
    pub fn read_struct_array<T: FromBytes>(
        &self,
        relative: usize,
        count: usize,
        label: &'static str,
    ) -> Result<Vec<(T, usize)>> {
        let size = size_of::<T>();
        let total = size.checked_mul(count).unwrap_or(usize::MAX);
        let start = self.locate(relative, total, label)?;

        let mut parsed = Vec::with_capacity(count);
        for index in 0..count {
            let offset = start + index * size;
            let value = T::read_from_bytes(&self.data[offset..offset + size]).map_err(|_| {
                Error::OutOfBounds {
                    label,
                    offset,
                    needed: size,
                    buffer_len: self.data.len(),
                }
            })?;
            parsed.push((value, offset));
        }
        Ok(parsed)
    }

    /// Borrow `count` raw bytes at `base + relative` without copying.
    #[inline]
    pub fn read_bytes(&self, relative: usize, count: usize, label: &'static str) -> Result<&'a [u8]> {
        let offset = self.locate(relative, count, label)?;
        Ok(&self.data[offset..offset + count])
    }

    /// Read a null-terminated string at `base + relative`.
    ///
    /// The scan never leaves the buffer; a string that runs off the end
    /// without a terminator is an out-of-bounds read, not a truncated
    /// success. The terminator is excluded from the returned string.
    pub fn read_cstr(&self, relative: usize, label: &'static str) -> Result<&'a str> {
        let start = self.locate(relative, 0, label)?;
        let remaining = &self.data[start..];

        let Some(nul) = memchr(0, remaining) else {
            return Err(Error::OutOfBounds {
                label,
                offset: start,
                needed: remaining.len() + 1,
                buffer_len: self.data.len(),
            });
        };

        std::str::from_utf8(&remaining[..nul]).map_err(|source| Error::Utf8 { label, source })
    }
}

#[cfg(test)]
mod tests {
    use zerocopy::byteorder::little_endian::U32;

    use super::*;

    #[test]
    fn test_read_struct_in_bounds() {
        let data = [0x01u8, 0x02, 0x03, 0x04, 0x05];
        let view = OffsetView::new(&data);

        let (value, offset) = view.read_struct::<U32>(1, "value").unwrap();
        assert_eq!(value.get(), 0x05040302);
        assert_eq!(offset, 1);
    }

    #[test]
    fn test_read_struct_out_of_bounds_carries_label() {
        let data = [0x01u8, 0x02];
        let view = OffsetView::new(&data);

        let err = view.read_struct::<U32>(0, "tiny field").unwrap_err();
        match err {
            Error::OutOfBounds { label, needed, .. } => {
                assert_eq!(label, "tiny field");
                assert_eq!(needed, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_with_offset_reanchors() {
        let data = [0x00u8, 0x00, 0x00, 0x00, 0xAA, 0xBB, 0xCC, 0xDD];
        let view = OffsetView::new(&data).with_offset(4);

        let (value, offset) = view.read_struct::<U32>(0, "value").unwrap();
        assert_eq!(value.get(), 0xDDCCBBAA);
        assert_eq!(offset, 4);
        assert_eq!(view.base(), 4);
    }

    #[test]
    fn test_read_struct_array_offsets() {
        let data = [0x01u8, 0x02, 0x03, 0x04];
        let view = OffsetView::new(&data);

        let parsed = view.read_struct_array::<[u8; 2]>(0, 2, "pairs").unwrap();
        assert_eq!(parsed, vec![([0x01, 0x02], 0), ([0x03, 0x04], 2)]);

        assert!(view.read_struct_array::<[u8; 2]>(0, 3, "pairs").is_err());
    }

    #[test]
    fn test_read_bytes() {
        let data = [0x01u8, 0x02, 0x03];
        let view = OffsetView::new(&data);

        assert_eq!(view.read_bytes(1, 2, "blob").unwrap(), &[0x02, 0x03]);
        assert!(view.read_bytes(1, 3, "blob").is_err());
        assert_eq!(view.read_bytes(3, 0, "blob").unwrap(), &[] as &[u8]);
    }

    #[test]
    fn test_read_cstr_sequence() {
        let data = b"models\0\0maps\0";
        let view = OffsetView::new(data);

        assert_eq!(view.read_cstr(0, "first").unwrap(), "models");
        assert_eq!(view.read_cstr(7, "sentinel").unwrap(), "");
        assert_eq!(view.read_cstr(8, "second").unwrap(), "maps");
    }

    #[test]
    fn test_read_cstr_unterminated_is_out_of_bounds() {
        let data = b"no terminator";
        let view = OffsetView::new(data);

        let err = view.read_cstr(0, "name").unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { label: "name", .. }));
    }

    #[test]
    fn test_read_past_end_fails() {
        let data = [0u8; 4];
        let view = OffsetView::new(&data);

        assert!(view.read_cstr(4, "name").is_err());
        assert!(view.read_bytes(usize::MAX, 1, "blob").is_err());
        assert!(view
            .with_offset(usize::MAX)
            .read_struct::<U32>(usize::MAX, "value")
            .is_err());
    }
}
