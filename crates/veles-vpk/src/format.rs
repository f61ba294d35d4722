//! VPK on-disk structures.
//!
//! All multi-byte fields are little-endian. The structs use zerocopy's
//! little-endian integer types (alignment 1), so the `#[repr(C)]` layout is
//! byte-exact with the wire format on every host.

use std::mem::size_of;

use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// VPK directory header, version 1 layout (12 bytes).
///
/// Every supported version begins with these fields; version detection
/// reads this struct first and then selects the full header size.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct HeaderV1 {
    /// Format signature, always [`HeaderV1::SIGNATURE`].
    pub signature: U32,
    /// Format version (1 or 2).
    pub version: U32,
    /// Size in bytes of the directory tree.
    pub tree_size: U32,
}

impl HeaderV1 {
    /// VPK signature as u32.
    pub const SIGNATURE: u32 = 0x55aa1234;

    /// Serialized size in bytes.
    pub const SIZE: usize = size_of::<Self>();
}

/// VPK directory header, version 2 layout (28 bytes).
///
/// Extends the version 1 header with the sizes of the trailer sections
/// that follow the directory tree. None of the trailer sections are
/// consumed by the decoder.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct HeaderV2 {
    /// Format signature, always [`HeaderV1::SIGNATURE`].
    pub signature: U32,
    /// Format version (2).
    pub version: U32,
    /// Size in bytes of the directory tree.
    pub tree_size: U32,
    /// Bytes of file content embedded in the directory file itself.
    pub file_data_section_size: U32,
    /// Size of the section holding MD5 checksums of external archive content.
    pub archive_md5_section_size: U32,
    /// Size of the section holding MD5 checksums of this file's own sections.
    pub other_md5_section_size: U32,
    /// Size of the public key and signature section.
    pub signature_section_size: U32,
}

impl HeaderV2 {
    /// Serialized size in bytes.
    pub const SIZE: usize = size_of::<Self>();
}

/// Fixed-size record following each filename in the directory tree (18 bytes).
///
/// Immediately after this record come `preload_size` bytes of inline file
/// content; the rest of the file lives at `entry_offset` in the numbered
/// archive chunk `archive_index`.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct DirectoryEntry {
    /// CRC32 of the file content. Reserved, not checked by the decoder.
    pub crc: U32,
    /// Number of inline preload bytes following this record.
    pub preload_size: U16,
    /// Index of the archive chunk holding the file's bulk data.
    pub archive_index: U16,
    /// Byte offset of the bulk data within the archive chunk.
    pub entry_offset: U32,
    /// Size in bytes of the bulk data within the archive chunk.
    pub entry_size: U32,
    /// Record terminator, conventionally [`DirectoryEntry::TERMINATOR`].
    /// Not validated.
    pub terminator: U16,
}

impl DirectoryEntry {
    /// Conventional terminator value.
    pub const TERMINATOR: u16 = 0xFFFF;

    /// Serialized size in bytes.
    pub const SIZE: usize = size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_sizes() {
        assert_eq!(HeaderV1::SIZE, 12);
        assert_eq!(HeaderV2::SIZE, 28);
        assert_eq!(DirectoryEntry::SIZE, 18);
    }

    #[test]
    fn test_directory_entry_decodes_little_endian() {
        let bytes = [
            0x78, 0x56, 0x34, 0x12, // crc
            0x02, 0x00, // preload_size
            0x01, 0x00, // archive_index
            0x0A, 0x00, 0x00, 0x00, // entry_offset
            0x04, 0x00, 0x00, 0x00, // entry_size
            0xFF, 0xFF, // terminator
        ];

        let entry = DirectoryEntry::read_from_bytes(&bytes).unwrap();
        assert_eq!(entry.crc.get(), 0x12345678);
        assert_eq!(entry.preload_size.get(), 2);
        assert_eq!(entry.archive_index.get(), 1);
        assert_eq!(entry.entry_offset.get(), 10);
        assert_eq!(entry.entry_size.get(), 4);
        assert_eq!(entry.terminator.get(), DirectoryEntry::TERMINATOR);
    }
}
