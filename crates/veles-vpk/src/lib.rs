//! VPK directory decoder for Source engine pack files.
//!
//! A VPK package splits its content between a directory file and numbered
//! archive chunks. The directory stores, for every file, a metadata record
//! and an optional inline "preload" blob; the bulk of the content lives in
//! the archive chunks. This crate decodes the directory from an in-memory
//! byte buffer into a case-insensitive hierarchical index and resolves file
//! contents against caller-supplied archive bytes:
//!
//! - Directory format versions 1 and 2
//! - Case-insensitive lookups and directory listing
//! - Preload bytes transparently prepended by [`Vpk::read_file`]
//!
//! Opening files on disk and reading archive chunks are deliberately left
//! to the caller; the decoder only ever sees byte buffers, and archive
//! bytes are returned as stored (no decompression).
//!
//! # Example
//!
//! ```no_run
//! use veles_vpk::Vpk;
//!
//! # fn load_directory() -> Vec<u8> { Vec::new() }
//! let data = load_directory();
//! let vpk = Vpk::from_bytes(&data)?;
//!
//! if vpk.file_exists("materials/concrete/floor.vmt") {
//!     let contents = vpk.read_file("materials/concrete/floor.vmt", |archive_index, offset, size| {
//!         // hand back `size` bytes at `offset` from the numbered archive chunk
//!         Ok(vec![0; size as usize])
//!     })?;
//! }
//! # Ok::<(), veles_vpk::Error>(())
//! ```

mod entry;
mod error;
mod format;
mod path;
mod vpk;

pub use entry::VpkEntry;
pub use error::{Error, Result};
pub use format::{DirectoryEntry, HeaderV1, HeaderV2};
pub use vpk::{DirectoryContents, Vpk};
