//! VPK directory decoding and queries.

use std::collections::{BTreeMap, BTreeSet};
use std::io;

use tracing::{debug, trace};
use veles_common::OffsetView;

use crate::format::{DirectoryEntry, HeaderV1, HeaderV2};
use crate::path;
use crate::{Error, Result, VpkEntry};

type FilenameMap = BTreeMap<String, VpkEntry>;
type DirectoryMap = BTreeMap<String, FilenameMap>;

/// Subdirectories and files of one directory level inside a VPK.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryContents {
    /// Subdirectories of the listed directory.
    pub directories: Vec<String>,
    /// Files in the listed directory.
    pub files: Vec<String>,
}

/// A decoded VPK directory.
///
/// Built once from a byte buffer by [`Vpk::from_bytes`]; read-only
/// afterwards, so it can be shared freely across threads. Lookups are
/// case-insensitive at every path level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vpk {
    /// File metadata by extension (with leading dot), then directory, then
    /// filename. Keys are ASCII-lowercased.
    files: BTreeMap<String, DirectoryMap>,
}

impl Vpk {
    /// Decode a VPK directory from a byte buffer.
    ///
    /// The buffer is only borrowed for the duration of decoding; every
    /// retained string and preload blob is copied out. Decoding is
    /// all-or-nothing: any malformed or out-of-range read aborts with an
    /// error and no partially built directory is observable.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let view = OffsetView::new(data);
        let (header, _) = view.read_struct::<HeaderV1>(0, "VPK header")?;

        if header.signature.get() != HeaderV1::SIGNATURE {
            return Err(Error::InvalidHeader {
                expected: HeaderV1::SIGNATURE,
                actual: header.signature.get(),
            });
        }

        let version = header.version.get();
        let header_size = match version {
            1 => HeaderV1::SIZE,
            2 => HeaderV2::SIZE,
            other => return Err(Error::UnsupportedVersion(other)),
        };
        trace!(version, header_size, "parsed VPK directory header");

        let mut files: BTreeMap<String, DirectoryMap> = BTreeMap::new();
        let mut file_count = 0usize;

        // The directory tree starts immediately after the header; the
        // cursor only ever moves forward from there. An empty string ends
        // the loop at each nesting level.
        let tree = view.with_offset(header_size);
        let mut cursor = 0usize;

        loop {
            let extension = tree.read_cstr(cursor, "extension name")?;
            cursor += extension.len() + 1;
            if extension.is_empty() {
                break;
            }

            // Keys carry the leading dot so lookups can use ordinary
            // path extension semantics.
            let directories = files
                .entry(format!(".{}", extension.to_ascii_lowercase()))
                .or_default();

            loop {
                let directory = tree.read_cstr(cursor, "directory name")?;
                cursor += directory.len() + 1;
                if directory.is_empty() {
                    break;
                }

                let filenames = directories.entry(directory.to_ascii_lowercase()).or_default();

                loop {
                    let filename = tree.read_cstr(cursor, "file name")?;
                    cursor += filename.len() + 1;
                    if filename.is_empty() {
                        break;
                    }

                    let (record, _) =
                        tree.read_struct::<DirectoryEntry>(cursor, "directory entry record")?;
                    cursor += DirectoryEntry::SIZE;

                    let preload =
                        tree.read_bytes(cursor, record.preload_size.get() as usize, "preload data")?;
                    cursor += preload.len();

                    let entry = VpkEntry::new(
                        record.archive_index.get(),
                        record.entry_offset.get(),
                        record.entry_size.get(),
                        preload.to_vec(),
                    );
                    if filenames.insert(filename.to_ascii_lowercase(), entry).is_some() {
                        return Err(Error::InvalidBody(format!(
                            "duplicate file {directory}/{filename}.{extension}"
                        )));
                    }
                    file_count += 1;
                }
            }
        }

        debug!(files = file_count, "decoded VPK directory tree");
        Ok(Self { files })
    }

    /// Check whether a file exists, case-insensitively.
    #[inline]
    pub fn file_exists(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Look up the metadata for a file.
    pub fn metadata(&self, path: &str) -> Result<&VpkEntry> {
        self.find(path)
            .ok_or_else(|| Error::FileNotFound(path.to_string()))
    }

    /// Inline preload bytes of a file.
    pub fn preload_data(&self, path: &str) -> Result<&[u8]> {
        self.metadata(path).map(VpkEntry::preload_data)
    }

    /// Total number of files in the directory.
    pub fn file_count(&self) -> usize {
        self.files
            .values()
            .flat_map(DirectoryMap::values)
            .map(FilenameMap::len)
            .sum()
    }

    /// Read a file's full contents.
    ///
    /// `read_from_archive` receives the stored `(archive_index, offset,
    /// size)` coordinates and returns the archive-resident bytes as stored;
    /// it is invoked exactly once. The result is the preload bytes followed
    /// by the archive bytes. Callback errors propagate unmodified.
    pub fn read_file<F>(&self, path: &str, read_from_archive: F) -> Result<Vec<u8>>
    where
        F: FnOnce(u16, u32, u32) -> io::Result<Vec<u8>>,
    {
        let entry = self.metadata(path)?;
        let archive_data = read_from_archive(entry.archive_index(), entry.offset(), entry.size())?;

        let mut contents = Vec::with_capacity(entry.total_size());
        contents.extend_from_slice(entry.preload_data());
        contents.extend_from_slice(&archive_data);
        Ok(contents)
    }

    /// List the subdirectories and files directly under `path`.
    ///
    /// The path is normalized and case-folded first; `""`, `"/"`, and
    /// `"\"` all name the root. Results are sorted and deduplicated.
    /// Returns `None` when the path has neither files nor subdirectories —
    /// the format stores no empty directories, so such a path does not
    /// exist in the package.
    pub fn list(&self, path: &str) -> Option<DirectoryContents> {
        let base = path::normalize(path).to_ascii_lowercase();

        let mut directories = BTreeSet::new();
        let mut files = BTreeSet::new();

        for (extension, dirs) in &self.files {
            for (directory, entries) in dirs {
                let dir_path = path::normalize(directory);
                if is_direct_child_of(&dir_path, &base) {
                    directories.insert(path::file_name(&dir_path).to_string());
                } else if dir_path == base {
                    files.extend(entries.keys().map(|name| format!("{name}{extension}")));
                }
            }
        }

        directories.remove("");
        if directories.is_empty() && files.is_empty() {
            return None;
        }

        Some(DirectoryContents {
            directories: directories.into_iter().collect(),
            files: files.into_iter().collect(),
        })
    }

    fn find(&self, path: &str) -> Option<&VpkEntry> {
        let parts = path::split(path);
        self.files
            .get(&parts.extension)?
            .get(&parts.directory)?
            .get(&parts.filename)
    }
}

/// Whether `path` is a direct child of `base`; the empty base is the root.
fn is_direct_child_of(path: &str, base: &str) -> bool {
    if base.is_empty() {
        path::parent(path).is_empty()
    } else {
        path::parent(path) == base
    }
}
