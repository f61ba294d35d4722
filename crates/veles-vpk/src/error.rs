//! Error types for the VPK crate.

use thiserror::Error;

/// Errors that can occur when decoding or querying VPK directories.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from an archive-reader callback.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error (bounds checks and string decoding).
    #[error("{0}")]
    Common(#[from] veles_common::Error),

    /// VPK signature mismatch.
    #[error("invalid VPK signature: expected {expected:#010x}, got {actual:#010x}")]
    InvalidHeader { expected: u32, actual: u32 },

    /// Unsupported VPK version.
    #[error("unsupported VPK version {0} (supported versions are 1 and 2)")]
    UnsupportedVersion(u32),

    /// Structural inconsistency in the directory tree.
    #[error("invalid VPK body: {0}")]
    InvalidBody(String),

    /// Checksum mismatch in a version 2 trailer section.
    ///
    /// Reserved for callers that validate the v2 checksum sections; the
    /// decoder itself never produces it.
    #[error("checksum mismatch in {0} section")]
    InvalidChecksum(&'static str),

    /// Lookup path not present in the directory.
    #[error("file not found: {0}")]
    FileNotFound(String),
}

/// Result type for VPK operations.
pub type Result<T> = std::result::Result<T, Error>;
