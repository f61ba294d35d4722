//! Error types for veles-common.

use thiserror::Error;

/// Common error type for buffer-view operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A read would touch bytes outside the underlying buffer.
    ///
    /// `label` names the logical field that was being read and is the
    /// primary diagnostic for malformed input.
    #[error("out-of-bounds read of {label}: {needed} bytes at offset {offset}, buffer is {buffer_len} bytes")]
    OutOfBounds {
        label: &'static str,
        offset: usize,
        needed: usize,
        buffer_len: usize,
    },

    /// UTF-8 decoding error.
    #[error("UTF-8 error in {label}: {source}")]
    Utf8 {
        label: &'static str,
        source: std::str::Utf8Error,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
