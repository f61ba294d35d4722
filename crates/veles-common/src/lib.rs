//! Common utilities for Veles.
//!
//! This crate provides the foundational pieces shared by the Veles format
//! crates:
//!
//! - [`OffsetView`] - bounds-checked reading from byte slices
//! - [`Error`] / [`Result`] - the common error type carrying read labels
//!
//! Everything here operates on borrowed, externally owned buffers; nothing
//! in this crate performs I/O.

mod error;
mod view;

pub use error::{Error, Result};
pub use view::OffsetView;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
