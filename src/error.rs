// src/error.rs

use std::io;
use thiserror::Error;

/// Failures the ring buffer and the pump treat as exceptional.
///
/// Overflow and underflow are not in here: they are ordinary outcomes
/// reported through return values.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage for the requested capacity could not be allocated.
    #[error("unable to allocate ring storage for capacity {requested}")]
    Allocation { requested: usize },
    /// A bound region cannot hold a ring (it needs at least one byte).
    #[error("cannot bind a ring buffer over a region of {len} bytes")]
    InvalidRegion { len: usize },
    /// `destroy` was asked to free memory the buffer only borrows.
    #[error("ring buffer does not own its storage")]
    NotOwner,
    /// A single-byte read found nothing to read.
    #[error("ring buffer is empty")]
    Empty,
    /// A stream or file operation failed; carries the OS error unchanged.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Settings that cannot drive a pump run.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Maps the error to the process exit status used by `ringpump`.
    pub fn to_status_code(&self) -> i32 {
        match self {
            Error::Io(_) => 1,
            Error::Config(_) => 2,
            Error::Allocation { .. } => 3,
            Error::InvalidRegion { .. } | Error::NotOwner | Error::Empty => 4,
        }
    }
}
