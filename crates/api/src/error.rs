//! Remote Loader Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Transport and mapper errors are kept
//! as children in the error tree; the top frame is always one of the two
//! kinds below.

use derive_more::{Display, Error};

/// A remote loading error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for remote loading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP exchange could not be completed (no route, refused, timed out).
    #[display("connectivity error")]
    Connectivity,
    /// The exchange completed but the response failed validation or decoding.
    #[display("invalid data")]
    InvalidData,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connectivity)
    }
}
