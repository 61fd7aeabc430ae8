//! Error types for the [`mapper`](super) module.

use derive_more::{Display, Error};

/// A mapping error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for mapping operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a response was rejected.
///
/// All of these surface as [`InvalidData`](crate::error::ErrorKind::InvalidData)
/// from the remote loader; the distinction is kept in the error tree for
/// diagnostics.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Status code outside the range accepted for the resource.
    #[display("unexpected status code: {_0}")]
    UnexpectedStatus(#[error(not(source))] u16),
    /// Success status but no body where one is required.
    #[display("empty payload")]
    EmptyPayload,
    /// Body does not match the wire schema.
    #[display("malformed payload")]
    Malformed,
}
