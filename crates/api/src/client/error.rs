//! Error types for the [`client`](super) module.
//!
//! Uses [`exn`] for automatic location tracking and error tree construction.

use derive_more::{Display, Error};

/// A transport error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies why an HTTP exchange did not complete.
///
/// A response with a non-success status code is *not* a transport error;
/// it is delivered as a regular response and judged by the mappers.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No connection could be established with the host.
    #[display("connection failed")]
    Connect,
    /// The exchange took longer than the configured timeout.
    #[display("request timed out")]
    Timeout,
    /// The request could not be built or sent.
    #[display("request failed")]
    Request,
    /// The response body could not be read to the end.
    #[display("failed to read response body")]
    Body,
    /// The client could not be constructed (TLS backend, missing runtime).
    #[display("client configuration error")]
    Configuration,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connect | Self::Timeout | Self::Body)
    }
}
