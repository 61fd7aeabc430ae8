//! Composition Error Types

use derive_more::{Display, Error};

/// A composition error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for composition.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("configuration is not usable")]
    Config,
    #[display("failed to build the HTTP client")]
    Client,
}
