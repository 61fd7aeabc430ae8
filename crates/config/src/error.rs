//! Configuration Error Types

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found")]
    NotFound,
    /// The file extension does not name a supported format.
    #[display("unsupported configuration format")]
    UnsupportedFormat,
    /// A source could not be parsed or did not fit the configuration schema.
    #[display("failed to read configuration")]
    Extract,
    /// Parsed fine, but a value is unusable.
    #[display("invalid configuration: {_0}")]
    Invalid(#[error(not(source))] &'static str),
}
