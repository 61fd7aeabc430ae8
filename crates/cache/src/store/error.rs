//! Error types for the [`store`](super) module.

use derive_more::{Display, Error};

/// A store error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which store operation failed.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("failed to retrieve from store")]
    Retrieval,
    #[display("failed to insert into store")]
    Insertion,
    #[display("failed to delete from store")]
    Deletion,
}
