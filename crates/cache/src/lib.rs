//! Cache-backed loaders and the store capabilities they depend on.
//!
//! The cache never touches the network. It serves previously saved data, or
//! reports that it has none, through its own error vocabulary
//! ([`Failed`](error::ErrorKind::Failed), [`NotFound`](error::ErrorKind::NotFound)).
//! Persistence itself is somebody else's problem: loaders talk to the
//! [`FeedStore`] and [`FeedImageDataStore`] traits only.
//!
//! # Architecture
//! - **Stores**: [`InMemoryStore`] keeps everything in process memory,
//!   [`NullStore`] keeps nothing and succeeds at everything (for running
//!   without a cache, without special-casing callers).
//! - **Loaders**: [`LocalFeedLoader`] saves, loads and validates the feed
//!   snapshot under a [`CachePolicy`]; [`LocalImageDataLoader`] serves image
//!   bytes keyed by URL and never expires them.

pub mod error;
mod local;
mod models;
mod policy;
pub mod store;
#[cfg(test)]
mod test_helpers;

pub use crate::local::{LocalFeedLoader, LocalImageDataLoader};
pub use crate::models::{CachedFeed, LocalFeedImage};
pub use crate::policy::CachePolicy;
pub use crate::store::{FeedImageDataStore, FeedStore, InMemoryStore, NullStore};
