//! Store capabilities and implementations.
//!
//! Stores are callback based like every other capability in the workspace:
//! each operation takes a completion and invokes it exactly once, on
//! whichever thread the store chooses (the bundled stores complete
//! synchronously, before the call returns).
//!
//! Stores know nothing about expiry. A [`FeedStore`] holds at most one
//! [`CachedFeed`] and hands it back as-is; deciding whether it is still
//! usable is the [`LocalFeedLoader`](crate::LocalFeedLoader)'s job.

pub mod error;
mod memory;
mod null;

pub use self::memory::InMemoryStore;
pub use self::null::NullStore;
use crate::models::{CachedFeed, LocalFeedImage};
use bytes::Bytes;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// Callback receiving the outcome of a store operation.
pub type StoreCompletion<T> = Box<dyn FnOnce(error::Result<T>) + Send + 'static>;
pub type FeedStoreHandle = Arc<dyn FeedStore>;
pub type ImageStoreHandle = Arc<dyn FeedImageDataStore>;

/// Persistence for the single cached feed snapshot.
///
/// Implementations must honour the following contract:
/// - `retrieve` has no side effects and yields `None` while nothing is cached.
/// - `insert` replaces any previously cached feed.
/// - `delete_cached_feed` empties the store, and succeeds when already empty.
pub trait FeedStore: Send + Sync {
    fn retrieve(&self, completion: StoreCompletion<Option<CachedFeed>>);
    fn insert(&self, feed: Vec<LocalFeedImage>, timestamp: OffsetDateTime, completion: StoreCompletion<()>);
    fn delete_cached_feed(&self, completion: StoreCompletion<()>);
}

/// Persistence for image payloads, keyed by the URL they were loaded from.
pub trait FeedImageDataStore: Send + Sync {
    /// Yields `None` when nothing is stored for `url`.
    fn retrieve_data(&self, url: &Url, completion: StoreCompletion<Option<Bytes>>);
    /// Stores `data` for `url`, replacing what was there.
    fn insert_data(&self, data: Bytes, url: &Url, completion: StoreCompletion<()>);
}
