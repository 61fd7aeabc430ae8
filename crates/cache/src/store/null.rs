//! Store that keeps nothing.

use super::{FeedImageDataStore, FeedStore, StoreCompletion};
use crate::models::{CachedFeed, LocalFeedImage};
use bytes::Bytes;
use time::OffsetDateTime;
use url::Url;

/// Satisfies both store capabilities without storing anything.
///
/// Every retrieval yields `None` and every insert or delete succeeds, so
/// caching can be switched off without callers noticing anything but misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl FeedStore for NullStore {
    fn retrieve(&self, completion: StoreCompletion<Option<CachedFeed>>) {
        completion(Ok(None));
    }

    fn insert(&self, feed: Vec<LocalFeedImage>, _timestamp: OffsetDateTime, completion: StoreCompletion<()>) {
        tracing::trace!(items = feed.len(), "Discarding feed insert, caching is disabled");
        completion(Ok(()));
    }

    fn delete_cached_feed(&self, completion: StoreCompletion<()>) {
        completion(Ok(()));
    }
}

impl FeedImageDataStore for NullStore {
    fn retrieve_data(&self, _url: &Url, completion: StoreCompletion<Option<Bytes>>) {
        completion(Ok(None));
    }

    fn insert_data(&self, data: Bytes, url: &Url, completion: StoreCompletion<()>) {
        tracing::trace!(url = %url, bytes = data.len(), "Discarding image insert, caching is disabled");
        completion(Ok(()));
    }
}
