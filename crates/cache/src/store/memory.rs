//! In-process store.

use super::{FeedImageDataStore, FeedStore, StoreCompletion};
use crate::models::{CachedFeed, LocalFeedImage};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use time::OffsetDateTime;
use url::Url;

/// Keeps the cached feed and image payloads in memory.
///
/// Both live behind a [`RwLock`] so the store can be shared freely between
/// loaders and threads. Locks are released before any completion runs.
/// Nothing survives the process.
///
/// # Examples
///
/// ```
/// use feedkit_cache::{FeedStore, InMemoryStore};
///
/// let store = InMemoryStore::default();
/// store.retrieve(Box::new(|result| assert_eq!(result.unwrap(), None)));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    feed: RwLock<Option<CachedFeed>>,
    images: RwLock<HashMap<Url, Bytes>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedStore for InMemoryStore {
    fn retrieve(&self, completion: StoreCompletion<Option<CachedFeed>>) {
        let cached = self.feed.read().unwrap_or_else(PoisonError::into_inner).clone();
        completion(Ok(cached));
    }

    fn insert(&self, feed: Vec<LocalFeedImage>, timestamp: OffsetDateTime, completion: StoreCompletion<()>) {
        *self.feed.write().unwrap_or_else(PoisonError::into_inner) = Some(CachedFeed::new(feed, timestamp));
        completion(Ok(()));
    }

    fn delete_cached_feed(&self, completion: StoreCompletion<()>) {
        self.feed.write().unwrap_or_else(PoisonError::into_inner).take();
        completion(Ok(()));
    }
}

impl FeedImageDataStore for InMemoryStore {
    fn retrieve_data(&self, url: &Url, completion: StoreCompletion<Option<Bytes>>) {
        let data = self.images.read().unwrap_or_else(PoisonError::into_inner).get(url).cloned();
        completion(Ok(data));
    }

    fn insert_data(&self, data: Bytes, url: &Url, completion: StoreCompletion<()>) {
        self.images
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.clone(), data);
        completion(Ok(()));
    }
}
