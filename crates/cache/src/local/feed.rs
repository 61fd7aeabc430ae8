//! Cache-backed feed loader.

use crate::error::{Error, ErrorKind, Result};
use crate::models::{CachedFeed, LocalFeedImage};
use crate::policy::CachePolicy;
use crate::store::{FeedStoreHandle, error::Result as StoreResult};
use exn::ResultExt;
use feedkit_core::{Completion, FeedImage};
use std::sync::{Arc, Weak};
use time::OffsetDateTime;

type Clock = dyn Fn() -> OffsetDateTime + Send + Sync;

#[derive(Clone)]
struct Shared {
    store: FeedStoreHandle,
    clock: Arc<Clock>,
    policy: CachePolicy,
}

impl Shared {
    fn is_fresh(&self, cached: &CachedFeed) -> bool {
        self.policy.validate(cached.timestamp, (self.clock)())
    }

    fn cache(self: &Arc<Self>, feed: Vec<LocalFeedImage>, completion: Completion<(), Error>) {
        let loader = Arc::downgrade(self);
        self.store.insert(
            feed,
            (self.clock)(),
            Box::new(move |result| {
                if loader.upgrade().is_none() {
                    tracing::trace!("Feed loader dropped before the insert completed; discarding");
                    return;
                }
                completion(result.or_raise(|| ErrorKind::Failed).inspect_err(|err| {
                    tracing::warn!(error = ?err, "Failed to insert feed into cache");
                }));
            }),
        );
    }

    fn delete(&self, loader: Weak<Self>, completion: Completion<(), Error>) {
        self.store.delete_cached_feed(Box::new(move |result| {
            if loader.upgrade().is_none() {
                tracing::trace!("Feed loader dropped before the delete completed; discarding");
                return;
            }
            completion(result.or_raise(|| ErrorKind::Failed).inspect_err(|err| {
                tracing::warn!(error = ?err, "Failed to delete cached feed");
            }));
        }));
    }

    fn interpret(&self, result: StoreResult<Option<CachedFeed>>) -> Result<Vec<FeedImage>> {
        match result.or_raise(|| ErrorKind::Failed)? {
            Some(cached) if self.is_fresh(&cached) => Ok(cached.feed.into_iter().map(FeedImage::from).collect()),
            Some(_) => {
                tracing::debug!("Cached feed expired");
                Ok(Vec::new())
            },
            None => Ok(Vec::new()),
        }
    }
}

/// Saves, loads and validates the cached feed snapshot.
///
/// Expiry is decided here, not in the store: a snapshot is served while the
/// [`CachePolicy`] considers it fresh, and an expired snapshot reads as an
/// empty feed until [`validate_cache()`](Self::validate_cache) deletes it.
///
/// Store completions hold only a weak reference to the loader. If every
/// clone of the loader is dropped before the store answers, the answer is
/// discarded, no follow-up store operation is made, and the completion is
/// never invoked.
///
/// # Examples
///
/// ```
/// use feedkit_cache::{InMemoryStore, LocalFeedLoader};
/// use std::sync::Arc;
///
/// let loader = LocalFeedLoader::new(Arc::new(InMemoryStore::new()));
/// loader.save(&[], Box::new(|result| assert!(result.is_ok())));
/// loader.load(Box::new(|result| assert_eq!(result.unwrap(), vec![])));
/// ```
#[derive(Clone)]
pub struct LocalFeedLoader {
    shared: Arc<Shared>,
}

impl LocalFeedLoader {
    /// Loader using the wall clock and the default [`CachePolicy`].
    pub fn new(store: FeedStoreHandle) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                clock: Arc::new(OffsetDateTime::now_utc),
                policy: CachePolicy::default(),
            }),
        }
    }

    /// Replace the source of "now", used for both save timestamps and expiry.
    pub fn with_clock(self, clock: impl Fn() -> OffsetDateTime + Send + Sync + 'static) -> Self {
        let mut shared = Shared::clone(&self.shared);
        shared.clock = Arc::new(clock);
        Self { shared: Arc::new(shared) }
    }

    pub fn with_policy(self, policy: CachePolicy) -> Self {
        let mut shared = Shared::clone(&self.shared);
        shared.policy = policy;
        Self { shared: Arc::new(shared) }
    }

    /// Replace the cached feed with `feed`, stamped with the current time.
    ///
    /// The previous snapshot is deleted first; the insert is not attempted
    /// if deletion fails.
    pub fn save(&self, feed: &[FeedImage], completion: Completion<(), Error>) {
        let feed: Vec<LocalFeedImage> = feed.iter().map(LocalFeedImage::from).collect();
        let loader = Arc::downgrade(&self.shared);
        tracing::debug!(items = feed.len(), "Saving feed to cache");
        self.shared.delete(
            Weak::clone(&loader),
            Box::new(move |result| match (result, loader.upgrade()) {
                (Ok(()), Some(shared)) => shared.cache(feed, completion),
                (Err(err), _) => completion(Err(err)),
                (Ok(()), None) => {},
            }),
        );
    }

    /// Deliver the cached feed if it is still fresh, an empty feed otherwise.
    pub fn load(&self, completion: Completion<Vec<FeedImage>, Error>) {
        let loader = Arc::downgrade(&self.shared);
        tracing::debug!("Loading feed from cache");
        self.shared.store.retrieve(Box::new(move |result| {
            let Some(shared) = loader.upgrade() else {
                tracing::trace!("Feed loader dropped before the cache was read; discarding");
                return;
            };
            let result = shared.interpret(result);
            if let Err(err) = &result {
                tracing::warn!(error = ?err, "Failed to read cached feed");
            }
            completion(result);
        }));
    }

    /// Delete the cached feed if it cannot be read or has expired.
    ///
    /// Delivers the deletion outcome when a deletion was needed, success
    /// otherwise.
    pub fn validate_cache(&self, completion: Completion<(), Error>) {
        let loader = Arc::downgrade(&self.shared);
        self.shared.store.retrieve(Box::new(move |result| {
            let Some(shared) = loader.upgrade() else {
                tracing::trace!("Feed loader dropped before the cache was read; discarding");
                return;
            };
            match result {
                Ok(None) => completion(Ok(())),
                Ok(Some(cached)) if shared.is_fresh(&cached) => completion(Ok(())),
                Ok(Some(_)) => {
                    tracing::debug!("Deleting expired feed cache");
                    shared.delete(loader, completion);
                },
                Err(err) => {
                    tracing::warn!(error = ?err, "Cached feed unreadable; deleting it");
                    shared.delete(loader, completion);
                },
            }
        }));
    }
}
