//! Composition root.
//!
//! [`Composer`] is the one place that knows about every crate in the
//! workspace. It reads a validated [`Config`], builds the HTTP client and the
//! cache store, and hands out loaders wired to them. Everything else depends
//! on capabilities only.

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use feedkit_api::{
    ClientHandle, RemoteFeedLoader, RemoteImageCommentsLoader, RemoteImageDataLoader, ReqwestClient,
};
use feedkit_cache::store::{FeedStoreHandle, ImageStoreHandle};
use feedkit_cache::{CachePolicy, InMemoryStore, LocalFeedLoader, LocalImageDataLoader, NullStore};
use feedkit_config::Config;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

/// Builds configured loaders.
///
/// All loaders handed out by one composer share its HTTP client and its
/// store, so an image saved through one [`LocalImageDataLoader`] is visible
/// to every other.
///
/// # Examples
///
/// ```no_run
/// use feedkit_app::Composer;
/// use feedkit_config::Config;
/// use feedkit_core::LoaderExt;
///
/// # async fn run() {
/// let Ok(config) = Config::load() else { return };
/// let Ok(composer) = Composer::new(config) else { return };
/// let feed = composer.remote_feed_loader().fetch(&composer.feed_url()).await;
/// # }
/// ```
pub struct Composer {
    base_url: Url,
    policy: CachePolicy,
    client: ClientHandle,
    feed_store: FeedStoreHandle,
    image_store: ImageStoreHandle,
}

impl Composer {
    /// Compose with a `reqwest` client on the current tokio runtime.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().or_raise(|| ErrorKind::Config)?;
        let client = ReqwestClient::new(Some(config.api.timeout())).or_raise(|| ErrorKind::Client)?;
        Self::assemble(config, Arc::new(client))
    }

    /// Compose around an existing HTTP client.
    pub fn with_client(config: Config, client: ClientHandle) -> Result<Self> {
        config.validate().or_raise(|| ErrorKind::Config)?;
        Self::assemble(config, client)
    }

    // Expects a validated configuration.
    fn assemble(config: Config, client: ClientHandle) -> Result<Self> {
        let Some(base_url) = config.api.base_url else {
            exn::bail!(ErrorKind::Config);
        };
        let policy = CachePolicy::new(time::Duration::days(i64::from(config.cache.max_age_days)));
        let (feed_store, image_store) = if config.cache.enabled {
            let store = Arc::new(InMemoryStore::new());
            (Arc::clone(&store) as FeedStoreHandle, store as ImageStoreHandle)
        } else {
            tracing::info!("Caching disabled; cache lookups will always miss");
            (Arc::new(NullStore) as FeedStoreHandle, Arc::new(NullStore) as ImageStoreHandle)
        };
        tracing::debug!(base_url = %base_url, cache = config.cache.enabled, "Composed loaders");
        Ok(Self {
            base_url,
            policy,
            client,
            feed_store,
            image_store,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only fails for URLs that cannot be a base, which validation rejects.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `<base>/v1/feed`
    pub fn feed_url(&self) -> Url {
        self.endpoint(&["v1", "feed"])
    }

    /// `<base>/v1/image/<id>/comments`
    pub fn comments_url(&self, image: Uuid) -> Url {
        self.endpoint(&["v1", "image", &image.to_string(), "comments"])
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn remote_feed_loader(&self) -> RemoteFeedLoader {
        RemoteFeedLoader::feed(Arc::clone(&self.client))
    }

    pub fn remote_image_loader(&self) -> RemoteImageDataLoader {
        RemoteImageDataLoader::image_data(Arc::clone(&self.client))
    }

    pub fn comments_loader(&self) -> RemoteImageCommentsLoader {
        RemoteImageCommentsLoader::image_comments(Arc::clone(&self.client))
    }

    pub fn local_feed_loader(&self) -> LocalFeedLoader {
        LocalFeedLoader::new(Arc::clone(&self.feed_store)).with_policy(self.policy)
    }

    pub fn local_image_loader(&self) -> LocalImageDataLoader {
        LocalImageDataLoader::new(Arc::clone(&self.image_store))
    }
}
