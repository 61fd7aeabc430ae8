//! Generic remote loader.

use crate::client::{ClientHandle, HttpResponse, HttpResult};
use crate::error::{Error, ErrorKind, Result};
use crate::mapper;
use bytes::Bytes;
use exn::ResultExt;
use feedkit_core::{CancellableTask, Completion, FeedImage, ImageComment, Loader, TaskHandle};
use std::sync::{Arc, Weak};
use url::Url;

type Mapper<T> = dyn Fn(Bytes, &HttpResponse) -> mapper::Result<T> + Send + Sync;

struct Shared<T> {
    client: ClientHandle,
    mapper: Box<Mapper<T>>,
}
impl<T> Shared<T> {
    fn map(&self, result: HttpResult) -> Result<T> {
        let (data, response) = result.or_raise(|| ErrorKind::Connectivity)?;
        (self.mapper)(data, &response).or_raise(|| ErrorKind::InvalidData)
    }
}

/// Loads a `T` from a URL through an [`HttpClient`](crate::HttpClient).
///
/// Validation and decoding are delegated to the mapping function supplied at
/// construction (see [`mapper`]), which keeps this type ignorant of any
/// particular resource.
///
/// In-flight requests hold only a weak reference to the loader: if every
/// clone of the loader is dropped before a response arrives, the response is
/// discarded and the completion is never invoked.
///
/// # Examples
///
/// ```no_run
/// use feedkit_api::{ClientHandle, RemoteFeedLoader};
/// use feedkit_core::LoaderExt;
/// use url::Url;
///
/// async fn feed_size(client: ClientHandle) -> usize {
///     let loader = RemoteFeedLoader::feed(client);
///     let url = Url::parse("https://api.example.com/v1/feed").unwrap();
///     match loader.fetch(&url).await {
///         Some(Ok(feed)) => feed.len(),
///         _ => 0,
///     }
/// }
/// ```
pub struct RemoteLoader<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for RemoteLoader<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> RemoteLoader<T> {
    pub fn new(
        client: ClientHandle,
        mapper: impl Fn(Bytes, &HttpResponse) -> mapper::Result<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                client,
                mapper: Box::new(mapper),
            }),
        }
    }

    fn deliver(loader: &Weak<Shared<T>>, task: &CancellableTask<T, Error>, url: &Url, result: HttpResult) {
        let Some(loader) = loader.upgrade() else {
            tracing::trace!(url = %url, "Remote loader dropped before the response arrived; discarding");
            task.discard();
            return;
        };
        let result = loader.map(result);
        if let Err(err) = &result {
            tracing::warn!(url = %url, error = ?err, "Remote load failed");
        }
        task.complete(result);
    }
}

impl RemoteLoader<Vec<FeedImage>> {
    /// Loader for the feed list, using [`mapper::feed::map`].
    pub fn feed(client: ClientHandle) -> Self {
        Self::new(client, mapper::feed::map)
    }
}

impl RemoteLoader<Vec<ImageComment>> {
    /// Loader for an image's comments, using [`mapper::comments::map`].
    pub fn image_comments(client: ClientHandle) -> Self {
        Self::new(client, mapper::comments::map)
    }
}

impl RemoteLoader<Bytes> {
    /// Loader for image payloads, using [`mapper::image::map`].
    pub fn image_data(client: ClientHandle) -> Self {
        Self::new(client, mapper::image::map)
    }
}

impl<T: Send + 'static> Loader for RemoteLoader<T> {
    type Output = T;
    type Error = Error;

    fn load(&self, url: &Url, completion: Completion<T, Error>) -> TaskHandle {
        let task = Arc::new(CancellableTask::new(completion));
        let loader = Arc::downgrade(&self.shared);
        let pending = Arc::clone(&task);
        let requested = url.clone();
        tracing::debug!(url = %url, "Loading remote resource");
        let transport = self
            .shared
            .client
            .get(url, Box::new(move |result| Self::deliver(&loader, &pending, &requested, result)));
        task.attach(transport);
        Box::new(task)
    }
}
