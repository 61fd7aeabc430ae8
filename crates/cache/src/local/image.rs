//! Cache-backed image data loader.

use crate::error::{Error, ErrorKind, Result};
use crate::store::{ImageStoreHandle, error::Result as StoreResult};
use bytes::Bytes;
use exn::ResultExt;
use feedkit_core::{Completion, InertTask, Loader, TaskHandle};
use url::Url;

/// Serves image payloads from a [`FeedImageDataStore`](crate::FeedImageDataStore).
///
/// Unlike the feed, cached image bytes never expire. Store lookups are not
/// cancellable, so the returned task is inert.
#[derive(Clone)]
pub struct LocalImageDataLoader {
    store: ImageStoreHandle,
}

impl LocalImageDataLoader {
    pub fn new(store: ImageStoreHandle) -> Self {
        Self { store }
    }

    /// Store `data` as the payload for `url`.
    pub fn save(&self, data: Bytes, url: &Url, completion: Completion<(), Error>) {
        let saved = url.clone();
        tracing::debug!(url = %url, bytes = data.len(), "Caching image data");
        self.store.insert_data(
            data,
            url,
            Box::new(move |result| {
                let result = result.or_raise(|| ErrorKind::Failed);
                if let Err(err) = &result {
                    tracing::warn!(url = %saved, error = ?err, "Failed to cache image data");
                }
                completion(result);
            }),
        );
    }

    fn map(result: StoreResult<Option<Bytes>>) -> Result<Bytes> {
        match result.or_raise(|| ErrorKind::Failed)? {
            Some(data) => Ok(data),
            None => exn::bail!(ErrorKind::NotFound),
        }
    }
}

impl Loader for LocalImageDataLoader {
    type Output = Bytes;
    type Error = Error;

    fn load(&self, url: &Url, completion: Completion<Bytes, Error>) -> TaskHandle {
        let requested = url.clone();
        tracing::debug!(url = %url, "Loading cached image data");
        self.store.retrieve_data(
            url,
            Box::new(move |result| {
                let result = Self::map(result);
                if let Err(err) = &result
                    && **err == ErrorKind::Failed
                {
                    tracing::warn!(url = %requested, error = ?err, "Image data store failed");
                }
                completion(result);
            }),
        );
        Box::new(InertTask)
    }
}
