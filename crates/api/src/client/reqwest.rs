//! [`HttpClient`] implementation backed by `reqwest`.

use super::error::{ErrorKind, Result};
use super::{HttpClient, HttpCompletion, HttpResponse, HttpResult};
use exn::ResultExt;
use feedkit_core::{Task, TaskHandle};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use url::Url;

/// HTTP client running each request as a task on a tokio runtime.
///
/// The completion is invoked from that runtime's worker threads. Cancelling
/// the returned task aborts the spawned request at its next await point; if
/// the request already finished, cancelling does nothing.
///
/// # Examples
///
/// ```no_run
/// use feedkit_api::{RemoteFeedLoader, ReqwestClient};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new(Some(Duration::from_secs(30)))?;
/// let loader = RemoteFeedLoader::feed(Arc::new(client));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ReqwestClient {
    inner: ::reqwest::Client,
    runtime: Handle,
}

impl ReqwestClient {
    /// Create a client spawning onto the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Configuration`](ErrorKind::Configuration) when called
    /// outside of a tokio runtime or when the TLS backend cannot be
    /// initialised.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let runtime = Handle::try_current().or_raise(|| ErrorKind::Configuration)?;
        let mut builder = ::reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().or_raise(|| ErrorKind::Configuration)?;
        Ok(Self { inner, runtime })
    }

    /// Spawn requests onto `runtime` instead of the one current at construction.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = runtime;
        self
    }

    async fn send(client: ::reqwest::Client, url: Url) -> HttpResult {
        let response = classify(client.get(url).send().await)?;
        let metadata = HttpResponse::new(response.url().clone(), response.status().as_u16());
        let body = classify(response.bytes().await)?;
        tracing::debug!(url = %metadata.url, status = metadata.status, bytes = body.len(), "Received HTTP response");
        Ok((body, metadata))
    }
}

fn classify<T>(result: ::reqwest::Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            let kind = if err.is_timeout() {
                ErrorKind::Timeout
            } else if err.is_connect() {
                ErrorKind::Connect
            } else if err.is_body() || err.is_decode() {
                ErrorKind::Body
            } else {
                ErrorKind::Request
            };
            Err(err).or_raise(|| kind)
        },
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &Url, completion: HttpCompletion) -> TaskHandle {
        let client = self.inner.clone();
        let url = url.clone();
        tracing::debug!(url = %url, "Sending HTTP GET");
        let request = self.runtime.spawn(async move {
            let result = Self::send(client, url).await;
            if let Err(err) = &result {
                tracing::warn!(error = ?err, "HTTP exchange failed");
            }
            completion(result);
        });
        Box::new(SpawnedRequest(request.abort_handle()))
    }
}

struct SpawnedRequest(AbortHandle);
impl Task for SpawnedRequest {
    fn cancel(&self) {
        self.0.abort();
    }
}
