//! HTTP client capability.
//!
//! Loaders never talk to a concrete HTTP library; they depend on the
//! [`HttpClient`] trait, which performs a single GET and reports back through
//! a completion callback. Implementations decide on which thread the
//! completion runs and must invoke it at most once per request.

pub mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(feature = "reqwest")]
mod reqwest;

#[cfg(any(test, feature = "mock"))]
pub use self::mock::HttpClientSpy;
#[cfg(feature = "reqwest")]
pub use self::reqwest::ReqwestClient;
use bytes::Bytes;
use feedkit_core::{Completion, TaskHandle};
use std::sync::Arc;
use url::Url;

/// Outcome of a GET: the body and status metadata, or a transport failure.
pub type HttpResult = std::result::Result<(Bytes, HttpResponse), error::Error>;
/// Callback receiving an [`HttpResult`].
pub type HttpCompletion = Completion<(Bytes, HttpResponse), error::Error>;
/// Shared, type-erased HTTP client.
pub type ClientHandle = Arc<dyn HttpClient>;

/// Status metadata of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Final URL of the response, after redirects.
    pub url: Url,
    pub status: u16,
}
impl HttpResponse {
    pub fn new(url: Url, status: u16) -> Self {
        Self { url, status }
    }

    /// Exactly `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Anywhere in `200..300`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP GET requests.
///
/// # Contract
/// - `completion` is invoked at most once.
/// - Any response that arrives, whatever its status code, is delivered as
///   `Ok`; only failures to complete the exchange are `Err`.
/// - Cancelling the returned task is best-effort. Callers that need a hard
///   guarantee wrap it in a [`CancellableTask`](feedkit_core::CancellableTask).
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &Url, completion: HttpCompletion) -> TaskHandle;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn response(status: u16) -> HttpResponse {
        HttpResponse::new(Url::parse("https://a-url.com").unwrap(), status)
    }

    #[rstest]
    #[case(199, false, false)]
    #[case(200, true, true)]
    #[case(201, false, true)]
    #[case(299, false, true)]
    #[case(300, false, false)]
    #[case(404, false, false)]
    #[case(500, false, false)]
    fn test_status_classification(#[case] status: u16, #[case] ok: bool, #[case] success: bool) {
        assert_eq!(response(status).is_ok(), ok);
        assert_eq!(response(status).is_success(), success);
    }
}
