//! Recording HTTP client for testing.

use super::error::ErrorKind;
use super::{HttpClient, HttpCompletion, HttpResponse};
use bytes::Bytes;
use feedkit_core::{Task, TaskHandle};
use std::sync::{Arc, Mutex};
use url::Url;

struct Request {
    url: Url,
    completion: Option<HttpCompletion>,
}

/// HTTP client that records every request and completes nothing on its own.
///
/// Tests drive the exchange by calling [`complete_with_status()`](Self::complete_with_status)
/// or [`complete_with_error()`](Self::complete_with_error) for the request at
/// a given index, after asserting whatever they need about the state in
/// between. Cancellations through the returned task are recorded too.
#[derive(Default)]
pub struct HttpClientSpy {
    requests: Mutex<Vec<Request>>,
    cancelled: Arc<Mutex<Vec<Url>>>,
}

impl HttpClientSpy {
    /// URLs of every request received, in order.
    pub fn requested_urls(&self) -> Vec<Url> {
        self.requests.lock().unwrap().iter().map(|request| request.url.clone()).collect()
    }

    /// URLs of every request whose task was cancelled, in order.
    pub fn cancelled_urls(&self) -> Vec<Url> {
        self.cancelled.lock().unwrap().clone()
    }

    /// Deliver a response with `status` and `data` to request `index`.
    pub fn complete_with_status(&self, status: u16, data: impl Into<Bytes>, index: usize) {
        let (url, completion) = self.take(index);
        completion(Ok((data.into(), HttpResponse::new(url, status))));
    }

    /// Fail request `index` with a transport error of `kind`.
    pub fn complete_with_error(&self, kind: ErrorKind, index: usize) {
        let (_, completion) = self.take(index);
        completion(Err(exn::Exn::from(kind)));
    }

    // Panics are DELIBERATE: a test completing a request that was never made
    // (or twice) is a broken test.
    fn take(&self, index: usize) -> (Url, HttpCompletion) {
        let mut requests = self.requests.lock().unwrap();
        let Some(request) = requests.get_mut(index) else {
            panic!("HttpClientSpy: no request at index {index}");
        };
        let Some(completion) = request.completion.take() else {
            panic!("HttpClientSpy: request at index {index} already completed");
        };
        (request.url.clone(), completion)
    }
}

impl HttpClient for HttpClientSpy {
    fn get(&self, url: &Url, completion: HttpCompletion) -> TaskHandle {
        self.requests.lock().unwrap().push(Request {
            url: url.clone(),
            completion: Some(completion),
        });
        Box::new(SpyTask {
            url: url.clone(),
            cancelled: Arc::clone(&self.cancelled),
        })
    }
}

struct SpyTask {
    url: Url,
    cancelled: Arc<Mutex<Vec<Url>>>,
}
impl Task for SpyTask {
    fn cancel(&self) {
        self.cancelled.lock().unwrap().push(self.url.clone());
    }
}
