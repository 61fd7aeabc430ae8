//! Recording stores for loader tests.
//!
//! Like the HTTP client spy, these complete nothing on their own: tests
//! resolve each recorded operation by index, and completing an operation
//! that was never made (or twice) panics.

use crate::models::{CachedFeed, LocalFeedImage};
use crate::store::error::{ErrorKind, Result};
use crate::store::{FeedImageDataStore, FeedStore, StoreCompletion};
use bytes::Bytes;
use std::sync::Mutex;
use time::OffsetDateTime;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedMessage {
    Retrieve,
    Insert(Vec<LocalFeedImage>, OffsetDateTime),
    Delete,
}

#[derive(Default)]
pub struct FeedStoreSpy {
    messages: Mutex<Vec<FeedMessage>>,
    retrievals: Mutex<Vec<Option<StoreCompletion<Option<CachedFeed>>>>>,
    insertions: Mutex<Vec<Option<StoreCompletion<()>>>>,
    deletions: Mutex<Vec<Option<StoreCompletion<()>>>>,
}

fn take<T>(slots: &Mutex<Vec<Option<StoreCompletion<T>>>>, index: usize, what: &str) -> StoreCompletion<T> {
    let mut slots = slots.lock().unwrap();
    let Some(slot) = slots.get_mut(index) else {
        panic!("store spy: no {what} at index {index}");
    };
    let Some(completion) = slot.take() else {
        panic!("store spy: {what} at index {index} already completed");
    };
    completion
}

impl FeedStoreSpy {
    pub fn messages(&self) -> Vec<FeedMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn complete_retrieval(&self, result: Result<Option<CachedFeed>>, index: usize) {
        take(&self.retrievals, index, "retrieval")(result);
    }

    pub fn complete_retrieval_with_error(&self, index: usize) {
        self.complete_retrieval(Err(exn::Exn::from(ErrorKind::Retrieval)), index);
    }

    pub fn complete_insertion(&self, result: Result<()>, index: usize) {
        take(&self.insertions, index, "insertion")(result);
    }

    pub fn complete_insertion_with_error(&self, index: usize) {
        self.complete_insertion(Err(exn::Exn::from(ErrorKind::Insertion)), index);
    }

    pub fn complete_deletion(&self, result: Result<()>, index: usize) {
        take(&self.deletions, index, "deletion")(result);
    }

    pub fn complete_deletion_with_error(&self, index: usize) {
        self.complete_deletion(Err(exn::Exn::from(ErrorKind::Deletion)), index);
    }
}

impl FeedStore for FeedStoreSpy {
    fn retrieve(&self, completion: StoreCompletion<Option<CachedFeed>>) {
        self.messages.lock().unwrap().push(FeedMessage::Retrieve);
        self.retrievals.lock().unwrap().push(Some(completion));
    }

    fn insert(&self, feed: Vec<LocalFeedImage>, timestamp: OffsetDateTime, completion: StoreCompletion<()>) {
        self.messages.lock().unwrap().push(FeedMessage::Insert(feed, timestamp));
        self.insertions.lock().unwrap().push(Some(completion));
    }

    fn delete_cached_feed(&self, completion: StoreCompletion<()>) {
        self.messages.lock().unwrap().push(FeedMessage::Delete);
        self.deletions.lock().unwrap().push(Some(completion));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageMessage {
    Retrieve(Url),
    Insert(Bytes, Url),
}

#[derive(Default)]
pub struct ImageDataStoreSpy {
    messages: Mutex<Vec<ImageMessage>>,
    retrievals: Mutex<Vec<Option<StoreCompletion<Option<Bytes>>>>>,
    insertions: Mutex<Vec<Option<StoreCompletion<()>>>>,
}

impl ImageDataStoreSpy {
    pub fn messages(&self) -> Vec<ImageMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn complete_retrieval(&self, result: Result<Option<Bytes>>, index: usize) {
        take(&self.retrievals, index, "retrieval")(result);
    }

    pub fn complete_insertion(&self, result: Result<()>, index: usize) {
        take(&self.insertions, index, "insertion")(result);
    }
}

impl FeedImageDataStore for ImageDataStoreSpy {
    fn retrieve_data(&self, url: &Url, completion: StoreCompletion<Option<Bytes>>) {
        self.messages.lock().unwrap().push(ImageMessage::Retrieve(url.clone()));
        self.retrievals.lock().unwrap().push(Some(completion));
    }

    fn insert_data(&self, data: Bytes, url: &Url, completion: StoreCompletion<()>) {
        self.messages.lock().unwrap().push(ImageMessage::Insert(data, url.clone()));
        self.insertions.lock().unwrap().push(Some(completion));
    }
}
