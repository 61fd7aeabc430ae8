//! Persisted representations.
//!
//! These mirror the domain models on purpose but are separate types, so the
//! persisted schema and the domain can change independently.

use feedkit_core::FeedImage;
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

/// A [`FeedImage`] as the cache stores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalFeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}
impl From<&FeedImage> for LocalFeedImage {
    fn from(image: &FeedImage) -> Self {
        Self {
            id: image.id,
            description: image.description.clone(),
            location: image.location.clone(),
            url: image.url.clone(),
        }
    }
}
impl From<LocalFeedImage> for FeedImage {
    fn from(image: LocalFeedImage) -> Self {
        Self {
            id: image.id,
            description: image.description,
            location: image.location,
            url: image.url,
        }
    }
}

/// One feed snapshot: the items and when they were saved.
///
/// A store holds at most one of these; inserting replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFeed {
    pub feed: Vec<LocalFeedImage>,
    pub timestamp: OffsetDateTime,
}
impl CachedFeed {
    pub fn new(feed: Vec<LocalFeedImage>, timestamp: OffsetDateTime) -> Self {
        Self { feed, timestamp }
    }
}
