//! Domain models.
//!
//! These types are what callers of the loaders get back. Neither the wire
//! schema of the API nor the persisted schema of the cache leak into them.

use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

/// A single image in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Where the image payload can be downloaded from.
    pub url: Url,
}
impl FeedImage {
    pub fn new(id: Uuid, url: Url) -> Self {
        Self {
            id,
            description: None,
            location: None,
            url,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A comment left on a [`FeedImage`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageComment {
    pub id: Uuid,
    pub message: String,
    pub created_at: OffsetDateTime,
    /// Username of the comment author.
    pub username: String,
}
