//! Feed list resource.

use super::{Result, decode_items, require_status};
use crate::client::HttpResponse;
use bytes::Bytes;
use feedkit_core::FeedImage;
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

/// A feed item as sent by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Url,
}
impl From<RemoteFeedItem> for FeedImage {
    fn from(item: RemoteFeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.image,
        }
    }
}

/// Validate the response and decode its items. Only `200 OK` is accepted.
pub fn decode(data: &[u8], response: &HttpResponse) -> Result<Vec<RemoteFeedItem>> {
    require_status(response.is_ok(), response)?;
    decode_items(data)
}

/// [`decode`] followed by translation into [`FeedImage`]s, order preserved.
pub fn map(data: Bytes, response: &HttpResponse) -> Result<Vec<FeedImage>> {
    Ok(decode(&data, response)?.into_iter().map(FeedImage::from).collect())
}
