//! Image comments resource.

use super::{Result, decode_items, require_status};
use crate::client::HttpResponse;
use bytes::Bytes;
use feedkit_core::ImageComment;
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteCommentAuthor {
    pub username: String,
}

/// A comment as sent by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteImageComment {
    pub id: Uuid,
    pub message: String,
    /// RFC 3339 timestamp, e.g. `2020-05-20T11:24:59+00:00`.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub author: RemoteCommentAuthor,
}
impl From<RemoteImageComment> for ImageComment {
    fn from(comment: RemoteImageComment) -> Self {
        Self {
            id: comment.id,
            message: comment.message,
            created_at: comment.created_at,
            username: comment.author.username,
        }
    }
}

/// Validate the response and decode its comments. Any `2xx` status is accepted.
pub fn decode(data: &[u8], response: &HttpResponse) -> Result<Vec<RemoteImageComment>> {
    require_status(response.is_success(), response)?;
    decode_items(data)
}

/// [`decode`] followed by translation into [`ImageComment`]s, order preserved.
pub fn map(data: Bytes, response: &HttpResponse) -> Result<Vec<ImageComment>> {
    Ok(decode(&data, response)?.into_iter().map(ImageComment::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::ErrorKind;
    use rstest::rstest;
    use serde_json::json;
    use time::macros::datetime;
    use url::Url;

    fn response(status: u16) -> HttpResponse {
        HttpResponse::new(Url::parse("https://a-url.com").unwrap(), status)
    }

    fn empty_list() -> Bytes {
        Bytes::from_static(br#"{"items":[]}"#)
    }

    #[rstest]
    #[case(150)]
    #[case(199)]
    #[case(300)]
    #[case(400)]
    #[case(500)]
    fn test_rejects_non_2xx_status(#[case] status: u16) {
        let err = map(empty_list(), &response(status)).unwrap_err();
        assert_eq!(*err, ErrorKind::UnexpectedStatus(status));
    }

    #[rstest]
    #[case(200)]
    #[case(201)]
    #[case(250)]
    #[case(280)]
    #[case(299)]
    fn test_accepts_any_2xx_status(#[case] status: u16) {
        assert_eq!(map(empty_list(), &response(status)).unwrap(), vec![]);
    }

    #[rstest]
    #[case(200)]
    #[case(204)]
    fn test_rejects_invalid_json_on_2xx(#[case] status: u16) {
        let err = map(Bytes::from_static(b"invalid json"), &response(status)).unwrap_err();
        assert_eq!(*err, ErrorKind::Malformed);
    }

    #[test]
    fn test_maps_comments_in_order() {
        let payload = json!({ "items": [
            {
                "id": Uuid::from_u128(1),
                "message": "a message",
                "created_at": "2020-05-20T11:24:59+00:00",
                "author": { "username": "a username" },
            },
            {
                "id": Uuid::from_u128(2),
                "message": "another message",
                "created_at": "2020-01-01T12:31:22+02:00",
                "author": { "username": "another username" },
            },
        ]});
        let comments = map(Bytes::from(serde_json::to_vec(&payload).unwrap()), &response(201)).unwrap();
        assert_eq!(
            comments,
            vec![
                ImageComment {
                    id: Uuid::from_u128(1),
                    message: "a message".to_string(),
                    created_at: datetime!(2020-05-20 11:24:59 UTC),
                    username: "a username".to_string(),
                },
                ImageComment {
                    id: Uuid::from_u128(2),
                    message: "another message".to_string(),
                    created_at: datetime!(2020-01-01 12:31:22 +2),
                    username: "another username".to_string(),
                },
            ]
        );
    }
}
