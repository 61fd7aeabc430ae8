//! Response validators and mappers.
//!
//! Each resource has a `map` function with the signature
//! `fn(Bytes, &HttpResponse) -> Result<T>` that [`RemoteLoader`](crate::RemoteLoader)
//! accepts as configuration. Mapping happens in two steps:
//!
//! 1. **Validate and decode**: check the status metadata (and, for binary
//!    payloads, the body) and decode the wire schema. Any failure here is
//!    final; nothing is partially returned.
//! 2. **Translate**: convert wire items into domain values. This step is
//!    pure and total since both shapes are under our control.
//!
//! Mappers know nothing about networking or cancellation.

pub mod comments;
mod error;
pub mod feed;
pub mod image;

pub use self::error::{Error, ErrorKind, Result};
use crate::client::HttpResponse;
use exn::ResultExt;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Fail with [`UnexpectedStatus`](ErrorKind::UnexpectedStatus) unless `accepted`.
fn require_status(accepted: bool, response: &HttpResponse) -> Result<()> {
    if !accepted {
        tracing::debug!(url = %response.url, status = response.status, "Rejecting response status");
        exn::bail!(ErrorKind::UnexpectedStatus(response.status));
    }
    Ok(())
}

/// Decode the `{"items": [...]}` envelope shared by the JSON resources.
fn decode_items<W: DeserializeOwned>(data: &[u8]) -> Result<Vec<W>> {
    #[derive(Deserialize)]
    struct Root<W> {
        items: Vec<W>,
    }
    let root: Root<W> = serde_json::from_slice(data).or_raise(|| ErrorKind::Malformed)?;
    Ok(root.items)
}
