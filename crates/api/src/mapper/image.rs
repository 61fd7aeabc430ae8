//! Binary image payload resource.

use super::{ErrorKind, Result, require_status};
use crate::client::HttpResponse;
use bytes::Bytes;

/// Accept the payload as-is if the status is `200 OK` and the body is not empty.
pub fn map(data: Bytes, response: &HttpResponse) -> Result<Bytes> {
    require_status(response.is_ok(), response)?;
    if data.is_empty() {
        exn::bail!(ErrorKind::EmptyPayload);
    }
    Ok(data)
}
