//! Remote loading over an injected HTTP capability.
//!
//! [`RemoteLoader`] turns "fetch bytes over HTTP" into "produce a classified
//! `Result<T>`" for any `T`, given a mapping function from
//! [`mapper`]. Transport failures surface as
//! [`Connectivity`](error::ErrorKind::Connectivity), anything wrong with the
//! response surfaces as [`InvalidData`](error::ErrorKind::InvalidData).
//!
//! The HTTP transport itself is the [`HttpClient`] trait. A production
//! implementation over `reqwest` is available behind the `reqwest` feature,
//! and a recording spy for tests behind the `mock` feature.

pub mod client;
pub mod error;
pub mod mapper;
mod remote;

#[cfg(any(test, feature = "mock"))]
pub use crate::client::HttpClientSpy;
#[cfg(feature = "reqwest")]
pub use crate::client::ReqwestClient;
pub use crate::client::{ClientHandle, HttpClient, HttpResponse};
pub use crate::remote::RemoteLoader;
use bytes::Bytes;
use feedkit_core::{FeedImage, ImageComment};

/// Loads the image feed.
pub type RemoteFeedLoader = RemoteLoader<Vec<FeedImage>>;
/// Loads the comments of a single image.
pub type RemoteImageCommentsLoader = RemoteLoader<Vec<ImageComment>>;
/// Loads the binary payload of an image.
pub type RemoteImageDataLoader = RemoteLoader<Bytes>;
