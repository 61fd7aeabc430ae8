mod feed;
mod image;

pub use self::feed::LocalFeedLoader;
pub use self::image::LocalImageDataLoader;
