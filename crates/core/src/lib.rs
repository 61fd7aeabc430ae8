//! Domain models and the loading protocol shared by every feedkit loader.
//!
//! Loaders are callback based: [`Loader::load`] returns a [`TaskHandle`]
//! immediately and later invokes the supplied [`Completion`] at most once.
//! A cancelled task never delivers a result.
//!
//! # Architecture
//! - [`CancellableTask`] owns the completion slot and the handle of the
//!   transport call it wraps, and enforces the at-most-once guarantee.
//! - [`InertTask`] is handed out by loaders whose work cannot be cancelled.
//! - [`LoaderExt::fetch`] bridges the callback protocol into `async` code.

mod loader;
mod models;
mod task;

pub use crate::loader::{Fetch, Loader, LoaderExt};
pub use crate::models::{FeedImage, ImageComment};
pub use crate::task::{CancellableTask, Completion, InertTask, Task, TaskHandle};
