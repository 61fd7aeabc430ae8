//! The loader protocol and its `async` bridge.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use url::Url;

use crate::task::{Completion, TaskHandle};

/// Load a resource of type [`Output`](Self::Output) identified by a URL.
///
/// Remote and local loaders share this shape so they can be swapped for one
/// another (or stacked) by higher layers. The completion is invoked at most
/// once, on whichever thread the underlying capability chooses; it is never
/// invoked after the returned task was cancelled.
pub trait Loader: Send + Sync {
    type Output: Send + 'static;
    type Error: Send + 'static;

    fn load(&self, url: &Url, completion: Completion<Self::Output, Self::Error>) -> TaskHandle;
}
impl<L: Loader + ?Sized> Loader for std::sync::Arc<L> {
    type Output = L::Output;
    type Error = L::Error;

    fn load(&self, url: &Url, completion: Completion<Self::Output, Self::Error>) -> TaskHandle {
        (**self).load(url, completion)
    }
}

/// `async` convenience on top of any [`Loader`].
pub trait LoaderExt: Loader {
    /// Start loading `url` and return a future for the outcome.
    ///
    /// The future resolves to `None` if the loader discarded the completion
    /// without calling it (for example because the loader itself was dropped
    /// while the request was in flight). Dropping the future before it
    /// resolves cancels the underlying task.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use feedkit_core::{Loader, LoaderExt};
    /// use url::Url;
    ///
    /// async fn first_attempt<L: Loader>(loader: &L, url: &Url) -> Option<L::Output> {
    ///     loader.fetch(url).await?.ok()
    /// }
    /// ```
    fn fetch(&self, url: &Url) -> Fetch<Self::Output, Self::Error> {
        let (sender, receiver) = oneshot::channel();
        let task = self.load(
            url,
            Box::new(move |result| {
                // Receiver gone means the caller stopped waiting.
                _ = sender.send(result);
            }),
        );
        Fetch {
            receiver,
            task,
            finished: false,
        }
    }
}
impl<L: Loader + ?Sized> LoaderExt for L {}

/// Future returned by [`LoaderExt::fetch`].
#[must_use = "futures do nothing unless polled; dropping this cancels the load"]
pub struct Fetch<T, E> {
    receiver: oneshot::Receiver<Result<T, E>>,
    task: TaskHandle,
    finished: bool,
}

impl<T, E> Fetch<T, E> {
    /// Cancel the load explicitly. The future will then resolve to `None`.
    pub fn cancel(&mut self) {
        self.task.cancel();
    }
}

impl<T, E> Future for Fetch<T, E> {
    type Output = Option<Result<T, E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(outcome) => {
                this.finished = true;
                Poll::Ready(outcome.ok())
            },
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, E> Drop for Fetch<T, E> {
    fn drop(&mut self) {
        if !self.finished {
            self.task.cancel();
        }
    }
}
