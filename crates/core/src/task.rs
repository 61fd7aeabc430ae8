//! Cancellable units of in-flight work.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback invoked with the outcome of a load.
pub type Completion<T, E> = Box<dyn FnOnce(Result<T, E>) + Send + 'static>;

/// Owned, type-erased task returned by every load operation.
pub type TaskHandle = Box<dyn Task>;

/// Handle to one in-flight operation.
///
/// Cancellation is cooperative and best-effort: implementations are asked to
/// stop, and must guarantee that no result is delivered afterwards, but may
/// not be able to stop work already underway.
pub trait Task: Send + Sync {
    /// Request cancellation. Calling this more than once has no further effect.
    fn cancel(&self);
}
impl<T: Task + ?Sized> Task for Arc<T> {
    fn cancel(&self) {
        (**self).cancel()
    }
}
impl<T: Task + ?Sized> Task for Box<T> {
    fn cancel(&self) {
        (**self).cancel()
    }
}

/// A task with nothing to cancel.
///
/// Returned by loaders whose work is a single bounded lookup with no side
/// effect worth unwinding.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertTask;
impl Task for InertTask {
    fn cancel(&self) {}
}

enum State<T, E> {
    Pending(Completion<T, E>),
    Completed,
    Cancelled,
    Discarded,
}

/// Wraps a transport task and delivers its outcome at most once.
///
/// The task moves through `Pending -> Completed` or `Pending -> Cancelled`
/// and never leaves either final state. The completion callback is always
/// invoked *outside* of the internal lock, so a callback may freely cancel
/// its own task (or anything else) without deadlocking.
///
/// Construction order matters: build the task, issue the transport call with
/// a closure that calls [`complete()`](Self::complete), then hand the
/// transport's own handle to [`attach()`](Self::attach).
///
/// # Examples
///
/// ```
/// use feedkit_core::{CancellableTask, InertTask, Task};
/// use std::sync::Arc;
///
/// let task = Arc::new(CancellableTask::<u8, ()>::new(|result| {
///     assert_eq!(result, Ok(7));
/// }));
/// task.attach(Box::new(InertTask));
/// assert!(task.complete(Ok(7)));
/// // Already completed: nothing happens.
/// task.cancel();
/// assert!(!task.complete(Ok(8)));
/// ```
pub struct CancellableTask<T, E> {
    state: Mutex<State<T, E>>,
    inner: Mutex<Option<TaskHandle>>,
}

impl<T, E> CancellableTask<T, E> {
    pub fn new(completion: impl FnOnce(Result<T, E>) + Send + 'static) -> Self {
        Self {
            state: Mutex::new(State::Pending(Box::new(completion))),
            inner: Mutex::new(None),
        }
    }

    // The lock is never held while foreign code runs, so poisoning can only
    // come from a panic inside this module; the state is still consistent.
    fn state(&self) -> MutexGuard<'_, State<T, E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn inner(&self) -> MutexGuard<'_, Option<TaskHandle>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach the handle of the transport call this task wraps.
    ///
    /// If the task was cancelled in the meantime the handle is cancelled
    /// straight away. If the task already completed (the transport answered
    /// synchronously) the handle is simply released.
    pub fn attach(&self, inner: TaskHandle) {
        *self.inner() = Some(inner);
        let (cancelled, completed) = match *self.state() {
            State::Pending(_) => (false, false),
            State::Completed | State::Discarded => (false, true),
            State::Cancelled => (true, false),
        };
        if cancelled || completed {
            let inner = self.inner().take();
            if let (true, Some(inner)) = (cancelled, inner) {
                inner.cancel();
            }
        }
    }

    /// Deliver `result` to the completion callback.
    ///
    /// Returns `true` if the callback was invoked, `false` if the task had
    /// already completed or been cancelled.
    pub fn complete(&self, result: Result<T, E>) -> bool {
        let completion = {
            let mut state = self.state();
            match std::mem::replace(&mut *state, State::Completed) {
                State::Pending(completion) => Some(completion),
                finished => {
                    *state = finished;
                    None
                },
            }
        };
        match completion {
            Some(completion) => {
                // Delivered; the transport handle has nothing left to do.
                drop(self.inner().take());
                completion(result);
                true
            },
            None => {
                tracing::trace!("Discarding result for a task that already finished");
                false
            },
        }
    }

    /// Drop the completion without invoking it.
    ///
    /// For results that arrive when nobody is left to interpret them. Unlike
    /// [`cancel()`](Task::cancel) the transport handle is released rather
    /// than cancelled. Returns `true` if a pending completion was dropped.
    pub fn discard(&self) -> bool {
        let previous = {
            let mut state = self.state();
            if !matches!(*state, State::Pending(_)) {
                return false;
            }
            std::mem::replace(&mut *state, State::Discarded)
        };
        drop(previous);
        drop(self.inner().take());
        true
    }

    /// Returns `true` once the task has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(*self.state(), State::Cancelled)
    }

    /// Returns `true` once the result has been delivered.
    pub fn is_completed(&self) -> bool {
        matches!(*self.state(), State::Completed)
    }
}

impl<T, E> Task for CancellableTask<T, E> {
    /// Clear the completion slot, then propagate to the transport handle.
    ///
    /// Clearing first means a transport that answers synchronously while
    /// being cancelled finds nothing to deliver to.
    fn cancel(&self) {
        let previous = {
            let mut state = self.state();
            if !matches!(*state, State::Pending(_)) {
                return;
            }
            std::mem::replace(&mut *state, State::Cancelled)
        };
        // Drop the caller's callback (and whatever it captured) outside the lock.
        drop(previous);
        tracing::debug!("Task cancelled");
        let inner = self.inner().take();
        if let Some(inner) = inner {
            inner.cancel();
        }
    }
}

impl<T, E> Debug for CancellableTask<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let state = match *self.state() {
            State::Pending(_) => "pending",
            State::Completed => "completed",
            State::Cancelled => "cancelled",
            State::Discarded => "discarded",
        };
        f.debug_struct("CancellableTask").field("state", &state).field("attached", &self.inner().is_some()).finish()
    }
}
