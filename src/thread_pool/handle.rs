use std::any::Any;
use std::panic;
use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, RecvTimeoutError};
use log::error;

use crate::{PoolError, Result};

/// A one-shot handle resolving to a submitted job's result.
///
/// The executing worker writes the slot exactly once, with either the
/// job's return value or its captured panic. Consuming the handle
/// blocks until that write happens. Dropping the handle detaches the
/// job: it still runs, but its outcome is discarded.
pub struct JobHandle<T> {
    rx: Receiver<Result<T>>,
}

impl<T> JobHandle<T> {
    /// Blocks until the job finishes and returns its result.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::JobPanicked`] if the job panicked, or
    /// [`PoolError::Disconnected`] if the worker exited before writing
    /// a result.
    pub fn join(self) -> Result<T> {
        self.rx.recv().map_err(|_| PoolError::Disconnected)?
    }

    /// Like [`join`](Self::join), but gives up after `timeout`.
    ///
    /// The job itself is not cancelled; only the wait is bounded.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Timeout`] if the result is not written in
    /// time, otherwise as [`join`](Self::join).
    pub fn join_timeout(self, timeout: Duration) -> Result<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(PoolError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(PoolError::Disconnected),
        }
    }
}

/// Pairs a job with the one-shot slot its worker will write.
///
/// The returned runnable catches a panicking job body at the worker
/// boundary and routes the failure into the slot. If the submitter
/// dropped the handle, a failed outcome is logged and discarded; the
/// worker is never torn down by a job.
pub(crate) fn package<F, T>(job: F) -> (Box<dyn FnOnce() + Send + 'static>, JobHandle<T>)
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = bounded(1);
    let runnable: Box<dyn FnOnce() + Send + 'static> = Box::new(move || {
        let result = panic::catch_unwind(panic::AssertUnwindSafe(job))
            .map_err(|payload| PoolError::JobPanicked(panic_message(payload)));
        if let Err(unsent) = tx.send(result) {
            if let Err(e) = unsent.into_inner() {
                error!("detached job failed: {e}");
            }
        }
    });
    (runnable, JobHandle { rx })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
