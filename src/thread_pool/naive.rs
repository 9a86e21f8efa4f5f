use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use super::handle::package;
use super::{JobHandle, ThreadPool};
use crate::{PoolError, Result};

/// A naive thread pool that spawns a new thread for every job.
///
/// This is the simplest possible "pool" — it doesn't reuse threads at
/// all. Useful as a baseline for benchmarking against real thread
/// pools. There is no queue: shutdown rejects further submissions but
/// does not wait for threads already running.
#[derive(Clone)]
pub struct NaiveThreadPool {
    stopped: Arc<AtomicBool>,
}

impl ThreadPool for NaiveThreadPool {
    fn new(_threads: u32) -> Result<Self> {
        Ok(NaiveThreadPool {
            stopped: Arc::new(AtomicBool::new(false)),
        })
    }

    fn submit<F, T>(&self, job: F) -> Result<JobHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(PoolError::PoolStopped);
        }
        let (runnable, handle) = package(job);
        thread::Builder::new().spawn(runnable)?;
        Ok(handle)
    }

    fn shutdown(&self) -> Result<()> {
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }
}
