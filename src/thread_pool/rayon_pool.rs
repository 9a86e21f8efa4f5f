use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::handle::package;
use super::{JobHandle, ThreadPool};
use crate::{PoolError, Result};

/// A thread pool backed by the `rayon` library.
///
/// Uses rayon's work-stealing scheduler for task distribution, with
/// the same submission and stop contract as the shared-queue pool.
#[derive(Clone)]
pub struct RayonThreadPool {
    pool: Arc<rayon::ThreadPool>,
    stopped: Arc<AtomicBool>,
}

impl ThreadPool for RayonThreadPool {
    fn new(threads: u32) -> Result<Self> {
        if threads == 0 {
            return Err(PoolError::InvalidWorkerCount(threads));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .build()
            .map_err(|e| PoolError::PoolBuild(e.to_string()))?;
        Ok(RayonThreadPool {
            pool: Arc::new(pool),
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
        self.pool.spawn(runnable);
        Ok(handle)
    }

    fn shutdown(&self) -> Result<()> {
        // Rayon joins its own threads when the last Arc is dropped;
        // stopping only rejects further submissions.
        self.stopped.store(true, Ordering::SeqCst);
        Ok(())
    }
}
