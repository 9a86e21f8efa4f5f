use crate::Result;

/// A thread pool for executing jobs concurrently.
///
/// Implementors manage a fixed set of worker threads, distribute
/// incoming jobs across them, and deliver each job's result through a
/// [`JobHandle`]. Pools are cheaply cloneable so that running jobs can
/// themselves submit further work.
pub trait ThreadPool: Clone + Send + 'static {
    /// Creates a new thread pool with the given number of threads.
    ///
    /// All workers are started before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created (e.g., invalid
    /// worker count, or a worker thread fails to spawn).
    fn new(threads: u32) -> Result<Self>
    where
        Self: Sized;

    /// Submits a job, returning a handle that resolves to its result.
    ///
    /// Jobs are offered to workers in submission order, but completion
    /// order across jobs is not guaranteed; callers needing ordering
    /// must join the handles.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::PoolStopped`](crate::PoolError::PoolStopped)
    /// if the pool has been shut down. The caller must not assume the
    /// job ran.
    fn submit<F, T>(&self, job: F) -> Result<JobHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static;

    /// Spawns a fire-and-forget job whose result is discarded.
    ///
    /// If the job panics, the failure is logged and dropped.
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit).
    fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(job).map(drop)
    }

    /// Stops accepting new jobs, runs every job already queued, and
    /// waits for the workers to exit.
    ///
    /// Calling it a second time is a no-op. It also runs implicitly
    /// when the last clone of the pool is dropped. Must not be called
    /// from inside a job of the same pool.
    fn shutdown(&self) -> Result<()>;
}

mod handle;
mod naive;
mod rayon_pool;
mod shared_queue;

pub use self::handle::JobHandle;
pub use self::naive::NaiveThreadPool;
pub use self::rayon_pool::RayonThreadPool;
pub use self::shared_queue::SharedQueueThreadPool;
