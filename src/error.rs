use std::io;
use thiserror::Error;

/// Error type for pool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// IO error from spawning worker threads.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Submission was rejected because the pool has been shut down.
    #[error("submit on stopped thread pool")]
    PoolStopped,

    /// The job panicked while executing; the panic message is preserved.
    #[error("job panicked: {0}")]
    JobPanicked(String),

    /// The worker exited before writing a result into the handle.
    #[error("job result channel disconnected")]
    Disconnected,

    /// Waiting on a handle exceeded the caller's deadline.
    #[error("timed out waiting for job result")]
    Timeout,

    /// The pool was asked for zero workers.
    #[error("thread pool requires at least one worker, got {0}")]
    InvalidWorkerCount(u32),

    /// The backing pool could not be built.
    #[error("failed to build thread pool: {0}")]
    PoolBuild(String),
}

/// Result type alias for pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
