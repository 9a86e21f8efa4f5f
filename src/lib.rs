#![deny(missing_docs)]

//! A task-queue thread pool with future-style job handles, and a
//! fork-join parallel merge sort built on top of it.
//!
//! The pool owns a fixed set of worker threads sharing one FIFO job
//! queue; submitting a job returns a [`JobHandle`] that resolves to
//! the job's result once a worker has run it. The sort forks disjoint
//! subranges of an array onto the pool up to a depth derived from the
//! target parallelism, then merges. A pair of shared-counter
//! campaigns — one unguarded, one mutex-guarded — exercises the
//! pool's concurrency guarantees.

mod counter;
mod data;
mod error;
mod sort;
/// Thread pool implementations for concurrent job execution.
pub mod thread_pool;

pub use counter::{guarded_increments, racy_increments};
pub use data::{
    generate_floats, generate_floats_with, generate_ints, generate_ints_with,
    is_sorted_ascending, Direction,
};
pub use error::{PoolError, Result};
pub use sort::{merge_sort, parallel_merge_sort};
pub use thread_pool::{
    JobHandle, NaiveThreadPool, RayonThreadPool, SharedQueueThreadPool, ThreadPool,
};
