//! Shared-counter increment campaigns, demonstrating lost updates
//! versus lock-guarded access through the same pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::thread_pool::ThreadPool;
use crate::Result;

/// Runs `n` unguarded read-increment-write jobs against one shared
/// counter and returns the final value.
///
/// Each job reads the counter, yields to widen the window, then writes
/// the incremented value back. Concurrent jobs overwrite each other's
/// updates, so the result is typically below `n` and varies between
/// runs. The individual accesses are atomic — nothing here is
/// undefined behavior — but the read-modify-write sequence as a whole
/// is unsynchronized, which is the bug being demonstrated.
///
/// # Errors
///
/// Fails if the pool rejects a submission or a job panics.
pub fn racy_increments<P: ThreadPool>(pool: &P, n: usize) -> Result<usize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut handles = Vec::with_capacity(n);

    for _ in 0..n {
        let counter = Arc::clone(&counter);
        handles.push(pool.submit(move || {
            let current = counter.load(Ordering::Relaxed);
            thread::yield_now();
            counter.store(current + 1, Ordering::Relaxed);
        })?);
    }
    for handle in handles {
        handle.join()?;
    }

    Ok(counter.load(Ordering::Relaxed))
}

/// Runs `n` lock-guarded increments against one shared counter and
/// returns the final value, which is always exactly `n`.
///
/// The guard is scoped: acquire, mutate, release on every exit path.
///
/// # Errors
///
/// Fails if the pool rejects a submission or a job panics.
pub fn guarded_increments<P: ThreadPool>(pool: &P, n: usize) -> Result<usize> {
    let counter = Arc::new(Mutex::new(0usize));
    let mut handles = Vec::with_capacity(n);

    for _ in 0..n {
        let counter = Arc::clone(&counter);
        handles.push(pool.submit(move || {
            let mut value = counter.lock().expect("counter lock poisoned");
            *value += 1;
        })?);
    }
    for handle in handles {
        handle.join()?;
    }

    let value = *counter.lock().expect("counter lock poisoned");
    Ok(value)
}
