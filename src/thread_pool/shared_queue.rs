use std::panic;
use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam::channel::{self, Receiver, Sender};
use log::{debug, error};

use super::handle::package;
use super::{JobHandle, ThreadPool};
use crate::{PoolError, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A thread pool using a shared FIFO job queue.
///
/// Workers pull jobs from a single MPMC channel, so jobs are offered
/// to workers in submission order and executed outside any lock. On
/// shutdown the queue sender is dropped: workers drain every job
/// accepted before the stop, then exit, and the shutdown call joins
/// them. Clones share the same pool.
#[derive(Clone)]
pub struct SharedQueueThreadPool {
    shared: Arc<PoolShared>,
}

struct PoolShared {
    // `None` is the one-shot stop flag: taking the sender closes the
    // channel, which wakes every idle worker.
    tx: Mutex<Option<Sender<Job>>>,
    workers: Mutex<Vec<thread::JoinHandle<()>>>,
}

impl ThreadPool for SharedQueueThreadPool {
    fn new(threads: u32) -> Result<Self> {
        if threads == 0 {
            return Err(PoolError::InvalidWorkerCount(threads));
        }

        let (tx, rx) = channel::unbounded::<Job>();
        let mut workers = Vec::with_capacity(threads as usize);
        for id in 0..threads {
            workers.push(spawn_worker(id, rx.clone())?);
        }

        Ok(SharedQueueThreadPool {
            shared: Arc::new(PoolShared {
                tx: Mutex::new(Some(tx)),
                workers: Mutex::new(workers),
            }),
        })
    }

    fn submit<F, T>(&self, job: F) -> Result<JobHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (runnable, handle) = package(job);
        let guard = self.shared.tx.lock().expect("pool lock poisoned");
        match guard.as_ref() {
            // Sending on an unbounded channel never blocks; it only
            // fails if every worker has already exited.
            Some(tx) => tx
                .send(runnable)
                .map(|()| handle)
                .map_err(|_| PoolError::PoolStopped),
            None => Err(PoolError::PoolStopped),
        }
    }

    fn shutdown(&self) -> Result<()> {
        self.shared.stop_and_join();
        Ok(())
    }
}

impl PoolShared {
    /// Drops the queue sender so workers drain and exit, then joins
    /// them. Safe to call more than once.
    fn stop_and_join(&self) {
        let tx = self.tx.lock().expect("pool lock poisoned").take();
        drop(tx);

        let workers = std::mem::take(&mut *self.workers.lock().expect("pool lock poisoned"));
        for worker in workers {
            // A job that owns the last clone of the pool would be
            // joining its own worker here; skip it and let that worker
            // finish on its own once the queue is drained.
            if worker.thread().id() == thread::current().id() {
                continue;
            }
            if worker.join().is_err() {
                error!("worker thread panicked before exit");
            }
        }
    }
}

impl Drop for PoolShared {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

/// Spawns a single worker thread that pulls jobs from the receiver
/// until the queue is closed and drained.
fn spawn_worker(id: u32, rx: Receiver<Job>) -> Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name(format!("pool-worker-{id}"))
        .spawn(move || worker_loop(id, rx))?;
    Ok(handle)
}

fn worker_loop(id: u32, rx: Receiver<Job>) {
    loop {
        match rx.recv() {
            Ok(job) => {
                debug!("worker {id} executing job");
                // The packaged job catches its own panics and routes
                // them to the handle; this guard is the last resort so
                // a worker never dies.
                if panic::catch_unwind(panic::AssertUnwindSafe(job)).is_err() {
                    error!("worker {id}: job panicked past its handle");
                }
            }
            Err(_) => {
                debug!("worker {id}: queue closed, shutting down");
                return;
            }
        }
    }
}
