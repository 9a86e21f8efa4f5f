use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parsort::{
    guarded_increments, racy_increments, NaiveThreadPool, PoolError, RayonThreadPool,
    SharedQueueThreadPool, ThreadPool,
};

#[test]
fn zero_workers_are_rejected() {
    assert!(matches!(
        SharedQueueThreadPool::new(0),
        Err(PoolError::InvalidWorkerCount(0))
    ));
    assert!(matches!(
        RayonThreadPool::new(0),
        Err(PoolError::InvalidWorkerCount(0))
    ));
}

#[test]
fn every_submitted_job_resolves() {
    let pool = SharedQueueThreadPool::new(4).unwrap();
    let handles: Vec<_> = (0..32u64)
        .map(|i| pool.submit(move || i * i).unwrap())
        .collect();

    let total: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, (0..32u64).map(|i| i * i).sum());
}

#[test]
fn four_sleepers_resolve_within_a_bounded_wait() {
    let pool = SharedQueueThreadPool::new(4).unwrap();
    let handles: Vec<_> = (0..4usize)
        .map(|i| {
            pool.submit(move || {
                thread::sleep(Duration::from_millis(50));
                i
            })
            .unwrap()
        })
        .collect();

    let mut indices: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join_timeout(Duration::from_secs(5)).unwrap())
        .collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn completion_order_is_not_submission_order() {
    // A slow job submitted first must not block a fast one behind it.
    let pool = SharedQueueThreadPool::new(2).unwrap();
    let slow = pool
        .submit(|| {
            thread::sleep(Duration::from_millis(500));
            "slow"
        })
        .unwrap();
    let fast = pool.submit(|| "fast").unwrap();

    assert_eq!(fast.join_timeout(Duration::from_millis(250)).unwrap(), "fast");
    assert_eq!(slow.join().unwrap(), "slow");
}

#[test]
fn panicking_job_reports_through_its_handle() {
    // One worker, so the follow-up job proves that same worker survived.
    let pool = SharedQueueThreadPool::new(1).unwrap();

    let handle = pool.submit(|| -> u32 { panic!("boom") }).unwrap();
    match handle.join() {
        Err(PoolError::JobPanicked(message)) => assert!(message.contains("boom")),
        other => panic!("expected JobPanicked, got {other:?}"),
    }

    let handle = pool.submit(|| 7).unwrap();
    assert_eq!(handle.join().unwrap(), 7);
}

#[test]
fn detached_panicking_job_does_not_kill_the_worker() {
    let pool = SharedQueueThreadPool::new(1).unwrap();
    pool.spawn(|| panic!("dropped on the floor")).unwrap();

    let handle = pool.submit(|| "alive").unwrap();
    assert_eq!(handle.join().unwrap(), "alive");
}

#[test]
fn submit_after_shutdown_fails() {
    let pool = SharedQueueThreadPool::new(2).unwrap();
    pool.shutdown().unwrap();

    assert!(matches!(pool.submit(|| 1), Err(PoolError::PoolStopped)));
    assert!(matches!(pool.spawn(|| ()), Err(PoolError::PoolStopped)));
}

#[test]
fn shutdown_drains_every_queued_job() {
    let pool = SharedQueueThreadPool::new(2).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));

    for _ in 0..100 {
        let counter = Arc::clone(&counter);
        pool.spawn(move || {
            thread::sleep(Duration::from_millis(1));
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    // Shutdown joins the workers, which must first run the backlog.
    pool.shutdown().unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 100);
}

#[test]
fn shutdown_twice_is_a_noop() {
    let pool = SharedQueueThreadPool::new(2).unwrap();
    pool.shutdown().unwrap();
    pool.shutdown().unwrap();
}

#[test]
fn clones_share_one_pool() {
    let pool = SharedQueueThreadPool::new(2).unwrap();
    let clone = pool.clone();

    let handle = clone.submit(|| 11).unwrap();
    assert_eq!(handle.join().unwrap(), 11);

    pool.shutdown().unwrap();
    assert!(matches!(clone.submit(|| 2), Err(PoolError::PoolStopped)));
}

#[test]
fn jobs_can_submit_further_jobs() {
    let pool = SharedQueueThreadPool::new(2).unwrap();
    let inner_pool = pool.clone();

    let handle = pool
        .submit(move || {
            let nested = inner_pool.submit(|| 21).unwrap();
            nested.join().unwrap() * 2
        })
        .unwrap();
    assert_eq!(handle.join().unwrap(), 42);
}

#[test]
fn guarded_counter_is_exact() {
    let pool = SharedQueueThreadPool::new(8).unwrap();
    assert_eq!(guarded_increments(&pool, 1000).unwrap(), 1000);
}

#[test]
fn racy_counter_never_overshoots() {
    // The lost-update count varies run to run; the only stable
    // property is that updates can only be lost, never invented.
    let pool = SharedQueueThreadPool::new(8).unwrap();
    for _ in 0..3 {
        let value = racy_increments(&pool, 1000).unwrap();
        assert!(value <= 1000);
        assert!(value > 0);
    }
}

#[test]
fn naive_pool_runs_jobs() {
    let pool = NaiveThreadPool::new(4).unwrap();
    let handle = pool.submit(|| 5).unwrap();
    assert_eq!(handle.join().unwrap(), 5);

    pool.shutdown().unwrap();
    assert!(matches!(pool.submit(|| 1), Err(PoolError::PoolStopped)));
}

#[test]
fn rayon_pool_runs_jobs() {
    let pool = RayonThreadPool::new(4).unwrap();
    let handles: Vec<_> = (0..16u32).map(|i| pool.submit(move || i + 1).unwrap()).collect();
    let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, (1..=16).sum());

    pool.shutdown().unwrap();
    assert!(matches!(pool.submit(|| 1), Err(PoolError::PoolStopped)));
}
