use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use parsort::{
    generate_ints_with, merge_sort, parallel_merge_sort, Direction, SharedQueueThreadPool,
    ThreadPool,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const ARRAY_LEN: usize = 100_000;

fn fresh_array(len: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(42);
    generate_ints_with(&mut rng, len, -100_000, 300_000, 0.0, Direction::Ascending)
}

fn sort_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_sort");
    group.sample_size(10);

    group.bench_function("serial", |b| {
        b.iter_batched(
            || fresh_array(ARRAY_LEN),
            |mut arr| merge_sort(&mut arr),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("fork_join", |b| {
        let workers = num_cpus::get() as u32;
        let pool = SharedQueueThreadPool::new(workers).unwrap();
        b.iter_batched(
            || fresh_array(ARRAY_LEN),
            |mut arr| parallel_merge_sort(&pool, &mut arr, workers).unwrap(),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn pool_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread_pool");

    group.bench_function("submit_join", |b| {
        let pool = SharedQueueThreadPool::new(num_cpus::get() as u32).unwrap();
        b.iter(|| {
            let handles: Vec<_> = (0..100u64)
                .map(|i| pool.submit(move || i.wrapping_mul(i)).unwrap())
                .collect();
            let total: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
            total
        });
    });

    group.finish();
}

criterion_group!(benches, sort_bench, pool_bench);
criterion_main!(benches);
