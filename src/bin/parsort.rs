use std::process::exit;
use std::time::Instant;

use clap::Parser;
use log::{error, info};

use parsort::{
    generate_ints, guarded_increments, is_sorted_ascending, merge_sort, parallel_merge_sort,
    racy_increments, Direction, Result, SharedQueueThreadPool, ThreadPool,
};

#[derive(Parser)]
#[command(name = "parsort", version, about = "Thread pool sorting experiment")]
struct Cli {
    /// Number of worker threads (defaults to the CPU count)
    #[arg(long, value_name = "COUNT")]
    threads: Option<u32>,

    /// Number of elements to sort
    #[arg(long, default_value_t = 200_000, value_name = "LEN")]
    size: usize,

    /// Smallest generated value
    #[arg(long, default_value_t = -100_000, value_name = "VALUE", allow_hyphen_values = true)]
    min: i32,

    /// Largest generated value
    #[arg(long, default_value_t = 300_000, value_name = "VALUE", allow_hyphen_values = true)]
    max: i32,

    /// Fraction of the array generated pre-sorted, 0.0 to 1.0
    #[arg(long, default_value_t = 0.0, value_name = "FRACTION")]
    sorted: f32,

    /// Increment jobs per shared-counter campaign
    #[arg(long, default_value_t = 1000, value_name = "JOBS")]
    tasks: usize,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let threads = cli.threads.unwrap_or_else(|| num_cpus::get() as u32);
    let pool = SharedQueueThreadPool::new(threads)?;

    info!("parsort {}", env!("CARGO_PKG_VERSION"));
    info!("workers: {}, array size: {}", threads, cli.size);

    let mut serial = generate_ints(cli.size, cli.min, cli.max, cli.sorted, Direction::Ascending);
    let start = Instant::now();
    merge_sort(&mut serial);
    let serial_ms = start.elapsed().as_secs_f64() * 1000.0;
    println!(
        "single-threaded merge sort: {serial_ms:.2} ms, sorted: {}",
        is_sorted_ascending(&serial)
    );

    let mut forked = generate_ints(cli.size, cli.min, cli.max, cli.sorted, Direction::Ascending);
    let start = Instant::now();
    parallel_merge_sort(&pool, &mut forked, threads)?;
    let forked_ms = start.elapsed().as_secs_f64() * 1000.0;
    println!(
        "fork-join merge sort: {forked_ms:.2} ms, sorted: {}",
        is_sorted_ascending(&forked)
    );

    let racy = racy_increments(&pool, cli.tasks)?;
    let guarded = guarded_increments(&pool, cli.tasks)?;
    println!("unguarded counter: {racy} of {}", cli.tasks);
    println!("guarded counter: {guarded} of {}", cli.tasks);

    pool.shutdown()
}
