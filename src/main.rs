/*!
 * Sync Bench - Main Entry Point
 *
 * Runs every concurrency primitive through the harness, then the
 * sequential vs parallel aggregation demo.
 */

use miette::Result;
use tracing::{info, warn};

use sync_bench::aggregate::{analyze, generate_workers, sample_workers, Analysis, Mode, Worker};
use sync_bench::{init_tracing, run_suite, BenchConfig, ReportFormat, Reporter};

fn main() -> Result<()> {
    init_tracing();

    let config = BenchConfig::from_env()?;
    info!(
        actors = config.actors,
        permits = config.permits,
        retries = config.retries,
        trials = config.trials,
        workers = config.worker_count,
        "Sync bench starting"
    );
    warn!(
        grace_us = config.grace_delay.as_micros() as u64,
        "Monitor broadcast relies on a grace delay; a late waiter hangs the run"
    );

    let reporter = Reporter::stdout(ReportFormat::from_env());
    let reports = run_suite(&config, &reporter)?;
    info!(primitives = reports.len(), "Primitive suite complete");

    let position = "D";
    run_aggregation("Sample roster", &sample_workers(), position);

    let workers = generate_workers(config.worker_count, &mut rand::thread_rng());
    run_aggregation("Generated workers", &workers, position);

    Ok(())
}

fn run_aggregation(label: &str, workers: &[Worker], position: &str) {
    info!(label, workers = workers.len(), position, "Running aggregation demo");
    for mode in [Mode::Sequential, Mode::Parallel] {
        print_analysis(label, &analyze(workers, position, mode));
    }
}

fn print_analysis(label: &str, analysis: &Analysis) {
    println!("{} ({}):", label, analysis.mode);
    println!("  Average age: {:.2}", analysis.average_age);
    println!("  Max salary: {:.2}", analysis.max_salary);
    println!("  Elapsed: {:?}", analysis.elapsed);
    println!();
}
