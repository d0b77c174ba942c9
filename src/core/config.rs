/*!
 * Benchmark Configuration
 *
 * Runtime configuration for workload size and primitive parameters
 */

use super::errors::{ConfigError, ConfigResult};
use super::limits::{
    DEFAULT_ACTORS, DEFAULT_MONITOR_GRACE, DEFAULT_PERMITS, DEFAULT_RETRIES,
    DEFAULT_SPIN_DURATION, DEFAULT_SPIN_ITERATIONS, DEFAULT_TRIALS, DEFAULT_WORKER_COUNT,
};
use std::str::FromStr;
use std::time::Duration;

/// Benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Actors launched per trial (N)
    pub actors: usize,
    /// Semaphore permits (K)
    pub permits: usize,
    /// Acquisition attempts for the retry semaphore (R)
    pub retries: u32,
    /// Trials per run (B)
    pub trials: u32,
    /// Maximum polls per spin-wait
    pub spin_iterations: u32,
    /// Maximum wall time per spin-wait
    pub spin_duration: Duration,
    /// Pause before the monitor broadcast
    pub grace_delay: Duration,
    /// Generated workers for the aggregation demo
    pub worker_count: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            actors: DEFAULT_ACTORS,
            permits: DEFAULT_PERMITS,
            retries: DEFAULT_RETRIES,
            trials: DEFAULT_TRIALS,
            spin_iterations: DEFAULT_SPIN_ITERATIONS,
            spin_duration: DEFAULT_SPIN_DURATION,
            grace_delay: DEFAULT_MONITOR_GRACE,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }
}

impl BenchConfig {
    /// Configuration for smoke runs (few trials)
    pub const fn quick() -> Self {
        Self {
            actors: DEFAULT_ACTORS,
            permits: DEFAULT_PERMITS,
            retries: DEFAULT_RETRIES,
            trials: 10,
            spin_iterations: DEFAULT_SPIN_ITERATIONS,
            spin_duration: DEFAULT_SPIN_DURATION,
            grace_delay: DEFAULT_MONITOR_GRACE,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }

    /// Configuration for stable numbers on loaded machines
    ///
    /// Longer grace delay makes a lost monitor wakeup less likely.
    pub const fn thorough() -> Self {
        Self {
            actors: DEFAULT_ACTORS,
            permits: DEFAULT_PERMITS,
            retries: DEFAULT_RETRIES,
            trials: 1_000,
            spin_iterations: DEFAULT_SPIN_ITERATIONS,
            spin_duration: DEFAULT_SPIN_DURATION,
            grace_delay: Duration::from_millis(5),
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }

    /// Load configuration from `BENCH_*` environment variables
    ///
    /// Environment variables:
    /// - BENCH_ACTORS, BENCH_PERMITS, BENCH_RETRIES, BENCH_TRIALS
    /// - BENCH_SPIN_ITERATIONS
    /// - BENCH_SPIN_MICROS, BENCH_GRACE_MICROS (microseconds)
    /// - BENCH_WORKERS (aggregation demo size)
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_key(&lookup, "BENCH_ACTORS")? {
            config.actors = v;
        }
        if let Some(v) = parse_key(&lookup, "BENCH_PERMITS")? {
            config.permits = v;
        }
        if let Some(v) = parse_key(&lookup, "BENCH_RETRIES")? {
            config.retries = v;
        }
        if let Some(v) = parse_key(&lookup, "BENCH_TRIALS")? {
            config.trials = v;
        }
        if let Some(v) = parse_key(&lookup, "BENCH_SPIN_ITERATIONS")? {
            config.spin_iterations = v;
        }
        if let Some(v) = parse_key(&lookup, "BENCH_SPIN_MICROS")? {
            config.spin_duration = Duration::from_micros(v);
        }
        if let Some(v) = parse_key(&lookup, "BENCH_GRACE_MICROS")? {
            config.grace_delay = Duration::from_micros(v);
        }
        if let Some(v) = parse_key(&lookup, "BENCH_WORKERS")? {
            config.worker_count = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall every actor
    ///
    /// Zero actors is allowed: a trial with no actors completes immediately.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.permits == 0 {
            return Err(out_of_range("BENCH_PERMITS", "semaphore needs at least one permit"));
        }
        if self.retries == 0 {
            return Err(out_of_range("BENCH_RETRIES", "retry semaphore needs at least one attempt"));
        }
        if self.trials == 0 {
            return Err(out_of_range("BENCH_TRIALS", "a run needs at least one trial"));
        }
        Ok(())
    }
}

fn parse_key<F, T>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
    }
}

fn out_of_range(key: &str, reason: &str) -> ConfigError {
    ConfigError::OutOfRange {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
