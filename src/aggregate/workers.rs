/*!
 * Worker Statistics
 *
 * Average age and maximum salary per position, computed in two phases over
 * a fixed three-way partition of the worker list.
 */

use super::partition::map_reduce;
use crate::core::limits::{AGE_TOLERANCE, AGGREGATE_PARTITIONS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Position codes used by the generator
pub const POSITIONS: [&str; 2] = ["D", "S"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub name: String,
    pub position: String,
    pub age: u32,
    pub salary: f64,
}

impl Worker {
    pub fn new(name: impl Into<String>, position: impl Into<String>, age: u32, salary: f64) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            age,
            salary,
        }
    }
}

/// Mean age of workers holding `position`; 0 when none do
pub fn average_age(workers: &[Worker], position: &str) -> f64 {
    let (total, count) = workers
        .iter()
        .filter(|w| w.position == position)
        .fold((0u64, 0u64), |(total, count), w| (total + w.age as u64, count + 1));

    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Highest salary among `position` holders within [`AGE_TOLERANCE`] years of `avg_age`
///
/// 0 when nobody qualifies.
pub fn max_salary_near_age(workers: &[Worker], position: &str, avg_age: f64) -> f64 {
    workers
        .iter()
        .filter(|w| w.position == position && (w.age as f64 - avg_age).abs() <= AGE_TOLERANCE)
        .fold(0.0, |max, w| if w.salary > max { w.salary } else { max })
}

/// How chunks are mapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Sequential,
    Parallel,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sequential => f.write_str("sequential"),
            Mode::Parallel => f.write_str("parallel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub mode: Mode,
    pub average_age: f64,
    pub max_salary: f64,
    pub elapsed: Duration,
}

/// Two-phase analysis over [`AGGREGATE_PARTITIONS`] chunks
///
/// Phase one averages the per-chunk mean ages, skipping chunks with no
/// matching worker. This is a mean of means, not the population mean, when
/// chunks hold different numbers of matches. Phase two takes the maximum of
/// the per-chunk salary maxima around that average.
pub fn analyze(workers: &[Worker], position: &str, mode: Mode) -> Analysis {
    let start = Instant::now();
    let parallel = mode == Mode::Parallel;

    let (sum, chunks) = map_reduce(
        workers,
        AGGREGATE_PARTITIONS,
        parallel,
        |chunk| average_age(chunk, position),
        (0.0, 0u32),
        |(sum, chunks), avg| {
            if avg > 0.0 {
                (sum + avg, chunks + 1)
            } else {
                (sum, chunks)
            }
        },
    );
    let average_age = if chunks > 0 { sum / chunks as f64 } else { 0.0 };

    let max_salary = map_reduce(
        workers,
        AGGREGATE_PARTITIONS,
        parallel,
        |chunk| max_salary_near_age(chunk, position, average_age),
        0.0,
        f64::max,
    );

    let elapsed = start.elapsed();
    debug!(%mode, workers = workers.len(), elapsed_us = elapsed.as_micros() as u64, "analysis complete");

    Analysis {
        mode,
        average_age,
        max_salary,
        elapsed,
    }
}

/// Random workers: uniform position, age 20..=60, whole salary 30 000..100 000
pub fn generate_workers<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Worker> {
    (0..count)
        .map(|i| {
            let position = POSITIONS[rng.gen_range(0..POSITIONS.len())];
            let age = rng.gen_range(20..=60);
            let salary = rng.gen_range(30_000u32..100_000) as f64;
            Worker::new(format!("Worker {}", i), position, age, salary)
        })
        .collect()
}

/// Fixed five-worker roster
pub fn sample_workers() -> Vec<Worker> {
    vec![
        Worker::new("Ivan Ivanov", "D", 30, 50_000.0),
        Worker::new("Petr Petrov", "D", 32, 60_000.0),
        Worker::new("Sidor Sidorov", "D", 28, 55_000.0),
        Worker::new("Olga Kuznetsova", "S", 40, 70_000.0),
        Worker::new("Alexei Morozov", "S", 42, 75_000.0),
    ]
}
