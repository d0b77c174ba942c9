/*!
 * Benchmark Limits and Constants
 *
 * Centralized location for workload sizes, admission bounds and timing knobs.
 * Organized by domain so every primitive is measured against the same numbers.
 *
 * ## Conventions
 * - Values shared by every primitive are marked with [SHARED]
 * - Timing heuristics that affect correctness are marked with [RACE]
 */

use std::time::Duration;

// =============================================================================
// WORKLOAD
// =============================================================================

/// Actors launched per trial
/// [SHARED] Identical across all primitives for comparability
pub const DEFAULT_ACTORS: usize = 10;

/// Trials per benchmark run when the driver does not supply one
pub const DEFAULT_TRIALS: u32 = 100;

// =============================================================================
// ADMISSION
// =============================================================================

/// Permits in the counting semaphore (K)
pub const DEFAULT_PERMITS: usize = 3;

/// Non-blocking acquisition attempts before an actor abandons (R)
pub const DEFAULT_RETRIES: u32 = 5;

// =============================================================================
// SPINNING
// =============================================================================

/// Maximum polls per spin-wait
pub const DEFAULT_SPIN_ITERATIONS: u32 = 100;

/// Maximum wall time per spin-wait
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_micros(10);

// =============================================================================
// MONITOR
// =============================================================================

/// Pause between spawning monitor waiters and broadcasting
/// [RACE] Heuristic only: a waiter scheduled after the broadcast blocks forever
pub const DEFAULT_MONITOR_GRACE: Duration = Duration::from_millis(1);

// =============================================================================
// AGGREGATION DEMO
// =============================================================================

/// Fixed number of chunks the worker list is split into
pub const AGGREGATE_PARTITIONS: usize = 3;

/// Maximum distance in years from the average age for the salary search
pub const AGE_TOLERANCE: f64 = 2.0;

/// Generated workers when `BENCH_WORKERS` is unset
pub const DEFAULT_WORKER_COUNT: usize = 100_000;
