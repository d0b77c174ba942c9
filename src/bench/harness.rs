/*!
 * Benchmark Harness
 *
 * Launches a fixed cohort of actor threads per trial, each running one work
 * unit under the primitive, and measures wall-clock time across trials.
 */

use crate::core::config::BenchConfig;
use crate::core::errors::{HarnessError, HarnessResult};
use crate::core::sync::{Primitive, PrimitiveKind};
use serde::{Deserialize, Serialize};
use std::io;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Aggregate timing for one primitive over B trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub primitive: PrimitiveKind,
    pub actors: usize,
    pub trials: u32,
    /// Total wall time across all trials
    pub total_us: u64,
    /// Mean wall time per trial
    pub mean_trial_us: f64,
}

impl RunReport {
    fn new(primitive: PrimitiveKind, actors: usize, trials: u32, total: Duration) -> Self {
        let total_us = total.as_micros().min(u64::MAX as u128) as u64;
        let mean_trial_us = if trials == 0 {
            0.0
        } else {
            total.as_secs_f64() * 1_000_000.0 / trials as f64
        };
        Self {
            primitive,
            actors,
            trials,
            total_us,
            mean_trial_us,
        }
    }

    pub fn total(&self) -> Duration {
        Duration::from_micros(self.total_us)
    }
}

/// Trial runner with a fixed actor count (N)
#[derive(Debug, Clone, Copy)]
pub struct Harness {
    actors: usize,
}

impl Harness {
    pub const fn new(actors: usize) -> Self {
        Self { actors }
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        Self::new(config.actors)
    }

    /// One launch-and-join cycle of the cohort
    ///
    /// Blocks until every actor has finished or given up. A primitive that
    /// never releases its actors (a short barrier cohort, a lost monitor
    /// wakeup) makes this call hang.
    ///
    /// If an actor thread cannot be spawned, the primitive is told to abort
    /// the trial, the actors already running are joined, and the spawn
    /// failure is returned.
    pub fn run_trial(&self, primitive: &dyn Primitive) -> HarnessResult<Duration> {
        self.run_trial_with(primitive, |actor| {
            Ok(thread::Builder::new().name(format!("{}-{}", primitive.name(), actor)))
        })
    }

    fn run_trial_with<B>(&self, primitive: &dyn Primitive, builder: B) -> HarnessResult<Duration>
    where
        B: Fn(usize) -> io::Result<thread::Builder>,
    {
        primitive.prepare_trial(self.actors);
        let start = Instant::now();

        thread::scope(|s| -> HarnessResult<()> {
            let mut handles = Vec::with_capacity(self.actors);
            let mut spawn_error = None;
            for actor in 0..self.actors {
                match builder(actor).and_then(|b| b.spawn_scoped(s, move || primitive.run_actor())) {
                    Ok(handle) => handles.push(handle),
                    Err(err) => {
                        spawn_error = Some(err);
                        break;
                    }
                }
            }

            if spawn_error.is_some() {
                primitive.abort_trial();
            } else {
                primitive.after_spawn(self.actors);
            }

            // Join every actor before reporting, or the scope re-panics
            let mut panicked = None;
            for (actor, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() && panicked.is_none() {
                    panicked = Some(actor);
                }
            }

            if let Some(err) = spawn_error {
                warn!(error = %err, "actor spawn failed, trial aborted");
                return Err(err.into());
            }

            match panicked {
                Some(actor) => Err(HarnessError::ActorPanicked {
                    primitive: primitive.name().to_string(),
                    actor,
                }),
                None => Ok(()),
            }
        })?;

        Ok(start.elapsed())
    }

    /// Run `trials` trials and report the aggregate
    #[instrument(skip(self, primitive), fields(primitive = primitive.name(), actors = self.actors))]
    pub fn run(&self, primitive: &dyn Primitive, trials: u32) -> HarnessResult<RunReport> {
        let mut total = Duration::ZERO;

        for trial in 0..trials {
            let elapsed = self.run_trial(primitive)?;
            debug!(trial, elapsed_us = elapsed.as_micros() as u64, "trial complete");
            total += elapsed;
        }

        let report = RunReport::new(primitive.kind(), self.actors, trials, total);
        info!(
            trials,
            elapsed_us = report.total_us,
            mean_trial_us = report.mean_trial_us,
            "run complete"
        );
        Ok(report)
    }
}
