/*!
 * Primitive Traits
 *
 * Uniform contract shared by every synchronization discipline under benchmark.
 *
 * # Design: One Work Unit Per Actor
 *
 * The harness knows nothing about locks, permits or barriers. It only arms the
 * primitive for a trial, launches actors that each run one work unit, and
 * gives the primitive a hook to act from the coordinating thread once every
 * actor has been spawned (the monitor broadcast).
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a primitive under benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Mutex,
    Semaphore,
    RetrySemaphore,
    Barrier,
    SpinLock,
    SpinWait,
    Monitor,
}

impl PrimitiveKind {
    /// Every primitive, in reporting order
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Mutex,
        PrimitiveKind::Semaphore,
        PrimitiveKind::RetrySemaphore,
        PrimitiveKind::Barrier,
        PrimitiveKind::SpinLock,
        PrimitiveKind::SpinWait,
        PrimitiveKind::Monitor,
    ];

    /// Display name used in report headers
    pub const fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Mutex => "Mutex",
            PrimitiveKind::Semaphore => "Semaphore",
            PrimitiveKind::RetrySemaphore => "SemaphoreWithRetry",
            PrimitiveKind::Barrier => "Barrier",
            PrimitiveKind::SpinLock => "SpinLock",
            PrimitiveKind::SpinWait => "SpinWait",
            PrimitiveKind::Monitor => "Monitor",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A synchronization discipline protecting or coordinating one work unit
///
/// Implementations must be:
/// - **Thread-safe**: `run_actor` is called concurrently from every actor
/// - **Reusable**: one instance serves every trial of a run
///
/// Only the barrier needs `prepare_trial`, and only the monitor needs
/// `after_spawn`. All hooks default to no-ops.
pub trait Primitive: Send + Sync {
    /// Which discipline this is
    fn kind(&self) -> PrimitiveKind;

    /// Re-arm per-trial state before any actor is launched
    ///
    /// Called from the coordinating thread while no actor is running.
    fn prepare_trial(&self, actors: usize) {
        let _ = actors;
    }

    /// Execute one work unit under this discipline
    ///
    /// This is the only point where an actor may block or spin.
    fn run_actor(&self);

    /// Act from the coordinating thread after all actors were spawned
    fn after_spawn(&self, actors: usize) {
        let _ = actors;
    }

    /// Release every actor of a trial that could not be fully launched
    ///
    /// Called from the coordinating thread instead of `after_spawn` when an
    /// actor thread fails to spawn. Actors already running, and any that
    /// reach the primitive later in this trial, must not block forever.
    fn abort_trial(&self) {}

    /// Display name for reports
    fn name(&self) -> &'static str {
        self.kind().name()
    }
}
