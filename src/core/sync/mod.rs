/*!
 * Synchronization Primitives
 *
 * Seven textbook disciplines, each adapted to the uniform [`Primitive`]
 * contract so the harness can drive them interchangeably:
 * - Mutex: blocking mutual exclusion (parking_lot)
 * - Semaphore: blocking bounded admission (bounded channel of permits)
 * - RetrySemaphore: bounded admission with a fixed attempt budget
 * - Barrier: countdown rendezvous re-armed every trial
 * - SpinLock: mutual exclusion by compare-and-swap polling
 * - SpinWait: bounded busy-wait with no fallback
 * - Monitor: condition variable with broadcast after a grace delay
 */

mod barrier;
mod gauge;
mod monitor;
mod mutex;
mod semaphore;
mod spinlock;
mod spinwait;
mod traits;

pub use barrier::{BarrierRendezvous, CountdownLatch};
pub use gauge::{ActivityGauge, GaugeGuard};
pub use monitor::Monitor;
pub use mutex::MutexCounter;
pub use semaphore::{Admission, Permit, RetrySemaphore, Semaphore, SemaphoreAdmission};
pub use spinlock::{SpinLock, SpinLockCounter, SpinLockGuard};
pub use spinwait::{SpinOutcome, SpinWait};
pub use traits::{Primitive, PrimitiveKind};

use super::config::BenchConfig;
use super::errors::ConfigResult;
use std::sync::Arc;

/// Build the adapter for `kind` from a benchmark configuration
///
/// The configuration is validated first, so zero permits or retries come
/// back as a `ConfigError` instead of a panic in the adapter constructor.
pub fn build(kind: PrimitiveKind, config: &BenchConfig) -> ConfigResult<Arc<dyn Primitive>> {
    config.validate()?;

    let primitive: Arc<dyn Primitive> = match kind {
        PrimitiveKind::Mutex => Arc::new(MutexCounter::new()),
        PrimitiveKind::Semaphore => Arc::new(SemaphoreAdmission::new(config.permits)),
        PrimitiveKind::RetrySemaphore => {
            Arc::new(RetrySemaphore::new(config.permits, config.retries))
        }
        PrimitiveKind::Barrier => Arc::new(BarrierRendezvous::new()),
        PrimitiveKind::SpinLock => Arc::new(SpinLockCounter::new()),
        PrimitiveKind::SpinWait => {
            Arc::new(SpinWait::new(config.spin_iterations, config.spin_duration))
        }
        PrimitiveKind::Monitor => Arc::new(Monitor::new(config.grace_delay)),
    };
    Ok(primitive)
}
