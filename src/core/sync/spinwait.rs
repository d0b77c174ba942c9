/*!
 * Bounded Spin-Wait
 *
 * Optimistic short-wait polling: check a condition in a tight loop until it
 * holds or the spin budget (iterations or wall time) runs out.
 *
 * # Design: Spin Only
 *
 * There is no yield phase and no park fallback. The actor keeps its
 * scheduling slot for the whole budget, which is exactly the overhead the
 * benchmark measures against the blocking primitives.
 */

use super::traits::{Primitive, PrimitiveKind};
use std::time::{Duration, Instant};

/// Outcome of a bounded spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinOutcome {
    /// Condition held after `spins` polls
    Satisfied { spins: u32 },
    /// Budget exhausted after `spins` polls
    Exhausted { spins: u32 },
}

impl SpinOutcome {
    #[inline]
    pub fn spins(&self) -> u32 {
        match self {
            SpinOutcome::Satisfied { spins } | SpinOutcome::Exhausted { spins } => *spins,
        }
    }

    #[inline]
    pub fn is_satisfied(&self) -> bool {
        matches!(self, SpinOutcome::Satisfied { .. })
    }
}

/// Bounded spin-wait
///
/// # Performance
///
/// - No shared state: actors never contend with each other
/// - Each poll is one `spin_loop()` hint plus one clock read
#[derive(Debug, Clone, Copy)]
pub struct SpinWait {
    /// Maximum polls
    max_spins: u32,
    /// Maximum wall time
    spin_duration: Duration,
}

impl SpinWait {
    pub const fn new(max_spins: u32, spin_duration: Duration) -> Self {
        Self {
            max_spins,
            spin_duration,
        }
    }

    /// Poll `check` until it returns true or the budget runs out
    pub fn spin_until(&self, mut check: impl FnMut() -> bool) -> SpinOutcome {
        let start = Instant::now();
        let mut spins = 0u32;

        loop {
            if check() {
                return SpinOutcome::Satisfied { spins };
            }

            if spins >= self.max_spins || start.elapsed() >= self.spin_duration {
                return SpinOutcome::Exhausted { spins };
            }

            std::hint::spin_loop();
            spins += 1;
        }
    }
}

impl Primitive for SpinWait {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::SpinWait
    }

    /// Spin on a condition that never holds, spending the full budget
    fn run_actor(&self) {
        self.spin_until(|| false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    #[test]
    fn test_exhausts_iteration_budget() {
        let sw = SpinWait::new(50, Duration::from_secs(10));
        let outcome = sw.spin_until(|| false);
        assert_eq!(outcome, SpinOutcome::Exhausted { spins: 50 });
    }

    #[test]
    fn test_exhausts_time_budget() {
        let sw = SpinWait::new(u32::MAX, Duration::from_millis(20));
        let start = Instant::now();
        let outcome = sw.spin_until(|| false);

        assert!(!outcome.is_satisfied());
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_immediate_condition() {
        let sw = SpinWait::new(10, Duration::from_micros(10));
        assert_eq!(sw.spin_until(|| true), SpinOutcome::Satisfied { spins: 0 });
    }

    #[test]
    fn test_observes_flag_from_other_thread() {
        let sw = SpinWait::new(u32::MAX, Duration::from_secs(5));
        let flag = AtomicBool::new(false);

        let outcome = thread::scope(|s| {
            let spinner = s.spawn(|| sw.spin_until(|| flag.load(Ordering::Acquire)));
            thread::sleep(Duration::from_millis(10));
            flag.store(true, Ordering::Release);
            spinner.join().unwrap()
        });

        assert!(outcome.is_satisfied());
    }
}
