/*!
 * Barrier Adapter
 *
 * Rendezvous via a countdown gate that is re-armed to the cohort size at the
 * start of every trial. The last actor to arrive opens the gate for everyone.
 *
 * A cohort smaller than the armed count never opens the gate. That hang is
 * the behavior being demonstrated, so there is no timeout.
 */

use super::traits::{Primitive, PrimitiveKind};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
struct LatchState {
    remaining: usize,
    generation: u64,
}

/// Reusable countdown gate
///
/// Waiters block until the generation advances, so a released waiter that
/// wakes late is not confused by the next `arm`.
#[derive(Debug, Default)]
pub struct CountdownLatch {
    state: Mutex<LatchState>,
    opened: Condvar,
}

impl CountdownLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the gate for `count` arrivals
    ///
    /// Must not be called while actors of the previous cohort are still waiting.
    pub fn arm(&self, count: usize) {
        self.state.lock().remaining = count;
    }

    /// Arrivals still missing before the gate opens
    pub fn remaining(&self) -> usize {
        self.state.lock().remaining
    }

    /// Open the gate without waiting for the missing arrivals
    ///
    /// Current waiters are released and later arrivals pass straight through
    /// until the next `arm`.
    pub fn open(&self) {
        let mut state = self.state.lock();
        state.remaining = 0;
        state.generation = state.generation.wrapping_add(1);
        self.opened.notify_all();
    }

    /// Count this arrival and block until the whole cohort has arrived
    ///
    /// Returns `true` for the arrival that opened the gate.
    pub fn arrive_and_wait(&self) -> bool {
        let mut state = self.state.lock();

        // Arriving at an open gate passes straight through
        if state.remaining == 0 {
            return false;
        }

        state.remaining -= 1;
        if state.remaining == 0 {
            state.generation = state.generation.wrapping_add(1);
            self.opened.notify_all();
            return true;
        }

        let generation = state.generation;
        while state.generation == generation {
            self.opened.wait(&mut state);
        }
        false
    }
}

/// Barrier discipline with an arrival counter for verification
pub struct BarrierRendezvous {
    latch: CountdownLatch,
    arrived: AtomicUsize,
    arrived_at_release: AtomicUsize,
}

impl BarrierRendezvous {
    pub fn new() -> Self {
        Self {
            latch: CountdownLatch::new(),
            arrived: AtomicUsize::new(0),
            arrived_at_release: AtomicUsize::new(usize::MAX),
        }
    }

    /// Arrivals in the current trial
    pub fn arrived(&self) -> usize {
        self.arrived.load(Ordering::Acquire)
    }

    /// Smallest arrival count any actor saw right after being released
    ///
    /// Equals the cohort size when no actor was released early. `None`
    /// until at least one actor has passed the gate this trial.
    pub fn arrived_at_release(&self) -> Option<usize> {
        match self.arrived_at_release.load(Ordering::Acquire) {
            usize::MAX => None,
            n => Some(n),
        }
    }
}

impl Default for BarrierRendezvous {
    fn default() -> Self {
        Self::new()
    }
}

impl Primitive for BarrierRendezvous {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::Barrier
    }

    fn prepare_trial(&self, actors: usize) {
        self.arrived.store(0, Ordering::Release);
        self.arrived_at_release.store(usize::MAX, Ordering::Release);
        self.latch.arm(actors);
    }

    fn run_actor(&self) {
        self.arrived.fetch_add(1, Ordering::AcqRel);
        self.latch.arrive_and_wait();
        let seen = self.arrived.load(Ordering::Acquire);
        self.arrived_at_release.fetch_min(seen, Ordering::AcqRel);
    }

    fn abort_trial(&self) {
        self.latch.open();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_latch_holds_until_last_arrival() {
        let latch = CountdownLatch::new();
        latch.arm(3);

        thread::scope(|s| {
            let first = s.spawn(|| latch.arrive_and_wait());
            let second = s.spawn(|| latch.arrive_and_wait());

            thread::sleep(Duration::from_millis(50));
            assert!(!first.is_finished());
            assert!(!second.is_finished());
            assert_eq!(latch.remaining(), 1);

            assert!(latch.arrive_and_wait());
            assert!(!first.join().unwrap());
            assert!(!second.join().unwrap());
        });
    }

    #[test]
    fn test_latch_rearm() {
        let latch = CountdownLatch::new();
        for _ in 0..3 {
            latch.arm(4);
            thread::scope(|s| {
                for _ in 0..4 {
                    s.spawn(|| latch.arrive_and_wait());
                }
            });
            assert_eq!(latch.remaining(), 0);
        }
    }

    #[test]
    fn test_open_releases_short_cohort() {
        let latch = CountdownLatch::new();
        latch.arm(5);

        thread::scope(|s| {
            let waiters: Vec<_> = (0..2).map(|_| s.spawn(|| latch.arrive_and_wait())).collect();

            while latch.remaining() > 3 {
                thread::yield_now();
            }
            latch.open();

            for waiter in waiters {
                assert!(!waiter.join().unwrap());
            }
        });

        // Late arrivals after an open pass straight through
        assert_eq!(latch.remaining(), 0);
        assert!(!latch.arrive_and_wait());
    }

    #[test]
    fn test_rendezvous_records_full_cohort() {
        let barrier = BarrierRendezvous::new();
        barrier.prepare_trial(6);
        assert_eq!(barrier.arrived_at_release(), None);

        thread::scope(|s| {
            for _ in 0..6 {
                s.spawn(|| barrier.run_actor());
            }
        });

        assert_eq!(barrier.arrived(), 6);
        assert_eq!(barrier.arrived_at_release(), Some(6));
    }
}
