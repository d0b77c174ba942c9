/*!
 * Monitor Adapter
 *
 * Actors lock the monitor and block on its condition variable until the
 * coordinating thread broadcasts. The broadcast wakes every waiter at once.
 *
 * # Known Race
 *
 * The coordinator cannot tell when every actor has reached the wait, so it
 * sleeps for a fixed grace delay and then broadcasts. An actor scheduled
 * after the broadcast waits forever and the trial never completes. The
 * delay is a heuristic, not a guarantee.
 */

use super::traits::{Primitive, PrimitiveKind};
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use tracing::trace;

/// Lock plus condition variable with broadcast-only signaling
pub struct Monitor {
    /// Set when the current trial was aborted; waits return immediately
    aborted: Mutex<bool>,
    condvar: Condvar,
    waiters: AtomicUsize,
    released: AtomicU64,
    broadcasts: AtomicU64,
    grace_delay: Duration,
}

impl Monitor {
    pub fn new(grace_delay: Duration) -> Self {
        Self {
            aborted: Mutex::new(false),
            condvar: Condvar::new(),
            waiters: AtomicUsize::new(0),
            released: AtomicU64::new(0),
            broadcasts: AtomicU64::new(0),
            grace_delay,
        }
    }

    /// Block until the next broadcast
    ///
    /// Returns `true` if released, `false` if `timeout` elapsed first. The
    /// harness always passes `None`; a timeout only exists for diagnostics.
    /// Once the trial is aborted every wait returns at once.
    pub fn wait(&self, timeout: Option<Duration>) -> bool {
        let mut guard = self.aborted.lock();
        if *guard {
            return true;
        }
        self.waiters.fetch_add(1, Ordering::AcqRel);

        let timed_out = match timeout {
            Some(timeout) => self.condvar.wait_for(&mut guard, timeout).timed_out(),
            None => {
                self.condvar.wait(&mut guard);
                false
            }
        };

        self.waiters.fetch_sub(1, Ordering::AcqRel);
        if !timed_out {
            self.released.fetch_add(1, Ordering::AcqRel);
        }
        !timed_out
    }

    /// Wake every current waiter; returns how many were woken
    pub fn broadcast(&self) -> usize {
        let _guard = self.aborted.lock();
        self.broadcasts.fetch_add(1, Ordering::AcqRel);
        let woken = self.condvar.notify_all();
        trace!(woken, "monitor broadcast");
        woken
    }

    /// Actors currently blocked in `wait`
    pub fn waiters(&self) -> usize {
        self.waiters.load(Ordering::Acquire)
    }

    /// Total waits that ended by broadcast
    pub fn released(&self) -> u64 {
        self.released.load(Ordering::Acquire)
    }

    /// Total broadcasts issued
    pub fn broadcasts(&self) -> u64 {
        self.broadcasts.load(Ordering::Acquire)
    }

    /// Release current waiters and let later waits of this trial pass
    pub fn abort(&self) {
        let mut aborted = self.aborted.lock();
        *aborted = true;
        let woken = self.condvar.notify_all();
        trace!(woken, "monitor trial aborted");
    }
}

impl Primitive for Monitor {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::Monitor
    }

    fn prepare_trial(&self, _actors: usize) {
        *self.aborted.lock() = false;
    }

    fn run_actor(&self) {
        self.wait(None);
    }

    /// Sleep the grace delay, then wake everyone
    fn after_spawn(&self, _actors: usize) {
        thread::sleep(self.grace_delay);
        self.broadcast();
    }

    fn abort_trial(&self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn wait_for_waiters(monitor: &Monitor, n: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while monitor.waiters() < n && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_broadcast_wakes_all() {
        let monitor = Monitor::new(Duration::from_millis(1));

        thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| monitor.wait(Some(Duration::from_secs(5)))))
                .collect();

            wait_for_waiters(&monitor, 4);
            assert_eq!(monitor.broadcast(), 4);

            for handle in handles {
                assert!(handle.join().unwrap());
            }
        });

        assert_eq!(monitor.waiters(), 0);
        assert_eq!(monitor.released(), 4);
    }

    #[test]
    fn test_wait_timeout_without_broadcast() {
        let monitor = Monitor::new(Duration::from_millis(1));
        let start = Instant::now();

        assert!(!monitor.wait(Some(Duration::from_millis(50))));
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(monitor.released(), 0);
    }

    #[test]
    fn test_abort_releases_current_and_late_waiters() {
        let monitor = Monitor::new(Duration::from_millis(1));
        monitor.prepare_trial(3);

        thread::scope(|s| {
            let early: Vec<_> = (0..2).map(|_| s.spawn(|| monitor.wait(None))).collect();
            wait_for_waiters(&monitor, 2);

            monitor.abort();
            for waiter in early {
                assert!(waiter.join().unwrap());
            }
        });

        assert!(monitor.wait(None));
        assert_eq!(monitor.broadcasts(), 0);

        // The next trial blocks again
        monitor.prepare_trial(1);
        assert!(!monitor.wait(Some(Duration::from_millis(20))));
    }

    #[test]
    fn test_broadcast_before_wait_is_lost() {
        let monitor = Monitor::new(Duration::from_millis(1));
        assert_eq!(monitor.broadcast(), 0);

        // A late waiter misses the earlier broadcast
        assert!(!monitor.wait(Some(Duration::from_millis(20))));
    }
}
