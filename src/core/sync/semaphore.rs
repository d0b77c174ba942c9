/*!
 * Counting Semaphore Adapters
 *
 * Bounded admission built on a bounded channel: each buffered message is one
 * held permit, so a full channel means no permit is available.
 *
 * Two disciplines share the same semaphore:
 * - [`SemaphoreAdmission`] blocks until a permit frees up
 * - [`RetrySemaphore`] makes a bounded number of non-blocking attempts and
 *   silently skips the critical section when all of them fail
 */

use super::gauge::ActivityGauge;
use super::traits::{Primitive, PrimitiveKind};
use flume::{Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use tracing::trace;

/// Counting semaphore with `permits` slots
pub struct Semaphore {
    held_tx: Sender<()>,
    held_rx: Receiver<()>,
    permits: usize,
}

impl Semaphore {
    /// Create a semaphore; `permits` must be non-zero
    pub fn new(permits: usize) -> Self {
        assert!(permits > 0, "Semaphore needs at least one permit");
        let (held_tx, held_rx) = flume::bounded(permits);
        Self {
            held_tx,
            held_rx,
            permits,
        }
    }

    /// Block until a permit is available
    pub fn acquire(&self) -> Permit<'_> {
        // Both ends live in `self`, so the channel never disconnects
        let _ = self.held_tx.send(());
        Permit { semaphore: self }
    }

    /// Take a permit only if one is free right now
    pub fn try_acquire(&self) -> Option<Permit<'_>> {
        match self.held_tx.try_send(()) {
            Ok(()) => Some(Permit { semaphore: self }),
            Err(TrySendError::Full(())) | Err(TrySendError::Disconnected(())) => None,
        }
    }

    /// Permits not currently held
    pub fn available(&self) -> usize {
        self.permits.saturating_sub(self.held_tx.len())
    }

    fn release(&self) {
        // The caller holds a permit, so at least one message is buffered
        let _ = self.held_rx.try_recv();
    }
}

/// A held permit; released on drop
pub struct Permit<'a> {
    semaphore: &'a Semaphore,
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.semaphore.release();
    }
}

/// Blocking bounded admission (at most K actors inside)
pub struct SemaphoreAdmission {
    semaphore: Semaphore,
    gauge: ActivityGauge,
    completed: AtomicU64,
}

impl SemaphoreAdmission {
    pub fn new(permits: usize) -> Self {
        Self {
            semaphore: Semaphore::new(permits),
            gauge: ActivityGauge::new(),
            completed: AtomicU64::new(0),
        }
    }

    /// Critical sections executed so far
    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// Highest number of actors observed inside at once
    pub fn peak_active(&self) -> usize {
        self.gauge.peak()
    }

    pub fn semaphore(&self) -> &Semaphore {
        &self.semaphore
    }
}

impl Primitive for SemaphoreAdmission {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::Semaphore
    }

    fn run_actor(&self) {
        let _permit = self.semaphore.acquire();
        let _inside = self.gauge.enter();
        self.completed.fetch_add(1, Ordering::AcqRel);
    }
}

/// Outcome of one bounded acquisition sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Entered the critical section on attempt `attempts`
    Entered { attempts: u32 },
    /// Every attempt failed; the critical section was skipped
    Abandoned { attempts: u32 },
}

impl Admission {
    #[inline]
    pub fn attempts(&self) -> u32 {
        match self {
            Admission::Entered { attempts } | Admission::Abandoned { attempts } => *attempts,
        }
    }

    #[inline]
    pub fn entered(&self) -> bool {
        matches!(self, Admission::Entered { .. })
    }
}

/// Best-effort bounded admission with a fixed attempt budget (R)
///
/// Exhausting the budget is not an error. The actor simply does not run
/// the critical section, and only the `abandoned` counter records it.
pub struct RetrySemaphore {
    semaphore: Semaphore,
    retries: u32,
    gauge: ActivityGauge,
    successes: AtomicU64,
    attempts: AtomicU64,
    abandoned: AtomicU64,
}

impl RetrySemaphore {
    /// `retries` must be non-zero
    pub fn new(permits: usize, retries: u32) -> Self {
        assert!(retries > 0, "RetrySemaphore needs at least one attempt");
        Self {
            semaphore: Semaphore::new(permits),
            retries,
            gauge: ActivityGauge::new(),
            successes: AtomicU64::new(0),
            attempts: AtomicU64::new(0),
            abandoned: AtomicU64::new(0),
        }
    }

    /// Try up to R times, yielding between attempts
    pub fn try_enter(&self) -> Admission {
        for attempt in 1..=self.retries {
            self.attempts.fetch_add(1, Ordering::AcqRel);

            if let Some(_permit) = self.semaphore.try_acquire() {
                let _inside = self.gauge.enter();
                self.successes.fetch_add(1, Ordering::AcqRel);
                return Admission::Entered { attempts: attempt };
            }

            if attempt < self.retries {
                thread::yield_now();
            }
        }

        self.abandoned.fetch_add(1, Ordering::AcqRel);
        trace!(retries = self.retries, "retry semaphore exhausted, skipping");
        Admission::Abandoned {
            attempts: self.retries,
        }
    }

    pub fn semaphore(&self) -> &Semaphore {
        &self.semaphore
    }

    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::Acquire)
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Acquire)
    }

    pub fn abandoned(&self) -> u64 {
        self.abandoned.load(Ordering::Acquire)
    }

    pub fn peak_active(&self) -> usize {
        self.gauge.peak()
    }
}

impl Primitive for RetrySemaphore {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::RetrySemaphore
    }

    fn run_actor(&self) {
        self.try_enter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_acquire_exhausts() {
        let sem = Semaphore::new(2);
        let a = sem.try_acquire();
        let b = sem.try_acquire();
        assert!(a.is_some() && b.is_some());
        assert_eq!(sem.available(), 0);
        assert!(sem.try_acquire().is_none());

        drop(a);
        assert_eq!(sem.available(), 1);
        assert!(sem.try_acquire().is_some());
    }

    #[test]
    fn test_blocking_acquire_waits_for_release() {
        let sem = Semaphore::new(1);
        let held = sem.acquire();

        thread::scope(|s| {
            let waiter = s.spawn(|| {
                let _permit = sem.acquire();
            });

            thread::sleep(std::time::Duration::from_millis(50));
            assert!(!waiter.is_finished());

            drop(held);
            waiter.join().unwrap();
        });

        assert_eq!(sem.available(), 1);
    }

    #[test]
    fn test_admission_bound() {
        let adapter = SemaphoreAdmission::new(3);

        thread::scope(|s| {
            for _ in 0..12 {
                s.spawn(|| {
                    for _ in 0..200 {
                        adapter.run_actor();
                    }
                });
            }
        });

        assert_eq!(adapter.completed(), 2_400);
        assert!(adapter.peak_active() <= 3);
        assert_eq!(adapter.semaphore().available(), 3);
    }

    #[test]
    fn test_retry_abandons_when_full() {
        let retry = RetrySemaphore::new(1, 5);
        let _held = retry.semaphore.acquire();

        let outcome = retry.try_enter();
        assert_eq!(outcome, Admission::Abandoned { attempts: 5 });
        assert_eq!(retry.attempts(), 5);
        assert_eq!(retry.abandoned(), 1);
        assert_eq!(retry.successes(), 0);
    }

    #[test]
    fn test_retry_enters_first_attempt_when_free() {
        let retry = RetrySemaphore::new(3, 5);
        assert_eq!(retry.try_enter(), Admission::Entered { attempts: 1 });
        assert_eq!(retry.successes(), 1);
    }
}
