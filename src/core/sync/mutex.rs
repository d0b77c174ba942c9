/*!
 * Mutex Adapter
 *
 * Blocking mutual exclusion around a shared counter increment.
 * Waiters park in parking_lot's queue instead of spinning.
 */

use super::traits::{Primitive, PrimitiveKind};
use parking_lot::Mutex;

/// Shared counter guarded by a parking mutex
///
/// The guard releases the lock on every exit path, including unwinding.
/// No fairness guarantee beyond what parking_lot provides.
#[derive(Debug, Default)]
pub struct MutexCounter {
    counter: Mutex<u64>,
}

impl MutexCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-modify-write under the lock
    #[inline]
    pub fn increment(&self) {
        let mut guard = self.counter.lock();
        *guard += 1;
    }

    /// Current counter value; accumulates across trials
    pub fn count(&self) -> u64 {
        *self.counter.lock()
    }
}

impl Primitive for MutexCounter {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::Mutex
    }

    fn run_actor(&self) {
        self.increment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_increments() {
        let counter = MutexCounter::new();

        thread::scope(|s| {
            for _ in 0..16 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        counter.run_actor();
                    }
                });
            }
        });

        assert_eq!(counter.count(), 16_000);
    }

    #[test]
    fn test_lock_released_after_panic() {
        let counter = MutexCounter::new();

        let result = thread::scope(|s| {
            s.spawn(|| {
                let _guard = counter.counter.lock();
                panic!("critical section failed");
            })
            .join()
        });
        assert!(result.is_err());

        // parking_lot does not poison; the guard was dropped during unwind
        counter.increment();
        assert_eq!(counter.count(), 1);
    }
}
