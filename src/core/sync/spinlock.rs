/*!
 * SpinLock Adapter
 *
 * Mutual exclusion acquired by a compare-and-swap loop on an atomic flag.
 * Waiters never park or yield; they burn their scheduling slot polling.
 */

use super::traits::{Primitive, PrimitiveKind};
use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};

/// Test-and-test-and-set spinlock
///
/// No fairness: whichever spinner wins the CAS after release gets the lock.
pub struct SpinLock<T> {
    locked: AtomicBool,
    value: UnsafeCell<T>,
}

// Safety: access to `value` is serialized by `locked`
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    pub const fn new(value: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    /// Spin until the lock is ours
    #[inline]
    pub fn lock(&self) -> SpinLockGuard<'_, T> {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // Read-only poll keeps the cache line shared until it looks free
            while self.locked.load(Ordering::Relaxed) {
                std::hint::spin_loop();
            }
        }
        SpinLockGuard { lock: self }
    }
}

impl<T: Default> Default for SpinLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Exclusive access to a [`SpinLock`]'s value; unlocks on drop
pub struct SpinLockGuard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<T> Deref for SpinLockGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: the guard proves the lock is held
        unsafe { &*self.lock.value.get() }
    }
}

impl<T> DerefMut for SpinLockGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // Safety: the guard proves the lock is held exclusively
        unsafe { &mut *self.lock.value.get() }
    }
}

impl<T> Drop for SpinLockGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

/// Shared counter guarded by a [`SpinLock`]
#[derive(Default)]
pub struct SpinLockCounter {
    counter: SpinLock<u64>,
}

impl SpinLockCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increment(&self) {
        *self.counter.lock() += 1;
    }

    pub fn count(&self) -> u64 {
        *self.counter.lock()
    }
}

impl Primitive for SpinLockCounter {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::SpinLock
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
    fn test_guard_releases_on_drop() {
        let lock = SpinLock::new(0u32);
        *lock.lock() += 5;
        *lock.lock() += 2;
        assert_eq!(*lock.lock(), 7);
    }

    #[test]
    fn test_concurrent_increments() {
        let counter = SpinLockCounter::new();

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        counter.run_actor();
                    }
                });
            }
        });

        assert_eq!(counter.count(), 8_000);
    }

    #[test]
    fn test_guard_mutates_inner() {
        let lock = SpinLock::new(vec![1, 2]);
        lock.lock().push(3);
        assert_eq!(*lock.lock(), vec![1, 2, 3]);
    }
}
