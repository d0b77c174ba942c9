/*!
 * Activity Gauge
 *
 * Tracks how many actors are inside a critical section right now and the
 * highest value ever observed. Used to verify admission bounds.
 */

use std::sync::atomic::{AtomicUsize, Ordering};

/// Concurrent-occupancy gauge with a high-water mark
#[derive(Debug, Default)]
#[repr(C, align(64))] // Cache-line aligned to prevent false sharing
pub struct ActivityGauge {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ActivityGauge {
    pub const fn new() -> Self {
        Self {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Record entry; the returned guard records exit on drop
    #[inline]
    pub fn enter(&self) -> GaugeGuard<'_> {
        let now = self.active.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak.fetch_max(now, Ordering::AcqRel);
        GaugeGuard { gauge: self }
    }

    /// Actors inside right now
    #[inline]
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Highest concurrent occupancy seen
    #[inline]
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }
}

/// Exit marker for [`ActivityGauge::enter`]
pub struct GaugeGuard<'a> {
    gauge: &'a ActivityGauge,
}

impl Drop for GaugeGuard<'_> {
    fn drop(&mut self) {
        self.gauge.active.fetch_sub(1, Ordering::AcqRel);
    }
}
