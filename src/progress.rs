//! Shared progress accounting and cooperative cancellation.
//!
//! A [`Progress`] counts curve comparisons against a known total. Worker
//! threads add ticks and any other thread may poll [`Progress::value`] to
//! drive a progress display. Nothing is pushed to the observer.
//!
//! A [`CancellationToken`] is a cloneable flag. The matcher checks it between
//! bundle comparisons and stops early once it is set.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Thread-safe monotonic counter with a known upper bound.
///
/// # Example
///
/// ```
/// use tractum::Progress;
///
/// let progress = Progress::new();
/// progress.reset(10);
/// progress.increment();
/// progress.add(4);
/// assert_eq!(progress.value(), 5);
/// assert_eq!(progress.fraction(), 0.5);
/// ```
#[derive(Debug, Default)]
pub struct Progress {
    value: AtomicU64,
    total: AtomicU64,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the counter back to zero with a new upper bound.
    ///
    /// The value is cleared before the new total is published, so a reader
    /// never pairs the previous run's ticks with the new total.
    pub fn reset(&self, total: u64) {
        self.value.store(0, Ordering::Release);
        self.total.store(total, Ordering::Release);
    }

    /// Adds a single tick.
    #[inline]
    pub fn increment(&self) {
        self.add(1);
    }

    /// Adds `ticks` in one atomic step.
    #[inline]
    pub fn add(&self, ticks: u64) {
        if ticks > 0 {
            self.value.fetch_add(ticks, Ordering::AcqRel);
        }
    }

    /// Ticks recorded since the last reset.
    pub fn value(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Upper bound set by the last reset.
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Acquire)
    }

    /// Reads `(value, total)` from the same run.
    ///
    /// Retries if a reset lands between the two loads.
    pub fn snapshot(&self) -> (u64, u64) {
        loop {
            let total = self.total();
            let value = self.value();
            if self.total() == total {
                return (value, total);
            }
        }
    }

    /// Completed share in `[0, 1]`. An empty total counts as done.
    pub fn fraction(&self) -> f64 {
        let (value, total) = self.snapshot();
        if total == 0 {
            return 1.0;
        }
        (value as f64 / total as f64).min(1.0)
    }

    /// True once the counter has reached its total.
    pub fn is_complete(&self) -> bool {
        let (value, total) = self.snapshot();
        value >= total
    }
}

/// Cloneable cancellation flag shared between a caller and the matcher.
///
/// Cancelling is sticky: once set, every clone observes it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_reset_clears_value() {
        let progress = Progress::new();
        progress.reset(3);
        progress.add(3);
        assert!(progress.is_complete());

        progress.reset(8);
        assert_eq!(progress.value(), 0);
        assert_eq!(progress.total(), 8);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_concurrent_increments() {
        let progress = Arc::new(Progress::new());
        progress.reset(8 * 1000);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let progress = Arc::clone(&progress);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        progress.increment();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(progress.value(), 8000);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_reset_to_smaller_total() {
        let progress = Progress::new();
        progress.reset(1000);
        progress.add(900);
        progress.reset(4);
        assert_eq!(progress.snapshot(), (0, 4));
        progress.add(4);
        assert_eq!(progress.snapshot(), (4, 4));
    }

    #[test]
    fn test_fraction() {
        let progress = Progress::new();
        assert_eq!(progress.fraction(), 1.0);
        progress.reset(4);
        progress.add(1);
        assert_eq!(progress.fraction(), 0.25);
    }

    #[test]
    fn test_cancellation_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
