//! Wall-clock time sources
//!
//! The scheduler samples time through [`TimeSource`] so tests and replays can
//! substitute a hand-driven clock for the real one.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic wall-clock time in seconds
pub trait TimeSource {
    /// Current time in seconds since an arbitrary, fixed origin
    fn now(&self) -> f64;
}

/// Real monotonic time, measured from construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven time for deterministic runs
///
/// Clones share the same underlying value, so a test can keep one handle and
/// give another to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Set the current time
    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    /// Move the current time forward by `delta` seconds
    pub fn advance(&self, delta: f64) {
        self.now.set(self.now.get() + delta);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_time_does_not_go_backwards() {
        let time = MonotonicTime::new();
        let a = time.now();
        let b = time.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[test]
    fn test_manual_time_shared_between_clones() {
        let time = ManualTime::new(1.0);
        let handle = time.clone();
        handle.advance(0.5);
        assert_eq!(time.now(), 1.5);
        handle.set(10.0);
        assert_eq!(time.now(), 10.0);
    }
}
