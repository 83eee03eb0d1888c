//! # Clock Module - Injectable Time Source
//!
//! The engine never calls the wall clock directly. Every time reading goes through the
//! [`Clock`] trait, which returns seconds since the clock's own origin. Only differences
//! between two readings are ever used, so the origin itself is meaningless.
//!
//! - [`SystemClock`] measures real time from the moment it was created.
//! - [`ManualClock`] is moved forward by hand, which makes timing in tests deterministic.
//!
//! ```rust
//! use zentype_core::{Clock, ManualClock};
//!
//! let clock = ManualClock::new();
//! let handle = clock.clone();
//!
//! handle.advance(1.5);
//! assert_eq!(clock.now(), 1.5);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use web_time::Instant;

use crate::Timestamp;

/// A source of "now", in seconds since an arbitrary origin
pub trait Clock {
    /// Read the current time
    ///
    /// Successive readings must never decrease.
    fn now(&self) -> Timestamp;
}

/// Real time, measured from the moment the clock was created
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to
///
/// Clones share the same underlying time, so a test can keep one handle while the session
/// owns another. The shared cell is not thread-safe, which matches the single-threaded
/// engine.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    /// Create a clock that reads `0.0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `seconds`
    pub fn advance(&self, seconds: Timestamp) {
        self.now.set(self.now.get() + seconds);
    }

    /// Jump to an absolute reading
    pub fn set(&self, seconds: Timestamp) {
        self.now.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        assert_eq!(clock.now(), 0.0);

        handle.advance(2.0);
        handle.advance(0.5);
        assert_eq!(clock.now(), 2.5);

        clock.set(10.0);
        assert_eq!(handle.now(), 10.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
