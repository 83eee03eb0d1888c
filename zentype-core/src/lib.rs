//! # ZenType Core - Typing Session Engine
//!
//! A small, I/O free engine for typing-speed tests. A host (a terminal UI, a GUI or a test
//! harness) feeds keystrokes into a [`TypingSession`] and polls it for live metrics.
//!
//! ## Responsibilities
//!
//! - **Session State Machine** ([`session`]): `NotStarted -> Active -> Finished`, cursor and input
//! - **Keystroke Validation** ([`input_handler`]): character comparison and the word-boundary
//!   backspace rule
//! - **Metrics** ([`math`], [`statistics`]): WPM, accuracy and the [`Snapshot`] record
//! - **History Sampling** ([`history`]): WPM-over-time series replayed from the keystroke log
//!
//! Time is read through the [`Clock`] trait, so tests can drive a session with a
//! [`ManualClock`] instead of sleeping.
//!
//! ## Usage
//!
//! ```rust
//! use zentype_core::{ManualClock, TypingSession};
//!
//! let clock = ManualClock::new();
//! let mut session = TypingSession::with_clock("hello world", 30.0, clock.clone());
//!
//! for char in "hello".chars() {
//!     session.apply_keypress(char);
//! }
//! clock.advance(6.0);
//!
//! let snapshot = session.finish();
//! assert_eq!(snapshot.correct_chars, 5);
//! assert_eq!(snapshot.wpm, 10.0);
//! assert_eq!(snapshot.accuracy, 100.0);
//! ```

pub mod buffer;
pub mod clock;
pub mod config;
pub mod history;
pub mod input_handler;
pub mod math;
pub mod session;
pub mod statistics;
pub mod statistics_tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Configuration;
pub use session::{CharacterStatus, Status, TypingSession};
pub use statistics::{Counters, Key, Keystroke, Snapshot};

/// Characters per word used by every WPM calculation
pub const AVERAGE_WORD_LENGTH: usize = 5;

/// Seconds, as read from a [`Clock`] or measured from the start of a session
pub type Timestamp = f64;
type Minutes = f64;

// Get the minutes elapsed from a timestamp
pub(crate) fn minutes(timestamp: Timestamp) -> Minutes {
    timestamp / 60.0
}

// Round a metric to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes() {
        assert_eq!(minutes(0.0), 0.0);
        assert_eq!(minutes(30.0), 0.5);
        assert_eq!(minutes(90.0), 1.5);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(75.0), 75.0);
        assert_eq!(round2(0.004), 0.0);
    }
}
