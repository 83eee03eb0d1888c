use crate::math::{Accuracy, Wpm};
use crate::{Timestamp, minutes, round2};

/// What a logged keystroke did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A character was typed
    Char(char),
    /// The last character was deleted
    Backspace,
}

/// One accepted keypress or backspace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keystroke {
    pub key: Key,
    /// Always `false` for [`Key::Backspace`]
    pub was_correct: bool,
    /// Seconds since the session started
    pub offset: Timestamp,
}

/// Cumulative keystroke counters
///
/// `correct <= typed` holds at all times.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub correct: usize,
    pub typed: usize,
}

/// A fixed view of a session's metrics
///
/// Every field derives from a single elapsed-time reading, so `wpm` and `accuracy` always
/// describe the same instant. Floating point fields are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub wpm: f64,
    pub accuracy: f64,
    /// Configured test length in seconds
    pub duration: f64,
    pub elapsed_time: f64,
    pub correct_chars: usize,
    pub total_chars_typed: usize,
    pub total_chars_in_test: usize,
    pub cursor: usize,
}

impl Snapshot {
    /// Create a snapshot from an elapsed time and the session counters
    pub(crate) fn new(
        elapsed: Timestamp,
        duration: Timestamp,
        counters: Counters,
        total_chars_in_test: usize,
        cursor: usize,
    ) -> Self {
        let wpm = Wpm::calculate(counters.correct, minutes(elapsed));
        let accuracy = Accuracy::calculate(counters.correct, counters.typed);

        Self {
            wpm: round2(wpm.0),
            accuracy: round2(accuracy.0),
            duration,
            elapsed_time: round2(elapsed),
            correct_chars: counters.correct,
            total_chars_typed: counters.typed,
            total_chars_in_test,
            cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_counters() {
        let counters = Counters {
            correct: 9,
            typed: 10,
        };
        let snapshot = Snapshot::new(12.0, 30.0, counters, 16, 10);

        // 9 / 5 words in 0.2 minutes
        assert_eq!(snapshot.wpm, 9.0);
        assert_eq!(snapshot.accuracy, 90.0);
        assert_eq!(snapshot.duration, 30.0);
        assert_eq!(snapshot.elapsed_time, 12.0);
        assert_eq!(snapshot.correct_chars, 9);
        assert_eq!(snapshot.total_chars_typed, 10);
        assert_eq!(snapshot.total_chars_in_test, 16);
        assert_eq!(snapshot.cursor, 10);
    }

    #[test]
    fn test_snapshot_rounding() {
        let counters = Counters {
            correct: 2,
            typed: 3,
        };
        let snapshot = Snapshot::new(7.0, 60.0, counters, 3, 3);

        assert_eq!(snapshot.accuracy, 66.67);
        // (2 / 5) / (7 / 60) = 3.428...
        assert_eq!(snapshot.wpm, 3.43);
    }

    #[test]
    fn test_snapshot_without_time() {
        let snapshot = Snapshot::new(0.0, 60.0, Counters::default(), 10, 0);
        assert_eq!(snapshot.wpm, 0.0);
        assert_eq!(snapshot.accuracy, 0.0);
        assert_eq!(snapshot.elapsed_time, 0.0);
    }
}
