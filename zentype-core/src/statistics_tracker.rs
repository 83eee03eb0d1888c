use crate::{Counters, Key, Keystroke, Timestamp};

/// Handles statistics tracking and timing
///
/// Start and end are stored as raw clock readings; every keystroke is logged with its
/// offset from the start.
#[derive(Debug, Clone, Default)]
pub struct StatisticsTracker {
    counters: Counters,
    keystrokes: Vec<Keystroke>,
    started_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
}

impl StatisticsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cumulative counters
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Get the keystroke log
    pub fn keystrokes(&self) -> &[Keystroke] {
        &self.keystrokes
    }

    /// Start timing at `now`
    ///
    /// Returns `false` if timing had already started.
    pub fn start(&mut self, now: Timestamp) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// Check if timing has started
    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Mark the typing session as completed at `now`
    ///
    /// Only the first call records an end time, and only once timing has started.
    pub fn mark_completed(&mut self, now: Timestamp) {
        if self.started_at.is_some() && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    /// Check if the session has been completed
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Get the seconds elapsed since the start
    ///
    /// Frozen at the end time once completed, `0.0` before the start.
    pub fn elapsed(&self, now: Timestamp) -> Timestamp {
        match (self.started_at, self.completed_at) {
            (None, _) => 0.0,
            (Some(start), Some(end)) => (end - start).max(0.0),
            (Some(start), None) => (now - start).max(0.0),
        }
    }

    /// Log a typed character
    pub fn record_keypress(&mut self, char: char, is_correct: bool, now: Timestamp) {
        self.counters.typed += 1;
        if is_correct {
            self.counters.correct += 1;
        }
        self.push(Key::Char(char), is_correct, now);
    }

    /// Log a deletion
    ///
    /// A backspace uses up a keystroke but is never correct.
    pub fn record_backspace(&mut self, now: Timestamp) {
        self.counters.typed += 1;
        self.push(Key::Backspace, false, now);
    }

    fn push(&mut self, key: Key, was_correct: bool, now: Timestamp) {
        let offset = self.elapsed(now);
        self.keystrokes.push(Keystroke {
            key,
            was_correct,
            offset,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_tracker() {
        let mut stats_tracker = StatisticsTracker::new();

        // Initially no statistics
        assert_eq!(stats_tracker.counters(), Counters::default());
        assert!(!stats_tracker.has_started());
        assert_eq!(stats_tracker.elapsed(100.0), 0.0);

        assert!(stats_tracker.start(10.0));
        assert!(!stats_tracker.start(20.0));

        stats_tracker.record_keypress('x', false, 11.0);
        stats_tracker.record_keypress('b', true, 12.5);
        stats_tracker.record_backspace(13.0);

        let counters = stats_tracker.counters();
        assert_eq!(counters.correct, 1);
        assert_eq!(counters.typed, 3);

        let offsets: Vec<_> = stats_tracker.keystrokes().iter().map(|k| k.offset).collect();
        assert_eq!(offsets, vec![1.0, 2.5, 3.0]);
        assert_eq!(stats_tracker.keystrokes()[2].key, Key::Backspace);
        assert!(!stats_tracker.keystrokes()[2].was_correct);

        assert_eq!(stats_tracker.elapsed(15.0), 5.0);
    }

    #[test]
    fn test_completion_freezes_elapsed() {
        let mut stats_tracker = StatisticsTracker::new();
        stats_tracker.start(1.0);
        stats_tracker.mark_completed(4.0);
        stats_tracker.mark_completed(9.0);

        assert!(stats_tracker.is_completed());
        assert_eq!(stats_tracker.elapsed(50.0), 3.0);
    }

    #[test]
    fn test_completion_before_start() {
        let mut stats_tracker = StatisticsTracker::new();
        stats_tracker.mark_completed(4.0);

        assert!(!stats_tracker.is_completed());
        assert_eq!(stats_tracker.elapsed(4.0), 0.0);
    }
}
