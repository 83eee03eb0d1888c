//! # Session Module - Typing Session Management
//!
//! [`TypingSession`] is the engine's entry point. It owns one test attempt: the target text,
//! the test duration, what has been typed, the keystroke log and the timing.
//!
//! ## Session Lifecycle
//!
//! ```text
//!               first keypress / start()           finish()
//!  NotStarted ----------------------------> Active ----------> Finished
//!      |                                                          ^
//!      +------------------------- finish() -----------------------+
//! ```
//!
//! - The timer starts with the first keypress, or an explicit [`start`](TypingSession::start).
//! - [`finish`](TypingSession::finish) freezes the end time. Calling it again changes nothing.
//! - Nothing leaves `Finished`. [`reset`](TypingSession::reset) replaces the whole attempt
//!   with a fresh one over the same text and duration.
//!
//! Refused input (typing past the end, deleting at a word boundary, any input once
//! finished) is a silent no-op that reports the unchanged cursor.
//!
//! ## Usage Examples
//!
//! ```rust
//! use zentype_core::{CharacterStatus, ManualClock, TypingSession};
//!
//! let clock = ManualClock::new();
//! let mut session = TypingSession::with_clock("test", 60.0, clock.clone());
//!
//! assert_eq!(session.apply_keypress('t'), (true, 1));
//! assert_eq!(session.apply_keypress('x'), (false, 2));
//! assert_eq!(session.character_status(1), CharacterStatus::Error);
//!
//! clock.advance(3.0);
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.accuracy, 50.0);
//! assert_eq!(snapshot.elapsed_time, 3.0);
//! ```
//!
//! # Thread Safety
//!
//! A session is meant to be driven from a single thread. All calls are immediate and
//! bounded by the length of the text and the keystroke log.

use tracing::{debug, trace};

use crate::buffer::TargetText;
use crate::clock::{Clock, SystemClock};
use crate::config::Configuration;
use crate::history;
use crate::input_handler::{InputHandler, InputResult};
use crate::math::{Accuracy, Wpm};
use crate::statistics::{Keystroke, Snapshot};
use crate::statistics_tracker::StatisticsTracker;
use crate::{Timestamp, minutes};

/// Where a session is in its lifecycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No input yet and no timer running
    #[default]
    NotStarted,
    /// The timer is running and input is accepted
    Active,
    /// Terminal state; no further input is accepted
    Finished,
}

/// Display state of a single character of the target text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterStatus {
    /// At or past the cursor
    Unwritten,
    Correct,
    Error,
}

/// Everything that belongs to one attempt at the text
#[derive(Debug, Clone, Default)]
struct Attempt {
    status: Status,
    input_handler: InputHandler,
    statistics: StatisticsTracker,
    /// Set by the first `finish()`
    frozen: Option<Snapshot>,
}

/// A single typing test
///
/// Generic over its [`Clock`] so tests can control time; the default reads real time.
///
/// # Examples
///
/// ```rust
/// use zentype_core::{Status, TypingSession};
///
/// let mut session = TypingSession::new("hi", 30.0);
/// assert_eq!(session.status(), Status::NotStarted);
/// assert!(!session.is_completed());
///
/// session.apply_keypress('h');
/// session.apply_keypress('i');
/// assert!(session.is_completed());
///
/// let snapshot = session.finish();
/// assert_eq!(snapshot.correct_chars, 2);
/// assert_eq!(session.status(), Status::Finished);
/// ```
#[derive(Debug, Clone)]
pub struct TypingSession<C: Clock = SystemClock> {
    text: TargetText,
    /// Test length in seconds
    duration: Timestamp,
    clock: C,
    config: Configuration,
    attempt: Attempt,
}

impl TypingSession<SystemClock> {
    /// Create a new typing session over `text` that lasts `duration` seconds
    ///
    /// Empty text is accepted; such a session is complete from the start and reports zero
    /// metrics.
    pub fn new(text: &str, duration: Timestamp) -> Self {
        Self::with_clock(text, duration, SystemClock::new())
    }
}

impl<C: Clock> TypingSession<C> {
    /// Create a new typing session that reads time from `clock`
    pub fn with_clock(text: &str, duration: Timestamp, clock: C) -> Self {
        Self {
            text: TargetText::new(text),
            duration,
            clock,
            config: Configuration::default(),
            attempt: Attempt::default(),
        }
    }

    /// Configure the session with custom settings (builder pattern)
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Get the target text
    pub fn target(&self) -> &TargetText {
        &self.text
    }

    /// Get the configured test length in seconds
    pub fn duration(&self) -> Timestamp {
        self.duration
    }

    pub fn status(&self) -> Status {
        self.attempt.status
    }

    /// Get the position in the target text the next keypress is validated against
    pub fn cursor(&self) -> usize {
        self.attempt.input_handler.input_len()
    }

    /// Get the characters typed so far
    pub fn input(&self) -> &[char] {
        self.attempt.input_handler.input()
    }

    /// Get the characters typed so far as a string
    pub fn input_text(&self) -> String {
        self.input().iter().collect()
    }

    /// Get the log of every accepted keypress and backspace
    pub fn keystrokes(&self) -> &[Keystroke] {
        self.attempt.statistics.keystrokes()
    }

    pub fn correct_count(&self) -> usize {
        self.attempt.statistics.counters().correct
    }

    /// Get the number of keystrokes made, backspaces included
    pub fn typed_count(&self) -> usize {
        self.attempt.statistics.counters().typed
    }

    /// Start the timer
    ///
    /// Does nothing unless the session has not started yet.
    pub fn start(&mut self) {
        if self.attempt.status != Status::NotStarted {
            return;
        }

        let now = self.clock.now();
        self.attempt.statistics.start(now);
        self.attempt.status = Status::Active;

        debug!(
            text_len = self.text.len(),
            duration = self.duration,
            "typing session started"
        );
    }

    /// Type a character
    ///
    /// Starts the session if needed. Returns whether the character matched the target and
    /// the cursor after the keypress. Keypresses past the end of the text, or on a finished
    /// session, are ignored and reported as not correct.
    pub fn apply_keypress(&mut self, char: char) -> (bool, usize) {
        if self.attempt.status == Status::Finished {
            return (false, self.cursor());
        }

        self.start();

        let Some(result) = self
            .attempt
            .input_handler
            .process_input(Some(char), &self.text)
        else {
            return (false, self.cursor());
        };

        let is_correct = result == InputResult::Correct;
        let now = self.clock.now();
        self.attempt.statistics.record_keypress(char, is_correct, now);

        trace!(
            ?char,
            is_correct,
            cursor = self.cursor(),
            "keypress applied"
        );

        (is_correct, self.cursor())
    }

    /// Delete the last typed character
    ///
    /// Only characters of the word currently being typed can be deleted. Returns the cursor
    /// after the backspace, which is unchanged if the deletion was refused.
    pub fn apply_backspace(&mut self) -> usize {
        if self.attempt.status == Status::Finished {
            return self.cursor();
        }

        if self
            .attempt
            .input_handler
            .process_input(None, &self.text)
            .is_some()
        {
            let now = self.clock.now();
            self.attempt.statistics.record_backspace(now);
            trace!(cursor = self.cursor(), "backspace applied");
        }

        self.cursor()
    }

    /// Finish the session and return its final metrics
    ///
    /// The first call freezes the end time. Later calls return the same snapshot.
    pub fn finish(&mut self) -> Snapshot {
        if let Some(snapshot) = self.attempt.frozen {
            return snapshot;
        }

        let now = self.clock.now();
        self.attempt.statistics.mark_completed(now);
        self.attempt.status = Status::Finished;

        let snapshot = self.measure();
        self.attempt.frozen = Some(snapshot);

        debug!(
            wpm = snapshot.wpm,
            accuracy = snapshot.accuracy,
            elapsed = snapshot.elapsed_time,
            correct = snapshot.correct_chars,
            typed = snapshot.total_chars_typed,
            "typing session finished"
        );

        snapshot
    }

    /// Discard the attempt and start over with the same text and duration
    pub fn reset(&mut self) {
        self.attempt = Attempt::default();
        debug!("typing session reset");
    }

    /// Get the seconds elapsed since the start
    ///
    /// `0.0` before the start, frozen once finished.
    pub fn elapsed(&self) -> Timestamp {
        self.attempt.statistics.elapsed(self.clock.now())
    }

    /// Get the seconds left before the duration runs out
    pub fn time_remaining(&self) -> Timestamp {
        (self.duration - self.elapsed()).max(0.0)
    }

    /// Check if the duration has run out
    pub fn time_exceeded(&self) -> bool {
        self.elapsed() >= self.duration
    }

    /// Check if the test is over: time ran out or the whole text was typed
    pub fn is_completed(&self) -> bool {
        self.time_exceeded() || self.attempt.input_handler.is_fully_typed(self.text.len())
    }

    /// Get the current words per minute, counting only correct characters
    pub fn wpm(&self) -> f64 {
        Wpm::calculate(self.correct_count(), minutes(self.elapsed())).into()
    }

    /// Get the percentage of keystrokes that were correct
    pub fn accuracy(&self) -> f64 {
        Accuracy::calculate(self.correct_count(), self.typed_count()).into()
    }

    /// Get the typing completion percentage
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zentype_core::TypingSession;
    ///
    /// let mut session = TypingSession::new("hello", 30.0);
    /// assert_eq!(session.progress(), 0.0);
    ///
    /// session.apply_keypress('h'); // 1/5 = 20%
    /// assert_eq!(session.progress(), 20.0);
    /// ```
    pub fn progress(&self) -> f64 {
        if self.text.is_empty() {
            return 0.0;
        }

        (self.cursor() as f64 / self.text.len() as f64) * 100.0
    }

    /// Get a consistent view of all metrics
    ///
    /// Elapsed time is read exactly once. A finished session always returns the snapshot
    /// taken when it finished.
    pub fn snapshot(&self) -> Snapshot {
        self.attempt.frozen.unwrap_or_else(|| self.measure())
    }

    fn measure(&self) -> Snapshot {
        Snapshot::new(
            self.elapsed(),
            self.duration,
            self.attempt.statistics.counters(),
            self.text.len(),
            self.cursor(),
        )
    }

    /// Get the display state of the character at `index`
    pub fn character_status(&self, index: usize) -> CharacterStatus {
        if index >= self.cursor() {
            return CharacterStatus::Unwritten;
        }

        match (self.text.get(index), self.input().get(index)) {
            (Some(expected), Some(typed)) if expected == *typed => CharacterStatus::Correct,
            (Some(_), Some(_)) => CharacterStatus::Error,
            _ => CharacterStatus::Unwritten,
        }
    }

    /// Get WPM samples taken every `interval` seconds up to the elapsed time
    ///
    /// Recomputed from the keystroke log on every call.
    pub fn wpm_history(&self, interval: Timestamp) -> Vec<f64> {
        history::sample_wpm(self.keystrokes(), self.elapsed(), interval)
    }

    /// Get WPM samples at the configured interval
    pub fn wpm_history_default(&self) -> Vec<f64> {
        self.wpm_history(self.config.history_interval_seconds)
    }
}
