use crate::{AVERAGE_WORD_LENGTH, Minutes};

/// Words Per Minute
///
/// Only correctly typed characters count towards the speed.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Wpm(pub f64);

impl Wpm {
    /// Calculate Words Per Minute
    ///
    /// * `correct_chars` - How many characters were typed correctly during `minutes`
    /// * `minutes` - How many minutes have gone by
    ///
    /// Returns `0.0` when no time has passed.
    pub fn calculate(correct_chars: usize, minutes: Minutes) -> Self {
        if minutes <= 0.0 {
            return Self::default();
        }

        let words = correct_chars as f64 / AVERAGE_WORD_LENGTH as f64;
        Self(words / minutes)
    }
}

impl From<Wpm> for f64 {
    fn from(value: Wpm) -> Self {
        value.0
    }
}

/// Typing accuracy
///
/// The percentage (0.0 - 100.0) of keystrokes that were correct. Backspaces count as
/// keystrokes but are never correct.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Accuracy(pub f64);

impl Accuracy {
    /// Calculate typing Accuracy
    ///
    /// * `correct_chars` - How many keystrokes were correct
    /// * `typed_chars` - How many keystrokes were made, backspaces included
    ///
    /// Returns `0.0` when nothing has been typed.
    pub fn calculate(correct_chars: usize, typed_chars: usize) -> Self {
        if typed_chars == 0 {
            return Self::default();
        }

        Self((correct_chars as f64 / typed_chars as f64) * 100.0)
    }
}

impl From<Accuracy> for f64 {
    fn from(value: Accuracy) -> Self {
        value.0
    }
}
