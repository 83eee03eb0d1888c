//! # Input Handler Module - Keystroke Processing and Validation
//!
//! Holds what the user has actually typed and decides what each keystroke does to it.
//!
//! - **Validation**: a typed character is compared to the target character under the cursor
//!   by exact equality. Case matters and whitespace is an ordinary character.
//! - **Word-boundary deletion**: a backspace may only remove characters of the word
//!   currently being typed. Once the cursor sits right after a space, the words before it
//!   are locked in.
//!
//! The cursor is the input length, so the input never runs ahead of the target text.
//!
//! ## Usage Example
//!
//! ```rust
//! use zentype_core::buffer::TargetText;
//! use zentype_core::input_handler::{InputHandler, InputResult};
//!
//! let text = TargetText::new("hi you");
//! let mut handler = InputHandler::new();
//!
//! assert_eq!(handler.process_input(Some('h'), &text), Some(InputResult::Correct));
//! assert_eq!(handler.process_input(Some('o'), &text), Some(InputResult::Wrong));
//! assert_eq!(handler.process_input(None, &text), Some(InputResult::Deleted('o')));
//! ```

use crate::buffer::TargetText;

/// The outcome of an accepted keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Correct,
    Wrong,
    /// The contained character was removed from the input
    Deleted(char),
}

/// Keystroke processor for typing validation
///
/// # Performance
///
/// - Character input: O(1)
/// - Deletion: O(w) where w is the length of the current word
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    /// Characters typed so far, one per advanced cursor position
    input: Vec<char>,
}

impl InputHandler {
    /// Create a new input handler for a typing session
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the characters typed so far
    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// Check if no characters have been typed yet
    pub fn is_input_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Get the number of characters typed so far
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Check if the entire text has been typed
    pub fn is_fully_typed(&self, text_len: usize) -> bool {
        self.input.len() >= text_len
    }

    /// Process a keystroke and return its result
    ///
    /// * `input` - The character typed (`Some(char)`) or `None` for a backspace
    /// * `text` - The target text the input is validated against
    ///
    /// Returns `None` when the keystroke is refused: typing past the end of the text,
    /// deleting from an empty input, or deleting across a word boundary.
    pub fn process_input(&mut self, input: Option<char>, text: &TargetText) -> Option<InputResult> {
        match input {
            Some(char) => self.add_input(char, text),
            None => self.delete_input(text).map(InputResult::Deleted),
        }
    }

    /// Add character to input
    fn add_input(&mut self, input: char, text: &TargetText) -> Option<InputResult> {
        let expected = text.get(self.input.len())?;

        self.input.push(input);

        if input == expected {
            Some(InputResult::Correct)
        } else {
            Some(InputResult::Wrong)
        }
    }

    /// Delete character from input, unless the cursor is at the start of its word
    fn delete_input(&mut self, text: &TargetText) -> Option<char> {
        let cursor = self.input.len();
        if cursor == 0 || cursor <= text.word_start(cursor) {
            return None;
        }

        self.input.pop()
    }
}
