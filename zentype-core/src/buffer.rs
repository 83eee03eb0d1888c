//! # Buffer Module - Target Text Storage
//!
//! Stores the text a user types against as individual characters and answers the one
//! structural question the engine asks of it: where does the word under the cursor start?
//!
//! Data layout example: `"hello world"`
//! ```text
//! Characters:  [h][e][l][l][o][ ][w][o][r][l][d]
//! Index:        0  1  2  3  4  5  6  7  8  9  10
//! Word starts:  0                 6
//! ```
//!
//! A word starts one past the nearest preceding space, or at `0` when there is none. Only
//! the ASCII space separates words; other whitespace is compared like any other character.

use std::fmt;

/// The character that separates words
pub const WORD_SEPARATOR: char = ' ';

/// Immutable target text, indexed by character
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetText {
    characters: Vec<char>,
}

impl TargetText {
    /// Create a buffer from text content
    ///
    /// Empty text is accepted; such a buffer is fully typed from the start.
    pub fn new(string: &str) -> Self {
        Self {
            characters: string.chars().collect(),
        }
    }

    /// Get the total number of characters in the buffer
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Get a character by its index in the buffer
    pub fn get(&self, index: usize) -> Option<char> {
        self.characters.get(index).copied()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.characters
    }

    /// Find the start of the word that contains the character before `cursor`
    ///
    /// Scans backwards from `cursor - 1` for the nearest [`WORD_SEPARATOR`]. A cursor that sits
    /// directly after a space is therefore at the start of its word.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zentype_core::buffer::TargetText;
    ///
    /// let text = TargetText::new("hello world");
    /// assert_eq!(text.word_start(3), 0);
    /// assert_eq!(text.word_start(6), 6);
    /// assert_eq!(text.word_start(9), 6);
    /// ```
    pub fn word_start(&self, cursor: usize) -> usize {
        let end = cursor.min(self.characters.len());
        self.characters[..end]
            .iter()
            .rposition(|&char| char == WORD_SEPARATOR)
            .map_or(0, |index| index + 1)
    }

    /// Count the words in the text
    pub fn word_count(&self) -> usize {
        self.characters
            .split(|&char| char == WORD_SEPARATOR)
            .filter(|word| !word.is_empty())
            .count()
    }
}

impl fmt::Display for TargetText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.characters.iter().try_for_each(|char| write!(f, "{char}"))
    }
}
