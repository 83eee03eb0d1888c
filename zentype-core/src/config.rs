//! # Configuration Module - Runtime Behavior Settings
//!
//! ```rust
//! use zentype_core::config::Configuration;
//!
//! // Use default configuration
//! let config = Configuration::default();
//! assert_eq!(config.history_interval_seconds, 1.0);
//!
//! // Custom configuration
//! let config = Configuration {
//!     history_interval_seconds: 0.5, // Sample WPM every 500ms
//! };
//! ```
//!
//! Lower intervals give a denser WPM chart. Each sample replays the keystroke log, so the
//! cost of [`wpm_history`](crate::TypingSession::wpm_history) grows with both the sample
//! count and the log length.

use crate::Timestamp;

/// Runtime configuration for a typing session
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Interval between WPM history samples in seconds
    ///
    /// **Default**: 1.0 seconds
    pub history_interval_seconds: Timestamp,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            history_interval_seconds: 1.0,
        }
    }
}
