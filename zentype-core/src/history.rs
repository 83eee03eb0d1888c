//! # History Module - WPM Over Time
//!
//! Replays a keystroke log into a series of WPM samples for charting. Samples are taken at
//! `0, interval, 2 * interval, ...` up to the elapsed time, and each one only counts the
//! correct keystrokes logged at or before its sample time.
//!
//! Nothing is cached: the series is recomputed from the log on every call, so two calls
//! without an intervening keystroke return identical series.
//!
//! ```rust
//! use zentype_core::history::{peak, sample_wpm};
//! use zentype_core::{Key, Keystroke};
//!
//! let log: Vec<Keystroke> = (0..10)
//!     .map(|i| Keystroke {
//!         key: Key::Char('a'),
//!         was_correct: true,
//!         offset: i as f64 * 0.2,
//!     })
//!     .collect();
//!
//! let history = sample_wpm(&log, 2.0, 1.0);
//! assert_eq!(history.len(), 3);
//! assert_eq!(history[0], 0.0);
//! assert_eq!(peak(&history), history[1]);
//! ```

use crate::math::Wpm;
use crate::{Keystroke, Timestamp, minutes};

/// The most samples a single series may hold
pub const MAX_SAMPLES: usize = 100_000;

/// Sample WPM at a fixed interval from a keystroke log
///
/// * `keystrokes` - The session's keystroke log
/// * `elapsed` - The last time to sample, in seconds since the session started
/// * `interval` - Seconds between samples
///
/// The sample at `t = 0` is always `0.0`. A non-finite or non-positive interval, an
/// elapsed time below zero, or an interval so small that the series would exceed
/// [`MAX_SAMPLES`], yields only that first sample.
pub fn sample_wpm(keystrokes: &[Keystroke], elapsed: Timestamp, interval: Timestamp) -> Vec<f64> {
    if !(interval.is_finite() && interval > 0.0) || !(elapsed.is_finite() && elapsed >= 0.0) {
        return vec![0.0];
    }

    let last_sample = (elapsed / interval).floor();
    if !last_sample.is_finite() || last_sample >= MAX_SAMPLES as f64 {
        return vec![0.0];
    }
    let last_sample = last_sample as usize;

    (0..=last_sample)
        .map(|sample| {
            let time = sample as Timestamp * interval;
            if time == 0.0 {
                return 0.0;
            }

            let correct = keystrokes
                .iter()
                .filter(|keystroke| keystroke.was_correct && keystroke.offset <= time)
                .count();

            Wpm::calculate(correct, minutes(time)).0.max(0.0)
        })
        .collect()
}

/// The highest WPM in a series
///
/// Used to scale charts. Returns `0.0` for an empty series.
pub fn peak(history: &[f64]) -> f64 {
    history.iter().copied().fold(0.0, f64::max)
}
