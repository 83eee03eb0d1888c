use std::sync::LazyLock;

use rand::{Rng, seq::SliceRandom};

/// Common english words, one per line
const WORD_LIST: &str = include_str!("words.txt");

/// Words per second a test of a given length is sized for
const WORDS_PER_SECOND: f64 = 0.6;

/// The smallest text a test is generated with
const MIN_WORD_COUNT: usize = 30;

static WORDS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    WORD_LIST
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .collect()
});

/// Generates random texts from the built-in word list
#[derive(Debug, Clone, Copy, Default)]
pub struct WordProvider;

impl WordProvider {
    /// All words the provider picks from
    pub fn words() -> &'static [&'static str] {
        &WORDS
    }

    /// Picks `word_count` words (at least one) with replacement and joins them with single spaces
    pub fn generate_text<R: Rng + ?Sized>(word_count: usize, rng: &mut R) -> String {
        let word_count = word_count.max(1);

        (0..word_count)
            .filter_map(|_| Self::words().choose(rng).copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The amount of words to generate for a test lasting `seconds`
    pub fn word_count_for_duration(seconds: u64) -> usize {
        let words = (seconds as f64 * WORDS_PER_SECOND).floor() as usize;
        words.max(MIN_WORD_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_word_list_is_loaded() {
        let words = WordProvider::words();
        assert!(words.len() > 500);
        assert!(words.contains(&"the"));
        assert!(words.iter().all(|word| !word.contains(' ')));
    }

    #[test]
    fn test_generate_text() {
        let mut rng = StdRng::seed_from_u64(7);
        let text = WordProvider::generate_text(25, &mut rng);

        let words: Vec<_> = text.split(' ').collect();
        assert_eq!(words.len(), 25);
        assert!(words.iter().all(|word| WordProvider::words().contains(word)));
        assert!(!text.starts_with(' ') && !text.ends_with(' '));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_zero_words_yields_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let text = WordProvider::generate_text(0, &mut rng);

        assert!(!text.is_empty());
        assert_eq!(text.split(' ').count(), 1);
    }

    #[test]
    fn test_same_seed_same_text() {
        let first = WordProvider::generate_text(10, &mut StdRng::seed_from_u64(42));
        let second = WordProvider::generate_text(10, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_word_count_for_duration() {
        assert_eq!(WordProvider::word_count_for_duration(30), 30);
        assert_eq!(WordProvider::word_count_for_duration(60), 36);
        assert_eq!(WordProvider::word_count_for_duration(90), 54);
        assert_eq!(WordProvider::word_count_for_duration(0), 30);
    }
}
