//! Word lists for secret selection
//!
//! Provides the embedded dictionary compiled into the binary, plus loading of
//! custom dictionaries.

mod embedded;
pub mod loader;

pub use embedded::{DICTIONARY, DICTIONARY_COUNT};

use crate::core::Word;

/// The embedded dictionary as validated words
#[must_use]
pub fn default_dictionary() -> Vec<Word> {
    loader::words_from_slice(DICTIONARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_count_matches_const() {
        assert_eq!(DICTIONARY.len(), DICTIONARY_COUNT);
    }

    #[test]
    fn dictionary_words_are_valid() {
        for &word in DICTIONARY {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_uppercase()),
                "Word '{word}' contains non-uppercase chars"
            );
        }
    }

    #[test]
    fn dictionary_has_no_duplicates() {
        assert_eq!(default_dictionary().len(), DICTIONARY_COUNT);
    }

    #[test]
    fn expected_count() {
        assert_eq!(DICTIONARY_COUNT, 20, "Expected 20 dictionary words");
    }
}
