//! Secret word selection

use super::GameError;
use crate::core::Word;
use rand::Rng;
use rand::prelude::IndexedRandom;

/// Uniform random draw over a fixed dictionary
///
/// Repeats across sessions and users are allowed.
#[derive(Debug, Clone)]
pub struct WordSelector {
    dictionary: Vec<Word>,
}

impl WordSelector {
    /// # Errors
    ///
    /// Returns [`GameError::DictionaryEmpty`] if there is nothing to pick from.
    pub fn new(dictionary: Vec<Word>) -> Result<Self, GameError> {
        if dictionary.is_empty() {
            return Err(GameError::DictionaryEmpty);
        }
        Ok(Self { dictionary })
    }

    /// Pick a secret using the thread-local RNG
    #[must_use]
    pub fn pick(&self) -> Option<Word> {
        self.pick_with(&mut rand::rng())
    }

    /// Pick a secret using the given RNG
    ///
    /// Always `Some`: [`WordSelector::new`] refuses an empty dictionary.
    #[must_use]
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Word> {
        self.dictionary.choose(rng).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::default_dictionary;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rustc_hash::FxHashSet;

    #[test]
    fn empty_dictionary_rejected() {
        assert!(matches!(
            WordSelector::new(Vec::new()),
            Err(GameError::DictionaryEmpty)
        ));
    }

    #[test]
    fn picks_come_from_dictionary() {
        let dictionary = default_dictionary();
        let selector = WordSelector::new(dictionary.clone()).unwrap();
        for _ in 0..100 {
            assert!(dictionary.contains(&selector.pick().unwrap()));
        }
    }

    #[test]
    fn seeded_picks_are_reproducible() {
        let selector = WordSelector::new(default_dictionary()).unwrap();
        let a: Vec<Word> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..10).filter_map(|_| selector.pick_with(&mut rng)).collect()
        };
        let b: Vec<Word> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..10).filter_map(|_| selector.pick_with(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn picks_cover_the_dictionary() {
        let selector = WordSelector::new(default_dictionary()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let seen: FxHashSet<Word> = (0..2000)
            .filter_map(|_| selector.pick_with(&mut rng))
            .collect();
        assert_eq!(seen.len(), selector.len());
    }
}
