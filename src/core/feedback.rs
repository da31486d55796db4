//! Guess scoring and feedback representation
//!
//! Feedback is one `(letter, mark)` pair per position:
//! - Exact = letter in the correct position (green)
//! - Present = letter elsewhere in the secret (yellow)
//! - Absent = no unmatched occurrence left in the secret (gray)

use super::{WORD_LEN, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mark for a single guessed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Exact,
    Present,
    Absent,
}

impl Mark {
    /// Emoji square for this mark
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Per-letter feedback for one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedback {
    cells: [(char, Mark); WORD_LEN],
}

impl Feedback {
    /// Score `guess` against `secret`
    ///
    /// Duplicate letters are resolved exact-first: each secret letter can
    /// satisfy at most one guess position, and exact matches claim theirs
    /// before any present match is considered.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and remove them from the secret pool
    /// 2. Second pass: mark present letters from what remains of the pool
    ///
    /// # Examples
    /// ```
    /// use wordle_daily::core::{Feedback, Mark, Word};
    ///
    /// let secret = Word::new("apple").unwrap();
    /// let guess = Word::new("paper").unwrap();
    /// let feedback = Feedback::score(&secret, &guess);
    ///
    /// // P(yellow) A(yellow) P(green) E(yellow) R(gray)
    /// assert_eq!(
    ///     feedback.marks(),
    ///     [Mark::Present, Mark::Present, Mark::Exact, Mark::Present, Mark::Absent]
    /// );
    /// ```
    #[must_use]
    pub fn score(secret: &Word, guess: &Word) -> Self {
        let mut marks = [Mark::Absent; WORD_LEN];
        let mut remaining = secret.char_counts();

        // Allow: index needed to compare guess[i], secret[i] and set marks[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LEN {
            let letter = guess.char_at(i);
            if letter == secret.char_at(i) {
                marks[i] = Mark::Exact;
                if let Some(count) = remaining.get_mut(&letter) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LEN {
            if marks[i] == Mark::Exact {
                continue;
            }
            if let Some(count) = remaining.get_mut(&guess.char_at(i))
                && *count > 0
            {
                marks[i] = Mark::Present;
                *count -= 1;
            }
        }

        let mut cells = [(' ', Mark::Absent); WORD_LEN];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = (char::from(guess.char_at(i)), marks[i]);
        }

        Self { cells }
    }

    /// The `(letter, mark)` pairs in position order
    #[inline]
    #[must_use]
    pub const fn cells(&self) -> &[(char, Mark); WORD_LEN] {
        &self.cells
    }

    /// Just the marks, in position order
    #[must_use]
    pub fn marks(&self) -> [Mark; WORD_LEN] {
        self.cells.map(|(_, mark)| mark)
    }

    /// Check if every position is exact
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|&(_, mark)| mark == Mark::Exact)
    }

    /// Count of exact marks
    #[must_use]
    pub fn count_exact(&self) -> usize {
        self.count(Mark::Exact)
    }

    /// Count of present marks
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.count(Mark::Present)
    }

    fn count(&self, wanted: Mark) -> usize {
        self.cells.iter().filter(|&&(_, mark)| mark == wanted).count()
    }

    /// Convert feedback to emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.cells.iter().map(|&(_, mark)| mark.emoji()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_emoji())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Mark::{Absent, Exact, Present};

    fn score(secret: &str, guess: &str) -> Feedback {
        Feedback::score(&Word::new(secret).unwrap(), &Word::new(guess).unwrap())
    }

    #[test]
    fn feedback_all_absent() {
        let feedback = score("MANGO", "BLITZ");
        assert_eq!(feedback.marks(), [Absent; WORD_LEN]);
        assert_eq!(feedback.count_exact(), 0);
        assert_eq!(feedback.count_present(), 0);
    }

    #[test]
    fn feedback_self_is_solved() {
        for word in ["APPLE", "MANGO", "BERRY", "AAAAA", "ZZZZZ"] {
            let feedback = score(word, word);
            assert!(feedback.is_solved());
            assert_eq!(feedback.count_exact(), WORD_LEN);
        }
    }

    #[test]
    fn feedback_keeps_guess_letters() {
        let feedback = score("PEACH", "cheap");
        let letters: String = feedback.cells().iter().map(|&(letter, _)| letter).collect();
        assert_eq!(letters, "CHEAP");
    }

    #[test]
    fn feedback_mango_gonam_all_present() {
        let feedback = score("MANGO", "GONAM");
        assert_eq!(feedback.marks(), [Present; WORD_LEN]);
    }

    #[test]
    fn feedback_apple_pleap_consumes_duplicates() {
        let feedback = score("APPLE", "PLEAP");
        assert_eq!(feedback.marks(), [Present; WORD_LEN]);
        assert_eq!(feedback.count_exact(), 0);
    }

    #[test]
    fn feedback_excess_copies_are_absent() {
        // LEMON has one E, already claimed by the exact match
        let feedback = score("LEMON", "EERIE");
        assert_eq!(feedback.marks(), [Absent, Exact, Absent, Absent, Absent]);
    }

    #[test]
    fn feedback_exact_claims_before_present() {
        // The exact P at position 3 must not be stolen by the P at position 0
        let feedback = score("CHIPS", "PUMPS");
        assert_eq!(feedback.marks(), [Absent, Absent, Absent, Exact, Exact]);

        let feedback = score("OLIVE", "LLAMA");
        assert_eq!(feedback.marks(), [Absent, Exact, Absent, Absent, Absent]);
    }

    #[test]
    fn feedback_duplicate_letters_split() {
        // One R matches exactly, one more is present, the third is excess
        let feedback = score("BERRY", "ERROR");
        assert_eq!(feedback.marks(), [Present, Present, Exact, Absent, Absent]);
    }

    #[test]
    fn feedback_exact_iff_same_letter() {
        let words = ["APPLE", "MANGO", "BERRY", "GRAPE", "PEACH", "LEMON", "GUAVA", "EERIE"];
        for secret in words {
            for guess in words {
                let s = Word::new(secret).unwrap();
                let g = Word::new(guess).unwrap();
                let feedback = Feedback::score(&s, &g);
                for (i, mark) in feedback.marks().into_iter().enumerate() {
                    assert_eq!(mark == Exact, s.char_at(i) == g.char_at(i), "{secret}/{guess}@{i}");
                }
            }
        }
    }

    #[test]
    fn feedback_letter_marks_bounded_by_secret_counts() {
        let words = ["APPLE", "MANGO", "BERRY", "GUAVA", "EERIE", "LLAMA", "AAAAA"];
        for secret in words {
            for guess in words {
                let s = Word::new(secret).unwrap();
                let feedback = score(secret, guess);
                let counts = s.char_counts();
                for &(letter, _) in feedback.cells() {
                    let hits = feedback
                        .cells()
                        .iter()
                        .filter(|&&(l, m)| l == letter && m != Absent)
                        .count();
                    let available = counts.get(&(letter as u8)).copied().unwrap_or(0);
                    assert!(hits <= usize::from(available), "{secret}/{guess} letter {letter}");
                }
            }
        }
    }

    #[test]
    fn feedback_is_deterministic() {
        assert_eq!(score("GUAVA", "AVAIL"), score("GUAVA", "AVAIL"));
    }

    #[test]
    fn feedback_emoji() {
        let feedback = score("APPLE", "PAPER");
        assert_eq!(feedback.to_emoji(), "🟨🟨🟩🟨⬜");
        assert_eq!(feedback.to_string(), feedback.to_emoji());
        assert_eq!(feedback.count_exact(), 1);
        assert_eq!(feedback.count_present(), 3);
    }
}
