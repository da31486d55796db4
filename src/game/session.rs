//! Session records
//!
//! A session is one attempt at one secret word, on one calendar day, by one
//! user. Sessions are built by the store and mutated only through guesses.

use super::{GameRules, UserId};
use crate::core::{Feedback, Word};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    /// Won or lost
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// A submitted guess with the feedback it received
///
/// Feedback is computed once at submission and stored with the guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub word: Word,
    pub feedback: Feedback,
}

impl Guess {
    /// Score `word` against `secret`
    #[must_use]
    pub fn scored(secret: &Word, word: Word) -> Self {
        let feedback = Feedback::score(secret, &word);
        Self { word, feedback }
    }
}

/// One game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    owner: UserId,
    secret: Word,
    date: NaiveDate,
    outcome: Outcome,
    guesses: Vec<Guess>,
}

impl Session {
    /// A fresh in-progress session with no guesses
    #[must_use]
    pub const fn new(id: SessionId, owner: UserId, secret: Word, date: NaiveDate) -> Self {
        Self {
            id,
            owner,
            secret,
            date,
            outcome: Outcome::InProgress,
            guesses: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// The secret word
    ///
    /// Front ends must not show this to the player unless the session is lost.
    #[must_use]
    pub const fn secret(&self) -> &Word {
        &self.secret
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Guesses in submission order
    #[must_use]
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    /// Secret, revealed only once the session is lost
    #[must_use]
    pub fn revealed_secret(&self) -> Option<&Word> {
        (self.outcome == Outcome::Lost).then_some(&self.secret)
    }

    /// Guesses left before the session is lost
    #[must_use]
    pub fn attempts_remaining(&self, rules: &GameRules) -> usize {
        if self.outcome.is_terminal() {
            0
        } else {
            rules.max_guesses.saturating_sub(self.guesses.len())
        }
    }

    /// Outcome this session reaches once `guess` is appended
    ///
    /// A match wins even on the final attempt; the cap is checked after.
    #[must_use]
    pub fn outcome_after(&self, guess: &Guess, rules: &GameRules) -> Outcome {
        if guess.word == self.secret {
            Outcome::Won
        } else if self.guesses.len() + 1 >= rules.max_guesses {
            Outcome::Lost
        } else {
            Outcome::InProgress
        }
    }

    /// Terminal outcome already implied by the recorded guesses
    ///
    /// `None` while the guesses still leave the game open. A session whose
    /// outcome lags behind this was interrupted between writes.
    #[must_use]
    pub fn settled_outcome(&self, rules: &GameRules) -> Option<Outcome> {
        let last = self.guesses.last()?;
        if last.word == self.secret {
            Some(Outcome::Won)
        } else if self.guesses.len() >= rules.max_guesses {
            Some(Outcome::Lost)
        } else {
            None
        }
    }

    /// Append a guess; store-side mutation
    pub fn push_guess(&mut self, guess: Guess) {
        self.guesses.push(guess);
    }

    /// Record the outcome; store-side mutation
    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(secret: &str) -> Session {
        Session::new(
            SessionId(1),
            UserId::new("alice"),
            Word::new(secret).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    fn guess(session: &Session, word: &str) -> Guess {
        Guess::scored(session.secret(), Word::new(word).unwrap())
    }

    #[test]
    fn new_session_is_in_progress() {
        let s = session("MANGO");
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert!(s.guesses().is_empty());
        assert_eq!(s.attempts_remaining(&GameRules::default()), 5);
        assert_eq!(s.revealed_secret(), None);
    }

    #[test]
    fn matching_guess_wins() {
        let s = session("MANGO");
        let g = guess(&s, "mango");
        assert!(g.feedback.is_solved());
        assert_eq!(s.outcome_after(&g, &GameRules::default()), Outcome::Won);
    }

    #[test]
    fn final_miss_loses_and_final_match_wins() {
        let rules = GameRules::default();
        let mut s = session("MANGO");
        for word in ["APPLE", "BERRY", "GRAPE", "PEACH"] {
            let g = guess(&s, word);
            assert_eq!(s.outcome_after(&g, &rules), Outcome::InProgress);
            s.push_guess(g);
        }

        assert_eq!(s.outcome_after(&guess(&s, "LEMON"), &rules), Outcome::Lost);
        assert_eq!(s.outcome_after(&guess(&s, "MANGO"), &rules), Outcome::Won);
    }

    #[test]
    fn settled_outcome_follows_recorded_guesses() {
        let rules = GameRules::default();
        let mut s = session("MANGO");
        assert_eq!(s.settled_outcome(&rules), None);

        for word in ["APPLE", "BERRY", "GRAPE", "PEACH"] {
            s.push_guess(guess(&s, word));
        }
        assert_eq!(s.settled_outcome(&rules), None);

        let mut won = s.clone();
        won.push_guess(guess(&won, "MANGO"));
        assert_eq!(won.settled_outcome(&rules), Some(Outcome::Won));

        s.push_guess(guess(&s, "LEMON"));
        assert_eq!(s.settled_outcome(&rules), Some(Outcome::Lost));
    }

    #[test]
    fn secret_revealed_only_on_loss() {
        let mut s = session("OLIVE");
        s.set_outcome(Outcome::Won);
        assert_eq!(s.revealed_secret(), None);
        assert_eq!(s.attempts_remaining(&GameRules::default()), 0);

        s.set_outcome(Outcome::Lost);
        assert_eq!(s.revealed_secret().map(Word::text), Some("OLIVE"));
    }

    #[test]
    fn outcome_serializes_kebab_case() {
        let json = serde_json::to_string(&Outcome::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
