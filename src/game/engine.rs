//! Session state machine
//!
//! Coordinates identity, quota, word selection, scoring and persistence.
//! Writes for one (user, day) are serialized through [`KeyLocks`]; reads take
//! no key lock.

use super::locks::KeyLocks;
use super::{
    GameError, GameRules, Guess, IdentityProvider, Outcome, QuotaGate, Role, Session, SessionId,
    User, WordSelector,
};
use crate::core::{Feedback, WORD_LEN, Word, WordError};
use crate::store::{GameStore, StoreError};
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

/// What a player learns from one guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReport {
    pub session_id: SessionId,
    pub guess: Word,
    pub feedback: Feedback,
    pub outcome: Outcome,
    pub attempts_used: usize,
    pub attempts_remaining: usize,
    /// Present only when this guess lost the session
    pub secret: Option<Word>,
}

/// One user's day at a glance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub played: usize,
    pub won: usize,
    pub lost: usize,
    pub in_progress: usize,
    /// New sessions the quota still allows today
    pub remaining_starts: usize,
}

/// The game engine
///
/// Owns its store, dictionary and rules; the process entry point decides
/// their lifecycle.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wordle_daily::core::Word;
/// use wordle_daily::game::{GameEngine, GameRules, Outcome, StaticIdentity, User};
/// use wordle_daily::store::MemoryStore;
///
/// let store = MemoryStore::new(vec![Word::new("mango").unwrap()]);
/// let engine = GameEngine::new(store, GameRules::default()).unwrap();
/// let alice = StaticIdentity::from(User::player("alice"));
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
///
/// let session = engine.start_session(&alice, today).unwrap();
/// let report = engine.submit_guess(&alice, session.id(), "mango").unwrap();
/// assert_eq!(report.outcome, Outcome::Won);
/// ```
#[derive(Debug)]
pub struct GameEngine<S: GameStore> {
    store: S,
    selector: WordSelector,
    rules: GameRules,
    locks: KeyLocks,
}

impl<S: GameStore> GameEngine<S> {
    /// Build an engine over `store`, drawing secrets from its dictionary
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DictionaryEmpty`] if the store has no words, or
    /// [`GameError::StoreUnavailable`] if the dictionary cannot be read.
    pub fn new(store: S, rules: GameRules) -> Result<Self, GameError> {
        let selector = WordSelector::new(store.get_dictionary()?)?;
        info!(
            words = selector.len(),
            max_guesses = rules.max_guesses,
            daily_limit = rules.daily_limit,
            "Game engine ready"
        );
        Ok(Self {
            store,
            selector,
            rules,
            locks: KeyLocks::default(),
        })
    }

    #[must_use]
    pub const fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Quota queries over this engine's store
    #[must_use]
    pub const fn quota(&self) -> QuotaGate<'_, S> {
        QuotaGate::new(&self.store, &self.rules)
    }

    /// Start a new session for the current user
    ///
    /// # Errors
    ///
    /// - [`GameError::Unauthenticated`] if nobody is signed in
    /// - [`GameError::RoleNotAllowed`] for admins
    /// - [`GameError::SessionAlreadyActive`] if a session is in progress today
    /// - [`GameError::QuotaExceeded`] once the daily limit of finished sessions is met
    /// - [`GameError::StoreUnavailable`] if the store fails
    #[instrument(skip(self, identity))]
    pub fn start_session(
        &self,
        identity: &impl IdentityProvider,
        today: NaiveDate,
    ) -> Result<Session, GameError> {
        let user = require_user(identity)?;
        if user.role == Role::Admin {
            warn!(user = %user.id, "Admin tried to start a session");
            return Err(GameError::RoleNotAllowed(user.role));
        }

        self.locks.with(&user.id, today, || -> Result<Session, GameError> {
            if let Some(active) = self.store.get_active_session(&user.id, today)? {
                warn!(user = %user.id, session = %active.id(), "Session already active");
                return Err(GameError::SessionAlreadyActive(active.id()));
            }

            if !self.quota().can_start(&user.id, today)? {
                warn!(user = %user.id, limit = self.rules.daily_limit, "Daily quota reached");
                return Err(GameError::QuotaExceeded {
                    limit: self.rules.daily_limit,
                });
            }

            let secret = self.selector.pick().ok_or(GameError::DictionaryEmpty)?;
            let id = match self.store.create_session(&user.id, &secret, today) {
                Ok(id) => id,
                // Another process got there between our check and the write
                Err(StoreError::ActiveSessionExists(active)) => {
                    warn!(user = %user.id, session = %active, "Session already active");
                    return Err(GameError::SessionAlreadyActive(active));
                }
                Err(e) => return Err(e.into()),
            };
            info!(user = %user.id, session = %id, "Session started");

            Ok(Session::new(id, user.id.clone(), secret, today))
        })
    }

    /// Score a guess and advance the session
    ///
    /// The input is trimmed and case-folded; any 5-letter string is accepted,
    /// dictionary word or not. Every check runs before the first store write.
    ///
    /// # Errors
    ///
    /// - [`GameError::Unauthenticated`] if nobody is signed in
    /// - [`GameError::UnknownSession`] if the session is missing or not the user's
    /// - [`GameError::SessionClosed`] if the session is already won or lost
    /// - [`GameError::InvalidGuessLength`] / [`GameError::InvalidGuessFormat`] for malformed input
    /// - [`GameError::StoreUnavailable`] if the store fails; nothing was recorded
    ///   and the guess can be resubmitted
    #[instrument(skip(self, identity, raw_input))]
    pub fn submit_guess(
        &self,
        identity: &impl IdentityProvider,
        session_id: SessionId,
        raw_input: &str,
    ) -> Result<GuessReport, GameError> {
        let user = require_user(identity)?;
        let session = self.owned_session(&user, session_id)?;

        self.locks.with(session.owner(), session.date(), || -> Result<GuessReport, GameError> {
            // Reload under the lock; a concurrent writer may have moved it on
            let session = self.owned_session(&user, session_id)?;
            if session.outcome().is_terminal() {
                warn!(session = %session_id, outcome = %session.outcome(), "Guess on closed session");
                return Err(GameError::SessionClosed {
                    id: session_id,
                    outcome: session.outcome(),
                });
            }
            if let Some(outcome) = session.settled_outcome(&self.rules) {
                warn!(session = %session_id, %outcome, "Closing session left open by an earlier write");
                self.store.set_outcome(session_id, outcome)?;
                return Err(GameError::SessionClosed {
                    id: session_id,
                    outcome,
                });
            }

            let word = parse_guess(raw_input)?;
            let guess = Guess::scored(session.secret(), word);
            let outcome = session.outcome_after(&guess, &self.rules);

            self.store.record_guess(session_id, &guess, outcome)?;
            debug!(session = %session_id, guess = %guess.word, feedback = %guess.feedback, "Guess recorded");
            if outcome.is_terminal() {
                info!(user = %user.id, session = %session_id, %outcome, "Session finished");
            }

            let attempts_used = session.guesses().len() + 1;
            let attempts_remaining = if outcome.is_terminal() {
                0
            } else {
                self.rules.max_guesses.saturating_sub(attempts_used)
            };

            Ok(GuessReport {
                session_id,
                secret: (outcome == Outcome::Lost).then(|| session.secret().clone()),
                guess: guess.word,
                feedback: guess.feedback,
                outcome,
                attempts_used,
                attempts_remaining,
            })
        })
    }

    /// The current user's in-progress session for `today`
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Unauthenticated`] or [`GameError::StoreUnavailable`].
    pub fn load_active(
        &self,
        identity: &impl IdentityProvider,
        today: NaiveDate,
    ) -> Result<Option<Session>, GameError> {
        let user = require_user(identity)?;
        Ok(self.store.get_active_session(&user.id, today)?)
    }

    /// All of the current user's sessions on `date`, oldest first
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Unauthenticated`] or [`GameError::StoreUnavailable`].
    pub fn history(
        &self,
        identity: &impl IdentityProvider,
        date: NaiveDate,
    ) -> Result<Vec<Session>, GameError> {
        let user = require_user(identity)?;
        Ok(self.store.sessions_for(&user.id, date)?)
    }

    /// Counts of the current user's sessions on `date`
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Unauthenticated`] or [`GameError::StoreUnavailable`].
    pub fn day_summary(
        &self,
        identity: &impl IdentityProvider,
        date: NaiveDate,
    ) -> Result<DaySummary, GameError> {
        let sessions = self.history(identity, date)?;
        let count = |outcome| sessions.iter().filter(|s| s.outcome() == outcome).count();

        let won = count(Outcome::Won);
        let lost = count(Outcome::Lost);
        Ok(DaySummary {
            date,
            played: sessions.len(),
            won,
            lost,
            in_progress: count(Outcome::InProgress),
            remaining_starts: self.rules.daily_limit.saturating_sub(won + lost),
        })
    }

    fn owned_session(&self, user: &User, id: SessionId) -> Result<Session, GameError> {
        match self.store.get_session(id)? {
            Some(session) if session.owner() == &user.id => Ok(session),
            _ => {
                warn!(user = %user.id, session = %id, "Unknown session");
                Err(GameError::UnknownSession(id))
            }
        }
    }
}

fn require_user(identity: &impl IdentityProvider) -> Result<User, GameError> {
    identity.current_user().ok_or(GameError::Unauthenticated)
}

/// Normalize raw input into a guess word
fn parse_guess(raw: &str) -> Result<Word, GameError> {
    Word::new(raw).map_err(|e| match e {
        WordError::InvalidLength(actual) => GameError::InvalidGuessLength {
            expected: WORD_LEN,
            actual,
        },
        WordError::InvalidCharacters => GameError::InvalidGuessFormat,
    })
}
