//! Game store boundary
//!
//! The engine reads and writes sessions only through [`GameStore`]. Rows come
//! back as typed [`Session`] records, never positional tuples.

mod json;
mod memory;
mod tables;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use crate::core::Word;
use crate::game::{Guess, Outcome, Session, SessionId, UserId};
use chrono::NaiveDate;
use thiserror::Error;

/// Store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No session {0}")]
    MissingSession(SessionId),

    #[error("Session {id} already finished as {outcome}")]
    OutcomeAlreadySet { id: SessionId, outcome: Outcome },

    #[error("Session {0} is still in progress")]
    ActiveSessionExists(SessionId),
}

/// Persistence for sessions and the dictionary
///
/// Implementations must be safe to share across threads. Each call is one
/// scoped unit of work; nothing is held open between calls.
pub trait GameStore: Send + Sync {
    /// Insert a new in-progress session and return its id
    ///
    /// Fails with [`StoreError::ActiveSessionExists`] if `owner` already has
    /// one in progress on `date`.
    fn create_session(
        &self,
        owner: &UserId,
        secret: &Word,
        date: NaiveDate,
    ) -> Result<SessionId, StoreError>;

    fn get_session(&self, id: SessionId) -> Result<Option<Session>, StoreError>;

    /// The in-progress session for `(owner, date)`, if any
    fn get_active_session(
        &self,
        owner: &UserId,
        date: NaiveDate,
    ) -> Result<Option<Session>, StoreError>;

    /// Append a guess to an in-progress session
    fn append_guess(&self, id: SessionId, guess: &Guess) -> Result<(), StoreError>;

    /// Record a terminal outcome; a session can only be closed once
    fn set_outcome(&self, id: SessionId, outcome: Outcome) -> Result<(), StoreError>;

    /// Append a guess and set the session's outcome in a single write
    ///
    /// Either both land or neither does.
    fn record_guess(
        &self,
        id: SessionId,
        guess: &Guess,
        outcome: Outcome,
    ) -> Result<(), StoreError>;

    /// Sessions won or lost by `owner` on `date`
    fn count_terminal_sessions(&self, owner: &UserId, date: NaiveDate)
    -> Result<usize, StoreError>;

    /// All of `owner`'s sessions on `date`, oldest first
    fn sessions_for(&self, owner: &UserId, date: NaiveDate) -> Result<Vec<Session>, StoreError>;

    fn get_dictionary(&self) -> Result<Vec<Word>, StoreError>;
}
