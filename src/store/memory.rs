//! In-memory game store

use super::tables::Tables;
use super::{GameStore, StoreError};
use crate::core::Word;
use crate::game::{Guess, Outcome, Session, SessionId, UserId};
use chrono::NaiveDate;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

/// Store that lives for the process only
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Empty store seeded with `dictionary`
    #[must_use]
    pub fn new(dictionary: Vec<Word>) -> Self {
        Self {
            tables: Mutex::new(Tables::with_dictionary(dictionary)),
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // Every mutation is a single step, so a poisoned table is still consistent
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self))]
    fn create_session(
        &self,
        owner: &UserId,
        secret: &Word,
        date: NaiveDate,
    ) -> Result<SessionId, StoreError> {
        let id = self.tables().create_session(owner, secret, date)?;
        debug!(%id, "Session row created");
        Ok(id)
    }

    fn get_session(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        Ok(self.tables().get(id).cloned())
    }

    fn get_active_session(
        &self,
        owner: &UserId,
        date: NaiveDate,
    ) -> Result<Option<Session>, StoreError> {
        Ok(self.tables().active(owner, date).cloned())
    }

    #[instrument(skip(self, guess), fields(guess = %guess.word))]
    fn append_guess(&self, id: SessionId, guess: &Guess) -> Result<(), StoreError> {
        self.tables().append_guess(id, guess)
    }

    #[instrument(skip(self))]
    fn set_outcome(&self, id: SessionId, outcome: Outcome) -> Result<(), StoreError> {
        self.tables().set_outcome(id, outcome)
    }

    #[instrument(skip(self, guess), fields(guess = %guess.word))]
    fn record_guess(
        &self,
        id: SessionId,
        guess: &Guess,
        outcome: Outcome,
    ) -> Result<(), StoreError> {
        self.tables().record_guess(id, guess, outcome)
    }

    fn count_terminal_sessions(
        &self,
        owner: &UserId,
        date: NaiveDate,
    ) -> Result<usize, StoreError> {
        Ok(self.tables().count_terminal(owner, date))
    }

    fn sessions_for(&self, owner: &UserId, date: NaiveDate) -> Result<Vec<Session>, StoreError> {
        Ok(self.tables().sessions_for(owner, date))
    }

    fn get_dictionary(&self) -> Result<Vec<Word>, StoreError> {
        Ok(self.tables().dictionary().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::default_dictionary;

    #[test]
    fn round_trip_through_trait() {
        let store = MemoryStore::new(default_dictionary());
        let alice = UserId::new("alice");
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let secret = Word::new("RIVER").unwrap();

        let id = store.create_session(&alice, &secret, day).unwrap();
        let guess = Guess::scored(&secret, Word::new("RAVEN").unwrap());
        store.append_guess(id, &guess).unwrap();

        let active = store.get_active_session(&alice, day).unwrap().unwrap();
        assert_eq!(active.id(), id);
        assert_eq!(active.guesses(), [guess]);

        store.set_outcome(id, Outcome::Lost).unwrap();
        assert!(store.get_active_session(&alice, day).unwrap().is_none());
        assert_eq!(store.count_terminal_sessions(&alice, day).unwrap(), 1);
        assert_eq!(store.get_dictionary().unwrap().len(), 20);
    }
}
