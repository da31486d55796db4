//! In-memory tables shared by the store implementations

use super::StoreError;
use crate::core::Word;
use crate::game::{Guess, Outcome, Session, SessionId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sessions and dictionary, as persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Tables {
    next_id: u64,
    dictionary: Vec<Word>,
    sessions: Vec<Session>,
}

impl Tables {
    pub(crate) fn with_dictionary(dictionary: Vec<Word>) -> Self {
        Self {
            next_id: 1,
            dictionary,
            sessions: Vec::new(),
        }
    }

    /// Insert a session, unless `(owner, date)` already has one in progress
    pub(crate) fn create_session(
        &mut self,
        owner: &UserId,
        secret: &Word,
        date: NaiveDate,
    ) -> Result<SessionId, StoreError> {
        if let Some(active) = self.active(owner, date) {
            return Err(StoreError::ActiveSessionExists(active.id()));
        }
        let id = SessionId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.sessions
            .push(Session::new(id, owner.clone(), secret.clone(), date));
        Ok(id)
    }

    pub(crate) fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    fn get_mut(&mut self, id: SessionId) -> Result<&mut Session, StoreError> {
        self.sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(StoreError::MissingSession(id))
    }

    fn open_mut(&mut self, id: SessionId) -> Result<&mut Session, StoreError> {
        let session = self.get_mut(id)?;
        if session.outcome().is_terminal() {
            return Err(StoreError::OutcomeAlreadySet {
                id,
                outcome: session.outcome(),
            });
        }
        Ok(session)
    }

    pub(crate) fn active(&self, owner: &UserId, date: NaiveDate) -> Option<&Session> {
        self.of(owner, date)
            .find(|s| s.outcome() == Outcome::InProgress)
    }

    pub(crate) fn append_guess(&mut self, id: SessionId, guess: &Guess) -> Result<(), StoreError> {
        self.open_mut(id)?.push_guess(guess.clone());
        Ok(())
    }

    pub(crate) fn set_outcome(&mut self, id: SessionId, outcome: Outcome) -> Result<(), StoreError> {
        self.open_mut(id)?.set_outcome(outcome);
        Ok(())
    }

    /// Append `guess` and move to `outcome` as one step
    pub(crate) fn record_guess(
        &mut self,
        id: SessionId,
        guess: &Guess,
        outcome: Outcome,
    ) -> Result<(), StoreError> {
        let session = self.open_mut(id)?;
        session.push_guess(guess.clone());
        session.set_outcome(outcome);
        Ok(())
    }

    pub(crate) fn count_terminal(&self, owner: &UserId, date: NaiveDate) -> usize {
        self.of(owner, date)
            .filter(|s| s.outcome().is_terminal())
            .count()
    }

    pub(crate) fn sessions_for(&self, owner: &UserId, date: NaiveDate) -> Vec<Session> {
        self.of(owner, date).cloned().collect()
    }

    pub(crate) fn dictionary(&self) -> &[Word] {
        &self.dictionary
    }

    fn of<'a>(&'a self, owner: &UserId, date: NaiveDate) -> impl Iterator<Item = &'a Session> {
        self.sessions
            .iter()
            .filter(move |s| s.owner() == owner && s.date() == date)
    }
}
