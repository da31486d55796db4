//! Daily quota gate
//!
//! A pure query over the store: how many sessions a user has finished on a
//! given day, and whether another may start.

use super::{GameError, GameRules, UserId};
use crate::store::GameStore;
use chrono::NaiveDate;
use tracing::{debug, instrument};

/// Counts finished sessions against [`GameRules::daily_limit`]
pub struct QuotaGate<'a, S: GameStore + ?Sized> {
    store: &'a S,
    rules: &'a GameRules,
}

impl<'a, S: GameStore + ?Sized> QuotaGate<'a, S> {
    pub const fn new(store: &'a S, rules: &'a GameRules) -> Self {
        Self { store, rules }
    }

    /// Sessions won or lost by `user` on `date`
    ///
    /// # Errors
    ///
    /// Returns [`GameError::StoreUnavailable`] if the store cannot be read.
    #[instrument(skip(self))]
    pub fn completed_today(&self, user: &UserId, date: NaiveDate) -> Result<usize, GameError> {
        let count = self.store.count_terminal_sessions(user, date)?;
        debug!(count, limit = self.rules.daily_limit, "Completed sessions");
        Ok(count)
    }

    /// Whether `user` may start another session on `date`
    ///
    /// # Errors
    ///
    /// Returns [`GameError::StoreUnavailable`] if the store cannot be read.
    pub fn can_start(&self, user: &UserId, date: NaiveDate) -> Result<bool, GameError> {
        Ok(self.completed_today(user, date)? < self.rules.daily_limit)
    }

    /// Starts left today
    ///
    /// # Errors
    ///
    /// Returns [`GameError::StoreUnavailable`] if the store cannot be read.
    pub fn remaining(&self, user: &UserId, date: NaiveDate) -> Result<usize, GameError> {
        Ok(self
            .rules
            .daily_limit
            .saturating_sub(self.completed_today(user, date)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::Outcome;
    use crate::store::MemoryStore;
    use crate::wordlists::default_dictionary;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn counts_only_terminal_sessions_for_the_day() {
        let store = MemoryStore::new(default_dictionary());
        let rules = GameRules::default();
        let alice = UserId::new("alice");
        let secret = Word::new("APPLE").unwrap();

        let won = store.create_session(&alice, &secret, day()).unwrap();
        store.set_outcome(won, Outcome::Won).unwrap();
        store.create_session(&alice, &secret, day()).unwrap();
        let other_day = store
            .create_session(&alice, &secret, day().succ_opt().unwrap())
            .unwrap();
        store.set_outcome(other_day, Outcome::Lost).unwrap();

        let gate = QuotaGate::new(&store, &rules);
        assert_eq!(gate.completed_today(&alice, day()).unwrap(), 1);
        assert_eq!(gate.remaining(&alice, day()).unwrap(), 2);
        assert!(gate.can_start(&alice, day()).unwrap());
    }

    #[test]
    fn limit_reached_blocks_start() {
        let store = MemoryStore::new(default_dictionary());
        let rules = GameRules::default();
        let bob = UserId::new("bob");
        let secret = Word::new("MELON").unwrap();

        for _ in 0..3 {
            let id = store.create_session(&bob, &secret, day()).unwrap();
            store.set_outcome(id, Outcome::Lost).unwrap();
        }

        let gate = QuotaGate::new(&store, &rules);
        assert!(!gate.can_start(&bob, day()).unwrap());
        assert_eq!(gate.remaining(&bob, day()).unwrap(), 0);
        assert!(gate.can_start(&UserId::new("carol"), day()).unwrap());
    }
}
