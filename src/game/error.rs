//! Game error types

use super::{Outcome, Role, SessionId};
use crate::store::StoreError;
use thiserror::Error;

/// Everything the engine can refuse
///
/// All variants except [`GameError::StoreUnavailable`] and
/// [`GameError::DictionaryEmpty`] are validation failures: nothing was
/// written and the caller can re-prompt with the reason.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Users with role '{0}' cannot play")]
    RoleNotAllowed(Role),

    #[error("Daily limit reached: {limit} games already finished today")]
    QuotaExceeded { limit: usize },

    #[error("Session {0} is already in progress today")]
    SessionAlreadyActive(SessionId),

    #[error("Session {id} is over ({outcome}), no more guesses accepted")]
    SessionClosed { id: SessionId, outcome: Outcome },

    #[error("Guess must be exactly {expected} letters, got {actual}")]
    InvalidGuessLength { expected: usize, actual: usize },

    #[error("Guess must contain only letters A-Z")]
    InvalidGuessFormat,

    #[error("No session {0} for this user")]
    UnknownSession(SessionId),

    #[error("Invalid rules: {0}")]
    InvalidRules(&'static str),

    /// Never retried inside the engine; the caller decides
    #[error("Game store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("Dictionary is empty")]
    DictionaryEmpty,
}

impl GameError {
    /// Whether the caller can simply re-prompt
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::StoreUnavailable(_) | Self::DictionaryEmpty)
    }
}
