//! Game rules configuration

use super::GameError;

/// Guesses allowed per session
pub const DEFAULT_MAX_GUESSES: usize = 5;

/// Completed sessions allowed per user per day
pub const DEFAULT_DAILY_LIMIT: usize = 3;

/// Tunable business rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// The last allowed guess, if not winning, loses the session
    pub max_guesses: usize,
    /// Terminal sessions per (user, day) before starting is refused
    pub daily_limit: usize,
}

impl GameRules {
    /// Rules with explicit limits
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidRules`] if either limit is zero.
    pub fn new(max_guesses: usize, daily_limit: usize) -> Result<Self, GameError> {
        if max_guesses == 0 {
            return Err(GameError::InvalidRules("max guesses must be at least 1"));
        }
        if daily_limit == 0 {
            return Err(GameError::InvalidRules("daily limit must be at least 1"));
        }
        Ok(Self {
            max_guesses,
            daily_limit,
        })
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_guesses: DEFAULT_MAX_GUESSES,
            daily_limit: DEFAULT_DAILY_LIMIT,
        }
    }
}
