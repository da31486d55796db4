//! Daily game sessions
//!
//! The session state machine, the daily quota gate and secret selection,
//! plus the identity types they consume.

mod engine;
mod error;
mod identity;
mod locks;
mod quota;
mod rules;
mod selector;
mod session;

pub use engine::{DaySummary, GameEngine, GuessReport};
pub use error::GameError;
pub use identity::{IdentityProvider, Role, StaticIdentity, User, UserId};
pub use quota::QuotaGate;
pub use rules::{DEFAULT_DAILY_LIMIT, DEFAULT_MAX_GUESSES, GameRules};
pub use selector::WordSelector;
pub use session::{Guess, Outcome, Session, SessionId};
