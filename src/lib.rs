//! Wordle Daily
//!
//! A daily-limited Wordle game engine: secret selection, exact-first guess
//! scoring, a per-session state machine and a per-day quota.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_daily::core::{Feedback, Word};
//!
//! let secret = Word::new("mango").unwrap();
//! let guess = Word::new("gonam").unwrap();
//!
//! let feedback = Feedback::score(&secret, &guess);
//! assert_eq!(feedback.to_emoji(), "🟨🟨🟨🟨🟨");
//! ```

// Core domain types
pub mod core;

// Sessions, quota and the engine
pub mod game;

// Session persistence
pub mod store;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
