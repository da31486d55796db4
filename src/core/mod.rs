//! Core domain types for the game
//!
//! Words and the scoring of a guess against a secret. Everything here is
//! pure and independent of sessions or storage.

mod feedback;
mod word;

pub use feedback::{Feedback, Mark};
pub use word::{WORD_LEN, Word, WordError};
