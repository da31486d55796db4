//! Direct scoring command

use crate::core::{Feedback, Word};

/// Score `guess` against `secret` without touching any session
///
/// # Errors
///
/// Returns an error message if either word is not 5 letters A-Z.
pub fn score_words(secret: &str, guess: &str) -> Result<Feedback, String> {
    let secret = Word::new(secret).map_err(|e| format!("Invalid secret: {e}"))?;
    let guess = Word::new(guess).map_err(|e| format!("Invalid guess: {e}"))?;
    Ok(Feedback::score(&secret, &guess))
}
