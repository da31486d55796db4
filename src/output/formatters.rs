//! Formatting utilities for terminal output

use crate::core::{Feedback, Mark};
use colored::{ColoredString, Colorize};

/// Color a single letter by its mark
#[must_use]
pub fn colored_letter(letter: char, mark: Mark) -> ColoredString {
    let cell = format!(" {letter} ");
    match mark {
        Mark::Exact => cell.black().on_green().bold(),
        Mark::Present => cell.black().on_yellow().bold(),
        Mark::Absent => cell.white().on_bright_black(),
    }
}

/// Format feedback as a row of colored letter tiles
#[must_use]
pub fn feedback_row(feedback: &Feedback) -> String {
    feedback
        .cells()
        .iter()
        .map(|&(letter, mark)| colored_letter(letter, mark).to_string())
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 { 0 } else { value * width / max };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Attempts used out of the maximum, as a bar
#[must_use]
pub fn attempts_bar(used: usize, max: usize) -> String {
    format!("{} {used}/{max}", create_progress_bar(used, max, max * 2))
}
