//! Display functions for game state

use super::formatters::{attempts_bar, feedback_row};
use crate::game::{DaySummary, GameRules, GuessReport, Outcome, Session};
use colored::Colorize;

/// Print a session's board: every guess so far and the attempts used
pub fn print_session(session: &Session, rules: &GameRules) {
    println!("\n{}", "─".repeat(40).cyan());
    println!(
        "Game {} · {} · {}",
        session.id().to_string().bright_yellow().bold(),
        session.date(),
        outcome_label(session.outcome())
    );
    println!("{}", "─".repeat(40).cyan());

    for (i, guess) in session.guesses().iter().enumerate() {
        println!(
            "  {}. {} {}",
            (i + 1).to_string().bright_black(),
            feedback_row(&guess.feedback),
            guess.feedback.to_emoji()
        );
    }

    println!(
        "\n  Attempts: {}",
        attempts_bar(session.guesses().len(), rules.max_guesses)
    );
    if let Some(secret) = session.revealed_secret() {
        println!("  The word was {}", secret.text().bright_white().bold());
    }
}

/// Print the result of one guess
pub fn print_report(report: &GuessReport, rules: &GameRules) {
    println!(
        "\n  {}. {} {}",
        report.attempts_used.to_string().bright_black(),
        feedback_row(&report.feedback),
        report.feedback.to_emoji()
    );

    match report.outcome {
        Outcome::Won => {
            println!("\n{}", "═".repeat(40).bright_cyan());
            println!("{}", "    🎉  S O L V E D !  🎉".bright_green().bold());
            println!("{}", "═".repeat(40).bright_cyan());

            let performance = match report.attempts_used {
                1 => "🏆 Incredible hole-in-one!",
                2 => "⭐ Outstanding!",
                3 => "💫 Very well played!",
                4 => "✨ Nice work!",
                _ => "👍 Got it!",
            };
            println!("\n  {}", performance.bright_yellow().bold());
            println!(
                "  Solved in {} {}",
                report.attempts_used.to_string().bright_cyan().bold(),
                if report.attempts_used == 1 {
                    "guess"
                } else {
                    "guesses"
                }
            );
        }
        Outcome::Lost => {
            println!(
                "\n  {} Out of guesses.",
                format!("❌ {}/{}", report.attempts_used, rules.max_guesses)
                    .red()
                    .bold()
            );
            if let Some(secret) = &report.secret {
                println!("  The word was {}", secret.text().bright_white().bold());
            }
        }
        Outcome::InProgress => {
            println!(
                "  {} left",
                pluralize(report.attempts_remaining, "guess", "guesses")
            );
        }
    }
}

/// Print every session of a day with a summary line
pub fn print_history(sessions: &[Session], summary: &DaySummary, rules: &GameRules) {
    println!("\n{}", "═".repeat(40).cyan());
    println!(
        " {} {} ",
        "HISTORY".bright_cyan().bold(),
        summary.date.to_string().bright_yellow()
    );
    println!("{}", "═".repeat(40).cyan());

    if sessions.is_empty() {
        println!("\n  No games played.");
    }
    for session in sessions {
        print_session(session, rules);
    }

    print_summary(summary);
}

/// Print a day's counts
pub fn print_summary(summary: &DaySummary) {
    println!(
        "\n📊 Played {} · Won {} · Lost {} · In progress {}",
        summary.played,
        summary.won.to_string().green(),
        summary.lost.to_string().red(),
        summary.in_progress
    );
    println!(
        "   {} remaining today",
        pluralize(summary.remaining_starts, "game", "games")
    );
}

fn outcome_label(outcome: Outcome) -> colored::ColoredString {
    match outcome {
        Outcome::InProgress => "in progress".yellow(),
        Outcome::Won => "won".green().bold(),
        Outcome::Lost => "lost".red().bold(),
    }
}

fn pluralize(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}
