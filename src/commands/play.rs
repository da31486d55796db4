//! Interactive play mode
//!
//! Text-based game loop: resumes today's game or starts a new one, then
//! prompts for guesses until the game ends or the player quits.

use crate::game::{GameEngine, GameError, IdentityProvider, Outcome, Session};
use crate::output::{print_report, print_session, print_summary};
use crate::store::GameStore;
use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use std::io::{self, Write};

/// Why a single game stopped
enum GameEnd {
    Finished,
    Quit,
}

/// Run the interactive game loop
///
/// # Errors
///
/// Returns an error on I/O failure reading input, if nobody is signed in, or
/// if the store becomes unavailable. Invalid guesses are re-prompted.
pub fn run_play<S: GameStore>(
    engine: &GameEngine<S>,
    identity: &impl IdentityProvider,
    today: NaiveDate,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════╗");
    println!("║         Wordle · Daily Game          ║");
    println!("╚══════════════════════════════════════╝\n");
    println!(
        "Guess the {}-letter word in {} tries.",
        crate::core::WORD_LEN,
        engine.rules().max_guesses
    );
    println!(
        "  {} right spot  {} wrong spot  {} not in word",
        "G".black().on_green(),
        "Y".black().on_yellow(),
        "-".white().on_bright_black()
    );
    println!("Commands: 'quit' to exit\n");

    loop {
        let session = match engine.load_active(identity, today)? {
            Some(session) => {
                println!("Resuming today's game.");
                session
            }
            None => match engine.start_session(identity, today) {
                Ok(session) => session,
                Err(GameError::QuotaExceeded { limit }) => {
                    println!("You've finished {limit} games today. Come back tomorrow!");
                    print_summary(&engine.day_summary(identity, today)?);
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            },
        };

        if !session.guesses().is_empty() {
            print_session(&session, engine.rules());
        }

        if let GameEnd::Quit = play_session(engine, identity, &session)? {
            println!("\n👋 Your game is saved. See you soon!\n");
            return Ok(());
        }

        let summary = engine.day_summary(identity, today)?;
        print_summary(&summary);
        if summary.remaining_starts == 0 {
            println!("\nThat's all for today. Come back tomorrow!\n");
            return Ok(());
        }

        match get_user_input("Play again? (yes/no)")?
            .map(|answer| answer.to_lowercase())
            .as_deref()
        {
            Some("yes" | "y") => println!("\n🔄 New game started!\n"),
            _ => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
        }
    }
}

fn play_session<S: GameStore>(
    engine: &GameEngine<S>,
    identity: &impl IdentityProvider,
    session: &Session,
) -> Result<GameEnd> {
    let mut turn = session.guesses().len() + 1;

    loop {
        let prompt = format!("Guess {turn}/{}", engine.rules().max_guesses);
        let Some(input) = get_user_input(&prompt)? else {
            return Ok(GameEnd::Quit);
        };

        match input.to_lowercase().as_str() {
            "quit" | "q" | "exit" => return Ok(GameEnd::Quit),
            "" => continue,
            _ => {}
        }

        match engine.submit_guess(identity, session.id(), &input) {
            Ok(report) => {
                print_report(&report, engine.rules());
                if report.outcome != Outcome::InProgress {
                    return Ok(GameEnd::Finished);
                }
                turn += 1;
            }
            Err(e) if e.is_validation() => println!("❌ {e}\n"),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Get user input with a prompt; `None` at end of input
fn get_user_input(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}
