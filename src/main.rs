//! Wordle Daily - CLI
//!
//! Play the daily-limited word game from the terminal. Game state lives in a
//! JSON file so a game can be resumed across runs.

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wordle_daily::{
    commands::{run_play, score_words},
    game::{
        DEFAULT_DAILY_LIMIT, DEFAULT_MAX_GUESSES, GameEngine, GameRules, Role, StaticIdentity,
        User, UserId,
    },
    output::{formatters::feedback_row, print_history, print_report, print_session},
    store::JsonFileStore,
    wordlists::{default_dictionary, loader::load_from_file},
};

#[derive(Parser)]
#[command(
    name = "wordle_daily",
    about = "Daily Wordle: guess the 5-letter word, a few games a day",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Game store file (created if missing)
    #[arg(long, global = true, env = "WORDLE_STORE", default_value = "wordle.json")]
    store: PathBuf,

    /// Player name
    #[arg(short, long, global = true, env = "WORDLE_USER")]
    user: Option<String>,

    /// Role of the player: player or admin
    #[arg(long, global = true, default_value = "player")]
    role: Role,

    /// Day to play, YYYY-MM-DD (default: today)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Guesses allowed per game
    #[arg(long, global = true, env = "WORDLE_MAX_GUESSES", default_value_t = DEFAULT_MAX_GUESSES)]
    max_guesses: usize,

    /// Finished games allowed per day
    #[arg(long, global = true, env = "WORDLE_DAILY_LIMIT", default_value_t = DEFAULT_DAILY_LIMIT)]
    daily_limit: usize,

    /// Dictionary file used to seed a new store (default: built-in list)
    #[arg(short = 'w', long, global = true)]
    dictionary: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode (default)
    Play,

    /// Start today's next game
    Start,

    /// Submit one guess to today's game
    Guess {
        /// The guessed word
        word: String,
    },

    /// Show today's game in progress
    Status,

    /// Show all games of the day
    History,

    /// Score a guess against a secret directly
    Score {
        /// The secret word
        secret: String,
        /// The guessed word
        guess: String,
    },
}

/// Everything a session command needs
struct GameContext {
    engine: GameEngine<JsonFileStore>,
    identity: StaticIdentity,
    today: NaiveDate,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.take().unwrap_or(Commands::Play);

    match command {
        Commands::Score { secret, guess } => run_score_command(&secret, &guess),
        Commands::Play => {
            let ctx = build_context(&cli)?;
            run_play(&ctx.engine, &ctx.identity, ctx.today)
        }
        Commands::Start => run_start_command(&build_context(&cli)?),
        Commands::Guess { word } => run_guess_command(&build_context(&cli)?, &word),
        Commands::Status => run_status_command(&build_context(&cli)?),
        Commands::History => run_history_command(&build_context(&cli)?),
    }
}

fn build_context(cli: &Cli) -> Result<GameContext> {
    let rules = GameRules::new(cli.max_guesses, cli.daily_limit)?;

    let dictionary = match &cli.dictionary {
        Some(path) => load_from_file(path)
            .with_context(|| format!("Failed to read dictionary {}", path.display()))?,
        None => default_dictionary(),
    };

    let store = JsonFileStore::open(&cli.store, dictionary)
        .with_context(|| format!("Failed to open game store {}", cli.store.display()))?;
    debug!(store = %store.path().display(), "Game store open");
    let engine = GameEngine::new(store, rules)?;

    let identity = StaticIdentity::new(cli.user.as_ref().map(|name| User {
        id: UserId::new(name.trim()),
        role: cli.role,
    }));
    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    debug!(%today, user = ?cli.user, "Context ready");

    Ok(GameContext {
        engine,
        identity,
        today,
    })
}

fn run_score_command(secret: &str, guess: &str) -> Result<()> {
    let feedback = score_words(secret, guess).map_err(|e| anyhow::anyhow!(e))?;
    println!(
        "{} {}  ({} exact, {} present)",
        feedback_row(&feedback),
        feedback.to_emoji(),
        feedback.count_exact(),
        feedback.count_present()
    );
    Ok(())
}

fn run_start_command(ctx: &GameContext) -> Result<()> {
    let session = ctx.engine.start_session(&ctx.identity, ctx.today)?;
    println!(
        "Game {} started. You have {} guesses.",
        session.id(),
        ctx.engine.rules().max_guesses
    );
    Ok(())
}

fn run_guess_command(ctx: &GameContext, word: &str) -> Result<()> {
    let Some(session) = ctx.engine.load_active(&ctx.identity, ctx.today)? else {
        bail!("No game in progress today; run `start` first");
    };
    let report = ctx.engine.submit_guess(&ctx.identity, session.id(), word)?;
    print_report(&report, ctx.engine.rules());
    Ok(())
}

fn run_status_command(ctx: &GameContext) -> Result<()> {
    match ctx.engine.load_active(&ctx.identity, ctx.today)? {
        Some(session) => print_session(&session, ctx.engine.rules()),
        None => {
            let remaining = ctx.engine.day_summary(&ctx.identity, ctx.today)?.remaining_starts;
            println!("No game in progress. {remaining} left today.");
        }
    }
    Ok(())
}

fn run_history_command(ctx: &GameContext) -> Result<()> {
    let sessions = ctx.engine.history(&ctx.identity, ctx.today)?;
    let summary = ctx.engine.day_summary(&ctx.identity, ctx.today)?;
    print_history(&sessions, &summary, ctx.engine.rules());
    Ok(())
}
