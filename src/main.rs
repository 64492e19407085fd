//! Votego: a Go engine played by committee.
//!
//! The console loop stands in for the chat transport the engine usually sits
//! behind: `!`-prefixed commands cast and inspect votes, and `!resolve`
//! triggers the round resolution a scheduler would normally fire.
//!
//! ## Usage
//!
//! - `votego` - interactive console loop
//! - `votego play --state game.json --user alice` - same, explicit
//! - `votego demo` - scripted round showing the flow

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use votego::commands::{SpecialCommand, HELP_MESSAGE, VOTE_USAGE};
use votego::game::Game;
use votego::render::AsciiRenderer;

/// Votego: a vote-driven Go engine
#[derive(Parser)]
#[command(name = "votego")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Where the game is kept between runs
    #[arg(long, default_value = "votego.json")]
    state: PathBuf,

    /// Seed for the vote draw, for reproducible games (fresh games only)
    #[arg(long)]
    seed: Option<u64>,

    /// Participant name used for console votes
    #[arg(long, default_value = "console")]
    user: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive console loop
    Play,
    /// Run a scripted demonstration round
    Demo,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Some(Commands::Demo) => run_demo(cli.seed),
        Some(Commands::Play) | None => run_console(&cli),
    }
}

fn run_console(cli: &Cli) -> anyhow::Result<()> {
    let mut game = load_game(cli)?;
    let mut renderer = AsciiRenderer;
    let user = cli.user.as_str();

    println!("Votego console. Commands start with '!': try `!show`, `!vote D4`, `!resolve`. `!quit` leaves.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading console input")?;
        let text = line.trim();
        if !text.starts_with('!') {
            continue;
        }

        let mut words = text[1..].split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let command = command.to_lowercase();
        let argument = words.next();

        let reply = match (command.as_str(), argument) {
            ("vote" | "move" | "play", Some(token)) => {
                Some(game.handle_vote_token(token, user, false))
            }
            ("secret", Some(token)) => Some(game.handle_vote_token(token, user, true)),
            ("vote" | "move" | "play" | "secret", None) => Some(VOTE_USAGE.to_string()),
            ("votes" | "moves" | "voted" | "chance", _) => {
                Some(game.handle_special(SpecialCommand::Votes, user))
            }
            ("captures", _) => Some(game.handle_special(SpecialCommand::Captures, user)),
            ("show" | "board", _) => Some(game.handle_special(SpecialCommand::Show, user)),
            ("pass" | "skip", _) => Some(game.handle_special(SpecialCommand::Pass, user)),
            ("random", _) => {
                Some(game.handle_special(SpecialCommand::RandomVote { hidden: false }, user))
            }
            ("resign", _) | ("give", Some("up")) => {
                Some(game.handle_special(SpecialCommand::Resign, user))
            }
            ("yes" | "yeah" | "ya" | "y" | "ja" | "please" | "ok" | "yep", _) => {
                Some(game.handle_special(SpecialCommand::ConfirmResign, user))
            }
            ("no" | "nope" | "n" | "nee" | "don't" | "cancel", _) => {
                Some(game.handle_special(SpecialCommand::DeclineResign, user))
            }
            // The scheduler stand-in. Silent when there are no votes.
            ("resolve", _) => game.play_round(&mut renderer),
            ("quit" | "exit", _) => break,
            _ => Some(HELP_MESSAGE.to_string()),
        };

        if let Some(reply) = reply {
            println!("{reply}");
        }
        save_game(&cli.state, &game)?;
    }
    Ok(())
}

fn run_demo(seed: Option<u64>) -> anyhow::Result<()> {
    println!("Votego: a Go engine played by committee\n");

    let mut game = match seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    let mut renderer = AsciiRenderer;

    println!("=== Voting ===");
    for (voter, token) in [("alice", "D4"), ("bob", "D4"), ("carol", "Q16")] {
        println!(
            "{voter} votes {token}: {}",
            game.handle_vote_token(token, voter, false)
        );
    }
    print!("{}", game.handle_special(SpecialCommand::Votes, "alice"));

    println!("\n=== Resolving ===");
    if let Some(message) = game.play_round(&mut renderer) {
        println!("{message}");
    }
    Ok(())
}

fn load_game(cli: &Cli) -> anyhow::Result<Game> {
    match fs::read_to_string(&cli.state) {
        Ok(blob) => {
            let game = serde_json::from_str(&blob)
                .with_context(|| format!("parsing saved game {}", cli.state.display()))?;
            info!(path = %cli.state.display(), "resuming saved game");
            Ok(game)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(match cli.seed {
            Some(seed) => Game::with_seed(seed),
            None => Game::new(),
        }),
        Err(err) => {
            Err(err).with_context(|| format!("reading saved game {}", cli.state.display()))
        }
    }
}

fn save_game(path: &Path, game: &Game) -> anyhow::Result<()> {
    let blob = serde_json::to_string(game).context("serializing game state")?;
    fs::write(path, blob).with_context(|| format!("writing saved game {}", path.display()))?;
    Ok(())
}
