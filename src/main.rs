//! Checkers-Rust: checkers against a lookahead engine.
//!
//! ## Usage
//!
//! - `checkers-rust` - Start the text console, engine playing North
//! - `checkers-rust console --engine south --level 4` - Console with options
//! - `checkers-rust selfplay` - Watch the engine play itself

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use checkers_rust::board::Player;
use checkers_rust::console::Console;
use checkers_rust::search::AutoPlayer;
use checkers_rust::session::Session;
use checkers_rust::worker::SearchWorker;

/// Checkers-Rust: checkers with a negamax opponent
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level for diagnostics on stderr
    #[arg(long, global = true, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// Seed for move ordering, for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write the engine's per-move search trace to stderr
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine through a line-oriented text console
    Console {
        /// Lookahead level, clamped to 0..=10
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        level: i32,
        /// Side played by the engine
        #[arg(long, value_enum, default_value_t = Side::North)]
        engine: Side,
    },
    /// Let the engine play both sides
    Selfplay {
        /// Lookahead level for South
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        south_level: i32,
        /// Lookahead level for North
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        north_level: i32,
        /// Stop after this many moves
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    South,
    North,
    None,
}

impl From<Side> for Option<Player> {
    fn from(side: Side) -> Self {
        match side {
            Side::South => Some(Player::South),
            Side::North => Some(Player::North),
            Side::None => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    TermLogger::init(
        cli.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialise logging")?;

    let rng = || match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let player = |level: i32| {
        let player = AutoPlayer::with_rng(level, rng());
        if cli.trace {
            player.with_trace(Box::new(io::stderr()))
        } else {
            player
        }
    };

    match cli.command {
        Some(Commands::Console { level, engine }) => {
            let mut console = Console::new(Session::with_rng(rng()), player(level), engine.into());
            console
                .run(io::stdin().lock(), io::stdout())
                .context("console I/O failed")?;
        }
        Some(Commands::Selfplay {
            south_level,
            north_level,
            max_plies,
        }) => {
            run_selfplay(
                Session::with_rng(rng()),
                player(south_level),
                player(north_level),
                max_plies,
            )?;
        }
        None => {
            let mut console =
                Console::new(Session::with_rng(rng()), player(1), Some(Player::North));
            console
                .run(io::stdin().lock(), io::stdout())
                .context("console I/O failed")?;
        }
    }
    Ok(())
}

fn run_selfplay(
    mut session: Session,
    south: AutoPlayer,
    north: AutoPlayer,
    max_plies: usize,
) -> Result<()> {
    println!(
        "Checkers-Rust self-play: South level {}, North level {}\n",
        south.level(),
        north.level()
    );
    let mut south = SearchWorker::spawn(south);
    let mut north = SearchWorker::spawn(north);

    for ply in 1..=max_plies {
        let Some(active) = session.active_player() else {
            break;
        };
        let worker = match active {
            Player::South => &mut south,
            Player::North => &mut north,
        };
        let mv = worker
            .choose_move(session.game_state())
            .with_context(|| format!("search failed at ply {ply}"))?
            .context("no move found for a live position")?;
        session
            .execute_move(&mv)
            .with_context(|| format!("engine produced an illegal move at ply {ply}"))?;
        println!("{ply:3}. {active}: {mv}");
    }

    println!("\n{}", session.game_state());
    Ok(())
}
