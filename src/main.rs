//! Checkers-Rust: a checkers engine with alpha-beta search.
//!
//! ## Usage
//!
//! - `checkers-rust` - Play Black against the engine
//! - `checkers-rust play --human red --depth 6` - Play Red against a deeper engine
//! - `checkers-rust selfplay --random red --seed 7` - Engine against a random mover
//! - `checkers-rust moves --side red` - List the opening moves for one side
//!
//! Set `RUST_LOG=debug` to see search reports on stderr.

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use checkers_rust::board::{Board, Color};
use checkers_rust::constants::{DEFAULT_DEPTH, MAX_GAME_PLIES};
use checkers_rust::game::Session;
use checkers_rust::notation::str_move;
use checkers_rust::playout::{Outcome, Player, play_game};

/// Checkers-Rust: checkers with a minimax alpha-beta engine
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine on the console
    Play {
        /// Search depth in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u32,
        /// Color played by the human
        #[arg(long, value_enum, default_value_t = Side::Black)]
        human: Side,
    },
    /// Play a whole game between two automatic players
    Selfplay {
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        black_depth: u32,
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        red_depth: u32,
        /// Replace this side's engine with a random mover
        #[arg(long, value_enum)]
        random: Option<Side>,
        /// Seed for the random mover
        #[arg(long)]
        seed: Option<u64>,
        /// Stop and score a draw after this many plies
        #[arg(long, default_value_t = MAX_GAME_PLIES)]
        max_plies: usize,
    },
    /// List the legal moves of the starting position
    Moves {
        #[arg(long, value_enum, default_value_t = Side::Black)]
        side: Side,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Side {
    Black,
    Red,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Color::Black,
            Side::Red => Color::Red,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { depth, human }) => run_play(human.into(), depth),
        None => run_play(Color::Black, DEFAULT_DEPTH),
        Some(Commands::Selfplay {
            black_depth,
            red_depth,
            random,
            seed,
            max_plies,
        }) => {
            let player = |side: Side, depth: u32| {
                if random == Some(side) {
                    Player::Random
                } else {
                    Player::Engine { depth }
                }
            };
            run_selfplay(
                player(Side::Black, black_depth),
                player(Side::Red, red_depth),
                seed,
                max_plies,
            );
            Ok(())
        }
        Some(Commands::Moves { side }) => {
            let mut board = Board::new();
            board.set_turn(side.into());
            for mv in board.legal_moves() {
                println!("{}", str_move(&mv));
            }
            Ok(())
        }
    }
}

fn run_play(human: Color, depth: u32) -> Result<()> {
    let mut session = Session::new(human, depth);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout)?;
    Ok(())
}

fn run_selfplay(black: Player, red: Player, seed: Option<u64>, max_plies: usize) {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let record = play_game(Board::new(), black, red, max_plies, &mut rng);

    for (i, mv) in record.moves.iter().enumerate() {
        let side = if i % 2 == 0 { "black" } else { "red" };
        println!("{:>3}. {side:<5} {}", i + 1, str_move(mv));
    }
    println!("{}", record.board);
    match record.outcome {
        Outcome::Win(winner) => println!("{winner} wins after {} plies", record.moves.len()),
        Outcome::Draw => println!("draw after {} plies", record.moves.len()),
    }
}
