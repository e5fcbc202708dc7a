//! Self-play: whole games between two automatic players.
//!
//! A player is either the alpha-beta engine at a fixed depth or a random
//! mover. Random choices come from a caller-supplied `fastrand::Rng`, so a
//! fixed seed replays the same game.

use tracing::{debug, info};

use crate::board::{Board, Color, Move};
use crate::search::best_move;

/// Who picks the moves for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    /// Alpha-beta search at this depth
    Engine { depth: u32 },
    /// Uniformly random legal move
    Random,
}

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The other side ran out of moves
    Win(Color),
    /// The ply cap was reached first
    Draw,
}

/// A finished game.
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// Moves in the order they were played, Black first unless the start board says otherwise
    pub moves: Vec<Move>,
    /// Final position
    pub board: Board,
    pub outcome: Outcome,
}

/// Pick a legal move uniformly at random.
pub fn random_move(board: &Board, rng: &mut fastrand::Rng) -> Option<Move> {
    let mut moves = board.legal_moves();
    if moves.is_empty() {
        return None;
    }
    let i = rng.usize(..moves.len());
    Some(moves.swap_remove(i))
}

fn choose_move(board: &Board, player: Player, rng: &mut fastrand::Rng) -> Option<Move> {
    match player {
        Player::Engine { depth } => best_move(board, depth),
        Player::Random => random_move(board, rng),
    }
}

/// Play from `start` until one side has no move or `max_plies` moves were made.
pub fn play_game(
    start: Board,
    black: Player,
    red: Player,
    max_plies: usize,
    rng: &mut fastrand::Rng,
) -> GameRecord {
    let mut board = start;
    let mut moves = Vec::new();

    while moves.len() < max_plies {
        let player = match board.turn() {
            Color::Black => black,
            Color::Red => red,
        };
        let Some(mv) = choose_move(&board, player, rng) else {
            let winner = board.turn().opposite();
            info!(%winner, plies = moves.len(), "game over");
            return GameRecord {
                moves,
                board,
                outcome: Outcome::Win(winner),
            };
        };
        debug!(ply = moves.len() + 1, side = %board.turn(), mv = %mv, "move");
        board.apply_move(&mv);
        moves.push(mv);
    }

    // The cap may land exactly on a decided position.
    let outcome = if board.is_terminal() {
        Outcome::Win(board.turn().opposite())
    } else {
        Outcome::Draw
    };
    info!(?outcome, plies = moves.len(), "game stopped at ply cap");
    GameRecord {
        moves,
        board,
        outcome,
    }
}
