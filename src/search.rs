//! Depth-bounded minimax search with alpha-beta pruning.
//!
//! Scores are absolute: positive favors Black, negative favors Red. Black
//! maximizes and Red minimizes. A side with no legal move has lost and the
//! position scores `-WIN_SCORE` (Black to move) or `+WIN_SCORE` (Red to
//! move), regardless of how deep in the tree it was found.
//!
//! Every child is searched on its own clone of the parent board, so no
//! state is shared between branches.

use tracing::debug;

use crate::board::{Board, Color, Move};
use crate::constants::WIN_SCORE;

/// Counters collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, the root's children included
    pub nodes: u64,
    /// Times a move loop stopped early on a cutoff
    pub cutoffs: u64,
}

/// Outcome of a root search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best: Move,
    pub score: i32,
    pub stats: SearchStats,
}

/// Static evaluation: Black's piece count minus Red's. Kings count once.
pub fn evaluate(board: &Board) -> i32 {
    board.count(Color::Black) as i32 - board.count(Color::Red) as i32
}

fn terminal_score(board: &Board) -> i32 {
    match board.turn() {
        Color::Black => -WIN_SCORE,
        Color::Red => WIN_SCORE,
    }
}

/// Alpha-beta value of `board` searched `depth` plies deep.
pub fn alpha_beta(board: &Board, depth: u32, alpha: i32, beta: i32) -> i32 {
    let mut stats = SearchStats::default();
    alpha_beta_counted(board, depth, alpha, beta, &mut stats)
}

fn alpha_beta_counted(
    board: &Board,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    let moves = board.legal_moves();
    if moves.is_empty() {
        return terminal_score(board);
    }
    if depth == 0 {
        return evaluate(board);
    }

    match board.turn() {
        Color::Black => {
            for mv in &moves {
                let mut child = board.clone();
                child.apply_move(mv);
                alpha = alpha.max(alpha_beta_counted(&child, depth - 1, alpha, beta, stats));
                // Strict comparison: equal bounds keep searching.
                if alpha > beta {
                    stats.cutoffs += 1;
                    break;
                }
            }
            alpha
        }
        Color::Red => {
            for mv in &moves {
                let mut child = board.clone();
                child.apply_move(mv);
                beta = beta.min(alpha_beta_counted(&child, depth - 1, alpha, beta, stats));
                if beta < alpha {
                    stats.cutoffs += 1;
                    break;
                }
            }
            beta
        }
    }
}

/// Plain minimax over the same tree as [`alpha_beta`], without pruning.
pub fn minimax(board: &Board, depth: u32) -> i32 {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return terminal_score(board);
    }
    if depth == 0 {
        return evaluate(board);
    }

    let scores = moves.iter().map(|mv| {
        let mut child = board.clone();
        child.apply_move(mv);
        minimax(&child, depth - 1)
    });
    let best = match board.turn() {
        Color::Black => scores.max(),
        Color::Red => scores.min(),
    };
    best.unwrap_or_else(|| evaluate(board))
}

/// Search every root move and keep the best one for the side to move.
///
/// Each child is scored with a full `(-WIN_SCORE, WIN_SCORE)` window.
/// Ties go to the earliest move in [`Board::legal_moves`] order. Returns
/// `None` on a terminal board.
pub fn search(board: &Board, depth: u32) -> Option<SearchResult> {
    let moves = board.legal_moves();
    let first = moves.first()?.clone();

    let mut stats = SearchStats::default();
    let maximizing = board.turn() == Color::Black;
    let mut best = first;
    let mut best_score = if maximizing { -WIN_SCORE } else { WIN_SCORE };

    for mv in moves {
        let mut child = board.clone();
        child.apply_move(&mv);
        let score = alpha_beta_counted(
            &child,
            depth.saturating_sub(1),
            -WIN_SCORE,
            WIN_SCORE,
            &mut stats,
        );
        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better {
            best_score = score;
            best = mv;
        }
    }

    debug!(
        side = %board.turn(),
        depth,
        best = %best,
        score = best_score,
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        "search finished"
    );
    Some(SearchResult {
        best,
        score: best_score,
        stats,
    })
}

/// The move chosen for the side to move at `depth`, or `None` if it has none.
///
/// The input board is not modified.
pub fn best_move(board: &Board, depth: u32) -> Option<Move> {
    search(board, depth).map(|result| result.best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Square};

    fn sq(col: usize, row: usize) -> Square {
        Square::new(col, row)
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate(&Board::new()), 0);

        let mut board = Board::empty(Color::Black);
        board.set_cell(sq(0, 5), Cell::King(Color::Black));
        board.set_cell(sq(2, 5), Cell::Pawn(Color::Black));
        board.set_cell(sq(1, 0), Cell::Pawn(Color::Red));
        assert_eq!(evaluate(&board), 1);
    }

    #[test]
    fn test_terminal_scores() {
        let mut board = Board::empty(Color::Black);
        board.set_cell(sq(1, 0), Cell::Pawn(Color::Red));
        for depth in 0..4 {
            assert_eq!(alpha_beta(&board, depth, -WIN_SCORE, WIN_SCORE), -WIN_SCORE);
        }

        let mut board = Board::empty(Color::Red);
        board.set_cell(sq(0, 5), Cell::Pawn(Color::Black));
        for depth in 0..4 {
            assert_eq!(alpha_beta(&board, depth, -WIN_SCORE, WIN_SCORE), WIN_SCORE);
        }
    }

    #[test]
    fn test_depth_zero_is_static() {
        let board = Board::new();
        assert_eq!(alpha_beta(&board, 0, -WIN_SCORE, WIN_SCORE), evaluate(&board));
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let mut board = Board::new();
        for depth in 0..4 {
            assert_eq!(
                alpha_beta(&board, depth, -WIN_SCORE, WIN_SCORE),
                minimax(&board, depth),
                "depth {depth}"
            );
        }

        // A tactical position with captures on both sides.
        board = Board::empty(Color::Black);
        board.set_cell(sq(2, 5), Cell::Pawn(Color::Black));
        board.set_cell(sq(4, 5), Cell::King(Color::Black));
        board.set_cell(sq(3, 4), Cell::Pawn(Color::Red));
        board.set_cell(sq(5, 2), Cell::Pawn(Color::Red));
        board.set_cell(sq(1, 2), Cell::King(Color::Red));
        for depth in 0..6 {
            assert_eq!(
                alpha_beta(&board, depth, -WIN_SCORE, WIN_SCORE),
                minimax(&board, depth),
                "depth {depth}"
            );
        }
    }

    fn tree_size(board: &Board, depth: u32) -> u64 {
        let moves = board.legal_moves();
        if depth == 0 || moves.is_empty() {
            return 1;
        }
        1 + moves
            .iter()
            .map(|mv| {
                let mut child = board.clone();
                child.apply_move(mv);
                tree_size(&child, depth - 1)
            })
            .sum::<u64>()
    }

    #[test]
    fn test_pruning_never_visits_more_nodes() {
        let board = Board::new();
        let mut stats = SearchStats::default();
        alpha_beta_counted(&board, 4, -WIN_SCORE, WIN_SCORE, &mut stats);
        assert!(stats.nodes > 1);
        assert!(stats.nodes <= tree_size(&board, 4));
    }

    #[test]
    fn test_best_move_avoids_losing_piece() {
        // Sliding left walks into a capture; sliding right is safe.
        let mut board = Board::empty(Color::Black);
        board.set_cell(sq(2, 5), Cell::Pawn(Color::Black));
        board.set_cell(sq(0, 3), Cell::Pawn(Color::Red));
        let result = search(&board, 2).unwrap();
        assert_eq!(result.best.squares(), &[sq(2, 5), sq(3, 4)]);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_best_move_wins_immediately_for_red() {
        // Red captures the last black piece.
        let mut board = Board::empty(Color::Red);
        board.set_cell(sq(3, 2), Cell::Pawn(Color::Red));
        board.set_cell(sq(7, 0), Cell::Pawn(Color::Red));
        board.set_cell(sq(4, 3), Cell::Pawn(Color::Black));
        let result = search(&board, 3).unwrap();
        assert_eq!(result.best.squares(), &[sq(3, 2), sq(5, 4)]);
        assert_eq!(result.score, -WIN_SCORE);
    }

    #[test]
    fn test_best_move_none_on_terminal() {
        let board = Board::empty(Color::Red);
        assert_eq!(best_move(&board, 3), None);
    }

    #[test]
    fn test_best_move_leaves_input_untouched() {
        let board = Board::new();
        let before = board.clone();
        let mv = best_move(&board, 3).unwrap();
        assert_eq!(board, before);
        assert!(board.legal_moves().contains(&mv));
    }
}
