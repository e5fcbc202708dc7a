//! Constants for board geometry, the starting position, and search parameters.
//!
//! The board is an 8x8 grid indexed as `[row][col]`. Red starts on rows 0-2
//! and moves toward row 7; Black starts on rows 5-7 and moves toward row 0.

use crate::board::Color;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Row on which Black pawns are crowned (and Red's home row).
pub const TOP_ROW: usize = 0;

/// Row on which Red pawns are crowned (and Black's home row).
pub const BOTTOM_ROW: usize = N - 1;

// =============================================================================
// Starting Position
// =============================================================================

/// Standard starting layout, one string per row.
///
/// `r`/`b` are pawns, `R`/`B` are kings, a space is an empty square.
pub const DEFAULT_LAYOUT: [&str; N] = [
    " r r r r",
    "r r r r ",
    " r r r r",
    "        ",
    "        ",
    "b b b b ",
    " b b b b",
    "b b b b ",
];

/// Black moves first.
pub const DEFAULT_TURN: Color = Color::Black;

// =============================================================================
// Search Parameters
// =============================================================================

/// Score of a decided game. Positive when Red has no moves, negative when Black has none.
pub const WIN_SCORE: i32 = 10_000;

/// Search depth used by the interactive game.
pub const DEFAULT_DEPTH: u32 = 4;

/// Self-play stops after this many plies and is scored as a draw.
pub const MAX_GAME_PLIES: usize = 200;

// =============================================================================
// Notation
// =============================================================================

/// Column letters, left to right.
pub const COLUMN_LETTERS: &[u8; N] = b"abcdefgh";

/// Row digits, row 0 first.
pub const ROW_DIGITS: &[u8; N] = b"12345678";

/// Separator written between squares of a move.
pub const MOVE_SEPARATOR: char = '-';
