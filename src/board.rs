//! Checkers board representation and move application.
//!
//! The board is an 8x8 grid of [`Cell`]s stored row-major as `[row][col]`,
//! plus the color whose turn it is. Boards have value semantics: cloning
//! yields a fully independent board, which is what the search relies on
//! when it explores sibling branches.

use std::fmt;

use thiserror::Error;
use tracing::{trace, warn};

use crate::constants::{BOTTOM_ROW, COLUMN_LETTERS, DEFAULT_LAYOUT, DEFAULT_TURN, N, TOP_ROW};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
}

impl Color {
    /// The other side.
    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::Red,
            Color::Red => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::Red => write!(f, "red"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Pawn,
    King,
}

/// A color and rank pair, used to select pieces and to drive move generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Piece {
    pub const fn pawn(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::Pawn,
        }
    }

    pub const fn king(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::King,
        }
    }

    /// The same piece promoted to king. Kings stay kings.
    pub fn crowned(self) -> Self {
        Piece::king(self.color)
    }

    /// Row deltas this piece may move along, in generation order.
    ///
    /// Black heads for row 0 and Red for row 7. Pawns only go forward;
    /// kings try the backward direction first.
    pub fn directions(self) -> &'static [isize] {
        match (self.rank, self.color) {
            (Rank::Pawn, Color::Black) => &[-1],
            (Rank::Pawn, Color::Red) => &[1],
            (Rank::King, Color::Black) => &[1, -1],
            (Rank::King, Color::Red) => &[-1, 1],
        }
    }
}

/// Contents of a single square.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Pawn(Color),
    King(Color),
}

impl Cell {
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Pawn(color) => Some(Piece::pawn(color)),
            Cell::King(color) => Some(Piece::king(color)),
        }
    }

    pub fn color(self) -> Option<Color> {
        self.piece().map(|p| p.color)
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Character encoding: lowercase pawn, uppercase king, space for empty.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Pawn(Color::Black) => 'b',
            Cell::Pawn(Color::Red) => 'r',
            Cell::King(Color::Black) => 'B',
            Cell::King(Color::Red) => 'R',
        }
    }

    /// Inverse of [`Cell::to_char`]. A `.` is also read as an empty square.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            ' ' | '.' => Some(Cell::Empty),
            'b' => Some(Cell::Pawn(Color::Black)),
            'r' => Some(Cell::Pawn(Color::Red)),
            'B' => Some(Cell::King(Color::Black)),
            'R' => Some(Cell::King(Color::Red)),
            _ => None,
        }
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        match piece.rank {
            Rank::Pawn => Cell::Pawn(piece.color),
            Rank::King => Cell::King(piece.color),
        }
    }
}

/// A board coordinate, 0-indexed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub col: usize,
    pub row: usize,
}

impl Square {
    pub const fn new(col: usize, row: usize) -> Self {
        Square { col, row }
    }

    /// The square `dcol` columns and `drow` rows away, if it is on the board.
    pub fn offset(self, dcol: isize, drow: isize) -> Option<Square> {
        let col = self.col.checked_add_signed(dcol)?;
        let row = self.row.checked_add_signed(drow)?;
        (col < N && row < N).then_some(Square { col, row })
    }

    /// The square halfway between two squares of a jump.
    pub fn midpoint(self, other: Square) -> Square {
        Square {
            col: (self.col + other.col) / 2,
            row: (self.row + other.row) / 2,
        }
    }
}

/// A start square followed by one or more landing squares.
///
/// Each consecutive pair is either a one-step diagonal slide or a two-step
/// diagonal jump over an opposing piece.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move(Vec<Square>);

impl Move {
    /// # Panics
    /// Panics if fewer than two squares are given.
    pub fn new(squares: Vec<Square>) -> Self {
        assert!(
            squares.len() >= 2,
            "a move needs a start square and at least one landing square"
        );
        Move(squares)
    }

    pub fn squares(&self) -> &[Square] {
        &self.0
    }

    pub fn start(&self) -> Square {
        self.0[0]
    }

    pub fn end(&self) -> Square {
        self.0[self.0.len() - 1]
    }

    /// Consecutive (from, to) pairs.
    pub fn steps(&self) -> impl Iterator<Item = (Square, Square)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn is_jump(&self) -> bool {
        self.steps().any(|(from, to)| from.row.abs_diff(to.row) == 2)
    }

    /// Number of pieces this move removes.
    pub fn captures(&self) -> usize {
        self.steps()
            .filter(|(from, to)| from.row.abs_diff(to.row) == 2)
            .count()
    }
}

/// Errors from decoding a character layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected {n} rows, got {0}", n = N)]
    RowCount(usize),

    #[error("row {row} has {width} cells, expected {n}", n = N)]
    RowWidth { row: usize, width: usize },

    #[error("unknown cell {found:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, found: char },
}

/// Board state: cells plus side to move.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; N]; N],
    turn: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position, Black to move.
    pub fn new() -> Self {
        Self::from_layout(&DEFAULT_LAYOUT, DEFAULT_TURN).expect("default layout is well-formed")
    }

    /// A board with no pieces.
    pub fn empty(turn: Color) -> Self {
        Board {
            cells: [[Cell::Empty; N]; N],
            turn,
        }
    }

    /// Decode one string per row using the [`Cell::from_char`] encoding.
    pub fn from_layout<S: AsRef<str>>(rows: &[S], turn: Color) -> Result<Self, BoardError> {
        if rows.len() != N {
            return Err(BoardError::RowCount(rows.len()));
        }
        let mut board = Board::empty(turn);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width != N {
                return Err(BoardError::RowWidth { row, width });
            }
            for (col, c) in line.chars().enumerate() {
                board.cells[row][col] =
                    Cell::from_char(c).ok_or(BoardError::UnknownCell { row, col, found: c })?;
            }
        }
        Ok(board)
    }

    /// Encode the cells as one string per row.
    pub fn to_layout(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    pub fn cells(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    pub fn cell(&self, sq: Square) -> Cell {
        self.cells[sq.row][sq.col]
    }

    pub fn set_cell(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.row][sq.col] = cell;
    }

    /// Every square holding exactly this piece, in row-major order.
    pub fn pieces_of_kind(&self, piece: Piece) -> Vec<Square> {
        let target = Cell::from(piece);
        self.squares()
            .filter(|&sq| self.cell(sq) == target)
            .collect()
    }

    /// Number of pieces of a color, pawns and kings alike.
    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.color() == Some(color))
            .count()
    }

    /// Total number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.count(Color::Black) + self.count(Color::Red)
    }

    fn squares(&self) -> impl Iterator<Item = Square> {
        (0..N).flat_map(|row| (0..N).map(move |col| Square::new(col, row)))
    }

    /// Cells in reading order as seen by `perspective`.
    ///
    /// Black sees row 0 at the top with column `a` on the left; Red sees the
    /// board rotated half a turn.
    pub fn cells_from(&self, perspective: Color) -> impl Iterator<Item = (Square, Cell)> + '_ {
        let flip = perspective == Color::Red;
        (0..N).flat_map(move |r| {
            (0..N).map(move |c| {
                let sq = if flip {
                    Square::new(N - 1 - c, N - 1 - r)
                } else {
                    Square::new(c, r)
                };
                (sq, self.cell(sq))
            })
        })
    }

    /// Apply a legal move and pass the turn.
    ///
    /// The move is not validated: passing a move that is not in
    /// [`Board::legal_moves`] leaves the board in an unspecified state.
    pub fn apply_move(&mut self, mv: &Move) {
        self.apply_move_with(mv, |_| {});
    }

    /// Like [`Board::apply_move`], calling `on_step` with the board after
    /// every individual slide or jump.
    pub fn apply_move_with(&mut self, mv: &Move, mut on_step: impl FnMut(&Board)) {
        let Some(mut piece) = self.cell(mv.start()).piece() else {
            warn!(start = ?mv.start(), "no piece on the start square");
            return;
        };
        for (from, to) in mv.steps() {
            piece = self.apply_step(from, to, piece);
            trace!(?from, ?to, ?piece, "step");
            on_step(self);
        }
        self.turn = self.turn.opposite();
    }

    /// Move `piece` from `from` to `to`, removing a jumped piece and crowning
    /// on the first or last row. Returns the piece as it now stands.
    pub(crate) fn apply_step(&mut self, from: Square, to: Square, piece: Piece) -> Piece {
        self.set_cell(from, Cell::Empty);
        if from.row.abs_diff(to.row) == 2 {
            self.set_cell(from.midpoint(to), Cell::Empty);
        }
        let piece = if to.row == TOP_ROW || to.row == BOTTOM_ROW {
            piece.crowned()
        } else {
            piece
        };
        self.set_cell(to, piece.into());
        piece
    }

    /// Render the board facing `perspective`, rows labelled by digit and
    /// columns by letter.
    pub fn render(&self, perspective: Color) -> String {
        let mut out = String::from(" ");
        let header: Vec<char> = match perspective {
            Color::Black => COLUMN_LETTERS.iter().map(|&b| b as char).collect(),
            Color::Red => COLUMN_LETTERS.iter().rev().map(|&b| b as char).collect(),
        };
        for letter in header {
            out.push(' ');
            out.push(letter);
        }
        out.push('\n');
        let cells: Vec<(Square, Cell)> = self.cells_from(perspective).collect();
        for line in cells.chunks(N) {
            out.push_str(&(line[0].0.row + 1).to_string());
            for (_, cell) in line {
                out.push('|');
                out.push(cell.to_char());
            }
            out.push_str("|\n");
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Color::Black))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(col: usize, row: usize) -> Square {
        Square::new(col, row)
    }

    #[test]
    fn test_default_board() {
        let board = Board::new();
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.count(Color::Black), 12);
        assert_eq!(board.count(Color::Red), 12);
        assert_eq!(board.cell(sq(1, 0)), Cell::Pawn(Color::Red));
        assert_eq!(board.cell(sq(0, 5)), Cell::Pawn(Color::Black));
        assert_eq!(board.cell(sq(0, 0)), Cell::Empty);
        // Pieces only sit on dark squares.
        for (square, cell) in board.cells_from(Color::Black) {
            if !cell.is_empty() {
                assert_eq!((square.row + square.col) % 2, 1, "{square:?}");
            }
        }
    }

    #[test]
    fn test_layout_roundtrip() {
        let board = Board::new();
        let rows = board.to_layout();
        assert_eq!(rows, DEFAULT_LAYOUT.map(String::from).to_vec());
        assert_eq!(Board::from_layout(&rows, Color::Black).unwrap(), board);
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(
            Board::from_layout(&["        "; 7], Color::Black),
            Err(BoardError::RowCount(7))
        );
        let mut rows = ["        "; 8];
        rows[3] = "   ";
        assert_eq!(
            Board::from_layout(&rows, Color::Black),
            Err(BoardError::RowWidth { row: 3, width: 3 })
        );
        rows[3] = "   x    ";
        assert_eq!(
            Board::from_layout(&rows, Color::Black),
            Err(BoardError::UnknownCell {
                row: 3,
                col: 3,
                found: 'x'
            })
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new();
        let mut copy = board.clone();
        copy.set_cell(sq(1, 0), Cell::Empty);
        copy.set_turn(Color::Red);
        assert_eq!(board.cell(sq(1, 0)), Cell::Pawn(Color::Red));
        assert_eq!(board.turn(), Color::Black);
    }

    #[test]
    fn test_apply_slide() {
        let mut board = Board::new();
        let mv = Move::new(vec![sq(0, 5), sq(1, 4)]);
        board.apply_move(&mv);
        assert_eq!(board.cell(sq(0, 5)), Cell::Empty);
        assert_eq!(board.cell(sq(1, 4)), Cell::Pawn(Color::Black));
        assert_eq!(board.turn(), Color::Red);
        assert_eq!(board.piece_count(), 24);
    }

    #[test]
    fn test_apply_double_jump_with_steps() {
        let mut board = Board::empty(Color::Black);
        board.set_cell(sq(0, 5), Cell::Pawn(Color::Black));
        board.set_cell(sq(1, 4), Cell::Pawn(Color::Red));
        board.set_cell(sq(3, 2), Cell::Pawn(Color::Red));
        let mv = Move::new(vec![sq(0, 5), sq(2, 3), sq(4, 1)]);

        let mut seen = Vec::new();
        board.apply_move_with(&mv, |b| seen.push(b.count(Color::Red)));

        assert_eq!(seen, vec![1, 0]);
        assert_eq!(board.cell(sq(4, 1)), Cell::Pawn(Color::Black));
        assert_eq!(board.count(Color::Red), 0);
        assert_eq!(board.turn(), Color::Red);
    }

    #[test]
    fn test_promotion_on_far_row() {
        let mut board = Board::empty(Color::Red);
        board.set_cell(sq(2, 6), Cell::Pawn(Color::Red));
        board.apply_move(&Move::new(vec![sq(2, 6), sq(3, 7)]));
        assert_eq!(board.cell(sq(3, 7)), Cell::King(Color::Red));

        let mut board = Board::empty(Color::Black);
        board.set_cell(sq(3, 1), Cell::Pawn(Color::Black));
        board.apply_move(&Move::new(vec![sq(3, 1), sq(2, 0)]));
        assert_eq!(board.cell(sq(2, 0)), Cell::King(Color::Black));
    }

    #[test]
    fn test_pieces_of_kind() {
        let mut board = Board::empty(Color::Black);
        board.set_cell(sq(3, 4), Cell::King(Color::Black));
        board.set_cell(sq(1, 2), Cell::Pawn(Color::Black));
        board.set_cell(sq(5, 0), Cell::Pawn(Color::Black));
        assert_eq!(
            board.pieces_of_kind(Piece::pawn(Color::Black)),
            vec![sq(5, 0), sq(1, 2)]
        );
        assert_eq!(board.pieces_of_kind(Piece::king(Color::Black)), vec![sq(3, 4)]);
        assert!(board.pieces_of_kind(Piece::king(Color::Red)).is_empty());
    }

    #[test]
    fn test_offset_bounds() {
        assert_eq!(sq(0, 0).offset(-1, 1), None);
        assert_eq!(sq(7, 7).offset(1, -1), None);
        assert_eq!(sq(2, 5).offset(2, -2), Some(sq(4, 3)));
        assert_eq!(sq(2, 5).midpoint(sq(4, 3)), sq(3, 4));
    }

    #[test]
    fn test_render_flips_for_red() {
        let board = Board::new();
        let black = board.render(Color::Black);
        let red = board.render(Color::Red);
        assert!(black.starts_with("  a b c d e f g h\n1| |r| |r|"));
        assert!(red.starts_with("  h g f e d c b a\n8| |b| |b|"));
        assert_eq!(black.lines().count(), 9);
        assert_eq!(format!("{board}"), black);
    }
}
