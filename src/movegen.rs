//! Legal move generation.
//!
//! Captures are mandatory: if the side to move has any jump, only jump
//! chains are legal. A chain always continues while a further jump is
//! available to the moving piece, but the player picks freely among
//! chains that start differently or branch.
//!
//! Chains are enumerated by simulating each single jump on a copy of the
//! board and recursing from the landing square. Every jump removes a piece,
//! so the recursion is finite.

use crate::board::{Board, Move, Piece, Square};

/// Column deltas, tried left before right.
const SIDEWAYS: [isize; 2] = [-1, 1];

impl Board {
    /// All maximal jump chains for `piece` starting at `from`.
    ///
    /// The piece keeps the movement rule it started with for the whole
    /// chain, so a pawn crowned mid-chain stops there.
    pub fn jumps_from(&self, from: Square, piece: Piece) -> Vec<Move> {
        let mut jumps = Vec::new();
        let enemy = piece.color.opposite();

        for &drow in piece.directions() {
            for dcol in SIDEWAYS {
                let (Some(over), Some(to)) =
                    (from.offset(dcol, drow), from.offset(2 * dcol, 2 * drow))
                else {
                    continue;
                };
                if self.cell(over).color() != Some(enemy) || !self.cell(to).is_empty() {
                    continue;
                }

                let mut next = self.clone();
                next.apply_step(from, to, piece);
                let continuations = next.jumps_from(to, piece);

                if continuations.is_empty() {
                    jumps.push(Move::new(vec![from, to]));
                } else {
                    for chain in continuations {
                        let mut squares = Vec::with_capacity(chain.squares().len() + 1);
                        squares.push(from);
                        squares.extend_from_slice(chain.squares());
                        jumps.push(Move::new(squares));
                    }
                }
            }
        }
        jumps
    }

    /// One-step diagonal moves into empty squares.
    fn slides_from(&self, from: Square, piece: Piece) -> impl Iterator<Item = Move> + '_ {
        piece.directions().iter().flat_map(move |&drow| {
            SIDEWAYS.into_iter().filter_map(move |dcol| {
                let to = from.offset(dcol, drow)?;
                self.cell(to).is_empty().then(|| Move::new(vec![from, to]))
            })
        })
    }

    /// Every legal move for the side to move.
    ///
    /// Pawns are listed before kings, each in row-major order of their start
    /// square.
    pub fn legal_moves(&self) -> Vec<Move> {
        let color = self.turn();
        let pawn = Piece::pawn(color);
        let king = Piece::king(color);
        let groups = [
            (self.pieces_of_kind(pawn), pawn),
            (self.pieces_of_kind(king), king),
        ];

        let mut moves: Vec<Move> = groups
            .iter()
            .flat_map(|(squares, piece)| {
                squares.iter().flat_map(move |&sq| self.jumps_from(sq, *piece))
            })
            .collect();

        if moves.is_empty() {
            moves = groups
                .iter()
                .flat_map(|(squares, piece)| {
                    squares.iter().flat_map(move |&sq| self.slides_from(sq, *piece))
                })
                .collect();
        }
        moves
    }

    /// True when the side to move has no legal move, which loses the game.
    pub fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }
}
