//! Console game: a human plays one color against the engine.
//!
//! The session reads one move per line in `a1-b2` notation and rejects
//! anything that does not parse or is not among the legal moves. Each
//! applied move is shown step by step, so a multi-jump prints one board per
//! capture. The engine answers at a fixed search depth.
//!
//! ## Example
//!
//! ```ignore
//! use checkers_rust::board::Color;
//! use checkers_rust::game::Session;
//! let mut session = Session::new(Color::Black, 4);
//! session.run(std::io::stdin().lock(), &mut std::io::stdout())?;
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::board::{Board, Color, Move};
use crate::notation::str_move;
use crate::search::best_move;

/// Line that ends the session early.
const QUIT: &str = "quit";

/// Interactive game state.
pub struct Session {
    board: Board,
    human: Color,
    depth: u32,
}

impl Session {
    /// A new game from the standard starting position.
    pub fn new(human: Color, depth: u32) -> Self {
        Self::with_board(Board::new(), human, depth)
    }

    pub fn with_board(board: Board, human: Color, depth: u32) -> Self {
        Self {
            board,
            human,
            depth,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Play until the game is over or the input ends.
    ///
    /// Returns the winner, or `None` if the human quit or input ran out.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<Option<Color>> {
        let mut lines = input.lines();

        writeln!(out)?;
        self.show(out)?;
        writeln!(
            out,
            "Enter moves as [column][row]-[column][row]-... for each square the checker lands on (e.g. 'b6-d4-f2' for a double jump)\n"
        )?;

        while !self.board.is_terminal() {
            if self.board.turn() != self.human {
                self.engine_turn(out)?;
                continue;
            }

            write!(out, "Move: ")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                debug!("input closed");
                return Ok(None);
            };
            let line = line.context("failed to read move")?;
            let text = line.trim();
            if text.eq_ignore_ascii_case(QUIT) {
                return Ok(None);
            }

            match self.legal_move(text) {
                Some(mv) => {
                    self.play(&mv, out)?;
                    self.show(out)?;
                }
                None => writeln!(out, "Invalid input. Try again\n")?,
            }
        }

        let winner = self.board.turn().opposite();
        writeln!(out, "Game Over")?;
        writeln!(out, "{winner} wins")?;
        Ok(Some(winner))
    }

    /// The legal move written as `text`, if there is one.
    fn legal_move(&self, text: &str) -> Option<Move> {
        let mv = match text.parse::<Move>() {
            Ok(mv) => mv,
            Err(err) => {
                debug!(%err, text, "rejected move text");
                return None;
            }
        };
        self.board.legal_moves().into_iter().find(|m| *m == mv)
    }

    fn engine_turn<W: Write>(&mut self, out: &mut W) -> Result<()> {
        writeln!(out, "Calculating...")?;
        let Some(mv) = best_move(&self.board, self.depth) else {
            return Ok(());
        };
        writeln!(out, "{} plays {}", self.board.turn(), str_move(&mv))?;
        self.play(&mv, out)?;
        self.show(out)
    }

    fn play<W: Write>(&mut self, mv: &Move, out: &mut W) -> Result<()> {
        writeln!(out, "moving...\n")?;
        let human = self.human;
        let mut result = Ok(());
        self.board.apply_move_with(mv, |step| {
            if result.is_ok() {
                result = writeln!(out, "{}", step.render(human));
            }
        });
        result.context("failed to write board")?;
        writeln!(out, "move completed\n")?;
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.board.render(self.human))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Square};

    fn run(session: &mut Session, input: &str) -> (Option<Color>, String) {
        let mut out = Vec::new();
        let winner = session.run(input.as_bytes(), &mut out).unwrap();
        (winner, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let mut session = Session::new(Color::Black, 1);
        let (winner, out) = run(&mut session, "z9\na1-b2\nquit\n");
        assert_eq!(winner, None);
        assert_eq!(out.matches("Invalid input. Try again").count(), 2);
        assert_eq!(session.board(), &Board::new());
    }

    #[test]
    fn test_human_move_then_engine_reply() {
        let mut session = Session::new(Color::Black, 1);
        let (winner, out) = run(&mut session, "a6-b5\n");
        assert_eq!(winner, None);
        assert!(out.contains("move completed"));
        assert!(out.contains("red plays"));
        assert_eq!(session.board().turn(), Color::Black);
        assert_eq!(session.board().cell(Square::new(1, 4)), Cell::Pawn(Color::Black));
    }

    #[test]
    fn test_engine_opens_when_human_is_red() {
        let mut session = Session::new(Color::Red, 1);
        let (_, out) = run(&mut session, "");
        assert!(out.contains("black plays"));
        assert_eq!(session.board().turn(), Color::Red);
    }

    #[test]
    fn test_game_over_after_winning_jump() {
        let mut board = Board::empty(Color::Black);
        board.set_cell(Square::new(2, 5), Cell::Pawn(Color::Black));
        board.set_cell(Square::new(3, 4), Cell::Pawn(Color::Red));
        let mut session = Session::with_board(board, Color::Black, 2);
        let (winner, out) = run(&mut session, "C6-e4\n");
        assert_eq!(winner, Some(Color::Black));
        assert!(out.ends_with("Game Over\nblack wins\n"));
    }
}
