//! Move notation: squares written as a column letter and a row digit,
//! joined by a single separator, e.g. `f1-d3-b5` for a double jump.
//!
//! Letters `a`-`h` (either case) name columns left to right; digits `1`-`8`
//! name rows 0-7. Parsing steps through the text three characters at a
//! time (letter, digit, separator) and gives up on the first bad token, so
//! a move is either parsed whole or rejected.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{Move, Square};
use crate::constants::{COLUMN_LETTERS, MOVE_SEPARATOR, ROW_DIGITS};

/// Why a piece of move text was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty move")]
    Empty,

    #[error("malformed square {token:?} at offset {offset}")]
    BadSquare { token: String, offset: usize },

    #[error("expected a separator at offset {offset}, found {found:?}")]
    BadSeparator { offset: usize, found: char },

    #[error("move ends with a separator")]
    Truncated,

    #[error("a move needs at least two squares")]
    TooShort,
}

fn column_of(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    let c = c.to_ascii_lowercase() as u8;
    COLUMN_LETTERS.iter().position(|&l| l == c)
}

fn row_of(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    ROW_DIGITS.iter().position(|&d| d == c as u8)
}

fn square_of(letter: Option<char>, digit: Option<char>) -> Option<Square> {
    Some(Square::new(column_of(letter?)?, row_of(digit?)?))
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (None, _, _) => Err(NotationError::Empty),
            (letter, digit, None) => square_of(letter, digit).ok_or_else(|| {
                NotationError::BadSquare {
                    token: s.to_string(),
                    offset: 0,
                }
            }),
            _ => Err(NotationError::BadSquare {
                token: s.to_string(),
                offset: 0,
            }),
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.is_empty() {
            return Err(NotationError::Empty);
        }

        let mut squares = Vec::new();
        let mut i = 0;
        loop {
            let square = square_of(chars.get(i).copied(), chars.get(i + 1).copied())
                .ok_or_else(|| NotationError::BadSquare {
                    token: chars[i..chars.len().min(i + 2)].iter().collect(),
                    offset: i,
                })?;
            squares.push(square);

            match chars.get(i + 2) {
                None => break,
                Some(c) if c.is_alphanumeric() => {
                    return Err(NotationError::BadSeparator {
                        offset: i + 2,
                        found: *c,
                    });
                }
                Some(_) if i + 3 >= chars.len() => return Err(NotationError::Truncated),
                Some(_) => i += 3,
            }
        }

        if squares.len() < 2 {
            return Err(NotationError::TooShort);
        }
        Ok(Move::new(squares))
    }
}

/// Parse move text, returning `None` for anything malformed.
///
/// No partial move is ever returned: one bad token rejects the whole text.
pub fn parse_move(text: &str) -> Option<Move> {
    text.parse().ok()
}

/// Convert a square to its notation (e.g. `c6`).
pub fn str_square(sq: Square) -> String {
    format!(
        "{}{}",
        COLUMN_LETTERS[sq.col] as char,
        ROW_DIGITS[sq.row] as char
    )
}

/// Convert a move to its notation (e.g. `c6-e4`).
pub fn str_move(mv: &Move) -> String {
    mv.squares()
        .iter()
        .map(|&sq| str_square(sq))
        .collect::<Vec<_>>()
        .join(&MOVE_SEPARATOR.to_string())
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&str_square(*self))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&str_move(self))
    }
}
