//! Checkers-Rust: a two-player checkers engine.
//!
//! This crate provides the board, legal-move generation with mandatory
//! multi-jump captures, and a depth-bounded minimax search with alpha-beta
//! pruning that picks moves for the computer side.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, starting layout, and search parameters
//! - [`board`] - Board state, pieces, squares, moves, and move application
//! - [`movegen`] - Jump chains, legal moves, and terminal detection
//! - [`notation`] - Parsing and printing `a1-b2` move text
//! - [`search`] - Material evaluation and alpha-beta search
//! - [`playout`] - Self-play between engines and random movers
//! - [`game`] - Interactive console game against the engine
//!
//! ## Example
//!
//! ```
//! use checkers_rust::board::Board;
//! use checkers_rust::notation::{parse_move, str_move};
//! use checkers_rust::search::best_move;
//!
//! // Black opens
//! let mut board = Board::new();
//! let mv = parse_move("c6-d5").unwrap();
//! assert!(board.legal_moves().contains(&mv));
//! board.apply_move(&mv);
//!
//! // Let the engine answer for Red
//! let reply = best_move(&board, 4).unwrap();
//! println!("Red plays {}", str_move(&reply));
//! board.apply_move(&reply);
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod playout;
pub mod search;
