//! Moves as (from, to, promotion) triples, their UCI text form, and standard
//! (non-exploding) application to a board.

pub mod chess_move;

mod apply;

pub use chess_move::{ChessMove, MoveParseError};
