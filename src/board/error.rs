use common::bitboard::{Square, SquareParseError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cannot put a piece on {square}, it is already occupied")]
    SquareOccupied { square: Square },
    #[error("cannot apply move, {square} is empty")]
    FromSquareEmpty { square: Square },
    #[error("invalid FEN; could not parse board from `{fen}`")]
    InvalidFen { fen: String },
    #[error("invalid FEN; rank `{rank}` does not describe exactly 8 squares")]
    InvalidFenRank { rank: String },
    #[error(transparent)]
    InvalidSquare(#[from] SquareParseError),
}
