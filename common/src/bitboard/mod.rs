//! Square and bitboard primitives shared by the rules layer and the search.

pub mod bitboard;
pub mod square;

pub use bitboard::Bitboard;
pub use square::*;
