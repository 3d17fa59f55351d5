use common::bitboard::{Bitboard, Square};

use super::piece::{Piece, ALL_PIECES};
use super::BoardError;

/// Encapsulates the state for a set of pieces on the board, represented as bitboards.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PieceSet {
    /// Bitboards for each piece type, indexed by `Piece::index`.
    bitboards: [Bitboard; 6],

    /// Bitboard representing all occupied squares. Incrementally updated as pieces are added or removed.
    occupied: Bitboard,
}

impl PieceSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn locate(&self, piece: Piece) -> Bitboard {
        self.bitboards[piece.index()]
    }

    pub fn count(&self, piece: Piece) -> u32 {
        self.locate(piece).count_ones()
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        if !self.occupied.contains(square) {
            return None;
        }
        ALL_PIECES
            .iter()
            .copied()
            .find(|&piece| self.bitboards[piece.index()].contains(square))
    }

    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupied.contains(square)
    }

    pub fn put(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::SquareOccupied { square });
        }

        let bb = Bitboard::from(square);
        self.bitboards[piece.index()] |= bb;
        self.occupied |= bb;

        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let removed_piece = self.get(square)?;
        let bb = Bitboard::from(square);
        self.bitboards[removed_piece.index()] ^= bb;
        self.occupied ^= bb;
        Some(removed_piece)
    }
}
