pub mod castle_rights;
pub mod color;
pub mod error;
pub mod piece;
pub mod zobrist;

mod display;
mod fen;
mod piece_set;

pub use fen::STARTING_POSITION_FEN;

use crate::chess_position;
use castle_rights::CastleRights;
use color::Color;
use common::bitboard::{Bitboard, Square};
use error::BoardError;
use piece::Piece;
use piece_set::PieceSet;

/// Represents the state of a chess board: piece placement for both sides plus the
/// side to move, castling rights, en passant target and move clocks. The zobrist
/// hash of the position is maintained incrementally by every mutation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    white: PieceSet,
    black: PieceSet,
    turn: Color,
    castle_rights: CastleRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u16,
    fullmove_number: u16,
    hash: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            white: PieceSet::new(),
            black: PieceSet::new(),
            turn: Color::White,
            castle_rights: CastleRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }
}

impl Board {
    /// An empty board, white to move, no castling rights.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        let mut board = chess_position! {
            rnbqkbnr
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            RNBQKBNR
        };
        board.set_castle_rights(CastleRights::all());
        board
    }

    pub fn pieces(&self, color: Color) -> &PieceSet {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn pieces_mut(&mut self, color: Color) -> &mut PieceSet {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn occupied(&self) -> Bitboard {
        self.white.occupied() | self.black.occupied()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupied().contains(square)
    }

    pub fn is_empty(&self) -> bool {
        self.occupied().is_empty()
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        if let Some(piece) = self.white.get(square) {
            return Some((piece, Color::White));
        }
        self.black.get(square).map(|piece| (piece, Color::Black))
    }

    pub fn put(&mut self, square: Square, piece: Piece, color: Color) -> Result<(), BoardError> {
        if self.is_occupied(square) {
            return Err(BoardError::SquareOccupied { square });
        }

        self.pieces_mut(color).put(square, piece)?;
        self.hash ^= zobrist::piece_key(piece, color, square);
        Ok(())
    }

    pub fn remove(&mut self, square: Square) -> Option<(Piece, Color)> {
        let (piece, color) = self.get(square)?;
        self.pieces_mut(color).remove(square)?;
        self.hash ^= zobrist::piece_key(piece, color, square);
        Some((piece, color))
    }

    /// Empties every square and drops castling rights and the en passant target.
    /// Side to move and clocks are left alone.
    pub fn clear(&mut self) {
        for square in self.occupied().squares() {
            self.remove(square);
        }
        self.set_castle_rights(CastleRights::none());
        self.set_en_passant_target(None);
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color).locate(Piece::King).first()
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn toggle_turn(&mut self) -> Color {
        self.set_turn(self.turn.opposite())
    }

    pub fn set_turn(&mut self, turn: Color) -> Color {
        self.hash ^= zobrist::turn_key(self.turn) ^ zobrist::turn_key(turn);
        self.turn = turn;
        turn
    }

    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    pub fn set_castle_rights(&mut self, rights: CastleRights) {
        self.hash ^=
            zobrist::castle_rights_key(self.castle_rights) ^ zobrist::castle_rights_key(rights);
        self.castle_rights = rights;
    }

    pub fn lose_castle_rights(&mut self, lost_rights: CastleRights) {
        self.set_castle_rights(self.castle_rights.without(lost_rights));
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.hash ^= zobrist::en_passant_key(self.en_passant_target) ^ zobrist::en_passant_key(target);
        self.en_passant_target = target;
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    /// 64-bit zobrist hash of the position. Clocks do not take part.
    pub fn position_hash(&self) -> u64 {
        self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    #[test]
    fn test_put_get_remove() {
        let mut board = Board::new();
        board.put(E4, Piece::Rook, Color::White).unwrap();
        assert_eq!(board.get(E4), Some((Piece::Rook, Color::White)));
        assert!(board.put(E4, Piece::Pawn, Color::Black).is_err());
        assert_eq!(board.remove(E4), Some((Piece::Rook, Color::White)));
        assert_eq!(board.get(E4), None);
        assert_eq!(board.remove(E4), None);
    }

    #[test]
    fn test_starting_position() {
        let board = Board::starting_position();
        assert_eq!(board.occupied().count_ones(), 32);
        assert_eq!(board.king_square(Color::White), Some(E1));
        assert_eq!(board.king_square(Color::Black), Some(E8));
        assert_eq!(board.castle_rights(), CastleRights::all());
        assert_eq!(board.turn(), Color::White);
    }

    #[test]
    fn test_incremental_hash_matches_full_hash() {
        let mut board = Board::starting_position();
        assert_eq!(board.position_hash(), zobrist::full_hash(&board));

        board.remove(E2);
        board.put(E4, Piece::Pawn, Color::White).unwrap();
        board.set_en_passant_target(Some(E3));
        board.toggle_turn();
        board.lose_castle_rights(CastleRights::white_kingside());
        assert_eq!(board.position_hash(), zobrist::full_hash(&board));

        board.clear();
        assert_eq!(board.position_hash(), zobrist::full_hash(&board));
    }

    #[test]
    fn test_hash_distinguishes_side_to_move() {
        let board = Board::starting_position();
        let mut other = board.clone();
        other.toggle_turn();
        assert_ne!(board.position_hash(), other.position_hash());
        other.toggle_turn();
        assert_eq!(board.position_hash(), other.position_hash());
    }

    #[test]
    fn test_clear_empties_every_square() {
        let mut board = Board::starting_position();
        board.clear();
        assert!(board.is_empty());
        assert!(board.castle_rights().is_empty());
        assert_eq!(board.en_passant_target(), None);
    }
}
