//! Zobrist board hashing.
//!
//! * One number for each piece at each square (6 * 64 * 2)
//! * One number to indicate the side to move is black
//! * Sixteen numbers for the castling rights bitmask (index 0 is zero)
//! * Eight numbers for the file of the en passant target, if any
//!
//! The numbers are generated at build time from a fixed seed so the hash of a
//! position is the same in every process that runs this build.

use common::bitboard::Square;

use super::castle_rights::CastleRights;
use super::color::Color;
use super::piece::Piece;
use super::Board;

include!(concat!(env!("OUT_DIR"), "/zobrist_tables.rs"));

#[inline(always)]
pub fn piece_key(piece: Piece, color: Color, square: Square) -> u64 {
    ZOBRIST_PIECES_TABLE[piece.index()][square.index()][color.index()]
}

#[inline(always)]
pub fn castle_rights_key(rights: CastleRights) -> u64 {
    ZOBRIST_CASTLING_RIGHTS_TABLE[rights.bits() as usize]
}

#[inline(always)]
pub fn en_passant_key(target: Option<Square>) -> u64 {
    match target {
        Some(square) => ZOBRIST_EN_PASSANT_FILE_TABLE[square.file() as usize],
        None => 0,
    }
}

#[inline(always)]
pub fn turn_key(turn: Color) -> u64 {
    match turn {
        Color::White => 0,
        Color::Black => ZOBRIST_BLACK_TO_MOVE,
    }
}

/// Computes the hash of `board` from scratch. The board keeps its hash up to
/// date incrementally; this is the reference it must always agree with.
pub fn full_hash(board: &Board) -> u64 {
    let mut hash = 0;
    for color in Color::ALL {
        for square in board.pieces(color).occupied().squares() {
            if let Some(piece) = board.pieces(color).get(square) {
                hash ^= piece_key(piece, color, square);
            }
        }
    }
    hash ^= turn_key(board.turn());
    hash ^= castle_rights_key(board.castle_rights());
    hash ^= en_passant_key(board.en_passant_target());
    hash
}
