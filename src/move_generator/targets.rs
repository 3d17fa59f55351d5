use common::bitboard::{Bitboard, Square};
use once_cell::sync::Lazy;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Board;

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

static KNIGHT_TARGETS: Lazy<[Bitboard; 64]> = Lazy::new(|| step_table(&KNIGHT_STEPS));

static KING_TARGETS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    let mut table = [Bitboard::EMPTY; 64];
    for (i, targets) in table.iter_mut().enumerate() {
        for neighbor in Square::new(i as u8).neighbors() {
            *targets |= Bitboard::from(neighbor);
        }
    }
    table
});

// [color][square] -> squares a pawn of that color attacks
static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        step_table(&[(-1, 1), (1, 1)]),
        step_table(&[(-1, -1), (1, -1)]),
    ]
});

fn step_table(steps: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for (i, targets) in table.iter_mut().enumerate() {
        let square = Square::new(i as u8);
        for &(file_delta, rank_delta) in steps {
            if let Some(target) = square.offset(file_delta, rank_delta) {
                *targets |= Bitboard::from(target);
            }
        }
    }
    table
}

pub fn knight_targets(square: Square) -> Bitboard {
    KNIGHT_TARGETS[square.index()]
}

pub fn king_targets(square: Square) -> Bitboard {
    KING_TARGETS[square.index()]
}

pub fn pawn_attacks(square: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][square.index()]
}

/// Walks each ray from `square` until it leaves the board or hits an occupied
/// square. The blocking square is included.
pub fn sliding_targets(square: Square, occupied: Bitboard, directions: &[(i8, i8)]) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    for &(file_delta, rank_delta) in directions {
        let mut current = square;
        while let Some(next) = current.offset(file_delta, rank_delta) {
            targets |= Bitboard::from(next);
            if occupied.contains(next) {
                break;
            }
            current = next;
        }
    }
    targets
}

pub fn piece_targets(piece: Piece, square: Square, color: Color, occupied: Bitboard) -> Bitboard {
    match piece {
        Piece::Pawn => pawn_attacks(square, color),
        Piece::Knight => knight_targets(square),
        Piece::Bishop => sliding_targets(square, occupied, &BISHOP_DIRS),
        Piece::Rook => sliding_targets(square, occupied, &ROOK_DIRS),
        Piece::Queen => {
            sliding_targets(square, occupied, &ROOK_DIRS)
                | sliding_targets(square, occupied, &BISHOP_DIRS)
        }
        Piece::King => king_targets(square),
    }
}

/// Returns true if any piece of `attacker` attacks `square` on `board`.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    let pieces = board.pieces(attacker);
    let occupied = board.occupied();

    // a pawn of `attacker` attacks `square` iff a defending pawn on `square` would attack it back
    if pawn_attacks(square, attacker.opposite()).overlaps(pieces.locate(Piece::Pawn)) {
        return true;
    }
    if knight_targets(square).overlaps(pieces.locate(Piece::Knight)) {
        return true;
    }
    if king_targets(square).overlaps(pieces.locate(Piece::King)) {
        return true;
    }

    let diagonal = pieces.locate(Piece::Bishop) | pieces.locate(Piece::Queen);
    if sliding_targets(square, occupied, &BISHOP_DIRS).overlaps(diagonal) {
        return true;
    }
    let straight = pieces.locate(Piece::Rook) | pieces.locate(Piece::Queen);
    sliding_targets(square, occupied, &ROOK_DIRS).overlaps(straight)
}
