use common::bitboard::Bitboard;

use crate::board::color::Color;
use crate::board::piece::{Piece, ALL_PIECES};
use crate::board::Board;
use crate::move_generator::MoveGenerator;

pub mod piece_values;

pub use piece_values::{material_value, Score};

/// Magnitude of a decided game. Always exceeds any reachable material score,
/// and is offset by the remaining depth so sooner wins rank higher.
pub const TERMINAL_SCORE: Score = 10000.0;

pub const DRAW_SCORE: Score = 0.0;

/// The standard-chess ways a game can end. King explosions are handled by the
/// atomic resolver and never show up here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnding {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoveRule,
}

impl GameEnding {
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameEnding::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
}

/// Returns the game ending state if the game has ended, otherwise returns None.
pub fn game_ending(board: &Board, move_generator: &MoveGenerator) -> Option<GameEnding> {
    let current_turn = board.turn();
    if !move_generator.has_legal_move(board) {
        if move_generator.is_in_check(board, current_turn) {
            return Some(GameEnding::Checkmate {
                winner: current_turn.opposite(),
            });
        }
        return Some(GameEnding::Stalemate);
    }

    if is_insufficient_material(board) {
        return Some(GameEnding::InsufficientMaterial);
    }

    if board.halfmove_clock() >= 150 {
        return Some(GameEnding::SeventyFiveMoveRule);
    }

    None
}

/// Score of a game won by `winner` with `depth` plies of search remaining.
#[inline(always)]
pub fn terminal_score(winner: Color, depth: u8) -> Score {
    let magnitude = TERMINAL_SCORE + depth as Score;
    match winner {
        Color::White => magnitude,
        Color::Black => -magnitude,
    }
}

/// Value of a position that ended by `ending`.
pub fn ending_score(ending: GameEnding, depth: u8) -> Score {
    match ending.winner() {
        Some(winner) => terminal_score(winner, depth),
        None => DRAW_SCORE,
    }
}

/// Static material balance, white minus black.
#[inline(always)]
pub fn evaluate(board: &Board) -> Score {
    player_material_score(board, Color::White) - player_material_score(board, Color::Black)
}

#[inline(always)]
fn player_material_score(board: &Board, color: Color) -> Score {
    let pieces = board.pieces(color);
    ALL_PIECES
        .iter()
        .map(|&piece| pieces.count(piece) as Score * material_value(piece))
        .sum()
}

/// Both sides lack the material to ever deliver mate.
pub fn is_insufficient_material(board: &Board) -> bool {
    Color::ALL
        .iter()
        .all(|&color| has_insufficient_material(board, color))
}

fn has_insufficient_material(board: &Board, color: Color) -> bool {
    let own = board.pieces(color);
    let opponent = board.pieces(color.opposite());

    let heavy = own.locate(Piece::Pawn) | own.locate(Piece::Rook) | own.locate(Piece::Queen);
    if !heavy.is_empty() {
        return false;
    }

    if !own.locate(Piece::Knight).is_empty() {
        // a lone knight can only mate a king boxed in by its own pieces
        let opponent_blockers =
            opponent.occupied() & !opponent.locate(Piece::King) & !opponent.locate(Piece::Queen);
        return own.occupied().count_ones() <= 2 && opponent_blockers.is_empty();
    }

    if !own.locate(Piece::Bishop).is_empty() {
        // every bishop on the board counts, not just this side's
        let bishops = own.locate(Piece::Bishop) | opponent.locate(Piece::Bishop);
        let same_color = !bishops.overlaps(Bitboard::DARK_SQUARES)
            || !bishops.overlaps(Bitboard::LIGHT_SQUARES);
        let pawns_or_knights = Color::ALL.iter().any(|&c| {
            let pieces = board.pieces(c);
            !(pieces.locate(Piece::Pawn) | pieces.locate(Piece::Knight)).is_empty()
        });
        return same_color && !pawns_or_knights;
    }

    true
}
