use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::atomic::check_move;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::evaluate::{material_value, Score};
use crate::move_generator::{ChessMoveList, MoveGenerator};

const PROMOTION_BONUS: Score = 10.0;
const ATTACKER_WEIGHT: Score = 0.1;

/// Orders candidate moves so that promotions and cheap captures of valuable
/// pieces are searched first. Ordering never changes search results, only how
/// much of the tree gets pruned.
#[derive(Clone, Copy, Default, Debug)]
pub struct MoveOrderer {
    move_generator: MoveGenerator,
}

impl MoveOrderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_moves(&self, board: &Board) -> ChessMoveList {
        let mut scored: SmallVec<[(ChessMove, Score); 32]> = self
            .move_generator
            .pseudo_legal_moves(board)
            .into_iter()
            .filter(|&chess_move| check_move(board, chess_move).is_ok())
            .map(|chess_move| (chess_move, self.score_move(board, chess_move)))
            .collect();

        // stable, so equal scores keep generation order
        scored.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(chess_move, _)| chess_move).collect()
    }

    pub fn score_move(&self, board: &Board, chess_move: ChessMove) -> Score {
        let mut score = 0.0;

        if let Some(promotion) = chess_move.promotion() {
            score += material_value(promotion) + PROMOTION_BONUS;
        }

        if self.move_generator.is_capture(board, chess_move) {
            // en passant leaves the target square empty, the victim is a pawn
            let victim = board
                .get(chess_move.to_square())
                .map_or(Piece::Pawn, |(piece, _)| piece);
            let attacker = board
                .get(chess_move.from_square())
                .map_or(Piece::Pawn, |(piece, _)| piece);
            score += material_value(victim) - ATTACKER_WEIGHT * material_value(attacker);
        }

        score
    }
}
