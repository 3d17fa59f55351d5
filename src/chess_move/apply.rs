use common::bitboard::Square;

use crate::board::castle_rights::CastleRights;
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::piece::Piece;
use crate::board::Board;

use super::ChessMove;

impl Board {
    /// Square holding the pawn that `chess_move` would take en passant, if the
    /// move is an en passant capture on this board.
    pub fn en_passant_victim(&self, chess_move: ChessMove) -> Option<Square> {
        let target = self.en_passant_target()?;
        let (piece, _) = self.get(chess_move.from_square())?;
        let from = chess_move.from_square();
        let to = chess_move.to_square();
        if piece != Piece::Pawn || to != target || from.file() == to.file() || self.is_occupied(to)
        {
            return None;
        }
        Some(Square::from_rank_file(from.rank(), to.file()))
    }

    /// Applies `chess_move` under standard chess rules and passes the turn.
    /// The move is assumed to be pseudo-legal; the captured piece, if any, is
    /// returned.
    pub fn apply_move(&mut self, chess_move: ChessMove) -> Result<Option<(Piece, Color)>, BoardError> {
        let from = chess_move.from_square();
        let to = chess_move.to_square();
        let (piece, color) = self
            .get(from)
            .ok_or(BoardError::FromSquareEmpty { square: from })?;

        let captured = match self.en_passant_victim(chess_move) {
            Some(victim_square) => self.remove(victim_square),
            None => self.remove(to),
        };

        self.remove(from);
        self.put(to, chess_move.promotion().unwrap_or(piece), color)?;

        if piece == Piece::King && from.file().abs_diff(to.file()) == 2 {
            let (rook_from, rook_to) = if to.file() > from.file() {
                (Square::from_rank_file(from.rank(), 7), Square::from_rank_file(from.rank(), 5))
            } else {
                (Square::from_rank_file(from.rank(), 0), Square::from_rank_file(from.rank(), 3))
            };
            if let Some((rook, rook_color)) = self.remove(rook_from) {
                self.put(rook_to, rook, rook_color)?;
            }
        }

        self.lose_castle_rights(CastleRights::touched_by(from) | CastleRights::touched_by(to));

        let double_push = piece == Piece::Pawn && from.rank().abs_diff(to.rank()) == 2;
        self.set_en_passant_target(if double_push {
            Some(Square::from_rank_file((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        });

        if piece == Piece::Pawn || captured.is_some() {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock().saturating_add(1));
        }
        if color == Color::Black {
            self.set_fullmove_number(self.fullmove_number().saturating_add(1));
        }
        self.toggle_turn();

        Ok(captured)
    }
}
