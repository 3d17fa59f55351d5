use log::trace;
use thiserror::Error;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::move_generator::MoveGenerator;

/// What happens to a position when a move is played under atomic rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExplosionOutcome {
    Continues(Board),
    KingDestroyed(Color),
    IllegalMove,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0} is not a pseudo-legal move in this position")]
pub struct IllegalMoveError(pub ChessMove);

/// Plays `chess_move` on a copy of `board` and reports the outcome. The input
/// board is never modified.
pub fn resolve(board: &Board, chess_move: ChessMove) -> ExplosionOutcome {
    let mut next = board.clone();
    match detonate(&mut next, chess_move) {
        Ok(None) => ExplosionOutcome::Continues(next),
        Ok(Some(winner)) => ExplosionOutcome::KingDestroyed(winner),
        Err(_) => ExplosionOutcome::IllegalMove,
    }
}

/// Rejects any move that is not pseudo-legal for the side to move.
pub fn check_move(board: &Board, chess_move: ChessMove) -> Result<(), IllegalMoveError> {
    if MoveGenerator::new().is_pseudo_legal(board, chess_move) {
        Ok(())
    } else {
        Err(IllegalMoveError(chess_move))
    }
}

/// Plays `chess_move` on `board` in place. Returns the winner when a king is
/// caught in the blast, in which case every square is left empty. An illegal
/// move is rejected before anything is touched.
///
/// A capture removes the capturing piece and every non-pawn piece on the eight
/// neighboring squares. A king that captures, is captured or stands next to
/// the capture square is destroyed. If the blast reaches both kings, the side
/// that captured loses.
pub fn detonate(board: &mut Board, chess_move: ChessMove) -> Result<Option<Color>, IllegalMoveError> {
    check_move(board, chess_move)?;

    let move_generator = MoveGenerator::new();
    let mover = board.turn();
    let is_capture = move_generator.is_capture(board, chess_move);
    let captured = board
        .apply_move(chess_move)
        .map_err(|_| IllegalMoveError(chess_move))?;

    if !is_capture {
        return Ok(None);
    }

    let center = chess_move.to_square();
    let mut kings_caught = [false; 2];
    if let Some((Piece::King, color)) = captured {
        kings_caught[color.index()] = true;
    }
    if let Some((Piece::King, color)) = board.get(center) {
        kings_caught[color.index()] = true;
    }
    for square in center.neighbors() {
        if let Some((Piece::King, color)) = board.get(square) {
            kings_caught[color.index()] = true;
        }
    }

    let winner = if kings_caught[mover.index()] {
        Some(mover.opposite())
    } else if kings_caught[mover.opposite().index()] {
        Some(mover)
    } else {
        None
    };
    if let Some(winner) = winner {
        trace!("{} destroys a king, {} wins", chess_move, winner);
        board.clear();
        return Ok(Some(winner));
    }

    for square in center.neighbors() {
        if matches!(board.get(square), Some((piece, _)) if piece != Piece::Pawn) {
            board.remove(square);
        }
    }
    board.remove(center);

    Ok(None)
}
