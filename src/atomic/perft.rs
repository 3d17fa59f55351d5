use crate::board::Board;
use crate::move_generator::MoveGenerator;

use super::{resolve, ExplosionOutcome};

/// Counts the leaf nodes of the atomic game tree `depth` plies below `board`.
/// A king explosion ends its branch early and counts as one leaf.
pub fn count_positions(board: &Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    MoveGenerator::new()
        .pseudo_legal_moves(board)
        .into_iter()
        .map(|chess_move| match resolve(board, chess_move) {
            ExplosionOutcome::Continues(next) => count_positions(&next, depth - 1),
            ExplosionOutcome::KingDestroyed(_) => 1,
            ExplosionOutcome::IllegalMove => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::color::Color;
    use crate::chess_position;

    #[test]
    fn test_count_positions_from_start() {
        let board = Board::starting_position();
        assert_eq!(count_positions(&board, 0), 1);
        assert_eq!(count_positions(&board, 1), 20);
        assert_eq!(count_positions(&board, 2), 400);
    }

    #[test]
    fn test_explosion_ends_branch() {
        let mut board = chess_position! {
            ........
            ........
            .....k..
            ....p...
            ....R...
            ........
            ........
            K.......
        };
        board.set_turn(Color::White);
        let one_ply = count_positions(&board, 1);
        let moves = MoveGenerator::new().pseudo_legal_moves(&board).len() as u64;
        assert_eq!(one_ply, moves);
        // the explosion leaf contributes exactly one node at any depth
        assert!(count_positions(&board, 2) > one_ply);
    }
}
