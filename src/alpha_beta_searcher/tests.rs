//! Search tests on atomic positions.
//!
//! Test coverage:
//! - Explosion and checkmate finding
//! - Agreement between the pruned search and plain minimax
//! - Tie breaking, resignation and deadlines

use std::time::Duration;

use common::bitboard::square::*;

use crate::atomic::{resolve, ExplosionOutcome};
use crate::board::{color::Color, Board};
use crate::chess_move::ChessMove;
use crate::chess_position;
use crate::evaluate::{ending_score, evaluate, game_ending, terminal_score, Score};
use crate::move_generator::MoveGenerator;

use super::*;

/// Full-width minimax with the same scoring conventions as the search.
fn minimax(board: &Board, depth: u8, maximizing_player: bool) -> Score {
    let mut nodes = 0;
    counting_minimax(board, depth, maximizing_player, &mut nodes)
}

/// Minimax that also counts every position it visits.
fn counting_minimax(
    board: &Board,
    depth: u8,
    maximizing_player: bool,
    nodes: &mut usize,
) -> Score {
    *nodes += 1;
    let move_generator = MoveGenerator::new();
    if let Some(ending) = game_ending(board, &move_generator) {
        return ending_score(ending, depth);
    }
    if depth == 0 {
        return evaluate(board);
    }

    let mut scores = Vec::new();
    for chess_move in move_generator.pseudo_legal_moves(board) {
        let score = match resolve(board, chess_move) {
            ExplosionOutcome::IllegalMove => continue,
            ExplosionOutcome::KingDestroyed(winner) => terminal_score(winner, depth),
            ExplosionOutcome::Continues(next) => {
                counting_minimax(&next, depth - 1, !maximizing_player, nodes)
            }
        };
        scores.push(score);
    }

    let best = if maximizing_player {
        scores.iter().cloned().fold(Score::NEG_INFINITY, Score::max)
    } else {
        scores.iter().cloned().fold(Score::INFINITY, Score::min)
    };
    if scores.is_empty() {
        evaluate(board)
    } else {
        best
    }
}

fn explosion_board() -> Board {
    let mut board = chess_position! {
        ........
        ........
        .....k..
        R...p...
        ........
        ........
        ........
        K.......
    };
    board.set_turn(Color::White);
    board
}

#[test]
fn test_find_explosion_win() {
    let board = explosion_board();
    for depth in 1..=3 {
        let mut context = SearchContext::new();
        assert_eq!(
            context.select_move(&board, depth),
            Some(ChessMove::new(A5, E5)),
            "depth {} missed the explosion",
            depth
        );
        assert!(context.stats().explosions > 0);
    }
}

#[test]
fn test_find_mate_in_1_white() {
    let mut context = SearchContext::new();
    let mut board = chess_position! {
        .Q......
        ........
        ........
        ........
        ........
        ........
        k.K.....
        ........
    };
    board.set_turn(Color::White);

    let chess_move = context.select_move(&board, 1).unwrap();
    let valid_checkmates = [
        ChessMove::new(B8, B2),
        ChessMove::new(B8, A8),
        ChessMove::new(B8, A7),
    ];
    assert!(
        valid_checkmates.contains(&chess_move),
        "{} does not lead to checkmate",
        chess_move
    );
}

#[test]
fn test_find_mate_in_1_black() {
    let mut context = SearchContext::new();
    let mut board = chess_position! {
        .q......
        ........
        ........
        ........
        ........
        ........
        K.k.....
        ........
    };
    board.set_turn(Color::Black);

    let chess_move = context.select_move(&board, 1).unwrap();
    let valid_checkmates = [
        ChessMove::new(B8, B2),
        ChessMove::new(B8, A8),
        ChessMove::new(B8, A7),
    ];
    assert!(valid_checkmates.contains(&chess_move));
}

#[test]
fn test_alpha_beta_matches_minimax() {
    // (fen, deepest depth compared)
    let positions = [
        ("4k3/8/5n2/3pr3/4R3/2N5/8/4K3 w - - 0 1", 3),
        ("r3k2r/ppp2ppp/2n5/3qp3/3P4/2N5/PPP2PPP/R2QK2R b KQkq - 0 1", 2),
        ("8/2p5/1k1n4/8/3B4/2KP4/8/8 w - - 0 1", 3),
        ("6k1/5ppp/8/8/8/8/q4PPP/1R4K1 w - - 0 1", 3),
    ];

    for (fen, max_depth) in positions {
        let board = Board::from_fen(fen).unwrap();
        let maximizing_player = board.turn().maximize_score();
        for depth in 1..=max_depth {
            let mut context = SearchContext::new();
            let pruned = context.search(
                &board,
                depth,
                maximizing_player,
                Score::NEG_INFINITY,
                Score::INFINITY,
            );
            let full = minimax(&board, depth, maximizing_player);
            assert_eq!(pruned, full, "{} at depth {}", fen, depth);
        }
    }
}

#[test]
fn test_pruning_visits_fewer_positions() {
    let board =
        Board::from_fen("r3k2r/ppp2ppp/2n5/3qp3/3P4/2N5/PPP2PPP/R2QK2R b KQkq - 0 1").unwrap();
    let mut full_width_nodes = 0;
    let full = counting_minimax(&board, 3, false, &mut full_width_nodes);

    let mut context = SearchContext::new();
    let pruned = context.search(&board, 3, false, Score::NEG_INFINITY, Score::INFINITY);

    assert_eq!(pruned, full);
    assert!(context.stats().cutoffs > 0);
    assert!(context.stats().positions_searched < full_width_nodes);
    assert!(context.stats().tt_stores > 0);
    assert!(!context.transposition_table().is_empty());
}

#[test]
fn test_single_candidate_is_deterministic() {
    // capturing next to its own king destroys white; only Kb1 survives
    let mut board = chess_position! {
        .......k
        ........
        ........
        ........
        ........
        ........
        pp......
        K.......
    };
    board.set_turn(Color::White);

    for _ in 0..10 {
        let mut context = SearchContext::new();
        assert_eq!(context.select_move(&board, 1), Some(ChessMove::new(A1, B1)));
    }
}

#[test]
fn test_ties_are_broken_among_best_moves() {
    let board = Board::starting_position();
    let legal = MoveGenerator::new().pseudo_legal_moves(&board);
    let mut context = SearchContext::new();
    for _ in 0..5 {
        let chess_move = context.select_move(&board, 1).unwrap();
        assert!(legal.contains(&chess_move));
    }
}

#[test]
fn test_no_moves_returns_none() {
    let mut board = chess_position! {
        .......k
        ........
        ........
        p.......
        P.......
        ........
        ........
        ........
    };
    board.set_turn(Color::White);

    let mut context = SearchContext::new();
    assert_eq!(context.select_move(&board, 3), None);
}

#[test]
fn test_reused_table_keeps_answer() {
    let board = explosion_board();
    let mut context = SearchContext::new();
    assert_eq!(context.select_move(&board, 2), Some(ChessMove::new(A5, E5)));
    assert_eq!(context.select_move(&board, 2), Some(ChessMove::new(A5, E5)));
    assert!(context.transposition_table().hits() > 0);
}

#[test]
fn test_select_move_within_time_limit() {
    let board = explosion_board();
    let mut context = SearchContext::new();
    assert_eq!(
        context.select_move_within(&board, 3, Duration::from_secs(60)),
        Some(ChessMove::new(A5, E5))
    );
    assert!(!context.is_aborted());
}

#[test]
fn test_expired_deadline_falls_back_to_first_candidate() {
    let board = Board::from_fen("4k3/8/5n2/3pr3/4R3/2N5/8/4K3 w - - 0 1").unwrap();
    let mut context = SearchContext::new();
    let first = context.move_orderer().order_moves(&board)[0];

    assert_eq!(
        context.select_move_within(&board, 4, Duration::ZERO),
        Some(first)
    );
    assert!(context.is_aborted());
    assert!(matches!(
        context.try_select_move(&board, 2),
        Ok(Some(_))
    ));
}
