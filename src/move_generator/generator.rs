use smallvec::SmallVec;

use common::bitboard::{Bitboard, Square};

use crate::board::{castle_rights::CastleRights, color::Color, piece::Piece, Board};
use crate::chess_move::ChessMove;

use super::targets::{is_square_attacked, piece_targets};

/// A list of chess moves that is optimized for small sizes.
pub type ChessMoveList = SmallVec<[ChessMove; 32]>;

/// Generates moves for the side to move. Attack tables are shared statics, so
/// the generator itself carries no state.
#[derive(Clone, Copy, Default, Debug)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Every move the side to move could make while ignoring whether its own
    /// king is left attacked. King captures are included.
    pub fn pseudo_legal_moves(&self, board: &Board) -> ChessMoveList {
        let mut moves = ChessMoveList::new();
        let color = board.turn();
        for from in board.pieces(color).occupied().squares() {
            generate_moves_from(&mut moves, board, color, from);
        }
        moves
    }

    /// Pseudo-legal moves that do not leave the mover's king attacked after a
    /// standard application.
    pub fn legal_moves(&self, board: &Board) -> ChessMoveList {
        self.pseudo_legal_moves(board)
            .into_iter()
            .filter(|chess_move| leaves_king_safe(board, *chess_move))
            .collect()
    }

    pub fn has_legal_move(&self, board: &Board) -> bool {
        self.pseudo_legal_moves(board)
            .into_iter()
            .any(|chess_move| leaves_king_safe(board, chess_move))
    }

    /// Checks a single move by generating only the moves of the piece on its
    /// from-square.
    pub fn is_pseudo_legal(&self, board: &Board, chess_move: ChessMove) -> bool {
        let color = board.turn();
        let from = chess_move.from_square();
        if !board.pieces(color).is_occupied(from) {
            return false;
        }
        let mut moves = ChessMoveList::new();
        generate_moves_from(&mut moves, board, color, from);
        moves.contains(&chess_move)
    }

    /// A move is a capture when its target holds an enemy piece, or when it is
    /// an en passant capture.
    pub fn is_capture(&self, board: &Board, chess_move: ChessMove) -> bool {
        let mover = match board.get(chess_move.from_square()) {
            Some((_, color)) => color,
            None => return false,
        };
        match board.get(chess_move.to_square()) {
            Some((_, color)) => color != mover,
            None => board.en_passant_victim(chess_move).is_some(),
        }
    }

    pub fn is_in_check(&self, board: &Board, color: Color) -> bool {
        match board.king_square(color) {
            Some(king) => is_square_attacked(board, king, color.opposite()),
            None => false,
        }
    }
}

fn leaves_king_safe(board: &Board, chess_move: ChessMove) -> bool {
    let mover = board.turn();
    let mut after = board.clone();
    if after.apply_move(chess_move).is_err() {
        return false;
    }
    match after.king_square(mover) {
        Some(king) => !is_square_attacked(&after, king, mover.opposite()),
        None => true,
    }
}

const PROMOTION_ORDER: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

fn push_pawn_move(moves: &mut ChessMoveList, from: Square, to: Square, promotion_rank: u8) {
    if to.rank() == promotion_rank {
        for piece in PROMOTION_ORDER {
            moves.push(ChessMove::promoting(from, to, piece));
        }
    } else {
        moves.push(ChessMove::new(from, to));
    }
}

fn generate_moves_from(moves: &mut ChessMoveList, board: &Board, color: Color, from: Square) {
    match board.pieces(color).get(from) {
        Some(Piece::Pawn) => generate_pawn_moves(moves, board, color, from),
        Some(Piece::King) => {
            generate_piece_moves(moves, board, color, Piece::King, from);
            generate_castle_moves(moves, board, color, from);
        }
        Some(piece) => generate_piece_moves(moves, board, color, piece, from),
        None => {}
    }
}

fn generate_pawn_moves(moves: &mut ChessMoveList, board: &Board, color: Color, from: Square) {
    let (forward, start_rank, promotion_rank) = match color {
        Color::White => (1, 1, 7),
        Color::Black => (-1, 6, 0),
    };
    let mut capturable = board.pieces(color.opposite()).occupied();
    if let Some(target) = board.en_passant_target() {
        capturable |= Bitboard::from(target);
    }

    for to in (piece_targets(Piece::Pawn, from, color, board.occupied()) & capturable).squares() {
        push_pawn_move(moves, from, to, promotion_rank);
    }

    let Some(single) = from.offset(0, forward) else {
        return;
    };
    if board.is_occupied(single) {
        return;
    }
    push_pawn_move(moves, from, single, promotion_rank);

    if from.rank() == start_rank {
        if let Some(double) = single.offset(0, forward) {
            if !board.is_occupied(double) {
                moves.push(ChessMove::new(from, double));
            }
        }
    }
}

fn generate_piece_moves(
    moves: &mut ChessMoveList,
    board: &Board,
    color: Color,
    piece: Piece,
    from: Square,
) {
    let own = board.pieces(color).occupied();
    let targets = piece_targets(piece, from, color, board.occupied()) & !own;
    for to in targets.squares() {
        moves.push(ChessMove::new(from, to));
    }
}

fn generate_castle_moves(moves: &mut ChessMoveList, board: &Board, color: Color, king_from: Square) {
    let rights = board.castle_rights();
    let back_rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    if king_from != Square::from_rank_file(back_rank, 4) || rights.is_empty() {
        return;
    }
    let opponent = color.opposite();
    if is_square_attacked(board, king_from, opponent) {
        return;
    }

    // (right, rook file, squares that must be empty, squares the king crosses, king destination file)
    let sides: [(CastleRights, u8, &[u8], [u8; 2], u8); 2] = [
        (CastleRights::kingside(color), 7, &[5, 6], [5, 6], 6),
        (CastleRights::queenside(color), 0, &[1, 2, 3], [3, 2], 2),
    ];

    for (right, rook_file, empty_files, king_path, king_to_file) in sides {
        if !rights.contains(right) {
            continue;
        }
        if board.get(Square::from_rank_file(back_rank, rook_file)) != Some((Piece::Rook, color)) {
            continue;
        }
        let blocked = empty_files
            .iter()
            .any(|&file| board.is_occupied(Square::from_rank_file(back_rank, file)));
        if blocked {
            continue;
        }
        let attacked = king_path
            .iter()
            .any(|&file| is_square_attacked(board, Square::from_rank_file(back_rank, file), opponent));
        if attacked {
            continue;
        }
        moves.push(ChessMove::new(
            king_from,
            Square::from_rank_file(back_rank, king_to_file),
        ));
    }
}
