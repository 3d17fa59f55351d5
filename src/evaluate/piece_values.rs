use crate::board::piece::Piece;

/// Scores are material units from white's point of view.
pub type Score = f64;

// indexed by `Piece::index`: pawn, knight, bishop, rook, queen, king
const MATERIAL_VALUES: [Score; 6] = [1.0, 3.5, 3.0, 5.0, 9.0, 10000.0];

#[inline(always)]
pub fn material_value(piece: Piece) -> Score {
    MATERIAL_VALUES[piece.index()]
}
