use std::fmt;

use common::bitboard::Square;

use super::Board;

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let cell = match self.get(Square::from_rank_file(rank, file)) {
                    Some((piece, color)) => piece.to_fen(color),
                    None => '.',
                };
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

/// Builds a `Board` from an 8x8 diagram written from white's point of view,
/// rank 8 first. `.` marks an empty square. The resulting board has white to
/// move and no castling rights.
#[macro_export]
macro_rules! chess_position {
    ($($piece:tt)*) => {{
        let mut board = $crate::board::Board::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(pieces.len(), 64, "Invalid number of squares. Expected 64, got {}", pieces.len());
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let (piece, color) = $crate::board::piece::Piece::from_fen(c)
                    .expect("Invalid character in chess position");
                // The first character is a8, so the row counts down from rank 8.
                let rank = (7 - i / 8) as u8;
                let file = (i % 8) as u8;
                board
                    .put(common::bitboard::Square::from_rank_file(rank, file), piece, color)
                    .expect("square is empty");
            }
        }
        board
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::color::Color;
    use crate::board::piece::Piece;
    use common::bitboard::square::*;

    #[test]
    fn test_chess_position_orientation() {
        let board = chess_position! {
            k.......
            ........
            ........
            ........
            ........
            ........
            ........
            R......K
        };
        assert_eq!(board.get(A8), Some((Piece::King, Color::Black)));
        assert_eq!(board.get(A1), Some((Piece::Rook, Color::White)));
        assert_eq!(board.get(H1), Some((Piece::King, Color::White)));
    }

    #[test]
    fn test_display() {
        let board = Board::starting_position();
        let rendered = board.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "8 rnbqkbnr");
        assert_eq!(lines[7], "1 RNBQKBNR");
        assert_eq!(lines[8], "  abcdefgh");
    }
}
