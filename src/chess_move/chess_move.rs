use core::fmt;
use std::str::FromStr;

use common::bitboard::Square;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::piece::Piece;

/// A move from one square to another, optionally promoting a pawn. Castling is
/// written as the king's two-square step and en passant as the pawn's diagonal
/// step, as in UCI.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ChessMove {
    from_square: Square,
    to_square: Square,
    promotion: Option<Piece>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("`{0}` is not a move; expected UCI notation such as e2e4 or e7e8q")]
    InvalidFormat(String),
    #[error("`{0}` is not a promotion piece")]
    InvalidPromotion(char),
}

impl ChessMove {
    pub fn new(from_square: Square, to_square: Square) -> Self {
        Self {
            from_square,
            to_square,
            promotion: None,
        }
    }

    pub fn promoting(from_square: Square, to_square: Square, promotion: Piece) -> Self {
        Self {
            from_square,
            to_square,
            promotion: Some(promotion),
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn promotion(&self) -> Option<Piece> {
        self.promotion
    }

    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from_square, self.to_square)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for ChessMove {
    type Err = MoveParseError;

    fn from_str(uci: &str) -> Result<Self, Self::Err> {
        let uci = uci.trim();
        let invalid = || MoveParseError::InvalidFormat(uci.to_string());
        if !(uci.len() == 4 || uci.len() == 5) || !uci.is_ascii() {
            return Err(invalid());
        }

        let from_square = Square::from_algebraic(&uci[0..2]).map_err(|_| invalid())?;
        let to_square = Square::from_algebraic(&uci[2..4]).map_err(|_| invalid())?;
        let promotion = match uci[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(piece @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen)) => {
                    Some(piece)
                }
                _ => return Err(MoveParseError::InvalidPromotion(c)),
            },
        };

        Ok(Self {
            from_square,
            to_square,
            promotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;

    #[test]
    fn test_parse_uci() {
        assert_eq!("e2e4".parse::<ChessMove>().unwrap(), ChessMove::new(E2, E4));
        assert_eq!(
            "e7e8q".parse::<ChessMove>().unwrap(),
            ChessMove::promoting(E7, E8, Piece::Queen)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "e2".parse::<ChessMove>(),
            Err(MoveParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "z2e4".parse::<ChessMove>(),
            Err(MoveParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "e7e8k".parse::<ChessMove>(),
            Err(MoveParseError::InvalidPromotion('k'))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(ChessMove::new(G1, F3).to_string(), "g1f3");
        assert_eq!(ChessMove::promoting(B2, A1, Piece::Knight).to_uci(), "b2a1n");
    }
}
