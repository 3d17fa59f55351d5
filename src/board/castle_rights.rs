use common::bitboard::square::*;
use common::bitboard::Square;

use super::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const fn white_kingside() -> Self {
        Self(0b1000)
    }

    pub const fn black_kingside() -> Self {
        Self(0b0100)
    }

    pub const fn white_queenside() -> Self {
        Self(0b0010)
    }

    pub const fn black_queenside() -> Self {
        Self(0b0001)
    }

    pub const fn all() -> Self {
        Self(
            Self::white_kingside().0
                | Self::black_kingside().0
                | Self::white_queenside().0
                | Self::black_queenside().0,
        )
    }

    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn without(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    pub const fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::white_kingside(),
            Color::Black => Self::black_kingside(),
        }
    }

    pub const fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::white_queenside(),
            Color::Black => Self::black_queenside(),
        }
    }

    /// Rights that are lost once a piece moves from, or is removed from, `square`.
    pub fn touched_by(square: Square) -> Self {
        match square {
            E1 => Self::white_kingside() | Self::white_queenside(),
            H1 => Self::white_kingside(),
            A1 => Self::white_queenside(),
            E8 => Self::black_kingside() | Self::black_queenside(),
            H8 => Self::black_kingside(),
            A8 => Self::black_queenside(),
            _ => Self::none(),
        }
    }

    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        [
            (Self::white_kingside(), 'K'),
            (Self::white_queenside(), 'Q'),
            (Self::black_kingside(), 'k'),
            (Self::black_queenside(), 'q'),
        ]
        .iter()
        .filter(|(rights, _)| self.contains(*rights))
        .map(|(_, c)| *c)
        .collect()
    }
}

impl std::ops::BitOr for CastleRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}
