use core::fmt;
use std::{
    fmt::{Display, Formatter},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not},
};

use crate::bitboard::square::Square;

/// A set of squares, one bit per square with a1 as the least significant bit.
#[derive(Clone, Copy, PartialEq, Debug, PartialOrd, Eq, Ord, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Self = Self(0x0000000000000000);
    pub const ALL: Self = Self(0xFFFFFFFFFFFFFFFF);

    pub const A_FILE: Self = Self(0x0101010101010101);
    pub const H_FILE: Self = Self(0x8080808080808080);

    pub const RANK_1: Self = Self(0xFF);
    pub const RANK_2: Self = Self(0xFF00);
    pub const RANK_7: Self = Self(0xFF000000000000);
    pub const RANK_8: Self = Self(0xFF00000000000000);

    /// Squares where `(file + rank)` is even, i.e. a1, c1, b2 ...
    pub const DARK_SQUARES: Self = Self(0xAA55AA55AA55AA55);
    pub const LIGHT_SQUARES: Self = Self(0x55AA55AA55AA55AA);

    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    pub fn overlaps(&self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn contains(&self, square: Square) -> bool {
        self.overlaps(Self::from_square(square))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the lowest set square, if any.
    pub fn first(&self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Some(Square::new(self.0.trailing_zeros() as u8))
        }
    }

    pub fn squares(self) -> BitboardIter {
        BitboardIter(self.0)
    }
}

pub struct BitboardIter(u64);

impl Iterator for BitboardIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Square::new(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::from_square(square)
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let cell = if self.contains(Square::from_rank_file(rank, file)) {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
