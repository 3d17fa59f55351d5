use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A board square, indexed 0..64 from a1 (0) to h8 (63), rank-major.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    pub const fn new(index: u8) -> Self {
        assert!(index < 64);
        Self(index)
    }

    pub const fn from_rank_file(rank: u8, file: u8) -> Self {
        Self::new(rank * 8 + file)
    }

    /// Returns the square offset by the given file/rank deltas, or `None` when
    /// the step leaves the board.
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::from_rank_file(rank as u8, file as u8))
        } else {
            None
        }
    }

    /// The up-to-eight squares one king step away, scanned from the lower-left
    /// neighbor rank by rank.
    pub fn neighbors(self) -> impl Iterator<Item = Square> {
        (-1i8..=1)
            .flat_map(|rank_delta| (-1i8..=1).map(move |file_delta| (file_delta, rank_delta)))
            .filter(|&(file_delta, rank_delta)| file_delta != 0 || rank_delta != 0)
            .filter_map(move |(file_delta, rank_delta)| self.offset(file_delta, rank_delta))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{}{}", file, rank)
    }

    pub fn from_algebraic(algebraic_coord: &str) -> Result<Self, SquareParseError> {
        static RE: Lazy<Regex> =
            Lazy::new(|| Regex::new("^([a-hA-H])([1-8])$").expect("square pattern is valid"));

        let caps = RE
            .captures(algebraic_coord)
            .ok_or_else(|| SquareParseError(algebraic_coord.to_string()))?;
        let file = caps[1].as_bytes()[0].to_ascii_lowercase() - b'a';
        let rank = caps[2].as_bytes()[0] - b'1';
        Ok(Self::from_rank_file(rank, file))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareParseError(pub String);

impl fmt::Display for SquareParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid square `{}`", self.0)
    }
}

impl std::error::Error for SquareParseError {}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

macro_rules! squares {
    ($($name:ident = $index:expr),+ $(,)?) => {
        $(pub const $name: Square = Square::new($index);)+
    };
}

#[rustfmt::skip]
squares! {
    A1 = 0,  B1 = 1,  C1 = 2,  D1 = 3,  E1 = 4,  F1 = 5,  G1 = 6,  H1 = 7,
    A2 = 8,  B2 = 9,  C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rank_file() {
        assert_eq!(A1, Square::from_rank_file(0, 0));
        assert_eq!(B2, Square::from_rank_file(1, 1));
        assert_eq!(E4, Square::from_rank_file(3, 4));
    }

    #[test]
    fn test_from_algebraic() {
        assert_eq!(A1, Square::from_algebraic("A1").unwrap());
        assert_eq!(A1, Square::from_algebraic("a1").unwrap());
        assert_eq!(E5, "e5".parse().unwrap());
        assert!(Square::from_algebraic("i9").is_err());
        assert!(Square::from_algebraic("e").is_err());
    }

    #[test]
    fn test_to_algebraic() {
        assert_eq!("a1", A1.to_algebraic());
        assert_eq!("a8", A8.to_algebraic());
        assert_eq!("h8", H8.to_string());
    }

    #[test]
    fn test_neighbors_in_the_middle() {
        let neighbors: Vec<_> = E5.neighbors().collect();
        assert_eq!(neighbors, vec![D4, E4, F4, D5, F5, D6, E6, F6]);
    }

    #[test]
    fn test_neighbors_are_clipped_at_the_edges() {
        let corner: Vec<_> = A1.neighbors().collect();
        assert_eq!(corner, vec![B1, A2, B2]);

        let edge: Vec<_> = H5.neighbors().collect();
        assert_eq!(edge, vec![G4, H4, G5, G6, H6]);
    }
}
