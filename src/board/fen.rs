use std::str::FromStr;

use common::bitboard::Square;
use once_cell::sync::Lazy;
use regex::Regex;

use super::castle_rights::CastleRights;
use super::color::Color;
use super::error::BoardError;
use super::piece::Piece;
use super::Board;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

static FEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        # `(?x)` - insignificant whitespace mode. makes it easier to comment
        # `\x20` - character code for a single space ` `
        ^
        ([pnbrqkPNBRQK1-8]{1,8}) # eighth rank
        /
        ([pnbrqkPNBRQK1-8]{1,8}) # seventh rank
        /
        ([pnbrqkPNBRQK1-8]{1,8}) # sixth rank
        /
        ([pnbrqkPNBRQK1-8]{1,8}) # fifth rank
        /
        ([pnbrqkPNBRQK1-8]{1,8}) # fourth rank
        /
        ([pnbrqkPNBRQK1-8]{1,8}) # third rank
        /
        ([pnbrqkPNBRQK1-8]{1,8}) # second rank
        /
        ([pnbrqkPNBRQK1-8]{1,8}) # first rank
        \x20
        (b|w)                    # current turn
        \x20
        ([KQkq]{1,4}|-)          # castling rights
        \x20
        ([a-h][36]|-)            # en passant target square
        (?:
            \x20
            (0|[1-9][0-9]*)      # halfmove clock
            \x20
            ([1-9][0-9]*)        # fullmove number
        )?
        $
        ",
    )
    .expect("FEN pattern is valid")
});

impl Board {
    /// Parses a position from Forsyth-Edwards Notation. The move clocks may be
    /// omitted, in which case they default to `0 1`.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let invalid = || BoardError::InvalidFen {
            fen: fen.to_string(),
        };
        let caps = FEN_PATTERN.captures(fen.trim()).ok_or_else(invalid)?;

        // blank board
        let mut board = Self::new();

        for rank_capture_index in 1..=8 {
            let rank_str = &caps[rank_capture_index];
            let rank = (8 - rank_capture_index) as u8;
            let mut file: u8 = 0;

            for fen_char in rank_str.chars() {
                if file >= 8 {
                    return Err(BoardError::InvalidFenRank {
                        rank: rank_str.to_string(),
                    });
                }
                match Piece::from_fen(fen_char) {
                    Some((piece, color)) => {
                        board.put(Square::from_rank_file(rank, file), piece, color)?;
                        file += 1;
                    }
                    None => {
                        // must be a run of empty squares
                        let empty_square_count = fen_char.to_digit(10).ok_or_else(invalid)?;
                        file += empty_square_count as u8;
                    }
                }
            }

            if file != 8 {
                return Err(BoardError::InvalidFenRank {
                    rank: rank_str.to_string(),
                });
            }
        }

        board.set_turn(match &caps[9] {
            "b" => Color::Black,
            _ => Color::White,
        });

        let raw_rights = &caps[10];
        let mut rights = CastleRights::none();
        for (c, right) in [
            ('K', CastleRights::white_kingside()),
            ('Q', CastleRights::white_queenside()),
            ('k', CastleRights::black_kingside()),
            ('q', CastleRights::black_queenside()),
        ] {
            if raw_rights.contains(c) {
                rights = rights | right;
            }
        }
        board.set_castle_rights(rights);

        let en_passant_target = &caps[11];
        if en_passant_target != "-" {
            board.set_en_passant_target(Some(Square::from_algebraic(en_passant_target)?));
        }

        if let (Some(halfmove), Some(fullmove)) = (caps.get(12), caps.get(13)) {
            board.set_halfmove_clock(halfmove.as_str().parse().map_err(|_| invalid())?);
            board.set_fullmove_number(fullmove.as_str().parse().map_err(|_| invalid())?);
        }

        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                match self.get(Square::from_rank_file(rank, file)) {
                    Some((piece, color)) => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        placement.push(piece.to_fen(color));
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let turn = match self.turn() {
            Color::White => "w",
            Color::Black => "b",
        };
        let en_passant = self
            .en_passant_target()
            .map(|square| square.to_algebraic())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {} {} {}",
            placement,
            turn,
            self.castle_rights().to_fen(),
            en_passant,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }
}

// used for parsing cli args
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Self::from_fen(fen)
    }
}
