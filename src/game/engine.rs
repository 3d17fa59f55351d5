use std::path::PathBuf;
use std::time::Duration;

use log::info;
use thiserror::Error;

use crate::alpha_beta_searcher::{SearchContext, SearchStats, SnapshotError, TranspositionTable};
use crate::atomic::{detonate, IllegalMoveError};
use crate::board::color::Color;
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::evaluate::{self, GameEnding, Score};
use crate::move_generator::MoveGenerator;

/// Core engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub search_depth: u8,
    /// When set, searches deepen iteratively until the limit runs out.
    pub time_limit: Option<Duration>,
    /// Transposition table snapshot loaded on startup and written on shutdown.
    pub table_path: Option<PathBuf>,
    pub starting_position: Board,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 4,
            time_limit: None,
            table_path: None,
            starting_position: Board::starting_position(),
        }
    }
}

/// What a played move did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Continues,
    KingDestroyed(Color),
    GameOver(GameEnding),
}

impl MoveResult {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, MoveResult::Continues)
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),
    #[error("could not save the transposition table: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Plays one game of atomic chess: holds the position, validates moves played
/// against it and searches for replies. The transposition table outlives
/// individual searches and is persisted by [`shutdown`](Engine::shutdown).
pub struct Engine {
    config: EngineConfig,
    board: Board,
    move_history: Vec<ChessMove>,
    exploded: Option<Color>,
    move_generator: MoveGenerator,
    search_context: SearchContext,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let transposition_table = match &config.table_path {
            Some(path) => TranspositionTable::load_snapshot(path),
            None => TranspositionTable::default(),
        };

        Self {
            board: config.starting_position.clone(),
            config,
            move_history: Vec::new(),
            exploded: None,
            move_generator: MoveGenerator::new(),
            search_context: SearchContext::with_table(transposition_table),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.move_history.last().copied()
    }

    pub fn search_stats(&self) -> SearchStats {
        self.search_context.stats()
    }

    pub fn table_size(&self) -> usize {
        self.search_context.transposition_table().len()
    }

    pub fn evaluate(&self) -> Score {
        evaluate::evaluate(&self.board)
    }

    /// Returns how the game ended, or `None` while it is still going.
    pub fn game_over(&self) -> Option<MoveResult> {
        if let Some(winner) = self.exploded {
            return Some(MoveResult::KingDestroyed(winner));
        }
        evaluate::game_ending(&self.board, &self.move_generator).map(MoveResult::GameOver)
    }

    /// Plays `chess_move` under atomic rules. Moves that are not pseudo-legal
    /// in the current position are rejected and leave the game untouched.
    pub fn make_move(&mut self, chess_move: ChessMove) -> Result<MoveResult, EngineError> {
        let winner = detonate(&mut self.board, chess_move)?;
        self.move_history.push(chess_move);

        if let Some(winner) = winner {
            info!("{} exploded a king, {} wins", chess_move, winner);
            self.exploded = Some(winner);
            return Ok(MoveResult::KingDestroyed(winner));
        }

        Ok(
            match evaluate::game_ending(&self.board, &self.move_generator) {
                Some(ending) => MoveResult::GameOver(ending),
                None => MoveResult::Continues,
            },
        )
    }

    /// Searches for the side to move. `None` means there is nothing worth
    /// playing and the engine resigns.
    pub fn best_move(&mut self) -> Option<ChessMove> {
        if self.exploded.is_some() {
            return None;
        }
        let depth = self.config.search_depth;
        match self.config.time_limit {
            Some(limit) => self
                .search_context
                .select_move_within(&self.board, depth, limit),
            None => self.search_context.select_move(&self.board, depth),
        }
    }

    pub fn make_best_move(&mut self) -> Result<Option<(ChessMove, MoveResult)>, EngineError> {
        match self.best_move() {
            Some(chess_move) => Ok(Some((chess_move, self.make_move(chess_move)?))),
            None => Ok(None),
        }
    }

    /// Persists the transposition table if a snapshot path is configured.
    pub fn save_table(&self) -> Result<(), EngineError> {
        if let Some(path) = &self.config.table_path {
            self.search_context
                .transposition_table()
                .save_snapshot(path)?;
            info!(
                "saved {} positions to {}",
                self.table_size(),
                path.display()
            );
        }
        Ok(())
    }

    pub fn shutdown(self) -> Result<(), EngineError> {
        self.save_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece::Piece;
    use crate::chess_position;
    use common::bitboard::square::*;

    fn explosion_config() -> EngineConfig {
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
        EngineConfig {
            search_depth: 2,
            starting_position: board,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_make_move_continues() {
        let mut engine = Engine::new();
        let result = engine.make_move("e2e4".parse().unwrap()).unwrap();
        assert_eq!(result, MoveResult::Continues);
        assert_eq!(engine.board().get(E4), Some((Piece::Pawn, Color::White)));
        assert_eq!(engine.last_move(), Some(ChessMove::new(E2, E4)));
        assert_eq!(engine.game_over(), None);
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let mut engine = Engine::new();
        let result = engine.make_move(ChessMove::new(E2, E5));
        assert!(matches!(result, Err(EngineError::IllegalMove(_))));
        assert_eq!(engine.board(), &Board::starting_position());
        assert_eq!(engine.last_move(), None);
    }

    #[test]
    fn test_explosion_ends_game() {
        let mut engine = Engine::with_config(explosion_config());
        let result = engine.make_move(ChessMove::new(A5, E5)).unwrap();
        assert_eq!(result, MoveResult::KingDestroyed(Color::White));
        assert!(result.is_game_over());
        assert_eq!(
            engine.game_over(),
            Some(MoveResult::KingDestroyed(Color::White))
        );
        assert!(engine.board().is_empty());
        assert_eq!(engine.best_move(), None);
    }

    #[test]
    fn test_make_best_move_finds_explosion() {
        let mut engine = Engine::with_config(explosion_config());
        let played = engine.make_best_move().unwrap();
        assert_eq!(
            played,
            Some((
                ChessMove::new(A5, E5),
                MoveResult::KingDestroyed(Color::White)
            ))
        );
        assert!(engine.search_stats().explosions > 0);
    }

    #[test]
    fn test_checkmate_is_game_over() {
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
        let mut engine = Engine::with_config(EngineConfig {
            starting_position: board,
            ..EngineConfig::default()
        });
        let result = engine.make_move(ChessMove::new(B8, B2)).unwrap();
        assert_eq!(
            result,
            MoveResult::GameOver(GameEnding::Checkmate {
                winner: Color::White
            })
        );
    }

    #[test]
    fn test_time_limited_search() {
        let mut engine = Engine::with_config(EngineConfig {
            time_limit: Some(Duration::from_secs(30)),
            ..explosion_config()
        });
        assert_eq!(engine.best_move(), Some(ChessMove::new(A5, E5)));
    }

    #[test]
    fn test_table_persists_across_engines() {
        let path = std::env::temp_dir().join(format!(
            "atomic_chess_engine_table_{}.bin",
            std::process::id()
        ));
        let config = EngineConfig {
            search_depth: 2,
            table_path: Some(path.clone()),
            ..EngineConfig::default()
        };

        let mut engine = Engine::with_config(config.clone());
        assert_eq!(engine.table_size(), 0);
        assert!(engine.best_move().is_some());
        let stored = engine.table_size();
        assert!(stored > 0);
        engine.shutdown().unwrap();

        let engine = Engine::with_config(config);
        assert_eq!(engine.table_size(), stored);
        std::fs::remove_file(&path).unwrap();
    }
}
