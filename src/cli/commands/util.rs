//! Shared utilities for CLI commands.

use std::path::PathBuf;
use std::time::Duration;

use atomic_chess::board::Board;
use atomic_chess::evaluate::GameEnding;
use atomic_chess::game::engine::{EngineConfig, MoveResult};

pub(crate) fn create_config(
    depth: u8,
    time_ms: Option<u64>,
    table_path: Option<PathBuf>,
    starting_position: Board,
) -> EngineConfig {
    EngineConfig {
        search_depth: depth,
        time_limit: time_ms.map(Duration::from_millis),
        table_path,
        starting_position,
    }
}

pub(crate) fn describe_result(result: MoveResult) -> String {
    match result {
        MoveResult::Continues => "the game continues".to_string(),
        MoveResult::KingDestroyed(winner) => format!("a king exploded, {} wins", winner),
        MoveResult::GameOver(GameEnding::Checkmate { winner }) => {
            format!("checkmate, {} wins", winner)
        }
        MoveResult::GameOver(GameEnding::Stalemate) => "stalemate".to_string(),
        MoveResult::GameOver(GameEnding::InsufficientMaterial) => {
            "draw by insufficient material".to_string()
        }
        MoveResult::GameOver(GameEnding::SeventyFiveMoveRule) => {
            "draw by the seventy-five move rule".to_string()
        }
    }
}
