//! CLI command implementations.

pub trait Command {
    fn execute(self);
}

pub mod best_move;
pub mod evaluate;
pub mod perft;
pub mod play;

// Shared utilities for commands
pub(crate) mod util;
