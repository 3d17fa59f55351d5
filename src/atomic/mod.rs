//! Atomic capture rules layered over standard move application.

mod explosion;
mod perft;

pub use explosion::{check_move, detonate, resolve, ExplosionOutcome, IllegalMoveError};
pub use perft::count_positions;
