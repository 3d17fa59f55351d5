//! Move selection: ordering, alpha-beta search and the transposition table it
//! caches results in.

mod move_orderer;
mod search;
pub mod transposition_table;

#[cfg(test)]
mod tests;

pub use move_orderer::MoveOrderer;
pub use search::{SearchContext, SearchError, SearchStats};
pub use transposition_table::{BoundType, SnapshotError, TTEntry, TranspositionTable};
