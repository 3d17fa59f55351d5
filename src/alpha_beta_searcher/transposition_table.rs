//! Transposition table for caching search results, with snapshot persistence.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chess_move::ChessMove;
use crate::evaluate::Score;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BoundType {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct TTEntry {
    pub depth: u8,
    pub value: Score,
    pub bound_type: BoundType,
    pub best_move: Option<ChessMove>,
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Maps position hashes to the outcome of searching them. Stores always
/// replace the previous entry; depth is checked again on every probe.
#[derive(Default)]
pub struct TranspositionTable {
    table: FxHashMap<u64, TTEntry>,
    hits: usize,
    overwrites: usize,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(
        &mut self,
        hash: u64,
        depth: u8,
        value: Score,
        bound_type: BoundType,
        best_move: Option<ChessMove>,
    ) {
        let entry = TTEntry {
            depth,
            value,
            bound_type,
            best_move,
        };
        if self.table.insert(hash, entry).is_some() {
            self.overwrites += 1;
        }
    }

    /// Returns the entry for `hash` if it was searched at least `depth` deep
    /// and its bound settles the `(alpha, beta)` window.
    pub fn probe(&mut self, hash: u64, depth: u8, alpha: Score, beta: Score) -> Option<TTEntry> {
        let entry = self.table.get(&hash)?;
        if entry.depth < depth {
            return None;
        }
        let usable = match entry.bound_type {
            BoundType::Exact => true,
            BoundType::Lower => entry.value >= beta,
            BoundType::Upper => entry.value <= alpha,
        };
        if usable {
            self.hits += 1;
            Some(*entry)
        } else {
            None
        }
    }

    pub fn get(&self, hash: u64) -> Option<&TTEntry> {
        self.table.get(&hash)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn overwrites(&self) -> usize {
        self.overwrites
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn write_snapshot<W: Write>(&self, writer: W) -> Result<(), SnapshotError> {
        bincode::serialize_into(writer, &self.table)?;
        Ok(())
    }

    pub fn read_snapshot<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let table: FxHashMap<u64, TTEntry> = bincode::deserialize_from(reader)?;
        Ok(Self {
            table,
            ..Self::default()
        })
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<(), SnapshotError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_snapshot(&mut writer)?;
        writer.flush()?;
        debug!("saved {} table entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Loads a table from `path`. A missing or unreadable snapshot yields an
    /// empty table.
    pub fn load_snapshot(path: &Path) -> Self {
        let loaded = File::open(path)
            .map_err(SnapshotError::from)
            .and_then(|file| Self::read_snapshot(BufReader::new(file)));
        match loaded {
            Ok(table) => {
                debug!("loaded {} table entries from {}", table.len(), path.display());
                table
            }
            Err(err) => {
                warn!("starting with an empty table, could not load {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::square::*;
    use std::path::PathBuf;

    fn temp_snapshot_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("atomic_chess_{}_{}.bin", name, std::process::id()))
    }

    #[test]
    fn test_store_then_probe_returns_entry() {
        let mut table = TranspositionTable::new();
        let best_move = Some(ChessMove::new(E2, E4));
        table.store(42, 3, 1.5, BoundType::Exact, best_move);

        let entry = table.probe(42, 3, Score::NEG_INFINITY, Score::INFINITY);
        assert_eq!(
            entry,
            Some(TTEntry {
                depth: 3,
                value: 1.5,
                bound_type: BoundType::Exact,
                best_move,
            })
        );
        assert_eq!(table.hits(), 1);
    }

    #[test]
    fn test_probe_rejects_shallow_entry() {
        let mut table = TranspositionTable::new();
        table.store(7, 2, 0.0, BoundType::Exact, None);
        assert!(table.probe(7, 3, Score::NEG_INFINITY, Score::INFINITY).is_none());
        assert!(table.probe(7, 2, Score::NEG_INFINITY, Score::INFINITY).is_some());
        assert!(table.probe(7, 1, Score::NEG_INFINITY, Score::INFINITY).is_some());
        assert!(table.probe(8, 0, Score::NEG_INFINITY, Score::INFINITY).is_none());
    }

    #[test]
    fn test_probe_respects_bounds() {
        let mut table = TranspositionTable::new();
        table.store(1, 4, 5.0, BoundType::Lower, None);
        assert!(table.probe(1, 4, 0.0, 5.0).is_some());
        assert!(table.probe(1, 4, 0.0, 6.0).is_none());

        table.store(2, 4, -2.0, BoundType::Upper, None);
        assert!(table.probe(2, 4, -2.0, 3.0).is_some());
        assert!(table.probe(2, 4, -3.0, 3.0).is_none());
    }

    #[test]
    fn test_store_overwrites_deeper_entry() {
        let mut table = TranspositionTable::new();
        table.store(9, 6, 3.0, BoundType::Exact, None);
        table.store(9, 1, -1.0, BoundType::Exact, None);
        assert_eq!(table.get(9).map(|entry| entry.depth), Some(1));
        assert_eq!(table.overwrites(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut table = TranspositionTable::new();
        table.store(1, 3, 2.5, BoundType::Exact, Some(ChessMove::new(G1, F3)));
        table.store(u64::MAX, 0, -10003.0, BoundType::Upper, None);
        table.store(
            0xDEAD_BEEF,
            5,
            9.0,
            BoundType::Lower,
            Some(ChessMove::promoting(A7, A8, crate::board::piece::Piece::Knight)),
        );

        let path = temp_snapshot_path("round_trip");
        table.save_snapshot(&path).unwrap();
        let loaded = TranspositionTable::load_snapshot(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.len(), table.len());
        for hash in [1, u64::MAX, 0xDEAD_BEEF] {
            assert_eq!(loaded.get(hash), table.get(hash));
        }
    }

    #[test]
    fn test_missing_snapshot_loads_empty() {
        let path = temp_snapshot_path("missing");
        let table = TranspositionTable::load_snapshot(&path);
        assert!(table.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let path = temp_snapshot_path("corrupt");
        std::fs::write(&path, b"definitely not a table").unwrap();
        let table = TranspositionTable::load_snapshot(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(table.is_empty());
    }
}
