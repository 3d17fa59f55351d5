//! Minimax search with alpha-beta pruning over atomic positions.
//!
//! Scores are absolute: white maximizes and black minimizes. Every explored
//! move is played on its own copy of the board, so sibling branches never see
//! each other's changes. Results are cached in a [`TranspositionTable`] keyed
//! by zobrist hash, and each node records whether its value is exact or only a
//! bound relative to the window it was searched with.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::atomic::{resolve, ExplosionOutcome};
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::evaluate::{self, ending_score, game_ending, terminal_score, Score, DRAW_SCORE};
use crate::move_generator::MoveGenerator;

use super::move_orderer::MoveOrderer;
use super::transposition_table::{BoundType, TranspositionTable};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("search deadline passed before depth {depth} completed")]
    DeadlineExceeded { depth: u8 },
}

/// Statistics collected during the most recent move selection.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct SearchStats {
    pub positions_searched: usize,
    pub tt_hits: usize,
    pub tt_stores: usize,
    pub cutoffs: usize,
    pub explosions: usize,
    pub elapsed: Duration,
}

pub struct SearchContext {
    transposition_table: TranspositionTable,
    stats: SearchStats,
    move_generator: MoveGenerator,
    move_orderer: MoveOrderer,
    deadline: Option<Instant>,
    aborted: bool,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::with_table(TranspositionTable::default())
    }
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(transposition_table: TranspositionTable) -> Self {
        Self {
            transposition_table,
            stats: SearchStats::default(),
            move_generator: MoveGenerator::new(),
            move_orderer: MoveOrderer::new(),
            deadline: None,
            aborted: false,
        }
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.transposition_table
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn move_orderer(&self) -> &MoveOrderer {
        &self.move_orderer
    }

    /// Searches stop early once `deadline` passes. `None` removes the limit.
    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Minimax value of `board` searched `depth` plies deep within the
    /// `(alpha, beta)` window. Values outside the window are bounds, not exact.
    ///
    /// Once the deadline has passed the context is flagged as aborted and a
    /// neutral value is returned without touching the table. Callers must
    /// discard any value produced while [`is_aborted`](Self::is_aborted) is set.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing_player: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        if self.deadline_passed() {
            return DRAW_SCORE;
        }
        self.stats.positions_searched += 1;

        let hash = board.position_hash();
        if let Some(entry) = self.transposition_table.probe(hash, depth, alpha, beta) {
            self.stats.tt_hits += 1;
            return entry.value;
        }

        let ending = game_ending(board, &self.move_generator);
        if depth == 0 || ending.is_some() {
            let value = match ending {
                Some(ending) => ending_score(ending, depth),
                None => evaluate::evaluate(board),
            };
            self.store(hash, depth, value, BoundType::Exact, None);
            return value;
        }

        let original_alpha = alpha;
        let original_beta = beta;
        let mut best_score = if maximizing_player {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        };
        let mut best_move = None;

        for chess_move in self.move_orderer.order_moves(board) {
            let score = match resolve(board, chess_move) {
                ExplosionOutcome::IllegalMove => continue,
                ExplosionOutcome::KingDestroyed(winner) => {
                    self.stats.explosions += 1;
                    terminal_score(winner, depth)
                }
                ExplosionOutcome::Continues(next) => {
                    self.search(&next, depth - 1, !maximizing_player, alpha, beta)
                }
            };
            if self.aborted {
                return DRAW_SCORE;
            }

            update_best(score, chess_move, maximizing_player, &mut best_score, &mut best_move);
            if maximizing_player {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if best_move.is_none() {
            // the resolver rejected every candidate
            let value = evaluate::evaluate(board);
            self.store(hash, depth, value, BoundType::Exact, None);
            return value;
        }

        let bound_type = if best_score <= original_alpha {
            BoundType::Upper
        } else if best_score >= original_beta {
            BoundType::Lower
        } else {
            BoundType::Exact
        };
        self.store(hash, depth, best_score, bound_type, best_move);

        best_score
    }

    /// Picks the best move for the side to move by searching `depth` plies.
    /// Ties are broken uniformly at random. Returns `None` when there is
    /// nothing to play.
    pub fn select_move(&mut self, board: &Board, depth: u8) -> Option<ChessMove> {
        let deadline = self.deadline.take();
        let selected = self.try_select_move(board, depth);
        self.deadline = deadline;
        selected.unwrap_or(None)
    }

    /// Like [`select_move`](Self::select_move) but honors the deadline,
    /// failing if it passes before every root move has been searched.
    pub fn try_select_move(
        &mut self,
        board: &Board,
        depth: u8,
    ) -> Result<Option<ChessMove>, SearchError> {
        self.stats = SearchStats::default();
        self.aborted = false;
        let start = Instant::now();

        let maximizing_player = board.turn().maximize_score();
        let mut best_score = if maximizing_player {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        };
        let mut best_moves: Vec<ChessMove> = Vec::new();

        for chess_move in self.move_orderer.order_moves(board) {
            let score = match resolve(board, chess_move) {
                ExplosionOutcome::IllegalMove => continue,
                ExplosionOutcome::KingDestroyed(winner) => {
                    self.stats.explosions += 1;
                    terminal_score(winner, depth)
                }
                ExplosionOutcome::Continues(next) => self.search(
                    &next,
                    depth.saturating_sub(1),
                    !maximizing_player,
                    Score::NEG_INFINITY,
                    Score::INFINITY,
                ),
            };
            if self.aborted {
                self.stats.elapsed = start.elapsed();
                return Err(SearchError::DeadlineExceeded { depth });
            }
            debug!("root move {} scored {}", chess_move, score);

            if score == best_score {
                best_moves.push(chess_move);
            } else if is_better(score, best_score, maximizing_player) {
                best_score = score;
                best_moves.clear();
                best_moves.push(chess_move);
            }
        }

        self.stats.elapsed = start.elapsed();
        info!(
            "depth {}: {} positions in {:?}, {} tt hits, {} cutoffs, {} explosions, best score {}",
            depth,
            self.stats.positions_searched,
            self.stats.elapsed,
            self.stats.tt_hits,
            self.stats.cutoffs,
            self.stats.explosions,
            best_score
        );

        Ok(best_moves.choose(&mut rand::thread_rng()).copied())
    }

    /// Iterative deepening from depth 1 to `max_depth` within `time_limit`.
    /// Returns the choice of the deepest iteration that finished, or the first
    /// ordered candidate if none did.
    pub fn select_move_within(
        &mut self,
        board: &Board,
        max_depth: u8,
        time_limit: Duration,
    ) -> Option<ChessMove> {
        self.deadline = Some(Instant::now() + time_limit);
        let mut selected = None;
        let mut completed_depth = 0;

        for depth in 1..=max_depth.max(1) {
            match self.try_select_move(board, depth) {
                Ok(Some(chess_move)) => {
                    selected = Some(chess_move);
                    completed_depth = depth;
                }
                Ok(None) => {
                    selected = None;
                    break;
                }
                Err(err) => {
                    debug!("{}, keeping depth {} result", err, completed_depth);
                    if selected.is_none() {
                        selected = self.move_orderer.order_moves(board).first().copied();
                    }
                    break;
                }
            }
        }

        self.deadline = None;
        selected
    }

    fn store(
        &mut self,
        hash: u64,
        depth: u8,
        value: Score,
        bound_type: BoundType,
        best_move: Option<ChessMove>,
    ) {
        self.stats.tt_stores += 1;
        self.transposition_table
            .store(hash, depth, value, bound_type, best_move);
    }

    fn deadline_passed(&mut self) -> bool {
        if !self.aborted {
            if let Some(deadline) = self.deadline {
                self.aborted = Instant::now() >= deadline;
            }
        }
        self.aborted
    }
}

fn is_better(score: Score, best_score: Score, maximizing_player: bool) -> bool {
    if maximizing_player {
        score > best_score
    } else {
        score < best_score
    }
}

/// Updates best score and move if new score is better.
fn update_best(
    score: Score,
    candidate_move: ChessMove,
    maximizing_player: bool,
    best_score: &mut Score,
    best_move: &mut Option<ChessMove>,
) {
    if best_move.is_none() || is_better(score, *best_score, maximizing_player) {
        *best_score = score;
        *best_move = Some(candidate_move);
    }
}
