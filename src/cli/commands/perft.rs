//! Perft command - count atomic game tree leaves at increasing depths.

use std::time::{Duration, Instant};

use atomic_chess::atomic::count_positions;
use atomic_chess::board::{Board, STARTING_POSITION_FEN};
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct PerftArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
}

impl Command for PerftArgs {
    fn execute(self) {
        let mut total_positions = 0;
        let mut total_duration = Duration::from_secs(0);

        for depth in 1..=self.depth {
            let start = Instant::now();
            let count = count_positions(&self.starting_position, depth);
            let duration = start.elapsed();

            total_positions += count;
            total_duration += duration;

            println!(
                "depth: {}, positions: {}, positions per second: {:.0}",
                depth,
                count,
                count as f64 / duration.as_secs_f64()
            );
        }

        println!(
            "total positions: {}, total duration: {:?}, positions per second: {:.0}",
            total_positions,
            total_duration,
            total_positions as f64 / total_duration.as_secs_f64()
        );
    }
}
