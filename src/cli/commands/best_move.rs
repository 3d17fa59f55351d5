//! Best move command - determine the best move from a position.

use std::path::PathBuf;

use atomic_chess::board::Board;
use atomic_chess::game::engine::Engine;
use structopt::StructOpt;

use super::util::create_config;
use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(short, long = "time-ms")]
    pub time_ms: Option<u64>,
    #[structopt(long = "table", parse(from_os_str))]
    pub table: Option<PathBuf>,
    #[structopt(long = "fen")]
    pub starting_position: Board,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let config = create_config(self.depth, self.time_ms, self.table, self.starting_position);
        let mut engine = Engine::with_config(config);

        match engine.best_move() {
            Some(best_move) => println!("{}", best_move),
            None => println!("resign"),
        }

        if let Err(err) = engine.shutdown() {
            eprintln!("{}", err);
        }
    }
}
