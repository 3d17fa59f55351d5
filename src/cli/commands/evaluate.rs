//! Evaluate command - print the static evaluation of a position.

use atomic_chess::board::Board;
use atomic_chess::evaluate::evaluate;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct EvaluateArgs {
    #[structopt(long = "fen")]
    pub starting_position: Board,
}

impl Command for EvaluateArgs {
    fn execute(self) {
        println!("{}", evaluate(&self.starting_position));
    }
}
