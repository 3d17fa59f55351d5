//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    best_move::BestMoveArgs, evaluate::EvaluateArgs, perft::PerftArgs, play::PlayArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "atomic",
    about = "An atomic chess engine implemented in Rust 💥"
)]
pub enum Atomic {
    #[structopt(
        name = "best-move",
        about = "Determine the best move from a position provided in FEN notation with `--fen` (required). The search runs to `--depth` plies (default: 4); with `--time-ms` it deepens iteratively until the time runs out. A transposition table snapshot can be reused across runs with `--table`. Prints the move in UCI notation, or `resign` when there is nothing to play."
    )]
    BestMove(BestMoveArgs),
    #[structopt(
        name = "play",
        about = "Play a game of atomic chess against the computer, which searches at the given `--depth` (default: 4). Your color is chosen at random unless you specify it with `--color`. The initial position can be given in FEN notation with `--fen` (default: starting position). Enter moves in UCI notation, e.g. `e2e4` or `e7e8q`, or `quit` to stop."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "evaluate",
        about = "Print the static material evaluation of the position given with `--fen`. Positive scores favor white."
    )]
    Evaluate(EvaluateArgs),
    #[structopt(
        name = "perft",
        about = "Count the leaf positions of the atomic game tree below `--fen` (default: starting position) for every depth up to `--depth` (default: 3), and report how long it took."
    )]
    Perft(PerftArgs),
}

impl crate::cli::commands::Command for Atomic {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            BestMove(cmd),
            Play(cmd),
            Evaluate(cmd),
            Perft(cmd),
        }
    }
}
