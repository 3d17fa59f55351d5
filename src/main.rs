mod cli;

use cli::commands::Command;
use cli::Atomic;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    Atomic::from_args().execute();
}
