//! Play command - play a game against the computer.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use atomic_chess::board::color::Color;
use atomic_chess::board::{Board, STARTING_POSITION_FEN};
use atomic_chess::chess_move::ChessMove;
use atomic_chess::game::engine::Engine;
use structopt::StructOpt;

use super::util::{create_config, describe_result};
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(short = "c", long = "color", default_value = "random")]
    pub color: Color,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
    #[structopt(long = "table", parse(from_os_str))]
    pub table: Option<PathBuf>,
}

impl Command for PlayArgs {
    fn execute(self) {
        let config = create_config(self.depth, None, self.table, self.starting_position);
        let mut engine = Engine::with_config(config);
        let human = self.color;
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        println!("you are playing {}", human);
        println!("{}", engine.board());

        loop {
            if let Some(result) = engine.game_over() {
                println!("{}", describe_result(result));
                break;
            }

            let result = if engine.board().turn() == human {
                print!("your move: ");
                io::stdout().flush().ok();

                let input = match lines.next() {
                    Some(Ok(line)) => line,
                    _ => break,
                };
                let input = input.trim();
                if input == "quit" {
                    break;
                }

                let chess_move = match input.parse::<ChessMove>() {
                    Ok(chess_move) => chess_move,
                    Err(err) => {
                        println!("{}", err);
                        continue;
                    }
                };
                match engine.make_move(chess_move) {
                    Ok(result) => result,
                    Err(err) => {
                        println!("{}", err);
                        continue;
                    }
                }
            } else {
                match engine.make_best_move() {
                    Ok(Some((chess_move, result))) => {
                        let stats = engine.search_stats();
                        println!(
                            "engine plays {} ({} positions searched in {:?})",
                            chess_move, stats.positions_searched, stats.elapsed
                        );
                        result
                    }
                    Ok(None) => {
                        println!("the engine resigns, {} wins", human);
                        break;
                    }
                    Err(err) => {
                        eprintln!("{}", err);
                        break;
                    }
                }
            };

            println!("{}", engine.board());
            if result.is_game_over() {
                println!("{}", describe_result(result));
                break;
            }
        }

        if let Err(err) = engine.shutdown() {
            eprintln!("{}", err);
        }
    }
}
