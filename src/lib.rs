pub mod alpha_beta_searcher;
pub mod atomic;
pub mod board;
pub mod chess_move;
pub mod evaluate;
pub mod game;
pub mod move_generator;
