// Reversi engine: board oracle, minimax search, players and match driver
pub mod board;
pub mod game;
pub mod io;
pub mod perft;
pub mod players;
pub mod search;

pub use board::{GameState, Move, ReversiBoard, Scores, Symbol};
pub use search::{configure, Evaluator, SearchConfig, Searcher};
