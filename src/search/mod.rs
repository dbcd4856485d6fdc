pub mod alphabeta;
pub mod config;
pub mod depth;
pub mod eval;
pub mod noise;
pub mod ordering;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchResult, SearchStats, Searcher};
pub use config::{ConfigError, SearchConfig};
pub use eval::Evaluator;

use crate::board::Symbol;

/// Build a searcher from the common knobs; everything else takes its default.
pub fn configure(
    symbol: Symbol,
    depth: u32,
    evaluator: Evaluator,
    pruning: bool,
    beam_width: Option<usize>,
    adaptive_depth: bool,
) -> Result<Searcher, ConfigError> {
    let config = SearchConfig { pruning, beam_width, adaptive_depth, ..SearchConfig::new(symbol, depth, evaluator) };
    Searcher::new(config)
}
