use crate::board::{GameState, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Static evaluation functions, all scored from `symbol`'s point of view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Evaluator {
    Material,
    Difference,
    Mobility,
    Corner,
    #[default]
    Combined,
}

impl Evaluator {
    pub fn evaluate<B: GameState>(self, board: &B, symbol: Symbol) -> f64 {
        match self {
            Evaluator::Material => material(board, symbol),
            Evaluator::Difference => difference_heuristic(board, symbol),
            Evaluator::Mobility => mobility_heuristic(board, symbol),
            Evaluator::Corner => corner_heuristic(board, symbol),
            Evaluator::Combined => combined_heuristic(board, symbol),
        }
    }

    pub(crate) fn tag(self) -> u8 {
        match self {
            Evaluator::Material => 0,
            Evaluator::Difference => 1,
            Evaluator::Mobility => 2,
            Evaluator::Corner => 3,
            Evaluator::Combined => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Evaluator::Material => "material",
            Evaluator::Difference => "difference",
            Evaluator::Mobility => "mobility",
            Evaluator::Corner => "corner",
            Evaluator::Combined => "combined",
        }
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Evaluator {
    type Err = crate::search::ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "material" | "simple" => Ok(Evaluator::Material),
            "difference" => Ok(Evaluator::Difference),
            "mobility" => Ok(Evaluator::Mobility),
            "corner" | "corners" => Ok(Evaluator::Corner),
            "combined" => Ok(Evaluator::Combined),
            _ => Err(crate::search::ConfigError::UnknownEvaluator(s.to_string())),
        }
    }
}

// 100 * (a - b) / (a + b), defined as 0 when both are 0.
fn percent_diff(mine: u32, theirs: u32) -> f64 {
    let total = mine + theirs;
    if total == 0 { return 0.0; }
    100.0 * (mine as f64 - theirs as f64) / total as f64
}

/// Disc gap when ahead, 0 when level, -1 when behind.
pub fn material<B: GameState>(board: &B, symbol: Symbol) -> f64 {
    let scores = board.scores();
    let mine = scores.get(symbol);
    let theirs = scores.get(symbol.opponent());
    if mine > theirs {
        (mine - theirs) as f64
    } else if mine == theirs {
        0.0
    } else {
        -1.0
    }
}

pub fn difference_heuristic<B: GameState>(board: &B, symbol: Symbol) -> f64 {
    let scores = board.scores();
    percent_diff(scores.get(symbol), scores.get(symbol.opponent()))
}

/// Percentage gap in legal-move counts; 0 once the game is over.
pub fn mobility_heuristic<B: GameState>(board: &B, symbol: Symbol) -> f64 {
    if !board.is_ongoing() { return 0.0; }
    let mine = board.legal_moves(symbol).len() as u32;
    let theirs = board.legal_moves(symbol.opponent()).len() as u32;
    percent_diff(mine, theirs)
}

pub fn corner_heuristic<B: GameState>(board: &B, symbol: Symbol) -> f64 {
    let last = board.size() - 1;
    let corners = [(0, 0), (0, last), (last, 0), (last, last)];
    let mut mine = 0;
    let mut theirs = 0;
    for (r, c) in corners {
        match board.occupant(r, c) {
            Some(s) if s == symbol => mine += 1,
            Some(_) => theirs += 1,
            None => {}
        }
    }
    percent_diff(mine, theirs)
}

pub fn combined_heuristic<B: GameState>(board: &B, symbol: Symbol) -> f64 {
    difference_heuristic(board, symbol) + mobility_heuristic(board, symbol) + corner_heuristic(board, symbol)
}
