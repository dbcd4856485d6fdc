pub mod reversi;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use reversi::{BoardError, ReversiBoard};

/// One of the two sides. Empty cells are read as `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    pub fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Symbol::X => 0,
            Symbol::O => 1,
        }
    }

    pub(crate) fn from_index(i: u8) -> Option<Symbol> {
        match i {
            0 => Some(Symbol::X),
            1 => Some(Symbol::O),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

impl FromStr for Symbol {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Symbol::X),
            "o" => Ok(Symbol::O),
            _ => Err(format!("unknown symbol: {s} (use 'x' or 'o')")),
        }
    }
}

/// A placement coordinate, zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    pub const fn new(row: u8, col: u8) -> Self { Self { row, col } }
}

// Rendered 1-based as "<row><col>", the same form the human prompt accepts.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row + 1, self.col + 1)
    }
}

/// Disc counts for both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
}

impl Scores {
    pub fn get(&self, symbol: Symbol) -> u32 {
        match symbol {
            Symbol::X => self.x,
            Symbol::O => self.o,
        }
    }
}

/// The rules oracle the search engine consumes.
///
/// Turn order is not stored: every query takes the acting symbol. `play`
/// returns an undo token so callers can explore a branch and restore the
/// exact prior state with `unplay`.
pub trait GameState {
    type Undo;

    fn size(&self) -> usize;
    fn occupant(&self, row: usize, col: usize) -> Option<Symbol>;
    fn legal_moves(&self, symbol: Symbol) -> Vec<Move>;
    /// Returns `None` and leaves the board untouched if the move is illegal.
    fn play(&mut self, symbol: Symbol, mv: Move) -> Option<Self::Undo>;
    fn unplay(&mut self, undo: Self::Undo);
    /// True while at least one side can still move.
    fn is_ongoing(&self) -> bool;
    fn scores(&self) -> Scores;

    fn apply_move(&mut self, symbol: Symbol, mv: Move) -> bool {
        self.play(symbol, mv).is_some()
    }

    fn has_moves(&self, symbol: Symbol) -> bool {
        !self.legal_moves(symbol).is_empty()
    }
}
