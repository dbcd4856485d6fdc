use super::{GameState, Move, Scores, Symbol};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_SIZE: usize = 8;
pub const MIN_SIZE: usize = 4;
pub const MAX_SIZE: usize = 16;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size {0} must be even and within {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidSize(usize),
    #[error("row {row} has {len} cells, expected {size}")]
    RowLength { row: usize, len: usize, size: usize },
    #[error("unexpected cell character {ch:?} in row {row}")]
    BadCell { row: usize, ch: char },
}

/// Cells flipped by one placement, enough to restore the board.
#[derive(Debug, Clone)]
pub struct Undo {
    placed: usize,
    flipped: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReversiBoard {
    size: usize,
    cells: Vec<Option<Symbol>>,
}

impl ReversiBoard {
    /// Empty board with the four centre discs preset.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        let mut board = Self::empty(size)?;
        board.place_centre();
        Ok(board)
    }

    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size % 2 != 0 || !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self { size, cells: vec![None; size * size] })
    }

    /// Parse rows of `X`, `O` and `.` (whitespace ignored).
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let mut board = Self::empty(rows.len())?;
        for (r, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != board.size {
                return Err(BoardError::RowLength { row: r, len: cells.len(), size: board.size });
            }
            for (c, ch) in cells.into_iter().enumerate() {
                let cell = match ch {
                    'X' | 'x' => Some(Symbol::X),
                    'O' | 'o' => Some(Symbol::O),
                    '.' | '-' => None,
                    other => return Err(BoardError::BadCell { row: r, ch: other }),
                };
                board.set(r, c, cell);
            }
        }
        Ok(board)
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Option<Symbol>) {
        let i = self.index(row, col);
        self.cells[i] = cell;
    }

    pub fn is_valid_move(&self, symbol: Symbol, mv: Move) -> bool {
        let (row, col) = (mv.row as usize, mv.col as usize);
        if row >= self.size || col >= self.size { return false; }
        if self.cells[self.index(row, col)].is_some() { return false; }
        DIRECTIONS.iter().any(|&(dr, dc)| self.run_length(symbol, row, col, dr, dc) > 0)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    fn index(&self, row: usize, col: usize) -> usize { row * self.size + col }

    fn place_centre(&mut self) {
        let m = self.size / 2;
        self.set(m - 1, m - 1, Some(Symbol::O));
        self.set(m, m, Some(Symbol::O));
        self.set(m - 1, m, Some(Symbol::X));
        self.set(m, m - 1, Some(Symbol::X));
    }

    /// Number of opponent discs bracketed from (row, col) in one direction,
    /// or 0 if the run is not closed by `symbol`.
    fn run_length(&self, symbol: Symbol, row: usize, col: usize, dr: i32, dc: i32) -> usize {
        let n = self.size as i32;
        let opponent = symbol.opponent();
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        let mut count = 0;
        while r >= 0 && r < n && c >= 0 && c < n {
            match self.cells[self.index(r as usize, c as usize)] {
                Some(s) if s == opponent => count += 1,
                Some(_) => return count,
                None => return 0,
            }
            r += dr;
            c += dc;
        }
        0
    }
}

impl Default for ReversiBoard {
    fn default() -> Self {
        let mut board = Self { size: DEFAULT_SIZE, cells: vec![None; DEFAULT_SIZE * DEFAULT_SIZE] };
        board.place_centre();
        board
    }
}

impl GameState for ReversiBoard {
    type Undo = Undo;

    fn size(&self) -> usize { self.size }

    fn occupant(&self, row: usize, col: usize) -> Option<Symbol> {
        self.cells[self.index(row, col)]
    }

    fn legal_moves(&self, symbol: Symbol) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let mv = Move::new(row as u8, col as u8);
                if self.is_valid_move(symbol, mv) { moves.push(mv); }
            }
        }
        moves
    }

    fn play(&mut self, symbol: Symbol, mv: Move) -> Option<Undo> {
        if !self.is_valid_move(symbol, mv) { return None; }
        let (row, col) = (mv.row as usize, mv.col as usize);
        let mut flipped = Vec::new();
        for &(dr, dc) in &DIRECTIONS {
            let run = self.run_length(symbol, row, col, dr, dc);
            for step in 1..=run as i32 {
                let r = (row as i32 + dr * step) as usize;
                let c = (col as i32 + dc * step) as usize;
                let i = self.index(r, c);
                self.cells[i] = Some(symbol);
                flipped.push(i);
            }
        }
        let placed = self.index(row, col);
        self.cells[placed] = Some(symbol);
        Some(Undo { placed, flipped })
    }

    fn unplay(&mut self, undo: Undo) {
        let Some(owner) = self.cells[undo.placed] else { return };
        let restored = owner.opponent();
        for i in undo.flipped { self.cells[i] = Some(restored); }
        self.cells[undo.placed] = None;
    }

    fn is_ongoing(&self) -> bool {
        self.has_moves(Symbol::X) || self.has_moves(Symbol::O)
    }

    fn has_moves(&self, symbol: Symbol) -> bool {
        (0..self.size).any(|row| {
            (0..self.size).any(|col| self.is_valid_move(symbol, Move::new(row as u8, col as u8)))
        })
    }

    fn scores(&self) -> Scores {
        let mut scores = Scores::default();
        for cell in &self.cells {
            match cell {
                Some(Symbol::X) => scores.x += 1,
                Some(Symbol::O) => scores.o += 1,
                None => {}
            }
        }
        scores
    }
}

impl fmt::Display for ReversiBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size { write!(f, "{:>2}", (col + 1) % 10)?; }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2} ", row + 1)?;
            for col in 0..self.size {
                let ch = match self.occupant(row, col) {
                    Some(Symbol::X) => 'X',
                    Some(Symbol::O) => 'O',
                    None => '.',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
