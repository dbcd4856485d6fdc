use crate::board::{GameState, Symbol};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Per-(cell, occupant) random keys for one board size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZobristTable {
    size: usize,
    keys: Vec<u64>,
}

impl ZobristTable {
    /// Fresh table from entropy; hashes are not reproducible across runs
    /// unless the table itself is persisted.
    pub fn new(size: usize) -> Self {
        Self::generate(size, &mut SmallRng::from_entropy())
    }

    pub fn with_seed(size: usize, seed: u64) -> Self {
        Self::generate(size, &mut SmallRng::seed_from_u64(seed))
    }

    fn generate(size: usize, rng: &mut SmallRng) -> Self {
        let keys = (0..size * size * 2).map(|_| rng.gen::<u64>()).collect();
        Self { size, keys }
    }

    /// Rebuild from raw keys; `None` if the key count does not match the size.
    pub fn from_keys(size: usize, keys: Vec<u64>) -> Option<Self> {
        if keys.len() != size * size * 2 { return None; }
        Some(Self { size, keys })
    }

    pub fn size(&self) -> usize { self.size }
    pub fn keys(&self) -> &[u64] { &self.keys }

    pub fn key(&self, row: usize, col: usize, symbol: Symbol) -> u64 {
        self.keys[(row * self.size + col) * 2 + symbol.index()]
    }

    /// XOR of the keys of every occupied cell. Empty cells contribute nothing,
    /// so equal contents hash equally whatever the move order.
    pub fn hash<B: GameState>(&self, board: &B) -> u64 {
        debug_assert_eq!(board.size(), self.size, "zobrist table sized for a different board");
        let n = board.size().min(self.size);
        let mut key = 0u64;
        for row in 0..n {
            for col in 0..n {
                if let Some(s) = board.occupant(row, col) {
                    key ^= self.key(row, col, s);
                }
            }
        }
        key
    }
}
