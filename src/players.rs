use crate::board::{GameState, Move, ReversiBoard, Symbol};
use crate::io::BlobStore;
use crate::search::{SearchConfig, Searcher, ConfigError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Anything the game driver can ask for a move.
pub trait Player {
    fn symbol(&self) -> Symbol;
    fn name(&self) -> String;
    /// Called only when `symbol()` has at least one legal move. `None` means
    /// the player gave up (e.g. closed input).
    fn get_move(&mut self, board: &ReversiBoard) -> Option<Move>;
}

/// Minimax player backed by a [`Searcher`].
pub struct EnginePlayer {
    searcher: Searcher,
}

impl EnginePlayer {
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        Ok(Self { searcher: Searcher::new(config)? })
    }

    pub fn with_store(config: SearchConfig, store: &dyn BlobStore) -> Result<Self, ConfigError> {
        Ok(Self { searcher: Searcher::with_store(config, store)? })
    }

    pub fn searcher(&self) -> &Searcher { &self.searcher }
    pub fn searcher_mut(&mut self) -> &mut Searcher { &mut self.searcher }
}

impl Player for EnginePlayer {
    fn symbol(&self) -> Symbol { self.searcher.symbol() }

    fn name(&self) -> String {
        let c = self.searcher.config();
        let mut name = format!("minimax(depth={}, eval={}", self.searcher.depth(), c.evaluator);
        if c.pruning { name.push_str(", ab"); }
        if let Some(w) = c.beam_width { name.push_str(&format!(", beam={w}")); }
        if c.adaptive_depth { name.push_str(", adaptive"); }
        name.push(')');
        name
    }

    fn get_move(&mut self, board: &ReversiBoard) -> Option<Move> {
        self.searcher.choose_move(board)
    }
}

/// Uniformly random legal moves from a seeded generator.
pub struct RandomPlayer {
    symbol: Symbol,
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new(symbol: Symbol, seed: u64) -> Self {
        Self { symbol, rng: SmallRng::seed_from_u64(seed) }
    }
}

impl Player for RandomPlayer {
    fn symbol(&self) -> Symbol { self.symbol }
    fn name(&self) -> String { "random".to_string() }

    fn get_move(&mut self, board: &ReversiBoard) -> Option<Move> {
        let moves = board.legal_moves(self.symbol);
        if moves.is_empty() { None } else { Some(moves[self.rng.gen_range(0..moves.len())]) }
    }
}

/// One-ply greedy: take the move that leaves the most of our discs.
pub struct GreedyPlayer {
    symbol: Symbol,
}

impl GreedyPlayer {
    pub fn new(symbol: Symbol) -> Self { Self { symbol } }
}

impl Player for GreedyPlayer {
    fn symbol(&self) -> Symbol { self.symbol }
    fn name(&self) -> String { "greedy".to_string() }

    fn get_move(&mut self, board: &ReversiBoard) -> Option<Move> {
        let mut scratch = board.clone();
        let mut best: Option<(u32, Move)> = None;
        for mv in board.legal_moves(self.symbol) {
            let Some(undo) = scratch.play(self.symbol, mv) else { continue };
            let score = scratch.scores().get(self.symbol);
            scratch.unplay(undo);
            // Later moves win ties.
            if best.map_or(true, |(s, _)| score >= s) { best = Some((score, mv)); }
        }
        best.map(|(_, mv)| mv)
    }
}
