use crate::board::{GameState, Move, Symbol};
use crate::board::reversi::DEFAULT_SIZE;
use crate::io::{self, BlobStore};
use crate::search::config::{ConfigError, SearchConfig};
use crate::search::depth::DepthController;
use crate::search::noise::MoveShuffler;
use crate::search::ordering::{self, WeightTable};
use crate::search::tt::{Entry, Tt};
use crate::search::zobrist::ZobristTable;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Root score from the searching symbol's point of view.
    pub score: f64,
    pub depth: u32,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Depth-bounded minimax with optional alpha-beta pruning, beam selection,
/// a leaf-evaluation cache and per-decision depth adaptation.
///
/// A searcher belongs to one player. Its cache and zobrist table persist
/// across decisions and games; nothing here is meant to be shared between
/// concurrently running searches.
pub struct Searcher {
    config: SearchConfig,
    depth: u32,
    target: u32,
    zobrist: ZobristTable,
    tt: Tt,
    weights: WeightTable,
    shuffler: Option<MoveShuffler>,
    controller: DepthController,
    stats: SearchStats,
}

impl Default for Searcher {
    fn default() -> Self {
        let config = SearchConfig::default();
        Self::build(config, Self::fresh_zobrist(&config, DEFAULT_SIZE), Tt::new())
    }
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, Self::fresh_zobrist(&config, DEFAULT_SIZE), Tt::new()))
    }

    /// Construct with the zobrist table and cache previously saved under this
    /// player's symbol. Anything missing or unreadable is replaced with fresh
    /// state; a cache is only reused together with the table it was keyed by.
    pub fn with_store(config: SearchConfig, store: &dyn BlobStore) -> Result<Self, ConfigError> {
        config.validate()?;
        let (zobrist, tt) = match io::load_zobrist(store, config.symbol) {
            Some(zt) => {
                let tt = io::load_tt(store, config.symbol, config.evaluator).unwrap_or_default();
                (zt, tt)
            }
            None => (Self::fresh_zobrist(&config, DEFAULT_SIZE), Tt::new()),
        };
        debug!("searcher {} restored {} cached evaluations", config.symbol, tt.len());
        Ok(Self::build(config, zobrist, tt))
    }

    fn build(config: SearchConfig, zobrist: ZobristTable, tt: Tt) -> Self {
        let weights = WeightTable::new(config.beam_weights, zobrist.size());
        Self {
            config,
            depth: config.depth,
            target: config.depth,
            zobrist,
            tt,
            weights,
            shuffler: config.shuffle_seed.map(MoveShuffler::new),
            controller: DepthController::new(config.adaptive_depth, config.depth_limits),
            stats: SearchStats::default(),
        }
    }

    fn fresh_zobrist(config: &SearchConfig, size: usize) -> ZobristTable {
        match config.zobrist_seed {
            Some(seed) => ZobristTable::with_seed(size, seed),
            None => ZobristTable::new(size),
        }
    }

    /// Persist the zobrist table and cache under this player's symbol.
    pub fn save(&self, store: &mut dyn BlobStore) -> anyhow::Result<()> {
        io::save_zobrist(store, self.config.symbol, &self.zobrist)?;
        io::save_tt(store, self.config.symbol, self.config.evaluator, &self.tt)?;
        Ok(())
    }

    pub fn config(&self) -> &SearchConfig { &self.config }
    pub fn symbol(&self) -> Symbol { self.config.symbol }
    /// Working depth for the next decision.
    pub fn depth(&self) -> u32 { self.depth }
    pub fn tt(&self) -> &Tt { &self.tt }
    pub fn zobrist(&self) -> &ZobristTable { &self.zobrist }

    /// Pick a move for the configured symbol, then let the depth controller
    /// react to how long that took. Returns `None` only when the symbol has
    /// no legal move, which callers are expected to check first.
    pub fn choose_move<B: GameState + Clone>(&mut self, board: &B) -> Option<Move> {
        let result = self.search(board);
        self.observe_elapsed(result.elapsed);
        result.best_move
    }

    /// Feed one decision's latency to the depth controller.
    pub fn observe_elapsed(&mut self, elapsed: Duration) {
        let next = self.controller.next_depth(self.depth, elapsed);
        if next != self.depth {
            info!("searcher {}: depth {} -> {} after {:.2?}", self.config.symbol, self.depth, next, elapsed);
            self.depth = next;
        }
    }

    /// Search at the current working depth without adapting it.
    pub fn search<B: GameState + Clone>(&mut self, board: &B) -> SearchResult {
        self.search_depth(board, self.depth)
    }

    pub fn search_depth<B: GameState + Clone>(&mut self, board: &B, depth: u32) -> SearchResult {
        let start = Instant::now();
        self.stats = SearchStats::default();
        self.target = depth.max(1);
        self.ensure_tables(board.size());

        let symbol = self.config.symbol;
        let mut scratch = board.clone();
        let moves = self.candidates(&mut scratch, symbol);

        let mut best_move: Option<Move> = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        for mv in moves {
            let Some(undo) = scratch.play(symbol, mv) else { continue };
            let score = self.minimax(&mut scratch, 1, false, alpha, beta);
            scratch.unplay(undo);
            // Strict comparison: the first of equal scores is kept.
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if self.config.pruning && best_score > alpha { alpha = best_score; }
        }
        if best_move.is_none() {
            best_score = self.evaluate_leaf(&scratch);
        }

        let elapsed = start.elapsed();
        debug!(
            "searcher {} depth {}: best {:?} score {:.2} nodes {} leaves {} tt_hits {} cutoffs {} in {:.2?}",
            symbol, self.target, best_move.map(|m| m.to_string()), best_score,
            self.stats.nodes, self.stats.leaves, self.stats.tt_hits, self.stats.cutoffs, elapsed
        );
        SearchResult { best_move, score: best_score, depth: self.target, stats: self.stats, elapsed }
    }

    fn minimax<B: GameState>(&mut self, board: &mut B, depth: u32, maximizing: bool, mut alpha: f64, mut beta: f64) -> f64 {
        self.stats.nodes += 1;
        if depth >= self.target || !board.is_ongoing() {
            return self.evaluate_leaf(board);
        }
        let side = if maximizing { self.config.symbol } else { self.config.symbol.opponent() };
        let moves = self.candidates(board, side);
        // Side to move must pass: nothing to branch on here.
        if moves.is_empty() {
            return self.evaluate_leaf(board);
        }

        let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        for mv in moves {
            let Some(undo) = board.play(side, mv) else { continue };
            let score = self.minimax(board, depth + 1, !maximizing, alpha, beta);
            board.unplay(undo);
            if maximizing {
                best = best.max(score);
            } else {
                best = best.min(score);
            }
            if self.config.pruning {
                if maximizing { alpha = alpha.max(best); } else { beta = beta.min(best); }
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }
        best
    }

    fn candidates<B: GameState>(&mut self, board: &mut B, side: Symbol) -> Vec<Move> {
        let mut moves = board.legal_moves(side);
        if let Some(shuffler) = self.shuffler.as_mut() {
            shuffler.shuffle(&mut moves);
        }
        if let Some(width) = self.config.beam_width {
            moves = ordering::select(board, &moves, side, width, &self.weights);
        }
        moves
    }

    fn evaluate_leaf<B: GameState>(&mut self, board: &B) -> f64 {
        self.stats.leaves += 1;
        let symbol = self.config.symbol;
        if !self.config.use_tt {
            return self.config.evaluator.evaluate(board, symbol);
        }
        let key = self.zobrist.hash(board);
        if let Some(score) = self.tt.get(key) {
            self.stats.tt_hits += 1;
            return score;
        }
        let score = self.config.evaluator.evaluate(board, symbol);
        self.tt.put(Entry { key, score });
        score
    }

    // Tables are sized per board; a size change invalidates every cached key.
    fn ensure_tables(&mut self, size: usize) {
        if self.zobrist.size() != size {
            if !self.tt.is_empty() {
                warn!("searcher {}: board size changed {} -> {}, dropping {} cached evaluations",
                      self.config.symbol, self.zobrist.size(), size, self.tt.len());
            }
            self.zobrist = Self::fresh_zobrist(&self.config, size);
            self.tt.clear();
        }
        if self.weights.size() != size {
            self.weights = WeightTable::new(self.config.beam_weights, size);
        }
    }
}
