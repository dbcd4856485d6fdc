//! Beam selection: narrow a candidate list to the K moves whose resulting
//! positions score best on a static positional weight table.
//!
//! This is a lossy filter. The weight table only looks at which cells the
//! mover holds after the move, so it can drop the move a deeper search would
//! prefer. The search accepts that in exchange for a smaller branching factor.

use crate::board::{GameState, Move, Symbol};
use serde::{Deserialize, Serialize};

const CORNER: i32 = 100;
const EDGE: i32 = 25;
const INTERIOR: i32 = 1;
// Inner rings of the graded table, outermost first.
const GRADED_RINGS: [i32; 3] = [10, 5, 1];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BeamWeights {
    /// Corners 100, other edge cells 25, everything else 1.
    #[default]
    CornersEdges,
    /// Corners and edges as above, then 10 / 5 / 1 moving inwards.
    Graded,
}

/// A per-cell weight map for one board size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightTable {
    size: usize,
    weights: Vec<i32>,
}

impl WeightTable {
    pub fn new(kind: BeamWeights, size: usize) -> Self {
        let last = size.saturating_sub(1);
        let mut weights = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let on_row_edge = row == 0 || row == last;
                let on_col_edge = col == 0 || col == last;
                let w = if on_row_edge && on_col_edge {
                    CORNER
                } else if on_row_edge || on_col_edge {
                    EDGE
                } else {
                    match kind {
                        BeamWeights::CornersEdges => INTERIOR,
                        BeamWeights::Graded => {
                            let ring = row.min(col).min(last - row).min(last - col);
                            GRADED_RINGS[(ring - 1).min(GRADED_RINGS.len() - 1)]
                        }
                    }
                };
                weights.push(w);
            }
        }
        Self { size, weights }
    }

    pub fn size(&self) -> usize { self.size }

    pub fn weight(&self, row: usize, col: usize) -> i32 { self.weights[row * self.size + col] }

    /// Sum of weights over cells held by `symbol`.
    pub fn score<B: GameState>(&self, board: &B, symbol: Symbol) -> i32 {
        let n = board.size().min(self.size);
        let mut total = 0;
        for row in 0..n {
            for col in 0..n {
                if board.occupant(row, col) == Some(symbol) { total += self.weight(row, col); }
            }
        }
        total
    }
}

/// Keep the `beam_width` candidates whose resulting position scores highest
/// for `symbol`. Ties keep enumeration order. The board is restored before
/// returning.
pub fn select<B: GameState>(
    board: &mut B,
    candidates: &[Move],
    symbol: Symbol,
    beam_width: usize,
    table: &WeightTable,
) -> Vec<Move> {
    let mut scored: Vec<(Move, i32)> = Vec::with_capacity(candidates.len());
    for &mv in candidates {
        let Some(undo) = board.play(symbol, mv) else { continue };
        scored.push((mv, table.score(board, symbol)));
        board.unplay(undo);
    }
    // Stable sort: equal scores stay in first-seen order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().take(beam_width).map(|(mv, _)| mv).collect()
}
