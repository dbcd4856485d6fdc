use crate::board::{GameState, Symbol};

// Leaf count with make/unmake. A side that cannot move while the game is
// still on passes, and the pass counts as one move.
pub fn perft<B: GameState>(board: &mut B, side: Symbol, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = board.legal_moves(side);
    if moves.is_empty() {
        if !board.has_moves(side.opponent()) { return 1; }
        return perft(board, side.opponent(), depth - 1);
    }
    let mut nodes = 0u64;
    for mv in moves {
        if let Some(undo) = board.play(side, mv) {
            nodes += perft(board, side.opponent(), depth - 1);
            board.unplay(undo);
        }
    }
    nodes
}
