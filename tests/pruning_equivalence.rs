use revbot::board::{GameState, ReversiBoard, Symbol};
use revbot::search::ordering::BeamWeights;
use revbot::search::{Evaluator, SearchConfig, Searcher};

fn positions() -> Vec<(ReversiBoard, Symbol)> {
    let mut out = vec![(ReversiBoard::default(), Symbol::X)];
    let mut b = ReversiBoard::default();
    let mut side = Symbol::X;
    // Deterministic line: always take the last legal move.
    for ply in 0..16 {
        let moves = b.legal_moves(side);
        if let Some(&mv) = moves.last() {
            b.apply_move(side, mv);
        }
        side = side.opponent();
        if ply % 5 == 4 && b.has_moves(side) { out.push((b.clone(), side)); }
    }
    out
}

#[test]
fn pruning_does_not_change_result() {
    let evaluators = [Evaluator::Material, Evaluator::Mobility, Evaluator::Corner, Evaluator::Combined];
    let beams = [None, Some(2), Some(4)];
    for (b, side) in positions() {
        for depth in 1..=4 {
            for ev in evaluators {
                for beam in beams {
                    let base = SearchConfig { beam_width: beam, ..SearchConfig::new(side, depth, ev) };
                    let mut plain = Searcher::new(SearchConfig { pruning: false, ..base }).unwrap();
                    let mut pruned = Searcher::new(SearchConfig { pruning: true, ..base }).unwrap();
                    let a = plain.search(&b);
                    let p = pruned.search(&b);
                    assert_eq!(a.best_move, p.best_move, "depth {depth} eval {ev} beam {beam:?}");
                    assert_eq!(a.score, p.score, "depth {depth} eval {ev} beam {beam:?}");
                    assert!(p.stats.nodes <= a.stats.nodes);
                    assert_eq!(a.stats.cutoffs, 0);
                }
            }
        }
    }
}

#[test]
fn pruning_cuts_nodes_at_depth_four() {
    let b = ReversiBoard::default();
    let base = SearchConfig { use_tt: false, ..SearchConfig::new(Symbol::X, 4, Evaluator::Combined) };
    let a = Searcher::new(SearchConfig { pruning: false, ..base }).unwrap().search(&b);
    let p = Searcher::new(base).unwrap().search(&b);
    assert!(p.stats.nodes < a.stats.nodes, "pruned {} plain {}", p.stats.nodes, a.stats.nodes);
    assert!(p.stats.cutoffs > 0);
}

#[test]
fn graded_beam_still_returns_legal_moves() {
    let (b, side) = positions().pop().unwrap();
    let config = SearchConfig { beam_width: Some(1), beam_weights: BeamWeights::Graded, ..SearchConfig::new(side, 3, Evaluator::Combined) };
    let mut s = Searcher::new(config).unwrap();
    let mv = s.choose_move(&b).unwrap();
    assert!(b.is_valid_move(side, mv));
}

#[test]
fn seeded_shuffle_is_reproducible_and_keeps_the_score() {
    for (b, side) in positions() {
        for seed in 0..6u64 {
            let base = SearchConfig { shuffle_seed: Some(seed), ..SearchConfig::new(side, 4, Evaluator::Combined) };
            let first = Searcher::new(base).unwrap().search(&b);
            let again = Searcher::new(base).unwrap().search(&b);
            let mv = first.best_move.expect("side has legal moves");
            assert!(b.is_valid_move(side, mv), "seed {seed}: {mv} is illegal");
            assert_eq!(first.best_move, again.best_move, "seed {seed}");
            assert_eq!(first.score, again.score, "seed {seed}");

            // Visit order changes with pruning, the minimax value does not.
            let plain = Searcher::new(SearchConfig { pruning: false, ..base }).unwrap().search(&b);
            assert_eq!(plain.score, first.score, "seed {seed}");
        }
    }
}
