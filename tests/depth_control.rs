use revbot::board::{ReversiBoard, Symbol};
use revbot::search::depth::{DepthController, DepthLimits};
use revbot::search::{Evaluator, SearchConfig, Searcher};
use std::time::Duration;

fn ms(v: u64) -> Duration { Duration::from_millis(v) }

#[test]
fn steps_one_ply_per_decision() {
    let c = DepthController::new(true, DepthLimits::default());
    assert_eq!(c.next_depth(4, ms(3000)), 3);
    assert_eq!(c.next_depth(4, ms(500)), 5);
    assert_eq!(c.next_depth(4, ms(1500)), 4);
    // Thresholds are strict.
    assert_eq!(c.next_depth(4, ms(2600)), 4);
    assert_eq!(c.next_depth(4, ms(1000)), 4);
}

#[test]
fn respects_cap_and_floor() {
    let c = DepthController::new(true, DepthLimits::default());
    assert_eq!(c.next_depth(8, ms(10)), 8);
    assert_eq!(c.next_depth(1, ms(9000)), 1);
    let tight = DepthController::new(true, DepthLimits { slow_ms: 50, fast_ms: 10, max_depth: 2 });
    assert_eq!(tight.next_depth(1, ms(1)), 2);
    assert_eq!(tight.next_depth(2, ms(1)), 2);
}

#[test]
fn searcher_adapts_between_decisions() {
    let config = SearchConfig { adaptive_depth: true, ..SearchConfig::new(Symbol::X, 3, Evaluator::Combined) };
    let mut s = Searcher::new(config).unwrap();
    s.observe_elapsed(ms(5000));
    assert_eq!(s.depth(), 2);
    s.observe_elapsed(ms(5000));
    s.observe_elapsed(ms(5000));
    assert_eq!(s.depth(), 1);
    s.observe_elapsed(ms(1));
    assert_eq!(s.depth(), 2);
    // The configured depth is untouched.
    assert_eq!(s.config().depth, 3);
}

#[test]
fn fixed_depth_searcher_never_moves() {
    let mut s = Searcher::new(SearchConfig::new(Symbol::O, 2, Evaluator::Mobility)).unwrap();
    s.observe_elapsed(ms(60_000));
    let _ = s.choose_move(&ReversiBoard::default());
    assert_eq!(s.depth(), 2);
}
