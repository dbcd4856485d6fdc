use criterion::{criterion_group, criterion_main, Criterion, black_box};
use revbot::board::{ReversiBoard, Symbol};
use revbot::search::{Evaluator, SearchConfig, Searcher};

fn bench_search(c: &mut Criterion) {
    let b = ReversiBoard::default();
    c.bench_function("search_depth_4_startpos", |ben| {
        ben.iter(|| {
            let mut s = Searcher::new(SearchConfig::new(Symbol::X, 4, Evaluator::Combined)).unwrap();
            let r = s.search(black_box(&b));
            black_box(r.stats.nodes)
        })
    });
    c.bench_function("search_depth_4_no_pruning_startpos", |ben| {
        ben.iter(|| {
            let config = SearchConfig { pruning: false, ..SearchConfig::new(Symbol::X, 4, Evaluator::Combined) };
            let mut s = Searcher::new(config).unwrap();
            black_box(s.search(black_box(&b)).stats.nodes)
        })
    });
    c.bench_function("search_depth_5_beam_3_startpos", |ben| {
        ben.iter(|| {
            let config = SearchConfig { beam_width: Some(3), ..SearchConfig::new(Symbol::X, 5, Evaluator::Combined) };
            let mut s = Searcher::new(config).unwrap();
            black_box(s.search(black_box(&b)).stats.nodes)
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
