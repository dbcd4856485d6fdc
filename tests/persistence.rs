use pretty_assertions::assert_eq;
use revbot::board::{ReversiBoard, Symbol};
use revbot::io::{self, BlobStore, FileStore, MemoryStore};
use revbot::search::{Evaluator, SearchConfig, Searcher};
use std::fs::remove_dir_all;

fn trained(symbol: Symbol, evaluator: Evaluator) -> Searcher {
    let mut s = Searcher::new(SearchConfig::new(symbol, 3, evaluator)).unwrap();
    s.search(&ReversiBoard::default());
    s
}

fn sorted_entries(s: &Searcher) -> Vec<(u64, u64)> {
    let mut v: Vec<_> = s.tt().entries().map(|e| (e.key, e.score.to_bits())).collect();
    v.sort();
    v
}

#[test]
fn memory_store_round_trip() {
    let s = trained(Symbol::X, Evaluator::Combined);
    let mut store = MemoryStore::new();
    s.save(&mut store).unwrap();
    assert_eq!(store.len(), 2);

    let restored = Searcher::with_store(*s.config(), &store).unwrap();
    assert_eq!(restored.zobrist().keys(), s.zobrist().keys());
    assert_eq!(sorted_entries(&restored), sorted_entries(&s));
}

#[test]
fn restored_cache_serves_the_next_search() {
    let s = trained(Symbol::X, Evaluator::Combined);
    let mut store = MemoryStore::new();
    s.save(&mut store).unwrap();
    let mut restored = Searcher::with_store(*s.config(), &store).unwrap();
    let res = restored.search(&ReversiBoard::default());
    assert_eq!(res.stats.tt_hits, res.stats.leaves);
}

#[test]
fn other_evaluator_keeps_table_but_not_cache() {
    let s = trained(Symbol::O, Evaluator::Combined);
    let mut store = MemoryStore::new();
    s.save(&mut store).unwrap();
    let other = Searcher::with_store(SearchConfig::new(Symbol::O, 3, Evaluator::Corner), &store).unwrap();
    assert_eq!(other.zobrist().keys(), s.zobrist().keys());
    assert!(other.tt().is_empty());
}

#[test]
fn symbols_are_stored_separately() {
    let mut store = MemoryStore::new();
    trained(Symbol::X, Evaluator::Combined).save(&mut store).unwrap();
    let o = Searcher::with_store(SearchConfig::new(Symbol::O, 3, Evaluator::Combined), &store).unwrap();
    assert!(o.tt().is_empty());
}

#[test]
fn corrupt_blobs_fall_back_to_fresh_state() {
    let mut store = MemoryStore::new();
    store.save(&io::zobrist_key(Symbol::X), b"REVZB001").unwrap();
    store.save(&io::tt_key(Symbol::X), b"not a cache").unwrap();
    let s = Searcher::with_store(SearchConfig::default(), &store).unwrap();
    assert!(s.tt().is_empty());
    assert_eq!(s.zobrist().size(), 8);
}

#[test]
fn file_store_round_trip() {
    let dir = std::path::Path::new("target/revbot_store_test");
    let _ = remove_dir_all(dir);
    let mut store = FileStore::new(dir);
    assert_eq!(store.load("X_tt").unwrap(), None);

    let s = trained(Symbol::X, Evaluator::Mobility);
    s.save(&mut store).unwrap();
    assert!(dir.join("X_tt.bin").exists());
    assert!(dir.join("X_zobrist.bin").exists());

    let restored = Searcher::with_store(*s.config(), &FileStore::new(dir)).unwrap();
    assert_eq!(sorted_entries(&restored), sorted_entries(&s));
    let _ = remove_dir_all(dir);
}
