use revbot::board::{GameState, Move, ReversiBoard, Scores, Symbol};
use revbot::game::{compare_players, play_game, play_game_from, GameError, MatchParams, Outcome};
use revbot::players::{EnginePlayer, GreedyPlayer, Player, RandomPlayer};
use revbot::search::{Evaluator, SearchConfig};

#[test]
fn full_game_terminates_with_consistent_stats() {
    let mut x = EnginePlayer::new(SearchConfig::new(Symbol::X, 2, Evaluator::Combined)).unwrap();
    let mut o = RandomPlayer::new(Symbol::O, 11);
    let record = play_game(&mut x, &mut o, 6, false).unwrap();
    assert!(!record.board.is_ongoing());
    assert_eq!(record.scores, record.board.scores());
    assert!(record.scores.x + record.scores.o <= 36);
    let made = record.x.moves_made + record.o.moves_made;
    assert_eq!(made as usize, record.moves.len());
    // Four centre discs plus one per placement.
    assert_eq!(record.moves.len() as u32 + 4, record.scores.x + record.scores.o);
    for (symbol, stats) in [(Symbol::X, &record.x), (Symbol::O, &record.o)] {
        assert!(stats.max_decision_time <= stats.decision_time, "{symbol}");
    }
    match record.winner() {
        Outcome::Win(Symbol::X) => assert!(record.scores.x > record.scores.o),
        Outcome::Win(Symbol::O) => assert!(record.scores.o > record.scores.x),
        Outcome::Tie => assert_eq!(record.scores.x, record.scores.o),
    }
}

#[test]
fn every_recorded_move_replays_legally() {
    let mut x = GreedyPlayer::new(Symbol::X);
    let mut o = RandomPlayer::new(Symbol::O, 3);
    let record = play_game(&mut x, &mut o, 8, false).unwrap();
    let mut replay = ReversiBoard::default();
    for &(symbol, mv) in &record.moves {
        assert!(replay.apply_move(symbol, mv), "{symbol} {mv}");
    }
    assert_eq!(replay, record.board);
}

#[test]
fn game_resumes_from_a_loaded_position() {
    // O has no move; X fills (3,3) and flips the three O discs.
    let board = ReversiBoard::from_rows(&[
        "XXXX",
        "XXXX",
        "XXOO",
        "XXO.",
    ]).unwrap();
    let mut o = RandomPlayer::new(Symbol::O, 4);
    let mut x = GreedyPlayer::new(Symbol::X);
    let record = play_game_from(&mut o, &mut x, board, false).unwrap();
    assert_eq!(record.moves, vec![(Symbol::X, Move::new(3, 3))]);
    assert_eq!(record.scores, Scores { x: 16, o: 0 });
    assert_eq!(record.o.moves_made, 0);
    assert_eq!(record.winner(), Outcome::Win(Symbol::X));
    assert!(!record.board.is_ongoing());
}

#[test]
fn loaded_finished_position_ends_immediately() {
    let board = ReversiBoard::from_rows(&["XXXX", "XOOX", "XOOX", "XXXX"]).unwrap();
    let mut x = RandomPlayer::new(Symbol::X, 1);
    let mut o = RandomPlayer::new(Symbol::O, 2);
    let record = play_game_from(&mut x, &mut o, board.clone(), false).unwrap();
    assert!(record.moves.is_empty());
    assert_eq!(record.board, board);
    assert_eq!(record.scores, Scores { x: 12, o: 4 });
}

#[test]
fn same_symbol_is_rejected() {
    let mut a = RandomPlayer::new(Symbol::X, 1);
    let mut b = GreedyPlayer::new(Symbol::X);
    assert!(matches!(play_game(&mut a, &mut b, 8, false), Err(GameError::SameSymbol(Symbol::X))));
}

#[test]
fn invalid_board_size_is_reported() {
    let mut a = RandomPlayer::new(Symbol::X, 1);
    let mut b = RandomPlayer::new(Symbol::O, 2);
    assert!(matches!(play_game(&mut a, &mut b, 5, false), Err(GameError::Board(_))));
}

#[test]
fn compare_summary_adds_up() {
    let mut x = EnginePlayer::new(SearchConfig { beam_width: Some(3), ..SearchConfig::new(Symbol::X, 2, Evaluator::Corner) }).unwrap();
    let mut o = RandomPlayer::new(Symbol::O, 5);
    let name = x.name();
    let mut seen = 0;
    let params = MatchParams { games: 4, board_size: 6 };
    let summary = compare_players(&mut x, &mut o, params, |gi, _| {
        assert_eq!(gi, seen);
        seen += 1;
    }).unwrap();
    assert_eq!(seen, 4);
    assert_eq!(summary.games, 4);
    assert_eq!(summary.x.wins + summary.o.wins + summary.ties, 4);
    assert_eq!(summary.x.name, name);
    assert_eq!(summary.o.name, "random");
    assert!(summary.x.average_score + summary.o.average_score <= 36.0);
    assert!(summary.x.max_decision_secs + 1e-9 >= summary.x.average_decision_secs);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["games"], 4);
}
