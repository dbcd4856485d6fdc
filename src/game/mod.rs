use crate::board::{BoardError, GameState, Move, ReversiBoard, Scores, Symbol};
use crate::players::Player;
use log::{info, warn};
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Decisions slower than this are reported.
const SLOW_DECISION: Duration = Duration::from_millis(2500);

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("both players use symbol {0}")]
    SameSymbol(Symbol),
    #[error("{symbol} attempted illegal move {mv}")]
    IllegalMove { symbol: Symbol, mv: Move },
    #[error("{0} had a legal move but chose none")]
    NoMoveChosen(Symbol),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win(Symbol),
    Tie,
}

/// Per-symbol timing and move counts for one game.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct SideStats {
    pub moves_made: u32,
    pub decision_time: Duration,
    pub max_decision_time: Duration,
}

#[derive(Clone, Debug)]
pub struct GameRecord {
    pub moves: Vec<(Symbol, Move)>,
    pub board: ReversiBoard,
    pub scores: Scores,
    pub x: SideStats,
    pub o: SideStats,
}

impl GameRecord {
    pub fn winner(&self) -> Outcome {
        match self.scores.x.cmp(&self.scores.o) {
            std::cmp::Ordering::Greater => Outcome::Win(Symbol::X),
            std::cmp::Ordering::Less => Outcome::Win(Symbol::O),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn side(&self, symbol: Symbol) -> &SideStats {
        match symbol {
            Symbol::X => &self.x,
            Symbol::O => &self.o,
        }
    }

    fn side_mut(&mut self, symbol: Symbol) -> &mut SideStats {
        match symbol {
            Symbol::X => &mut self.x,
            Symbol::O => &mut self.o,
        }
    }
}

/// Play one game on a fresh board of `board_size`, `first` moving first.
pub fn play_game(
    first: &mut dyn Player,
    second: &mut dyn Player,
    board_size: usize,
    show_status: bool,
) -> Result<GameRecord, GameError> {
    if first.symbol() == second.symbol() {
        return Err(GameError::SameSymbol(first.symbol()));
    }
    play_game_from(first, second, ReversiBoard::new(board_size)?, show_status)
}

/// Play out a game from `board`, e.g. a position loaded from disk. A player
/// without a legal move is skipped; the game ends when neither can move.
pub fn play_game_from(
    first: &mut dyn Player,
    second: &mut dyn Player,
    board: ReversiBoard,
    show_status: bool,
) -> Result<GameRecord, GameError> {
    if first.symbol() == second.symbol() {
        return Err(GameError::SameSymbol(first.symbol()));
    }
    let mut record = GameRecord {
        moves: Vec::new(),
        scores: board.scores(),
        board,
        x: SideStats::default(),
        o: SideStats::default(),
    };
    if show_status { println!("{}", record.board); }
    while record.board.is_ongoing() {
        play_turn(first, &mut record, show_status)?;
        play_turn(second, &mut record, show_status)?;
    }
    record.scores = record.board.scores();
    if show_status {
        println!("Game over, final scores: X {}  O {}", record.scores.x, record.scores.o);
    }
    Ok(record)
}

fn play_turn(player: &mut dyn Player, record: &mut GameRecord, show_status: bool) -> Result<(), GameError> {
    let symbol = player.symbol();
    if !record.board.has_moves(symbol) {
        if show_status && record.board.is_ongoing() { println!("{symbol} can't move."); }
        return Ok(());
    }
    // Players get their own copy; the driver's board is only changed here.
    let view = record.board.clone();
    let start = Instant::now();
    let choice = player.get_move(&view);
    let elapsed = start.elapsed();
    if elapsed > SLOW_DECISION {
        warn!("{} ({}) took {:.2?} to move", symbol, player.name(), elapsed);
    }
    let stats = record.side_mut(symbol);
    stats.moves_made += 1;
    stats.decision_time += elapsed;
    stats.max_decision_time = stats.max_decision_time.max(elapsed);

    let mv = choice.ok_or(GameError::NoMoveChosen(symbol))?;
    if !record.board.apply_move(symbol, mv) {
        return Err(GameError::IllegalMove { symbol, mv });
    }
    record.moves.push((symbol, mv));
    if show_status {
        let s = record.board.scores();
        println!("{symbol} plays {mv}\n{}X: {}\tO: {}", record.board, s.x, s.o);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
pub struct MatchParams {
    pub games: usize,
    pub board_size: usize,
}

impl Default for MatchParams {
    fn default() -> Self { Self { games: 10, board_size: crate::board::reversi::DEFAULT_SIZE } }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SideSummary {
    pub name: String,
    pub wins: usize,
    pub average_score: f64,
    pub moves: u64,
    pub average_decision_secs: f64,
    pub max_decision_secs: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct MatchSummary {
    pub games: usize,
    pub ties: usize,
    pub x: SideSummary,
    pub o: SideSummary,
}

impl MatchSummary {
    pub fn side(&self, symbol: Symbol) -> &SideSummary {
        match symbol {
            Symbol::X => &self.x,
            Symbol::O => &self.o,
        }
    }

    fn side_mut(&mut self, symbol: Symbol) -> &mut SideSummary {
        match symbol {
            Symbol::X => &mut self.x,
            Symbol::O => &mut self.o,
        }
    }
}

/// Play `params.games` games between two players, alternating who moves
/// first, and aggregate the results. `on_game` sees every finished game.
pub fn compare_players(
    p1: &mut dyn Player,
    p2: &mut dyn Player,
    params: MatchParams,
    mut on_game: impl FnMut(usize, &GameRecord),
) -> Result<MatchSummary, GameError> {
    let mut summary = MatchSummary { games: params.games, ..MatchSummary::default() };
    summary.side_mut(p1.symbol()).name = p1.name();
    summary.side_mut(p2.symbol()).name = p2.name();

    let mut total_time = [Duration::ZERO; 2];
    let mut max_time = [Duration::ZERO; 2];
    for gi in 0..params.games {
        let record = if gi % 2 == 0 {
            play_game(p1, p2, params.board_size, false)?
        } else {
            play_game(p2, p1, params.board_size, false)?
        };
        match record.winner() {
            Outcome::Win(s) => summary.side_mut(s).wins += 1,
            Outcome::Tie => summary.ties += 1,
        }
        for symbol in [Symbol::X, Symbol::O] {
            let i = symbol.index();
            let stats = record.side(symbol);
            let side = summary.side_mut(symbol);
            side.average_score += record.scores.get(symbol) as f64;
            side.moves += stats.moves_made as u64;
            total_time[i] += stats.decision_time;
            max_time[i] = max_time[i].max(stats.max_decision_time);
        }
        on_game(gi, &record);
    }

    for symbol in [Symbol::X, Symbol::O] {
        let i = symbol.index();
        let games = params.games.max(1) as f64;
        let side = summary.side_mut(symbol);
        side.average_score /= games;
        side.average_decision_secs = if side.moves > 0 { total_time[i].as_secs_f64() / side.moves as f64 } else { 0.0 };
        side.max_decision_secs = max_time[i].as_secs_f64();
    }
    info!("match finished: X wins {}, O wins {}, ties {}", summary.x.wins, summary.o.wins, summary.ties);
    Ok(summary)
}
