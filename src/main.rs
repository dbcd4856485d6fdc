use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use revbot::board::{GameState, Move, ReversiBoard, Symbol};
use revbot::game::{play_game_from, GameRecord, Outcome};
use revbot::io::FileStore;
use revbot::players::{EnginePlayer, Player};
use revbot::search::ordering::BeamWeights;
use revbot::search::{Evaluator, SearchConfig};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Human vs engine
    #[value(name = "h")]
    Human,
    /// Engine vs engine
    #[value(name = "s")]
    SelfPlay,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Reversi against the minimax engine", long_about = None)]
struct Args {
    /// Operation mode: 'h' for human vs engine, 's' for engine self play
    #[arg(long, value_enum, default_value_t = Mode::Human)]
    mode: Mode,

    /// Your symbol: 'x' (moves first) or 'o'
    #[arg(long, default_value = "x")]
    color: String,

    /// Search depth in plies
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Static evaluator used at the search horizon
    #[arg(long, value_enum, default_value_t = Evaluator::Combined)]
    eval: Evaluator,

    /// Disable alpha-beta pruning
    #[arg(long)]
    no_pruning: bool,

    /// Keep only the best N candidates per node by positional weight
    #[arg(long)]
    beam: Option<usize>,

    /// Positional weight table used by beam selection
    #[arg(long, value_enum, default_value_t = BeamWeights::CornersEdges)]
    beam_weights: BeamWeights,

    /// Adjust depth between moves from decision latency
    #[arg(long)]
    adaptive: bool,

    /// Shuffle candidate moves with this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Board size (even, 4..=16)
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// Start from a saved position: one row per line of X, O and '.'; overrides --size
    #[arg(long)]
    board_file: Option<PathBuf>,

    /// Directory holding saved caches; loaded at start and written at exit
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

fn parse_symbol(s: &str) -> Result<Symbol> {
    s.parse::<Symbol>().map_err(|e| anyhow::anyhow!(e))
}

fn load_board(path: &Path) -> Result<ReversiBoard> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read board: {}", path.display()))?;
    let rows: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    ReversiBoard::from_rows(&rows).with_context(|| format!("parse board: {}", path.display()))
}

fn engine_config(args: &Args, symbol: Symbol) -> SearchConfig {
    SearchConfig {
        pruning: !args.no_pruning,
        beam_width: args.beam,
        beam_weights: args.beam_weights,
        adaptive_depth: args.adaptive,
        shuffle_seed: args.seed,
        ..SearchConfig::new(symbol, args.depth, args.eval)
    }
}

fn make_engine(args: &Args, symbol: Symbol) -> Result<EnginePlayer> {
    let config = engine_config(args, symbol);
    let player = match &args.cache_dir {
        Some(dir) => EnginePlayer::with_store(config, &FileStore::new(dir))?,
        None => EnginePlayer::new(config)?,
    };
    Ok(player)
}

struct HumanPlayer {
    symbol: Symbol,
}

impl Player for HumanPlayer {
    fn symbol(&self) -> Symbol { self.symbol }
    fn name(&self) -> String { "human".to_string() }

    fn get_move(&mut self, board: &ReversiBoard) -> Option<Move> {
        let n = board.size();
        loop {
            print!("{}, enter your move (row then column, e.g. 34): ", self.symbol);
            io::stdout().flush().ok()?;
            let mut input = String::new();
            if io::stdin().read_line(&mut input).ok()? == 0 { return None; }
            let input = input.trim();
            if input == "quit" { return None; }
            let digits: Vec<usize> = input.chars().filter_map(|c| c.to_digit(10)).map(|d| d as usize).collect();
            if digits.len() != 2 || digits.iter().any(|&d| d == 0 || d > n) {
                println!("Bad input. Type the row digit, then the column digit.");
                continue;
            }
            let mv = Move::new((digits[0] - 1) as u8, (digits[1] - 1) as u8);
            if board.is_valid_move(self.symbol, mv) { return Some(mv); }
            println!("Not a valid move.");
        }
    }
}

fn save_engine(engine: &EnginePlayer, dir: &Path) -> Result<()> {
    let mut store = FileStore::new(dir);
    engine.searcher().save(&mut store).with_context(|| format!("save {} cache", engine.symbol()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let board = match &args.board_file {
        Some(path) => load_board(path)?,
        None => ReversiBoard::new(args.size)?,
    };
    let human_symbol = parse_symbol(&args.color)?;
    let engine_symbol = human_symbol.opponent();

    let mut engine = make_engine(&args, engine_symbol)?;
    println!("Engine plays {} as {}", engine_symbol, engine.name());

    let record: GameRecord = if args.mode == Mode::SelfPlay {
        let mut other = make_engine(&args, human_symbol)?;
        let record = if human_symbol == Symbol::X {
            play_game_from(&mut other, &mut engine, board, true)?
        } else {
            play_game_from(&mut engine, &mut other, board, true)?
        };
        if let Some(dir) = &args.cache_dir { save_engine(&other, dir)?; }
        record
    } else {
        let mut human = HumanPlayer { symbol: human_symbol };
        if human_symbol == Symbol::X {
            play_game_from(&mut human, &mut engine, board, true)?
        } else {
            play_game_from(&mut engine, &mut human, board, true)?
        }
    };
    if let Some(dir) = &args.cache_dir { save_engine(&engine, dir)?; }

    match record.winner() {
        Outcome::Win(s) => println!("{s} wins!"),
        Outcome::Tie => println!("It's a tie!"),
    }
    for symbol in [Symbol::X, Symbol::O] {
        let stats = record.side(symbol);
        if stats.moves_made > 0 {
            println!("Average decision time for {}: {:.3}s (max {:.3}s over {} moves)",
                symbol,
                stats.decision_time.as_secs_f64() / stats.moves_made as f64,
                stats.max_decision_time.as_secs_f64(),
                stats.moves_made);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_accepts_only_known_values() {
        let args = Args::try_parse_from(["revbot", "--mode", "s"]).unwrap();
        assert_eq!(args.mode, Mode::SelfPlay);
        assert_eq!(Args::try_parse_from(["revbot"]).unwrap().mode, Mode::Human);
        assert!(Args::try_parse_from(["revbot", "--mode", "self"]).is_err());
    }

    #[test]
    fn board_file_rows_are_parsed() {
        let dir = Path::new("target/revbot_board_test");
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join("near_full.txt");
        std::fs::write(&path, "XXXX\nXXXX\nXXOO\nXXO.\n\n").unwrap();
        let board = load_board(&path).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.legal_moves(Symbol::X), vec![Move::new(3, 3)]);
        std::fs::write(&path, "XXX\nXXX\nXXX\n").unwrap();
        assert!(load_board(&path).is_err());
        let _ = std::fs::remove_dir_all(dir);
    }
}
