use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use revbot::board::Symbol;
use revbot::game::{compare_players, MatchParams, MatchSummary, Outcome};
use revbot::io::FileStore;
use revbot::players::{EnginePlayer, GreedyPlayer, Player, RandomPlayer};
use revbot::search::ordering::BeamWeights;
use revbot::search::{Evaluator, SearchConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "compare", about = "Play a series of games between two configured players and report aggregate results")]
struct Args {
    /// Number of games to play; the first mover alternates
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Board size (even, 4..=16)
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// Player kind for X: engine, random or greedy
    #[arg(long, default_value = "engine")]
    x_kind: String,

    /// Player kind for O: engine, random or greedy
    #[arg(long, default_value = "engine")]
    o_kind: String,

    /// Full engine config for X as JSON; overrides the --x-* knobs
    #[arg(long)]
    x_config: Option<PathBuf>,

    /// Full engine config for O as JSON; overrides the --o-* knobs
    #[arg(long)]
    o_config: Option<PathBuf>,

    // X engine knobs
    #[arg(long, default_value_t = 3)]
    x_depth: u32,
    #[arg(long, value_enum, default_value_t = Evaluator::Combined)]
    x_eval: Evaluator,
    #[arg(long)]
    x_no_pruning: bool,
    #[arg(long)]
    x_beam: Option<usize>,
    #[arg(long, value_enum, default_value_t = BeamWeights::CornersEdges)]
    x_beam_weights: BeamWeights,
    #[arg(long)]
    x_adaptive: bool,

    // O engine knobs
    #[arg(long, default_value_t = 3)]
    o_depth: u32,
    #[arg(long, value_enum, default_value_t = Evaluator::Combined)]
    o_eval: Evaluator,
    #[arg(long)]
    o_no_pruning: bool,
    #[arg(long)]
    o_beam: Option<usize>,
    #[arg(long, value_enum, default_value_t = BeamWeights::CornersEdges)]
    o_beam_weights: BeamWeights,
    #[arg(long)]
    o_adaptive: bool,

    /// Seed for candidate shuffling and random players; unseeded engines search in generation order
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding saved engine caches; loaded at start and written at exit
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Optional: write the summary JSON to this path
    #[arg(long)]
    json_out: Option<PathBuf>,
}

struct SideArgs<'a> {
    kind: &'a str,
    config: Option<&'a PathBuf>,
    depth: u32,
    eval: Evaluator,
    no_pruning: bool,
    beam: Option<usize>,
    beam_weights: BeamWeights,
    adaptive: bool,
}

impl Args {
    fn side(&self, symbol: Symbol) -> SideArgs<'_> {
        match symbol {
            Symbol::X => SideArgs {
                kind: &self.x_kind, config: self.x_config.as_ref(), depth: self.x_depth, eval: self.x_eval,
                no_pruning: self.x_no_pruning, beam: self.x_beam, beam_weights: self.x_beam_weights, adaptive: self.x_adaptive,
            },
            Symbol::O => SideArgs {
                kind: &self.o_kind, config: self.o_config.as_ref(), depth: self.o_depth, eval: self.o_eval,
                no_pruning: self.o_no_pruning, beam: self.o_beam, beam_weights: self.o_beam_weights, adaptive: self.o_adaptive,
            },
        }
    }
}

enum Contender {
    Engine(EnginePlayer),
    Other(Box<dyn Player>),
}

impl Contender {
    fn player(&mut self) -> &mut dyn Player {
        match self {
            Contender::Engine(e) => e as &mut dyn Player,
            Contender::Other(p) => p.as_mut(),
        }
    }
}

fn build_side(args: &Args, symbol: Symbol) -> Result<Contender> {
    let side = args.side(symbol);
    let seed = args.seed.map(|s| s.wrapping_add(symbol as u64));
    match side.kind {
        "random" => Ok(Contender::Other(Box::new(RandomPlayer::new(symbol, seed.unwrap_or(1))))),
        "greedy" => Ok(Contender::Other(Box::new(GreedyPlayer::new(symbol)))),
        "engine" => {
            let config = match side.config {
                Some(path) => {
                    let mut c = SearchConfig::from_json_file(path)?;
                    // The seat decides the symbol, whatever the file says.
                    c.symbol = symbol;
                    c
                }
                None => SearchConfig {
                    pruning: !side.no_pruning,
                    beam_width: side.beam,
                    beam_weights: side.beam_weights,
                    adaptive_depth: side.adaptive,
                    shuffle_seed: seed,
                    ..SearchConfig::new(symbol, side.depth, side.eval)
                },
            };
            let engine = match &args.cache_dir {
                Some(dir) => EnginePlayer::with_store(config, &FileStore::new(dir)),
                None => EnginePlayer::new(config),
            }
            .with_context(|| format!("configure {symbol} engine"))?;
            Ok(Contender::Engine(engine))
        }
        other => anyhow::bail!("unknown player kind '{other}' for {symbol} (expected engine, random or greedy)"),
    }
}

fn print_summary(summary: &MatchSummary) {
    println!("Games: {}  Ties: {}", summary.games, summary.ties);
    for symbol in [Symbol::X, Symbol::O] {
        let s = summary.side(symbol);
        println!(
            "{}: {}\n  wins {}  avg score {:.2}  moves {}  avg decision {:.4}s  max decision {:.4}s",
            symbol, s.name, s.wins, s.average_score, s.moves, s.average_decision_secs, s.max_decision_secs
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut x = build_side(&args, Symbol::X)?;
    let mut o = build_side(&args, Symbol::O)?;

    let pb = ProgressBar::new(args.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}] {msg}")?);
    let params = MatchParams { games: args.games, board_size: args.size };
    let summary = compare_players(x.player(), o.player(), params, |_, record| {
        let msg = match record.winner() {
            Outcome::Win(s) => format!("last: {s} {}-{}", record.scores.x, record.scores.o),
            Outcome::Tie => format!("last: tie {}-{}", record.scores.x, record.scores.o),
        };
        pb.set_message(msg);
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    print_summary(&summary);

    if let Some(dir) = &args.cache_dir {
        let mut store = FileStore::new(dir);
        for side in [&x, &o] {
            if let Contender::Engine(e) = side {
                e.searcher().save(&mut store).with_context(|| format!("save {} cache", e.symbol()))?;
            }
        }
    }

    if let Some(path) = &args.json_out {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json).with_context(|| format!("write summary: {}", path.display()))?;
    }
    Ok(())
}
