use crate::board::Symbol;
use crate::search::depth::DepthLimits;
use crate::search::eval::Evaluator;
use crate::search::ordering::BeamWeights;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("beam width must be at least 1 when beam selection is enabled")]
    ZeroBeamWidth,
    #[error("adaptive depth cap must be at least 1")]
    ZeroDepthCap,
    #[error("fast threshold ({fast_ms} ms) must be below slow threshold ({slow_ms} ms)")]
    InvertedLatencyThresholds { fast_ms: u64, slow_ms: u64 },
    #[error("unknown evaluator: {0:?}")]
    UnknownEvaluator(String),
}

/// Per-player search parameters.
///
/// Everything here is fixed for the lifetime of a `Searcher` except the
/// working depth, which the adaptive controller may move between decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub symbol: Symbol,
    pub depth: u32,
    pub evaluator: Evaluator,
    pub pruning: bool,
    /// `None` disables beam selection.
    pub beam_width: Option<usize>,
    pub beam_weights: BeamWeights,
    pub adaptive_depth: bool,
    pub depth_limits: DepthLimits,
    pub use_tt: bool,
    /// Shuffle candidates before exploring them. `None` keeps enumeration
    /// order and makes the search deterministic.
    pub shuffle_seed: Option<u64>,
    /// Seed for the zobrist table; `None` draws from entropy.
    pub zobrist_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            symbol: Symbol::X,
            depth: 3,
            evaluator: Evaluator::Combined,
            pruning: true,
            beam_width: None,
            beam_weights: BeamWeights::CornersEdges,
            adaptive_depth: false,
            depth_limits: DepthLimits::default(),
            use_tt: true,
            shuffle_seed: None,
            zobrist_seed: None,
        }
    }
}

impl SearchConfig {
    pub fn new(symbol: Symbol, depth: u32, evaluator: Evaluator) -> Self {
        Self { symbol, depth, evaluator, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 { return Err(ConfigError::ZeroDepth); }
        if self.beam_width == Some(0) { return Err(ConfigError::ZeroBeamWidth); }
        if self.adaptive_depth {
            let l = self.depth_limits;
            if l.max_depth == 0 { return Err(ConfigError::ZeroDepthCap); }
            if l.fast_ms >= l.slow_ms {
                return Err(ConfigError::InvertedLatencyThresholds { fast_ms: l.fast_ms, slow_ms: l.slow_ms });
            }
        }
        Ok(())
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read search config: {}", path.as_ref().display()))?;
        let config: SearchConfig = serde_json::from_str(&text).context("parse search config")?;
        config.validate()?;
        Ok(config)
    }
}
