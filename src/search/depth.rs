use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Latency thresholds for the per-decision depth adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLimits {
    /// Decisions slower than this drop one ply.
    pub slow_ms: u64,
    /// Decisions faster than this gain one ply, up to `max_depth`.
    pub fast_ms: u64,
    pub max_depth: u32,
}

impl Default for DepthLimits {
    fn default() -> Self {
        Self { slow_ms: 2600, fast_ms: 1000, max_depth: 8 }
    }
}

/// One fixed step per decision, no smoothing. Depth never drops below 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthController {
    enabled: bool,
    limits: DepthLimits,
}

impl DepthController {
    pub fn new(enabled: bool, limits: DepthLimits) -> Self {
        Self { enabled, limits }
    }

    /// Depth to use for the next decision after one that took `elapsed`.
    pub fn next_depth(&self, depth: u32, elapsed: Duration) -> u32 {
        if !self.enabled { return depth; }
        if elapsed > Duration::from_millis(self.limits.slow_ms) {
            return depth.saturating_sub(1).max(1);
        }
        if elapsed < Duration::from_millis(self.limits.fast_ms) && depth < self.limits.max_depth {
            return depth + 1;
        }
        depth
    }
}
