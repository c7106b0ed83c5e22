//! Timing configuration for the sequencer engines

use pathweaver_core::DwellRange;

/// Timing profile shared by both engines.
///
/// Defaults mirror the dwell constants of the built-in scripts: 500-600 ms
/// per revealed item, a 500 ms pause between stages, a 100 ms polling tick
/// for the percentage variant, and increments of at most 5 percentage
/// points per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingProfile {
    /// Dwell per revealed detail item
    pub item_dwell: DwellRange,
    /// Pause between completing one stage and starting the next
    pub stage_pause_ms: u64,
    /// Optional thinking-phase duration bounds, preceding the first stage
    pub thinking: Option<DwellRange>,
    /// Polling tick for the percentage variant
    pub tick_ms: u64,
    /// Upper bound on each random percentage increment
    pub max_increment: f64,
    /// Seed for reproducible runs; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self {
            item_dwell: DwellRange::new(500, 600),
            stage_pause_ms: 500,
            thinking: None,
            tick_ms: 100,
            max_increment: 5.0,
            seed: None,
        }
    }
}

impl TimingProfile {
    /// Seed the run for reproducibility
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Precede stage stepping with a thinking phase of the given bounds
    #[must_use]
    pub fn with_thinking(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.thinking = Some(DwellRange::new(min_ms, max_ms).normalized());
        self
    }

    /// Override the per-item dwell bounds
    #[must_use]
    pub fn with_item_dwell(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.item_dwell = DwellRange::new(min_ms, max_ms).normalized();
        self
    }

    /// Override the inter-stage pause
    #[must_use]
    pub fn with_stage_pause(mut self, ms: u64) -> Self {
        self.stage_pause_ms = ms;
        self
    }

    /// Override the percentage polling tick
    #[must_use]
    pub fn with_tick(mut self, ms: u64) -> Self {
        self.tick_ms = ms.max(1);
        self
    }
}
