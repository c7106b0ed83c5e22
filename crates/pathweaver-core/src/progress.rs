//! Percentage-based progress model
//!
//! The alternate presentation policy: a single percentage advanced on a
//! polling tick, crossing evenly spaced stage boundaries. The reported
//! percentage is monotone non-decreasing and bounded in `[0, 100]`.

use serde::Serialize;

/// Monotone percentage progress over evenly weighted stages.
///
/// Each increment is capped at the next stage boundary
/// `(stage + 1) / stage_count * 100`; reaching a boundary advances the
/// stage index. With zero stages the model starts complete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressModel {
    stage_count: usize,
    stage: usize,
    percent: f64,
}

impl ProgressModel {
    /// Create a model over `stage_count` evenly weighted stages
    #[must_use]
    pub fn new(stage_count: usize) -> Self {
        Self {
            stage_count,
            stage: 0,
            percent: if stage_count == 0 { 100.0 } else { 0.0 },
        }
    }

    /// Add a bounded increment, capped at the next stage boundary.
    ///
    /// Negative increments are ignored, so the reported percentage never
    /// decreases. No-op once complete.
    pub fn advance(&mut self, increment: f64) {
        if self.is_complete() {
            return;
        }
        let boundary = Self::boundary(self.stage + 1, self.stage_count);
        self.percent = (self.percent + increment.max(0.0)).min(boundary);
        if self.percent >= boundary {
            self.stage += 1;
        }
    }

    /// Restore the starting state for the same stage count
    pub fn reset(&mut self) {
        *self = Self::new(self.stage_count);
    }

    /// Current percentage in `[0, 100]`
    #[inline]
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Index of the stage currently filling; equals `stage_count` once
    /// complete
    #[inline]
    #[must_use]
    pub fn stage(&self) -> usize {
        self.stage
    }

    /// Number of stages
    #[inline]
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    /// Whether the percentage has reached 100
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stage >= self.stage_count
    }

    fn boundary(stage: usize, count: usize) -> f64 {
        (stage as f64 / count as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_stages_starts_complete() {
        let model = ProgressModel::new(0);
        assert!(model.is_complete());
        assert_eq!(model.percent(), 100.0);
        assert_eq!(model.stage(), 0);
    }

    #[test]
    fn increments_are_capped_at_the_next_boundary() {
        let mut model = ProgressModel::new(4);
        model.advance(90.0);
        assert_eq!(model.percent(), 25.0);
        assert_eq!(model.stage(), 1);
    }

    #[test]
    fn completing_the_last_stage_lands_exactly_on_100() {
        let mut model = ProgressModel::new(4);
        for _ in 0..4 {
            model.advance(100.0);
        }
        assert!(model.is_complete());
        assert_eq!(model.percent(), 100.0);
        assert_eq!(model.stage(), 4);

        // further advancement is a no-op
        model.advance(50.0);
        assert_eq!(model.percent(), 100.0);
    }

    #[test]
    fn reset_restores_the_starting_state() {
        let mut model = ProgressModel::new(3);
        model.advance(10.0);
        model.reset();
        assert_eq!(model, ProgressModel::new(3));
    }

    proptest! {
        /// For any increment sequence (including negative draws), percent
        /// is monotone non-decreasing, bounded in [0, 100], and the stage
        /// index is monotone.
        #[test]
        fn percent_is_monotone_and_bounded(
            stage_count in 1_usize..8,
            increments in proptest::collection::vec(-2.0_f64..10.0, 1..200)
        ) {
            let mut model = ProgressModel::new(stage_count);
            let mut last_percent = model.percent();
            let mut last_stage = model.stage();
            for increment in increments {
                model.advance(increment);
                prop_assert!(model.percent() >= last_percent);
                prop_assert!(model.percent() <= 100.0);
                prop_assert!(model.stage() >= last_stage);
                prop_assert!(model.stage() <= stage_count);
                last_percent = model.percent();
                last_stage = model.stage();
            }
        }
    }
}
