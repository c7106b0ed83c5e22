//! Pure progression state machine
//!
//! Advancement logic with no timers attached: a driver decides *when* to
//! apply the next transition, [`Progression`] decides *what* that transition
//! is. Keeping the transitions pure makes the ordering invariants (prefix
//! completion, monotone item reveal) directly testable.

use crate::stage::StageCatalog;
use serde::Serialize;

/// Display status of one stage relative to the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not reached yet
    Pending,
    /// Currently active
    Executing,
    /// Done
    Completed,
}

/// Where a sequencer currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Not activated
    Idle,
    /// Preliminary thinking phase, before the first stage
    Thinking {
        /// Whole seconds spent thinking so far
        elapsed_secs: u64,
    },
    /// A stage is active
    Stage {
        /// Index of the active stage
        stage: usize,
        /// Index of the most recently revealed item, if the stage has items
        item: Option<usize>,
    },
    /// All stages complete; no further advancement until deactivated
    Complete,
}

/// Read-only view of a sequencer's position, cheap to copy out to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequencerSnapshot {
    /// Mirrors the external activation signal
    pub is_active: bool,
    /// Current position
    #[serde(flatten)]
    pub phase: Phase,
    /// Stages `[0, completed)` are done
    pub completed: usize,
}

impl SequencerSnapshot {
    /// The snapshot of a sequencer that was never activated
    #[inline]
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            is_active: false,
            phase: Phase::Idle,
            completed: 0,
        }
    }

    /// Index of the active stage, if one is active
    #[inline]
    #[must_use]
    pub fn active_stage(&self) -> Option<usize> {
        match self.phase {
            Phase::Stage { stage, .. } => Some(stage),
            _ => None,
        }
    }

    /// Index of the most recently revealed item of the active stage
    #[inline]
    #[must_use]
    pub fn active_item(&self) -> Option<usize> {
        match self.phase {
            Phase::Stage { item, .. } => item,
            _ => None,
        }
    }

    /// Indices of the completed stages. Always a prefix.
    #[inline]
    #[must_use]
    pub fn completed_stages(&self) -> std::ops::Range<usize> {
        0..self.completed
    }

    /// Whether every stage has completed
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Complete)
    }

    /// Status of the stage at `index` relative to this position
    #[must_use]
    pub fn stage_status(&self, index: usize) -> StepStatus {
        if index < self.completed {
            StepStatus::Completed
        } else if self.active_stage() == Some(index) {
            StepStatus::Executing
        } else {
            StepStatus::Pending
        }
    }
}

impl Default for SequencerSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}

/// A single state change, as reported by [`Progression::pending`] and
/// applied by [`Progression::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Reveal the next detail item of the active stage
    RevealItem,
    /// Mark the active stage complete and advance (or finish)
    CompleteStage,
    /// Leave the thinking phase and start the first stage
    FinishThinking,
    /// Nothing left to do
    None,
}

/// Pure advancement state machine over one catalog.
///
/// Owned by exactly one driver; all mutation flows through [`activate`],
/// [`deactivate`], [`step`], and [`tick_thinking`].
///
/// [`activate`]: Progression::activate
/// [`deactivate`]: Progression::deactivate
/// [`step`]: Progression::step
/// [`tick_thinking`]: Progression::tick_thinking
#[derive(Debug, Clone)]
pub struct Progression {
    items_per_stage: Vec<usize>,
    thinking: bool,
    active: bool,
    phase: Phase,
    completed: usize,
}

impl Progression {
    /// Create an inactive progression over `catalog`
    #[must_use]
    pub fn new(catalog: &StageCatalog) -> Self {
        Self {
            items_per_stage: catalog.stages().iter().map(|s| s.item_count()).collect(),
            thinking: false,
            active: false,
            phase: Phase::Idle,
            completed: 0,
        }
    }

    /// Precede stage stepping with a thinking phase
    #[must_use]
    pub fn with_thinking(mut self) -> Self {
        self.thinking = true;
        self
    }

    /// Whether the activation signal is on
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activation edge: reset to the starting position. No-op when already
    /// active.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.completed = 0;
        self.phase = if self.thinking && !self.items_per_stage.is_empty() {
            Phase::Thinking { elapsed_secs: 0 }
        } else {
            self.start_phase()
        };
    }

    /// Deactivation edge: reset to the idle state immediately
    pub fn deactivate(&mut self) {
        self.active = false;
        self.completed = 0;
        self.phase = Phase::Idle;
    }

    /// The transition [`Progression::step`] would apply next
    #[must_use]
    pub fn pending(&self) -> Transition {
        match self.phase {
            Phase::Idle | Phase::Complete => Transition::None,
            Phase::Thinking { .. } => Transition::FinishThinking,
            Phase::Stage { stage, item } => match item {
                Some(i) if i + 1 < self.items_per_stage[stage] => Transition::RevealItem,
                _ => Transition::CompleteStage,
            },
        }
    }

    /// Apply one transition. Returns the transition that was applied.
    pub fn step(&mut self) -> Transition {
        let pending = self.pending();
        match pending {
            Transition::None => {}
            Transition::FinishThinking => {
                self.phase = self.start_phase();
            }
            Transition::RevealItem => {
                if let Phase::Stage {
                    stage,
                    item: Some(i),
                } = self.phase
                {
                    self.phase = Phase::Stage {
                        stage,
                        item: Some(i + 1),
                    };
                }
            }
            Transition::CompleteStage => {
                if let Phase::Stage { stage, .. } = self.phase {
                    self.completed = stage + 1;
                    self.phase = if stage + 1 < self.items_per_stage.len() {
                        Phase::Stage {
                            stage: stage + 1,
                            item: Self::first_item(self.items_per_stage[stage + 1]),
                        }
                    } else {
                        Phase::Complete
                    };
                }
            }
        }
        pending
    }

    /// Advance the thinking clock by one second. No-op outside thinking.
    pub fn tick_thinking(&mut self) {
        if let Phase::Thinking { elapsed_secs } = self.phase {
            self.phase = Phase::Thinking {
                elapsed_secs: elapsed_secs + 1,
            };
        }
    }

    /// Current position as a copyable snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> SequencerSnapshot {
        SequencerSnapshot {
            is_active: self.active,
            phase: self.phase,
            completed: self.completed,
        }
    }

    fn start_phase(&self) -> Phase {
        if self.items_per_stage.is_empty() {
            Phase::Complete
        } else {
            Phase::Stage {
                stage: 0,
                item: Self::first_item(self.items_per_stage[0]),
            }
        }
    }

    fn first_item(count: usize) -> Option<usize> {
        if count == 0 {
            None
        } else {
            Some(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Stage;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn catalog_of(item_counts: &[usize]) -> StageCatalog {
        let stages = item_counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                Stage::new(format!("stage-{i}"), format!("Stage {i}"))
                    .with_items((0..count).map(|j| format!("item {j}")))
            })
            .collect();
        StageCatalog::new(stages).unwrap()
    }

    #[test]
    fn empty_catalog_activates_straight_to_terminal() {
        let mut progression = Progression::new(&StageCatalog::empty());
        progression.activate();

        let snapshot = progression.snapshot();
        assert!(snapshot.is_active);
        assert!(snapshot.is_terminal());
        assert_eq!(snapshot.completed, 0);
        assert_eq!(progression.pending(), Transition::None);
        assert_eq!(progression.step(), Transition::None);
    }

    #[test]
    fn zero_item_stage_skips_item_reveal() {
        let mut progression = Progression::new(&catalog_of(&[0, 3]));
        progression.activate();

        assert_eq!(
            progression.snapshot().phase,
            Phase::Stage {
                stage: 0,
                item: None
            }
        );
        assert_eq!(progression.pending(), Transition::CompleteStage);

        progression.step();
        assert_eq!(
            progression.snapshot().phase,
            Phase::Stage {
                stage: 1,
                item: Some(0)
            }
        );
        assert_eq!(progression.snapshot().completed, 1);
    }

    #[test]
    fn full_run_walks_items_then_completes_stages() {
        let mut progression = Progression::new(&catalog_of(&[0, 3]));
        progression.activate();

        let applied: Vec<Transition> = std::iter::from_fn(|| match progression.step() {
            Transition::None => None,
            t => Some(t),
        })
        .collect();

        assert_eq!(
            applied,
            vec![
                Transition::CompleteStage,
                Transition::RevealItem,
                Transition::RevealItem,
                Transition::CompleteStage,
            ]
        );

        let snapshot = progression.snapshot();
        assert!(snapshot.is_terminal());
        assert_eq!(snapshot.completed_stages(), 0..2);
    }

    #[test]
    fn last_item_is_revealed_before_stage_completes() {
        let mut progression = Progression::new(&catalog_of(&[3]));
        progression.activate();

        progression.step();
        progression.step();
        assert_eq!(progression.snapshot().active_item(), Some(2));
        assert_eq!(progression.pending(), Transition::CompleteStage);
    }

    #[test]
    fn deactivation_resets_to_idle() {
        let mut progression = Progression::new(&catalog_of(&[2, 2]));
        progression.activate();
        progression.step();
        progression.step();

        progression.deactivate();
        assert_eq!(progression.snapshot(), SequencerSnapshot::idle());
    }

    #[test]
    fn reactivation_while_active_is_a_no_op() {
        let mut progression = Progression::new(&catalog_of(&[2]));
        progression.activate();
        progression.step();
        let before = progression.snapshot();

        progression.activate();
        assert_eq!(progression.snapshot(), before);
    }

    #[test]
    fn thinking_phase_precedes_the_first_stage() {
        let mut progression = Progression::new(&catalog_of(&[1])).with_thinking();
        progression.activate();

        assert_eq!(
            progression.snapshot().phase,
            Phase::Thinking { elapsed_secs: 0 }
        );
        progression.tick_thinking();
        progression.tick_thinking();
        assert_eq!(
            progression.snapshot().phase,
            Phase::Thinking { elapsed_secs: 2 }
        );

        assert_eq!(progression.step(), Transition::FinishThinking);
        assert_eq!(progression.snapshot().active_stage(), Some(0));
    }

    #[test]
    fn thinking_over_an_empty_catalog_is_skipped() {
        let mut progression = Progression::new(&StageCatalog::empty()).with_thinking();
        progression.activate();
        assert!(progression.snapshot().is_terminal());
    }

    #[test]
    fn stage_status_reflects_the_completed_prefix() {
        let mut progression = Progression::new(&catalog_of(&[0, 0, 0]));
        progression.activate();
        progression.step();

        let snapshot = progression.snapshot();
        assert_eq!(snapshot.stage_status(0), StepStatus::Completed);
        assert_eq!(snapshot.stage_status(1), StepStatus::Executing);
        assert_eq!(snapshot.stage_status(2), StepStatus::Pending);
    }

    proptest! {
        /// Across any run, the completed set is a prefix, the stage index
        /// never decreases, and the item index never decreases while the
        /// stage is unchanged.
        #[test]
        fn run_is_monotone_and_prefix_completed(
            item_counts in proptest::collection::vec(0_usize..5, 0..6)
        ) {
            let mut progression = Progression::new(&catalog_of(&item_counts));
            progression.activate();

            let mut prev = progression.snapshot();
            let max_steps = item_counts.iter().sum::<usize>() + item_counts.len() + 1;
            for _ in 0..max_steps {
                if progression.step() == Transition::None {
                    break;
                }
                let snapshot = progression.snapshot();

                // prefix completion
                if let Some(stage) = snapshot.active_stage() {
                    prop_assert_eq!(snapshot.completed, stage);
                }
                if snapshot.is_terminal() {
                    prop_assert_eq!(snapshot.completed, item_counts.len());
                }

                // monotonicity
                if let (Some(prev_stage), Some(stage)) =
                    (prev.active_stage(), snapshot.active_stage())
                {
                    prop_assert!(stage >= prev_stage);
                    if stage == prev_stage {
                        prop_assert!(snapshot.active_item() >= prev.active_item());
                    }
                }
                prop_assert!(snapshot.completed >= prev.completed);

                prev = snapshot;
            }

            prop_assert!(progression.snapshot().is_terminal());
        }
    }
}
