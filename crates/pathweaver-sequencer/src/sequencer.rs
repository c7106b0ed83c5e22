//! Detail-stepped sequencer engine
//!
//! Drives a [`Progression`] over a [`StageCatalog`] on tokio timers:
//! - Reveals detail items one at a time with a bounded-random dwell
//! - Pauses between stages, growing the completed prefix
//! - Dwells a stage's own budget when it has no items
//!
//! Cancellation: every activation edge bumps a run counter and aborts the
//! previous driver task. The driver re-checks the counter before every
//! mutation, so a timer that was already in flight when the signal flipped
//! can never touch the new run's state.

use crate::timing::TimingProfile;
use parking_lot::Mutex;
use pathweaver_core::{Phase, Progression, SequencerSnapshot, StageCatalog, Transition};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle to one sequencer instance.
///
/// Cloning shares the instance. Methods are cheap and non-blocking; the
/// advancement work runs on a spawned tokio task per activation, so the
/// handle must be used inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct StageSequencer {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    catalog: StageCatalog,
    timing: TimingProfile,
    shared: Mutex<Shared>,
    tx: watch::Sender<SequencerSnapshot>,
}

#[derive(Debug)]
struct Shared {
    run: u64,
    progression: Progression,
    task: Option<JoinHandle<()>>,
}

impl StageSequencer {
    /// Create an inactive sequencer over `catalog`
    #[must_use]
    pub fn new(catalog: StageCatalog, timing: TimingProfile) -> Self {
        let mut progression = Progression::new(&catalog);
        if timing.thinking.is_some() {
            progression = progression.with_thinking();
        }
        let (tx, _rx) = watch::channel(progression.snapshot());
        Self {
            inner: Arc::new(Inner {
                catalog,
                timing,
                shared: Mutex::new(Shared {
                    run: 0,
                    progression,
                    task: None,
                }),
                tx,
            }),
        }
    }

    /// Flip the activation signal.
    ///
    /// A false-to-true edge resets to the starting position and begins
    /// advancement; a true-to-false edge cancels all pending timers and
    /// resets to idle immediately. Repeating the current value is a no-op.
    pub fn set_active(&self, active: bool) {
        let mut shared = self.inner.shared.lock();
        if shared.progression.is_active() == active {
            return;
        }
        shared.run = shared.run.wrapping_add(1);
        if let Some(task) = shared.task.take() {
            task.abort();
        }
        if active {
            shared.progression.activate();
            let run = shared.run;
            tracing::debug!(run, stages = self.inner.catalog.len(), "sequencer activated");
            shared.task = Some(tokio::spawn(drive(Arc::clone(&self.inner), run)));
        } else {
            shared.progression.deactivate();
            tracing::debug!("sequencer deactivated");
        }
        self.inner.tx.send_replace(shared.progression.snapshot());
    }

    /// Latest published snapshot. Side-effect free.
    #[must_use]
    pub fn snapshot(&self) -> SequencerSnapshot {
        *self.inner.tx.borrow()
    }

    /// Watch receiver for push-style consumption
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SequencerSnapshot> {
        self.inner.tx.subscribe()
    }

    /// Whether the activation signal is currently on
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.shared.lock().progression.is_active()
    }

    /// The catalog this sequencer runs over
    #[must_use]
    pub fn catalog(&self) -> &StageCatalog {
        &self.inner.catalog
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(task) = self.shared.lock().task.take() {
            task.abort();
        }
    }
}

/// One activation's timer loop. Exits as soon as `run` is stale.
async fn drive(inner: Arc<Inner>, run: u64) {
    let mut rng = match inner.timing.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let in_thinking = matches!(
        inner.shared.lock().progression.snapshot().phase,
        Phase::Thinking { .. }
    );
    if in_thinking {
        if let Some(bounds) = inner.timing.thinking {
            let total_ms = bounds.sample_ms(&mut rng);
            let mut elapsed_ms = 0;
            while elapsed_ms < total_ms {
                let step = (total_ms - elapsed_ms).min(1_000);
                tokio::time::sleep(Duration::from_millis(step)).await;
                elapsed_ms += step;
                let mut shared = inner.shared.lock();
                if shared.run != run {
                    return;
                }
                if step == 1_000 {
                    shared.progression.tick_thinking();
                    inner.tx.send_replace(shared.progression.snapshot());
                }
            }
        }
    }

    loop {
        let (pending, active_stage) = {
            let shared = inner.shared.lock();
            if shared.run != run {
                return;
            }
            let snapshot = shared.progression.snapshot();
            (shared.progression.pending(), snapshot.active_stage())
        };

        let delay_ms = match pending {
            Transition::RevealItem => inner.timing.item_dwell.sample_ms(&mut rng),
            Transition::CompleteStage => {
                // itemless stages dwell their own budget; stepped stages
                // already spent theirs on items
                match active_stage.and_then(|s| inner.catalog.get(s)) {
                    Some(stage) if stage.item_count() == 0 => stage.dwell.sample_ms(&mut rng),
                    _ => inner.timing.stage_pause_ms,
                }
            }
            Transition::FinishThinking => 0,
            Transition::None => return,
        };

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        let mut shared = inner.shared.lock();
        if shared.run != run {
            return;
        }
        let applied = shared.progression.step();
        tracing::trace!(?applied, "sequencer transition");
        inner.tx.send_replace(shared.progression.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathweaver_core::Stage;

    #[tokio::test]
    async fn new_sequencer_starts_idle() {
        let catalog =
            StageCatalog::new(vec![Stage::new("parse", "Parsing")]).unwrap();
        let sequencer = StageSequencer::new(catalog, TimingProfile::default());

        assert_eq!(sequencer.snapshot(), SequencerSnapshot::idle());
        assert!(!sequencer.is_active());
    }

    #[tokio::test]
    async fn deactivating_an_idle_sequencer_is_a_no_op() {
        let catalog =
            StageCatalog::new(vec![Stage::new("parse", "Parsing")]).unwrap();
        let sequencer = StageSequencer::new(catalog, TimingProfile::default());

        sequencer.set_active(false);
        assert_eq!(sequencer.snapshot(), SequencerSnapshot::idle());
    }
}
