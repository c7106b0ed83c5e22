//! Percentage progress engine
//!
//! The polling variant: a fixed tick advances a [`ProgressModel`] by a
//! bounded random increment, capped at the next stage boundary. Shares the
//! activation contract and run-counter cancellation scheme with the
//! detail-stepped engine.

use crate::timing::TimingProfile;
use parking_lot::Mutex;
use pathweaver_core::ProgressModel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Read-only view of the percentage variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// Mirrors the external activation signal
    pub is_active: bool,
    /// Percentage in `[0, 100]`, monotone within a run
    pub percent: f64,
    /// Index of the stage currently filling
    pub stage: usize,
    /// Total number of stages
    pub stage_count: usize,
    /// Whether the percentage has reached 100
    pub is_complete: bool,
}

/// Handle to one progress ticker instance
#[derive(Debug, Clone)]
pub struct ProgressTicker {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    timing: TimingProfile,
    shared: Mutex<Shared>,
    tx: watch::Sender<ProgressSnapshot>,
}

#[derive(Debug)]
struct Shared {
    run: u64,
    active: bool,
    model: ProgressModel,
    task: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    /// Create an inactive ticker over `stage_count` evenly weighted stages
    #[must_use]
    pub fn new(stage_count: usize, timing: TimingProfile) -> Self {
        let model = ProgressModel::new(stage_count);
        let (tx, _rx) = watch::channel(snapshot_of(false, &model));
        Self {
            inner: Arc::new(Inner {
                timing,
                shared: Mutex::new(Shared {
                    run: 0,
                    active: false,
                    model,
                    task: None,
                }),
                tx,
            }),
        }
    }

    /// Flip the activation signal; same edge semantics as the sequencer
    pub fn set_active(&self, active: bool) {
        let mut shared = self.inner.shared.lock();
        if shared.active == active {
            return;
        }
        shared.run = shared.run.wrapping_add(1);
        if let Some(task) = shared.task.take() {
            task.abort();
        }
        shared.active = active;
        shared.model.reset();
        if active && !shared.model.is_complete() {
            let run = shared.run;
            tracing::debug!(run, stages = shared.model.stage_count(), "ticker activated");
            shared.task = Some(tokio::spawn(tick(Arc::clone(&self.inner), run)));
        }
        self.inner
            .tx
            .send_replace(snapshot_of(shared.active, &shared.model));
    }

    /// Latest published snapshot. Side-effect free.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.inner.tx.borrow()
    }

    /// Watch receiver for push-style consumption
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.inner.tx.subscribe()
    }

    /// Whether the activation signal is currently on
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.shared.lock().active
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(task) = self.shared.lock().task.take() {
            task.abort();
        }
    }
}

fn snapshot_of(is_active: bool, model: &ProgressModel) -> ProgressSnapshot {
    ProgressSnapshot {
        is_active,
        percent: model.percent(),
        stage: model.stage(),
        stage_count: model.stage_count(),
        is_complete: model.is_complete(),
    }
}

/// One activation's polling loop. Exits as soon as `run` is stale.
async fn tick(inner: Arc<Inner>, run: u64) {
    let mut rng = match inner.timing.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut interval = tokio::time::interval(Duration::from_millis(inner.timing.tick_ms.max(1)));
    // the first interval tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        let mut shared = inner.shared.lock();
        if shared.run != run {
            return;
        }
        let increment = if inner.timing.max_increment > 0.0 {
            rng.gen_range(0.0..inner.timing.max_increment)
        } else {
            0.0
        };
        shared.model.advance(increment);
        inner
            .tx
            .send_replace(snapshot_of(shared.active, &shared.model));
        if shared.model.is_complete() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_ticker_starts_idle_at_zero() {
        let ticker = ProgressTicker::new(4, TimingProfile::default());
        let snapshot = ticker.snapshot();
        assert!(!snapshot.is_active);
        assert_eq!(snapshot.percent, 0.0);
        assert_eq!(snapshot.stage, 0);
        assert!(!snapshot.is_complete);
    }

    #[tokio::test]
    async fn zero_stage_ticker_activates_straight_to_complete() {
        let ticker = ProgressTicker::new(0, TimingProfile::default());
        ticker.set_active(true);

        let snapshot = ticker.snapshot();
        assert!(snapshot.is_active);
        assert!(snapshot.is_complete);
        assert_eq!(snapshot.percent, 100.0);
    }
}
