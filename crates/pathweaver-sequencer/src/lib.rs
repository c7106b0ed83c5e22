//! Pathweaver Sequencer - timer-driven engines over the core progression
//! model
//!
//! Two presentation policies over one activation contract:
//! - [`StageSequencer`] - the detail-stepped variant, revealing stage items
//!   one at a time on randomized dwells
//! - [`ProgressTicker`] - the percentage variant, polling a fixed tick and
//!   advancing a bounded-random percentage
//!
//! Both are controlled solely through `set_active` and publish snapshots on
//! a watch channel; deactivation cancels every outstanding timer before the
//! state is reset, so a stale callback can never touch a newer run.
//!
//! # Example
//!
//! ```rust,ignore
//! use pathweaver_core::catalog;
//! use pathweaver_sequencer::{StageSequencer, TimingProfile};
//!
//! # async fn example() {
//! let sequencer = StageSequencer::new(catalog::agent_execution(), TimingProfile::default());
//! let mut rx = sequencer.subscribe();
//! sequencer.set_active(true);
//!
//! while rx.changed().await.is_ok() {
//!     let snapshot = *rx.borrow();
//!     if snapshot.is_terminal() {
//!         break;
//!     }
//! }
//! # }
//! ```

#![allow(missing_docs)]

pub mod sequencer;
pub mod ticker;
pub mod timing;

pub use sequencer::StageSequencer;
pub use ticker::{ProgressSnapshot, ProgressTicker};
pub use timing::TimingProfile;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
