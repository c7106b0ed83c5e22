//! Pathweaver Core - stage model and pure progression logic
//!
//! The building blocks the timer engines run over:
//! - Stage catalogs with ordered detail items and dwell bounds
//! - A pure, timer-free advancement state machine
//! - Snapshots suitable for handing to a rendering layer
//! - The alternate percentage-based progress model
//!
//! # Example
//!
//! ```rust
//! use pathweaver_core::{Progression, Stage, StageCatalog};
//!
//! let catalog = StageCatalog::new(vec![
//!     Stage::new("parse", "Parsing").with_items(["read input", "build tree"]),
//! ])?;
//!
//! let mut progression = Progression::new(&catalog);
//! progression.activate();
//! assert_eq!(progression.snapshot().active_item(), Some(0));
//!
//! progression.step(); // reveal "build tree"
//! progression.step(); // complete the stage
//! assert!(progression.snapshot().is_terminal());
//! # Ok::<(), pathweaver_core::CatalogError>(())
//! ```

#![allow(missing_docs)]

pub mod catalog;
pub mod progress;
pub mod progression;
pub mod stage;

pub use progress::ProgressModel;
pub use progression::{Phase, Progression, SequencerSnapshot, StepStatus, Transition};
pub use stage::{CatalogError, DwellRange, Stage, StageCatalog};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Pathweaver Core
    pub use crate::{
        Phase, ProgressModel, Progression, SequencerSnapshot, Stage, StageCatalog, StepStatus,
        Transition,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
