//! Stage catalog model
//!
//! Defines the static configuration a sequencer run is driven by:
//! - Dwell bounds for randomized timing
//! - Stages with ordered detail items
//! - Catalog construction, validation, and JSON loading

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Inclusive bounds for a randomized dwell duration, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DwellRange {
    /// Lower bound in milliseconds
    pub min_ms: u64,
    /// Upper bound in milliseconds
    pub max_ms: u64,
}

impl DwellRange {
    /// Create a new dwell range
    #[inline]
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A fixed dwell with no jitter
    #[inline]
    #[must_use]
    pub const fn fixed(ms: u64) -> Self {
        Self {
            min_ms: ms,
            max_ms: ms,
        }
    }

    /// Reorder malformed bounds so that `min_ms <= max_ms`
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.min_ms > self.max_ms {
            Self {
                min_ms: self.max_ms,
                max_ms: self.min_ms,
            }
        } else {
            self
        }
    }

    /// Draw a duration from the range.
    ///
    /// Tolerates malformed bounds instead of panicking, so a bad
    /// configuration can never take down the timer loop.
    pub fn sample_ms(&self, rng: &mut impl Rng) -> u64 {
        let lo = self.min_ms.min(self.max_ms);
        let hi = self.min_ms.max(self.max_ms);
        if lo == hi {
            lo
        } else {
            rng.gen_range(lo..=hi)
        }
    }
}

impl Default for DwellRange {
    fn default() -> Self {
        Self::new(800, 1200)
    }
}

/// One named phase of a simulated generation run.
///
/// Immutable once part of a [`StageCatalog`]. The sequencing logic treats
/// `label`, `description`, and the detail items as opaque display strings;
/// only `items.len()` and `dwell` influence timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Unique identifier, stable for the catalog's lifetime
    pub id: String,
    /// Display name
    pub label: String,
    /// Optional one-line summary
    #[serde(default)]
    pub description: String,
    /// Detail lines revealed progressively while the stage is active
    #[serde(default)]
    pub items: Vec<String>,
    /// Per-stage time budget, used when the stage has no detail items
    #[serde(default)]
    pub dwell: DwellRange,
}

impl Stage {
    /// Create a stage with no items and the default dwell budget
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            items: Vec::new(),
            dwell: DwellRange::default(),
        }
    }

    /// Set the one-line summary
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the ordered detail items
    #[must_use]
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-stage dwell bounds
    #[must_use]
    pub fn with_dwell(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.dwell = DwellRange::new(min_ms, max_ms);
        self
    }

    /// Number of detail items
    #[inline]
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Catalog construction errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A stage has an empty id
    #[error("stage at index {index} has an empty id")]
    EmptyStageId {
        /// Position of the offending stage
        index: usize,
    },

    /// Two stages share the same id
    #[error("duplicate stage id: {0}")]
    DuplicateStageId(String),

    /// Catalog JSON could not be parsed
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An immutable, ordered catalog of stages.
///
/// Construction validates stage ids and clamps malformed dwell bounds.
/// An empty catalog is valid; activating a sequencer over it lands directly
/// in the terminal state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StageCatalog {
    stages: Vec<Stage>,
}

impl StageCatalog {
    /// Build a catalog from an ordered list of stages.
    ///
    /// # Errors
    /// - [`CatalogError::EmptyStageId`] if a stage id is empty
    /// - [`CatalogError::DuplicateStageId`] if two stages share an id
    pub fn new(stages: Vec<Stage>) -> Result<Self, CatalogError> {
        {
            let mut seen = HashSet::new();
            for (index, stage) in stages.iter().enumerate() {
                if stage.id.is_empty() {
                    return Err(CatalogError::EmptyStageId { index });
                }
                if !seen.insert(stage.id.as_str()) {
                    return Err(CatalogError::DuplicateStageId(stage.id.clone()));
                }
            }
        }
        let stages = stages
            .into_iter()
            .map(|mut stage| {
                stage.dwell = stage.dwell.normalized();
                stage
            })
            .collect();
        Ok(Self { stages })
    }

    /// Catalog with no stages
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// Parse a catalog from a JSON array of stages.
    ///
    /// # Errors
    /// Returns [`CatalogError::Parse`] on malformed JSON, plus the same
    /// validation errors as [`StageCatalog::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let stages: Vec<Stage> = serde_json::from_str(json)?;
        Self::new(stages)
    }

    /// All stages, in order
    #[inline]
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Stage at `index`, if any
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// Number of stages
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the catalog has no stages
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let result = StageCatalog::new(vec![
            Stage::new("parse", "Parsing"),
            Stage::new("parse", "Parsing Again"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateStageId(id)) if id == "parse"));
    }

    #[test]
    fn catalog_rejects_empty_ids() {
        let result = StageCatalog::new(vec![Stage::new("", "Nameless")]);
        assert!(matches!(result, Err(CatalogError::EmptyStageId { index: 0 })));
    }

    #[test]
    fn catalog_clamps_malformed_dwell_bounds() {
        let catalog =
            StageCatalog::new(vec![Stage::new("parse", "Parsing").with_dwell(1200, 800)]).unwrap();
        assert_eq!(catalog.get(0).unwrap().dwell, DwellRange::new(800, 1200));
    }

    #[test]
    fn catalog_from_json_accepts_sparse_stages() {
        let catalog = StageCatalog::from_json(
            r#"[
                {"id": "parse", "label": "Parsing"},
                {"id": "build", "label": "Building",
                 "items": ["compile", "link"],
                 "dwell": {"min_ms": 600, "max_ms": 900}}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().item_count(), 0);
        assert_eq!(catalog.get(0).unwrap().dwell, DwellRange::default());
        assert_eq!(catalog.get(1).unwrap().items, vec!["compile", "link"]);
    }

    #[test]
    fn catalog_from_json_reports_parse_errors() {
        assert!(matches!(
            StageCatalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn dwell_sample_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = DwellRange::new(500, 600);
        for _ in 0..100 {
            let ms = range.sample_ms(&mut rng);
            assert!((500..=600).contains(&ms));
        }
    }

    #[test]
    fn dwell_sample_tolerates_inverted_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = DwellRange::new(900, 600);
        for _ in 0..100 {
            let ms = range.sample_ms(&mut rng);
            assert!((600..=900).contains(&ms));
        }
    }

    #[test]
    fn fixed_dwell_needs_no_rng_draw() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(DwellRange::fixed(700).sample_ms(&mut rng), 700);
    }
}
