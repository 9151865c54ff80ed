//! Detail-level scoring: how thoroughly a task has been planned.
//!
//! Every task earns a [`DetailLevel`] between 1 and 5. Planning effort along
//! four independent dimensions (description, stated benefit, checklist
//! breakdown, long-term estimate) each raise the level by one. The level
//! feeds the coin multiplier and edit bonuses; it is recomputed from the
//! attributes on every call, never cached as authoritative.

use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use crate::balance::DetailThresholds;
use crate::task::TaskAttributes;

/// A task's detail level, 1-based and niche-optimized.
///
/// Uses `NonZeroU8` so that `Option<DetailLevel>` is the same size as
/// `DetailLevel`, and so that a zero level cannot be constructed or
/// deserialized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct DetailLevel(NonZeroU8);

impl DetailLevel {
    /// The floor of the stock scale. Every task starts here.
    pub const MIN: DetailLevel = DetailLevel(NonZeroU8::MIN);
    /// The ceiling of the stock scale.
    pub const MAX: DetailLevel = DetailLevel(NonZeroU8::new(5).unwrap());

    /// Create a `DetailLevel` from a raw `u8`.
    ///
    /// Returns `None` if `raw` is zero.
    pub fn new(raw: u8) -> Option<Self> {
        NonZeroU8::new(raw).map(DetailLevel)
    }

    /// Get the underlying `u8` value.
    pub fn get(self) -> u8 {
        self.0.get()
    }

    /// How many levels `self` sits above `earlier`, or 0 when not above.
    pub fn gain_over(self, earlier: DetailLevel) -> u8 {
        self.get().saturating_sub(earlier.get())
    }
}

impl Default for DetailLevel {
    fn default() -> Self {
        DetailLevel::MIN
    }
}

impl std::fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Score a task's planning detail against the configured thresholds.
///
/// Starts at `min_detail_level` and adds one point per satisfied dimension:
/// a description of at least `min_description_chars`, a benefit text of at
/// least `min_benefit_chars`, a checklist of at least `min_checklist_count`
/// entries, and an estimate of at least `min_long_term_hours`. Clamped to
/// `max_detail_level`. Total: every input maps to a level.
pub fn score_detail(attrs: &TaskAttributes, thresholds: &DetailThresholds) -> DetailLevel {
    debug_assert!(thresholds.min_detail_level >= 1);

    let mut level = thresholds.min_detail_level;
    if attrs.description_chars() >= thresholds.min_description_chars {
        level = level.saturating_add(1);
    }
    if attrs.benefit_chars() >= thresholds.min_benefit_chars {
        level = level.saturating_add(1);
    }
    if attrs.checklist_count >= thresholds.min_checklist_count {
        level = level.saturating_add(1);
    }
    if attrs.estimated_hours >= thresholds.min_long_term_hours {
        level = level.saturating_add(1);
    }

    DetailLevel::new(level.min(thresholds.max_detail_level)).unwrap_or(DetailLevel::MIN)
}
