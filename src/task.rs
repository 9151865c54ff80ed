//! Task attribute snapshots and bonus-flag extraction.
//!
//! The engine never stores tasks; callers hand in a [`TaskAttributes`]
//! snapshot of whatever they persist and get values back. Scoring and payout
//! read only these fields.

use serde::{Deserialize, Serialize};

/// The reward-relevant attributes of a task, captured at call time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskAttributes {
    /// Free-text description, if the user wrote one.
    pub description: Option<String>,
    /// Free-text expected benefit, if the user wrote one.
    pub benefits: Option<String>,
    /// Estimated hours of work. Non-negative by contract.
    pub estimated_hours: f64,
    /// Number of checklist entries attached to the task.
    pub checklist_count: usize,
    /// Whether the task has been broken down into child tasks.
    pub has_child_tasks: bool,
}

impl TaskAttributes {
    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a benefit text.
    pub fn with_benefits(mut self, benefits: impl Into<String>) -> Self {
        self.benefits = Some(benefits.into());
        self
    }

    /// Set the duration estimate.
    pub fn with_hours(mut self, estimated_hours: f64) -> Self {
        self.estimated_hours = estimated_hours;
        self
    }

    /// Attach a checklist of `count` entries.
    pub fn with_checklist(mut self, count: usize) -> Self {
        self.checklist_count = count;
        self
    }

    /// Mark the task as a parent (broken down into child tasks).
    pub fn as_parent(mut self) -> Self {
        self.has_child_tasks = true;
        self
    }

    /// Description length in characters (0 when absent).
    ///
    /// Characters, not bytes: descriptions are frequently written in
    /// multibyte scripts and thresholds must measure what the user typed.
    pub fn description_chars(&self) -> usize {
        self.description.as_deref().map_or(0, |d| d.chars().count())
    }

    /// Benefit-text length in characters (0 when absent).
    pub fn benefit_chars(&self) -> usize {
        self.benefits.as_deref().map_or(0, |b| b.chars().count())
    }

    /// Derive the reward bonus flags from the content.
    ///
    /// The bar here is deliberately lower than the detail scorer's: a single
    /// checklist entry or any benefit text at all earns the bonus, while the
    /// detail score demands three entries and ten characters.
    pub fn bonus_flags(&self) -> BonusFlags {
        BonusFlags {
            has_prerequisite: self.checklist_count > 0,
            has_benefit: self.benefits.as_deref().is_some_and(|b| !b.is_empty()),
        }
    }
}

/// Which payout multipliers a task qualifies for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusFlags {
    /// The task has prerequisite steps (any checklist entry).
    pub has_prerequisite: bool,
    /// The task declares an expected benefit (any benefit text).
    pub has_benefit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_earns_no_flags() {
        let flags = TaskAttributes::default().bonus_flags();
        assert!(!flags.has_prerequisite);
        assert!(!flags.has_benefit);
    }

    #[test]
    fn single_checklist_entry_flags_prerequisite() {
        let attrs = TaskAttributes::default().with_checklist(1);
        assert!(attrs.bonus_flags().has_prerequisite);
    }

    #[test]
    fn any_benefit_text_flags_benefit() {
        let attrs = TaskAttributes::default().with_benefits("x");
        assert!(attrs.bonus_flags().has_benefit);
    }

    #[test]
    fn empty_benefit_string_does_not_flag() {
        let attrs = TaskAttributes::default().with_benefits("");
        assert!(!attrs.bonus_flags().has_benefit);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let attrs = TaskAttributes::default()
            .with_description("毎朝三十分走る")
            .with_benefits("健康");
        assert_eq!(attrs.description_chars(), 7);
        assert_eq!(attrs.benefit_chars(), 2);
    }

    #[test]
    fn absent_texts_count_as_zero() {
        let attrs = TaskAttributes::default().with_hours(2.0);
        assert_eq!(attrs.description_chars(), 0);
        assert_eq!(attrs.benefit_chars(), 0);
    }

    #[test]
    fn builder_composes() {
        let attrs = TaskAttributes::default()
            .with_description("write the quarterly report")
            .with_hours(12.0)
            .with_checklist(4)
            .as_parent();
        assert_eq!(attrs.estimated_hours, 12.0);
        assert_eq!(attrs.checklist_count, 4);
        assert!(attrs.has_child_tasks);
        assert!(attrs.benefits.is_none());
    }
}
