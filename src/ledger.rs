//! Reward and stamina histories.
//!
//! Every credit and every spend appends one record here, so the profile
//! totals can always be audited against the ledger. Entries carry the
//! multiplier that was in effect, which is what makes later rebalancing
//! explainable ("why did this task pay 28 coins?").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reward::Currency;

/// Why a reward was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardReason {
    /// Coins for creating a task.
    TaskCreate,
    /// Crystals for completing a task.
    TaskComplete,
    /// Coins for an edit that raised the detail level.
    EditBonus,
}

impl RewardReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RewardReason::TaskCreate => "task_create",
            RewardReason::TaskComplete => "task_complete",
            RewardReason::EditBonus => "edit_bonus",
        }
    }
}

impl std::fmt::Display for RewardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which action spent stamina.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaminaAction {
    TaskCreate,
    TaskEdit,
}

impl StaminaAction {
    pub fn as_str(self) -> &'static str {
        match self {
            StaminaAction::TaskCreate => "task_create",
            StaminaAction::TaskEdit => "task_edit",
        }
    }
}

impl std::fmt::Display for StaminaAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One granted reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    /// Which currency was credited.
    pub currency: Currency,
    /// Amount credited, after flooring.
    pub amount: u64,
    /// Why it was granted.
    pub reason: RewardReason,
    /// The combined multiplier in effect when the amount was computed.
    pub multiplier: f64,
    /// When it was granted.
    pub at: DateTime<Utc>,
}

/// One stamina spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaminaEntry {
    /// The action that spent stamina.
    pub action: StaminaAction,
    /// Points spent.
    pub cost: u32,
    /// Balance immediately after the spend.
    pub remaining: u32,
    /// When it happened.
    pub at: DateTime<Utc>,
}

/// Append-only reward and stamina histories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    rewards: Vec<RewardEntry>,
    stamina: Vec<StaminaEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reward record.
    pub fn record_reward(&mut self, entry: RewardEntry) {
        self.rewards.push(entry);
    }

    /// Append a stamina-spend record.
    pub fn record_stamina(&mut self, entry: StaminaEntry) {
        self.stamina.push(entry);
    }

    /// All reward records, oldest first.
    pub fn rewards(&self) -> &[RewardEntry] {
        &self.rewards
    }

    /// All stamina-spend records, oldest first.
    pub fn stamina(&self) -> &[StaminaEntry] {
        &self.stamina
    }

    /// Sum of everything earned in one currency.
    pub fn total_earned(&self, currency: Currency) -> u64 {
        self.rewards
            .iter()
            .filter(|e| e.currency == currency)
            .map(|e| e.amount)
            .sum()
    }

    /// Sum of all stamina ever spent.
    pub fn total_stamina_spent(&self) -> u64 {
        self.stamina.iter().map(|e| u64::from(e.cost)).sum()
    }

    /// Reward records in one currency, oldest first.
    pub fn rewards_in(&self, currency: Currency) -> impl Iterator<Item = &RewardEntry> {
        self.rewards.iter().filter(move |e| e.currency == currency)
    }

    /// Reward records with a given reason, oldest first.
    pub fn rewards_with_reason(&self, reason: RewardReason) -> impl Iterator<Item = &RewardEntry> {
        self.rewards.iter().filter(move |e| e.reason == reason)
    }
}
