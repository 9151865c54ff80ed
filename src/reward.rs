//! Reward payouts: coins for creating tasks, crystals for completing them.
//!
//! All payout math runs in `f64` with a single floor to integer at the end
//! of each formula (the crystal base is floored once more before the
//! multiplier, matching the published reward tables). Floor, never round:
//! the house keeps the fraction. Bonuses stack multiplicatively, so each
//! bonus scales everything before it.

use serde::{Deserialize, Serialize};

use crate::balance::{CoinRates, CrystalRates};
use crate::detail::DetailLevel;
use crate::task::BonusFlags;

/// The two reward currencies.
///
/// Coins pay out at task creation (planning effort), crystals at completion
/// (execution effort).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    Coin,
    Crystal,
}

impl Currency {
    pub fn as_str(self) -> &'static str {
        match self {
            Currency::Coin => "coin",
            Currency::Crystal => "crystal",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coin" => Ok(Currency::Coin),
            "crystal" => Ok(Currency::Crystal),
            other => Err(format!("unknown currency \"{other}\" (expected coin or crystal)")),
        }
    }
}

/// The combined coin multiplier for a task.
///
/// Starts at `1.0 + (level - 1) * detail_multiplier_step`, so level 1 pays
/// exactly the base, then multiplies in each earned bonus.
pub fn coin_multiplier(level: DetailLevel, flags: BonusFlags, rates: &CoinRates) -> f64 {
    let mut multiplier = 1.0 + f64::from(level.get() - 1) * rates.detail_multiplier_step;
    if flags.has_prerequisite {
        multiplier *= rates.prerequisite_bonus;
    }
    if flags.has_benefit {
        multiplier *= rates.benefit_bonus;
    }
    multiplier
}

/// Coins granted for creating a task: `floor(base_coin × multiplier)`.
pub fn coin_reward(level: DetailLevel, flags: BonusFlags, rates: &CoinRates) -> u64 {
    (rates.base_coin as f64 * coin_multiplier(level, flags, rates)).floor() as u64
}

/// The combined crystal multiplier for a task.
///
/// Unlike coins there is no detail term; prerequisite, benefit, and the
/// parent-task bonus multiply in when earned.
pub fn crystal_multiplier(flags: BonusFlags, is_parent_task: bool, rates: &CrystalRates) -> f64 {
    let mut multiplier = 1.0;
    if flags.has_prerequisite {
        multiplier *= rates.prerequisite_bonus;
    }
    if flags.has_benefit {
        multiplier *= rates.benefit_bonus;
    }
    if is_parent_task {
        multiplier *= rates.parent_task_bonus;
    }
    multiplier
}

/// Crystals granted for completing a task.
///
/// The hourly base is floored before the multiplier applies:
/// `floor(floor(hours × base_crystal_per_hour) × multiplier)`. Negative
/// hours are outside the contract.
pub fn crystal_reward(
    estimated_hours: f64,
    flags: BonusFlags,
    is_parent_task: bool,
    rates: &CrystalRates,
) -> u64 {
    debug_assert!(estimated_hours >= 0.0);

    let base = (estimated_hours * rates.base_crystal_per_hour).floor();
    (base * crystal_multiplier(flags, is_parent_task, rates)).floor() as u64
}

/// Coins granted when an edit raises the detail level.
///
/// `edit_bonus_per_level` per level gained; zero when the level stayed or
/// dropped. Rewards are never clawed back.
pub fn edit_bonus_coin(old: DetailLevel, new: DetailLevel, rates: &CoinRates) -> u64 {
    u64::from(new.gain_over(old)) * rates.edit_bonus_per_level
}
