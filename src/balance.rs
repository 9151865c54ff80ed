//! Game-balance configuration: every tunable number in the reward economy.
//!
//! All payout, cost, and scoring formulas read their rates from here, so the
//! economy can be rebalanced without touching the calculation code. The stock
//! values reproduce the original balance sheet exactly. Persisted as TOML in
//! `$XDG_CONFIG_HOME/chronos/balance.toml`; missing keys fall back to the
//! stock values, so a balance file only needs the overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BalanceError;

/// Coin payout rates (task creation and edit bonuses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinRates {
    /// Base coins granted for creating a task, before multipliers.
    pub base_coin: u64,
    /// Multiplier added per detail level above the minimum.
    /// At the stock 0.25, a fully detailed task (level 5) doubles the base.
    pub detail_multiplier_step: f64,
    /// Multiplier applied when the task has prerequisite steps.
    pub prerequisite_bonus: f64,
    /// Multiplier applied when the task declares a benefit.
    pub benefit_bonus: f64,
    /// Coins granted per detail level gained by an edit.
    pub edit_bonus_per_level: u64,
}

impl Default for CoinRates {
    fn default() -> Self {
        Self {
            base_coin: 10,
            detail_multiplier_step: 0.25,
            prerequisite_bonus: 1.2,
            benefit_bonus: 1.2,
            edit_bonus_per_level: 5,
        }
    }
}

/// Crystal payout rates (task completion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalRates {
    /// Crystals granted per estimated hour of work, before multipliers.
    pub base_crystal_per_hour: f64,
    /// Multiplier applied when the task has prerequisite steps.
    pub prerequisite_bonus: f64,
    /// Multiplier applied when the task declares a benefit.
    pub benefit_bonus: f64,
    /// Multiplier for parent tasks (ones broken down into child tasks).
    pub parent_task_bonus: f64,
}

impl Default for CrystalRates {
    fn default() -> Self {
        Self {
            base_crystal_per_hour: 5.0,
            prerequisite_bonus: 1.2,
            benefit_bonus: 1.2,
            parent_task_bonus: 3.0,
        }
    }
}

/// Stamina pool size, action costs, and the recovery rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaRates {
    /// Upper bound of the stamina pool. Recovery saturates here.
    pub max_stamina: u32,
    /// Stamina a fresh profile starts with.
    pub initial_stamina: u32,
    /// Stamina points regained per elapsed hour.
    pub recovery_rate_per_hour: f64,
    /// Base cost of creating a task.
    pub task_create_cost: u32,
    /// Flat cost of editing a task.
    pub task_edit_cost: u32,
    /// Surcharge when the created task has prerequisite steps.
    pub prerequisite_cost: u32,
    /// Surcharge when the created task declares a benefit.
    pub benefit_cost: u32,
}

impl Default for StaminaRates {
    fn default() -> Self {
        Self {
            max_stamina: 100,
            initial_stamina: 100,
            recovery_rate_per_hour: 10.0,
            task_create_cost: 10,
            task_edit_cost: 5,
            prerequisite_cost: 2,
            benefit_cost: 2,
        }
    }
}

/// Thresholds the detail scorer awards points for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailThresholds {
    /// Minimum description length (in characters) to count as described.
    pub min_description_chars: usize,
    /// Minimum benefit-text length (in characters) to count as motivated.
    pub min_benefit_chars: usize,
    /// Minimum checklist entries to count as broken down.
    pub min_checklist_count: usize,
    /// Minimum estimated hours to count as a long-term task.
    pub min_long_term_hours: f64,
    /// Lowest detail level; every task starts here.
    pub min_detail_level: u8,
    /// Highest detail level; scoring clamps here.
    pub max_detail_level: u8,
}

impl Default for DetailThresholds {
    fn default() -> Self {
        Self {
            min_description_chars: 10,
            min_benefit_chars: 10,
            min_checklist_count: 3,
            min_long_term_hours: 10.0,
            min_detail_level: 1,
            max_detail_level: 5,
        }
    }
}

/// The full balance sheet, persisted as TOML.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameBalance {
    pub coin: CoinRates,
    pub crystal: CrystalRates,
    pub stamina: StaminaRates,
    pub detail: DetailThresholds,
}

impl GameBalance {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, BalanceError> {
        let content = std::fs::read_to_string(path).map_err(|e| BalanceError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| BalanceError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), BalanceError> {
        let content = toml::to_string_pretty(self).map_err(|e| BalanceError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BalanceError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| BalanceError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Check every invariant the calculation layer relies on.
    ///
    /// Integer fields cannot go negative by type; this guards the
    /// floating-point rates and the structural bounds.
    pub fn validate(&self) -> Result<(), BalanceError> {
        if self.stamina.max_stamina == 0 {
            return Err(BalanceError::ZeroMaxStamina {
                max_stamina: self.stamina.max_stamina,
            });
        }
        if self.stamina.initial_stamina > self.stamina.max_stamina {
            return Err(BalanceError::InitialExceedsMax {
                initial_stamina: self.stamina.initial_stamina,
                max_stamina: self.stamina.max_stamina,
            });
        }

        let rates = [
            ("coin.detail_multiplier_step", self.coin.detail_multiplier_step),
            ("coin.prerequisite_bonus", self.coin.prerequisite_bonus),
            ("coin.benefit_bonus", self.coin.benefit_bonus),
            ("crystal.base_crystal_per_hour", self.crystal.base_crystal_per_hour),
            ("crystal.prerequisite_bonus", self.crystal.prerequisite_bonus),
            ("crystal.benefit_bonus", self.crystal.benefit_bonus),
            ("crystal.parent_task_bonus", self.crystal.parent_task_bonus),
            ("stamina.recovery_rate_per_hour", self.stamina.recovery_rate_per_hour),
            ("detail.min_long_term_hours", self.detail.min_long_term_hours),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(BalanceError::NegativeRate { field, value });
            }
        }

        if self.detail.min_detail_level == 0
            || self.detail.min_detail_level > self.detail.max_detail_level
        {
            return Err(BalanceError::DetailBounds {
                min: self.detail.min_detail_level,
                max: self.detail.max_detail_level,
            });
        }

        Ok(())
    }
}
