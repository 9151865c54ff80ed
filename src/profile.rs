//! The user's economy state: currency totals and the stamina pool.
//!
//! One profile is the single authoritative balance record. The pure
//! calculators never touch it; the engine computes deltas and applies them
//! here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::balance::GameBalance;
use crate::reward::Currency;

/// One user's balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Coins held. Earned at creation and through edit bonuses.
    pub total_coins: u64,
    /// Crystals held. Earned at completion.
    pub total_crystals: u64,
    /// Current stamina, always within `[0, max_stamina]`.
    pub stamina: u32,
    /// The recovery clock: rest is measured from this instant.
    pub last_recovery_at: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile per the balance sheet: empty purse, starting stamina,
    /// recovery clock set to `now`.
    pub fn new(balance: &GameBalance, now: DateTime<Utc>) -> Self {
        Self {
            total_coins: 0,
            total_crystals: 0,
            stamina: balance.stamina.initial_stamina,
            last_recovery_at: now,
        }
    }

    /// Credit a reward to the matching purse.
    pub fn credit(&mut self, currency: Currency, amount: u64) {
        match currency {
            Currency::Coin => self.total_coins = self.total_coins.saturating_add(amount),
            Currency::Crystal => self.total_crystals = self.total_crystals.saturating_add(amount),
        }
    }

    /// Current holdings in one currency.
    pub fn total(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Coin => self.total_coins,
            Currency::Crystal => self.total_crystals,
        }
    }

    /// Deduct a stamina cost. The caller has already checked sufficiency.
    pub fn spend_stamina(&mut self, cost: u32) {
        debug_assert!(cost <= self.stamina);
        self.stamina = self.stamina.saturating_sub(cost);
    }
}
