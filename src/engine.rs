//! Engine facade: top-level API for the reward economy.
//!
//! The `Engine` owns the balance sheet, the user profile, and the ledger,
//! and provides the public interface for previewing, creating, completing,
//! and editing tasks, and for recovering stamina over time. The pure
//! calculators in [`detail`](crate::detail), [`reward`](crate::reward), and
//! [`stamina`](crate::stamina) compute every number; the engine's job is
//! gating, applying deltas, and recording history.

use chrono::{DateTime, Duration, Utc};

use crate::balance::GameBalance;
use crate::detail::{self, DetailLevel};
use crate::error::{ChronosResult, EngineError};
use crate::ledger::{Ledger, RewardEntry, RewardReason, StaminaAction, StaminaEntry};
use crate::profile::UserProfile;
use crate::reward::{self, Currency};
use crate::stamina::{self, StaminaStatus};
use crate::task::{BonusFlags, TaskAttributes};

/// Projected numbers for a task before committing to it.
#[derive(Debug, Clone)]
pub struct TaskPreview {
    pub detail_level: DetailLevel,
    pub flags: BonusFlags,
    /// Coins creation would pay.
    pub coin_reward: u64,
    /// Crystals completion would pay.
    pub crystal_reward: u64,
    /// Stamina creation would cost.
    pub stamina_cost: u32,
    /// Whether the current balance covers the cost.
    pub affordable: bool,
}

/// Outcome of a committed task creation.
#[derive(Debug, Clone)]
pub struct TaskCreated {
    pub detail_level: DetailLevel,
    pub coin_reward: u64,
    pub multiplier: f64,
    pub stamina_cost: u32,
    pub stamina_remaining: u32,
}

/// Outcome of a task completion.
#[derive(Debug, Clone)]
pub struct TaskCompleted {
    pub crystal_reward: u64,
    pub multiplier: f64,
}

/// Outcome of a committed task edit.
#[derive(Debug, Clone)]
pub struct TaskEdited {
    pub old_level: DetailLevel,
    pub new_level: DetailLevel,
    /// Coins paid for levels gained; zero when the level did not rise.
    pub bonus_coin: u64,
    pub stamina_cost: u32,
    pub stamina_remaining: u32,
}

/// The chronos-rewards engine.
///
/// Owns the only authoritative copy of the user's balances. Operations
/// either succeed and apply all of their effects (spend, credit, and ledger
/// records together) or fail and change nothing.
#[derive(Debug)]
pub struct Engine {
    balance: GameBalance,
    profile: UserProfile,
    ledger: Ledger,
}

impl Engine {
    /// Create an engine with a fresh profile.
    pub fn new(balance: GameBalance, now: DateTime<Utc>) -> ChronosResult<Self> {
        balance.validate()?;

        tracing::info!(
            base_coin = balance.coin.base_coin,
            crystal_per_hour = balance.crystal.base_crystal_per_hour,
            max_stamina = balance.stamina.max_stamina,
            "initializing chronos engine"
        );

        let profile = UserProfile::new(&balance, now);
        Ok(Self {
            balance,
            profile,
            ledger: Ledger::new(),
        })
    }

    /// Create an engine around previously saved state.
    ///
    /// A profile saved under a higher cap is clamped to the sheet's
    /// `max_stamina`, so tuning the cap down takes effect on the next
    /// load instead of leaving the profile over-full.
    pub fn with_state(
        balance: GameBalance,
        mut profile: UserProfile,
        ledger: Ledger,
    ) -> ChronosResult<Self> {
        balance.validate()?;
        profile.stamina = profile.stamina.min(balance.stamina.max_stamina);
        Ok(Self {
            balance,
            profile,
            ledger,
        })
    }

    /// Project what a task would score, pay, and cost. Never mutates.
    pub fn preview_task(&self, attrs: &TaskAttributes) -> TaskPreview {
        let flags = attrs.bonus_flags();
        let level = detail::score_detail(attrs, &self.balance.detail);
        let cost = stamina::create_cost(flags, &self.balance.stamina);
        TaskPreview {
            detail_level: level,
            flags,
            coin_reward: reward::coin_reward(level, flags, &self.balance.coin),
            crystal_reward: reward::crystal_reward(
                attrs.estimated_hours,
                flags,
                attrs.has_child_tasks,
                &self.balance.crystal,
            ),
            stamina_cost: cost,
            affordable: stamina::is_sufficient(self.profile.stamina, cost),
        }
    }

    /// Create a task: gate on stamina, spend it, credit the coin reward.
    ///
    /// Fails with [`EngineError::InsufficientStamina`] before any state
    /// changes when the balance does not cover the cost.
    pub fn create_task(
        &mut self,
        attrs: &TaskAttributes,
        now: DateTime<Utc>,
    ) -> ChronosResult<TaskCreated> {
        let flags = attrs.bonus_flags();
        let cost = stamina::create_cost(flags, &self.balance.stamina);
        if !stamina::is_sufficient(self.profile.stamina, cost) {
            return Err(EngineError::InsufficientStamina {
                required: cost,
                available: self.profile.stamina,
            }
            .into());
        }

        let level = detail::score_detail(attrs, &self.balance.detail);
        let multiplier = reward::coin_multiplier(level, flags, &self.balance.coin);
        let coins = reward::coin_reward(level, flags, &self.balance.coin);

        self.profile.spend_stamina(cost);
        self.profile.credit(Currency::Coin, coins);
        self.ledger.record_stamina(StaminaEntry {
            action: StaminaAction::TaskCreate,
            cost,
            remaining: self.profile.stamina,
            at: now,
        });
        self.ledger.record_reward(RewardEntry {
            currency: Currency::Coin,
            amount: coins,
            reason: RewardReason::TaskCreate,
            multiplier,
            at: now,
        });

        tracing::debug!(
            level = %level,
            coins,
            cost,
            stamina = self.profile.stamina,
            "task created"
        );

        Ok(TaskCreated {
            detail_level: level,
            coin_reward: coins,
            multiplier,
            stamina_cost: cost,
            stamina_remaining: self.profile.stamina,
        })
    }

    /// Complete a task: credit the crystal reward.
    ///
    /// Completion is never gated; finishing work always pays.
    pub fn complete_task(&mut self, attrs: &TaskAttributes, now: DateTime<Utc>) -> TaskCompleted {
        let flags = attrs.bonus_flags();
        let multiplier =
            reward::crystal_multiplier(flags, attrs.has_child_tasks, &self.balance.crystal);
        let crystals = reward::crystal_reward(
            attrs.estimated_hours,
            flags,
            attrs.has_child_tasks,
            &self.balance.crystal,
        );

        self.profile.credit(Currency::Crystal, crystals);
        self.ledger.record_reward(RewardEntry {
            currency: Currency::Crystal,
            amount: crystals,
            reason: RewardReason::TaskComplete,
            multiplier,
            at: now,
        });

        tracing::debug!(crystals, "task completed");

        TaskCompleted {
            crystal_reward: crystals,
            multiplier,
        }
    }

    /// Edit a task: gate on the edit cost, spend it, and pay a bonus when
    /// the edit raised the detail level.
    ///
    /// `old_level` is the level the task scored before the edit; the new
    /// level is recomputed from `new_attrs`. Lowering the level never claws
    /// anything back.
    pub fn edit_task(
        &mut self,
        old_level: DetailLevel,
        new_attrs: &TaskAttributes,
        now: DateTime<Utc>,
    ) -> ChronosResult<TaskEdited> {
        let cost = stamina::edit_cost(&self.balance.stamina);
        if !stamina::is_sufficient(self.profile.stamina, cost) {
            return Err(EngineError::InsufficientStamina {
                required: cost,
                available: self.profile.stamina,
            }
            .into());
        }

        let new_level = detail::score_detail(new_attrs, &self.balance.detail);
        let bonus = reward::edit_bonus_coin(old_level, new_level, &self.balance.coin);

        self.profile.spend_stamina(cost);
        self.ledger.record_stamina(StaminaEntry {
            action: StaminaAction::TaskEdit,
            cost,
            remaining: self.profile.stamina,
            at: now,
        });
        if bonus > 0 {
            self.profile.credit(Currency::Coin, bonus);
            self.ledger.record_reward(RewardEntry {
                currency: Currency::Coin,
                amount: bonus,
                reason: RewardReason::EditBonus,
                multiplier: 1.0,
                at: now,
            });
        }

        tracing::debug!(
            old_level = %old_level,
            new_level = %new_level,
            bonus,
            "task edited"
        );

        Ok(TaskEdited {
            old_level,
            new_level,
            bonus_coin: bonus,
            stamina_cost: cost,
            stamina_remaining: self.profile.stamina,
        })
    }

    /// Apply time-based recovery against the profile's recovery clock.
    ///
    /// Only whole points apply, and only the time those points took is
    /// consumed from the clock; the fractional remainder keeps accruing, so
    /// frequent polling recovers exactly as much as one big call. Reaching
    /// the cap re-bases the clock to `now`, since time cannot be banked
    /// while full. Returns the points actually gained.
    pub fn recover_stamina(&mut self, now: DateTime<Utc>) -> u32 {
        let elapsed = now.signed_duration_since(self.profile.last_recovery_at);
        let hours = elapsed.num_milliseconds() as f64 / 3_600_000.0;
        if hours <= 0.0 {
            return 0;
        }

        let rates = &self.balance.stamina;
        let earned = stamina::recovered_points(hours, rates);
        if earned == 0 {
            return 0;
        }

        let before = self.profile.stamina;
        let after = stamina::recover(hours, before, rates);
        self.profile.stamina = after;

        if after == rates.max_stamina {
            self.profile.last_recovery_at = now;
        } else {
            let consumed_hours = f64::from(earned) / rates.recovery_rate_per_hour;
            self.profile.last_recovery_at +=
                Duration::milliseconds((consumed_hours * 3_600_000.0).round() as i64);
        }

        let applied = after.saturating_sub(before);
        tracing::debug!(applied, stamina = after, "stamina recovered");
        applied
    }

    /// The balance sheet in effect.
    pub fn balance(&self) -> &GameBalance {
        &self.balance
    }

    /// The user profile.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// The reward and stamina histories.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Snapshot of the profile with derived stamina readings.
    pub fn summary(&self) -> ProfileSummary {
        let max = self.balance.stamina.max_stamina;
        let pct = stamina::percentage(self.profile.stamina, max);
        ProfileSummary {
            total_coins: self.profile.total_coins,
            total_crystals: self.profile.total_crystals,
            stamina: self.profile.stamina,
            max_stamina: max,
            percentage: pct,
            status: StaminaStatus::from_percentage(pct),
            last_recovery_at: self.profile.last_recovery_at,
        }
    }
}

/// Profile snapshot with derived stamina readings.
#[derive(Debug, Clone)]
pub struct ProfileSummary {
    pub total_coins: u64,
    pub total_crystals: u64,
    pub stamina: u32,
    pub max_stamina: u32,
    pub percentage: u8,
    pub status: StaminaStatus,
    pub last_recovery_at: DateTime<Utc>,
}

impl std::fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "chronos profile")?;
        writeln!(f, "  coins:     {}", self.total_coins)?;
        writeln!(f, "  crystals:  {}", self.total_crystals)?;
        writeln!(
            f,
            "  stamina:   {}/{} ({}%, {})",
            self.stamina, self.max_stamina, self.percentage, self.status
        )?;
        writeln!(
            f,
            "  rested since: {}",
            self.last_recovery_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap()
    }

    fn engine() -> Engine {
        Engine::new(GameBalance::default(), t0()).unwrap()
    }

    fn rich_task() -> TaskAttributes {
        TaskAttributes::default()
            .with_description("migrate the billing database")
            .with_benefits("unblocks the invoicing team")
            .with_hours(10.0)
            .with_checklist(5)
    }

    #[test]
    fn invalid_balance_is_rejected() {
        let mut balance = GameBalance::default();
        balance.stamina.max_stamina = 0;
        assert!(Engine::new(balance, t0()).is_err());
    }

    #[test]
    fn preview_does_not_mutate() {
        let engine = engine();
        let preview = engine.preview_task(&rich_task());
        assert_eq!(preview.detail_level.get(), 5);
        assert_eq!(preview.coin_reward, 28);
        assert_eq!(preview.crystal_reward, 72);
        assert_eq!(preview.stamina_cost, 14);
        assert!(preview.affordable);
        assert_eq!(engine.profile().stamina, 100);
        assert!(engine.ledger().rewards().is_empty());
    }

    #[test]
    fn create_spends_credits_and_records() {
        let mut engine = engine();
        let created = engine.create_task(&rich_task(), t0()).unwrap();

        assert_eq!(created.detail_level.get(), 5);
        assert_eq!(created.coin_reward, 28);
        assert_eq!(created.stamina_cost, 14);
        assert_eq!(created.stamina_remaining, 86);

        assert_eq!(engine.profile().total_coins, 28);
        assert_eq!(engine.profile().stamina, 86);
        assert_eq!(engine.ledger().rewards().len(), 1);
        assert_eq!(engine.ledger().stamina().len(), 1);
        assert_eq!(engine.ledger().stamina()[0].remaining, 86);
    }

    #[test]
    fn bare_task_pays_base_and_costs_base() {
        let mut engine = engine();
        let created = engine.create_task(&TaskAttributes::default(), t0()).unwrap();
        assert_eq!(created.coin_reward, 10);
        assert_eq!(created.stamina_cost, 10);
    }

    #[test]
    fn create_fails_whole_when_stamina_is_short() {
        let mut engine = engine();
        // Nine bare creates and one edit leave 5 stamina.
        for _ in 0..9 {
            engine.create_task(&TaskAttributes::default(), t0()).unwrap();
        }
        engine
            .edit_task(DetailLevel::MIN, &TaskAttributes::default(), t0())
            .unwrap();
        assert_eq!(engine.profile().stamina, 5);

        let coins_before = engine.profile().total_coins;
        let rewards_before = engine.ledger().rewards().len();
        let err = engine.create_task(&TaskAttributes::default(), t0());
        assert!(err.is_err());
        // Nothing moved.
        assert_eq!(engine.profile().stamina, 5);
        assert_eq!(engine.profile().total_coins, coins_before);
        assert_eq!(engine.ledger().rewards().len(), rewards_before);
    }

    #[test]
    fn completion_is_never_gated() {
        let mut engine = engine();
        let parent = rich_task().as_parent();
        let done = engine.complete_task(&parent, t0());
        assert_eq!(done.crystal_reward, 216);
        assert_eq!(engine.profile().total_crystals, 216);
    }

    #[test]
    fn edit_that_raises_the_level_pays_a_bonus() {
        let mut engine = engine();
        let old = DetailLevel::new(2).unwrap();
        let edited = engine.edit_task(old, &rich_task(), t0()).unwrap();
        assert_eq!(edited.new_level.get(), 5);
        assert_eq!(edited.bonus_coin, 15);
        assert_eq!(edited.stamina_cost, 5);
        assert_eq!(engine.profile().total_coins, 15);
        assert_eq!(
            engine.ledger().rewards()[0].reason,
            RewardReason::EditBonus
        );
    }

    #[test]
    fn edit_that_does_not_raise_the_level_pays_nothing() {
        let mut engine = engine();
        let old = DetailLevel::new(4).unwrap();
        let edited = engine
            .edit_task(old, &TaskAttributes::default(), t0())
            .unwrap();
        assert_eq!(edited.bonus_coin, 0);
        assert_eq!(engine.profile().total_coins, 0);
        // The spend is still recorded; no zero-amount reward row.
        assert_eq!(engine.ledger().stamina().len(), 1);
        assert!(engine.ledger().rewards().is_empty());
    }

    #[test]
    fn recovery_applies_whole_points_and_keeps_the_remainder() {
        let mut engine = engine();
        engine.create_task(&rich_task(), t0()).unwrap();
        assert_eq!(engine.profile().stamina, 86);

        // 45 min at 10/h earns 7 points, consuming 42 min.
        let gained = engine.recover_stamina(t0() + Duration::minutes(45));
        assert_eq!(gained, 7);
        assert_eq!(engine.profile().stamina, 93);
        assert_eq!(
            engine.profile().last_recovery_at,
            t0() + Duration::minutes(42)
        );
    }

    #[test]
    fn recovery_rebases_the_clock_at_the_cap() {
        let mut engine = engine();
        engine.create_task(&TaskAttributes::default(), t0()).unwrap();

        let now = t0() + Duration::hours(5);
        let gained = engine.recover_stamina(now);
        assert_eq!(gained, 10);
        assert_eq!(engine.profile().stamina, 100);
        assert_eq!(engine.profile().last_recovery_at, now);
    }

    #[test]
    fn sub_point_elapsed_time_is_a_no_op() {
        let mut engine = engine();
        engine.create_task(&TaskAttributes::default(), t0()).unwrap();

        let gained = engine.recover_stamina(t0() + Duration::minutes(5));
        assert_eq!(gained, 0);
        // Clock untouched: the five minutes still count toward the next point.
        assert_eq!(engine.profile().last_recovery_at, t0());
    }

    #[test]
    fn clock_skew_backwards_is_a_no_op() {
        let mut engine = engine();
        engine.create_task(&TaskAttributes::default(), t0()).unwrap();
        let gained = engine.recover_stamina(t0() - Duration::hours(2));
        assert_eq!(gained, 0);
        assert_eq!(engine.profile().stamina, 90);
    }

    #[test]
    fn summary_reflects_the_profile() {
        let mut engine = engine();
        engine.create_task(&rich_task(), t0()).unwrap();
        engine.complete_task(&rich_task(), t0());

        let summary = engine.summary();
        assert_eq!(summary.total_coins, 28);
        assert_eq!(summary.total_crystals, 72);
        assert_eq!(summary.stamina, 86);
        assert_eq!(summary.percentage, 86);
        assert_eq!(summary.status, StaminaStatus::High);

        let text = summary.to_string();
        assert!(text.contains("86/100"));
        assert!(text.contains("high"));
    }

    #[test]
    fn with_state_resumes_where_the_profile_left_off() {
        let balance = GameBalance::default();
        let mut profile = UserProfile::new(&balance, t0());
        profile.credit(Currency::Coin, 40);
        profile.spend_stamina(30);

        let engine = Engine::with_state(balance, profile, Ledger::new()).unwrap();
        assert_eq!(engine.profile().total_coins, 40);
        assert_eq!(engine.profile().stamina, 70);
    }

    #[test]
    fn lowered_cap_clamps_a_restored_profile() {
        // Saved full under the stock cap of 100, reloaded under a sheet
        // tuned down to 50.
        let profile = UserProfile::new(&GameBalance::default(), t0());
        let mut balance = GameBalance::default();
        balance.stamina.max_stamina = 50;
        balance.stamina.initial_stamina = 50;

        let mut engine = Engine::with_state(balance, profile, Ledger::new()).unwrap();
        assert_eq!(engine.profile().stamina, 50);

        // Already at the new cap: rest applies nothing and re-bases the clock.
        let gained = engine.recover_stamina(t0() + Duration::hours(1));
        assert_eq!(gained, 0);
        assert_eq!(engine.profile().stamina, 50);
        assert_eq!(engine.profile().last_recovery_at, t0() + Duration::hours(1));
    }
}
