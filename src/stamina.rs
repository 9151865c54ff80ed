//! Stamina: the resource pool that gates task actions.
//!
//! Creating and editing tasks spend stamina; elapsed time restores it at a
//! linear rate up to the configured maximum. Everything here is a pure
//! function over [`StaminaRates`]; the engine owns the authoritative balance
//! and applies the deltas computed here.

use serde::{Deserialize, Serialize};

use crate::balance::StaminaRates;
use crate::task::BonusFlags;

/// Traffic-light view of a stamina balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaminaStatus {
    Low,
    Medium,
    High,
}

impl StaminaStatus {
    /// Band for a whole-percent fill level: ≤25 low, ≤60 medium, else high.
    ///
    /// The three bands are contiguous and cover every percentage exactly
    /// once.
    pub fn from_percentage(pct: u8) -> Self {
        match pct {
            0..=25 => StaminaStatus::Low,
            26..=60 => StaminaStatus::Medium,
            _ => StaminaStatus::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StaminaStatus::Low => "low",
            StaminaStatus::Medium => "medium",
            StaminaStatus::High => "high",
        }
    }
}

impl std::fmt::Display for StaminaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a balance covers a cost. Exact cover counts.
///
/// Pre-flight check only; the caller decides what rejection looks like.
pub fn is_sufficient(current: u32, required: u32) -> bool {
    current >= required
}

/// Stamina cost of creating a task.
///
/// Base cost plus a flat surcharge per earned bonus flag. Additive, unlike
/// the reward side: committing to more only costs a little more.
pub fn create_cost(flags: BonusFlags, rates: &StaminaRates) -> u32 {
    let mut cost = rates.task_create_cost;
    if flags.has_prerequisite {
        cost += rates.prerequisite_cost;
    }
    if flags.has_benefit {
        cost += rates.benefit_cost;
    }
    cost
}

/// Stamina cost of editing a task. Flat, regardless of the edit.
pub fn edit_cost(rates: &StaminaRates) -> u32 {
    rates.task_edit_cost
}

/// Whole stamina points earned by `hours_elapsed` of rest, before any cap.
pub fn recovered_points(hours_elapsed: f64, rates: &StaminaRates) -> u32 {
    debug_assert!(hours_elapsed >= 0.0);
    (hours_elapsed * rates.recovery_rate_per_hour).floor() as u32
}

/// Balance after `hours_elapsed` of rest: linear recovery, saturating at
/// `max_stamina`. Zero elapsed time is a no-op.
pub fn recover(hours_elapsed: f64, current: u32, rates: &StaminaRates) -> u32 {
    current
        .saturating_add(recovered_points(hours_elapsed, rates))
        .min(rates.max_stamina)
}

/// Whole-percent fill level: `floor(current / max × 100)`.
pub fn percentage(current: u32, max: u32) -> u8 {
    debug_assert!(max > 0);
    debug_assert!(current <= max);
    (f64::from(current) / f64::from(max) * 100.0).floor() as u8
}

/// Status band for a balance under the given rates.
pub fn status(current: u32, rates: &StaminaRates) -> StaminaStatus {
    StaminaStatus::from_percentage(percentage(current, rates.max_stamina))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> StaminaRates {
        StaminaRates::default()
    }

    const BOTH: BonusFlags = BonusFlags {
        has_prerequisite: true,
        has_benefit: true,
    };

    #[test]
    fn create_cost_is_additive() {
        let r = rates();
        assert_eq!(create_cost(BonusFlags::default(), &r), 10);
        assert_eq!(
            create_cost(
                BonusFlags {
                    has_prerequisite: true,
                    has_benefit: false
                },
                &r
            ),
            12
        );
        assert_eq!(
            create_cost(
                BonusFlags {
                    has_prerequisite: false,
                    has_benefit: true
                },
                &r
            ),
            12
        );
        assert_eq!(create_cost(BOTH, &r), 14);
    }

    #[test]
    fn edit_cost_is_flat() {
        assert_eq!(edit_cost(&rates()), 5);
    }

    #[test]
    fn exact_cover_is_sufficient() {
        assert!(is_sufficient(10, 10));
        assert!(is_sufficient(11, 10));
        assert!(!is_sufficient(9, 10));
        assert!(is_sufficient(0, 0));
    }

    #[test]
    fn recovery_is_linear_until_the_cap() {
        let r = rates();
        assert_eq!(recover(1.0, 50, &r), 60);
        assert_eq!(recover(10.0, 0, &r), 100);
        assert_eq!(recover(20.0, 90, &r), 100);
        assert_eq!(recover(0.0, 50, &r), 50);
    }

    #[test]
    fn recovery_floors_fractional_points() {
        let r = rates();
        // 0.05 h × 10/h = 0.5 points: not yet a whole point.
        assert_eq!(recover(0.05, 50, &r), 50);
        assert_eq!(recover(2.5, 0, &r), 25);
        assert_eq!(recovered_points(0.25, &r), 2);
    }

    #[test]
    fn recovery_is_monotone_in_both_arguments() {
        let r = rates();
        let mut last = 0;
        for tenths in 0..120 {
            let hours = f64::from(tenths) / 10.0;
            let recovered = recover(hours, 30, &r);
            assert!(recovered >= last);
            last = recovered;
        }
        for current in 0..=100 {
            assert!(recover(1.0, current, &r) >= recover(1.0, current.saturating_sub(1), &r));
        }
    }

    #[test]
    fn recovery_never_exceeds_the_cap() {
        let r = rates();
        for hours in [0.0, 1.0, 24.0, 1000.0] {
            for current in [0, 50, 99, 100] {
                assert!(recover(hours, current, &r) <= r.max_stamina);
            }
        }
    }

    #[test]
    fn zero_rate_disables_recovery() {
        let r = StaminaRates {
            recovery_rate_per_hour: 0.0,
            ..Default::default()
        };
        assert_eq!(recover(100.0, 40, &r), 40);
    }

    #[test]
    fn percentage_floors() {
        assert_eq!(percentage(50, 100), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 66);
        assert_eq!(percentage(0, 100), 0);
        assert_eq!(percentage(100, 100), 100);
    }

    #[test]
    fn status_band_boundaries() {
        assert_eq!(StaminaStatus::from_percentage(0), StaminaStatus::Low);
        assert_eq!(StaminaStatus::from_percentage(25), StaminaStatus::Low);
        assert_eq!(StaminaStatus::from_percentage(26), StaminaStatus::Medium);
        assert_eq!(StaminaStatus::from_percentage(60), StaminaStatus::Medium);
        assert_eq!(StaminaStatus::from_percentage(61), StaminaStatus::High);
        assert_eq!(StaminaStatus::from_percentage(100), StaminaStatus::High);
    }

    #[test]
    fn every_percentage_maps_to_exactly_one_band() {
        let mut low = 0;
        let mut medium = 0;
        let mut high = 0;
        for pct in 0..=100u8 {
            match StaminaStatus::from_percentage(pct) {
                StaminaStatus::Low => low += 1,
                StaminaStatus::Medium => medium += 1,
                StaminaStatus::High => high += 1,
            }
        }
        assert_eq!((low, medium, high), (26, 35, 40));
    }

    #[test]
    fn status_respects_a_custom_maximum() {
        let r = StaminaRates {
            max_stamina: 200,
            ..Default::default()
        };
        // 52/200 = 26%: the band comes from the percentage, not the raw value.
        assert_eq!(status(52, &r), StaminaStatus::Medium);
        assert_eq!(status(50, &r), StaminaStatus::Low);
    }

    #[test]
    fn status_display_is_lowercase() {
        assert_eq!(StaminaStatus::Low.to_string(), "low");
        assert_eq!(StaminaStatus::Medium.to_string(), "medium");
        assert_eq!(StaminaStatus::High.to_string(), "high");
    }
}
