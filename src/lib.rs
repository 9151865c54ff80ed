// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # chronos-rewards
//!
//! The reward-balancing and stamina engine behind a gamified task manager:
//! pure, deterministic economy math with one state-owning facade on top.
//!
//! ## Architecture
//!
//! - **Detail scoring** (`detail`): a 1-5 planning score from four
//!   independent dimensions
//! - **Payouts** (`reward`): multiplicative coin/crystal formulas, floored
//!   to whole units
//! - **Stamina** (`stamina`): additive action costs, linear recovery
//!   saturating at the cap
//! - **Balance sheet** (`balance`): every tunable rate, TOML-backed
//! - **Engine** (`engine`): gates actions, applies deltas, and records
//!   history; the only owner of mutable state
//!
//! ## Library usage
//!
//! ```no_run
//! use chrono::Utc;
//! use chronos_rewards::balance::GameBalance;
//! use chronos_rewards::engine::Engine;
//! use chronos_rewards::task::TaskAttributes;
//!
//! let mut engine = Engine::new(GameBalance::default(), Utc::now()).unwrap();
//! let attrs = TaskAttributes::default()
//!     .with_description("migrate the billing database")
//!     .with_benefits("unblocks the invoicing team")
//!     .with_hours(10.0)
//!     .with_checklist(5);
//! let created = engine.create_task(&attrs, Utc::now()).unwrap();
//! println!("earned {} coins at detail level {}", created.coin_reward, created.detail_level);
//! ```

pub mod balance;
pub mod detail;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod paths;
pub mod profile;
pub mod reward;
pub mod session;
pub mod stamina;
pub mod task;
