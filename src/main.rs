//! chronos CLI: reward-balancing and stamina engine.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use chronos_rewards::balance::GameBalance;
use chronos_rewards::detail::DetailLevel;
use chronos_rewards::engine::Engine;
use chronos_rewards::paths::ChronosPaths;
use chronos_rewards::reward::{self, Currency};
use chronos_rewards::session::Session;
use chronos_rewards::stamina;
use chronos_rewards::task::{BonusFlags, TaskAttributes};

#[derive(Parser)]
#[command(name = "chronos", version, about = "Reward-balancing and stamina engine")]
struct Cli {
    /// Balance sheet to use instead of the default location.
    #[arg(long, global = true)]
    balance: Option<PathBuf>,

    /// Session file to use instead of the default location.
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default balance sheet and start a session.
    Init,

    /// Show the profile: balances, stamina, status.
    Status,

    /// Project what a task would score, pay, and cost.
    Preview {
        #[command(flatten)]
        task: TaskArgs,
    },

    /// Create, complete, or edit a task.
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Apply time-based stamina recovery now.
    Recover,

    /// Show the reward and stamina histories.
    Ledger {
        /// Restrict rewards to one currency (coin or crystal).
        #[arg(long)]
        currency: Option<Currency>,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Run the calculators against the balance sheet, touching no session.
    Simulate {
        #[command(subcommand)]
        what: SimulateWhat,
    },

    /// Print the effective balance sheet as TOML.
    Balance,
}

#[derive(Subcommand)]
enum TaskAction {
    /// Create a task: spends stamina, pays coins.
    Create {
        #[command(flatten)]
        task: TaskArgs,
    },

    /// Complete a task: pays crystals.
    Complete {
        #[command(flatten)]
        task: TaskArgs,
    },

    /// Edit a task: spends stamina, pays a bonus when the detail level rises.
    Edit {
        /// Detail level the task scored before the edit.
        #[arg(long)]
        old_level: u8,

        #[command(flatten)]
        task: TaskArgs,
    },
}

#[derive(Args)]
struct TaskArgs {
    /// Task description text.
    #[arg(long)]
    description: Option<String>,

    /// Expected benefit text.
    #[arg(long)]
    benefits: Option<String>,

    /// Estimated hours of work.
    #[arg(long, default_value = "1")]
    hours: f64,

    /// Number of checklist entries.
    #[arg(long, default_value = "0")]
    checklist: usize,

    /// The task is broken down into child tasks.
    #[arg(long)]
    children: bool,
}

impl TaskArgs {
    fn into_attributes(self) -> Result<TaskAttributes> {
        ensure_hours(self.hours)?;
        Ok(TaskAttributes {
            description: self.description,
            benefits: self.benefits,
            estimated_hours: self.hours,
            checklist_count: self.checklist,
            has_child_tasks: self.children,
        })
    }
}

#[derive(Subcommand)]
enum SimulateWhat {
    /// Coin payout for a detail level and bonus flags.
    Coin {
        /// Detail level.
        #[arg(long, default_value = "1")]
        level: u8,

        #[arg(long)]
        prerequisite: bool,

        #[arg(long)]
        benefit: bool,
    },

    /// Crystal payout for an estimate and bonus flags.
    Crystal {
        /// Estimated hours of work.
        #[arg(long, default_value = "1")]
        hours: f64,

        #[arg(long)]
        prerequisite: bool,

        #[arg(long)]
        benefit: bool,

        /// The task is a parent task.
        #[arg(long)]
        parent: bool,
    },

    /// Stamina balance after a given rest.
    Recovery {
        /// Hours of rest.
        #[arg(long)]
        hours: f64,

        /// Balance before the rest.
        #[arg(long)]
        current: u32,
    },

    /// Stamina cost of creating a task with the given flags.
    Cost {
        #[arg(long)]
        prerequisite: bool,

        #[arg(long)]
        benefit: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Resolve default locations only where the command line did not override.
    let (balance_path, session_path) = match (&cli.balance, &cli.session) {
        (Some(b), Some(s)) => (b.clone(), s.clone()),
        (b, s) => {
            let paths = ChronosPaths::resolve().into_diagnostic()?;
            if matches!(cli.command, Commands::Init) {
                paths.ensure_dirs().into_diagnostic()?;
            }
            (
                b.clone().unwrap_or_else(|| paths.balance_file()),
                s.clone().unwrap_or_else(|| paths.session_file()),
            )
        }
    };

    match cli.command {
        Commands::Init => {
            if balance_path.exists() {
                println!("Balance sheet already present at {}", balance_path.display());
            } else {
                GameBalance::default().save(&balance_path).into_diagnostic()?;
                println!("Wrote default balance sheet to {}", balance_path.display());
            }

            if session_path.exists() {
                println!("Session already present at {}", session_path.display());
                let engine = open_engine(&balance_path, &session_path)?;
                println!("{}", engine.summary());
            } else {
                let balance = load_balance(&balance_path)?;
                let engine = Engine::new(balance, Utc::now()).into_diagnostic()?;
                save_session(&engine, &session_path)?;
                println!("Started session at {}", session_path.display());
                println!("{}", engine.summary());
            }
        }

        Commands::Status => {
            let mut engine = open_engine(&balance_path, &session_path)?;
            engine.recover_stamina(Utc::now());
            save_session(&engine, &session_path)?;
            println!("{}", engine.summary());
        }

        Commands::Preview { task } => {
            let mut engine = open_engine(&balance_path, &session_path)?;
            engine.recover_stamina(Utc::now());
            save_session(&engine, &session_path)?;

            let preview = engine.preview_task(&task.into_attributes()?);
            println!("Task preview");
            println!("  detail level:   {}", preview.detail_level);
            println!(
                "  bonus flags:    prerequisite={} benefit={}",
                preview.flags.has_prerequisite, preview.flags.has_benefit
            );
            println!("  coin reward:    {}", preview.coin_reward);
            println!("  crystal reward: {}", preview.crystal_reward);
            println!(
                "  stamina cost:   {} ({})",
                preview.stamina_cost,
                if preview.affordable {
                    "affordable"
                } else {
                    "not affordable"
                }
            );
        }

        Commands::Task { action } => {
            let mut engine = open_engine(&balance_path, &session_path)?;
            engine.recover_stamina(Utc::now());

            match action {
                TaskAction::Create { task } => {
                    let created = engine
                        .create_task(&task.into_attributes()?, Utc::now())
                        .into_diagnostic()?;
                    save_session(&engine, &session_path)?;
                    println!("Created task (detail level {})", created.detail_level);
                    println!(
                        "  coins earned:  {} (x{:.2})",
                        created.coin_reward, created.multiplier
                    );
                    println!(
                        "  stamina spent: {} -> {} remaining",
                        created.stamina_cost, created.stamina_remaining
                    );
                }
                TaskAction::Complete { task } => {
                    let done = engine.complete_task(&task.into_attributes()?, Utc::now());
                    save_session(&engine, &session_path)?;
                    println!("Completed task");
                    println!(
                        "  crystals earned: {} (x{:.2})",
                        done.crystal_reward, done.multiplier
                    );
                }
                TaskAction::Edit { old_level, task } => {
                    let max_level = engine.balance().detail.max_detail_level;
                    let old = DetailLevel::new(old_level)
                        .filter(|l| l.get() <= max_level)
                        .ok_or_else(|| {
                            miette::miette!("old level must be between 1 and {max_level}")
                        })?;
                    let edited = engine
                        .edit_task(old, &task.into_attributes()?, Utc::now())
                        .into_diagnostic()?;
                    save_session(&engine, &session_path)?;
                    println!(
                        "Edited task (detail level {} -> {})",
                        edited.old_level, edited.new_level
                    );
                    println!("  bonus coins:   {}", edited.bonus_coin);
                    println!(
                        "  stamina spent: {} -> {} remaining",
                        edited.stamina_cost, edited.stamina_remaining
                    );
                }
            }
        }

        Commands::Recover => {
            let mut engine = open_engine(&balance_path, &session_path)?;
            let gained = engine.recover_stamina(Utc::now());
            save_session(&engine, &session_path)?;
            println!("Recovered {gained} stamina.");
            println!("{}", engine.summary());
        }

        Commands::Ledger { currency, json } => {
            let engine = open_engine(&balance_path, &session_path)?;
            let ledger = engine.ledger();

            if json {
                let out = match currency {
                    Some(c) => {
                        let rewards: Vec<_> = ledger.rewards_in(c).collect();
                        serde_json::to_string_pretty(&rewards).into_diagnostic()?
                    }
                    None => serde_json::to_string_pretty(ledger).into_diagnostic()?,
                };
                println!("{out}");
            } else {
                let rewards: Vec<_> = match currency {
                    Some(c) => ledger.rewards_in(c).collect(),
                    None => ledger.rewards().iter().collect(),
                };
                if rewards.is_empty() {
                    println!("No rewards recorded.");
                } else {
                    println!("Rewards ({}):", rewards.len());
                    for entry in &rewards {
                        println!(
                            "  {}  {:<8} {:>6}  {:<13} x{:.2}",
                            entry.at.format("%Y-%m-%d %H:%M:%S"),
                            entry.currency,
                            entry.amount,
                            entry.reason,
                            entry.multiplier
                        );
                    }
                }

                if currency.is_none() {
                    let spends = ledger.stamina();
                    if spends.is_empty() {
                        println!("No stamina spends recorded.");
                    } else {
                        println!("Stamina spends ({}):", spends.len());
                        for entry in spends {
                            println!(
                                "  {}  {:<12} {:>4}  -> {} remaining",
                                entry.at.format("%Y-%m-%d %H:%M:%S"),
                                entry.action,
                                entry.cost,
                                entry.remaining
                            );
                        }
                    }
                }
            }
        }

        Commands::Simulate { what } => {
            let balance = load_balance(&balance_path)?;
            balance.validate().into_diagnostic()?;

            match what {
                SimulateWhat::Coin {
                    level,
                    prerequisite,
                    benefit,
                } => {
                    let max_level = balance.detail.max_detail_level;
                    let level = DetailLevel::new(level)
                        .filter(|l| l.get() <= max_level)
                        .ok_or_else(|| {
                            miette::miette!("level must be between 1 and {max_level}")
                        })?;
                    let flags = BonusFlags {
                        has_prerequisite: prerequisite,
                        has_benefit: benefit,
                    };
                    let coins = reward::coin_reward(level, flags, &balance.coin);
                    let multiplier = reward::coin_multiplier(level, flags, &balance.coin);
                    println!("{coins} coins (x{multiplier:.2})");
                }
                SimulateWhat::Crystal {
                    hours,
                    prerequisite,
                    benefit,
                    parent,
                } => {
                    ensure_hours(hours)?;
                    let flags = BonusFlags {
                        has_prerequisite: prerequisite,
                        has_benefit: benefit,
                    };
                    let crystals = reward::crystal_reward(hours, flags, parent, &balance.crystal);
                    let multiplier = reward::crystal_multiplier(flags, parent, &balance.crystal);
                    println!("{crystals} crystals (x{multiplier:.2})");
                }
                SimulateWhat::Recovery { hours, current } => {
                    ensure_hours(hours)?;
                    let after = stamina::recover(hours, current, &balance.stamina);
                    println!(
                        "{current} -> {after} stamina (+{})",
                        after.saturating_sub(current)
                    );
                }
                SimulateWhat::Cost {
                    prerequisite,
                    benefit,
                } => {
                    let flags = BonusFlags {
                        has_prerequisite: prerequisite,
                        has_benefit: benefit,
                    };
                    let cost = stamina::create_cost(flags, &balance.stamina);
                    println!("{cost} stamina");
                }
            }
        }

        Commands::Balance => {
            let balance = load_balance(&balance_path)?;
            let toml = toml::to_string_pretty(&balance).into_diagnostic()?;
            print!("{toml}");
        }
    }

    Ok(())
}

/// Reject hour inputs the payout and recovery math has no meaning for.
fn ensure_hours(hours: f64) -> Result<()> {
    if !hours.is_finite() || hours < 0.0 {
        miette::bail!("hours must be a non-negative number");
    }
    Ok(())
}

/// Load the balance sheet, falling back to stock values when no file exists.
fn load_balance(path: &Path) -> Result<GameBalance> {
    if path.exists() {
        GameBalance::load(path).into_diagnostic()
    } else {
        Ok(GameBalance::default())
    }
}

/// Open the engine around the saved session, or a fresh profile when none
/// has been saved yet.
fn open_engine(balance_path: &Path, session_path: &Path) -> Result<Engine> {
    let balance = load_balance(balance_path)?;
    if session_path.exists() {
        let session = Session::load(session_path).into_diagnostic()?;
        Engine::with_state(balance, session.profile, session.ledger).into_diagnostic()
    } else {
        Engine::new(balance, Utc::now()).into_diagnostic()
    }
}

fn save_session(engine: &Engine, path: &Path) -> Result<()> {
    Session::of(engine).save(path).into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(hours: f64) -> TaskArgs {
        TaskArgs {
            description: Some("Ship the quarterly report".into()),
            benefits: None,
            hours,
            checklist: 0,
            children: false,
        }
    }

    #[test]
    fn task_args_map_onto_attributes() {
        let attrs = args(2.5).into_attributes().unwrap();
        assert_eq!(attrs.estimated_hours, 2.5);
        assert_eq!(attrs.description.as_deref(), Some("Ship the quarterly report"));
        assert!(!attrs.has_child_tasks);
    }

    #[test]
    fn negative_hours_are_rejected_at_the_flag() {
        let err = args(-3.0).into_attributes().unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn non_finite_hours_are_rejected_at_the_flag() {
        assert!(args(f64::NAN).into_attributes().is_err());
        assert!(args(f64::INFINITY).into_attributes().is_err());
    }

    #[test]
    fn parsed_complete_command_rejects_negative_hours() {
        let cli = Cli::try_parse_from([
            "chronos",
            "task",
            "complete",
            "--description",
            "Ship the quarterly report",
            "--hours=-3",
        ])
        .unwrap();
        let Commands::Task {
            action: TaskAction::Complete { task },
        } = cli.command
        else {
            panic!("parsed into the wrong command");
        };
        assert!(task.into_attributes().is_err());
    }
}
