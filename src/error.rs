//! Rich diagnostic error types for the chronos-rewards engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong and
//! how to fix it. The pure calculation layer never returns errors; these types
//! exist at the configuration and orchestration boundaries only.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the chronos-rewards engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source chains) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ChronosError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Balance(#[from] BalanceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),
}

// ---------------------------------------------------------------------------
// Balance errors
// ---------------------------------------------------------------------------

/// Errors loading, storing, or validating the game-balance configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum BalanceError {
    #[error("failed to read balance file: {}", path.display())]
    #[diagnostic(
        code(chronos::balance::read),
        help(
            "Check that the balance file exists and is readable. \
             Run `chronos init` to write the default configuration."
        )
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse balance file: {}", path.display())]
    #[diagnostic(
        code(chronos::balance::parse),
        help(
            "The balance file is not valid TOML. Fix the reported line, or \
             delete the file and run `chronos init` to regenerate the defaults."
        )
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write balance file: {}", path.display())]
    #[diagnostic(
        code(chronos::balance::write),
        help("Check directory permissions and available disk space.")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("max_stamina must be positive, got {max_stamina}")]
    #[diagnostic(
        code(chronos::balance::zero_max_stamina),
        help(
            "Stamina percentages divide by max_stamina, so it cannot be zero. \
             The stock configuration uses 100."
        )
    )]
    ZeroMaxStamina { max_stamina: u32 },

    #[error("initial_stamina {initial_stamina} exceeds max_stamina {max_stamina}")]
    #[diagnostic(
        code(chronos::balance::initial_exceeds_max),
        help("New profiles start at initial_stamina; it must fit within max_stamina.")
    )]
    InitialExceedsMax {
        initial_stamina: u32,
        max_stamina: u32,
    },

    #[error("{field} must be finite and non-negative, got {value}")]
    #[diagnostic(
        code(chronos::balance::negative_rate),
        help(
            "Rates and multipliers feed floating-point reward math; negative, \
             NaN, or infinite values would produce nonsense payouts."
        )
    )]
    NegativeRate { field: &'static str, value: f64 },

    #[error("invalid detail level bounds: min {min}, max {max}")]
    #[diagnostic(
        code(chronos::balance::detail_bounds),
        help(
            "Detail levels are 1-based: min_detail_level must be at least 1 \
             and must not exceed max_detail_level (stock values: 1 and 5)."
        )
    )]
    DetailBounds { min: u8, max: u8 },
}

// ---------------------------------------------------------------------------
// Engine errors
// ---------------------------------------------------------------------------

/// Errors from state-mutating engine operations.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error("insufficient stamina: need {required}, have {available}")]
    #[diagnostic(
        code(chronos::engine::insufficient_stamina),
        help(
            "Stamina recovers over time. Wait and run `chronos recover`, or \
             check the projected cost first with `chronos preview`."
        )
    )]
    InsufficientStamina { required: u32, available: u32 },
}

/// Convenience alias for functions returning chronos-rewards results.
pub type ChronosResult<T> = std::result::Result<T, ChronosError>;
