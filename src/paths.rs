//! XDG-compliant path resolution for chronos-rewards.
//!
//! The balance sheet is configuration (`$XDG_CONFIG_HOME/chronos/`), the
//! session is state (`$XDG_STATE_HOME/chronos/`), following the XDG Base
//! Directory Specification.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(chronos::paths::no_home),
        help("Set the HOME environment variable or ensure a valid user profile exists.")
    )]
    NoHome,

    #[error("failed to create directory: {}", path.display())]
    #[diagnostic(
        code(chronos::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// XDG-compliant directories for chronos-rewards.
#[derive(Debug, Clone)]
pub struct ChronosPaths {
    /// `$XDG_CONFIG_HOME/chronos/`
    pub config_dir: PathBuf,
    /// `$XDG_STATE_HOME/chronos/`
    pub state_dir: PathBuf,
}

impl ChronosPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> PathResult<Self> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| PathError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join("chronos");

        let state_dir = std::env::var("XDG_STATE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".local/state"))
            .join("chronos");

        Ok(Self {
            config_dir,
            state_dir,
        })
    }

    /// Create both directories. Idempotent.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        for dir in [&self.config_dir, &self.state_dir] {
            std::fs::create_dir_all(dir).map_err(|e| PathError::CreateDir {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Path to the balance sheet.
    pub fn balance_file(&self) -> PathBuf {
        self.config_dir.join("balance.toml")
    }

    /// Path to the session state file.
    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_paths_live_under_chronos_dirs() {
        // Checks derivation without mutating env vars (unsafe in edition 2024).
        let paths = ChronosPaths::resolve().unwrap();
        assert!(paths.config_dir.to_string_lossy().contains("chronos"));
        assert!(paths.state_dir.to_string_lossy().contains("chronos"));
        assert!(paths.balance_file().starts_with(&paths.config_dir));
        assert!(paths.session_file().starts_with(&paths.state_dir));
    }

    #[test]
    fn file_names_are_fixed() {
        let paths = ChronosPaths {
            config_dir: PathBuf::from("/cfg/chronos"),
            state_dir: PathBuf::from("/state/chronos"),
        };
        assert_eq!(paths.balance_file(), PathBuf::from("/cfg/chronos/balance.toml"));
        assert_eq!(paths.session_file(), PathBuf::from("/state/chronos/session.json"));
    }

    #[test]
    fn ensure_dirs_is_idempotent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let paths = ChronosPaths {
            config_dir: tmp.path().join("config"),
            state_dir: tmp.path().join("state"),
        };
        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();
        assert!(paths.config_dir.is_dir());
        assert!(paths.state_dir.is_dir());
    }
}
