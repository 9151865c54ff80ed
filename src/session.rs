//! Session persistence: one profile and its histories as a JSON state file.
//!
//! The session file lives in `$XDG_STATE_HOME/chronos/session.json` by
//! default. JSON rather than TOML because the ledger is a growing stream of
//! records, and because the field names match the original export format.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Engine;
use crate::ledger::Ledger;
use crate::profile::UserProfile;

/// Errors from session file operations.
#[derive(Debug, Error, Diagnostic)]
pub enum SessionError {
    #[error("failed to read session file: {}", path.display())]
    #[diagnostic(
        code(chronos::session::read),
        help("Run `chronos init` to start a fresh session.")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse session file: {}", path.display())]
    #[diagnostic(
        code(chronos::session::parse),
        help(
            "The session file is not valid JSON. If it was edited by hand, \
             restore it from a backup; otherwise move it aside and run \
             `chronos init` to start over."
        )
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write session file: {}", path.display())]
    #[diagnostic(
        code(chronos::session::write),
        help("Check directory permissions and available disk space.")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// A saved session: the profile and the full ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub profile: UserProfile,
    pub ledger: Ledger,
}

impl Session {
    /// Snapshot an engine's state for saving.
    pub fn of(engine: &Engine) -> Self {
        Self {
            profile: engine.profile().clone(),
            ledger: engine.ledger().clone(),
        }
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> SessionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SessionError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| SessionError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save to a JSON file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> SessionResult<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| SessionError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| SessionError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::GameBalance;
    use chrono::{TimeZone, Utc};

    #[test]
    fn session_roundtrip_json() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("session.json");

        let balance = GameBalance::default();
        let now = Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap();
        let session = Session {
            profile: UserProfile::new(&balance, now),
            ledger: Ledger::new(),
        };
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.profile.stamina, 100);
        assert_eq!(loaded.profile.last_recovery_at, now);
    }

    #[test]
    fn missing_session_file_is_a_read_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nope.json");
        assert!(matches!(
            Session::load(&path),
            Err(SessionError::Read { .. })
        ));
    }

    #[test]
    fn corrupt_session_file_is_a_parse_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Session::load(&path),
            Err(SessionError::Parse { .. })
        ));
    }

    #[test]
    fn save_creates_parent_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("deep").join("state").join("session.json");

        let balance = GameBalance::default();
        let session = Session {
            profile: UserProfile::new(&balance, Utc::now()),
            ledger: Ledger::new(),
        };
        session.save(&path).unwrap();
        assert!(path.is_file());
    }
}
