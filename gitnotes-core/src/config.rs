//! Repository list and watch timings.
//!
//! # File format
//!
//! ```text
//! {
//!   "repos": [
//!     "/home/me/notes",                             (tracks `master`)
//!     { "path": "/home/me/todos", "branch": "trunk" }
//!   ],
//!   "watch": { "check_interval_ms": 1000, ... }     (optional)
//! }
//! ```
//!
//! Files ending in `.yaml` / `.yml` are read with serde_yaml; everything else
//! is JSON. Both are validated through the same `serde_json::Value` path so
//! error messages are identical.
//!
//! # API pattern
//!
//! - `default_path_at(home)`: explicit home; used in tests with `TempDir`
//! - `default_path()`: derives home from `dirs::home_dir()`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::types::{BranchName, Repository};

/// Branch tracked by entries given as a bare path.
pub const DEFAULT_BRANCH: &str = "master";

/// File name of the default config inside the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".git-notes.json";

/// Loaded configuration: repositories in file order plus watch timings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repos: Vec<Repository>,
    pub watch: WatchSettings,
}

/// Polling and scheduling intervals shared by every supervised repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Pause between two dirty checks of the working tree.
    pub check_interval_ms: u64,
    /// Debounce before a detected change is announced.
    pub delay_before_event_ms: u64,
    /// Cool-down after an announcement before polling resumes.
    pub delay_after_event_ms: u64,
    /// Period of the unconditional reconciliation timer.
    pub schedule_interval_secs: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            check_interval_ms: 1_000,
            delay_before_event_ms: 1_000,
            delay_after_event_ms: 5_000,
            schedule_interval_secs: 300,
        }
    }
}

impl WatchSettings {
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }

    pub fn delay_before_event(&self) -> Duration {
        Duration::from_millis(self.delay_before_event_ms)
    }

    pub fn delay_after_event(&self) -> Duration {
        Duration::from_millis(self.delay_after_event_ms)
    }

    pub fn schedule_interval(&self) -> Duration {
        Duration::from_secs(self.schedule_interval_secs)
    }

    /// Name of the first interval that is zero. Delays may be zero.
    pub fn zero_interval(&self) -> Option<&'static str> {
        if self.check_interval_ms == 0 {
            Some("check_interval_ms")
        } else if self.schedule_interval_secs == 0 {
            Some("schedule_interval_secs")
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.git-notes.json`, pure, no I/O.
pub fn default_path_at(home: &Path) -> PathBuf {
    home.join(DEFAULT_CONFIG_FILE)
}

/// `default_path_at` convenience wrapper.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    Ok(default_path_at(&home))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

impl Config {
    /// Read and validate the config at `path`.
    ///
    /// Returns `ConfigError::NotFound` if absent, a parse error (with path)
    /// for malformed documents and `ConfigError::InvalidEntry` naming the
    /// offending index for bad repo entries.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(err) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        };

        let doc = if is_yaml(path) {
            serde_yaml::from_str::<Value>(&contents).map_err(|e| ConfigError::Yaml {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            serde_json::from_str::<Value>(&contents).map_err(|e| ConfigError::Json {
                path: path.to_path_buf(),
                source: e,
            })?
        };

        Self::from_value(path, doc)
    }

    /// Validate an already-parsed document. `origin` is only used in errors.
    pub fn from_value(origin: &Path, doc: Value) -> Result<Self, ConfigError> {
        let Some(entries) = doc.get("repos").and_then(Value::as_array) else {
            return Err(ConfigError::MissingRepos {
                path: origin.to_path_buf(),
            });
        };

        let repos = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_entry(origin, index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        let watch = match doc.get("watch") {
            None | Some(Value::Null) => WatchSettings::default(),
            Some(raw) => serde_json::from_value(raw.clone()).map_err(|e| {
                ConfigError::InvalidSettings {
                    path: origin.to_path_buf(),
                    source: e,
                }
            })?,
        };
        if let Some(field) = watch.zero_interval() {
            return Err(ConfigError::ZeroInterval {
                path: origin.to_path_buf(),
                field,
            });
        }

        Ok(Self { repos, watch })
    }
}

fn parse_entry(origin: &Path, index: usize, entry: &Value) -> Result<Repository, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEntry {
        path: origin.to_path_buf(),
        index,
        reason,
    };

    match entry {
        Value::String(path) => Ok(Repository::new(path.as_str(), DEFAULT_BRANCH)),
        Value::Object(fields) => {
            let path = fields
                .get("path")
                .ok_or_else(|| invalid("missing field `path`".to_string()))?
                .as_str()
                .ok_or_else(|| invalid("`path` must be a string".to_string()))?;
            let branch = fields
                .get("branch")
                .ok_or_else(|| invalid("missing field `branch`".to_string()))?
                .as_str()
                .ok_or_else(|| invalid("`branch` must be a string".to_string()))?;
            if branch.trim().is_empty() {
                return Err(invalid("`branch` must not be empty".to_string()));
            }
            Ok(Repository {
                path: PathBuf::from(path),
                branch: BranchName::from(branch),
            })
        }
        other => Err(invalid(format!("unexpected value {other}"))),
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}
