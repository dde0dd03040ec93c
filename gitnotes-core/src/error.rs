//! Error types for gitnotes-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading the repository configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure other than a missing file.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file did not exist at the expected path.
    #[error("config not found at {path}")]
    NotFound { path: PathBuf },

    /// JSON parse error on load.
    #[error("failed to parse config at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parse error on load (`.yaml` / `.yml` files).
    #[error("failed to parse config at {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document has no `repos` list.
    #[error("config at {path} doesn't contain a repos list")]
    MissingRepos { path: PathBuf },

    /// One entry of the `repos` list is malformed.
    #[error("invalid repo entry #{index} in {path}: {reason}")]
    InvalidEntry {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    /// The `watch` block has the wrong shape.
    #[error("invalid watch settings in {path}: {source}")]
    InvalidSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A polling or scheduling interval in the `watch` block is zero.
    #[error("watch setting `{field}` in {path} must be greater than zero")]
    ZeroInterval { path: PathBuf, field: &'static str },

    /// `dirs::home_dir()` returned `None`, so we cannot locate the default config.
    #[error("cannot determine home directory; set $HOME or pass --config")]
    HomeNotFound,
}
