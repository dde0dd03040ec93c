pub mod start;
pub mod status;
pub mod sync;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use gitnotes_core::{config, Config};
use gitnotes_git::GitCli;
use gitnotes_sync::Reconciler;

/// Load `path`, or the default config in the home directory.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::default_path()?,
    };
    Config::load(&path).with_context(|| format!("failed to load config from {}", path.display()))
}

pub fn reconciler() -> Reconciler {
    Reconciler::new(Arc::new(GitCli::new()))
}
