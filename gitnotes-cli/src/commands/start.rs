//! `git-notes start`: foreground supervision.

use anyhow::{Context, Result};
use gitnotes_core::Config;

pub fn run(config: &Config) -> Result<()> {
    gitnotes_daemon::start_blocking(config).context("git-notes daemon stopped with an error")
}
