//! `git-notes sync`: one-shot convergence.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use gitnotes_core::{Action, Config};
use gitnotes_sync::pipeline::{self, RepoOutcome, SyncScope};

/// Arguments for `git-notes sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Only sync the configured repository at this path.
    pub path: Option<PathBuf>,
}

impl SyncArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let scope = match self.path {
            Some(path) => SyncScope::Repository(path),
            None => SyncScope::All,
        };

        let outcomes = pipeline::run(&super::reconciler(), &config.repos, &scope);
        if outcomes.is_empty() {
            if let SyncScope::Repository(path) = &scope {
                bail!("no configured repository at {}", path.display());
            }
            println!("No repositories configured.");
            return Ok(());
        }

        for outcome in &outcomes {
            print_outcome(outcome);
        }

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        if failed > 0 {
            bail!("{failed} of {} repositories failed to sync", outcomes.len());
        }
        Ok(())
    }
}

fn print_outcome(outcome: &RepoOutcome) {
    let repo = &outcome.repo;
    match &outcome.result {
        Ok(report) if report.was_noop() => {
            println!("{} {repo} already in sync", "✓".green());
        }
        Ok(report) => {
            println!(
                "{} {repo} synced ({}) in {}ms",
                "✓".green(),
                describe(&report.actions),
                report.duration_ms,
            );
        }
        Err(err) => println!("{} {repo} failed: {err}", "✗".red()),
    }
}

fn describe(actions: &[Action]) -> String {
    actions
        .iter()
        .map(Action::to_string)
        .collect::<Vec<_>>()
        .join(" → ")
}
