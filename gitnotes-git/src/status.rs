//! Parsing of the `git status --branch --porcelain` header line.
//!
//! Five shapes are recognised for a tracked branch `b`:
//!
//! ```text
//! ## b                                  no upstream
//! ## b...origin/b                       level
//! ## b...origin/b [ahead 1]
//! ## b...origin/b [behind 1]
//! ## b...origin/b [ahead 1, behind 1]
//! ```
//!
//! Matching is exact: `## b-feature` or `## b...origin/other` never count as
//! branch `b`. Anything else (detached HEAD, `[gone]`, "No commits yet")
//! is a [`StatusParseError`].

use gitnotes_core::{BranchName, RemoteComparison};
use thiserror::Error;

const HEADER_PREFIX: &str = "## ";

/// A branch status line that does not describe the tracked branch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to parse branch status {line:?} for tracked branch '{branch}'")]
pub struct StatusParseError {
    pub line: String,
    pub branch: BranchName,
}

/// Parse the first line of `status` against `branch`.
pub fn parse_branch_status(
    status: &str,
    branch: &BranchName,
) -> Result<RemoteComparison, StatusParseError> {
    let line = status.trim().lines().next().unwrap_or_default().trim_end();
    let fail = || StatusParseError {
        line: line.to_string(),
        branch: branch.clone(),
    };

    let rest = line.strip_prefix(HEADER_PREFIX).ok_or_else(fail)?;
    if rest == branch.as_str() {
        return Ok(RemoteComparison::no_upstream());
    }

    let tracking = format!("{}...origin/{}", branch, branch);
    let tail = rest.strip_prefix(tracking.as_str()).ok_or_else(fail)?;
    if tail.is_empty() {
        return Ok(RemoteComparison {
            has_upstream: true,
            ..Default::default()
        });
    }

    let annotation = tail
        .strip_prefix(' ')
        .map(str::trim_start)
        .and_then(|t| t.strip_prefix('['))
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(fail)?;

    let mut comparison = RemoteComparison {
        has_upstream: true,
        ..Default::default()
    };
    for item in annotation.split(',') {
        let (word, count) = item.trim().split_once(' ').ok_or_else(fail)?;
        let count = count.trim();
        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return Err(fail());
        }
        let seen = match word {
            "ahead" => &mut comparison.ahead,
            "behind" => &mut comparison.behind,
            _ => return Err(fail()),
        };
        if *seen {
            return Err(fail());
        }
        *seen = true;
    }

    Ok(comparison)
}
