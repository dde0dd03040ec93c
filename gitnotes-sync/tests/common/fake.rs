//! In-memory stand-in for a working copy and its remote.

use std::sync::Mutex;

use gitnotes_core::{RemoteComparison, Repository};
use gitnotes_git::{Git, GitError};

/// Mutable simulated repository.
#[derive(Debug, Clone, Default)]
pub struct World {
    pub dirty: bool,
    pub comparison: RemoteComparison,
    /// A merge leaves conflict markers behind instead of merging cleanly.
    pub conflicting_remote: bool,
    /// Pushes fail as if the remote refused them.
    pub reject_push: bool,
    /// Fetch fails as if the remote were unreachable.
    pub offline: bool,
    /// Actions report success but change nothing.
    pub inert: bool,
    /// Names of the mutating calls, in order.
    pub calls: Vec<&'static str>,
}

pub struct FakeGit {
    world: Mutex<World>,
}

impl FakeGit {
    pub fn new(world: World) -> Self {
        Self {
            world: Mutex::new(world),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.world.lock().expect("world lock").calls.clone()
    }
}

fn refused(command: &str, repo: &Repository, stderr: &str) -> GitError {
    GitError::Command {
        command: command.to_string(),
        path: repo.path.clone(),
        code: Some(1),
        stderr: stderr.to_string(),
    }
}

impl Git for FakeGit {
    fn is_dirty(&self, _repo: &Repository) -> Result<bool, GitError> {
        Ok(self.world.lock().expect("world lock").dirty)
    }

    fn remote_comparison(&self, repo: &Repository) -> Result<RemoteComparison, GitError> {
        let world = self.world.lock().expect("world lock");
        if world.offline {
            return Err(refused("fetch", repo, "could not read from remote repository"));
        }
        Ok(world.comparison)
    }

    fn stage_and_commit(&self, repo: &Repository) -> Result<(), GitError> {
        let mut world = self.world.lock().expect("world lock");
        world.calls.push("commit");
        if world.inert {
            return Ok(());
        }
        if !world.dirty {
            return Err(refused("commit", repo, "nothing to commit, working tree clean"));
        }
        world.dirty = false;
        world.comparison.ahead = true;
        Ok(())
    }

    fn push(&self, repo: &Repository) -> Result<(), GitError> {
        let mut world = self.world.lock().expect("world lock");
        world.calls.push("push");
        if world.inert {
            return Ok(());
        }
        if world.reject_push || world.comparison.behind {
            return Err(refused("push", repo, "[rejected]"));
        }
        world.comparison = RemoteComparison {
            has_upstream: true,
            ahead: false,
            behind: false,
        };
        Ok(())
    }

    fn merge(&self, _repo: &Repository) -> Result<(), GitError> {
        let mut world = self.world.lock().expect("world lock");
        world.calls.push("merge");
        if world.inert {
            return Ok(());
        }
        let diverged = world.comparison.ahead;
        world.comparison.behind = false;
        if world.conflicting_remote || diverged {
            // Conflicted or staged merge result, committed on the next step.
            world.dirty = true;
            world.comparison.ahead = true;
        }
        Ok(())
    }
}
