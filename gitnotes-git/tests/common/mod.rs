#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use gitnotes_core::Repository;
use tempfile::TempDir;

pub const BRANCH: &str = "main";

/// A bare `origin` plus a local working copy wired to it, both under one TempDir.
pub struct TestRepos {
    pub root: TempDir,
    pub remote: PathBuf,
    pub local: Repository,
}

pub fn setup_repos() -> TestRepos {
    let root = TempDir::new().expect("tempdir");
    let remote = root.path().join("remote.git");
    let local = root.path().join("local");
    fs::create_dir_all(&remote).expect("mkdir remote");
    fs::create_dir_all(&local).expect("mkdir local");

    git(&remote, &["init", "--bare", "-b", BRANCH]);
    git(&local, &["init", "-b", BRANCH]);
    git(&local, &["remote", "add", "origin", &remote.display().to_string()]);

    TestRepos {
        root,
        remote,
        local: Repository::new(local, BRANCH),
    }
}

/// Run git with a throwaway identity and assert success.
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {} failed in {}: {}",
        args.join(" "),
        dir.display(),
        String::from_utf8_lossy(&output.stderr),
    );
}

pub fn write_file(repo: &Repository, name: &str, content: &str) {
    fs::write(repo.path.join(name), content).expect("write file");
}

pub fn commit_all(repo: &Repository, message: &str) {
    git(&repo.path, &["add", "--all"]);
    git(&repo.path, &["commit", "-m", message]);
}

pub fn push(repo: &Repository) {
    git(&repo.path, &["push", "origin", BRANCH, "-u"]);
}

/// Push a commit touching `test.md` from a second clone of the remote.
pub fn make_conflict(repos: &TestRepos) {
    let other = repos.root.path().join("another_local");
    git(
        repos.root.path(),
        &[
            "clone",
            &repos.remote.display().to_string(),
            &other.display().to_string(),
        ],
    );
    git(&other, &["checkout", BRANCH]);
    fs::write(other.join("test.md"), "Cause conflict").expect("write conflicting file");
    git(&other, &["add", "--all"]);
    git(&other, &["commit", "-m", "Test remote"]);
    git(&other, &["push", "origin", BRANCH]);
}
