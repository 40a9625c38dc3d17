// Local clone of a GitHub repository.
// Handles clone-if-absent and commit lookups by shelling out to git.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{MineError, Result};
use crate::github::RepoRef;

use super::commit::{Commit, LOG_FORMAT, parse_log};

pub const GITHUB_WEB_BASE: &str = "https://github.com";

/// Placeholder returned by the `*_or_unknown` lookups when a commit can't be read.
pub const UNKNOWN: &str = "-";

/// Outcome of a successful [`GitRepo::clone_repo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneStatus {
    Cloned,
    AlreadyPresent,
}

/// A repository checked out under `{repos_dir}/{owner}/{repo}`.
#[derive(Debug, Clone)]
pub struct GitRepo {
    repo: RepoRef,
    local_dir: PathBuf,
    remote_base: String,
}

impl GitRepo {
    pub fn new(repo: RepoRef, repos_dir: &Path) -> Self {
        let local_dir = repos_dir.join(&repo.owner).join(&repo.repo);
        Self {
            repo,
            local_dir,
            remote_base: GITHUB_WEB_BASE.to_string(),
        }
    }

    /// Clone from another host (or a local path) instead of github.com.
    pub fn with_remote_base(mut self, base: impl Into<String>) -> Self {
        self.remote_base = base.into();
        self
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    pub fn remote_url(&self) -> String {
        format!("{}/{}", self.remote_base, self.repo)
    }

    /// Clone unless the local directory already exists. `force` re-clones from scratch.
    pub fn clone_repo(&self, force: bool) -> Result<CloneStatus> {
        if !force && self.local_dir.exists() {
            tracing::debug!(dir = %self.local_dir.display(), "already exists");
            return Ok(CloneStatus::AlreadyPresent);
        }

        match self.run_clone(force) {
            Ok(()) => {
                tracing::debug!(repo = %self.repo, dir = %self.local_dir.display(), "cloned");
                Ok(CloneStatus::Cloned)
            }
            Err(e) => {
                tracing::error!(repo = %self.repo, error = %e, "could not clone");
                Err(e)
            }
        }
    }

    fn run_clone(&self, force: bool) -> Result<()> {
        let clone_error = |reason: String| MineError::Clone {
            repo: self.repo.to_string(),
            reason,
        };

        if force && self.local_dir.exists() {
            fs::remove_dir_all(&self.local_dir)?;
        }
        if let Some(parent) = self.local_dir.parent() {
            fs::create_dir_all(parent)?;
        }

        let output = Command::new("git")
            .arg("clone")
            .arg("--quiet")
            .arg(self.remote_url())
            .arg(&self.local_dir)
            .output()
            .map_err(|e| clone_error(e.to_string()))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(clone_error(stderr.trim().to_string()))
        }
    }

    /// Run git inside the clone and return stdout.
    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.local_dir)
            .args(args)
            .output()
            .map_err(|e| MineError::Git(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MineError::Git(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// All commits reachable from HEAD, oldest first.
    pub fn traverse_commits(&self) -> Result<Vec<Commit>> {
        let output = self.git(&["log", "--reverse", LOG_FORMAT])?;
        parse_log(&output)
    }

    /// Look up a single commit by hash.
    pub fn commit(&self, sha: &str) -> Result<Commit> {
        let not_found = || MineError::CommitNotFound {
            repo: self.repo.to_string(),
            sha: sha.to_string(),
        };

        if sha.is_empty() || sha.starts_with('-') {
            return Err(not_found());
        }

        let rev = format!("{}^{{commit}}", sha);
        let output = self
            .git(&["show", "--no-patch", LOG_FORMAT, rev.as_str()])
            .map_err(|_| not_found())?;

        parse_log(&output)?.into_iter().next().ok_or_else(not_found)
    }

    /// Commit author as "Name (email)".
    pub fn commit_author(&self, sha: &str) -> Result<String> {
        self.commit(sha).map(|c| c.author())
    }

    /// Commit author date as YYYY-MM-DD.
    pub fn commit_date(&self, sha: &str) -> Result<String> {
        self.commit(sha).map(|c| c.date())
    }

    /// Like [`Self::commit_author`], logging failures and returning [`UNKNOWN`].
    pub fn commit_author_or_unknown(&self, sha: &str) -> String {
        self.commit_author(sha).unwrap_or_else(|e| self.unknown(&e))
    }

    /// Like [`Self::commit_date`], logging failures and returning [`UNKNOWN`].
    pub fn commit_date_or_unknown(&self, sha: &str) -> String {
        self.commit_date(sha).unwrap_or_else(|e| self.unknown(&e))
    }

    fn unknown(&self, error: &MineError) -> String {
        tracing::error!(repo = %self.repo, %error, "commit lookup failed");
        UNKNOWN.to_string()
    }
}
