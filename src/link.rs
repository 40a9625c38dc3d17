// Commit-to-issue linking.
// Scans commit messages for issue keys such as PROJ-123 and groups commit hashes per key.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::Result;
use crate::git::{Commit, GitRepo};

static ISSUE_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+-\d+").unwrap());

/// Anything with a hash and a message.
pub trait CommitMessage {
    fn hash(&self) -> &str;
    fn message(&self) -> &str;
}

impl<T: CommitMessage + ?Sized> CommitMessage for &T {
    fn hash(&self) -> &str {
        (**self).hash()
    }

    fn message(&self) -> &str {
        (**self).message()
    }
}

impl CommitMessage for Commit {
    fn hash(&self) -> &str {
        &self.hash
    }

    fn message(&self) -> &str {
        &self.msg
    }
}

/// Issue key to the hashes of the commits that mention it, in first-mention order.
pub type IssueCommits = IndexMap<String, Vec<String>>;

/// Upper-cased issue keys mentioned in `message`, in order of appearance.
pub fn issue_keys(message: &str) -> Vec<String> {
    let upper = message.to_uppercase();
    ISSUE_KEY
        .find_iter(&upper)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Group commits by the issue keys their messages mention.
///
/// A commit is listed once per key, however often its message repeats that key:
/// "PROJ-1: revert PROJ-1" adds its hash to `PROJ-1` a single time rather than
/// once per match. Keys and hashes otherwise keep traversal order.
pub fn find_commit_issues<I>(commits: I) -> IssueCommits
where
    I: IntoIterator,
    I::Item: CommitMessage,
{
    let mut issues = IssueCommits::new();
    for commit in commits {
        for key in issue_keys(commit.message()) {
            let hashes = issues.entry(key).or_default();
            if hashes.last().map(String::as_str) != Some(commit.hash()) {
                hashes.push(commit.hash().to_string());
            }
        }
    }
    issues
}

/// Traverse a local clone and link its commits to issue keys.
pub fn link_repository(repo: &GitRepo) -> Result<IssueCommits> {
    let commits = repo.traverse_commits()?;
    tracing::debug!(repo = %repo.repo(), commits = commits.len(), "linking commits");
    Ok(find_commit_issues(&commits))
}
