// GitHub repository reference type.
// Identifies the owner/repo pair that repo-scoped endpoints are built for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MineError;

/// GitHub repository identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoRef {
    type Err = MineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = |part: &str| !part.is_empty() && !part.contains('/');
        match s.split_once('/') {
            Some((owner, repo)) if valid(owner) && valid(repo) => Ok(Self::new(owner, repo)),
            _ => Err(MineError::InvalidRepoRef(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_ref() {
        let repo: RepoRef = "apache/kafka".parse().unwrap();
        assert_eq!(repo, RepoRef::new("apache", "kafka"));
        assert_eq!(repo.to_string(), "apache/kafka");
    }

    #[test]
    fn test_parse_repo_ref_invalid() {
        for bad in ["kafka", "/kafka", "apache/", "a/b/c", ""] {
            assert!(bad.parse::<RepoRef>().is_err(), "{bad} should be rejected");
        }
    }
}
