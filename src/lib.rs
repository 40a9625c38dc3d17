//! repomine library
//!
//! Cached access to the GitHub and Jira REST APIs, git commit traversal,
//! commit-to-issue linking and CSV dataset helpers for repository mining.

pub mod cache;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod git;
pub mod github;
pub mod jira;
pub mod link;
pub mod util;

pub use cache::CacheStore;
pub use error::{MineError, Result};
pub use fetch::{Fetch, HttpFetcher, Request};
