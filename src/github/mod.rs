// GitHub API module.
// Cached access to the GitHub REST endpoints used for commit and pull request mining.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use types::RepoRef;
