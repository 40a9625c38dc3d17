//! Command-line interface for repomine
//!
//! Parses arguments with clap (falling back to environment variables for
//! API URLs, tokens and the cache directory) and runs one query, producing
//! the JSON value the binary prints.

use std::path::PathBuf;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};

use crate::cache::CacheStore;
use crate::error::Result;
use crate::git::GitRepo;
use crate::github::{GITHUB_API_BASE, GitHubClient, RepoRef};
use crate::jira::JiraClient;
use crate::link::link_repository;
use crate::util::days_between;

/// repomine - cached GitHub/Jira queries and commit-to-issue mining
#[derive(Parser, Debug)]
#[command(name = "repomine")]
#[command(about = "Cached GitHub and Jira queries plus commit-to-issue mining")]
#[command(version)]
pub struct Cli {
    /// Response cache directory; a temporary directory is used when omitted
    #[arg(long, global = true, env = "REPOMINE_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Use the per-user cache directory (~/.cache/repomine)
    #[arg(long, global = true, conflicts_with = "cache_dir")]
    pub user_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query the GitHub REST API
    Github(GithubArgs),
    /// Query the Jira REST API
    Jira(JiraArgs),
    /// Clone a repository and map issue keys to the commits mentioning them
    Link(LinkArgs),
    /// Days between two YYYY-MM-DD dates ("unknown" if either is malformed)
    DaysBetween { from: String, to: String },
}

#[derive(Args, Debug)]
pub struct GithubArgs {
    /// API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = GITHUB_API_BASE)]
    pub api_url: String,

    /// Access token sent as `authorization: token <TOKEN>`
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository as owner/repo
    #[arg(long, value_name = "OWNER/REPO")]
    pub repo: Option<RepoRef>,

    #[command(subcommand)]
    pub query: GithubQuery,
}

#[derive(Subcommand, Debug)]
pub enum GithubQuery {
    /// Current rate limit status (never cached)
    RateLimit,
    /// A single commit
    Commit { sha: String },
    /// Pull requests associated with a commit
    CommitPulls { sha: String },
    /// Commits of a pull request
    PrCommits { number: u64 },
    /// An issue or pull request
    Issue { number: u64 },
}

#[derive(Args, Debug)]
pub struct JiraArgs {
    /// API base URL, e.g. https://issues.apache.org/jira/rest/api/2
    #[arg(long, env = "JIRA_API_URL")]
    pub api_url: String,

    #[command(subcommand)]
    pub query: JiraQuery,
}

#[derive(Subcommand, Debug)]
pub enum JiraQuery {
    /// Full issue JSON
    Issue { key: String },
    /// Reporter as "Display Name (username)"
    Reporter { key: String },
    /// Creation date
    Created { key: String },
    /// Resolution date
    Resolved { key: String },
    /// Author of the comment at INDEX
    Commenter { key: String, index: usize },
    /// Date of the comment at INDEX
    CommentDate { key: String, index: usize },
    /// Authors of all comments
    Commenters { key: String },
    /// Date of the last comment
    LastComment { key: String },
}

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Repository as owner/repo
    #[arg(long, value_name = "OWNER/REPO")]
    pub repo: RepoRef,

    /// Where clones live; a temporary directory is used when omitted
    #[arg(long, value_name = "DIR")]
    pub repos_dir: Option<PathBuf>,

    /// Use the existing clone without trying to clone first
    #[arg(long)]
    pub no_clone: bool,
}

impl Cli {
    fn open_store(&self) -> Result<Rc<CacheStore>> {
        let store = if self.user_cache {
            CacheStore::user_default()?
        } else {
            CacheStore::new(self.cache_dir.clone())?
        };
        Ok(Rc::new(store))
    }

    /// Run the selected command and return its JSON result.
    pub fn run(&self) -> Result<Value> {
        match &self.command {
            Command::Github(args) => run_github(args, self.open_store()?),
            Command::Jira(args) => run_jira(args, self.open_store()?),
            Command::Link(args) => run_link(args),
            Command::DaysBetween { from, to } => {
                Ok(serde_json::to_value(days_between(from, to))?)
            }
        }
    }
}

fn run_github(args: &GithubArgs, store: Rc<CacheStore>) -> Result<Value> {
    let mut client = GitHubClient::new(store, args.token.clone()).with_api_url(&args.api_url);
    if let Some(repo) = &args.repo {
        client = client.with_repo(repo.clone());
    }

    match &args.query {
        GithubQuery::RateLimit => client.rate_limit(),
        GithubQuery::Commit { sha } => client.commit_info(sha, None, None),
        GithubQuery::CommitPulls { sha } => client.commit_pulls(sha, None, None),
        GithubQuery::PrCommits { number } => client.pull_request_commits(*number, None, None),
        GithubQuery::Issue { number } => client.issue_info(*number, None, None),
    }
}

fn run_jira(args: &JiraArgs, store: Rc<CacheStore>) -> Result<Value> {
    let client = JiraClient::new(store, &args.api_url);

    Ok(match &args.query {
        JiraQuery::Issue { key } => client.issue_info(key)?,
        JiraQuery::Reporter { key } => json!(client.issue_reporter(key)?),
        JiraQuery::Created { key } => json!(client.issue_reporting_date(key)?),
        JiraQuery::Resolved { key } => json!(client.issue_resolution_date(key)?),
        JiraQuery::Commenter { key, index } => json!(client.issue_commenter(key, *index)?),
        JiraQuery::CommentDate { key, index } => json!(client.issue_commenting_date(key, *index)?),
        JiraQuery::Commenters { key } => json!(client.all_issue_commenters(key)?),
        JiraQuery::LastComment { key } => json!(client.issue_last_commenting_date(key)?),
    })
}

fn run_link(args: &LinkArgs) -> Result<Value> {
    let temp_dir;
    let repos_dir = match &args.repos_dir {
        Some(dir) => dir.clone(),
        None => {
            temp_dir = tempfile::tempdir()?;
            temp_dir.path().to_path_buf()
        }
    };

    let repo = GitRepo::new(args.repo.clone(), &repos_dir);
    if !args.no_clone {
        // Already logged by clone_repo; traversal reports whatever is missing.
        let _ = repo.clone_repo(false);
    }

    Ok(serde_json::to_value(link_repository(&repo)?)?)
}
