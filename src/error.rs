// Error types for repomine.
// Covers remote fetches, cache I/O, payload field extraction, git and CSV errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MineError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing field in payload: {0}")]
    MissingField(String),

    #[error("Could not clone {repo}: {reason}")]
    Clone { repo: String, reason: String },

    #[error("Commit not found: {repo} {sha}")]
    CommitNotFound { repo: String, sha: String },

    #[error("git failed: {0}")]
    Git(String),

    #[error("No repository given and no default owner/repo configured")]
    MissingRepository,

    #[error("Invalid repository reference '{0}', expected owner/repo")]
    InvalidRepoRef(String),

    #[error("Missing {0} environment variable")]
    MissingConfig(&'static str),

    #[error("Invalid header value for '{0}'")]
    InvalidHeader(String),

    #[error("Record field '{0}' is not in the CSV header")]
    UnknownField(String),

    #[error("Cannot infer a CSV header from an empty dataset")]
    EmptyDataset,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MineError>;
