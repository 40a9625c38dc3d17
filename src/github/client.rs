// GitHub API client.
// Builds authenticated GitHub requests and routes them through the shared cache store.

use std::rc::Rc;

use serde_json::Value;

use crate::cache::CacheStore;
use crate::error::{MineError, Result};
use crate::fetch::Request;

use super::types::RepoRef;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub API facade over a cache store.
pub struct GitHubClient {
    store: Rc<CacheStore>,
    api_url: String,
    token: Option<String>,
    default_repo: Option<RepoRef>,
}

impl GitHubClient {
    /// Create a client against the public API. `token` may be `None` for anonymous access.
    pub fn new(store: Rc<CacheStore>, token: Option<String>) -> Self {
        Self {
            store,
            api_url: GITHUB_API_BASE.to_string(),
            token,
            default_repo: None,
        }
    }

    /// Create a client from GITHUB_TOKEN and the optional GITHUB_API_URL.
    pub fn from_env(store: Rc<CacheStore>) -> Result<Self> {
        let token =
            std::env::var("GITHUB_TOKEN").map_err(|_| MineError::MissingConfig("GITHUB_TOKEN"))?;
        let client = Self::new(store, Some(token));
        Ok(match std::env::var("GITHUB_API_URL") {
            Ok(url) => client.with_api_url(url),
            Err(_) => client,
        })
    }

    /// Use a different API base URL (e.g. a GitHub Enterprise host).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the repository used when an endpoint is called without an override.
    pub fn with_repo(mut self, repo: RepoRef) -> Self {
        self.default_repo = Some(repo);
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn default_repo(&self) -> Option<&RepoRef> {
        self.default_repo.as_ref()
    }

    /// Owner and repo for one call. Each part falls back to the configured default on its own.
    pub(super) fn resolve(&self, owner: Option<&str>, repo: Option<&str>) -> Result<RepoRef> {
        let default = self.default_repo.as_ref();
        let owner = owner.or(default.map(|d| d.owner.as_str()));
        let repo = repo.or(default.map(|d| d.repo.as_str()));

        match (owner, repo) {
            (Some(owner), Some(repo)) => Ok(RepoRef::new(owner, repo)),
            _ => Err(MineError::MissingRepository),
        }
    }

    /// Build the request for an endpoint path such as `/rate_limit`.
    pub fn request(&self, endpoint: &str) -> Request {
        let url = format!("{}{}", self.api_url, endpoint);
        let request = Request::new(url).header("accept", GITHUB_ACCEPT);
        match &self.token {
            Some(token) => request.header("authorization", format!("token {}", token)),
            None => request,
        }
    }

    /// GET an endpoint, through the cache unless `force` is set.
    pub fn get(&self, endpoint: &str, force: bool) -> Result<Value> {
        self.store.get(&self.request(endpoint), force)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Fetch;

    struct NoFetch;

    impl Fetch for NoFetch {
        fn fetch(&self, _request: &Request) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    fn client(token: Option<&str>) -> GitHubClient {
        let store = CacheStore::with_fetcher(None, NoFetch).unwrap();
        GitHubClient::new(Rc::new(store), token.map(str::to_string))
    }

    #[test]
    fn test_request_headers_with_token() {
        let request = client(Some("s3cret")).request("/rate_limit");

        assert_eq!(request.url, "https://api.github.com/rate_limit");
        assert_eq!(request.headers["accept"], "application/vnd.github.v3+json");
        assert_eq!(request.headers["authorization"], "token s3cret");
    }

    #[test]
    fn test_request_without_token_is_anonymous() {
        let request = client(None).request("/rate_limit");
        assert!(!request.headers.contains_key("authorization"));
    }

    #[test]
    fn test_custom_api_url() {
        let gh = client(None).with_api_url("https://ghe.example.com/api/v3");
        assert_eq!(gh.request("/x").url, "https://ghe.example.com/api/v3/x");
    }

    #[test]
    fn test_resolve_falls_back_per_part() {
        let gh = client(None).with_repo(RepoRef::new("apache", "kafka"));

        let default = gh.resolve(None, None).unwrap();
        assert_eq!(default.to_string(), "apache/kafka");
        let owner_only = gh.resolve(Some("confluentinc"), None).unwrap();
        assert_eq!(owner_only.to_string(), "confluentinc/kafka");
        let repo_only = gh.resolve(None, Some("zookeeper")).unwrap();
        assert_eq!(repo_only.to_string(), "apache/zookeeper");
        let both = gh.resolve(Some("octo"), Some("hello")).unwrap();
        assert_eq!(both.to_string(), "octo/hello");
    }

    #[test]
    fn test_resolve_without_default() {
        let gh = client(None);

        let both = gh.resolve(Some("octo"), Some("hello")).unwrap();
        assert_eq!(both.to_string(), "octo/hello");
        let err = gh.resolve(None, None).unwrap_err();
        assert!(matches!(err, MineError::MissingRepository));
        let err = gh.resolve(Some("octo"), None).unwrap_err();
        assert!(matches!(err, MineError::MissingRepository));
    }
}
