// GitHub API endpoint functions.
// Each method returns the raw JSON body of one REST endpoint.

use serde_json::Value;

use crate::error::Result;

use super::client::GitHubClient;

// Repo-scoped endpoints take optional `owner` and `repo` overrides; whichever
// is `None` comes from the client's default repository.
impl GitHubClient {
    /// Get rate limit status. Always fetched live, never cached.
    pub fn rate_limit(&self) -> Result<Value> {
        self.get("/rate_limit", true)
    }

    /// Get pull requests associated with a commit.
    pub fn commit_pulls(
        &self,
        sha: &str,
        owner: Option<&str>,
        repo: Option<&str>,
    ) -> Result<Value> {
        let r = self.resolve(owner, repo)?;
        let endpoint = format!("/repos/{r}/commits/{sha}/pulls");
        self.get(&endpoint, false)
    }

    /// Get the commits of a pull request.
    pub fn pull_request_commits(
        &self,
        number: u64,
        owner: Option<&str>,
        repo: Option<&str>,
    ) -> Result<Value> {
        let r = self.resolve(owner, repo)?;
        let endpoint = format!("/repos/{r}/pulls/{number}/commits");
        self.get(&endpoint, false)
    }

    /// Get a single commit.
    pub fn commit_info(&self, sha: &str, owner: Option<&str>, repo: Option<&str>) -> Result<Value> {
        let r = self.resolve(owner, repo)?;
        let endpoint = format!("/repos/{r}/commits/{sha}");
        self.get(&endpoint, false)
    }

    /// Get an issue (or pull request) by number.
    pub fn issue_info(
        &self,
        number: u64,
        owner: Option<&str>,
        repo: Option<&str>,
    ) -> Result<Value> {
        let r = self.resolve(owner, repo)?;
        let endpoint = format!("/repos/{r}/issues/{number}");
        self.get(&endpoint, false)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use crate::cache::CacheStore;
    use crate::error::MineError;
    use crate::fetch::{Fetch, Request};
    use crate::github::RepoRef;

    use super::*;

    const REPOS: &str = "https://api.github.com/repos";
    const KAFKA: &str = "https://api.github.com/repos/apache/kafka";

    /// Records requested URLs and echoes them back as `{"url": ...}`.
    struct EchoFetcher {
        seen: Rc<RefCell<Vec<Request>>>,
    }

    impl Fetch for EchoFetcher {
        fn fetch(&self, request: &Request) -> Result<Value> {
            self.seen.borrow_mut().push(request.clone());
            Ok(json!({ "url": request.url }))
        }
    }

    fn anonymous() -> (GitHubClient, Rc<RefCell<Vec<Request>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let fetcher = EchoFetcher {
            seen: Rc::clone(&seen),
        };
        let store = Rc::new(CacheStore::with_fetcher(None, fetcher).unwrap());
        (GitHubClient::new(store, Some("t0k".to_string())), seen)
    }

    fn client() -> (GitHubClient, Rc<RefCell<Vec<Request>>>) {
        let (gh, seen) = anonymous();
        (gh.with_repo(RepoRef::new("apache", "kafka")), seen)
    }

    #[test]
    fn test_endpoint_urls() {
        let (gh, _seen) = client();

        let pulls = gh.commit_pulls("abc", None, None).unwrap();
        assert_eq!(pulls["url"], format!("{KAFKA}/commits/abc/pulls"));
        let commits = gh.pull_request_commits(7, None, None).unwrap();
        assert_eq!(commits["url"], format!("{KAFKA}/pulls/7/commits"));
        let commit = gh.commit_info("abc", None, None).unwrap();
        assert_eq!(commit["url"], format!("{KAFKA}/commits/abc"));
        let issue = gh.issue_info(42, None, None).unwrap();
        assert_eq!(issue["url"], format!("{KAFKA}/issues/42"));
    }

    #[test]
    fn test_full_override() {
        let (gh, _seen) = client();

        let value = gh.issue_info(1, Some("octo"), Some("hello")).unwrap();
        assert_eq!(value["url"], format!("{REPOS}/octo/hello/issues/1"));
    }

    #[test]
    fn test_owner_only_override() {
        let (gh, _seen) = client();

        let value = gh.issue_info(1, Some("confluentinc"), None).unwrap();
        assert_eq!(value["url"], format!("{REPOS}/confluentinc/kafka/issues/1"));
    }

    #[test]
    fn test_repo_only_override() {
        let (gh, _seen) = client();

        let value = gh.issue_info(3, None, Some("zookeeper")).unwrap();
        assert_eq!(value["url"], format!("{REPOS}/apache/zookeeper/issues/3"));
    }

    #[test]
    fn test_cached_endpoints_fetch_once() {
        let (gh, seen) = client();

        gh.commit_info("abc", None, None).unwrap();
        gh.commit_info("abc", None, None).unwrap();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].headers["authorization"], "token t0k");
    }

    #[test]
    fn test_rate_limit_always_live() {
        let (gh, seen) = client();

        gh.rate_limit().unwrap();
        gh.rate_limit().unwrap();

        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_missing_repository() {
        let (gh, seen) = anonymous();

        let err = gh.commit_info("abc", None, None).unwrap_err();
        assert!(matches!(err, MineError::MissingRepository));
        let err = gh.issue_info(7, Some("apache"), None).unwrap_err();
        assert!(matches!(err, MineError::MissingRepository));
        assert!(seen.borrow().is_empty());

        let value = gh.issue_info(1, Some("apache"), Some("kafka")).unwrap();
        assert_eq!(value["url"], format!("{KAFKA}/issues/1"));
    }
}
