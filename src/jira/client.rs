// Jira API client.
// Fetches issues through the shared cache store and exposes per-field accessors.

use std::rc::Rc;

use serde_json::Value;

use crate::cache::CacheStore;
use crate::error::{MineError, Result};
use crate::fetch::Request;

use super::fields;

/// Jira REST API facade over a cache store.
///
/// Every accessor re-reads the full issue; after the first call that is a
/// cache hit, so repeated lookups on one issue cost a single request.
pub struct JiraClient {
    store: Rc<CacheStore>,
    api_url: String,
}

impl JiraClient {
    /// Create a client for an API base such as `https://issues.apache.org/jira/rest/api/2`.
    pub fn new(store: Rc<CacheStore>, api_url: impl Into<String>) -> Self {
        Self {
            store,
            api_url: api_url.into(),
        }
    }

    /// Create a client from the JIRA_API_URL environment variable.
    pub fn from_env(store: Rc<CacheStore>) -> Result<Self> {
        let api_url =
            std::env::var("JIRA_API_URL").map_err(|_| MineError::MissingConfig("JIRA_API_URL"))?;
        Ok(Self::new(store, api_url))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn request(&self, endpoint: &str) -> Request {
        Request::new(format!("{}{}", self.api_url, endpoint)).header("accept", "application/json")
    }

    fn get(&self, endpoint: &str) -> Result<Value> {
        self.store.get(&self.request(endpoint), false)
    }

    /// Get the full issue JSON.
    pub fn issue_info(&self, key: &str) -> Result<Value> {
        self.get(&format!("/issue/{}", key))
    }

    /// Reporter as "Display Name (username)".
    pub fn issue_reporter(&self, key: &str) -> Result<String> {
        fields::reporter(&self.issue_info(key)?)
    }

    /// Creation date as YYYY-MM-DD.
    pub fn issue_reporting_date(&self, key: &str) -> Result<String> {
        fields::created_date(&self.issue_info(key)?)
    }

    /// Resolution date as YYYY-MM-DD. Unresolved issues yield `MissingField`.
    pub fn issue_resolution_date(&self, key: &str) -> Result<String> {
        fields::resolution_date(&self.issue_info(key)?)
    }

    pub fn issue_commenter(&self, key: &str, index: usize) -> Result<String> {
        fields::commenter(&self.issue_info(key)?, index)
    }

    pub fn issue_commenting_date(&self, key: &str, index: usize) -> Result<String> {
        fields::commenting_date(&self.issue_info(key)?, index)
    }

    pub fn all_issue_commenters(&self, key: &str) -> Result<Vec<String>> {
        fields::all_commenters(&self.issue_info(key)?)
    }

    pub fn issue_last_commenting_date(&self, key: &str) -> Result<String> {
        fields::last_commenting_date(&self.issue_info(key)?)
    }
}
