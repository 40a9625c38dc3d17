// Remote fetcher.
// Performs the blocking HTTP GET behind the cache and decodes the body as JSON.

use std::collections::BTreeMap;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::{MineError, Result};

const USER_AGENT: &str = concat!("repomine/", env!("CARGO_PKG_VERSION"));

/// A single GET request: URL plus headers. Built per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Add a header, replacing any previous value for the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Transport used by the cache store on a miss or a forced fetch.
pub trait Fetch {
    fn fetch(&self, request: &Request) -> Result<Value>;
}

/// Blocking reqwest transport.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(MineError::Network)?;
        Ok(Self { client })
    }

    fn header_map(request: &Request) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| MineError::InvalidHeader(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| MineError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, request: &Request) -> Result<Value> {
        tracing::debug!(url = %request.url, "fetching");
        let response = self
            .client
            .get(&request.url)
            .headers(Self::header_map(request)?)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %request.url, %status, "non-success response");
        }

        let body = response.text()?;
        decode(&request.url, &body)
    }
}

/// Parse a response body, attributing failures to the URL that produced it.
pub fn decode(url: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|source| MineError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers_replace() {
        let request = Request::new("https://example.com")
            .header("accept", "text/plain")
            .header("accept", "application/json");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.headers["accept"], "application/json");
    }

    #[test]
    fn test_header_map_rejects_bad_value() {
        let request = Request::new("https://example.com").header("authorization", "token\nabc");

        match HttpFetcher::header_map(&request).unwrap_err() {
            MineError::InvalidHeader(name) => assert_eq!(name, "authorization"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_valid_json() {
        let value = decode("https://example.com", r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(value["a"][1], 2);
    }

    #[test]
    fn test_decode_invalid_json() {
        let url = "https://example.com/x";
        match decode(url, "<html>oops</html>").unwrap_err() {
            MineError::Decode { url, .. } => assert_eq!(url, "https://example.com/x"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
