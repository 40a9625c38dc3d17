// Cache key derivation.
// Maps a request URL to a filesystem-safe relative path under the cache root.

use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the file holding the response body inside an entry directory.
pub const ENTRY_FILE: &str = "json";

/// Relative cache path derived from a URL with its scheme and trailing slash removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_url(url: &str) -> Self {
        let rest = strip_scheme(url);
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let key = rest
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(sanitize_segment)
            .collect::<Vec<_>>()
            .join("/");

        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path to the entry's `json` file below `root`.
    pub fn entry_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.0.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.join(ENTRY_FILE)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drop a leading `scheme://`, if the prefix is a well-formed scheme.
fn strip_scheme(url: &str) -> &str {
    match url.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => url,
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(is_scheme_char),
        _ => false,
    }
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// Percent-encode characters that are unsafe in file names.
/// `%` is encoded too so distinct URLs keep distinct keys.
fn sanitize_segment(segment: &str) -> String {
    match segment {
        "." => return "%2E".to_string(),
        ".." => return "%2E%2E".to_string(),
        _ => {}
    }

    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => {
                out.push_str(&format!("%{:02X}", c as u32));
            }
            c if c.is_ascii_control() => out.push_str(&format!("%{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::Component;

    use super::*;

    #[test]
    fn test_scheme_and_trailing_slash_stripped() {
        let key = CacheKey::from_url("https://api.example.com/repos/a/b");
        assert_eq!(key.as_str(), "api.example.com/repos/a/b");

        let trailing = CacheKey::from_url("https://api.example.com/repos/a/b/");
        assert_eq!(trailing, key);
        let plain_http = CacheKey::from_url("http://api.example.com/repos/a/b");
        assert_eq!(plain_http, key);
    }

    #[test]
    fn test_only_one_trailing_slash_stripped() {
        let once = CacheKey::from_url("https://h/x/");
        let twice = CacheKey::from_url("https://h/x//");
        // Empty segments collapse, so both land on the same path.
        assert_eq!(once, twice);
        assert_eq!(once.as_str(), "h/x");
    }

    #[test]
    fn test_url_without_scheme() {
        let key = CacheKey::from_url("jira.example.org/rest/api/2/issue/PROJ-1");
        assert_eq!(key.as_str(), "jira.example.org/rest/api/2/issue/PROJ-1");
    }

    #[test]
    fn test_unsafe_characters_encoded() {
        let key = CacheKey::from_url("https://localhost:8080/search?q=a|b");
        assert_eq!(key.as_str(), "localhost%3A8080/search%3Fq=a%7Cb");
    }

    #[test]
    fn test_percent_encoding_keeps_keys_distinct() {
        let raw = CacheKey::from_url("https://h/a:b");
        let encoded = CacheKey::from_url("https://h/a%3Ab");
        assert_ne!(raw, encoded);
    }

    #[test]
    fn test_dot_segments_cannot_escape_root() {
        let key = CacheKey::from_url("https://h/../../etc/passwd");
        assert_eq!(key.as_str(), "h/%2E%2E/%2E%2E/etc/passwd");

        let root = Path::new("/cache");
        let path = key.entry_path(root);
        assert!(path.starts_with(root));
        assert!(!path.components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn test_entry_path() {
        let key = CacheKey::from_url("https://api.github.com/repos/o/r/commits/abc");
        let path = key.entry_path(Path::new("/tmp/cache"));
        assert!(path.ends_with("api.github.com/repos/o/r/commits/abc/json"));
    }
}
