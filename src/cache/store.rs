// Cache store for remote JSON responses.
// Serves a cached blob when one exists, otherwise fetches, persists and re-reads it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Value;
use tempfile::TempDir;

use crate::error::{MineError, Result};
use crate::fetch::{Fetch, HttpFetcher, Request};

use super::key::CacheKey;

/// Per-user persistent cache directory (~/.cache/repomine on Linux).
pub fn user_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repomine").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// On-disk response cache. Owns everything below its root directory.
///
/// Entries are never expired or rewritten: once a URL's blob exists, every
/// later non-forced `get` for that URL is served from disk.
pub struct CacheStore {
    root: PathBuf,
    // Held so a temporary root lives exactly as long as the store.
    _temp: Option<TempDir>,
    fetcher: Box<dyn Fetch>,
}

impl CacheStore {
    /// Create a store over `cache_dir`, or a fresh temporary directory when `None`.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        Self::with_fetcher(cache_dir, HttpFetcher::new()?)
    }

    /// Create a store backed by the per-user cache directory.
    pub fn user_default() -> Result<Self> {
        let dir = user_cache_dir().ok_or(MineError::MissingConfig("HOME"))?;
        Self::new(Some(dir))
    }

    /// Create a store with a custom transport.
    pub fn with_fetcher(cache_dir: Option<PathBuf>, fetcher: impl Fetch + 'static) -> Result<Self> {
        let (root, temp) = match cache_dir {
            Some(dir) => (dir, None),
            None => {
                let temp = tempfile::Builder::new().prefix("repomine-").tempdir()?;
                (temp.path().to_path_buf(), Some(temp))
            }
        };

        tracing::debug!(root = %root.display(), temporary = temp.is_some(), "cache store ready");

        Ok(Self {
            root,
            _temp: temp,
            fetcher: Box::new(fetcher),
        })
    }

    /// Root directory of the cache.
    pub fn dir(&self) -> &Path {
        &self.root
    }

    /// Path of the blob that caches `url`.
    pub fn entry_path(&self, url: &str) -> PathBuf {
        CacheKey::from_url(url).entry_path(&self.root)
    }

    /// Whether a blob for `url` is already on disk.
    pub fn contains(&self, url: &str) -> bool {
        self.entry_path(url).exists()
    }

    /// Return the JSON for `request`, fetching and persisting it on a miss.
    ///
    /// With `force_remote` the cache is bypassed entirely: the file is neither
    /// read nor written.
    pub fn get(&self, request: &Request, force_remote: bool) -> Result<Value> {
        if force_remote {
            return self.get_remote(request);
        }

        let path = self.entry_path(&request.url);
        if !path.exists() {
            tracing::warn!("{}", request.url);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let value = self.fetcher.fetch(request)?;
            write_entry(&path, &value)?;
        }

        read_entry(&path)
    }

    /// Fetch `request` live without touching the cache.
    pub fn get_remote(&self, request: &Request) -> Result<Value> {
        self.fetcher.fetch(request)
    }
}

/// Write a blob atomically via a sibling temp file.
fn write_entry(path: &Path, value: &Value) -> Result<()> {
    let json = serde_json::to_string(value)?;

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "cached response");
    Ok(())
}

fn read_entry(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
