//! Curation sources.
//!
//! Curations come from the curation service (`GET {base_url}/curation/list`)
//! and are cached as a JSON array so later runs work offline. A plain JSON
//! file can stand in for the service.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ptmcur_common::{Curation, Result};
use tracing::{debug, info};

/// Common interface for anything that yields the full curation list.
pub trait CurationSource {
    fn curations(&self) -> Result<Vec<Curation>>;
}

// ── Local file ───────────────────────────────────────────────────────────────

/// A JSON array of curations on disk.
#[derive(Debug, Clone)]
pub struct CurationFile {
    path: PathBuf,
}

impl CurationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CurationSource for CurationFile {
    fn curations(&self) -> Result<Vec<Curation>> {
        read_curations(&self.path)
    }
}

// ── Curation service ─────────────────────────────────────────────────────────

/// Curation service client with a file cache in front of it.
#[derive(Debug, Clone)]
pub struct CurationClient {
    base_url: String,
    api_key: Option<String>,
    cache_path: PathBuf,
    timeout: Duration,
}

impl CurationClient {
    pub fn new(base_url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            cache_path: cache_path.into(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn list_url(&self) -> String {
        format!("{}/curation/list", self.base_url.trim_end_matches('/'))
    }

    /// Fetch from the service, bypassing the cache.
    pub fn fetch(&self) -> Result<Vec<Curation>> {
        let url = self.list_url();
        info!("Fetching curations from {}", url);

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let mut request = client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key)]);
        }
        let curations: Vec<Curation> = request.send()?.error_for_status()?.json()?;
        info!(n = curations.len(), "Fetched curations");
        Ok(curations)
    }
}

impl CurationSource for CurationClient {
    fn curations(&self) -> Result<Vec<Curation>> {
        if self.cache_path.exists() {
            debug!(path = %self.cache_path.display(), "Using cached curations");
            return read_curations(&self.cache_path);
        }
        let curations = self.fetch()?;
        write_curations(&self.cache_path, &curations)?;
        Ok(curations)
    }
}

// ── JSON helpers ─────────────────────────────────────────────────────────────

pub fn read_curations(path: &Path) -> Result<Vec<Curation>> {
    let text = fs::read_to_string(path)?;
    let curations: Vec<Curation> = serde_json::from_str(&text)?;
    info!(path = %path.display(), n = curations.len(), "Loaded curations");
    Ok(curations)
}

pub fn write_curations(path: &Path, curations: &[Curation]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec(curations)?)?;
    debug!(path = %path.display(), n = curations.len(), "Cached curations");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Curation> {
        serde_json::from_str(
            r#"[{"pa_hash": 1, "source_hash": "-2", "tag": "correct", "source": "signor_dephos",
                 "text": "EFFECT:up-regulates", "curator": "a.lee@lab.org", "date": "2021-03-01"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_list_url() {
        let client = CurationClient::new("https://db.example.org/", "/tmp/x.json");
        assert_eq!(client.list_url(), "https://db.example.org/curation/list");
    }

    #[test]
    fn test_cache_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("nested").join("curations.json");
        write_curations(&cache, &sample()).unwrap();

        // Unroutable base URL: any network access would fail the test.
        let client = CurationClient::new("http://127.0.0.1:9", &cache);
        let curations = client.curations().unwrap();
        assert_eq!(curations.len(), 1);
        assert_eq!(curations[0].source_hash, -2);
    }

    #[test]
    fn test_curation_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curations.json");
        write_curations(&path, &sample()).unwrap();
        let curations = CurationFile::new(&path).curations().unwrap();
        assert_eq!(curations, sample());
    }
}
