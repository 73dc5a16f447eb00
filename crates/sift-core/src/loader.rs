//! Index loading.
//!
//! A [`IndexSource`] produces the raw bytes of the site index; [`load_entries`]
//! fetches them and decodes the JSON array of records. Failures are returned
//! as a [`LoadError`] so the caller can decide how to degrade (the session
//! keeps its previous index).

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{Level, debug, instrument};

use crate::entry::Entry;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read index file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch index from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("index request to {url} failed with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed index payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where the index comes from.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Human readable location, for logs.
    fn location(&self) -> String;

    async fn fetch(&self) -> Result<Vec<u8>, LoadError>;
}

/// An index stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IndexSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        fs_err::tokio::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// An index served over HTTP, such as a site's `/search.json`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        ensure_crypto_provider();

        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl IndexSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let http_err = |source| LoadError::Http {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        Ok(body.to_vec())
    }
}

/// Pick a source for a configured location: `http://` and `https://` are
/// fetched over the network, anything else is a file path.
pub fn source_for(location: &str) -> Box<dyn IndexSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Decode a JSON array of records into entries, keeping their order.
pub fn decode_entries(bytes: &[u8]) -> Result<Vec<Entry>, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Fetch and decode the index from a source.
#[instrument(skip_all, level = Level::DEBUG, name = "load_entries", fields(source = %source.location()))]
pub async fn load_entries(source: &dyn IndexSource) -> Result<Vec<Entry>, LoadError> {
    let bytes = source.fetch().await?;
    debug!(bytes = bytes.len(), "fetched index payload");

    decode_entries(&bytes)
}

/// reqwest is built without a default rustls provider; install ring once.
fn ensure_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[tokio::test]
    async fn loads_entries_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"title": "Guide to Widgets", "category": "Docs", "url": "/a"}},
                {{"title": "Widget FAQ", "category": "Help", "url": "/b"}}
            ]"#
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let entries = load_entries(&source).await.unwrap();

        assert_eq!(
            entries,
            vec![
                Entry::new("Guide to Widgets", "Docs", "/a"),
                Entry::new("Widget FAQ", "Help", "/b"),
            ]
        );
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("search.json"));

        let err = load_entries(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn malformed_payload_is_decode_error() {
        let err = decode_entries(br#"{"title": "not an array"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));

        let err = decode_entries(br#"[{"category": "Docs"}]"#).unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn source_for_picks_by_scheme() {
        assert_eq!(
            source_for("https://example.org/search.json").location(),
            "https://example.org/search.json"
        );
        assert_eq!(source_for("site/search.json").location(), "site/search.json");
    }
}
