//! Retrieval of vendor documents: identifier/path mapping plus the blocking
//! fetchers that rendering and aggregation expand members through.

use crate::model::Document;
use std::cell::Cell;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;

const USER_AGENT: &str = concat!("doccmark/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from document retrieval.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The documentation namespace one run operates in.
///
/// Symbol identifiers look like `doc://{bundle}/documentation/Framework/Symbol`;
/// the matching corpus path is the lowercased remainder ("framework/symbol").
#[derive(Debug, Clone)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    pub fn new(bundle: &str) -> Self {
        Self {
            prefix: format!("doc://{}", bundle),
        }
    }

    /// Whether the identifier belongs to this run's own namespace.
    pub fn owns(&self, identifier: &str) -> bool {
        identifier.starts_with(&self.prefix)
    }

    /// Corpus-relative path for an identifier; None for foreign or
    /// non-documentation identifiers.
    ///
    /// "doc://ns/documentation/Foo/Bar" → "foo/bar"
    pub fn doc_path(&self, identifier: &str) -> Option<String> {
        identifier
            .strip_prefix(&self.prefix)
            .and_then(|rest| rest.strip_prefix("/documentation/"))
            .map(str::to_lowercase)
    }

    /// Accepts either a `doc://` identifier or an already-relative corpus
    /// path, which is passed through untouched.
    pub fn resolve(&self, identifier_or_path: &str) -> Option<String> {
        if identifier_or_path.starts_with("doc://") {
            self.doc_path(identifier_or_path)
        } else {
            Some(identifier_or_path.to_string())
        }
    }
}

/// Flat on-disk name for a corpus path: "a/b" → "a_b.json".
pub fn doc_file_name(path: &str) -> String {
    format!("{}.json", path.replace('/', "_"))
}

/// Retrieval collaborator consumed by rendering and aggregation.
pub trait DocFetcher {
    /// Resolve an identifier or corpus path to a document. `Ok(None)` covers
    /// both foreign-namespace identifiers and documents the service does not
    /// have; `Err` is a transport or decode failure.
    fn fetch(&self, identifier: &str) -> Result<Option<Document>, FetchError>;
}

/// Blocking HTTP fetcher with a minimum spacing between successive requests.
pub struct HttpFetcher {
    namespace: Namespace,
    base_url: String,
    delay: Duration,
    client: reqwest::blocking::Client,
    last_request: Cell<Option<Instant>>,
}

fn build_client() -> Result<reqwest::blocking::Client, FetchError> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| FetchError::Network(e.to_string()))
}

impl HttpFetcher {
    pub fn new(namespace: Namespace, base_url: &str, delay: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            namespace,
            base_url: base_url.trim_end_matches('/').to_string(),
            delay,
            client: build_client()?,
            last_request: Cell::new(None),
        })
    }

    /// Raw document JSON for a corpus path, for verbatim mirroring.
    /// `Ok(None)` when the service has no such document.
    pub fn fetch_raw(&self, path: &str) -> Result<Option<serde_json::Value>, FetchError> {
        self.get_value(&self.doc_url(path))
    }

    fn doc_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path)
    }

    /// Sleep out the unelapsed remainder of the inter-request interval.
    fn pace(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                std::thread::sleep(self.delay - elapsed);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }

    fn get_value(&self, url: &str) -> Result<Option<serde_json::Value>, FetchError> {
        self.pace();
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let body = response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}

impl DocFetcher for HttpFetcher {
    fn fetch(&self, identifier: &str) -> Result<Option<Document>, FetchError> {
        let path = match self.namespace.resolve(identifier) {
            Some(path) => path,
            None => return Ok(None),
        };
        match self.get_value(&self.doc_url(&path))? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }
}

/// Plain single-resource fetches for everything that is not a doc JSON:
/// session pages, community notes, sample archives. Callers own the pacing.
pub struct WebClient {
    client: reqwest::blocking::Client,
}

impl WebClient {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client()?,
        })
    }

    /// Body text of a page; `Ok(None)` when the resource does not exist.
    pub fn fetch_text(&self, url: &str) -> Result<Option<String>, FetchError> {
        match self.get(url)? {
            Some(response) => Ok(Some(
                response
                    .text()
                    .map_err(|e| FetchError::Network(e.to_string()))?,
            )),
            None => Ok(None),
        }
    }

    /// Raw bytes of a download; `Ok(None)` when the resource does not exist.
    pub fn fetch_bytes(&self, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
        match self.get(url)? {
            Some(response) => {
                let bytes = response
                    .bytes()
                    .map_err(|e| FetchError::Network(e.to_string()))?;
                Ok(Some(bytes.to_vec()))
            }
            None => Ok(None),
        }
    }

    fn get(&self, url: &str) -> Result<Option<reqwest::blocking::Response>, FetchError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(Some(response))
    }
}

/// Resolves identifiers against a directory of previously mirrored JSON
/// files (the layout `fetch` writes). No throttling, nothing remote.
pub struct DirFetcher {
    namespace: Namespace,
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(namespace: Namespace, root: impl Into<PathBuf>) -> Self {
        Self {
            namespace,
            root: root.into(),
        }
    }
}

impl DocFetcher for DirFetcher {
    fn fetch(&self, identifier: &str) -> Result<Option<Document>, FetchError> {
        let path = match self.namespace.resolve(identifier) {
            Some(path) => path,
            None => return Ok(None),
        };
        let file = self.root.join(doc_file_name(&path));
        if !file.exists() {
            return Ok(None);
        }
        let body = std::fs::read_to_string(&file)?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}
