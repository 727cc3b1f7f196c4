//! Raw entry retrieval.
//!
//! Pages through the search service and stores every hit's document in one
//! JSON array cache file. The cache is treated as immutable once present:
//! a second download is a no-op.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::error::Result;
use crate::options::Options;

/// Request timeout for one page.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// One page of search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    pub hits: Hits,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hits {
    pub total: Total,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Total number of matching documents as reported by the service.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Total {
    pub value: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_source")]
    pub source: Value,
}

/// A paginated document search.
pub trait SearchService {
    /// Fetch `size` results starting at offset `from`.
    ///
    /// # Errors
    ///
    /// Returns the transport or decoding error of the request.
    fn fetch_page(&self, from: usize, size: usize) -> Result<SearchPage>;
}

/// Search request body: spells only, without child items, hidden documents or
/// mythic spells.
#[must_use]
pub fn build_query(from: usize, size: usize) -> Value {
    json!({
        "query": {
            "bool": {
                "filter": [
                    { "term": { "category": "spell" } }
                ],
                "must_not": [
                    { "exists": { "field": "item_child_id" } },
                    { "term": { "exclude_from_search": true } },
                    { "term": { "trait": "mythic" } }
                ]
            }
        },
        "from": from,
        "size": size,
        "sort": ["_doc"]
    })
}

/// Search service over HTTP.
pub struct HttpSearch {
    client: reqwest::blocking::Client,
    endpoint: Url,
}

impl HttpSearch {
    /// Create a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Endpoint`] for an invalid URL and
    /// [`crate::Error::Http`] if the client cannot be built.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint })
    }
}

impl SearchService for HttpSearch {
    fn fetch_page(&self, from: usize, size: usize) -> Result<SearchPage> {
        let page = self
            .client
            .post(self.endpoint.clone())
            .json(&build_query(from, size))
            .send()?
            .error_for_status()?
            .json::<SearchPage>()?;
        Ok(page)
    }
}

/// Collect every matching document, one page after another.
///
/// Stops once the number of documents received reaches the reported total,
/// or when a page comes back empty.
///
/// # Errors
///
/// The first failed page request aborts the loop; there is no retry.
pub fn collect_documents(service: &impl SearchService, page_size: usize) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    loop {
        let page = service.fetch_page(documents.len(), page_size)?;
        let total = page.hits.total.value;
        let received = page.hits.hits.len();
        documents.extend(page.hits.hits.into_iter().map(|hit| hit.source));
        tracing::debug!(received, collected = documents.len(), total, "fetched page");

        if received == 0 || documents.len() >= total {
            break;
        }
    }
    Ok(documents)
}

/// What [`download`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The cache already existed; nothing was fetched.
    Cached(PathBuf),
    /// Documents were fetched and written to the cache.
    Downloaded { path: PathBuf, documents: usize },
}

/// Download all entries into the cache file unless it already exists.
///
/// # Errors
///
/// Returns retrieval, JSON or I/O errors.
pub fn download(options: &Options) -> Result<DownloadOutcome> {
    if options.cache_path.exists() {
        tracing::info!(path = %options.cache_path.display(), "cache present, skipping download");
        return Ok(DownloadOutcome::Cached(options.cache_path.clone()));
    }
    let service = HttpSearch::new(&options.endpoint)?;
    download_with(&service, &options.cache_path, options.page_size)
}

/// Download through a given service into `cache_path`.
///
/// # Errors
///
/// Returns retrieval, JSON or I/O errors.
pub fn download_with(
    service: &impl SearchService,
    cache_path: &Path,
    page_size: usize,
) -> Result<DownloadOutcome> {
    if cache_path.exists() {
        return Ok(DownloadOutcome::Cached(cache_path.to_path_buf()));
    }
    let documents = collect_documents(service, page_size)?;
    if let Some(parent) = cache_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(cache_path, serde_json::to_string(&documents)?)?;
    tracing::info!(path = %cache_path.display(), documents = documents.len(), "wrote cache");
    Ok(DownloadOutcome::Downloaded {
        path: cache_path.to_path_buf(),
        documents: documents.len(),
    })
}
