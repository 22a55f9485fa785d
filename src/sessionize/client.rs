// src/sessionize/client.rs
use crate::utils::error::FetchError;
use reqwest::header;
use std::path::PathBuf;
use std::sync::Mutex;

const SPEAKERS_USER_AGENT: &str = concat!("speakers_grid/", env!("CARGO_PKG_VERSION"));

/// Anything that can hand back the raw HTML of a speaker listing.
#[allow(async_fn_in_trait)]
pub trait SpeakerSource {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches the public speaker listing page over HTTP.
pub struct SessionizeClient {
    client: reqwest::Client,
}

impl SessionizeClient {
    pub fn new() -> Result<Self, FetchError> {
        // No timeout and no retry: a failed page load is a soft failure upstream
        let client = reqwest::Client::builder()
            .user_agent(SPEAKERS_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl SpeakerSource for SessionizeClient {
    /// Downloads the listing page. Any non-2xx status is an error.
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::MissingUrl);
        }

        tracing::info!("Downloading speaker listing from: {}", url);

        let response = self.client.get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
            .send()
            .await?; // Propagates reqwest::Error as FetchError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

        Ok(body)
    }
}

/// Serves a saved listing page from disk. The URL argument is ignored.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SpeakerSource for FileSource {
    async fn fetch_html(&self, _url: &str) -> Result<String, FetchError> {
        tracing::info!("Reading speaker listing from file: {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path).await?;
        Ok(body)
    }
}

/// Wraps a source and keeps a copy of the last page it returned.
pub struct Recorded<S> {
    inner: S,
    last: Mutex<Option<String>>,
}

impl<S: SpeakerSource> Recorded<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, last: Mutex::new(None) }
    }

    pub fn last_body(&self) -> Option<String> {
        let guard = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }
}

impl<S: SpeakerSource> SpeakerSource for Recorded<S> {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let body = self.inner.fetch_html(url).await?;
        let mut guard = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(body.clone());
        drop(guard);
        Ok(body)
    }
}
