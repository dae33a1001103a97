//! HTTP client abstraction for testability.

use std::io::Read;
use std::time::Duration;

use crate::error::{RetrievalError, RetrievalResult};

/// Status line, size hint and streaming body of a GET response.
pub struct HttpResponse {
    pub status: u16,
    pub content_length: Option<u64>,
    pub body: Box<dyn Read>,
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Trait for HTTP client operations.
///
/// Lets the retriever run against a mock client in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// Transport failures are errors; any received status, including
    /// non-success ones, is returned in the response.
    fn get(&self, url: &str) -> RetrievalResult<HttpResponse>;
}

/// Real HTTP client implementation using blocking reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout: Duration) -> RetrievalResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RetrievalError::ClientSetup(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> RetrievalResult<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| RetrievalError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
            content_length: response.content_length(),
            body: Box::new(response),
        })
    }
}
