//! Contents index retrieval from a Debian mirror.
//!
//! The [`Retriever`] builds `{mirror}/Contents-{arch}.gz`, downloads it and
//! stores the compressed bytes verbatim in the download directory:
//!
//! ```text
//! <download_dir>/
//! ├── Contents-amd64.gz
//! ├── Contents-arm64.gz
//! └── Contents-udeb-amd64.gz
//! ```
//!
//! The body is streamed into `<name>.part` and renamed into place once
//! complete, so an interrupted transfer never leaves a truncated index under
//! the final name.

mod http;

pub use http::{HttpClient, HttpResponse, ReqwestClient};

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::{debug, info};

use crate::config::RetrieverConfig;
use crate::error::{RetrievalError, RetrievalResult};

/// Buffer size for streaming the response body (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Progress callback receiving (bytes downloaded, total bytes or 0 if unknown).
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Downloads per-architecture Contents indices.
#[derive(Debug)]
pub struct Retriever<C = ReqwestClient> {
    config: RetrieverConfig,
    client: C,
}

impl Retriever<ReqwestClient> {
    /// Create a retriever backed by reqwest using the configured timeout.
    pub fn from_config(config: RetrieverConfig) -> RetrievalResult<Self> {
        let client = ReqwestClient::with_timeout(config.timeout)?;
        Ok(Self::new(config, client))
    }
}

impl<C: HttpClient> Retriever<C> {
    pub fn new(config: RetrieverConfig, client: C) -> Self {
        Self { config, client }
    }

    /// URL of the Contents index for `arch`.
    pub fn contents_url(&self, arch: &str) -> RetrievalResult<Url> {
        validate_architecture(arch)?;

        let raw = format!(
            "{}/Contents-{}.gz",
            self.config.mirror_url.trim_end_matches('/'),
            arch
        );
        Url::parse(&raw).map_err(|e| RetrievalError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    /// Where the index for `arch` is stored locally.
    ///
    /// Named after the final path segment of [`contents_url`](Self::contents_url).
    pub fn local_path(&self, arch: &str) -> RetrievalResult<PathBuf> {
        let url = self.contents_url(arch)?;
        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| RetrievalError::InvalidUrl {
                url: url.to_string(),
                reason: "URL has no file name".to_string(),
            })?;

        Ok(self.config.download_dir.join(file_name))
    }

    /// Download the index for `arch` and return its local path.
    pub fn fetch(&self, arch: &str) -> RetrievalResult<PathBuf> {
        self.fetch_inner(arch, None)
    }

    /// Download the index for `arch`, reporting progress as bytes arrive.
    pub fn fetch_with_progress(
        &self,
        arch: &str,
        on_progress: ProgressCallback,
    ) -> RetrievalResult<PathBuf> {
        self.fetch_inner(arch, Some(on_progress))
    }

    fn fetch_inner(
        &self,
        arch: &str,
        progress: Option<ProgressCallback>,
    ) -> RetrievalResult<PathBuf> {
        let url = self.contents_url(arch)?;
        let dest = self.local_path(arch)?;
        self.ensure_download_dir()?;

        info!(url = %url, "Downloading contents index");
        let response = self.client.get(url.as_str())?;
        if response.status != 200 {
            return Err(RetrievalError::RemoteFetchFailed {
                url: url.to_string(),
                status: response.status,
            });
        }

        let total = response.content_length.unwrap_or(0);
        let bytes = stream_to_file(url.as_str(), response.body, &dest, total, progress)?;

        info!(path = %dest.display(), bytes, "Downloaded contents index");
        Ok(dest)
    }

    /// Create the download directory, including parents.
    fn ensure_download_dir(&self) -> RetrievalResult<()> {
        let dir = &self.config.download_dir;
        if dir.as_os_str().is_empty() {
            return Err(RetrievalError::InvalidDestination {
                path: dir.clone(),
                reason: "empty download directory is not allowed".to_string(),
            });
        }

        fs::create_dir_all(dir).map_err(|e| RetrievalError::InvalidDestination {
            path: dir.clone(),
            reason: e.to_string(),
        })
    }
}

fn validate_architecture(arch: &str) -> RetrievalResult<()> {
    if arch.is_empty() || arch.contains('/') || arch.chars().any(char::is_whitespace) {
        return Err(RetrievalError::InvalidArchitecture(arch.to_string()));
    }
    Ok(())
}

/// Stream `body` into `dest` via a sibling `.part` file.
fn stream_to_file(
    url: &str,
    body: Box<dyn Read>,
    dest: &Path,
    total: u64,
    progress: Option<ProgressCallback>,
) -> RetrievalResult<u64> {
    let mut part_name = dest.file_name().unwrap_or_default().to_os_string();
    part_name.push(".part");
    let part = dest.with_file_name(part_name);

    let result = copy_body(url, body, &part, total, progress.as_ref())
        .and_then(|bytes| {
            fs::rename(&part, dest).map_err(|e| RetrievalError::WriteFailed {
                path: dest.to_path_buf(),
                source: e,
            })?;
            Ok(bytes)
        });

    if result.is_err() {
        debug!(path = %part.display(), "Removing partial download");
        fs::remove_file(&part).ok();
    }
    result
}

fn copy_body(
    url: &str,
    mut body: Box<dyn Read>,
    part: &Path,
    total: u64,
    progress: Option<&ProgressCallback>,
) -> RetrievalResult<u64> {
    let write_failed = |e| RetrievalError::WriteFailed {
        path: part.to_path_buf(),
        source: e,
    };

    let file = File::create(part).map_err(write_failed)?;
    let mut writer = BufWriter::new(file);
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut downloaded = 0u64;

    loop {
        let bytes_read = body
            .read(&mut buffer)
            .map_err(|e| RetrievalError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        if bytes_read == 0 {
            break;
        }

        writer.write_all(&buffer[..bytes_read]).map_err(write_failed)?;
        downloaded += bytes_read as u64;

        if let Some(cb) = progress {
            cb(downloaded, total);
        }
    }

    writer.flush().map_err(write_failed)?;
    Ok(downloaded)
}
