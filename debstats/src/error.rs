//! Error types for retrieval and statistics.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for retrieval operations.
pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur while fetching a contents index.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Download directory is empty or cannot be created.
    #[error("invalid download directory '{}': {reason}", path.display())]
    InvalidDestination { path: PathBuf, reason: String },

    /// Architecture name cannot form a contents file name.
    #[error("invalid architecture '{0}'")]
    InvalidArchitecture(String),

    /// Mirror URL and architecture do not form a valid URL.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    ClientSetup(String),

    /// Mirror answered with something other than 200 OK.
    #[error("request to {url} returned status {status}")]
    RemoteFetchFailed { url: String, status: u16 },

    /// Network or transport failure.
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to write the downloaded payload.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that can occur while computing package statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The contents file has not been downloaded yet.
    #[error("contents file was not found at {}; download it in order to continue", path.display())]
    SourceNotFound { path: PathBuf },

    /// Failed to read or decompress the contents file.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line has no file path column (strict parsing only).
    #[error("malformed line {line} in {}: missing whitespace separator", path.display())]
    MalformedLine { path: PathBuf, line: u64 },
}

/// Errors raised while streaming records out of a contents index.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading or decompressing the stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A line has no whitespace between file path and package list.
    #[error("line {line}: missing whitespace separator")]
    MissingSeparator { line: u64 },
}

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("failed to load config {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// A key holds a value of the wrong type.
    #[error("invalid value '{value}' for [{section}] {key}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

impl StatsError {
    /// Attach the source path to a stream-level parse error.
    pub(crate) fn from_parse(path: &std::path::Path, err: ParseError) -> Self {
        match err {
            ParseError::Io(source) => Self::ReadFailed {
                path: path.to_path_buf(),
                source,
            },
            ParseError::MissingSeparator { line } => Self::MalformedLine {
                path: path.to_path_buf(),
                line,
            },
        }
    }
}
