//! CLI error type.

use std::fmt;

use debstats::{ConfigError, RetrievalError, StatsError};

/// Errors surfaced at the command-line boundary.
#[derive(Debug)]
pub enum CliError {
    /// Config file could not be loaded.
    Config(ConfigError),

    /// Downloading the contents index failed.
    Retrieval { arch: String, source: RetrievalError },

    /// Computing statistics failed.
    Stats(StatsError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Retrieval { arch, source } => {
                write!(f, "Download of contents index for {} failed: {}", arch, source)
            }
            CliError::Stats(StatsError::SourceNotFound { path }) => write!(
                f,
                "Contents file was not found at {}. Please download it in order to continue.",
                path.display()
            ),
            CliError::Stats(e) => write!(f, "Statistics failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Retrieval { source, .. } => Some(source),
            CliError::Stats(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<StatsError> for CliError {
    fn from(e: StatsError) -> Self {
        CliError::Stats(e)
    }
}
