//! Configuration for retrieval and statistics.
//!
//! Two layers exist:
//!
//! - [`RetrieverConfig`]: the explicit settings passed to a [`Retriever`](crate::Retriever).
//! - [`ConfigFile`]: optional user overrides read from an INI file.
//!
//! The CLI resolves each setting as CLI flag > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;

use crate::error::{ConfigError, ConfigResult};

/// Debian mirror serving the stable `main` component.
pub const DEFAULT_MIRROR: &str = "http://ftp.uk.debian.org/debian/dists/stable/main";

/// Number of top packages shown when nothing else is requested.
pub const DEFAULT_NUM_PACKAGES: usize = 10;

/// Default HTTP timeout in seconds.
///
/// Contents indices run to tens of megabytes compressed.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the contents [`Retriever`](crate::Retriever).
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Mirror base URL, e.g. `http://deb.debian.org/debian/dists/stable/main`.
    pub mirror_url: String,

    /// Directory where `Contents-<arch>.gz` files are stored.
    pub download_dir: PathBuf,

    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            mirror_url: DEFAULT_MIRROR.to_string(),
            download_dir: std::env::temp_dir(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RetrieverConfig {
    /// Create a new configuration for the given mirror.
    pub fn new(mirror_url: impl Into<String>) -> Self {
        Self {
            mirror_url: mirror_url.into(),
            ..Default::default()
        }
    }

    /// Set the download directory.
    pub fn with_download_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.download_dir = path.into();
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// User overrides loaded from `config.ini`.
///
/// ```ini
/// [mirror]
/// url = http://deb.debian.org/debian/dists/bookworm/main
///
/// [download]
/// directory = /var/tmp/debstats
/// timeout = 120
///
/// [stats]
/// num_packages = 25
/// ```
///
/// Every key is optional; absent keys fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub mirror_url: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub num_packages: Option<usize>,
}

impl ConfigFile {
    /// Default location: `<config dir>/debstats/config.ini`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("debstats").join("config.ini"))
    }

    /// Load the config from the default location.
    ///
    /// A missing file is not an error and yields an empty config.
    pub fn load() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load the config from an explicit path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Parse config from INI text.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Load {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> ConfigResult<Self> {
        let get = |section: &str, key: &str| {
            ini.section(Some(section))
                .and_then(|s| s.get(key))
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            mirror_url: get("mirror", "url").map(str::to_string),
            download_dir: get("download", "directory").map(PathBuf::from),
            timeout_secs: get("download", "timeout")
                .map(|v| parse_number("download", "timeout", v))
                .transpose()?,
            num_packages: get("stats", "num_packages")
                .map(|v| parse_number("stats", "num_packages", v))
                .transpose()?,
        })
    }
}

fn parse_number<T: std::str::FromStr>(section: &str, key: &str, value: &str) -> ConfigResult<T> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}
