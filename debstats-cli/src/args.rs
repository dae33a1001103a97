//! Command-line arguments and settings resolution.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use debstats::{ConfigError, ConfigFile, ParseMode, RetrieverConfig, DEFAULT_NUM_PACKAGES};

/// Show the Debian packages that own the most files for an architecture.
#[derive(Debug, Parser)]
#[command(name = "package-statistics", version, about)]
pub struct Args {
    /// Architecture to inspect (e.g. amd64, arm64, mips64el, udeb-amd64)
    pub architecture: String,

    /// Number of top packages to show [default: 10]
    #[arg(long, value_name = "N")]
    pub num_packages: Option<usize>,

    /// Mirror base URL serving Contents-<arch>.gz
    #[arg(long, value_name = "URL")]
    pub mirror: Option<String>,

    /// Directory where contents indices are downloaded
    #[arg(long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Reject index lines that have no file path column
    #[arg(long)]
    pub strict: bool,

    /// Hide the download progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Load the config file named by `--config`, or the default one if present.
pub fn load_config(args: &Args) -> Result<ConfigFile, ConfigError> {
    match &args.config {
        Some(path) => ConfigFile::load_from(path),
        None => ConfigFile::load(),
    }
}

/// Effective settings after merging CLI flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub retriever: RetrieverConfig,
    pub num_packages: usize,
    pub parse_mode: ParseMode,
}

impl Settings {
    /// Resolve each setting as CLI flag > config file > default.
    pub fn resolve(args: &Args, config: &ConfigFile) -> Self {
        let mut retriever = RetrieverConfig::default();

        if let Some(url) = args.mirror.clone().or_else(|| config.mirror_url.clone()) {
            retriever.mirror_url = url;
        }
        if let Some(dir) = args.download_dir.clone().or_else(|| config.download_dir.clone()) {
            retriever = retriever.with_download_dir(dir);
        }
        if let Some(secs) = args.timeout.or(config.timeout_secs) {
            retriever = retriever.with_timeout(Duration::from_secs(secs));
        }

        Self {
            retriever,
            num_packages: args
                .num_packages
                .or(config.num_packages)
                .unwrap_or(DEFAULT_NUM_PACKAGES),
            parse_mode: if args.strict {
                ParseMode::Strict
            } else {
                ParseMode::Lenient
            },
        }
    }
}
