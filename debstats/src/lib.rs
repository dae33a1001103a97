//! debstats - Package ownership statistics for Debian Contents indices
//!
//! This library downloads a per-architecture `Contents-<arch>.gz` index from a
//! Debian mirror and streams it into a histogram of how many files each
//! package installs.
//!
//! # Architecture
//!
//! ```text
//! Retriever ──► Contents-<arch>.gz ──► StatsEngine ──► Vec<RankedEntry>
//!     │                                    │
//!     └── HttpClient (trait)               └── Histogram
//! ```

pub mod config;
pub mod contents;
pub mod error;
pub mod logging;
pub mod retriever;

pub use config::{ConfigFile, RetrieverConfig, DEFAULT_MIRROR, DEFAULT_NUM_PACKAGES};
pub use contents::{CachePolicy, Histogram, PackageRef, ParseMode, RankedEntry, StatsEngine};
pub use error::{ConfigError, RetrievalError, StatsError};
pub use retriever::{HttpClient, HttpResponse, ProgressCallback, ReqwestClient, Retriever};
