//! Streaming statistics over Debian Contents indices.
//!
//! - `record`: line and package reference parsing
//! - `histogram`: per-package counts and ranking
//! - `engine`: the file-backed [`StatsEngine`] with its in-memory cache
//!
//! # Example
//!
//! ```ignore
//! use debstats::{CachePolicy, StatsEngine};
//!
//! let mut engine = StatsEngine::new("/tmp/Contents-amd64.gz");
//! for entry in engine.top_packages(10, CachePolicy::Rebuild)? {
//!     println!("{} {}", entry.name, entry.count);
//! }
//! ```

mod engine;
mod histogram;
mod record;

pub use engine::{CachePolicy, StatsEngine};
pub use histogram::{build_histogram, Histogram, RankedEntry};
pub use record::{parse_line, ContentsRecord, MissingSeparator, PackageRef, ParseMode};
