//! Statistics engine over a compressed Contents index.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Instant, SystemTime};

use flate2::read::MultiGzDecoder;
use tracing::{debug, info, warn};

use super::histogram::{build_histogram, Histogram, RankedEntry};
use super::record::ParseMode;
use crate::error::{StatsError, StatsResult};

/// Read buffer for the decompressed stream (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Whether a call may reuse a previously built histogram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve a populated histogram without touching the source.
    #[default]
    UseCached,
    /// Always re-parse the source and replace the histogram.
    Rebuild,
}

/// Size and modification time of the source when it was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceStamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl SourceStamp {
    fn of(metadata: &fs::Metadata) -> Self {
        Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        }
    }
}

/// Computes package ownership rankings from one Contents file.
///
/// The engine starts empty and becomes populated on the first parse. A
/// populated histogram is reused by [`CachePolicy::UseCached`] calls until the
/// engine is dropped; it is never invalidated when the file changes, only
/// reported as stale.
#[derive(Debug)]
pub struct StatsEngine {
    source: PathBuf,
    mode: ParseMode,
    histogram: Histogram,
    stamp: Option<SourceStamp>,
}

impl StatsEngine {
    /// Create an engine for the given `Contents-<arch>.gz` path.
    ///
    /// The file does not have to exist yet.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            mode: ParseMode::default(),
            histogram: Histogram::new(),
            stamp: None,
        }
    }

    /// Set how lines without a file path column are handled.
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// The current histogram, if one has been built.
    pub fn histogram(&self) -> Option<&Histogram> {
        (!self.histogram.is_empty()).then_some(&self.histogram)
    }

    /// Return the `n` packages owning the most files.
    ///
    /// # Errors
    ///
    /// - [`StatsError::SourceNotFound`] if a parse is needed and the file is absent
    /// - [`StatsError::ReadFailed`] if the file is not valid gzip or cannot be read
    /// - [`StatsError::MalformedLine`] in strict mode
    pub fn top_packages(&mut self, n: usize, policy: CachePolicy) -> StatsResult<Vec<RankedEntry>> {
        if policy == CachePolicy::UseCached && !self.histogram.is_empty() {
            debug!(source = %self.source.display(), "Using cached histogram");
            self.warn_if_stale();
        } else {
            self.rebuild()?;
        }

        Ok(self.histogram.top(n))
    }

    /// Parse the source and replace the histogram.
    fn rebuild(&mut self) -> StatsResult<()> {
        if !self.source.is_file() {
            return Err(StatsError::SourceNotFound {
                path: self.source.clone(),
            });
        }

        let started = Instant::now();
        let file = File::open(&self.source).map_err(|e| StatsError::ReadFailed {
            path: self.source.clone(),
            source: e,
        })?;
        let stamp = file.metadata().ok().map(|m| SourceStamp::of(&m));

        let reader = BufReader::with_capacity(
            BUFFER_SIZE,
            MultiGzDecoder::new(BufReader::new(file)),
        );
        let histogram = build_histogram(reader, self.mode)
            .map_err(|e| StatsError::from_parse(&self.source, e))?;

        info!(
            source = %self.source.display(),
            records = histogram.records(),
            packages = histogram.len(),
            files = histogram.total(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Parsed contents index"
        );

        self.histogram = histogram;
        self.stamp = stamp;
        Ok(())
    }

    fn warn_if_stale(&self) {
        let current = fs::metadata(&self.source).ok().map(|m| SourceStamp::of(&m));
        if current != self.stamp {
            warn!(
                source = %self.source.display(),
                "Contents file changed since it was parsed; serving cached histogram"
            );
        }
    }
}
