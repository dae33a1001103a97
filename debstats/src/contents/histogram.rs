//! Package ownership histogram.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::BufRead;

use super::record::{parse_line, ParseMode};
use crate::error::ParseError;

/// One row of a ranked result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// Package name without area or section.
    pub name: String,
    /// Number of files attributed to the package.
    pub count: u64,
}

impl RankedEntry {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Mapping from package name to the number of files it owns.
///
/// Every (record, package reference) pair adds one, so a record naming the
/// same package twice counts twice.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    counts: HashMap<String, u64>,
    records: u64,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file for `name`.
    pub fn record(&mut self, name: &str) {
        if let Some(count) = self.counts.get_mut(name) {
            *count += 1;
        } else {
            self.counts.insert(name.to_owned(), 1);
        }
    }

    /// Files attributed to `name`, zero if unseen.
    pub fn count(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct packages.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of index records that contributed to this histogram.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Top `n` packages by count descending.
    ///
    /// Equal counts are ordered by package name ascending so results are
    /// deterministic. Returns every package when fewer than `n` exist.
    pub fn top(&self, n: usize) -> Vec<RankedEntry> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();

        if n < entries.len() {
            entries.select_nth_unstable_by(n, rank_order);
            entries.truncate(n);
        }
        entries.sort_unstable_by(rank_order);

        entries
            .into_iter()
            .map(|(name, count)| RankedEntry::new(name, count))
            .collect()
    }
}

fn rank_order(a: &(&str, u64), b: &(&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Stream a decompressed Contents index into a histogram.
///
/// Lines are read as bytes into a reused buffer; invalid UTF-8 is replaced
/// rather than aborting the run.
pub fn build_histogram<R: BufRead>(
    mut reader: R,
    mode: ParseMode,
) -> Result<Histogram, ParseError> {
    let mut histogram = Histogram::new();
    let mut buf = Vec::with_capacity(256);
    let mut line_number = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buf);
        let record = match parse_line(&line, mode) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(_) => return Err(ParseError::MissingSeparator { line: line_number }),
        };

        histogram.records += 1;
        for pkg in record.packages() {
            histogram.record(pkg.name());
        }
    }

    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const INDEX: &str = "\
sbin/klogd                    utils/busybox-syslogd
bin/logread                   utils/busybox-syslogd
etc/insserv.conf.d/x          utils/busybox-syslogd
etc/init.d/swift-object       net/swift-object
etc/init.d/swift-object-a     net/swift-object
etc/init.d/tlp                utils/tlp
";

    fn index_histogram() -> Histogram {
        build_histogram(INDEX.as_bytes(), ParseMode::Strict).unwrap()
    }

    #[test]
    fn test_top_three() {
        assert_eq!(
            index_histogram().top(3),
            vec![
                RankedEntry::new("busybox-syslogd", 3),
                RankedEntry::new("swift-object", 2),
                RankedEntry::new("tlp", 1),
            ]
        );
    }

    #[test]
    fn test_top_truncates() {
        assert_eq!(
            index_histogram().top(1),
            vec![RankedEntry::new("busybox-syslogd", 3)]
        );
        assert_eq!(index_histogram().top(2).len(), 2);
    }

    #[test]
    fn test_top_zero_is_empty() {
        assert!(index_histogram().top(0).is_empty());
    }

    #[test]
    fn test_top_more_than_available() {
        assert_eq!(index_histogram().top(100).len(), 3);
    }

    #[test]
    fn test_ties_break_by_name() {
        let mut histogram = Histogram::new();
        for name in ["zsh", "bash", "dash", "bash", "zsh", "dash"] {
            histogram.record(name);
        }
        histogram.record("ash");

        let names: Vec<_> = histogram.top(4).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["bash", "dash", "zsh", "ash"]);
    }

    #[test]
    fn test_counters() {
        let histogram = index_histogram();
        assert_eq!(histogram.len(), 3);
        assert_eq!(histogram.total(), 6);
        assert_eq!(histogram.records(), 6);
        assert_eq!(histogram.count("tlp"), 1);
        assert_eq!(histogram.count("absent"), 0);
    }

    #[test]
    fn test_repeated_reference_counts_twice() {
        let histogram =
            build_histogram("etc/a utils/tlp,utils/tlp\n".as_bytes(), ParseMode::Strict).unwrap();
        assert_eq!(histogram.count("tlp"), 2);
        assert_eq!(histogram.records(), 1);
    }

    #[test]
    fn test_area_and_section_are_discarded() {
        let histogram =
            build_histogram("usr/sbin/foo  net/admin/foo-tool\n".as_bytes(), ParseMode::Strict)
                .unwrap();
        assert_eq!(histogram.count("foo-tool"), 1);
        assert_eq!(histogram.len(), 1);
    }

    #[test]
    fn test_blank_lines_and_missing_newline() {
        let histogram =
            build_histogram("\n  \na utils/x\n\nb utils/x".as_bytes(), ParseMode::Strict).unwrap();
        assert_eq!(histogram.count("x"), 2);
        assert_eq!(histogram.records(), 2);
    }

    #[test]
    fn test_strict_mode_reports_line_number() {
        let err =
            build_histogram("a utils/x\nutils/y\n".as_bytes(), ParseMode::Strict).unwrap_err();
        assert!(matches!(err, ParseError::MissingSeparator { line: 2 }));
    }

    #[test]
    fn test_lenient_mode_counts_whole_line() {
        let histogram =
            build_histogram("utils/y,utils/z\n".as_bytes(), ParseMode::Lenient).unwrap();
        assert_eq!(histogram.count("y"), 1);
        assert_eq!(histogram.count("z"), 1);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let data = b"usr/share/\xff\xfe  utils/pkg\n";
        let histogram = build_histogram(&data[..], ParseMode::Strict).unwrap();
        assert_eq!(histogram.count("pkg"), 1);
    }

    fn package_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9+.-]{0,6}"
    }

    proptest! {
        /// Each package's count equals its number of reference occurrences.
        #[test]
        fn prop_counts_equal_occurrences(
            lines in prop::collection::vec(prop::collection::vec(package_name(), 1..4), 0..40)
        ) {
            let mut index = String::new();
            let mut expected: HashMap<String, u64> = HashMap::new();
            for (i, pkgs) in lines.iter().enumerate() {
                let refs: Vec<String> = pkgs.iter().map(|p| format!("utils/{}", p)).collect();
                index.push_str(&format!("usr/share/f{}   {}\n", i, refs.join(",")));
                for p in pkgs {
                    *expected.entry(p.clone()).or_default() += 1;
                }
            }

            let histogram = build_histogram(index.as_bytes(), ParseMode::Strict).unwrap();
            prop_assert_eq!(histogram.len(), expected.len());
            for (name, count) in &expected {
                prop_assert_eq!(histogram.count(name), *count);
            }
        }

        /// Ranked output has length min(n, distinct) and is sorted descending.
        #[test]
        fn prop_top_is_sorted_and_truncated(
            names in prop::collection::vec(package_name(), 0..60),
            n in 0usize..20
        ) {
            let mut histogram = Histogram::new();
            for name in &names {
                histogram.record(name);
            }

            let top = histogram.top(n);
            prop_assert_eq!(top.len(), n.min(histogram.len()));
            for pair in top.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
            if let (Some(last), true) = (top.last(), n < histogram.len()) {
                let full = histogram.top(histogram.len());
                prop_assert!(full[n].count <= last.count);
            }
        }
    }
}
