//! Integration tests for the retrieve → rank flow.
//!
//! These tests verify that:
//! - A downloaded index is stored under `Contents-<arch>.gz`
//! - The stored file feeds the statistics engine unchanged
//! - Statistics before download fail with `SourceNotFound`
//!
//! Run with: `cargo test --test retrieve_and_rank`

use std::io::{Cursor, Write};
use std::path::PathBuf;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

use debstats::error::RetrievalResult;
use debstats::{
    CachePolicy, HttpClient, HttpResponse, RankedEntry, RetrievalError, Retriever,
    RetrieverConfig, StatsEngine, StatsError,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// A small but realistic slice of a Contents index.
const INDEX: &str = "\
sbin/klogd                                utils/busybox-syslogd
bin/logread                               utils/busybox-syslogd
etc/insserv.conf.d/busybox-syslogd        utils/busybox-syslogd
etc/init.d/swift-object                   net/swift-object
etc/init.d/swift-object-auditor           net/swift-object
etc/init.d/tlp                            utils/tlp
usr/sbin/foo                              non-free/admin/foo-tool
usr/bin/busybox                           utils/busybox,utils/busybox-static
";

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

/// Serves a fixed payload for any URL.
struct StaticMirror {
    status: u16,
    payload: Vec<u8>,
}

impl HttpClient for StaticMirror {
    fn get(&self, _url: &str) -> RetrievalResult<HttpResponse> {
        Ok(HttpResponse {
            status: self.status,
            content_length: Some(self.payload.len() as u64),
            body: Box::new(Cursor::new(self.payload.clone())),
        })
    }
}

fn retriever(dir: PathBuf, status: u16, payload: Vec<u8>) -> Retriever<StaticMirror> {
    Retriever::new(
        RetrieverConfig::default().with_download_dir(dir),
        StaticMirror { status, payload },
    )
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_download_then_rank() {
    let temp = TempDir::new().unwrap();
    let retriever = retriever(temp.path().join("downloads"), 200, gzip(INDEX));

    let path = retriever.fetch("amd64").unwrap();
    assert_eq!(path, temp.path().join("downloads/Contents-amd64.gz"));

    let mut engine = StatsEngine::new(&path);
    let top = engine.top_packages(3, CachePolicy::Rebuild).unwrap();
    assert_eq!(
        top,
        vec![
            RankedEntry::new("busybox-syslogd", 3),
            RankedEntry::new("swift-object", 2),
            RankedEntry::new("busybox", 1),
        ]
    );

    let all = engine.top_packages(100, CachePolicy::UseCached).unwrap();
    assert_eq!(all.len(), 6);
    assert!(all.contains(&RankedEntry::new("foo-tool", 1)));
    assert!(all.contains(&RankedEntry::new("busybox-static", 1)));
}

#[test]
fn test_statistics_before_download() {
    let temp = TempDir::new().unwrap();
    let retriever = retriever(temp.path().to_path_buf(), 200, gzip(INDEX));
    let path = retriever.local_path("arm64").unwrap();

    let mut engine = StatsEngine::new(&path);
    assert!(matches!(
        engine.top_packages(10, CachePolicy::UseCached),
        Err(StatsError::SourceNotFound { .. })
    ));

    retriever.fetch("arm64").unwrap();
    assert_eq!(engine.top_packages(1, CachePolicy::UseCached).unwrap().len(), 1);
}

#[test]
fn test_failed_download_leaves_previous_index() {
    let temp = TempDir::new().unwrap();
    retriever(temp.path().to_path_buf(), 200, gzip(INDEX))
        .fetch("i386")
        .unwrap();

    let result = retriever(temp.path().to_path_buf(), 503, Vec::new()).fetch("i386");
    assert!(matches!(
        result,
        Err(RetrievalError::RemoteFetchFailed { status: 503, .. })
    ));

    let mut engine = StatsEngine::new(temp.path().join("Contents-i386.gz"));
    let top = engine.top_packages(1, CachePolicy::Rebuild).unwrap();
    assert_eq!(top, vec![RankedEntry::new("busybox-syslogd", 3)]);
}
