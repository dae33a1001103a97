//! Download progress display.

use debstats::ProgressCallback;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress bar drawn on stderr while the index downloads.
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    pub fn new(visible: bool) -> Self {
        let bar = ProgressBar::with_draw_target(
            None,
            if visible {
                ProgressDrawTarget::stderr()
            } else {
                ProgressDrawTarget::hidden()
            },
        );
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner} {msg} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
        );
        Self { bar }
    }

    /// Callback feeding this bar, for `Retriever::fetch_with_progress`.
    pub fn callback(&self, label: String) -> ProgressCallback {
        let bar = self.bar.clone();
        bar.set_message(label);
        Box::new(move |downloaded: u64, total: u64| {
            if total > 0 && bar.length() != Some(total) {
                bar.set_length(total);
            }
            bar.set_position(downloaded);
        })
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_tracks_position() {
        let progress = DownloadProgress::new(false);
        let cb = progress.callback("Contents-amd64.gz".to_string());
        cb(512, 2048);
        cb(2048, 2048);
        assert_eq!(progress.bar.position(), 2048);
        assert_eq!(progress.bar.length(), Some(2048));
        progress.finish();
    }

    #[test]
    fn test_unknown_total_leaves_length_unset() {
        let progress = DownloadProgress::new(false);
        let cb = progress.callback("Contents-all.gz".to_string());
        cb(100, 0);
        assert_eq!(progress.bar.length(), None);
        assert_eq!(progress.bar.position(), 100);
    }
}
