//! Progress display while the corpus is read from disk

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const CORPUS_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}) {msg}";

/// Byte-based progress bar over the files of a corpus
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    quiet: bool,
    total_files: usize,
    loaded_files: usize,
}

impl ProgressReporter {
    /// Create a reporter; a quiet one never draws anything
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: None,
            quiet,
            total_files: 0,
            loaded_files: 0,
        }
    }

    /// Start the bar for `total_files` files holding `total_bytes` bytes
    pub fn init_corpus(&mut self, total_files: usize, total_bytes: u64) {
        self.total_files = total_files;
        self.loaded_files = 0;
        if self.quiet {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template(CORPUS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");

        let bar = ProgressBar::new(total_bytes);
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Record a document of `bytes` bytes read from `name`
    pub fn document_loaded(&mut self, name: &str, bytes: u64) {
        self.loaded_files += 1;
        if let Some(bar) = &self.bar {
            bar.set_message(format!(
                "{}/{} files, last: {name}",
                self.loaded_files, self.total_files
            ));
            bar.inc(bytes);
        }
    }

    /// Files recorded so far
    pub fn loaded_files(&self) -> usize {
        self.loaded_files
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
