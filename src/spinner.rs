use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use strudel_samples::ScanReporter;

/// CLI progress reporter using an indicatif bar on stderr.
pub struct CliReporter {
    bar: ProgressBar,
}

impl CliReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_message("Finding sample folders...");
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }
}

impl ScanReporter for CliReporter {
    fn on_scan_start(&self, total_dirs: usize) {
        if let Ok(style) = ProgressStyle::with_template(
            "  {spinner:.cyan} Scanning [{bar:30.cyan/dim}] {pos}/{len} folders {wide_msg}",
        ) {
            self.bar
                .set_style(style.progress_chars("━╸─").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        self.bar.set_length(total_dirs as u64);
        self.bar.set_position(0);
    }

    fn on_directory(&self, dir: &str, _audio_files: usize) {
        self.bar.set_message(dir.to_string());
        self.bar.inc(1);
    }

    fn on_scan_complete(&self, groups: usize, files: usize, duration_secs: f64) {
        self.bar.finish_and_clear();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} files in {} groups in {:.2}s",
            files, groups, duration_secs
        );
    }
}

impl Drop for CliReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
