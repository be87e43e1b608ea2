/// Trait for reporting scan progress.
///
/// The CLI implements it with an indicatif bar. All methods default to no-ops.
pub trait ScanReporter {
    fn on_scan_start(&self, _total_dirs: usize) {}
    fn on_directory(&self, _dir: &str, _audio_files: usize) {}
    fn on_scan_complete(&self, _groups: usize, _files: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ScanReporter for SilentReporter {}
