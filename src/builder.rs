use crate::error::Error;
use crate::progress::{ScanReporter, SilentReporter};
use crate::sample_map::SampleMap;
use crate::scanner::{is_audio_name, FsTree, SampleTree};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Builds a [`SampleMap`] from any [`SampleTree`].
///
/// Directories are visited in POSIX path order. Each one contributes its
/// sorted audio files to the group named after it, so directories that share
/// a name share a group. Directories without audio files add nothing.
pub struct MapBuilder {
    base: String,
}

impl MapBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn build<T: SampleTree + ?Sized>(&self, tree: &T) -> Result<SampleMap, Error> {
        self.build_with_reporter(tree, &SilentReporter)
    }

    /// Stops at the first error; nothing is returned for a partial scan.
    pub fn build_with_reporter<T: SampleTree + ?Sized>(
        &self,
        tree: &T,
        reporter: &dyn ScanReporter,
    ) -> Result<SampleMap, Error> {
        let start = Instant::now();
        let mut map = SampleMap::new(self.base.clone());

        let dirs = tree.directories()?;
        reporter.on_scan_start(dirs.len());

        for dir in &dirs {
            let mut names: Vec<String> = tree
                .files(dir)?
                .into_iter()
                .filter(|name| is_audio_name(name))
                .collect();
            names.sort();
            reporter.on_directory(&dir.as_posix(), names.len());

            if names.is_empty() {
                debug!("No samples in {}", dir);
                continue;
            }

            let key = dir.name();
            debug!("{} samples in {} -> '{}'", names.len(), dir, key);
            map.append(&key, names.iter().map(|name| dir.file_entry(name)))?;
        }

        let duration = start.elapsed();
        info!(
            "Scanned {} directories in {:.2}s: {} groups, {} files",
            dirs.len(),
            duration.as_secs_f64(),
            map.len(),
            map.file_count(),
        );
        reporter.on_scan_complete(map.len(), map.file_count(), duration.as_secs_f64());

        Ok(map)
    }
}

/// Scan the directory at `root` with default settings.
pub fn build_map(root: impl AsRef<Path>, base: &str) -> Result<SampleMap, Error> {
    let tree = FsTree::open(root)?;
    MapBuilder::new(base).build(&tree)
}
