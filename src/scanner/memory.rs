use super::{RelativeDir, SampleTree};
use crate::error::Error;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

/// An in-memory sample library. Directories are implied by the files added
/// under them and can also be declared empty.
#[derive(Debug, Default, Clone)]
pub struct MemoryTree {
    dirs: BTreeMap<Vec<OsString>, Vec<String>>,
    unreadable: BTreeSet<Vec<OsString>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file by its root-relative POSIX path, e.g. `kit/kick/001.wav`.
    /// Files placed directly in the root are accepted but never scanned.
    pub fn with_file(mut self, path: &str) -> Self {
        let mut parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
        let Some(name) = parts.pop() else {
            return self;
        };
        let parts = RelativeDir::new(parts).components().to_vec();
        self.insert_dir(&parts);
        self.dirs.entry(parts).or_default().push(name.to_string());
        self
    }

    /// Declare a directory that may stay empty.
    pub fn with_dir(mut self, path: &str) -> Self {
        let parts = RelativeDir::from_posix(path).components().to_vec();
        self.insert_dir(&parts);
        self
    }

    /// Make listing this directory fail with a permission error.
    pub fn with_unreadable(mut self, path: &str) -> Self {
        let parts = RelativeDir::from_posix(path).components().to_vec();
        self.insert_dir(&parts);
        self.unreadable.insert(parts);
        self
    }

    fn insert_dir(&mut self, parts: &[OsString]) {
        for depth in 1..=parts.len() {
            self.dirs.entry(parts[..depth].to_vec()).or_default();
        }
    }
}

impl SampleTree for MemoryTree {
    fn directories(&self) -> Result<Vec<RelativeDir>, Error> {
        let mut dirs: Vec<RelativeDir> = self
            .dirs
            .keys()
            .filter(|parts| !parts.is_empty())
            .map(|parts| RelativeDir::new(parts.iter().cloned()))
            .filter(|dir| !dir.is_hidden())
            .collect();
        dirs.sort_by_cached_key(RelativeDir::as_posix);
        Ok(dirs)
    }

    fn files(&self, dir: &RelativeDir) -> Result<Vec<String>, Error> {
        if self.unreadable.contains(dir.components()) {
            return Err(Error::fs(
                PathBuf::from(dir.as_posix()),
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        match self.dirs.get(dir.components()) {
            Some(files) => Ok(files.clone()),
            None => Err(Error::fs(
                PathBuf::from(dir.as_posix()),
                io::Error::new(io::ErrorKind::NotFound, "no such directory"),
            )),
        }
    }
}
