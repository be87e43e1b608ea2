use super::{is_hidden_os, RelativeDir, SampleTree};
use crate::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// A sample library on disk.
#[derive(Debug, Clone)]
pub struct FsTree {
    root: PathBuf,
    follow_links: bool,
}

impl FsTree {
    /// Resolve `root` to an absolute path and check that it is a directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref();
        let resolved = fs::canonicalize(root).map_err(|err| Error::fs(root, err))?;
        let metadata = fs::metadata(&resolved).map_err(|err| Error::fs(&resolved, err))?;
        if !metadata.is_dir() {
            return Err(Error::NotADirectory(resolved));
        }
        Ok(Self {
            root: resolved,
            follow_links: false,
        })
    }

    /// Descend into symlinked directories. Cycles are reported as traversal errors.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative(&self, path: &Path) -> RelativeDir {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        RelativeDir::new(rel.components().map(|part| part.as_os_str().to_os_string()))
    }

    fn absolute(&self, dir: &RelativeDir) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(dir.components());
        path
    }
}

// The root is exempt: its own name never counts as a relative component.
fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !is_hidden_os(entry.file_name())
}

// A link to a directory counts as one even when links are not followed; it is
// listed but walkdir does not descend into it.
fn is_dir_entry(entry: &DirEntry, follow_links: bool) -> Result<bool, Error> {
    if entry.file_type().is_dir() {
        return Ok(true);
    }
    if follow_links || !entry.path_is_symlink() {
        return Ok(false);
    }
    match fs::metadata(entry.path()) {
        Ok(metadata) => Ok(metadata.is_dir()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(Error::fs(entry.path(), err)),
    }
}

impl SampleTree for FsTree {
    fn directories(&self) -> Result<Vec<RelativeDir>, Error> {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_entry(is_visible);

        let mut dirs = Vec::new();
        for entry in walker {
            let entry = entry?;
            if is_dir_entry(&entry, self.follow_links)? {
                dirs.push(self.relative(entry.path()));
            }
        }
        dirs.sort_by_cached_key(RelativeDir::as_posix);
        debug!("Found {} candidate directories under {}", dirs.len(), self.root.display());
        Ok(dirs)
    }

    fn files(&self, dir: &RelativeDir) -> Result<Vec<String>, Error> {
        let dir_path = self.absolute(dir);
        let entries = fs::read_dir(&dir_path).map_err(|err| Error::fs(&dir_path, err))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| Error::fs(&dir_path, err))?;
            let path = entry.path();
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!("Skipping dangling link {}", path.display());
                    continue;
                }
                Err(err) => return Err(Error::fs(&path, err)),
            };
            if metadata.is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn posix(dirs: &[RelativeDir]) -> Vec<String> {
        dirs.iter().map(RelativeDir::as_posix).collect()
    }

    #[test]
    fn test_open_rejects_missing_root() {
        let tmp = tempdir().unwrap();
        let err = FsTree::open(tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
        assert!(err.is_file_system());
    }

    #[test]
    fn test_open_rejects_file_root() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("kick.wav");
        fs::write(&file, b"RIFF").unwrap();
        let err = FsTree::open(&file).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn test_directories_are_sorted_and_skip_hidden_subtrees() {
        let tmp = tempdir().unwrap();
        for dir in ["snare", "kit/kick", "kit/.old/kick", ".git/objects", "a-b", "a/b"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }

        let tree = FsTree::open(tmp.path()).unwrap();
        let dirs = tree.directories().unwrap();

        assert_eq!(
            posix(&dirs),
            vec!["a", "a-b", "a/b", "kit", "kit/kick", "snare"]
        );
    }

    #[test]
    fn test_hidden_root_is_still_scanned() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join(".samples");
        fs::create_dir_all(root.join("kick")).unwrap();

        let tree = FsTree::open(&root).unwrap();
        assert_eq!(posix(&tree.directories().unwrap()), vec!["kick"]);
    }

    #[test]
    fn test_files_lists_only_regular_files() {
        let tmp = tempdir().unwrap();
        let kick = tmp.path().join("kick");
        fs::create_dir_all(kick.join("nested.wav")).unwrap();
        fs::write(kick.join("001.wav"), b"RIFF").unwrap();
        fs::write(kick.join("notes.txt"), b"hi").unwrap();

        let tree = FsTree::open(tmp.path()).unwrap();
        let mut files = tree.files(&RelativeDir::from_posix("kick")).unwrap();
        files.sort();

        assert_eq!(files, vec!["001.wav", "notes.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_not_a_file() {
        let tmp = tempdir().unwrap();
        let kick = tmp.path().join("kick");
        fs::create_dir_all(&kick).unwrap();
        fs::write(kick.join("001.wav"), b"RIFF").unwrap();
        std::os::unix::fs::symlink(kick.join("gone.wav"), kick.join("002.wav")).unwrap();

        let tree = FsTree::open(tmp.path()).unwrap();
        let files = tree.files(&RelativeDir::from_posix("kick")).unwrap();

        assert_eq!(files, vec!["001.wav"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_follow_setting() {
        let tmp = tempdir().unwrap();
        let library = tmp.path().join("library");
        let outside = tmp.path().join("outside");
        fs::create_dir_all(library.join("kick")).unwrap();
        fs::create_dir_all(outside.join("snare")).unwrap();
        std::os::unix::fs::symlink(&outside, library.join("linked")).unwrap();

        let tree = FsTree::open(&library).unwrap();
        assert_eq!(posix(&tree.directories().unwrap()), vec!["kick", "linked"]);

        let tree = tree.with_follow_links(true);
        assert_eq!(
            posix(&tree.directories().unwrap()),
            vec!["kick", "linked", "linked/snare"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_directory_link_is_skipped() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("kick")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("snare")).unwrap();

        let tree = FsTree::open(tmp.path()).unwrap();
        assert_eq!(posix(&tree.directories().unwrap()), vec!["kick"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_directory_is_listed_by_real_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempdir().unwrap();
        let dir = tmp.path().join(OsStr::from_bytes(b"kick\xff"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("1.wav"), b"RIFF").unwrap();

        let tree = FsTree::open(tmp.path()).unwrap();
        let dirs = tree.directories().unwrap();

        assert_eq!(posix(&dirs), vec!["kick\u{fffd}"]);
        assert_eq!(tree.files(&dirs[0]).unwrap(), vec!["1.wav"]);
    }
}
