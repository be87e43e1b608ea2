pub mod filter;
pub mod memory;
pub mod walk;

pub use filter::{is_audio_file, is_audio_name, AUDIO_EXTENSIONS};
pub use memory::MemoryTree;
pub use walk::FsTree;

use crate::error::Error;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;

/// A directory below the scan root, stored as its root-relative components.
///
/// Components keep their exact OS form for file system access; text views
/// (`name`, `as_posix`, `file_entry`) replace invalid UTF-8 with U+FFFD.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeDir {
    components: Vec<OsString>,
}

impl RelativeDir {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a forward-slash path such as `kit/kick`. Empty segments are dropped.
    pub fn from_posix(path: &str) -> Self {
        Self::new(path.split('/').filter(|part| !part.is_empty()))
    }

    pub fn components(&self) -> &[OsString] {
        &self.components
    }

    /// Last path component; this is the sample group key.
    pub fn name(&self) -> Cow<'_, str> {
        self.components
            .last()
            .map(|part| part.to_string_lossy())
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Sort key for directory order.
    pub fn as_posix(&self) -> String {
        self.components
            .iter()
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// True if any component is dot-prefixed.
    pub fn is_hidden(&self) -> bool {
        self.components.iter().any(|part| is_hidden_os(part))
    }

    /// Root-relative entry for a file in this directory, e.g. `/kit/kick/001.wav`.
    pub fn file_entry(&self, file_name: &str) -> String {
        let mut entry = String::from("/");
        for part in &self.components {
            entry.push_str(&part.to_string_lossy());
            entry.push('/');
        }
        entry.push_str(file_name);
        entry
    }
}

impl fmt::Display for RelativeDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_posix())
    }
}

pub(crate) fn is_hidden_os(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Read access to a sample library, abstracted so the builder can run against
/// disk or memory.
pub trait SampleTree {
    /// Every non-hidden directory strictly below the root, sorted by POSIX relative path.
    fn directories(&self) -> Result<Vec<RelativeDir>, Error>;

    /// Names of the regular files directly inside `dir`, in any order.
    fn files(&self, dir: &RelativeDir) -> Result<Vec<String>, Error>;
}

impl<T: SampleTree + ?Sized> SampleTree for &T {
    fn directories(&self) -> Result<Vec<RelativeDir>, Error> {
        (**self).directories()
    }

    fn files(&self, dir: &RelativeDir) -> Result<Vec<String>, Error> {
        (**self).files(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_is_rooted_with_forward_slashes() {
        let dir = RelativeDir::from_posix("kit/kick");
        assert_eq!(dir.file_entry("001.wav"), "/kit/kick/001.wav");
        assert_eq!(dir.name(), "kick");
        assert_eq!(dir.to_string(), "kit/kick");
    }

    #[cfg(unix)]
    #[test]
    fn test_text_views_are_lossy_but_components_exact() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"kick\xff");
        let dir = RelativeDir::new([OsString::from("kit"), raw.to_os_string()]);

        assert_eq!(dir.components()[1].as_os_str(), raw);
        assert_eq!(dir.name(), "kick\u{fffd}");
        assert_eq!(dir.file_entry("1.wav"), "/kit/kick\u{fffd}/1.wav");
    }

    #[test]
    fn test_hidden_detection_checks_every_component() {
        assert!(RelativeDir::from_posix(".git").is_hidden());
        assert!(RelativeDir::from_posix("kit/.cache/kick").is_hidden());
        assert!(!RelativeDir::from_posix("kit/kick.d").is_hidden());
    }

    #[test]
    fn test_ordering_uses_posix_text() {
        let mut dirs = vec![
            RelativeDir::from_posix("a/b"),
            RelativeDir::from_posix("a-b"),
            RelativeDir::from_posix("a"),
        ];
        dirs.sort_by_cached_key(RelativeDir::as_posix);
        let ordered: Vec<String> = dirs.iter().map(RelativeDir::as_posix).collect();
        assert_eq!(ordered, vec!["a", "a-b", "a/b"]);
    }
}
