//! Builds Strudel-compatible sample maps from a directory of audio files.
//!
//! Each non-hidden directory below the root that holds audio files becomes a
//! group named after the directory. The document starts with `_base`, the URL
//! prefix consumers prepend to every file entry.

pub mod builder;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;
pub mod sample_map;
pub mod scanner;

pub use builder::{build_map, MapBuilder};
pub use self::config::{Overrides, SamplesConfig, Settings};
pub use error::Error;
pub use output::{to_json, write_map, OutputTarget};
pub use progress::{ScanReporter, SilentReporter};
pub use sample_map::{SampleMap, BASE_KEY};
pub use scanner::{FsTree, MemoryTree, RelativeDir, SampleTree};
