use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::output::OutputTarget;

pub const DEFAULT_OUTPUT: &str = "strudel.json";
const CONFIG_FILE_NAME: &str = "strudel-samples";
const ENV_PREFIX: &str = "STRUDEL_SAMPLES";

/// Values read from the optional config file and `STRUDEL_SAMPLES_*` env vars.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SamplesConfig {
    pub root: Option<String>,
    pub base: Option<String>,
    pub output: Option<String>,
    pub follow_links: Option<bool>,
}

impl SamplesConfig {
    /// Load `strudel-samples.{toml,yaml,json}` from the working directory if
    /// present, or `path` (required) when given. Env vars override the file.
    pub fn load(path: Option<&Path>) -> Result<SamplesConfig, ConfigError> {
        let file_source = match path {
            Some(path) => ConfigFile::from(path).required(true),
            None => ConfigFile::with_name(CONFIG_FILE_NAME).required(false),
        };
        let builder = Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        builder.try_deserialize::<SamplesConfig>()
    }
}

/// Values given on the command line; `None` defers to config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub base: Option<String>,
    pub output: Option<String>,
    pub follow_links: bool,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub base: String,
    pub output: OutputTarget,
    pub follow_links: bool,
}

impl Settings {
    /// Command line over config over defaults.
    pub fn resolve(config: SamplesConfig, overrides: Overrides) -> Settings {
        let root = overrides
            .root
            .or_else(|| config.root.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let base = overrides.base.or(config.base).unwrap_or_default();
        let output = overrides
            .output
            .or(config.output)
            .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
        let follow_links = overrides.follow_links || config.follow_links.unwrap_or(false);

        Settings {
            root,
            base,
            output: OutputTarget::parse(&output),
            follow_links,
        }
    }
}
