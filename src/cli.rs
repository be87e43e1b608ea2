use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "strudel-samples", version)]
#[command(about = "Generate a Strudel samples JSON map from a sample folder", long_about = None)]
pub struct Cli {
    /// Root directory to scan [default: .]
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Base URL stored under `_base` [default: empty]
    #[arg(long)]
    pub base: Option<String>,

    /// Output JSON file, or `-` for stdout [default: strudel.json]
    #[arg(long)]
    pub output: Option<String>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_links: bool,

    /// Config file (toml, yaml or json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
