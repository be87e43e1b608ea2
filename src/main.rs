mod cli;
mod logging;
mod spinner;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use colored::*;
use dotenv::dotenv;
use spinner::CliReporter;
use strudel_samples::{write_map, FsTree, MapBuilder, Overrides, SamplesConfig, Settings};
use tracing::{debug, error, info};

fn main() -> ExitCode {
    dotenv().ok();

    let args = Cli::parse();

    let _guard = logging::init_logger();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config = SamplesConfig::load(args.config.as_deref())
        .context("Error loading configuration")?;
    debug!("config: {:?}", config);

    let settings = Settings::resolve(
        config,
        Overrides {
            root: args.root,
            base: args.base,
            output: args.output,
            follow_links: args.follow_links,
        },
    );

    let tree = FsTree::open(&settings.root)
        .with_context(|| format!("Cannot scan {}", settings.root.display()))?
        .with_follow_links(settings.follow_links);
    info!("Scanning {}", tree.root().display());

    let map = {
        let reporter = CliReporter::new();
        MapBuilder::new(settings.base.as_str())
            .build_with_reporter(&tree, &reporter)
            .context("Error scanning samples")?
    };

    write_map(&map, &settings.output).context("Error writing samples map")?;

    info!(
        "{} groups, {} files -> {}",
        format!("{}", map.len()).green(),
        format!("{}", map.file_count()).green(),
        format!("{}", settings.output).cyan(),
    );

    Ok(())
}
