use anyhow::{Context, Result};
use std::path::PathBuf;
use structopt::StructOpt;
use tile::config::Config;

#[derive(Debug, Clone, StructOpt)]
/// Split dataset images and labels into fixed-size overlapping tiles
struct Args {
    #[structopt(long, default_value = "tile.json5")]
    /// configuration file
    pub config_file: PathBuf,
}

pub fn main() -> Result<()> {
    pretty_env_logger::init();

    let Args { config_file } = Args::from_args();
    let config = Config::open(&config_file)
        .with_context(|| format!("failed to load config file '{}'", config_file.display()))?;

    tile::start(&config)?;

    Ok(())
}
