use anyhow::{Context, Result};
use augment::config::Config;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, Clone, StructOpt)]
/// Write randomized augmented copies of dataset images and labels
struct Args {
    #[structopt(long, default_value = "augment.json5")]
    /// configuration file
    pub config_file: PathBuf,
}

pub fn main() -> Result<()> {
    pretty_env_logger::init();

    let Args { config_file } = Args::from_args();
    let config = Config::open(&config_file)
        .with_context(|| format!("failed to load config file '{}'", config_file.display()))?;

    augment::start(&config)?;

    Ok(())
}
