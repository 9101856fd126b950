//! Tiling tool configuration format.

use crate::common::*;

pub use dataset::*;
pub use tiler::*;

/// The main tiling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub tiler: TilerConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

mod dataset {
    use super::*;

    /// Dataset tree options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct DatasetConfig {
        /// The dataset root containing one directory per split.
        pub input_dir: PathBuf,
        /// The root of the mirrored output tree.
        pub output_dir: PathBuf,
        pub splits: Vec<String>,
    }
}

mod tiler {
    use super::*;

    /// Tiling options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TilerConfig {
        /// Side length of emitted tiles, in pixels.
        pub tile_size: u32,
        /// Overlap between neighboring tiles, in pixels.
        pub overlap: u32,
    }
}
