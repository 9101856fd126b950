//! Augmentation tool configuration format.

use crate::common::*;

pub use augment::*;
pub use dataset::*;

/// The main augmentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub augment: AugmentConfig,
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

mod augment {
    use super::*;

    /// Augmentation options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AugmentConfig {
        /// The number of independently sampled outputs per image.
        pub n_per_image: usize,
        /// Images of any other resolution are skipped.
        pub expected_width: u32,
        pub expected_height: u32,
        /// The class retained at label-load time.
        #[serde(default)]
        pub class: usize,
        /// Minimum visible area fraction of a box after geometric
        /// transforms.
        pub min_visibility: f64,
        /// Seed of the shared random source; entropy when absent.
        #[serde(default)]
        pub seed: Option<u64>,
        /// The ordered transform list; the fixed default pipeline when
        /// absent.
        #[serde(default = "TransformConfig::default_pipeline")]
        pub transforms: Vec<TransformConfig>,
    }
}
