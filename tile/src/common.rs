pub use anyhow::{Context as _, Result};
pub use indicatif::ProgressBar;
pub use label::RatioLabel;
pub use log::{error, info, warn};
pub use serde::{Deserialize, Serialize};
pub use std::{
    fs,
    path::{Path, PathBuf},
};
pub use yolo_prep::{list_images, ImageEntry, SplitDirs, Tiler, TilerInit};
