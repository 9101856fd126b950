pub use anyhow::{ensure, Context as _, Result};
pub use bbox::{prelude::*, CyCxHW, Transform, TLBR};
pub use image::{imageops, Rgb, RgbImage};
pub use itertools::Itertools as _;
pub use label::{Label, RatioLabel};
pub use log::warn;
pub use rand::{rngs::StdRng, Rng};
pub use serde::{Deserialize, Serialize};
pub use std::{
    fs,
    path::{Path, PathBuf},
};
