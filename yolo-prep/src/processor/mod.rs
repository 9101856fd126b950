//! Data preprocessing building blocks.

pub mod blur;
pub mod coarse_dropout;
pub mod color_jitter;
pub mod noise;
pub mod pipeline;
pub mod random_affine;
pub mod random_flip;
pub mod tiler;

pub use blur::*;
pub use coarse_dropout::*;
pub use color_jitter::*;
pub use noise::*;
pub use pipeline::*;
pub use random_affine::*;
pub use random_flip::*;
pub use tiler::*;
