//! Preprocessing building blocks for YOLO-format detection datasets.

mod common;

pub use dataset::*;
pub mod dataset;

pub use processor::*;
pub mod processor;
