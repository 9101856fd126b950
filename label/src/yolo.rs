//! YOLO label file reading and writing.
//!
//! One box per line as `class_id x_center y_center width height`, all
//! coordinates normalized to the image size.

use crate::{Label, RatioLabel};
use anyhow::{ensure, Context, Result};
use bbox::{CyCxHW, Rect};
use std::{
    fs,
    path::Path,
};

/// Parse a single YOLO label line.
pub fn parse_line(line: &str) -> Result<RatioLabel> {
    let fields: Vec<_> = line.split_whitespace().collect();
    ensure!(
        fields.len() == 5,
        "expected 5 fields per label line, but get {}",
        fields.len()
    );

    let class: usize = fields[0]
        .parse()
        .with_context(|| format!("invalid class id '{}'", fields[0]))?;
    let [cx, cy, w, h]: [f64; 4] = {
        let mut values = [0.0; 4];
        for (value, field) in values.iter_mut().zip(&fields[1..]) {
            *value = field
                .parse()
                .with_context(|| format!("invalid coordinate '{}'", field))?;
        }
        values
    };

    let rect = CyCxHW::try_from_cycxhw([cy, cx, h, w])?;
    Ok(Label { rect, class })
}

/// Load the labels of one image.
pub fn parse_file<P>(path: P) -> Result<Vec<RatioLabel>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read label file '{}'", path.display()))?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

/// Load the labels of one image, keeping only the given class.
pub fn parse_file_with_class<P>(path: P, class: usize) -> Result<Vec<RatioLabel>>
where
    P: AsRef<Path>,
{
    let labels = parse_file(path)?;
    Ok(labels
        .into_iter()
        .filter(|label| label.class == class)
        .collect())
}

/// Format a label as a YOLO line with 6-decimal coordinates.
pub fn format_line(label: &RatioLabel) -> String {
    let rect = &label.rect;
    format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        label.class,
        rect.cx(),
        rect.cy(),
        rect.w(),
        rect.h()
    )
}

/// Write a label file. An empty label list produces an empty file.
pub fn write_file<P>(path: P, labels: &[RatioLabel]) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut text = String::new();
    for label in labels {
        text.push_str(&format_line(label));
        text.push('\n');
    }
    fs::write(path, text)
        .with_context(|| format!("failed to write label file '{}'", path.display()))
}
