//! Splits dataset images and labels into fixed-size overlapping tiles.

mod common;
pub mod config;

use crate::{common::*, config::Config};

pub fn start(config: &Config) -> Result<()> {
    let tiler = TilerInit {
        tile_size: config.tiler.tile_size,
        overlap: config.tiler.overlap,
    }
    .build()?;

    for split in &config.dataset.splits {
        let input = SplitDirs::new(&config.dataset.input_dir, split);
        let output = SplitDirs::new(&config.dataset.output_dir, split);
        output.create()?;

        if !input.images.is_dir() {
            error!("missing image directory '{}'", input.images.display());
            continue;
        }

        let entries = list_images(&input)?;
        info!("tiling {}: {} images", split, entries.len());

        let progress = ProgressBar::new(entries.len() as u64);
        for entry in entries {
            if let Err(err) = process_file(&tiler, &entry, &output) {
                warn!("skipping '{}': {:?}", entry.image_path.display(), err);
            }
            progress.inc(1);
        }
        progress.finish();
    }

    Ok(())
}

fn process_file(tiler: &Tiler, entry: &ImageEntry, output: &SplitDirs) -> Result<()> {
    let image = image::open(&entry.image_path)
        .with_context(|| format!("failed to decode '{}'", entry.image_path.display()))?
        .to_rgb8();

    let labels = if entry.label_path.is_file() {
        label::parse_file(&entry.label_path)?
    } else {
        vec![]
    };

    for tile in tiler.forward(&image, &labels) {
        let stem = tile.file_stem(&entry.stem);
        tile.image
            .save(output.images.join(format!("{}.jpg", stem)))?;

        // the output dataset carries a single class
        let tile_labels: Vec<_> = tile
            .labels
            .into_iter()
            .map(|label| RatioLabel { class: 0, ..label })
            .collect();
        label::write_file(output.labels.join(format!("{}.txt", stem)), &tile_labels)?;
    }

    Ok(())
}
