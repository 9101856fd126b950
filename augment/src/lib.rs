//! Writes randomized augmented copies of dataset images and labels.

mod common;
pub mod config;

use crate::{
    common::*,
    config::{AugmentConfig, Config},
};

pub fn start(config: &Config) -> Result<()> {
    let pipeline = PipelineInit {
        steps: config.augment.transforms.clone(),
        min_visibility: config.augment.min_visibility,
    }
    .build()?;

    let mut rng = match config.augment.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for split in &config.dataset.splits {
        let input = SplitDirs::new(&config.dataset.input_dir, split);
        let output = SplitDirs::new(&config.dataset.output_dir, split);
        output.create()?;

        if !input.images.is_dir() {
            error!("missing image directory '{}'", input.images.display());
            continue;
        }

        let entries = list_images(&input)?;
        info!("augmenting {}: {} images", split, entries.len());

        let progress = ProgressBar::new(entries.len() as u64);
        for entry in entries {
            if let Err(err) = process_file(&pipeline, &mut rng, &entry, &output, &config.augment) {
                warn!("skipping '{}': {:?}", entry.image_path.display(), err);
            }
            progress.inc(1);
        }
        progress.finish();
    }

    Ok(())
}

fn process_file(
    pipeline: &Pipeline,
    rng: &mut StdRng,
    entry: &ImageEntry,
    output: &SplitDirs,
    config: &AugmentConfig,
) -> Result<()> {
    if !entry.label_path.is_file() {
        return Ok(());
    }

    let image = image::open(&entry.image_path)
        .with_context(|| format!("failed to decode '{}'", entry.image_path.display()))?
        .to_rgb8();
    if image.dimensions() != (config.expected_width, config.expected_height) {
        return Ok(());
    }

    let labels = label::parse_file_with_class(&entry.label_path, config.class)?;
    if labels.is_empty() {
        return Ok(());
    }

    for index in 0..config.n_per_image {
        let (aug_image, aug_labels) = pipeline.forward(rng, image.clone(), labels.clone());

        // never write an output whose boxes all vanished
        if aug_labels.is_empty() {
            continue;
        }

        let stem = format!("{}_aug{}", entry.stem, index);
        aug_image.save(
            output
                .images
                .join(format!("{}.{}", stem, entry.extension)),
        )?;
        label::write_file(output.labels.join(format!("{}.txt", stem)), &aug_labels)?;
    }

    Ok(())
}
