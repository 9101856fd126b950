use anyhow::Result;
use augment::config::Config;
use image::RgbImage;
use std::fs;

fn sample_config(
    input_dir: &std::path::Path,
    output_dir: &std::path::Path,
    seed: u64,
) -> Config {
    let text = format!(
        r#"{{
            dataset: {{
                input_dir: "{}",
                output_dir: "{}",
                splits: ["valid"],
            }},
            augment: {{
                n_per_image: 4,
                expected_width: 512,
                expected_height: 512,
                min_visibility: 0.3,
                seed: {},
            }},
        }}"#,
        input_dir.display(),
        output_dir.display(),
        seed
    );
    json5::from_str(&text).unwrap()
}

fn write_split(input_dir: &std::path::Path) -> Result<()> {
    let images_dir = input_dir.join("valid").join("images");
    let labels_dir = input_dir.join("valid").join("labels");
    fs::create_dir_all(&images_dir)?;
    fs::create_dir_all(&labels_dir)?;

    let mut image = RgbImage::new(512, 512);
    for (index, pixel) in image.pixels_mut().enumerate() {
        *pixel = image::Rgb([(index % 256) as u8, (index % 127) as u8, (index % 37) as u8]);
    }
    image.save(images_dir.join("bird.png"))?;
    fs::write(labels_dir.join("bird.txt"), "0 0.5 0.5 0.2 0.2\n")?;

    // wrong resolution, must be skipped
    RgbImage::new(256, 256).save(images_dir.join("small.png"))?;
    fs::write(labels_dir.join("small.txt"), "0 0.5 0.5 0.2 0.2\n")?;

    // no boxes of the retained class, must be skipped
    image.save(images_dir.join("other.png"))?;
    fs::write(labels_dir.join("other.txt"), "3 0.5 0.5 0.2 0.2\n")?;

    // no label file at all, must be skipped
    image.save(images_dir.join("unlabeled.png"))?;

    Ok(())
}

#[test]
fn written_outputs_always_have_boxes() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input_dir = dir.path().join("input");
    let output_dir = dir.path().join("output");
    write_split(&input_dir)?;

    let config = sample_config(&input_dir, &output_dir, 42);
    augment::start(&config)?;

    let out_images = output_dir.join("valid").join("images");
    let out_labels = output_dir.join("valid").join("labels");

    let written: Vec<_> = fs::read_dir(&out_images)?
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert!(!written.is_empty());
    assert!(written.len() <= 4);

    for name in &written {
        assert!(name.starts_with("bird_aug"));
        assert!(name.ends_with(".png"));

        let stem = name.trim_end_matches(".png");
        let labels = label::parse_file(out_labels.join(format!("{}.txt", stem)))?;
        assert!(!labels.is_empty());
        assert!(labels.iter().all(|label| label.class == 0));
    }

    // skipped inputs leave no trace
    assert!(!fs::read_dir(&out_images)?.any(|entry| {
        let name = entry.unwrap().file_name().into_string().unwrap();
        name.starts_with("small") || name.starts_with("other") || name.starts_with("unlabeled")
    }));

    Ok(())
}

#[test]
fn seeded_runs_are_reproducible() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input_dir = dir.path().join("input");
    write_split(&input_dir)?;

    let first_out = dir.path().join("first");
    let second_out = dir.path().join("second");
    augment::start(&sample_config(&input_dir, &first_out, 7))?;
    augment::start(&sample_config(&input_dir, &second_out, 7))?;

    let first_labels = first_out.join("valid").join("labels");
    let second_labels = second_out.join("valid").join("labels");

    let mut names: Vec<_> = fs::read_dir(&first_labels)?
        .map(|entry| entry.unwrap().file_name())
        .collect();
    names.sort();
    assert!(!names.is_empty());

    for name in names {
        let first = fs::read_to_string(first_labels.join(&name))?;
        let second = fs::read_to_string(second_labels.join(&name))?;
        assert_eq!(first, second);
    }

    Ok(())
}
