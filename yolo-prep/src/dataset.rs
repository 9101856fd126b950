//! Dataset directory layout helpers.
//!
//! A dataset root contains one directory per split, each with `images` and
//! `labels` subdirectories. Images pair with labels by filename stem.

use crate::common::*;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// The `images`/`labels` directory pair of one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDirs {
    pub images: PathBuf,
    pub labels: PathBuf,
}

impl SplitDirs {
    pub fn new<P>(root: P, split: &str) -> Self
    where
        P: AsRef<Path>,
    {
        let split_dir = root.as_ref().join(split);
        Self {
            images: split_dir.join("images"),
            labels: split_dir.join("labels"),
        }
    }

    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.images)
            .with_context(|| format!("failed to create '{}'", self.images.display()))?;
        fs::create_dir_all(&self.labels)
            .with_context(|| format!("failed to create '{}'", self.labels.display()))?;
        Ok(())
    }
}

/// One image file together with its expected label path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub image_path: PathBuf,
    pub label_path: PathBuf,
    pub stem: String,
    pub extension: String,
}

/// List the images of a split in deterministic order.
pub fn list_images(dirs: &SplitDirs) -> Result<Vec<ImageEntry>> {
    let pattern = format!("{}/*", dirs.images.display());
    let entries = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern '{}'", pattern))?
        .filter_map(|path| {
            let path = match path {
                Ok(path) => path,
                Err(err) => {
                    warn!("skipping unreadable path: {:?}", err);
                    return None;
                }
            };
            let extension = path.extension()?.to_str()?.to_lowercase();
            if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
                return None;
            }
            let stem = path.file_stem()?.to_str()?.to_owned();
            let label_path = dirs.labels.join(format!("{}.txt", stem));
            Some(ImageEntry {
                image_path: path,
                label_path,
                stem,
                extension,
            })
        })
        .sorted_by(|lhs, rhs| lhs.image_path.cmp(&rhs.image_path))
        .collect();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_images_pairs_labels_by_stem() {
        let root = tempfile::tempdir().unwrap();
        let dirs = SplitDirs::new(root.path(), "train");
        dirs.create().unwrap();

        fs::write(dirs.images.join("a.jpg"), []).unwrap();
        fs::write(dirs.images.join("b.PNG"), []).unwrap();
        fs::write(dirs.images.join("notes.txt"), []).unwrap();

        let entries = list_images(&dirs).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].stem, "a");
        assert_eq!(entries[0].extension, "jpg");
        assert_eq!(entries[0].label_path, dirs.labels.join("a.txt"));
        assert_eq!(entries[1].stem, "b");
        assert_eq!(entries[1].extension, "png");
    }
}
