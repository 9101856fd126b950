//! Fixed-size overlapping tiling of images and their labels.

use crate::common::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TilerInit {
    /// Side length of emitted tiles, in pixels.
    pub tile_size: u32,
    /// Overlap between neighboring tiles, in pixels.
    pub overlap: u32,
}

impl TilerInit {
    pub fn build(self) -> Result<Tiler> {
        let Self { tile_size, overlap } = self;
        ensure!(tile_size > 0, "tile_size must be positive");
        ensure!(
            overlap < tile_size,
            "overlap must be smaller than tile_size, but get overlap={} tile_size={}",
            overlap,
            tile_size
        );

        Ok(Tiler { tile_size, overlap })
    }
}

#[derive(Debug, Clone)]
pub struct Tiler {
    tile_size: u32,
    overlap: u32,
}

/// One tile cut out of a source image.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Origin offset in the source image.
    pub x: u32,
    pub y: u32,
    pub image: RgbImage,
    pub labels: Vec<RatioLabel>,
}

impl Tile {
    /// Deterministic file stem of this tile, `<base>_<x>_<y>`.
    pub fn file_stem(&self, base: &str) -> String {
        format!("{}_{}_{}", base, self.x, self.y)
    }
}

impl Tiler {
    /// Cut the image into a grid of tiles at stride `tile_size - overlap`,
    /// recomputing the labels of each tile.
    ///
    /// Tiles whose intersection with the image is smaller than half the
    /// tile size in either dimension are discarded. Remaining partial
    /// tiles are zero-padded to the full tile size.
    pub fn forward(&self, image: &RgbImage, labels: &[RatioLabel]) -> Vec<Tile> {
        let (width, height) = image.dimensions();
        let stride = self.tile_size - self.overlap;

        let mut tiles = vec![];
        let mut y = 0;
        while y < height {
            let mut x = 0;
            while x < width {
                if let Some(tile) = self.cut(image, labels, x, y) {
                    tiles.push(tile);
                }
                x += stride;
            }
            y += stride;
        }
        tiles
    }

    fn cut(&self, image: &RgbImage, labels: &[RatioLabel], x: u32, y: u32) -> Option<Tile> {
        let (width, height) = image.dimensions();
        let tile_size = self.tile_size;
        let cut_w = tile_size.min(width - x);
        let cut_h = tile_size.min(height - y);

        // too little content to be useful
        if cut_w * 2 < tile_size || cut_h * 2 < tile_size {
            return None;
        }

        let tile_image = if cut_w == tile_size && cut_h == tile_size {
            imageops::crop_imm(image, x, y, cut_w, cut_h).to_image()
        } else {
            let mut padded = RgbImage::new(tile_size, tile_size);
            let cropped = imageops::crop_imm(image, x, y, cut_w, cut_h).to_image();
            imageops::replace(&mut padded, &cropped, 0, 0);
            padded
        };

        // map normalized source coordinates to normalized tile coordinates
        let size = tile_size as f64;
        let source_rect = TLBR::from_tlhw([0.0, 0.0, height as f64, width as f64]);
        let unit_rect = TLBR::from_tlhw([0.0, 0.0, 1.0, 1.0]);
        let tile_rect = TLBR::from_tlhw([y as f64, x as f64, size, size]);
        let to_pixels = Transform::from_rects(&unit_rect, &source_rect);
        let to_tile = Transform::from_rects(&tile_rect, &unit_rect);

        let tile_labels: Vec<_> = labels
            .iter()
            .filter_map(|label| {
                let absolute = &to_pixels * &label.rect;
                let center_in_tile = (x as f64..=(x + tile_size) as f64)
                    .contains(&absolute.cx())
                    && (y as f64..=(y + tile_size) as f64).contains(&absolute.cy());
                if !center_in_tile {
                    return None;
                }

                let rect = (&to_tile * &absolute).clip_to_unit()?;
                Some(RatioLabel {
                    rect,
                    class: label.class,
                })
            })
            .collect();

        Some(Tile {
            x,
            y,
            image: tile_image,
            labels: tile_labels,
        })
    }
}
