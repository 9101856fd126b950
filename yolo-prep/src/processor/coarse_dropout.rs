use crate::common::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CoarseDropoutInit {
    pub num_holes: (u32, u32),
    /// Hole height range as a fraction of the image height.
    pub hole_height: (f64, f64),
    /// Hole width range as a fraction of the image width.
    pub hole_width: (f64, f64),
    pub prob: f64,
}

impl CoarseDropoutInit {
    pub fn build(self) -> Result<CoarseDropout> {
        let Self {
            num_holes,
            hole_height,
            hole_width,
            prob,
        } = self;
        ensure!(
            num_holes.0 >= 1 && num_holes.0 <= num_holes.1,
            "num_holes must satisfy 1 <= min <= max, but get ({}, {})",
            num_holes.0,
            num_holes.1
        );
        for (name, (lo, hi)) in [("hole_height", hole_height), ("hole_width", hole_width)] {
            ensure!(
                0.0 < lo && lo <= hi && hi <= 1.0,
                "{} must satisfy 0 < min <= max <= 1, but get ({}, {})",
                name,
                lo,
                hi
            );
        }
        ensure!(
            (0.0..=1.0).contains(&prob),
            "probability must be within [0, 1], but get {}",
            prob
        );

        Ok(CoarseDropout {
            num_holes,
            hole_height,
            hole_width,
            prob,
        })
    }
}

/// Occludes random rectangular regions with zero pixels.
///
/// Boxes are left untouched; occlusion does not move or drop labels.
#[derive(Debug, Clone)]
pub struct CoarseDropout {
    num_holes: (u32, u32),
    hole_height: (f64, f64),
    hole_width: (f64, f64),
    prob: f64,
}

impl CoarseDropout {
    pub fn forward(
        &self,
        rng: &mut StdRng,
        mut image: RgbImage,
        labels: Vec<RatioLabel>,
    ) -> (RgbImage, Vec<RatioLabel>) {
        if !rng.gen_bool(self.prob) {
            return (image, labels);
        }

        let (width, height) = image.dimensions();
        let count = rng.gen_range(self.num_holes.0..=self.num_holes.1);

        for _ in 0..count {
            let hole_h =
                ((rng.gen_range(self.hole_height.0..=self.hole_height.1) * height as f64) as u32)
                    .clamp(1, height);
            let hole_w =
                ((rng.gen_range(self.hole_width.0..=self.hole_width.1) * width as f64) as u32)
                    .clamp(1, width);
            let top = rng.gen_range(0..=height - hole_h);
            let left = rng.gen_range(0..=width - hole_w);

            for y in top..top + hole_h {
                for x in left..left + hole_w {
                    image.put_pixel(x, y, Rgb([0, 0, 0]));
                }
            }
        }

        (image, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn dropout_zeroes_some_pixels_and_keeps_labels() {
        let mut image = RgbImage::new(64, 64);
        for pixel in image.pixels_mut() {
            *pixel = Rgb([255, 255, 255]);
        }
        let labels = vec![RatioLabel {
            rect: CyCxHW::try_from_cycxhw([0.5, 0.5, 0.4, 0.4]).unwrap(),
            class: 0,
        }];

        let dropout = CoarseDropoutInit {
            num_holes: (1, 5),
            hole_height: (0.1, 0.2),
            hole_width: (0.1, 0.2),
            prob: 1.0,
        }
        .build()
        .unwrap();

        let mut rng = StdRng::seed_from_u64(17);
        let (output, out_labels) = dropout.forward(&mut rng, image, labels.clone());

        let zeroed = output
            .pixels()
            .filter(|pixel| pixel.0 == [0, 0, 0])
            .count();
        assert!(zeroed > 0);
        assert_eq!(out_labels, labels);
    }
}
