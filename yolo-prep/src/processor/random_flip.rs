use crate::common::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomFlipInit {
    pub axis: FlipAxis,
    pub prob: f64,
}

impl RandomFlipInit {
    pub fn build(self) -> Result<RandomFlip> {
        let Self { axis, prob } = self;
        ensure!(
            (0.0..=1.0).contains(&prob),
            "flip probability must be within [0, 1], but get {}",
            prob
        );

        Ok(RandomFlip { axis, prob })
    }
}

/// Mirrors the image and its boxes along one axis.
#[derive(Debug, Clone)]
pub struct RandomFlip {
    axis: FlipAxis,
    prob: f64,
}

impl RandomFlip {
    pub fn forward(
        &self,
        rng: &mut StdRng,
        image: RgbImage,
        labels: Vec<RatioLabel>,
    ) -> (RgbImage, Vec<RatioLabel>) {
        if !rng.gen_bool(self.prob) {
            return (image, labels);
        }

        let image = match self.axis {
            FlipAxis::Horizontal => imageops::flip_horizontal(&image),
            FlipAxis::Vertical => imageops::flip_vertical(&image),
        };
        let labels = labels
            .into_iter()
            .map(|label| {
                let rect = match self.axis {
                    FlipAxis::Horizontal => label.rect.hflip(),
                    FlipAxis::Vertical => label.rect.vflip(),
                };
                RatioLabel { rect, ..label }
            })
            .collect();

        (image, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;

    #[test]
    fn horizontal_flip_mirrors_image_and_boxes() {
        let mut image = RgbImage::new(4, 2);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        let labels = vec![RatioLabel {
            rect: CyCxHW::try_from_cycxhw([0.25, 0.125, 0.5, 0.25]).unwrap(),
            class: 0,
        }];

        let flip = RandomFlipInit {
            axis: FlipAxis::Horizontal,
            prob: 1.0,
        }
        .build()
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let (flipped, labels) = flip.forward(&mut rng, image, labels);

        assert_eq!(*flipped.get_pixel(3, 0), Rgb([255, 0, 0]));
        assert_abs_diff_eq!(labels[0].rect.cx(), 0.875);
        assert_abs_diff_eq!(labels[0].rect.cy(), 0.25);
    }

    #[test]
    fn zero_probability_is_identity() {
        let image = RgbImage::new(4, 4);
        let flip = RandomFlipInit {
            axis: FlipAxis::Vertical,
            prob: 0.0,
        }
        .build()
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let (output, _) = flip.forward(&mut rng, image.clone(), vec![]);
        assert_eq!(output, image);
    }
}
