//! Random brightness/contrast jitter.

use crate::common::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorJitterInit {
    /// Maximum brightness shift as a fraction of full scale.
    pub brightness_limit: f64,
    /// Maximum contrast change as a fraction of the identity gain.
    pub contrast_limit: f64,
    pub prob: f64,
}

impl ColorJitterInit {
    pub fn build(self) -> Result<ColorJitter> {
        let Self {
            brightness_limit,
            contrast_limit,
            prob,
        } = self;
        ensure!(
            (0.0..=1.0).contains(&brightness_limit),
            "brightness_limit must be within [0, 1], but get {}",
            brightness_limit
        );
        ensure!(
            (0.0..=1.0).contains(&contrast_limit),
            "contrast_limit must be within [0, 1], but get {}",
            contrast_limit
        );
        ensure!(
            (0.0..=1.0).contains(&prob),
            "probability must be within [0, 1], but get {}",
            prob
        );

        Ok(ColorJitter {
            brightness_limit,
            contrast_limit,
            prob,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ColorJitter {
    brightness_limit: f64,
    contrast_limit: f64,
    prob: f64,
}

impl ColorJitter {
    pub fn forward(
        &self,
        rng: &mut StdRng,
        mut image: RgbImage,
        labels: Vec<RatioLabel>,
    ) -> (RgbImage, Vec<RatioLabel>) {
        if !rng.gen_bool(self.prob) {
            return (image, labels);
        }

        let gain = 1.0 + rng.gen_range(-self.contrast_limit..=self.contrast_limit);
        let shift = rng.gen_range(-self.brightness_limit..=self.brightness_limit) * 255.0;

        for pixel in image.pixels_mut() {
            for channel in pixel.0.iter_mut() {
                *channel = (*channel as f64 * gain + shift).round().clamp(0.0, 255.0) as u8;
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
    fn jitter_stays_in_u8_range() {
        let mut image = RgbImage::new(8, 8);
        for (index, pixel) in image.pixels_mut().enumerate() {
            let value = (index * 37 % 256) as u8;
            *pixel = Rgb([value, value.wrapping_add(90), 255 - value]);
        }

        let jitter = ColorJitterInit {
            brightness_limit: 0.2,
            contrast_limit: 0.2,
            prob: 1.0,
        }
        .build()
        .unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let (output, _) = jitter.forward(&mut rng, image.clone(), vec![]);
            assert_eq!(output.dimensions(), image.dimensions());
        }
    }

    #[test]
    fn build_rejects_out_of_range_limits() {
        assert!(ColorJitterInit {
            brightness_limit: 1.5,
            contrast_limit: 0.2,
            prob: 0.4,
        }
        .build()
        .is_err());
    }
}
