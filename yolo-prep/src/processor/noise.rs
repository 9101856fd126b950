//! Pixel noise transforms.

use crate::common::*;

#[derive(Debug, Clone, PartialEq)]
pub struct GaussNoiseInit {
    /// Standard deviation range as a fraction of full scale.
    pub std_range: (f64, f64),
    pub prob: f64,
}

impl GaussNoiseInit {
    pub fn build(self) -> Result<GaussNoise> {
        let Self { std_range, prob } = self;
        let (lo, hi) = std_range;
        ensure!(
            0.0 <= lo && lo <= hi && hi <= 1.0,
            "std_range must satisfy 0 <= min <= max <= 1, but get ({}, {})",
            lo,
            hi
        );
        ensure!(
            (0.0..=1.0).contains(&prob),
            "probability must be within [0, 1], but get {}",
            prob
        );

        Ok(GaussNoise { std_range, prob })
    }
}

/// Additive per-channel Gaussian noise.
#[derive(Debug, Clone)]
pub struct GaussNoise {
    std_range: (f64, f64),
    prob: f64,
}

impl GaussNoise {
    pub fn forward(
        &self,
        rng: &mut StdRng,
        image: RgbImage,
        labels: Vec<RatioLabel>,
    ) -> (RgbImage, Vec<RatioLabel>) {
        if !rng.gen_bool(self.prob) {
            return (image, labels);
        }

        let (lo, hi) = self.std_range;
        let stddev = rng.gen_range(lo..=hi) * 255.0;
        let seed = rng.gen();
        let image = imageproc::noise::gaussian_noise(&image, 0.0, stddev, seed);
        (image, labels)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiplicativeNoiseInit {
    pub multiplier: (f64, f64),
    pub prob: f64,
}

impl MultiplicativeNoiseInit {
    pub fn build(self) -> Result<MultiplicativeNoise> {
        let Self { multiplier, prob } = self;
        let (lo, hi) = multiplier;
        ensure!(
            0.0 < lo && lo <= hi,
            "multiplier range must satisfy 0 < min <= max, but get ({}, {})",
            lo,
            hi
        );
        ensure!(
            (0.0..=1.0).contains(&prob),
            "probability must be within [0, 1], but get {}",
            prob
        );

        Ok(MultiplicativeNoise { multiplier, prob })
    }
}

/// Scales every pixel by one uniformly sampled factor.
#[derive(Debug, Clone)]
pub struct MultiplicativeNoise {
    multiplier: (f64, f64),
    prob: f64,
}

impl MultiplicativeNoise {
    pub fn forward(
        &self,
        rng: &mut StdRng,
        mut image: RgbImage,
        labels: Vec<RatioLabel>,
    ) -> (RgbImage, Vec<RatioLabel>) {
        if !rng.gen_bool(self.prob) {
            return (image, labels);
        }

        let (lo, hi) = self.multiplier;
        let factor = rng.gen_range(lo..=hi);
        for pixel in image.pixels_mut() {
            for channel in pixel.0.iter_mut() {
                *channel = (*channel as f64 * factor).round().clamp(0.0, 255.0) as u8;
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
    fn gauss_noise_changes_pixels() {
        let mut image = RgbImage::new(16, 16);
        for pixel in image.pixels_mut() {
            *pixel = Rgb([128, 128, 128]);
        }

        let noise = GaussNoiseInit {
            std_range: (0.1, 0.2),
            prob: 1.0,
        }
        .build()
        .unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let (output, _) = noise.forward(&mut rng, image.clone(), vec![]);
        assert_eq!(output.dimensions(), image.dimensions());
        assert_ne!(output, image);
    }

    #[test]
    fn multiplicative_noise_scales_uniformly() {
        let mut image = RgbImage::new(4, 4);
        for pixel in image.pixels_mut() {
            *pixel = Rgb([100, 100, 100]);
        }

        let noise = MultiplicativeNoiseInit {
            multiplier: (1.1, 1.1),
            prob: 1.0,
        }
        .build()
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let (output, _) = noise.forward(&mut rng, image, vec![]);
        assert!(output.pixels().all(|pixel| pixel.0 == [110, 110, 110]));
    }

    #[test]
    fn build_rejects_inverted_ranges() {
        assert!(GaussNoiseInit {
            std_range: (0.2, 0.1),
            prob: 0.4,
        }
        .build()
        .is_err());
        assert!(MultiplicativeNoiseInit {
            multiplier: (0.0, 1.1),
            prob: 0.3,
        }
        .build()
        .is_err());
    }
}
