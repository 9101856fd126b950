use crate::common::*;

#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBlurInit {
    /// Maximum (odd) kernel size.
    pub blur_limit: u32,
    pub prob: f64,
}

impl GaussianBlurInit {
    pub fn build(self) -> Result<GaussianBlur> {
        let Self { blur_limit, prob } = self;
        ensure!(
            blur_limit >= 3 && blur_limit % 2 == 1,
            "blur_limit must be an odd number >= 3, but get {}",
            blur_limit
        );
        ensure!(
            (0.0..=1.0).contains(&prob),
            "probability must be within [0, 1], but get {}",
            prob
        );

        Ok(GaussianBlur { blur_limit, prob })
    }
}

#[derive(Debug, Clone)]
pub struct GaussianBlur {
    blur_limit: u32,
    prob: f64,
}

impl GaussianBlur {
    pub fn forward(
        &self,
        rng: &mut StdRng,
        image: RgbImage,
        labels: Vec<RatioLabel>,
    ) -> (RgbImage, Vec<RatioLabel>) {
        if !rng.gen_bool(self.prob) {
            return (image, labels);
        }

        // sample an odd kernel size, then derive sigma from it
        let kernel_count = (self.blur_limit - 1) / 2;
        let kernel = 3 + 2 * rng.gen_range(0..kernel_count);
        let sigma = 0.3 * ((kernel - 1) as f32 * 0.5 - 1.0) + 0.8;

        let image = imageproc::filter::gaussian_blur_f32(&image, sigma);
        (image, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn build_rejects_even_kernel_limits() {
        assert!(GaussianBlurInit {
            blur_limit: 4,
            prob: 0.3
        }
        .build()
        .is_err());
        assert!(GaussianBlurInit {
            blur_limit: 5,
            prob: 0.3
        }
        .build()
        .is_ok());
    }

    #[test]
    fn blur_preserves_dimensions_and_labels() {
        let image = RgbImage::new(32, 16);
        let labels = vec![RatioLabel {
            rect: CyCxHW::try_from_cycxhw([0.5, 0.5, 0.2, 0.2]).unwrap(),
            class: 0,
        }];

        let blur = GaussianBlurInit {
            blur_limit: 5,
            prob: 1.0,
        }
        .build()
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let (output, out_labels) = blur.forward(&mut rng, image, labels.clone());
        assert_eq!(output.dimensions(), (32, 16));
        assert_eq!(out_labels, labels);
    }
}
