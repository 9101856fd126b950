//! Random affine transform with consistent box remapping.

use crate::common::*;

#[derive(Debug, Clone, PartialEq)]
pub struct RandomAffineInit {
    /// Maximum translation as a fraction of the image size.
    pub translation: f64,
    /// Scaling factor range.
    pub scale: (f64, f64),
    /// Maximum rotation magnitude in degrees.
    pub rotate_degrees: f64,
    /// Boxes whose visible area fraction drops below this are removed.
    pub min_visibility: f64,
    pub prob: f64,
}

impl RandomAffineInit {
    pub fn build(self) -> Result<RandomAffine> {
        let Self {
            translation,
            scale,
            rotate_degrees,
            min_visibility,
            prob,
        } = self;
        ensure!(translation >= 0.0, "translation must be non-negative");
        ensure!(
            0.0 < scale.0 && scale.0 <= scale.1,
            "scale range must satisfy 0 < min <= max, but get ({}, {})",
            scale.0,
            scale.1
        );
        ensure!(rotate_degrees >= 0.0, "rotate_degrees must be non-negative");
        ensure!(
            (0.0..=1.0).contains(&min_visibility),
            "min_visibility must be within [0, 1], but get {}",
            min_visibility
        );
        ensure!(
            (0.0..=1.0).contains(&prob),
            "probability must be within [0, 1], but get {}",
            prob
        );

        Ok(RandomAffine {
            translation,
            scale,
            rotate_degrees,
            min_visibility,
            prob,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RandomAffine {
    translation: f64,
    scale: (f64, f64),
    rotate_degrees: f64,
    min_visibility: f64,
    prob: f64,
}

impl RandomAffine {
    pub fn forward(
        &self,
        rng: &mut StdRng,
        image: RgbImage,
        labels: Vec<RatioLabel>,
    ) -> (RgbImage, Vec<RatioLabel>) {
        if !rng.gen_bool(self.prob) {
            return (image, labels);
        }

        let (width, height) = image.dimensions();
        let matrix = self.sample(rng, width, height);
        let warped = warp_reflect(&image, &matrix);
        let labels = map_labels(&matrix, &labels, width, height, self.min_visibility);
        (warped, labels)
    }

    fn sample(&self, rng: &mut StdRng, width: u32, height: u32) -> AffineMatrix {
        let angle = rng
            .gen_range(-self.rotate_degrees..=self.rotate_degrees)
            .to_radians();
        let scale = rng.gen_range(self.scale.0..=self.scale.1);
        let shift_x = rng.gen_range(-self.translation..=self.translation) * width as f64;
        let shift_y = rng.gen_range(-self.translation..=self.translation) * height as f64;
        AffineMatrix::centered(angle, scale, shift_x, shift_y, width as f64, height as f64)
    }
}

/// A 2x3 affine matrix mapping source pixel coordinates to output
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AffineMatrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    tx: f64,
    ty: f64,
}

impl AffineMatrix {
    /// Rotation and scaling about the image center, then translation.
    fn centered(
        angle_radians: f64,
        scale: f64,
        shift_x: f64,
        shift_y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        let (sin, cos) = angle_radians.sin_cos();
        let a = scale * cos;
        let b = -scale * sin;
        let c = scale * sin;
        let d = scale * cos;

        let cx = width / 2.0;
        let cy = height / 2.0;
        let tx = cx - a * cx - b * cy + shift_x;
        let ty = cy - c * cx - d * cy + shift_y;

        Self { a, b, c, d, tx, ty }
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.tx,
            self.c * x + self.d * y + self.ty,
        )
    }

    fn inverse(&self) -> Self {
        let Self { a, b, c, d, tx, ty } = *self;
        let det = a * d - b * c;
        let ia = d / det;
        let ib = -b / det;
        let ic = -c / det;
        let id = a / det;
        Self {
            a: ia,
            b: ib,
            c: ic,
            d: id,
            tx: -(ia * tx + ib * ty),
            ty: -(ic * tx + id * ty),
        }
    }
}

/// Mirror an out-of-range index back into `[0, size)` without repeating the
/// border pixel (OpenCV's BORDER_REFLECT_101).
fn reflect_index(index: i64, size: i64) -> i64 {
    if size == 1 {
        return 0;
    }
    let period = 2 * (size - 1);
    let mut index = index % period;
    if index < 0 {
        index += period;
    }
    if index >= size {
        period - index
    } else {
        index
    }
}

fn sample_bilinear(image: &RgbImage, x: f64, y: f64) -> Rgb<u8> {
    let (width, height) = image.dimensions();
    let (width, height) = (width as i64, height as i64);

    let x0 = x.floor();
    let y0 = y.floor();
    let dx = x - x0;
    let dy = y - y0;

    let fetch = |ix: i64, iy: i64| -> [f64; 3] {
        let ix = reflect_index(ix, width) as u32;
        let iy = reflect_index(iy, height) as u32;
        let pixel = image.get_pixel(ix, iy);
        [pixel.0[0] as f64, pixel.0[1] as f64, pixel.0[2] as f64]
    };

    let (x0, y0) = (x0 as i64, y0 as i64);
    let tl = fetch(x0, y0);
    let tr = fetch(x0 + 1, y0);
    let bl = fetch(x0, y0 + 1);
    let br = fetch(x0 + 1, y0 + 1);

    let mut channels = [0u8; 3];
    for (index, channel) in channels.iter_mut().enumerate() {
        let top = tl[index] * (1.0 - dx) + tr[index] * dx;
        let bottom = bl[index] * (1.0 - dx) + br[index] * dx;
        *channel = (top * (1.0 - dy) + bottom * dy).round().clamp(0.0, 255.0) as u8;
    }
    Rgb(channels)
}

fn warp_reflect(image: &RgbImage, matrix: &AffineMatrix) -> RgbImage {
    let (width, height) = image.dimensions();
    let inverse = matrix.inverse();

    RgbImage::from_fn(width, height, |x, y| {
        let (src_x, src_y) = inverse.apply(x as f64, y as f64);
        sample_bilinear(image, src_x, src_y)
    })
}

fn map_labels(
    matrix: &AffineMatrix,
    labels: &[RatioLabel],
    width: u32,
    height: u32,
    min_visibility: f64,
) -> Vec<RatioLabel> {
    let image_rect = TLBR::from_tlhw([0.0, 0.0, height as f64, width as f64]);
    let unit_rect = TLBR::from_tlhw([0.0, 0.0, 1.0, 1.0]);
    let to_pixels = Transform::from_rects(&unit_rect, &image_rect);
    let to_unit = Transform::from_rects(&image_rect, &unit_rect);

    labels
        .iter()
        .filter_map(|label| {
            let [t, l, b, r] = (&to_pixels * &label.rect).to_tlbr().tlbr();
            let corners = [(l, t), (r, t), (l, b), (r, b)];

            let mut min_x = f64::INFINITY;
            let mut max_x = f64::NEG_INFINITY;
            let mut min_y = f64::INFINITY;
            let mut max_y = f64::NEG_INFINITY;
            for (x, y) in corners {
                let (x, y) = matrix.apply(x, y);
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }

            let moved = TLBR::from_tlbr([min_y, min_x, max_y, max_x]);
            let full_area = moved.area();
            if full_area <= 0.0 {
                return None;
            }

            let clipped = moved.intersect_with(&image_rect)?;
            if clipped.area() / full_area < min_visibility {
                return None;
            }

            Some(RatioLabel {
                rect: (&to_unit * &clipped).to_cycxhw(),
                class: label.class,
            })
        })
        .collect()
}
