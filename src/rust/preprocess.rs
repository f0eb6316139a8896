use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;
use log::info;
use ndarray::Array4;

use crate::ClassifierError;

/// Side length of the square input the bundled model was trained on.
pub const DEFAULT_INPUT_SIZE: u32 = 128;

/// Bicubic resampling, the filter the training pipeline resized with.
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Scaling applied to raw `0..=255` channel values before inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Pass channel values through unchanged
    #[default]
    None,
    /// Divide channel values by 255 so they fall in `[0, 1]`
    UnitRange,
}

impl Normalization {
    fn apply(self, value: u8) -> f32 {
        match self {
            Normalization::None => value as f32,
            Normalization::UnitRange => value as f32 / 255.0,
        }
    }
}

/// Shape and scaling of the tensor fed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSpec {
    pub width: u32,
    pub height: u32,
    pub normalization: Normalization,
}

impl Default for InputSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_INPUT_SIZE,
            height: DEFAULT_INPUT_SIZE,
            normalization: Normalization::None,
        }
    }
}

impl InputSpec {
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Tensor shape in NHWC order with a batch of one
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        (1, self.height as usize, self.width as usize, 3)
    }
}

/// Decodes the image at `path` and converts it with [`image_to_tensor`].
///
/// # Errors
/// - `Image` if the file does not exist or cannot be decoded
pub fn load_image_tensor<P: AsRef<Path>>(path: P, spec: &InputSpec) -> Result<Array4<f32>, ClassifierError> {
    let path = path.as_ref();
    info!("Loading image from {:?}", path);
    let image = image::open(path)
        .map_err(|e| ClassifierError::Image(format!("Failed to open {}: {}", path.display(), e)))?;
    info!("Decoded {}x{} image", image.width(), image.height());
    Ok(image_to_tensor(&image, spec))
}

/// Forces RGB, resizes to exactly `spec.width` x `spec.height` with
/// [`RESIZE_FILTER`] and lays the pixels out as `(1, height, width, 3)`.
pub fn image_to_tensor(image: &DynamicImage, spec: &InputSpec) -> Array4<f32> {
    let rgb = image.to_rgb8();
    let resized = image::imageops::resize(&rgb, spec.width, spec.height, RESIZE_FILTER);

    let mut tensor = Array4::<f32>::zeros(spec.shape());
    for (x, y, pixel) in resized.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for c in 0..3 {
            tensor[[0, y, x, c]] = spec.normalization.apply(pixel[c]);
        }
    }
    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_default_shape() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(640, 480));
        let tensor = image_to_tensor(&image, &InputSpec::default());
        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
    }

    #[test]
    fn test_raw_pixel_values() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 20, Rgb([200, 100, 7])));
        let tensor = image_to_tensor(&image, &InputSpec::default());
        assert_eq!(tensor[[0, 64, 64, 0]], 200.0);
        assert_eq!(tensor[[0, 64, 64, 1]], 100.0);
        assert_eq!(tensor[[0, 0, 127, 2]], 7.0);
    }

    #[test]
    fn test_unit_range_normalization() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([255, 0, 51])));
        let spec = InputSpec::default().with_normalization(Normalization::UnitRange);
        let tensor = image_to_tensor(&image, &spec);
        assert!((tensor[[0, 3, 3, 0]] - 1.0).abs() < 1e-6);
        assert_eq!(tensor[[0, 3, 3, 1]], 0.0);
        assert!((tensor[[0, 3, 3, 2]] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_grayscale_is_expanded_to_rgb() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 3, Luma([90])));
        let tensor = image_to_tensor(&image, &InputSpec::default());
        assert_eq!(tensor.shape(), &[1, 128, 128, 3]);
        for c in 0..3 {
            assert_eq!(tensor[[0, 10, 10, c]], 90.0);
        }
    }

    #[test]
    fn test_resize_is_bicubic() {
        let board = RgbImage::from_fn(300, 300, |x, y| {
            if (x / 7 + y / 7) % 2 == 0 { Rgb([250, 10, 120]) } else { Rgb([5, 240, 60]) }
        });
        let expected = image::imageops::resize(&board, 128, 128, FilterType::CatmullRom);
        let bilinear = image::imageops::resize(&board, 128, 128, FilterType::Triangle);
        assert_ne!(expected, bilinear);

        let tensor = image_to_tensor(&DynamicImage::ImageRgb8(board), &InputSpec::default());
        for (x, y, pixel) in expected.enumerate_pixels() {
            for c in 0..3 {
                assert_eq!(tensor[[0, y as usize, x as usize, c]], pixel[c] as f32, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_non_square_spec() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(5, 5));
        let spec = InputSpec { width: 32, height: 16, normalization: Normalization::None };
        assert_eq!(image_to_tensor(&image, &spec).shape(), &[1, 16, 32, 3]);
    }
}
