use image::GrayImage;
use imageproc::distance_transform::Norm;
use tracing::debug;
use crate::{error::Result, traits::ImagePreprocessor};

/// Global thresholding binarizer.
///
/// Pixels brighter than `threshold` become one class and the rest the other.
/// With `invert` set, dark ink on a light page becomes foreground (255).
#[derive(Debug, Clone)]
pub struct ThresholdPreprocessor {
    pub threshold: u8,
    pub invert: bool,
}

impl Default for ThresholdPreprocessor {
    fn default() -> Self {
        Self {
            threshold: 127,
            invert: true,
        }
    }
}

impl ImagePreprocessor for ThresholdPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        let mut binary = imageproc::contrast::threshold(image, self.threshold);
        if self.invert {
            image::imageops::invert(&mut binary);
        }

        let foreground = binary.pixels().filter(|p| p[0] > 0).count();
        debug!(
            threshold = self.threshold,
            foreground,
            "binarized {}x{} image",
            image.width(),
            image.height()
        );

        Ok(binary)
    }
}

/// Close-then-open pass that bridges hairline gaps and removes speckle.
///
/// A radius of 0 leaves the mask untouched.
#[derive(Debug, Clone, Default)]
pub struct MorphologyPreprocessor {
    pub radius: u8,
}

impl ImagePreprocessor for MorphologyPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        if self.radius == 0 {
            return Ok(image.clone());
        }

        let closed = imageproc::morphology::close(image, Norm::LInf, self.radius);
        Ok(imageproc::morphology::open(&closed, Norm::LInf, self.radius))
    }
}
