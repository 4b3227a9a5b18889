use image::GrayImage;
use crate::{error::Result, types::Contour};

/// Trait for image preprocessing algorithms
pub trait ImagePreprocessor: Send + Sync {
    /// Transform the input image (e.g. threshold, morphology)
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract closed boundaries from a binary image (non-zero = foreground)
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for contour post-processing algorithms
pub trait ContourPostProcessor: Send + Sync {
    /// Post-process the extracted contours; processors may drop contours
    fn process(&self, contours: &mut Vec<Contour>) -> Result<()>;
}
