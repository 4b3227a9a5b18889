pub mod builder;

use image::GrayImage;
use tracing::debug;
use crate::{
    error::Result,
    types::TracedOutline,
    traits::{ImagePreprocessor, ContourExtractor, ContourPostProcessor},
};

/// A raster-to-contour pipeline: preprocessors, one extractor, post-processors
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Box<dyn ContourExtractor>,
    postprocessors: Vec<Box<dyn ContourPostProcessor>>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        contour_extractor: Box<dyn ContourExtractor>,
        postprocessors: Vec<Box<dyn ContourPostProcessor>>,
    ) -> Self {
        Self {
            preprocessors,
            contour_extractor,
            postprocessors,
        }
    }

    /// Run a grayscale image through every stage
    pub fn process(&self, image: &GrayImage) -> Result<TracedOutline> {
        let mut processed_image = image.clone();
        for preprocessor in &self.preprocessors {
            processed_image = preprocessor.preprocess(&processed_image)?;
        }

        let mut contours = self.contour_extractor.extract_contours(&processed_image)?;
        let contours_found = contours.len();

        for postprocessor in &self.postprocessors {
            postprocessor.process(&mut contours)?;
        }

        debug!(contours_found, kept = contours.len(), "pipeline finished");

        Ok(TracedOutline {
            contours,
            contours_found,
            image_width: image.width(),
            image_height: image.height(),
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} preprocessors, 1 contour extractor, {} postprocessors",
            self.preprocessors.len(),
            self.postprocessors.len()
        )
    }
}
