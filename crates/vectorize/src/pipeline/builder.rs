use crate::{
    pipeline::Pipeline,
    traits::{ImagePreprocessor, ContourExtractor, ContourPostProcessor},
    algorithms::{
        DegenerateFilter,
        ImageprocContourExtractor,
        MorphologyPreprocessor,
        NoiseFilter,
        PerimeterRelativeSimplifier,
        RetrievalMode,
        ThresholdPreprocessor,
    },
    config::ConversionOptions,
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    postprocessors: Vec<Box<dyn ContourPostProcessor>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            contour_extractor: None,
            postprocessors: Vec::new(),
        }
    }

    /// Add a preprocessor to the pipeline
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Add a post-processor to the pipeline
    pub fn add_postprocessor<P>(mut self, postprocessor: P) -> Self
    where
        P: ContourPostProcessor + 'static,
    {
        self.postprocessors.push(Box::new(postprocessor));
        self
    }

    /// Binarize with an inverted global threshold (dark = foreground)
    pub fn with_threshold(self, threshold: u8) -> Self {
        self.add_preprocessor(ThresholdPreprocessor { threshold, invert: true })
    }

    /// Close-then-open the binary mask; radius 0 is skipped
    pub fn with_morphology(self, radius: u8) -> Self {
        if radius == 0 {
            return self;
        }
        self.add_preprocessor(MorphologyPreprocessor { radius })
    }

    pub fn with_retrieval(self, mode: RetrievalMode) -> Self {
        self.set_contour_extractor(ImageprocContourExtractor { mode })
    }

    /// Discard contours below the given area or perimeter
    pub fn with_noise_filter(self, min_area: f64, min_perimeter: f64) -> Self {
        self.add_postprocessor(NoiseFilter { min_area, min_perimeter })
    }

    /// Perimeter-relative Douglas-Peucker; a factor of 0 adds nothing
    pub fn with_simplification(self, factor: f64) -> Self {
        if factor <= 0.0 {
            return self;
        }
        self.add_postprocessor(PerimeterRelativeSimplifier::new(factor))
    }

    /// Drop contours left with fewer than three points
    pub fn with_degenerate_filter(self) -> Self {
        self.add_postprocessor(DegenerateFilter)
    }

    /// Build the pipeline, defaulting to an all-boundaries extractor
    pub fn build(self) -> Pipeline {
        let contour_extractor = self
            .contour_extractor
            .unwrap_or_else(|| Box::new(ImageprocContourExtractor::default()));

        Pipeline::new(self.preprocessors, contour_extractor, self.postprocessors)
    }

    /// Build the full conversion pipeline described by `options`
    pub fn from_options(options: &ConversionOptions) -> Pipeline {
        Self::new()
            .with_threshold(options.threshold)
            .with_morphology(options.morphology_radius)
            .with_retrieval(options.retrieval)
            .with_noise_filter(options.min_area, options.min_perimeter)
            .with_simplification(options.simplify_factor)
            .with_degenerate_filter()
            .build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
