use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::GrayImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::ConversionOptions,
    error::Result,
    io::write_dxf,
    pipeline::{Pipeline, builder::PipelineBuilder},
    types::{PhysicalPolyline, TracedOutline},
    units::UnitMapper,
};

/// Summary of one finished conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub image_width: u32,
    pub image_height: u32,
    /// Boundaries traced before noise filtering
    pub contours_found: usize,
    pub polylines: usize,
    pub points: usize,
}

/// `<dir>/<stem>.dxf` next to the input bitmap
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("dxf")
}

/// Load any decodable raster and reduce it to 8-bit grayscale
pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
    let img = image::open(path)?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "loaded {}",
        path.display()
    );
    Ok(img.to_luma8())
}

/// Bitmap to DXF converter bound to one set of options
#[derive(Clone)]
pub struct Converter {
    options: ConversionOptions,
    pipeline: Arc<Pipeline>,
}

impl Converter {
    /// Validate `options` and build the matching pipeline
    pub fn new(options: ConversionOptions) -> Result<Self> {
        options.validate()?;
        let pipeline = PipelineBuilder::from_options(&options);
        debug!("{}", pipeline.info());
        Ok(Self {
            options,
            pipeline: Arc::new(pipeline),
        })
    }

    /// Trace an in-memory image into millimeter polylines
    pub fn convert_image(&self, image: &GrayImage) -> Result<Vec<PhysicalPolyline>> {
        let outline = self.pipeline.process(image)?;
        self.to_physical(&outline)
    }

    fn to_physical(&self, outline: &TracedOutline) -> Result<Vec<PhysicalPolyline>> {
        let mapper = UnitMapper::new(self.options.dpi, outline.image_height)?;
        Ok(outline
            .contours
            .iter()
            .map(|contour| mapper.map_contour(contour))
            .collect())
    }

    /// Load `input`, trace it and write the drawing to `output`.
    ///
    /// Nothing is written when any stage fails.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        let image = load_grayscale(input)?;
        let outline = self.pipeline.process(&image)?;
        let polylines = self.to_physical(&outline)?;
        write_dxf(&polylines, output)?;

        let report = ConversionReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            image_width: image.width(),
            image_height: image.height(),
            contours_found: outline.contours_found,
            polylines: polylines.len(),
            points: polylines.iter().map(|p| p.points.len()).sum(),
        };

        info!(
            "Found {} contours, wrote {} with total {} points",
            report.contours_found, report.polylines, report.points
        );
        Ok(report)
    }
}

/// Convert `input` into `<stem>.dxf` beside it
pub fn bmp_to_dxf(input: &Path, options: ConversionOptions) -> Result<ConversionReport> {
    let converter = Converter::new(options)?;
    converter.convert(input, &default_output_path(input))
}
