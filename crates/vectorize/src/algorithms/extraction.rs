use image::GrayImage;
use imageproc::contours::BorderType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::debug;
use crate::{
    error::Result,
    traits::ContourExtractor,
    types::{BoundaryKind, Contour},
};

/// Which boundaries the extractor keeps
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RetrievalMode {
    /// Outer boundaries and hole boundaries
    #[default]
    All,
    /// Outer boundaries only
    Outer,
}

/// Imageproc-based (Suzuki-Abe border following) contour extractor.
///
/// Every boundary pixel is kept; no chain compression.
#[derive(Debug, Clone, Default)]
pub struct ImageprocContourExtractor {
    pub mode: RetrievalMode,
}

/// Copy `image` into the middle of a one pixel background frame
fn pad_with_background(image: &GrayImage) -> GrayImage {
    let mut padded = GrayImage::new(image.width() + 2, image.height() + 2);
    image::imageops::replace(&mut padded, image, 1, 1);
    padded
}

impl ContourExtractor for ImageprocContourExtractor {
    fn extract_contours(&self, binary_image: &GrayImage) -> Result<Vec<Contour>> {
        // Regions touching the frame get mislabelled as holes without padding
        let padded = pad_with_background(binary_image);
        let contours = imageproc::contours::find_contours::<i32>(&padded);
        let found = contours.len();

        let result: Vec<Contour> = contours
            .into_iter()
            .filter_map(|contour| {
                let kind = match contour.border_type {
                    BorderType::Outer => BoundaryKind::Outer,
                    BorderType::Hole => BoundaryKind::Hole,
                };
                if self.mode == RetrievalMode::Outer && kind == BoundaryKind::Hole {
                    return None;
                }

                let points = contour
                    .points
                    .iter()
                    .map(|p| [f64::from(p.x - 1), f64::from(p.y - 1)])
                    .collect();
                Some(Contour::new(points, kind))
            })
            .collect();

        debug!(mode = %self.mode, found, kept = result.len(), "extracted contours");
        Ok(result)
    }
}
