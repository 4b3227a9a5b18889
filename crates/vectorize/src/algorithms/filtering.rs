use tracing::debug;
use crate::{error::Result, traits::ContourPostProcessor, types::Contour};

/// Drops contours too small to be anything but scan noise.
///
/// Area and perimeter are measured in pixel units on the unsimplified ring.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    pub min_area: f64,
    pub min_perimeter: f64,
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self {
            min_area: 5.0,
            min_perimeter: 3.0,
        }
    }
}

impl NoiseFilter {
    pub fn accepts(&self, contour: &Contour) -> bool {
        contour.area() >= self.min_area && contour.perimeter() >= self.min_perimeter
    }
}

impl ContourPostProcessor for NoiseFilter {
    fn process(&self, contours: &mut Vec<Contour>) -> Result<()> {
        let before = contours.len();
        contours.retain(|contour| self.accepts(contour));
        debug!(
            min_area = self.min_area,
            min_perimeter = self.min_perimeter,
            removed = before - contours.len(),
            "noise filter"
        );
        Ok(())
    }
}

/// Drops contours with fewer than three points
#[derive(Debug, Clone, Default)]
pub struct DegenerateFilter;

impl ContourPostProcessor for DegenerateFilter {
    fn process(&self, contours: &mut Vec<Contour>) -> Result<()> {
        let before = contours.len();
        contours.retain(|contour| contour.len() >= 3);
        if contours.len() < before {
            debug!(removed = before - contours.len(), "dropped degenerate contours");
        }
        Ok(())
    }
}
