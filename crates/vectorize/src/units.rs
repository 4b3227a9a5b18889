//! Pixel to millimeter mapping.
//!
//! Raster rows grow downwards from the top-left corner while drawing
//! coordinates grow upwards from the bottom-left, so the vertical axis is
//! flipped around the image height.

use crate::{
    error::{Result, VectorizeError},
    types::{Contour, PhysicalPolyline},
};

pub const MM_PER_INCH: f64 = 25.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitMapper {
    mm_per_pixel: f64,
    image_height: f64,
}

impl UnitMapper {
    pub fn new(dpi: f64, image_height: u32) -> Result<Self> {
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(VectorizeError::invalid(
                "dpi",
                format!("must be a positive number, got {dpi}"),
            ));
        }
        Ok(Self {
            mm_per_pixel: MM_PER_INCH / dpi,
            image_height: f64::from(image_height),
        })
    }

    pub fn to_physical(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        [
            x * self.mm_per_pixel,
            (self.image_height - y) * self.mm_per_pixel,
        ]
    }

    /// Inverse of [`UnitMapper::to_physical`]
    pub fn to_pixel(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        [
            x / self.mm_per_pixel,
            self.image_height - y / self.mm_per_pixel,
        ]
    }

    pub fn map_contour(&self, contour: &Contour) -> PhysicalPolyline {
        PhysicalPolyline {
            points: contour.points.iter().map(|&p| self.to_physical(p)).collect(),
        }
    }
}
