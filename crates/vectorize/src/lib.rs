//! # Bitmap to DXF Vectorization Library
//!
//! Traces the regions of a black-and-white bitmap and writes their
//! boundaries as closed millimeter polylines into a DXF drawing.
//!
//! ## Stages
//!
//! - **Binarize**: inverted global threshold, dark pixels are foreground
//! - **Morphology**: optional close/open pass on the mask
//! - **Extract**: border following, every boundary pixel kept
//! - **Filter**: drop contours below a minimum area or perimeter
//! - **Simplify**: Douglas-Peucker with a perimeter-relative tolerance
//! - **Map**: pixels to millimeters at the given DPI, y axis flipped
//! - **Write**: one closed LWPOLYLINE per contour, `$INSUNITS` = mm
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vectorize::{bmp_to_dxf, ConversionOptions};
//!
//! let options = ConversionOptions::default().with_dpi(600.0);
//! let report = bmp_to_dxf(Path::new("logo.bmp"), options)?;
//! println!("{} polylines -> {}", report.polylines, report.output.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use vectorize::{Pipeline, algorithms::*};
//!
//! let pipeline = Pipeline::builder()
//!     .with_threshold(100)
//!     .with_retrieval(RetrievalMode::Outer)
//!     .with_noise_filter(20.0, 10.0)
//!     .with_simplification(0.002)
//!     .with_degenerate_filter()
//!     .build();
//!
//! let image = image::open("scan.png")?.to_luma8();
//! let outline = pipeline.process(&image)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod config;
pub mod units;
pub mod io;
pub mod converter;

pub use error::{VectorizeError, Result};
pub use types::{BoundaryKind, Contour, PhysicalPolyline, TracedOutline};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use config::{ConversionOptions, Preset};
pub use units::UnitMapper;
pub use io::{build_drawing, read_dxf_polylines, read_dxf_units, write_dxf};
pub use converter::{
    bmp_to_dxf, default_output_path, load_grayscale, ConversionReport, Converter,
};

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    const WHITE: Luma<u8> = Luma([255u8]);
    const BLACK: Luma<u8> = Luma([0u8]);

    fn page(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, WHITE)
    }

    fn fill(img: &mut GrayImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>, color: Luma<u8>) {
        for y in ys {
            for x in xs.clone() {
                img.put_pixel(x, y, color);
            }
        }
    }

    fn disk(img: &mut GrayImage, cx: f32, cy: f32, radius: f32) {
        for y in 0..img.height() {
            for x in 0..img.width() {
                let (dx, dy) = (x as f32 - cx, y as f32 - cy);
                if dx * dx + dy * dy <= radius * radius {
                    img.put_pixel(x, y, BLACK);
                }
            }
        }
    }

    fn converter(options: ConversionOptions) -> Converter {
        Converter::new(options).expect("valid options")
    }

    #[test]
    fn test_blank_page_yields_no_polylines() {
        let polylines = converter(ConversionOptions::default())
            .convert_image(&page(64, 48))
            .expect("convert");
        assert!(polylines.is_empty());
    }

    fn assert_bbox(polyline: &PhysicalPolyline, min: [f64; 2], max: [f64; 2]) {
        let (lo, hi) = polyline.bounding_box();
        for (got, want) in lo.iter().chain(&hi).zip(min.iter().chain(&max)) {
            assert!((got - want).abs() < 1e-9, "bbox {lo:?}..{hi:?}, expected {min:?}..{max:?}");
        }
    }

    #[test]
    fn test_solid_page_yields_single_polyline() {
        let img = GrayImage::from_pixel(20, 20, BLACK);

        for preset in [Preset::Detailed, Preset::Outline] {
            let polylines = converter(preset.options().with_dpi(25.4))
                .convert_image(&img)
                .expect("convert");
            assert_eq!(polylines.len(), 1, "preset {preset}");
            // Pixel rows 0..=19 flip to 20-19 ..= 20-0
            assert_bbox(&polylines[0], [0.0, 1.0], [19.0, 20.0]);
        }
    }

    #[test]
    fn test_regions_touching_the_frame_are_traced() {
        let mut corner = page(40, 40);
        fill(&mut corner, 0..15, 0..15, BLACK);

        let mut edge = page(40, 40);
        fill(&mut edge, 10..30, 25..40, BLACK);

        for preset in [Preset::Detailed, Preset::Outline] {
            let c = converter(preset.options().with_dpi(25.4));

            let polylines = c.convert_image(&corner).expect("convert");
            assert_eq!(polylines.len(), 1, "corner block, preset {preset}");
            assert_bbox(&polylines[0], [0.0, 26.0], [14.0, 40.0]);

            let polylines = c.convert_image(&edge).expect("convert");
            assert_eq!(polylines.len(), 1, "bottom edge block, preset {preset}");
            assert_bbox(&polylines[0], [10.0, 1.0], [29.0, 15.0]);
        }
    }

    #[test]
    fn test_rectangle_bounding_box_in_millimeters() {
        let mut img = page(100, 80);
        fill(&mut img, 20..50, 10..40, BLACK);

        for options in [Preset::Detailed.options(), Preset::Outline.options()] {
            let dpi = 254.0;
            let scale = 25.4 / dpi;
            let polylines = converter(options.with_dpi(dpi))
                .convert_image(&img)
                .expect("convert");

            assert_eq!(polylines.len(), 1);
            let ([min_x, min_y], [max_x, max_y]) = polylines[0].bounding_box();
            assert!((min_x - 20.0 * scale).abs() < 1e-9);
            assert!((max_x - 49.0 * scale).abs() < 1e-9);
            // Pixel rows 10..=39 flip to 80-39 ..= 80-10
            assert!((min_y - 41.0 * scale).abs() < 1e-9);
            assert!((max_y - 70.0 * scale).abs() < 1e-9);
        }
    }

    #[test]
    fn test_noise_is_filtered() {
        let mut img = page(60, 60);
        fill(&mut img, 10..40, 10..40, BLACK);
        // Single pixel, 2x2 speck and a thin sliver: all below area 5
        img.put_pixel(50, 5, BLACK);
        fill(&mut img, 50..52, 50..52, BLACK);
        fill(&mut img, 45..48, 45..46, BLACK);
        // 4x4 block survives (area 9)
        fill(&mut img, 50..54, 20..24, BLACK);

        let polylines = converter(Preset::Outline.options())
            .convert_image(&img)
            .expect("convert");
        assert_eq!(polylines.len(), 2);

        let outline = PipelineBuilder::from_options(&Preset::Outline.options())
            .process(&img)
            .expect("process");
        assert_eq!(outline.contours_found, 5);
        assert_eq!(outline.contours.len(), 2);
    }

    #[test]
    fn test_holes_follow_retrieval_mode() {
        let mut img = page(80, 80);
        fill(&mut img, 10..70, 10..70, BLACK);
        fill(&mut img, 25..55, 25..55, WHITE);

        let all = converter(Preset::Detailed.options())
            .convert_image(&img)
            .expect("convert");
        let outer = converter(Preset::Outline.options())
            .convert_image(&img)
            .expect("convert");

        assert_eq!(all.len(), 2);
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn test_simplification_never_increases_points() {
        let mut img = page(200, 160);
        disk(&mut img, 60.0, 70.0, 40.0);
        disk(&mut img, 150.0, 90.0, 25.0);
        fill(&mut img, 120..190, 10..30, BLACK);

        let raw_options = Preset::Detailed.options().with_simplify_factor(0.0);
        let raw = converter(raw_options.clone()).convert_image(&img).expect("convert");

        for factor in [0.001, 0.005, 0.02] {
            let simplified = converter(raw_options.clone().with_simplify_factor(factor))
                .convert_image(&img)
                .expect("convert");
            assert_eq!(simplified.len(), raw.len());
            for (s, r) in simplified.iter().zip(&raw) {
                assert!(s.points.len() <= r.points.len());
            }
        }
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let mut img = page(120, 90);
        disk(&mut img, 40.0, 45.0, 30.0);
        fill(&mut img, 80..110, 20..70, BLACK);
        fill(&mut img, 90..100, 30..40, WHITE);

        let c = converter(ConversionOptions::default());
        let first = c.convert_image(&img).expect("convert");
        let second = c.convert_image(&img).expect("convert");
        assert_eq!(first, second);
    }

    #[test]
    fn test_traced_outline_reports_dimensions() {
        let mut img = page(30, 20);
        fill(&mut img, 5..15, 5..15, BLACK);

        let outline = PipelineBuilder::from_options(&ConversionOptions::default())
            .process(&img)
            .expect("process");
        assert_eq!((outline.image_width, outline.image_height), (30, 20));
        assert_eq!(outline.contours.len(), 1);
        assert_eq!(outline.contours_found, 1);
        assert!(outline.total_points() >= 4);
    }
}
