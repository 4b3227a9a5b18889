use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Which side of a foreground region a contour bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Outer border of a connected foreground region
    Outer,
    /// Border of a background hole inside a foreground region
    Hole,
}

/// A closed boundary in pixel coordinates.
///
/// The ring is implicit: the last point connects back to the first and is
/// not repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<[f64; 2]>,
    pub kind: BoundaryKind,
}

impl Contour {
    pub fn new(points: Vec<[f64; 2]>, kind: BoundaryKind) -> Self {
        Self { points, kind }
    }

    /// Convert to a geo-types Polygon for geometric operations
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        Polygon::new(self.to_closed_linestring(), vec![])
    }

    /// The ring as a LineString whose last coordinate repeats the first
    pub fn to_closed_linestring(&self) -> LineString<f64> {
        let mut coords: Vec<Coord<f64>> = self
            .points
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect();
        if let Some(&first) = coords.first() {
            coords.push(first);
        }
        LineString::new(coords)
    }

    /// Enclosed area (shoelace), always non-negative
    pub fn area(&self) -> f64 {
        use geo::Area;
        if self.points.len() < 3 {
            return 0.0;
        }
        self.to_geo_polygon().unsigned_area()
    }

    /// Length of the closed ring, including the closing segment
    pub fn perimeter(&self) -> f64 {
        closed_length(&self.points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the bounding box of the contour
    pub fn bounding_box(&self) -> ([f64; 2], [f64; 2]) {
        bounding_box(&self.points)
    }
}

/// Contours found in one image, together with the image dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracedOutline {
    pub contours: Vec<Contour>,
    /// Boundaries extracted before noise filtering and simplification
    pub contours_found: usize,
    pub image_width: u32,
    pub image_height: u32,
}

impl TracedOutline {
    pub fn total_points(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }
}

/// A closed polyline in millimeters, ready to be written to a drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalPolyline {
    pub points: Vec<[f64; 2]>,
}

impl PhysicalPolyline {
    pub fn bounding_box(&self) -> ([f64; 2], [f64; 2]) {
        bounding_box(&self.points)
    }
}

fn closed_length(points: &[[f64; 2]]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let segment = |a: [f64; 2], b: [f64; 2]| {
        let dx = b[0] - a[0];
        let dy = b[1] - a[1];
        (dx * dx + dy * dy).sqrt()
    };

    let open: f64 = points.windows(2).map(|w| segment(w[0], w[1])).sum();
    open + segment(points[points.len() - 1], points[0])
}

fn bounding_box(points: &[[f64; 2]]) -> ([f64; 2], [f64; 2]) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &[x, y] in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    ([min_x, min_y], [max_x, max_y])
}
