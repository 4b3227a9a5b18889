use geo::Simplify;
use tracing::debug;
use crate::{error::Result, traits::ContourPostProcessor, types::Contour};

/// Douglas-Peucker simplification with a tolerance relative to each
/// contour's own perimeter.
///
/// `epsilon = factor * perimeter`; a factor of 0 leaves contours untouched.
#[derive(Debug, Clone, Default)]
pub struct PerimeterRelativeSimplifier {
    pub factor: f64,
}

impl PerimeterRelativeSimplifier {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Simplify a single closed contour.
    ///
    /// The result keeps a subset of the original points in their original
    /// order and never has more points than the input.
    pub fn simplify_contour(&self, contour: &Contour) -> Contour {
        let epsilon = self.factor * contour.perimeter();
        if epsilon <= 0.0 || contour.len() < 3 {
            return contour.clone();
        }

        let simplified = contour.to_closed_linestring().simplify(&epsilon);
        let mut points: Vec<[f64; 2]> = simplified.coords().map(|c| [c.x, c.y]).collect();

        // Drop the repeated closing coordinate
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        Contour::new(points, contour.kind)
    }
}

impl ContourPostProcessor for PerimeterRelativeSimplifier {
    fn process(&self, contours: &mut Vec<Contour>) -> Result<()> {
        if self.factor <= 0.0 {
            return Ok(());
        }

        let before: usize = contours.iter().map(Contour::len).sum();
        for contour in contours.iter_mut() {
            *contour = self.simplify_contour(contour);
        }
        let after: usize = contours.iter().map(Contour::len).sum();

        debug!(factor = self.factor, before, after, "simplified contours");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundaryKind;

    fn circle(radius: f64, samples: usize) -> Contour {
        let points = (0..samples)
            .map(|i| {
                let t = i as f64 / samples as f64 * std::f64::consts::TAU;
                [100.0 + radius * t.cos(), 100.0 + radius * t.sin()]
            })
            .collect();
        Contour::new(points, BoundaryKind::Outer)
    }

    fn distance_to_segment(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
        let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq == 0.0 {
            0.0
        } else {
            (((p[0] - a[0]) * dx + (p[1] - a[1]) * dy) / len_sq).clamp(0.0, 1.0)
        };
        let (cx, cy) = (a[0] + t * dx, a[1] + t * dy);
        ((p[0] - cx).powi(2) + (p[1] - cy).powi(2)).sqrt()
    }

    fn distance_to_ring(p: [f64; 2], ring: &[[f64; 2]]) -> f64 {
        (0..ring.len())
            .map(|i| distance_to_segment(p, ring[i], ring[(i + 1) % ring.len()]))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_zero_factor_is_identity() {
        let contour = circle(40.0, 120);
        let simplified = PerimeterRelativeSimplifier::new(0.0).simplify_contour(&contour);
        assert_eq!(simplified, contour);
    }

    #[test]
    fn test_simplification_never_adds_points() {
        let contour = circle(40.0, 240);
        let mut previous = contour.len();
        for factor in [0.0, 0.0005, 0.001, 0.01, 0.05] {
            let simplified = PerimeterRelativeSimplifier::new(factor).simplify_contour(&contour);
            assert!(simplified.len() <= contour.len());
            assert!(simplified.len() <= previous, "factor {factor} grew the contour");
            previous = simplified.len();
        }
        assert!(previous < contour.len());
    }

    #[test]
    fn test_simplified_ring_stays_within_tolerance() {
        let contour = circle(40.0, 240);
        let factor = 0.01;
        let epsilon = factor * contour.perimeter();

        let simplified = PerimeterRelativeSimplifier::new(factor).simplify_contour(&contour);
        assert!(simplified.len() >= 3);

        for &p in &contour.points {
            let d = distance_to_ring(p, &simplified.points);
            assert!(d <= epsilon + 1e-9, "point {p:?} is {d} away, epsilon {epsilon}");
        }
        for p in &simplified.points {
            assert!(contour.points.contains(p));
        }
    }

    #[test]
    fn test_rectangle_collapses_to_corners() {
        let mut points = Vec::new();
        for x in 0..10 {
            points.push([x as f64, 0.0]);
        }
        for y in 0..5 {
            points.push([10.0, y as f64]);
        }
        for x in (1..=10).rev() {
            points.push([x as f64, 5.0]);
        }
        for y in (1..=5).rev() {
            points.push([0.0, y as f64]);
        }
        let contour = Contour::new(points, BoundaryKind::Outer);

        let simplified = PerimeterRelativeSimplifier::new(0.01).simplify_contour(&contour);
        assert_eq!(simplified.len(), 4);
        assert_eq!(simplified.bounding_box(), ([0.0, 0.0], [10.0, 5.0]));
    }

    #[test]
    fn test_process_skips_when_disabled() {
        let mut contours = vec![circle(10.0, 50)];
        PerimeterRelativeSimplifier::new(0.0)
            .process(&mut contours)
            .expect("process");
        assert_eq!(contours[0].len(), 50);
    }
}
