//! Planar geometry derived from a dipole dataset.
//!
//! Points, the first-to-last displacement vector, shared axis bounds and the
//! small numeric helpers they rely on.

/// A point in the X/Y plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Returns this point shifted by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Net displacement from the first to the last point of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementVector {
    pub start: Point,
    pub end: Point,
}

impl DisplacementVector {
    /// Builds the vector from the first to the last point.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_sequence(points: &[Point]) -> Option<Self> {
        let start = *points.first()?;
        let end = *points.last()?;
        Some(Self { start, end })
    }

    /// Unrounded length.
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Length rounded to two decimal places (the reported total dipole).
    pub fn magnitude(&self) -> f64 {
        round_to(self.length(), 2)
    }

    /// Anchor of the magnitude annotation: half the reversed displacement,
    /// scaled by 0.9 horizontally and 0.7 vertically.
    pub fn annotation_anchor(&self) -> Point {
        Point::new(
            (self.start.x - self.end.x) / 2.0 * 0.9,
            (self.start.y - self.end.y) / 2.0 * 0.7,
        )
    }
}

/// Plot limits shared by both axes.
///
/// Both axes take the same lower and upper limit, derived from the smallest
/// and largest of the four per-axis extremes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxisBounds {
    /// Computes padded shared bounds for the given coordinates.
    ///
    /// Returns `None` when either slice is empty.
    pub fn shared(xs: &[f64], ys: &[f64], padding: f64) -> Option<Self> {
        let (x_low, x_high) = min_max(xs)?;
        let (y_low, y_high) = min_max(ys)?;

        let margins = sort_ascending(&[x_low, y_low, x_high, y_high]);
        let low = margins[0] - padding;
        let high = margins[3] + padding;

        Some(Self {
            x_min: low,
            x_max: high,
            y_min: low,
            y_max: high,
        })
    }
}

/// Smallest and largest value of a slice.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Returns a copy of `values` sorted ascending.
///
/// Uses the IEEE total order, so NaN sorts last instead of panicking.
pub fn sort_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Rounds `value` to `decimals` decimal places, ties to even.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Formats a number the way an interactive session prints a float: integral
/// values keep one decimal (`5.0`), others print their shortest form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert_eq!(a.offset(-0.1, 0.2), Point::new(-0.1, 0.2));
    }

    #[test]
    fn test_displacement_magnitude() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, -3.0),
            Point::new(3.0, 4.0),
        ];
        let v = DisplacementVector::from_sequence(&points).unwrap();
        assert_eq!(v.start, points[0]);
        assert_eq!(v.end, points[2]);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_displacement_rounds_to_two_places() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let v = DisplacementVector::from_sequence(&points).unwrap();
        assert_eq!(v.magnitude(), 1.41);
    }

    #[test]
    fn test_round_to_ties_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(1.41421356, 2), 1.41);
    }

    #[test]
    fn test_displacement_single_point() {
        let points = [Point::new(1.5, -2.0)];
        let v = DisplacementVector::from_sequence(&points).unwrap();
        assert_eq!(v.start, v.end);
        assert_eq!(v.magnitude(), 0.0);
    }

    #[test]
    fn test_displacement_empty() {
        assert!(DisplacementVector::from_sequence(&[]).is_none());
    }

    #[test]
    fn test_annotation_anchor() {
        let v = DisplacementVector {
            start: Point::new(2.0, 4.0),
            end: Point::new(0.0, 0.0),
        };
        let anchor = v.annotation_anchor();
        assert!((anchor.x - 0.9).abs() < 1e-12);
        assert!((anchor.y - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_shared_bounds() {
        let xs = [1.0, -2.0, 0.5];
        let ys = [3.0, 7.0, 4.0];
        let b = AxisBounds::shared(&xs, &ys, 1.0).unwrap();

        assert_eq!(b.x_min, -3.0);
        assert_eq!(b.x_max, 8.0);
        assert_eq!(b.x_min, b.y_min);
        assert_eq!(b.x_max, b.y_max);
    }

    #[test]
    fn test_shared_bounds_empty() {
        assert!(AxisBounds::shared(&[], &[1.0], 1.0).is_none());
    }

    #[test]
    fn test_sort_ascending() {
        let input = [3.5, -1.0, 2.0, -7.25, 2.0];
        let sorted = sort_ascending(&input);
        assert_eq!(sorted, vec![-7.25, -1.0, 2.0, 2.0, 3.5]);
        assert_eq!(sort_ascending(&sorted), sorted);
        assert!(sort_ascending(&[]).is_empty());
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[2.0, -1.0, 5.0]), Some((-1.0, 5.0)));
        assert_eq!(min_max(&[]), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5.0");
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(2.35), "2.35");
        assert_eq!(format_number(-1.5), "-1.5");
    }
}
