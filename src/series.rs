//! Ordered sample sequences.

use serde::{Deserialize, Serialize};

use crate::config::SortAxis;
use crate::geom::Point;
use crate::view::Viewport;

/// An ordered sequence of data points.
///
/// Transforms never mutate a series in place; each stage produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<Point>,
}

impl Series {
    /// Create a series from points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a series from `(x, y)` tuples.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        pairs.into_iter().map(Point::from).collect()
    }

    /// Access all points as a slice.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consume the series and return its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Access a single point by index.
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tight bounds over the finite points.
    pub fn bounds(&self) -> Option<Viewport> {
        Viewport::from_points(&self.points)
    }

    /// Check whether keys on `axis` are non-decreasing.
    ///
    /// Keys are compared with a total order, so NaN sorts after every number.
    pub fn is_sorted_by(&self, axis: SortAxis) -> bool {
        self.points
            .windows(2)
            .all(|pair| axis.key(&pair[0]).total_cmp(&axis.key(&pair[1])).is_le())
    }

    /// Iterate over X values.
    pub fn xs(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.x)
    }

    /// Iterate over Y values.
    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|point| point.y)
    }
}

impl FromIterator<Point> for Series {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Point>> for Series {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_check_follows_axis() {
        let series = Series::from_pairs([(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)]);
        assert!(series.is_sorted_by(SortAxis::X));
        assert!(!series.is_sorted_by(SortAxis::Y));
    }

    #[test]
    fn bounds_skip_non_finite_points() {
        let series = Series::from_pairs([(0.0, 1.0), (f64::NAN, 9.0), (4.0, -1.0)]);
        let bounds = series.bounds().unwrap();
        assert_eq!(bounds.x.max, 4.0);
        assert_eq!(bounds.y.max, 1.0);
        assert!(Series::default().bounds().is_none());
    }
}
