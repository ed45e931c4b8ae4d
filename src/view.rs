//! Data ranges and the per-chart viewport state.

use crate::geom::{Point, ScreenRect};

/// Padding fraction applied to the X axis when fitting data.
pub const X_PADDING_FRAC: f64 = 0.05;
/// Padding fraction applied to the Y axis when fitting data.
pub const Y_PADDING_FRAC: f64 = 0.10;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Build the tightest range over the finite values of an iterator.
    ///
    /// Returns `None` when no finite value is present.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut range: Option<Self> = None;
        for value in values {
            if !value.is_finite() {
                continue;
            }
            match range.as_mut() {
                None => range = Some(Self::new(value, value)),
                Some(existing) => existing.expand_to_include(value),
            }
        }
        range
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Check whether a value lies inside the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Union two ranges if both are finite.
    pub fn union(a: Self, b: Self) -> Option<Self> {
        if !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        })
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Widen a single-valued range to a unit range centered on that value.
    pub fn widen_degenerate(&self) -> Self {
        if self.min == self.max {
            Self {
                min: self.min - 0.5,
                max: self.max + 0.5,
            }
        } else {
            *self
        }
    }

    /// Add `frac` of the span on both sides.
    ///
    /// A padding that computes to exactly zero is replaced by 1.0.
    pub fn padded(&self, frac: f64) -> Self {
        let mut padding = self.span().abs() * frac;
        if padding == 0.0 {
            padding = 1.0;
        }
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }

    /// Ensure the range has at least the given span.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        let span = self.span();
        if span >= min_span {
            return *self;
        }
        let center = (self.min + self.max) * 0.5;
        let half = min_span * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Visible data ranges on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// X axis range.
    pub x: Range,
    /// Y axis range.
    pub y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Tight bounds over the finite points of a slice.
    ///
    /// Points with any non-finite coordinate are ignored entirely.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let finite = || points.iter().filter(|point| point.is_finite());
        let x = Range::from_values(finite().map(|point| point.x))?;
        let y = Range::from_values(finite().map(|point| point.y))?;
        Some(Self::new(x, y))
    }

    /// Union two viewports axis by axis.
    pub fn union(a: Self, b: Self) -> Option<Self> {
        Some(Self::new(Range::union(a.x, b.x)?, Range::union(a.y, b.y)?))
    }

    /// Check whether both axes are valid.
    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }

    /// Check whether a data point is inside the viewport.
    pub fn contains(&self, point: Point) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }

    /// Fit data bounds for display.
    ///
    /// Degenerate axes become unit ranges, then the X axis gets 5% padding
    /// and the Y axis 10%.
    pub fn fitted(&self) -> Self {
        Self {
            x: self.x.widen_degenerate().padded(X_PADDING_FRAC),
            y: self.y.widen_degenerate().padded(Y_PADDING_FRAC),
        }
    }
}

/// Data-to-screen mapping parameters for one chart instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Visible data ranges, padding included.
    pub viewport: Viewport,
    /// Plot area in screen pixels.
    pub screen: ScreenRect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_with_min_span_expands() {
        let range = Range::new(2.0, 2.0);
        let expanded = range.with_min_span(1.0);
        assert!(expanded.span() >= 1.0);
        assert!(((expanded.min + expanded.max) * 0.5 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn from_values_skips_non_finite() {
        let range = Range::from_values([f64::NAN, 3.0, f64::INFINITY, -1.0]).unwrap();
        assert_eq!(range, Range::new(-1.0, 3.0));
        assert!(Range::from_values([f64::NAN]).is_none());
    }

    #[test]
    fn fitted_pads_axes_asymmetrically() {
        let viewport = Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0)).fitted();
        assert!((viewport.x.min + 0.5).abs() < 1e-12);
        assert!((viewport.x.max - 10.5).abs() < 1e-12);
        assert!((viewport.y.min + 1.0).abs() < 1e-12);
        assert!((viewport.y.max - 11.0).abs() < 1e-12);
    }

    #[test]
    fn fitted_widens_single_value_axis() {
        let viewport = Viewport::new(Range::new(4.0, 4.0), Range::new(1.0, 3.0)).fitted();
        assert!((viewport.x.min - (3.5 - 0.05)).abs() < 1e-12);
        assert!((viewport.x.max - (4.5 + 0.05)).abs() < 1e-12);
    }

    #[test]
    fn zero_padding_is_replaced_by_one() {
        let range = Range::new(2.0, 2.0).padded(0.1);
        assert_eq!(range, Range::new(1.0, 3.0));
    }

    #[test]
    fn from_points_ignores_partially_non_finite_points() {
        let points = [
            Point::new(0.0, 1.0),
            Point::new(f64::NAN, 100.0),
            Point::new(2.0, 3.0),
        ];
        let viewport = Viewport::from_points(&points).unwrap();
        assert_eq!(viewport.y, Range::new(1.0, 3.0));
    }
}
