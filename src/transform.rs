//! Coordinate transforms between data and screen space.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::{Range, Viewport};

const MIN_SPAN: f64 = 1e-12;

/// Linear transform from data coordinates into screen coordinates.
///
/// The Y axis is inverted because screen Y grows downward.
#[derive(Debug, Clone)]
pub struct Transform {
    viewport: Viewport,
    screen: ScreenRect,
    x_axis: Range,
    y_axis: Range,
}

impl Transform {
    /// Create a transform for the given viewport and screen rectangle.
    ///
    /// Returns `None` when the screen rectangle has no area or the viewport
    /// is not finite.
    pub fn new(viewport: Viewport, screen: ScreenRect) -> Option<Self> {
        if !screen.is_valid() || !viewport.x.is_finite() || !viewport.y.is_finite() {
            return None;
        }
        Some(Self {
            viewport,
            screen,
            x_axis: viewport.x.with_min_span(MIN_SPAN),
            y_axis: viewport.y.with_min_span(MIN_SPAN),
        })
    }

    /// Access the viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the screen rectangle.
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a data X value into a screen X coordinate.
    pub fn x_to_screen(&self, x: f64) -> Option<f32> {
        if !x.is_finite() {
            return None;
        }
        let norm = (x - self.x_axis.min) / self.x_axis.span();
        Some((self.screen.min.x as f64 + norm * self.screen.width() as f64) as f32)
    }

    /// Map a data Y value into a screen Y coordinate.
    pub fn y_to_screen(&self, y: f64) -> Option<f32> {
        if !y.is_finite() {
            return None;
        }
        let norm = (y - self.y_axis.min) / self.y_axis.span();
        Some((self.screen.max.y as f64 - norm * self.screen.height() as f64) as f32)
    }

    /// Map a data point into screen space.
    pub fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        Some(ScreenPoint::new(
            self.x_to_screen(point.x)?,
            self.y_to_screen(point.y)?,
        ))
    }

    /// Map a screen point into data space.
    pub fn screen_to_data(&self, point: ScreenPoint) -> Option<Point> {
        if !point.is_finite() {
            return None;
        }
        let x_norm = (point.x as f64 - self.screen.min.x as f64) / self.screen.width() as f64;
        let y_norm = (self.screen.max.y as f64 - point.y as f64) / self.screen.height() as f64;
        Some(Point::new(
            self.x_axis.min + x_norm * self.x_axis.span(),
            self.y_axis.min + y_norm * self.y_axis.span(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Transform {
        let viewport = Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0));
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0));
        Transform::new(viewport, screen).expect("valid transform")
    }

    #[test]
    fn linear_roundtrip() {
        let transform = square();
        let point = Point::new(5.0, 7.5);
        let screen_point = transform.data_to_screen(point).unwrap();
        let roundtrip = transform.screen_to_data(screen_point).unwrap();
        assert!((roundtrip.x - point.x).abs() < 1e-5);
        assert!((roundtrip.y - point.y).abs() < 1e-5);
    }

    #[test]
    fn y_axis_is_inverted() {
        let transform = square();
        let bottom_left = transform.data_to_screen(Point::new(0.0, 0.0)).unwrap();
        let top_right = transform.data_to_screen(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(bottom_left, ScreenPoint::new(0.0, 100.0));
        assert_eq!(top_right, ScreenPoint::new(100.0, 0.0));
    }

    #[test]
    fn zero_size_screen_has_no_transform() {
        let viewport = Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0));
        let screen = ScreenRect::new(ScreenPoint::new(10.0, 10.0), ScreenPoint::new(10.0, 50.0));
        assert!(Transform::new(viewport, screen).is_none());
    }

    #[test]
    fn non_finite_points_do_not_map() {
        let transform = square();
        assert!(transform.data_to_screen(Point::new(f64::NAN, 1.0)).is_none());
        assert!(transform.data_to_screen(Point::new(1.0, f64::INFINITY)).is_none());
    }
}
