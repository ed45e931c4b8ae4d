//! Pointer hit-testing against rendered geometry.
//!
//! Hit tests run in screen space so tolerances are expressed in pixels and
//! stay constant regardless of the data range.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::transform::Transform;

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverState {
    /// Index `i` of the segment joining samples `i` and `i + 1`.
    pub segment: Option<usize>,
    /// Index `i` of the category band spanning samples `i` and `i + 1`.
    pub band: Option<usize>,
}

impl HoverState {
    /// Check whether anything is hovered.
    pub fn is_active(&self) -> bool {
        self.segment.is_some() || self.band.is_some()
    }
}

pub(crate) fn distance_sq(a: ScreenPoint, b: ScreenPoint) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Distance from `point` to the segment `start..end`.
///
/// The projection parameter is clamped to `[0, 1]`; a zero-length segment
/// degrades to the distance to `start`.
pub fn point_segment_distance(point: ScreenPoint, start: ScreenPoint, end: ScreenPoint) -> f32 {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= 0.0 {
        return distance_sq(point, start).sqrt();
    }
    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / len_sq).clamp(0.0, 1.0);
    let projection = ScreenPoint::new(start.x + t * dx, start.y + t * dy);
    distance_sq(point, projection).sqrt()
}

/// Closest segment strictly within `tolerance` pixels of `cursor`.
///
/// Segments with a non-finite endpoint are skipped. Ties keep the earlier
/// segment.
pub fn find_nearest_segment(
    points: &[Point],
    transform: &Transform,
    cursor: ScreenPoint,
    tolerance: f32,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, pair) in points.windows(2).enumerate() {
        let (Some(start), Some(end)) = (
            transform.data_to_screen(pair[0]),
            transform.data_to_screen(pair[1]),
        ) else {
            continue;
        };
        let distance = point_segment_distance(cursor, start, end);
        if distance >= tolerance {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

/// Category band under `cursor`.
///
/// The cursor must lie inside the vertical extent of `band_rect`. Band `i`
/// covers the horizontal screen span between samples `i` and `i + 1`;
/// the first band containing the cursor wins.
pub fn find_category_band(
    points: &[Point],
    transform: &Transform,
    band_rect: ScreenRect,
    cursor: ScreenPoint,
) -> Option<usize> {
    if !cursor.is_finite() || cursor.y < band_rect.min.y || cursor.y > band_rect.max.y {
        return None;
    }
    points.windows(2).position(|pair| {
        let (Some(left), Some(right)) = (
            transform.x_to_screen(pair[0].x),
            transform.x_to_screen(pair[1].x),
        ) else {
            return false;
        };
        cursor.x >= left.min(right) && cursor.x <= left.max(right)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Range, Viewport};

    fn transform() -> Transform {
        let viewport = Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0));
        let screen = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0));
        Transform::new(viewport, screen).unwrap()
    }

    #[test]
    fn distance_clamps_to_endpoints() {
        let start = ScreenPoint::new(0.0, 0.0);
        let end = ScreenPoint::new(10.0, 0.0);
        assert_eq!(point_segment_distance(ScreenPoint::new(5.0, 3.0), start, end), 3.0);
        assert_eq!(point_segment_distance(ScreenPoint::new(13.0, 4.0), start, end), 5.0);
        assert_eq!(point_segment_distance(ScreenPoint::new(3.0, 4.0), start, start), 5.0);
    }

    #[test]
    fn midpoint_resolves_to_its_segment() {
        let points = [Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 0.0)];
        let transform = transform();
        let a = transform.data_to_screen(points[1]).unwrap();
        let b = transform.data_to_screen(points[2]).unwrap();
        let midpoint = ScreenPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        assert_eq!(find_nearest_segment(&points, &transform, midpoint, 8.0), Some(1));
    }

    #[test]
    fn far_cursor_resolves_to_none() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let far = ScreenPoint::new(50.0, 10.0);
        assert_eq!(find_nearest_segment(&points, &transform(), far, 8.0), None);
    }

    #[test]
    fn tolerance_is_strict() {
        // Segment along screen y = 100; cursor exactly 8 px above.
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let cursor = ScreenPoint::new(50.0, 92.0);
        assert_eq!(find_nearest_segment(&points, &transform(), cursor, 8.0), None);
        assert_eq!(find_nearest_segment(&points, &transform(), cursor, 8.5), Some(0));
    }

    #[test]
    fn non_finite_segments_are_skipped() {
        let points = [Point::new(0.0, 0.0), Point::new(f64::NAN, 0.0), Point::new(10.0, 0.0)];
        let cursor = ScreenPoint::new(50.0, 100.0);
        assert_eq!(find_nearest_segment(&points, &transform(), cursor, 8.0), None);
    }

    #[test]
    fn band_requires_vertical_overlap() {
        let points = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(10.0, 0.0)];
        let band = ScreenRect::from_origin_size(0.0, -20.0, 100.0, 12.0);
        let transform = transform();
        assert_eq!(
            find_category_band(&points, &transform, band, ScreenPoint::new(60.0, -14.0)),
            Some(1)
        );
        assert_eq!(
            find_category_band(&points, &transform, band, ScreenPoint::new(60.0, 5.0)),
            None
        );
        assert_eq!(
            find_category_band(&points, &transform, band, ScreenPoint::new(20.0, -10.0)),
            Some(0)
        );
    }
}
