//! Filled region between two series.
//!
//! Both series are resampled onto the union of their X values, so the
//! polygon stays well formed even when smoothing moved or dropped samples.

use crate::geom::Point;

/// Sorted, deduplicated finite X values of both inputs.
pub fn merged_xs(a: &[Point], b: &[Point]) -> Vec<f64> {
    let mut xs: Vec<f64> = a
        .iter()
        .chain(b)
        .map(|point| point.x)
        .filter(|x| x.is_finite())
        .collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    xs
}

/// Linear interpolation of `points` (sorted by X) at `x`.
///
/// Outside the covered X range the nearest endpoint's Y is returned.
/// Non-finite samples are ignored.
pub fn interpolate_at(points: &[Point], x: f64) -> Option<f64> {
    let finite: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();
    interpolate_sorted(&finite, x)
}

fn interpolate_sorted(points: &[Point], x: f64) -> Option<f64> {
    let first = points.first()?;
    let last = points.last()?;
    if x <= first.x {
        return Some(first.y);
    }
    if x >= last.x {
        return Some(last.y);
    }
    let upper = points.partition_point(|point| point.x < x);
    let right = points[upper];
    if right.x == x {
        return Some(right.y);
    }
    let left = points[upper - 1];
    let span = right.x - left.x;
    if span <= 0.0 {
        return Some(right.y);
    }
    let t = (x - left.x) / span;
    Some(left.y + (right.y - left.y) * t)
}

/// Closed polygon between two series: the upper boundary left to right,
/// then the lower boundary right to left.
///
/// Returns an empty polygon when either side has no finite samples or the
/// merged X set has fewer than two values.
pub fn envelope_polygon(a: &[Point], b: &[Point]) -> Vec<Point> {
    let xs = merged_xs(a, b);
    if xs.len() < 2 {
        return Vec::new();
    }
    let a: Vec<Point> = a.iter().copied().filter(Point::is_finite).collect();
    let b: Vec<Point> = b.iter().copied().filter(Point::is_finite).collect();
    let mut upper = Vec::with_capacity(xs.len());
    let mut lower = Vec::with_capacity(xs.len());
    for &x in &xs {
        let (Some(ya), Some(yb)) = (interpolate_sorted(&a, x), interpolate_sorted(&b, x)) else {
            return Vec::new();
        };
        upper.push(Point::new(x, ya.max(yb)));
        lower.push(Point::new(x, ya.min(yb)));
    }
    upper.extend(lower.into_iter().rev());
    upper
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(f64, f64)]) -> Vec<Point> {
        pairs.iter().map(|&pair| Point::from(pair)).collect()
    }

    #[test]
    fn merged_xs_dedups_and_drops_non_finite() {
        let a = series(&[(0.0, 0.0), (2.0, 0.0), (f64::NAN, 1.0)]);
        let b = series(&[(1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(merged_xs(&a, &b), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn interpolation_clamps_outside_domain() {
        let points = series(&[(1.0, 10.0), (3.0, 30.0)]);
        assert_eq!(interpolate_at(&points, 0.0), Some(10.0));
        assert_eq!(interpolate_at(&points, 2.0), Some(20.0));
        assert_eq!(interpolate_at(&points, 5.0), Some(30.0));
        assert_eq!(interpolate_at(&[], 1.0), None);
    }

    #[test]
    fn polygon_traces_upper_then_lower() {
        let smoothed = series(&[(0.0, 1.0), (2.0, 1.0)]);
        let original = series(&[(0.0, 0.0), (1.0, 4.0), (2.0, 0.0)]);
        let polygon = envelope_polygon(&smoothed, &original);
        assert_eq!(
            polygon,
            series(&[(0.0, 1.0), (1.0, 4.0), (2.0, 1.0), (2.0, 0.0), (1.0, 1.0), (0.0, 0.0)])
        );
    }

    #[test]
    fn degenerate_inputs_give_empty_polygon() {
        let single = series(&[(1.0, 1.0)]);
        assert!(envelope_polygon(&single, &single).is_empty());
        assert!(envelope_polygon(&series(&[(0.0, 0.0), (1.0, 1.0)]), &[]).is_empty());
    }
}
