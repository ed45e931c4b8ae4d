//! Per-axis value normalization.
//!
//! Statistics are computed over finite values only. Non-finite inputs pass
//! through the arithmetic and stay non-finite in the output.

use crate::config::NormalizationKind;
use crate::geom::Point;
use crate::series::Series;

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
struct AxisStats {
    count: usize,
    mean: f64,
    std: f64,
    min: f64,
    max: f64,
    max_abs: f64,
}

impl AxisStats {
    fn from_points(points: &[Point], axis: fn(&Point) -> f64) -> Self {
        let finite = || points.iter().map(axis).filter(|value| value.is_finite());
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut max_abs: f64 = 0.0;
        for value in finite() {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
            max_abs = max_abs.max(value.abs());
        }
        let mean = if count > 0 { sum / count as f64 } else { 0.0 };
        let variance = if count > 0 {
            finite()
                .map(|value| (value - mean) * (value - mean))
                .sum::<f64>()
                / count as f64
        } else {
            0.0
        };
        Self {
            count,
            mean,
            std: variance.sqrt(),
            min,
            max,
            max_abs,
        }
    }

    fn normalize(&self, value: f64, kind: NormalizationKind) -> f64 {
        if self.count == 0 {
            return value;
        }
        match kind {
            NormalizationKind::None => value,
            NormalizationKind::ZScore => (value - self.mean) / self.std.max(EPSILON),
            NormalizationKind::MinMax => (value - self.min) / ((self.max - self.min) + EPSILON),
            NormalizationKind::DecimalScaling => {
                let exponent = (self.max_abs + EPSILON).log10().ceil();
                value / 10_f64.powf(exponent)
            }
        }
    }
}

/// Normalize each axis of `series` independently.
pub fn normalize(series: &Series, kind: NormalizationKind) -> Series {
    if kind == NormalizationKind::None || series.is_empty() {
        return series.clone();
    }
    let x_stats = AxisStats::from_points(series.points(), |point| point.x);
    let y_stats = AxisStats::from_points(series.points(), |point| point.y);
    series
        .points()
        .iter()
        .map(|point| {
            Point::new(
                x_stats.normalize(point.x, kind),
                y_stats.normalize(point.y, kind),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Series {
        Series::from_pairs([(1.0, 10.0), (2.0, 20.0), (3.0, 60.0), (4.0, -30.0), (5.0, 5.0)])
    }

    #[test]
    fn none_is_identity() {
        let series = sample();
        assert_eq!(normalize(&series, NormalizationKind::None), series);
    }

    #[test]
    fn min_max_stays_below_one() {
        let normalized = normalize(&sample(), NormalizationKind::MinMax);
        for point in normalized.points() {
            assert!(point.x >= 0.0 && point.x < 1.0);
            assert!(point.y >= 0.0 && point.y < 1.0);
        }
        assert_eq!(normalized.points()[0].x, 0.0);
    }

    #[test]
    fn z_score_has_zero_mean_unit_std() {
        let normalized = normalize(&sample(), NormalizationKind::ZScore);
        let n = normalized.len() as f64;
        for values in [normalized.xs().collect::<Vec<_>>(), normalized.ys().collect()] {
            let mean = values.iter().sum::<f64>() / n;
            let std = (values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n).sqrt();
            assert!(mean.abs() < 1e-9);
            assert!((std - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn z_score_of_constant_axis_is_zero() {
        let series = Series::from_pairs([(1.0, 7.0), (2.0, 7.0)]);
        let normalized = normalize(&series, NormalizationKind::ZScore);
        assert!(normalized.ys().all(|y| y == 0.0));
    }

    #[test]
    fn decimal_scaling_divides_by_power_of_ten() {
        let normalized = normalize(&sample(), NormalizationKind::DecimalScaling);
        // max |y| = 60 -> 10^2; max |x| = 5 -> 10^1
        assert!((normalized.points()[2].y - 0.6).abs() < 1e-12);
        assert!((normalized.points()[4].x - 0.5).abs() < 1e-12);
        assert!(normalized.ys().all(|y| y.abs() <= 1.0));
    }

    #[test]
    fn non_finite_values_do_not_poison_statistics() {
        let series = Series::from_pairs([(0.0, 0.0), (1.0, f64::NAN), (2.0, 10.0)]);
        let normalized = normalize(&series, NormalizationKind::MinMax);
        assert!(normalized.points()[1].y.is_nan());
        assert!((normalized.points()[2].y - 10.0 / (10.0 + EPSILON)).abs() < 1e-12);
    }
}
