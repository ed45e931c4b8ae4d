//! Smoothing and resampling filters.
//!
//! Every filter takes a series and returns a new one. When a filter's
//! precondition does not hold (window too large, even window where an odd one
//! is needed) the input comes back unchanged.

use std::time::Instant;

use crate::config::{DEFAULT_EMA_ALPHA, SmoothingKind};
use crate::geom::Point;
use crate::series::Series;

/// A smoothing kind with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothing {
    /// Filter to apply.
    pub kind: SmoothingKind,
    /// Window size, or step for linear interpolation.
    pub window: usize,
    /// Weight for exponential smoothing.
    pub alpha: f64,
}

impl Smoothing {
    /// Create a smoothing setting with the default EMA weight.
    pub fn new(kind: SmoothingKind, window: usize) -> Self {
        Self {
            kind,
            window,
            alpha: DEFAULT_EMA_ALPHA,
        }
    }

    /// Set the exponential smoothing weight.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Run the filter.
    pub fn apply(&self, series: &Series) -> Series {
        if self.kind == SmoothingKind::None {
            return series.clone();
        }
        let started = Instant::now();
        let output = match self.kind {
            SmoothingKind::None => series.clone(),
            SmoothingKind::MovingAverage => moving_average(series, self.window),
            SmoothingKind::SavitzkyGolay => savitzky_golay(series, self.window),
            SmoothingKind::Gaussian => gaussian(series, self.window),
            SmoothingKind::ExponentialMovingAverage => exponential_moving_average(series, self.alpha),
            SmoothingKind::CubicSpline => cubic_spline(series),
            SmoothingKind::LinearInterpolation => linear_interpolation(series, self.window),
            SmoothingKind::MinMaxSampling => min_max_sampling(series, self.window),
            SmoothingKind::RunningMedian => running_median(series, self.window),
        };
        tracing::trace!(
            kind = ?self.kind,
            window = self.window,
            input = series.len(),
            output = output.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "smoothing applied"
        );
        output
    }

    /// Position in `series` of the input sample each output of
    /// [`apply`](Self::apply) stands for.
    ///
    /// Windowed filters map to the window center, min/max sampling to the
    /// chosen sample, and interpolated midpoints to the sample halfway through
    /// the step. When the filter leaves the series unchanged this is the
    /// identity.
    pub fn source_positions(&self, series: &Series) -> Vec<usize> {
        let points = series.points();
        let n = points.len();
        let window = self.window;
        let identity = || (0..n).collect::<Vec<_>>();
        if self.kind.preserves_sample_identity() {
            return identity();
        }
        match self.kind {
            SmoothingKind::MovingAverage if window >= 1 && n >= window => {
                centered_positions(n, window)
            }
            SmoothingKind::SavitzkyGolay | SmoothingKind::Gaussian | SmoothingKind::RunningMedian
                if odd_window_fits(window, n) =>
            {
                centered_positions(n, window)
            }
            SmoothingKind::LinearInterpolation if window >= 1 && n >= 2 && n > window => {
                let mut out = Vec::with_capacity(2 * (n / window) + 1);
                let mut i = 0;
                while i < n - window {
                    out.push(i);
                    out.push(i + window / 2);
                    i += window;
                }
                out.push(n - 1);
                out
            }
            SmoothingKind::MinMaxSampling if window >= 1 && n > 0 => {
                min_max_positions(points, window)
            }
            _ => identity(),
        }
    }
}

fn centered_positions(len: usize, window: usize) -> Vec<usize> {
    (0..=len - window).map(|start| start + window / 2).collect()
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::new(SmoothingKind::None, crate::config::DEFAULT_SMOOTHING_WINDOW)
    }
}

/// Apply `kind` with `window` and the default EMA weight.
pub fn apply_smoothing(series: &Series, kind: SmoothingKind, window: usize) -> Series {
    Smoothing::new(kind, window).apply(series)
}

/// Sliding mean of both coordinates; output has `n - window + 1` samples.
pub fn moving_average(series: &Series, window: usize) -> Series {
    let points = series.points();
    let n = points.len();
    if window < 1 || n < window {
        return series.clone();
    }
    let w = window as f64;
    let mut sum_x: f64 = points[..window].iter().map(|point| point.x).sum();
    let mut sum_y: f64 = points[..window].iter().map(|point| point.y).sum();
    let mut out = Vec::with_capacity(n - window + 1);
    out.push(Point::new(sum_x / w, sum_y / w));
    for i in window..n {
        sum_x += points[i].x - points[i - window].x;
        sum_y += points[i].y - points[i - window].y;
        out.push(Point::new(sum_x / w, sum_y / w));
    }
    Series::new(out)
}

/// Centered box average of Y; X is taken from the window center.
pub fn savitzky_golay(series: &Series, window: usize) -> Series {
    let points = series.points();
    if !odd_window_fits(window, points.len()) {
        return series.clone();
    }
    let w = window as f64;
    points
        .windows(window)
        .map(|slice| {
            let center = slice[window / 2];
            let sum: f64 = slice.iter().map(|point| point.y).sum();
            Point::new(center.x, sum / w)
        })
        .collect()
}

/// Gaussian-weighted average of Y with `sigma = window / 6`.
pub fn gaussian(series: &Series, window: usize) -> Series {
    let points = series.points();
    if !odd_window_fits(window, points.len()) {
        return series.clone();
    }
    let kernel = gaussian_kernel(window);
    points
        .windows(window)
        .map(|slice| {
            let y = slice
                .iter()
                .zip(&kernel)
                .map(|(point, weight)| point.y * weight)
                .sum::<f64>();
            Point::new(slice[window / 2].x, y)
        })
        .collect()
}

fn gaussian_kernel(window: usize) -> Vec<f64> {
    let half = (window / 2) as f64;
    let sigma = window as f64 / 6.0;
    let mut kernel: Vec<f64> = (0..window)
        .map(|i| {
            let offset = i as f64 - half;
            (-0.5 * offset * offset / (sigma * sigma)).exp()
        })
        .collect();
    let total: f64 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= total;
    }
    kernel
}

/// Exponential moving average of Y seeded with the first sample.
pub fn exponential_moving_average(series: &Series, alpha: f64) -> Series {
    let points = series.points();
    let Some(first) = points.first() else {
        return series.clone();
    };
    let mut ema = first.y;
    points
        .iter()
        .map(|point| {
            ema = alpha * point.y + (1.0 - alpha) * ema;
            Point::new(point.x, ema)
        })
        .collect()
}

/// Three-point mean of interior samples; endpoints pass through.
pub fn cubic_spline(series: &Series) -> Series {
    let points = series.points();
    let n = points.len();
    if n < 3 {
        return series.clone();
    }
    let mut out = Vec::with_capacity(n);
    out.push(points[0]);
    out.extend(points.windows(3).map(|triple| {
        Point::new(
            (triple[0].x + triple[1].x + triple[2].x) / 3.0,
            (triple[0].y + triple[1].y + triple[2].y) / 3.0,
        )
    }));
    out.push(points[n - 1]);
    Series::new(out)
}

/// Every `step`-th sample followed by the midpoint to the sample `step`
/// ahead, then the last sample.
pub fn linear_interpolation(series: &Series, step: usize) -> Series {
    let points = series.points();
    let n = points.len();
    if step < 1 || n < 2 || n <= step {
        return series.clone();
    }
    let mut out = Vec::with_capacity(2 * (n / step) + 1);
    let mut i = 0;
    while i < n - step {
        let current = points[i];
        let ahead = points[i + step];
        out.push(current);
        out.push(Point::new(
            (current.x + ahead.x) / 2.0,
            (current.y + ahead.y) / 2.0,
        ));
        i += step;
    }
    out.push(points[n - 1]);
    Series::new(out)
}

/// Minimum and maximum Y sample of each bucket.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    min: usize,
    max: usize,
}

impl Bucket {
    fn new(index: usize) -> Self {
        Self {
            min: index,
            max: index,
        }
    }

    fn push(&mut self, points: &[Point], index: usize) {
        let y = points[index].y;
        if y < points[self.min].y {
            self.min = index;
        }
        if y > points[self.max].y {
            self.max = index;
        }
    }

    fn emit(&self, out: &mut Vec<usize>) {
        out.push(self.min);
        if self.max != self.min {
            out.push(self.max);
        }
    }
}

/// Contiguous buckets of `window` samples, each reduced to its min-Y then
/// max-Y sample. Ties keep the earliest sample.
pub fn min_max_sampling(series: &Series, window: usize) -> Series {
    let points = series.points();
    if window < 1 || points.is_empty() {
        return series.clone();
    }
    min_max_positions(points, window)
        .into_iter()
        .map(|index| points[index])
        .collect()
}

fn min_max_positions(points: &[Point], window: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(2 * points.len().div_ceil(window));
    for start in (0..points.len()).step_by(window) {
        let end = (start + window).min(points.len());
        let mut bucket = Bucket::new(start);
        for index in start + 1..end {
            bucket.push(points, index);
        }
        bucket.emit(&mut out);
    }
    out
}

/// Median of Y over a sliding odd window; X is the window center.
pub fn running_median(series: &Series, window: usize) -> Series {
    let points = series.points();
    let n = points.len();
    if !odd_window_fits(window, n) {
        return series.clone();
    }
    let mut sorted: Vec<f64> = points[..window].iter().map(|point| point.y).collect();
    sorted.sort_by(f64::total_cmp);

    let mut out = Vec::with_capacity(n - window + 1);
    for i in window..=n {
        out.push(Point::new(points[i - window / 2 - 1].x, sorted[window / 2]));
        if i == n {
            break;
        }
        let leaving = points[i - window].y;
        if let Ok(position) = sorted.binary_search_by(|value| value.total_cmp(&leaving)) {
            sorted.remove(position);
        }
        let entering = points[i].y;
        let position = sorted.partition_point(|value| value.total_cmp(&entering).is_lt());
        sorted.insert(position, entering);
    }
    Series::new(out)
}

fn odd_window_fits(window: usize, len: usize) -> bool {
    window % 2 == 1 && len >= window
}
