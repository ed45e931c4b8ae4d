//! Two-point trend line between the means of the first and last halves.

use serde::Serialize;

use crate::geom::Point;
use crate::render::Color;
use crate::series::Series;

/// Line joining the mean of the leading samples to the mean of the trailing
/// samples.
///
/// For odd lengths the two groups share the middle sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    /// Mean of the first group.
    pub start: Point,
    /// Mean of the last group.
    pub end: Point,
    /// `"Mean first N"`.
    pub start_label: String,
    /// `"Mean last N"`.
    pub end_label: String,
    /// Stroke color.
    pub color: Color,
    /// Samples in the first group.
    pub n_start: usize,
    /// Samples in the last group.
    pub n_end: usize,
}

/// Host-facing field layout of a [`SummaryLine`].
#[derive(Debug, Serialize)]
pub(crate) struct SummaryLineRecord<'a> {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub start_label: &'a str,
    pub end_label: &'a str,
    pub color: String,
    pub n_start: usize,
    pub n_end: usize,
}

impl SummaryLine {
    pub(crate) fn record(&self) -> SummaryLineRecord<'_> {
        SummaryLineRecord {
            start_x: self.start.x,
            start_y: self.start.y,
            end_x: self.end.x,
            end_y: self.end.y,
            start_label: &self.start_label,
            end_label: &self.end_label,
            color: self.color.to_hex_string(),
            n_start: self.n_start,
            n_end: self.n_end,
        }
    }
}

/// Build the summary line of a normalized, unsmoothed series.
///
/// Returns `None` for fewer than two samples or when a mean is not finite.
pub fn build_summary_line(series: &Series) -> Option<SummaryLine> {
    let points = series.points();
    let len = points.len();
    if len < 2 {
        return None;
    }
    let half = len.div_ceil(2);
    let start = mean(&points[..half]);
    let end = mean(&points[len - half..]);
    if !start.is_finite() || !end.is_finite() {
        tracing::debug!(len, "summary line skipped: non-finite mean");
        return None;
    }
    Some(SummaryLine {
        start,
        end,
        start_label: format!("Mean first {half}"),
        end_label: format!("Mean last {half}"),
        color: Color::BLACK,
        n_start: half,
        n_end: half,
    })
}

fn mean(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(x, y), point| (x + point.x, y + point.y));
    Point::new(sum_x / n, sum_y / n)
}
