//! Data-preparation pipeline.
//!
//! Raw coordinates flow through sort, normalization, summary line,
//! smoothing and category join, in that order. Each stage is a pure function
//! of its inputs; [`try_assemble`] wires them together and [`prepare`] adds
//! dimension extraction and category assignment in front.

mod normalize;
mod smooth;
mod sort;
mod summary;

pub use normalize::normalize;
pub use smooth::{
    Smoothing, apply_smoothing, cubic_spline, exponential_moving_average, gaussian,
    linear_interpolation, min_max_sampling, moving_average, running_median, savitzky_golay,
};
pub use sort::{Sorted, sort_series};
pub use summary::{SummaryLine, build_summary_line};

use crate::colormap::Palette;
use crate::config::{ChartConfig, NormalizationKind, SmoothingKind, SortAxis};
use crate::datasource::{
    Category, CategorySource, PointBuffer, assign_categories, extract_coordinates,
    pair_coordinates,
};
use crate::error::PayloadError;
use crate::payload::ChartPayload;
use crate::render::Color;
use crate::series::Series;

/// Default main line color.
pub const DEFAULT_LINE_COLOR: Color = Color::from_rgb_u32(0x1f77b4);

/// Inputs of one assembly run.
#[derive(Debug, Clone)]
pub struct AssembleRequest<'a> {
    /// Interleaved `x0, y0, x1, y1, ...` values.
    pub coordinates: &'a [f64],
    /// Per-sample categories in input order; may be empty.
    pub categories: &'a [Category],
    /// Smoothing setting.
    pub smoothing: Smoothing,
    /// Normalization kind.
    pub normalization: NormalizationKind,
    /// X axis label.
    pub x_label: &'a str,
    /// Y axis label.
    pub y_label: &'a str,
    /// Title; empty means `"{x_label} vs {y_label}"`.
    pub title: &'a str,
    /// Axis used for ordering.
    pub sort_axis: SortAxis,
}

impl<'a> AssembleRequest<'a> {
    /// Request with default settings for `coordinates`.
    pub fn new(coordinates: &'a [f64]) -> Self {
        Self {
            coordinates,
            categories: &[],
            smoothing: Smoothing::default(),
            normalization: NormalizationKind::None,
            x_label: "",
            y_label: "",
            title: "",
            sort_axis: SortAxis::X,
        }
    }

    /// Attach categories.
    pub fn with_categories(mut self, categories: &'a [Category]) -> Self {
        self.categories = categories;
        self
    }

    /// Set smoothing.
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set normalization.
    pub fn with_normalization(mut self, normalization: NormalizationKind) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set axis labels.
    pub fn with_labels(mut self, x_label: &'a str, y_label: &'a str) -> Self {
        self.x_label = x_label;
        self.y_label = y_label;
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set the sort axis.
    pub fn with_sort_axis(mut self, sort_axis: SortAxis) -> Self {
        self.sort_axis = sort_axis;
        self
    }
}

/// Run the pipeline, reporting why the input was rejected.
///
/// Samples with a non-finite coordinate are dropped before sorting; input
/// made only of such samples is rejected as empty.
pub fn try_assemble(request: &AssembleRequest<'_>) -> Result<ChartPayload, PayloadError> {
    let raw = pair_coordinates(request.coordinates)?;
    let (finite, rows, categories) = retain_finite(&raw, request.categories);
    if finite.is_empty() {
        return Err(PayloadError::EmptyInput);
    }
    tracing::debug!(
        samples = raw.len(),
        dropped = raw.len() - finite.len(),
        categories = request.categories.len(),
        "assembling payload"
    );

    let sorted = sort_series(&finite, &categories, request.sort_axis);
    let normalized = normalize(&sorted.series, request.normalization);
    let summary_line = build_summary_line(&normalized);
    let smoothed = request.smoothing.apply(&normalized);
    tracing::debug!(
        normalized = normalized.len(),
        smoothed = smoothed.len(),
        summary = summary_line.is_some(),
        "pipeline stages complete"
    );

    let categories = join_categories(&sorted.categories, smoothed.len());
    let source_indices = request
        .smoothing
        .source_positions(&normalized)
        .into_iter()
        .map(|position| rows[sorted.permutation[position]])
        .collect();
    let changed = request.smoothing.kind != SmoothingKind::None && smoothed != normalized;
    let original = changed.then_some(normalized);

    let title = if request.title.is_empty() {
        format!("{} vs {}", request.x_label, request.y_label)
    } else {
        request.title.to_string()
    };

    Ok(ChartPayload {
        series: smoothed,
        categories,
        summary_line,
        title,
        x_axis_label: request.x_label.to_string(),
        y_axis_label: request.y_label.to_string(),
        line_color: DEFAULT_LINE_COLOR,
        original,
        source_indices,
    })
}

/// Run the pipeline; invalid input yields `None`.
pub fn assemble(request: &AssembleRequest<'_>) -> Option<ChartPayload> {
    match try_assemble(request) {
        Ok(payload) => Some(payload),
        Err(error) => {
            tracing::debug!(%error, "payload rejected");
            None
        }
    }
}

/// Extract, categorize and assemble in one step.
///
/// Axis labels default to the dimension names unless `config` overrides them.
pub fn prepare(
    buffer: &PointBuffer,
    source: Option<&CategorySource>,
    config: &ChartConfig,
) -> Result<ChartPayload, PayloadError> {
    let config = config.sanitized();
    let coordinates = extract_coordinates(buffer, config.x_dimension, config.y_dimension)?;
    let categories = assign_categories(
        buffer.num_points(),
        source,
        Palette::from_name(&config.palette),
        config.color_scale,
    );
    let x_label = label_or(&config.x_label, buffer.dimension_name(config.x_dimension));
    let y_label = label_or(&config.y_label, buffer.dimension_name(config.y_dimension));
    let request = AssembleRequest::new(&coordinates)
        .with_categories(&categories)
        .with_smoothing(
            Smoothing::new(config.smoothing, config.smoothing_window).with_alpha(config.ema_alpha),
        )
        .with_normalization(config.normalization)
        .with_labels(x_label, y_label)
        .with_title(&config.title)
        .with_sort_axis(config.sort_axis);
    try_assemble(&request)
}

fn label_or<'a>(configured: &'a str, fallback: Option<&'a str>) -> &'a str {
    if configured.is_empty() {
        fallback.unwrap_or_default()
    } else {
        configured
    }
}

/// Finite samples with their input rows and categories.
fn retain_finite(raw: &Series, categories: &[Category]) -> (Series, Vec<usize>, Vec<Category>) {
    let mut points = Vec::with_capacity(raw.len());
    let mut rows = Vec::with_capacity(raw.len());
    let mut kept = Vec::with_capacity(categories.len().min(raw.len()));
    for (row, point) in raw.points().iter().enumerate() {
        if !point.is_finite() {
            continue;
        }
        points.push(*point);
        rows.push(row);
        if let Some(category) = categories.get(row) {
            kept.push(category.clone());
        }
    }
    (Series::new(points), rows, kept)
}

/// Index-join categories onto the smoothed samples.
fn join_categories(sorted: &[Category], len: usize) -> Option<Vec<Category>> {
    if sorted.iter().all(Category::is_empty) {
        return None;
    }
    Some(
        (0..len)
            .map(|index| sorted.get(index).cloned().unwrap_or_default())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    #[test]
    fn invalid_input_yields_none() {
        assert!(assemble(&AssembleRequest::new(&[])).is_none());
        assert!(assemble(&AssembleRequest::new(&[1.0, 2.0, 3.0])).is_none());
        assert_eq!(
            try_assemble(&AssembleRequest::new(&[1.0])),
            Err(PayloadError::OddCoordinateBuffer(1))
        );
    }

    #[test]
    fn default_title_joins_labels() {
        let request = AssembleRequest::new(&[0.0, 1.0, 1.0, 2.0]).with_labels("time", "value");
        let payload = assemble(&request).unwrap();
        assert_eq!(payload.title, "time vs value");
        assert_eq!(payload.line_color.to_hex_string(), "#1f77b4");
        let titled = assemble(&request.clone().with_title("Custom")).unwrap();
        assert_eq!(titled.title, "Custom");
    }

    #[test]
    fn summary_line_ignores_smoothing() {
        let coordinates = [0.0, 0.0, 1.0, 10.0, 2.0, 0.0, 3.0, 10.0];
        let plain = assemble(&AssembleRequest::new(&coordinates)).unwrap();
        let smoothed = assemble(
            &AssembleRequest::new(&coordinates)
                .with_smoothing(Smoothing::new(SmoothingKind::MovingAverage, 2)),
        )
        .unwrap();
        assert_eq!(plain.summary_line, smoothed.summary_line);
        assert_eq!(smoothed.series.len(), 3);
        assert!(smoothed.original.is_some());
        assert!(plain.original.is_none());
        assert_eq!(smoothed.source_indices, vec![1, 2, 3]);
    }

    #[test]
    fn categories_follow_sort_and_source_indices_track_rows() {
        let coordinates = [2.0, 20.0, 0.0, 0.0, 1.0, 10.0];
        let categories = vec![
            Category::new("late", Color::from_hex("#ff0000")),
            Category::new("early", Color::from_hex("#00ff00")),
            Category::default(),
        ];
        let payload =
            assemble(&AssembleRequest::new(&coordinates).with_categories(&categories)).unwrap();
        assert_eq!(payload.series.points()[0], Point::new(0.0, 0.0));
        let joined = payload.categories.as_ref().unwrap();
        assert_eq!(joined[0].label, "early");
        assert!(joined[1].is_empty());
        assert_eq!(joined[2].label, "late");
        assert_eq!(payload.source_indices, vec![1, 2, 0]);
    }

    #[test]
    fn window_kinds_map_samples_to_input_rows() {
        let coordinates = [3.0, 3.0, 2.0, 0.0, 1.0, 5.0, 0.0, 1.0];
        let unchanged = assemble(
            &AssembleRequest::new(&coordinates)
                .with_smoothing(Smoothing::new(SmoothingKind::MovingAverage, 9)),
        )
        .unwrap();
        assert!(unchanged.original.is_none());
        assert_eq!(unchanged.source_indices, vec![3, 2, 1, 0]);

        let median = assemble(
            &AssembleRequest::new(&coordinates)
                .with_smoothing(Smoothing::new(SmoothingKind::RunningMedian, 3)),
        )
        .unwrap();
        assert_eq!(median.series.xs().collect::<Vec<_>>(), vec![1.0, 2.0]);
        assert_eq!(median.source_indices, vec![2, 1]);
    }

    #[test]
    fn non_finite_samples_are_dropped_before_smoothing() {
        let mut coordinates: Vec<f64> = (0..10).flat_map(|i| [i as f64, i as f64]).collect();
        coordinates[5] = f64::NAN;
        let categories: Vec<Category> = (0..10)
            .map(|i| Category::new(format!("c{i}"), Color::from_hex("#ff0000")))
            .collect();
        let payload = assemble(
            &AssembleRequest::new(&coordinates)
                .with_categories(&categories)
                .with_smoothing(Smoothing::new(SmoothingKind::MovingAverage, 2)),
        )
        .unwrap();
        assert_eq!(payload.series.len(), 8);
        assert!(payload.series.points().iter().all(Point::is_finite));
        assert!(payload.summary_line.is_some());
        assert!(!payload.source_indices.contains(&2));
        assert_eq!(payload.source_indices.len(), 8);
        let joined = payload.categories.unwrap();
        assert_eq!(joined[2].label, "c3");

        let emptied = try_assemble(&AssembleRequest::new(&[f64::NAN, 1.0, 2.0, f64::INFINITY]));
        assert_eq!(emptied, Err(PayloadError::EmptyInput));
    }

    #[test]
    fn all_empty_categories_collapse_to_none() {
        let categories = vec![Category::default(); 2];
        let payload = assemble(
            &AssembleRequest::new(&[0.0, 1.0, 1.0, 2.0]).with_categories(&categories),
        )
        .unwrap();
        assert!(payload.categories.is_none());
    }

    #[test]
    fn prepare_uses_dimension_names() {
        let buffer = PointBuffer::new(
            vec![1.0, 5.0, 0.0, 2.0, 6.0, 0.0],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap();
        let config = ChartConfig::new().with_dimensions(1, 0);
        let payload = prepare(&buffer, None, &config).unwrap();
        assert_eq!(payload.x_axis_label, "b");
        assert_eq!(payload.y_axis_label, "a");
        assert_eq!(payload.title, "b vs a");
        assert_eq!(payload.series.points()[1], Point::new(6.0, 2.0));

        let narrow = PointBuffer::new(vec![1.0, 2.0], vec!["only".into()]).unwrap();
        assert_eq!(
            prepare(&narrow, None, &config),
            Err(PayloadError::TooFewDimensions(1))
        );
    }
}
