//! User-facing chart settings.
//!
//! [`ChartConfig`] is a plain value object. Hosts persist it with serde and
//! hand it to the controller explicitly; nothing here reads global state.

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Axis used to order samples before any other transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAxis {
    /// Order by X value.
    #[default]
    X,
    /// Order by Y value.
    Y,
}

impl SortAxis {
    /// Sort key of a point on this axis.
    pub fn key(self, point: &Point) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }
}

/// Per-axis value normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationKind {
    /// Leave values untouched.
    #[default]
    None,
    /// Subtract the mean and divide by the population standard deviation.
    ZScore,
    /// Rescale into `[0, 1)`.
    MinMax,
    /// Divide by the power of ten covering the largest magnitude.
    DecimalScaling,
}

/// Smoothing or resampling applied after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingKind {
    /// Leave the series untouched.
    #[default]
    None,
    MovingAverage,
    SavitzkyGolay,
    Gaussian,
    ExponentialMovingAverage,
    CubicSpline,
    LinearInterpolation,
    MinMaxSampling,
    RunningMedian,
}

impl SmoothingKind {
    /// Whether output sample `i` always corresponds to input sample `i`.
    pub fn preserves_sample_identity(self) -> bool {
        matches!(
            self,
            Self::None | Self::ExponentialMovingAverage | Self::CubicSpline
        )
    }
}

/// Default smoothing window.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;
/// Default exponential moving average weight.
pub const DEFAULT_EMA_ALPHA: f64 = 0.2;
/// Default palette name.
pub const DEFAULT_PALETTE: &str = "Viridis";

/// Chart settings owned by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Dimension plotted on the X axis.
    pub x_dimension: usize,
    /// Dimension plotted on the Y axis.
    pub y_dimension: usize,
    /// Smoothing kind.
    pub smoothing: SmoothingKind,
    /// Window or step parameter of the smoothing kind.
    pub smoothing_window: usize,
    /// Weight of the newest sample for exponential smoothing.
    pub ema_alpha: f64,
    /// Normalization kind.
    pub normalization: NormalizationKind,
    /// Axis used for ordering.
    pub sort_axis: SortAxis,
    /// Palette name for continuous color sources.
    pub palette: String,
    /// Fill the area between the smoothed and original series.
    pub show_envelope: bool,
    /// Chart title. Empty means `"{x} vs {y}"`.
    pub title: String,
    /// X axis label override. Empty means the dimension name.
    pub x_label: String,
    /// Y axis label override. Empty means the dimension name.
    pub y_label: String,
    /// Explicit color scale `(lower, upper)`; `None` uses the data range.
    pub color_scale: Option<(f64, f64)>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_dimension: 0,
            y_dimension: 1,
            smoothing: SmoothingKind::None,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            ema_alpha: DEFAULT_EMA_ALPHA,
            normalization: NormalizationKind::None,
            sort_axis: SortAxis::X,
            palette: DEFAULT_PALETTE.to_string(),
            show_envelope: false,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            color_scale: None,
        }
    }
}

impl ChartConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the plotted dimensions.
    pub fn with_dimensions(mut self, x: usize, y: usize) -> Self {
        self.x_dimension = x;
        self.y_dimension = y;
        self
    }

    /// Set the smoothing kind and its window.
    pub fn with_smoothing(mut self, kind: SmoothingKind, window: usize) -> Self {
        self.smoothing = kind;
        self.smoothing_window = window;
        self
    }

    /// Set the exponential smoothing weight.
    pub fn with_ema_alpha(mut self, alpha: f64) -> Self {
        self.ema_alpha = alpha;
        self
    }

    /// Set the normalization kind.
    pub fn with_normalization(mut self, kind: NormalizationKind) -> Self {
        self.normalization = kind;
        self
    }

    /// Set the sort axis.
    pub fn with_sort_axis(mut self, axis: SortAxis) -> Self {
        self.sort_axis = axis;
        self
    }

    /// Set the palette name.
    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = palette.into();
        self
    }

    /// Toggle the envelope fill.
    pub fn with_envelope(mut self, show: bool) -> Self {
        self.show_envelope = show;
        self
    }

    /// Set the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set both axis labels.
    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    /// Set an explicit color scale.
    pub fn with_color_scale(mut self, lower: f64, upper: f64) -> Self {
        self.color_scale = Some((lower, upper));
        self
    }

    /// Copy with out-of-range settings repaired.
    ///
    /// The color scale is reordered so that lower ≤ upper, the window is at
    /// least 1, and a non-finite or out-of-range EMA weight falls back to the
    /// default.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        config.smoothing_window = config.smoothing_window.max(1);
        if !(config.ema_alpha > 0.0 && config.ema_alpha <= 1.0) {
            config.ema_alpha = DEFAULT_EMA_ALPHA;
        }
        if let Some((lower, upper)) = config.color_scale {
            config.color_scale = if lower.is_finite() && upper.is_finite() {
                Some((lower.min(upper), lower.max(upper)))
            } else {
                None
            };
        }
        config
    }
}
