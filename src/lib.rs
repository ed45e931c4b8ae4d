//! gpui_lineplot turns multi-dimensional samples into an interactive line chart.
//!
//! Two dimensions of a row-major buffer are sorted, normalized, smoothed and
//! joined with per-sample categories into a [`ChartPayload`]. A [`LineChart`]
//! maps that payload to screen space, hit-tests pointer input and emits a
//! backend-agnostic [`RenderList`]. The optional `gpui` feature paints it.

#![forbid(unsafe_code)]

pub mod axis;
pub mod chart;
pub mod colormap;
pub mod config;
pub mod controller;
pub mod datasource;
pub mod envelope;
pub mod error;
pub mod geom;
pub mod interaction;
pub mod payload;
pub mod pipeline;
pub mod render;
pub mod series;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{AxisConfig, AxisFormatter};
pub use chart::{ChartEvent, ChartState, LineChart, LineChartBuilder};
pub use colormap::{Palette, color_at};
pub use config::{ChartConfig, NormalizationKind, SmoothingKind, SortAxis};
pub use controller::ChartController;
pub use datasource::{Category, CategorySource, ClusterGroup, ContinuousSource, PointBuffer};
pub use error::PayloadError;
pub use geom::{Point, ScreenPoint, ScreenRect};
pub use interaction::HoverState;
pub use payload::ChartPayload;
pub use pipeline::{AssembleRequest, Smoothing, SummaryLine, assemble, prepare, try_assemble};
pub use render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand, RenderList,
    TextAnchor, TextStyle,
};
pub use series::Series;
pub use style::{Margins, Theme};
pub use transform::Transform;
pub use view::{Range, Viewport, ViewportState};

#[cfg(feature = "gpui")]
pub use gpui_backend::{ChartHandle, GpuiLineChartView};
