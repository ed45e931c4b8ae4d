//! GPUI integration for the line chart.
//!
//! This module provides a GPUI view that paints a [`LineChart`](crate::chart::LineChart)
//! render list and forwards pointer events for hover, tooltips and selection.

mod paint;
mod view;

pub use view::{ChartHandle, GpuiLineChartView};
