//! Visual constants for chart rendering.

use crate::render::{Color, MarkerShape};

/// Space reserved around the plot area for titles, ticks and bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Left margin in pixels.
    pub left: f32,
    /// Right margin in pixels.
    pub right: f32,
    /// Top margin in pixels.
    pub top: f32,
    /// Bottom margin in pixels.
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 60.0,
            right: 30.0,
            top: 60.0,
            bottom: 40.0,
        }
    }
}

/// Visual theme for line charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Plot margins.
    pub margins: Margins,
    /// Widget background.
    pub background: Color,
    /// Axis lines and tick marks.
    pub axis: Color,
    /// Tick labels, title and axis names.
    pub text: Color,
    /// Hovered segment color.
    pub hover: Color,
    /// Fill between the smoothed and original series.
    pub envelope_fill: Color,
    /// Original (unsmoothed) series overlay.
    pub original_line: Color,
    /// Main line width.
    pub line_width: f32,
    /// Hovered segment width.
    pub hover_width: f32,
    /// Summary line width.
    pub summary_width: f32,
    /// Summary line dash and gap length.
    pub summary_dash: (f32, f32),
    /// Summary endpoint marker size.
    pub summary_marker_size: f32,
    /// Height of the category band strip.
    pub band_height: f32,
    /// Gap between the band strip and the top of the plot area.
    pub band_gap: f32,
    /// Maximum pixel distance for segment hovering.
    pub hover_tolerance: f32,
    /// Draw a marker on every sample.
    pub show_points: bool,
    /// Shape of the per-sample markers.
    pub point_shape: MarkerShape,
    /// Title font size.
    pub title_size: f32,
    /// Tick and label font size.
    pub label_size: f32,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle per-sample markers.
    pub fn with_points(mut self, show_points: bool) -> Self {
        self.show_points = show_points;
        self
    }

    /// Set the per-sample marker shape.
    pub fn with_point_shape(mut self, shape: MarkerShape) -> Self {
        self.point_shape = shape;
        self
    }

    /// Set the hover tolerance in pixels.
    pub fn with_hover_tolerance(mut self, tolerance: f32) -> Self {
        self.hover_tolerance = tolerance;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            background: Color::WHITE,
            axis: Color::BLACK,
            text: Color::BLACK,
            hover: Color::from_rgb_u32(0xd62728),
            envelope_fill: Color::from_rgb_u32(0x1f77b4).with_alpha(0.2),
            original_line: Color::from_rgb8(150, 150, 150),
            line_width: 2.0,
            hover_width: 4.0,
            summary_width: 3.0,
            summary_dash: (8.0, 4.0),
            summary_marker_size: 7.0,
            band_height: 12.0,
            band_gap: 8.0,
            hover_tolerance: 8.0,
            show_points: false,
            point_shape: MarkerShape::Circle,
            title_size: 14.0,
            label_size: 11.0,
        }
    }
}
