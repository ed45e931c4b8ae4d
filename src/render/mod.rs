//! Rendering primitives and clipping helpers.
//!
//! These types are backend-agnostic and are used by render backends (such as the
//! GPUI backend) to describe how charts should be drawn.

mod frame;

pub(crate) use frame::build_frame;

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::transform::Transform;
use crate::view::Viewport;

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`. The leading `#` is optional.
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.trim().strip_prefix('#').unwrap_or(text.trim());
        if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::from_rgb_u32(value)),
            8 => {
                let alpha = (value >> 24) as u8;
                Some(Self::from_rgb_u32(value & 0x00ff_ffff).with_alpha(alpha as f32 / 255.0))
            }
            _ => None,
        }
    }

    /// Opaque color from hue, saturation and value, each in 0.0..=1.0.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let hue = hue.clamp(0.0, 1.0) * 6.0;
        let saturation = saturation.clamp(0.0, 1.0);
        let value = value.clamp(0.0, 1.0);
        let sector = (hue.floor() as i32).rem_euclid(6);
        let fraction = hue - hue.floor();
        let p = value * (1.0 - saturation);
        let q = value * (1.0 - saturation * fraction);
        let t = value * (1.0 - saturation * (1.0 - fraction));
        let (r, g, b) = match sector {
            0 => (value, t, p),
            1 => (q, value, p),
            2 => (p, value, t),
            3 => (p, q, value),
            4 => (t, p, value),
            _ => (value, p, q),
        };
        Self::new(r, g, b, 1.0)
    }

    /// Opaque color from hue in degrees and 8-bit saturation and lightness.
    pub fn from_hsl8(hue_degrees: f32, saturation: u8, lightness: u8) -> Self {
        let h = hue_degrees.rem_euclid(360.0) / 60.0;
        let s = saturation as f32 / 255.0;
        let l = lightness as f32 / 255.0;
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as i32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        Self::new(r + m, g + m, b + m, 1.0)
    }

    /// Replace the alpha channel.
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Format as lowercase `#rrggbb`, dropping alpha.
    pub fn to_hex_string(&self) -> String {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Marker shape for sample and endpoint markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Circle marker.
    Circle,
    /// Square marker.
    Square,
}

/// Marker styling.
///
/// Marker sizes are expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Marker size in pixels.
    pub size: f32,
    /// Marker shape.
    pub shape: MarkerShape,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 4.0,
            shape: MarkerShape::Circle,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width. Zero disables the outline.
    pub stroke_width: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Horizontal text alignment relative to the anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// The position is the left edge of the text.
    #[default]
    Start,
    /// The position is the horizontal center of the text.
    Middle,
    /// The position is the right edge of the text.
    End,
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            anchor: TextAnchor::Start,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// A single drawing instruction in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw markers.
    Points {
        /// Marker centers.
        points: Vec<ScreenPoint>,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Fill a closed polygon.
    Polygon {
        /// Polygon vertices in order; the last vertex connects to the first.
        points: Vec<ScreenPoint>,
        /// Fill color.
        fill: Color,
    },
    /// Draw text.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Ordered list of render commands for one frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Build clipped screen-space segments from consecutive data points.
///
/// Each pair is clipped against the transform's viewport in data space before
/// mapping. Pairs with a non-finite endpoint are skipped.
pub(crate) fn build_line_segments(points: &[Point], transform: &Transform, out: &mut Vec<LineSegment>) {
    out.clear();
    if points.len() < 2 {
        return;
    }
    let viewport = transform.viewport();
    for window in points.windows(2) {
        if let Some(segment) = clip_and_map(window[0], window[1], viewport, transform) {
            out.push(segment);
        }
    }
}

/// Clip one data-space segment and map it to the screen.
pub(crate) fn clip_and_map(
    start: Point,
    end: Point,
    viewport: Viewport,
    transform: &Transform,
) -> Option<LineSegment> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let (start, end) = clip_segment(start, end, viewport)?;
    Some(LineSegment::new(
        transform.data_to_screen(start)?,
        transform.data_to_screen(end)?,
    ))
}

/// Map data points inside the viewport to screen-space marker centers.
pub(crate) fn build_scatter_points(points: &[Point], transform: &Transform, out: &mut Vec<ScreenPoint>) {
    out.clear();
    let viewport = transform.viewport();
    for point in points {
        if !viewport.contains(*point) {
            continue;
        }
        if let Some(screen) = transform.data_to_screen(*point) {
            out.push(screen);
        }
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Cohen–Sutherland clipping of a data-space segment against a viewport.
///
/// Returns `None` when the segment lies entirely outside. A segment fully
/// inside is returned unchanged.
pub fn clip_segment(mut start: Point, mut end: Point, viewport: Viewport) -> Option<(Point, Point)> {
    let mut out_start = region_code(start, viewport);
    let mut out_end = region_code(end, viewport);

    loop {
        if (out_start | out_end) == 0 {
            return Some((start, end));
        }
        if (out_start & out_end) != 0 {
            return None;
        }

        let out_code = if out_start != 0 { out_start } else { out_end };
        let (x_min, x_max) = (viewport.x.min, viewport.x.max);
        let (y_min, y_max) = (viewport.y.min, viewport.y.max);

        let (x, y) = if (out_code & TOP) != 0 {
            (start.x + (end.x - start.x) * (y_max - start.y) / (end.y - start.y), y_max)
        } else if (out_code & BOTTOM) != 0 {
            (start.x + (end.x - start.x) * (y_min - start.y) / (end.y - start.y), y_min)
        } else if (out_code & RIGHT) != 0 {
            (x_max, start.y + (end.y - start.y) * (x_max - start.x) / (end.x - start.x))
        } else {
            (x_min, start.y + (end.y - start.y) * (x_min - start.x) / (end.x - start.x))
        };

        let new_point = Point::new(x, y);
        if !new_point.is_finite() {
            return None;
        }
        if out_code == out_start {
            start = new_point;
            out_start = region_code(start, viewport);
        } else {
            end = new_point;
            out_end = region_code(end, viewport);
        }
    }
}

fn region_code(point: Point, viewport: Viewport) -> u8 {
    let mut code = 0;
    if point.x < viewport.x.min {
        code |= LEFT;
    } else if point.x > viewport.x.max {
        code |= RIGHT;
    }
    if point.y < viewport.y.min {
        code |= BOTTOM;
    } else if point.y > viewport.y.max {
        code |= TOP;
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Range;

    fn unit_square() -> Viewport {
        Viewport::new(Range::new(0.0, 10.0), Range::new(0.0, 10.0))
    }

    #[test]
    fn clip_segment_inside() {
        let start = Point::new(2.0, 2.0);
        let end = Point::new(8.0, 8.0);
        let clipped = clip_segment(start, end, unit_square()).expect("segment should clip");
        assert_eq!(clipped, (start, end));
    }

    #[test]
    fn clip_segment_outside() {
        let start = Point::new(-5.0, 12.0);
        let end = Point::new(-1.0, 20.0);
        assert!(clip_segment(start, end, unit_square()).is_none());
        let below = clip_segment(Point::new(1.0, -1.0), Point::new(9.0, -3.0), unit_square());
        assert!(below.is_none());
    }

    #[test]
    fn clip_segment_single_crossing_is_truncated() {
        let (start, end) =
            clip_segment(Point::new(5.0, 5.0), Point::new(15.0, 5.0), unit_square()).unwrap();
        assert_eq!(start, Point::new(5.0, 5.0));
        assert!((end.x - 10.0).abs() < 1e-12);
        assert!((end.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn clip_segment_diagonal_through_corner_region() {
        let (start, end) =
            clip_segment(Point::new(-5.0, -5.0), Point::new(15.0, 15.0), unit_square()).unwrap();
        assert!((start.x).abs() < 1e-12 && (start.y).abs() < 1e-12);
        assert!((end.x - 10.0).abs() < 1e-12 && (end.y - 10.0).abs() < 1e-12);
    }

    #[test]
    fn build_segments_with_transform() {
        let viewport = Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0));
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 10.0));
        let transform = Transform::new(viewport, rect).expect("valid transform");
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(f64::NAN, 0.5),
            Point::new(0.5, 0.5),
        ];
        let mut out = Vec::new();
        build_line_segments(&points, &transform, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].end, ScreenPoint::new(10.0, 0.0));
    }

    #[test]
    fn hex_colors_parse_and_format() {
        let color = Color::from_hex("#1f77b4").unwrap();
        assert_eq!(color.to_hex_string(), "#1f77b4");
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("not a color").is_none());
        let translucent = Color::from_hex("#80ff0000").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn hsv_primary_hues() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0).to_hex_string(), "#ff0000");
        assert_eq!(Color::from_hsv(1.0 / 3.0, 1.0, 1.0).to_hex_string(), "#00ff00");
        assert_eq!(Color::from_hsv(1.0, 1.0, 1.0).to_hex_string(), "#ff0000");
    }
}
