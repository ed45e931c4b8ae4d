use crate::axis::{AxisConfig, ticks};
use crate::chart::LineChart;
use crate::envelope::envelope_polygon;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::payload::ChartPayload;
use crate::pipeline::SummaryLine;
use crate::style::Theme;
use crate::transform::Transform;

use super::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand, RenderList,
    TextAnchor, TextStyle, build_line_segments, build_scatter_points, clip_and_map,
};

pub(crate) const NO_DATA_MESSAGE: &str = "No data available or insufficient data for chart.";
pub(crate) const INVALID_RANGE_MESSAGE: &str = "Invalid axis range";

const AXIS_PADDING: f32 = 6.0;
const TICK_LENGTH: f32 = 6.0;
const POINT_MARKER_SIZE: f32 = 4.0;

/// Build the full frame for the chart's current state.
///
/// Layers are emitted back to front: background, title, axes, category
/// bands, then the clipped plot content (envelope, original line, main line,
/// hovered segment, summary line).
pub(crate) fn build_frame(chart: &LineChart) -> RenderList {
    let theme = chart.theme();
    let (width, height) = chart.size();
    let mut render = RenderList::new();

    if width <= 1.0 || height <= 1.0 {
        return render;
    }
    let bounds = ScreenRect::from_origin_size(0.0, 0.0, width, height);
    render.push(RenderCommand::Rect {
        rect: bounds,
        style: RectStyle {
            fill: theme.background,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        },
    });

    let Some(payload) = chart.payload().filter(|_| chart.is_drawable()) else {
        push_message(&mut render, theme, bounds, NO_DATA_MESSAGE);
        return render;
    };
    let Some(transform) = chart.transform() else {
        push_message(&mut render, theme, bounds, INVALID_RANGE_MESSAGE);
        return render;
    };
    let plot_rect = transform.screen();

    build_title(&mut render, theme, payload, width);
    build_axes(&mut render, chart, payload, &transform, plot_rect);
    build_bands(&mut render, chart, payload, &transform);

    render.push(RenderCommand::ClipRect(plot_rect));
    if chart.show_envelope() {
        build_envelope(&mut render, theme, payload, &transform);
    }
    build_main_line(&mut render, chart, payload, &transform);
    if let Some(summary) = payload.summary_line.as_ref() {
        build_summary(&mut render, theme, summary, &transform);
    }
    render.push(RenderCommand::ClipEnd);

    render
}

fn push_message(render: &mut RenderList, theme: &Theme, bounds: ScreenRect, message: &str) {
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(bounds.center().x, bounds.center().y - theme.label_size * 0.5),
        text: message.to_string(),
        style: TextStyle {
            color: theme.text,
            size: theme.label_size,
            anchor: TextAnchor::Middle,
        },
    });
}

fn build_title(render: &mut RenderList, theme: &Theme, payload: &ChartPayload, width: f32) {
    if payload.title.is_empty() {
        return;
    }
    let top = (theme.margins.top - theme.band_height - theme.band_gap - theme.title_size - AXIS_PADDING)
        .max(0.0);
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(width * 0.5, top),
        text: payload.title.clone(),
        style: TextStyle {
            color: theme.text,
            size: theme.title_size,
            anchor: TextAnchor::Middle,
        },
    });
}

fn axis_title(axis: &AxisConfig, fallback: &str) -> Option<String> {
    let title = axis.title().unwrap_or(fallback).trim();
    (!title.is_empty()).then(|| title.to_string())
}

fn build_axes(
    render: &mut RenderList,
    chart: &LineChart,
    payload: &ChartPayload,
    transform: &Transform,
    plot_rect: ScreenRect,
) {
    let theme = chart.theme();
    let viewport = transform.viewport();
    let label_style = |anchor| TextStyle {
        color: theme.text,
        size: theme.label_size,
        anchor,
    };
    let mut tick_marks = vec![
        LineSegment::new(
            ScreenPoint::new(plot_rect.min.x, plot_rect.max.y),
            ScreenPoint::new(plot_rect.max.x, plot_rect.max.y),
        ),
        LineSegment::new(
            ScreenPoint::new(plot_rect.min.x, plot_rect.min.y),
            ScreenPoint::new(plot_rect.min.x, plot_rect.max.y),
        ),
    ];

    let x_axis = chart.x_axis();
    for value in ticks(viewport.x, x_axis.tick_count()) {
        let Some(x) = transform.x_to_screen(value) else {
            continue;
        };
        tick_marks.push(LineSegment::new(
            ScreenPoint::new(x, plot_rect.max.y),
            ScreenPoint::new(x, plot_rect.max.y + TICK_LENGTH),
        ));
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(x, plot_rect.max.y + TICK_LENGTH + AXIS_PADDING * 0.5),
            text: x_axis.formatter().format(value),
            style: label_style(TextAnchor::Middle),
        });
    }

    let y_axis = chart.y_axis();
    for value in ticks(viewport.y, y_axis.tick_count()) {
        let Some(y) = transform.y_to_screen(value) else {
            continue;
        };
        tick_marks.push(LineSegment::new(
            ScreenPoint::new(plot_rect.min.x - TICK_LENGTH, y),
            ScreenPoint::new(plot_rect.min.x, y),
        ));
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                plot_rect.min.x - TICK_LENGTH - AXIS_PADDING * 0.5,
                y - theme.label_size * 0.5,
            ),
            text: y_axis.formatter().format(value),
            style: label_style(TextAnchor::End),
        });
    }

    render.push(RenderCommand::LineSegments {
        segments: tick_marks,
        style: LineStyle {
            color: theme.axis,
            width: 1.0,
        },
    });

    let (_, height) = chart.size();
    if let Some(title) = axis_title(x_axis, &payload.x_axis_label) {
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                plot_rect.center().x,
                (height - theme.label_size - AXIS_PADDING * 0.5).max(plot_rect.max.y),
            ),
            text: title,
            style: label_style(TextAnchor::Middle),
        });
    }
    if let Some(title) = axis_title(y_axis, &payload.y_axis_label) {
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(
                AXIS_PADDING,
                (plot_rect.min.y - theme.label_size - AXIS_PADDING).max(0.0),
            ),
            text: title,
            style: label_style(TextAnchor::Start),
        });
    }
}

fn build_bands(render: &mut RenderList, chart: &LineChart, payload: &ChartPayload, transform: &Transform) {
    if payload.categories.is_none() {
        return;
    }
    let band_rect = chart.band_rect();
    let points = payload.series.points();
    let mut hovered = None;
    for (index, pair) in points.windows(2).enumerate() {
        let Some(category) = payload.category(index) else {
            continue;
        };
        let (Some(left), Some(right)) = (
            transform.x_to_screen(pair[0].x),
            transform.x_to_screen(pair[1].x),
        ) else {
            continue;
        };
        let rect = ScreenRect::new(
            ScreenPoint::new(left.min(right), band_rect.min.y),
            ScreenPoint::new(left.max(right), band_rect.max.y),
        );
        render.push(RenderCommand::Rect {
            rect,
            style: RectStyle {
                fill: category.color.unwrap_or(payload.line_color),
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            },
        });
        if chart.hover().band == Some(index) {
            hovered = Some(rect);
        }
    }
    if let Some(rect) = hovered {
        render.push(RenderCommand::Rect {
            rect,
            style: RectStyle {
                fill: Color::TRANSPARENT,
                stroke: chart.theme().axis,
                stroke_width: 2.0,
            },
        });
    }
}

fn build_envelope(render: &mut RenderList, theme: &Theme, payload: &ChartPayload, transform: &Transform) {
    let Some(original) = payload.original.as_ref() else {
        return;
    };
    let polygon: Vec<ScreenPoint> = envelope_polygon(payload.series.points(), original.points())
        .into_iter()
        .filter_map(|point| transform.data_to_screen(point))
        .collect();
    if polygon.len() >= 3 {
        render.push(RenderCommand::Polygon {
            points: polygon,
            fill: theme.envelope_fill,
        });
    }

    let mut segments = Vec::new();
    build_line_segments(original.points(), transform, &mut segments);
    if !segments.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle {
                color: theme.original_line,
                width: 1.0,
            },
        });
    }
}

/// Consecutive segments sharing a color are batched into one command.
fn build_main_line(render: &mut RenderList, chart: &LineChart, payload: &ChartPayload, transform: &Transform) {
    let theme = chart.theme();
    let viewport = transform.viewport();
    let points = payload.series.points();
    let mut batch: Option<(Color, Vec<LineSegment>)> = None;

    for (index, pair) in points.windows(2).enumerate() {
        let Some(segment) = clip_and_map(pair[0], pair[1], viewport, transform) else {
            continue;
        };
        let color = payload
            .category(index)
            .and_then(|category| category.color)
            .unwrap_or(payload.line_color);
        if let Some((current, segments)) = batch.as_mut()
            && *current == color
        {
            segments.push(segment);
            continue;
        }
        flush_segments(render, batch.take(), theme.line_width);
        batch = Some((color, vec![segment]));
    }
    flush_segments(render, batch, theme.line_width);

    if let Some(index) = chart.hover().segment
        && let (Some(&start), Some(&end)) = (points.get(index), points.get(index + 1))
        && let Some(segment) = clip_and_map(start, end, viewport, transform)
    {
        render.push(RenderCommand::LineSegments {
            segments: vec![segment],
            style: LineStyle {
                color: theme.hover,
                width: theme.hover_width,
            },
        });
    }

    if theme.show_points {
        let mut markers = Vec::new();
        build_scatter_points(points, transform, &mut markers);
        if !markers.is_empty() {
            render.push(RenderCommand::Points {
                points: markers,
                style: MarkerStyle {
                    color: payload.line_color,
                    size: POINT_MARKER_SIZE,
                    shape: theme.point_shape,
                },
            });
        }
    }
}

fn flush_segments(render: &mut RenderList, batch: Option<(Color, Vec<LineSegment>)>, width: f32) {
    if let Some((color, segments)) = batch
        && !segments.is_empty()
    {
        render.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle { color, width },
        });
    }
}

fn build_summary(render: &mut RenderList, theme: &Theme, summary: &SummaryLine, transform: &Transform) {
    if let Some(segment) = clip_and_map(summary.start, summary.end, transform.viewport(), transform) {
        let (dash, gap) = theme.summary_dash;
        let segments = dash_segments(segment.start, segment.end, dash, gap);
        if !segments.is_empty() {
            render.push(RenderCommand::LineSegments {
                segments,
                style: LineStyle {
                    color: summary.color,
                    width: theme.summary_width,
                },
            });
        }
    }

    let endpoints: Vec<(Point, &str)> = vec![
        (summary.start, summary.start_label.as_str()),
        (summary.end, summary.end_label.as_str()),
    ];
    let mut markers = Vec::new();
    for (point, label) in endpoints {
        if !transform.viewport().contains(point) {
            continue;
        }
        let Some(screen) = transform.data_to_screen(point) else {
            continue;
        };
        markers.push(screen);
        if !label.is_empty() {
            render.push(RenderCommand::Text {
                position: ScreenPoint::new(
                    screen.x,
                    screen.y - theme.summary_marker_size - theme.label_size - AXIS_PADDING * 0.5,
                ),
                text: label.to_string(),
                style: TextStyle {
                    color: summary.color,
                    size: theme.label_size,
                    anchor: TextAnchor::Middle,
                },
            });
        }
    }
    if !markers.is_empty() {
        render.push(RenderCommand::Points {
            points: markers,
            style: MarkerStyle {
                color: summary.color,
                size: theme.summary_marker_size,
                shape: MarkerShape::Circle,
            },
        });
    }
}

/// Split `start..end` into dashes of `dash` pixels separated by `gap` pixels.
pub(crate) fn dash_segments(start: ScreenPoint, end: ScreenPoint, dash: f32, gap: f32) -> Vec<LineSegment> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = (dx * dx + dy * dy).sqrt();
    if !length.is_finite() || length <= 0.0 {
        return Vec::new();
    }
    if dash <= 0.0 || gap < 0.0 || dash + gap <= 0.0 {
        return vec![LineSegment::new(start, end)];
    }
    let (ux, uy) = (dx / length, dy / length);
    let at = |offset: f32| ScreenPoint::new(start.x + ux * offset, start.y + uy * offset);
    let mut segments = Vec::with_capacity((length / (dash + gap)).ceil() as usize + 1);
    let mut offset = 0.0_f32;
    while offset < length {
        let stop = (offset + dash).min(length);
        segments.push(LineSegment::new(at(offset), at(stop)));
        offset += dash + gap;
    }
    segments
}
