use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle, RenderCommand, RenderList,
    TextAnchor, TextStyle,
};

/// Paint `render` with every coordinate offset by `origin`.
pub(crate) fn paint_frame(render: &RenderList, origin: ScreenPoint, window: &mut Window, cx: &mut App) {
    let painter = Painter { origin };
    let mut clip_stack: Vec<ContentMask<Pixels>> = Vec::new();
    for command in render.commands() {
        match command {
            RenderCommand::ClipRect(rect) => {
                clip_stack.push(ContentMask {
                    bounds: painter.bounds(*rect),
                });
            }
            RenderCommand::ClipEnd => {
                clip_stack.pop();
            }
            RenderCommand::LineSegments { segments, style } => {
                with_clip(window, &clip_stack, |window| {
                    painter.lines(window, segments, *style);
                });
            }
            RenderCommand::Points { points, style } => {
                with_clip(window, &clip_stack, |window| {
                    painter.points(window, points, *style);
                });
            }
            RenderCommand::Rect { rect, style } => {
                with_clip(window, &clip_stack, |window| {
                    painter.rect(window, *rect, *style);
                });
            }
            RenderCommand::Polygon { points, fill } => {
                with_clip(window, &clip_stack, |window| {
                    painter.polygon(window, points, *fill);
                });
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                with_clip(window, &clip_stack, |window| {
                    painter.text(window, cx, *position, text, style);
                });
            }
        }
    }
}

/// Paint a multi-line tooltip box whose top-left corner sits near `anchor`.
pub(crate) fn paint_tooltip(
    text: &str,
    anchor: ScreenPoint,
    origin: ScreenPoint,
    window: &mut Window,
    cx: &mut App,
) {
    const OFFSET: f32 = 12.0;
    const PADDING: f32 = 4.0;
    const SIZE: f32 = 12.0;

    let painter = Painter { origin };
    let line_height = SIZE * 1.2;
    let lines: Vec<&str> = text.lines().collect();
    let width = lines
        .iter()
        .map(|line| painter.measure(window, line, SIZE))
        .fold(0.0_f32, f32::max);
    let min = ScreenPoint::new(anchor.x + OFFSET, anchor.y + OFFSET);
    let rect = ScreenRect::new(
        min,
        ScreenPoint::new(
            min.x + width + PADDING * 2.0,
            min.y + line_height * lines.len() as f32 + PADDING * 2.0,
        ),
    );
    painter.rect(
        window,
        rect,
        RectStyle {
            fill: Color::WHITE.with_alpha(0.95),
            stroke: Color::from_rgb8(120, 120, 120),
            stroke_width: 1.0,
        },
    );
    let style = TextStyle {
        color: Color::BLACK,
        size: SIZE,
        anchor: TextAnchor::Start,
    };
    for (index, line) in lines.iter().enumerate() {
        let position = ScreenPoint::new(
            min.x + PADDING,
            min.y + PADDING + line_height * index as f32,
        );
        painter.text(window, cx, position, line, &style);
    }
}

struct Painter {
    origin: ScreenPoint,
}

impl Painter {
    fn point(&self, pt: ScreenPoint) -> gpui::Point<Pixels> {
        point(px(pt.x + self.origin.x), px(pt.y + self.origin.y))
    }

    fn bounds(&self, rect: ScreenRect) -> Bounds<Pixels> {
        Bounds::from_corners(self.point(rect.min), self.point(rect.max))
    }

    fn lines(&self, window: &mut Window, segments: &[LineSegment], style: LineStyle) {
        if segments.is_empty() {
            return;
        }
        let width = style.width.max(0.5);
        let mut builder = PathBuilder::stroke(px(width));
        for segment in segments {
            builder.move_to(self.point(segment.start));
            builder.line_to(self.point(segment.end));
        }
        if let Ok(path) = builder.build() {
            window.paint_path(path, to_rgba(style.color));
        }
    }

    fn points(&self, window: &mut Window, points: &[ScreenPoint], style: MarkerStyle) {
        let half = style.size.max(2.0) * 0.5;
        let radius = match style.shape {
            MarkerShape::Circle => half,
            MarkerShape::Square => 0.0,
        };
        for &pt in points {
            let bounds = Bounds::from_corners(
                self.point(ScreenPoint::new(pt.x - half, pt.y - half)),
                self.point(ScreenPoint::new(pt.x + half, pt.y + half)),
            );
            window.paint_quad(quad(
                bounds,
                Corners::all(px(radius)),
                to_rgba(style.color),
                Edges::all(px(0.0)),
                to_rgba(style.color),
                BorderStyle::default(),
            ));
        }
    }

    fn rect(&self, window: &mut Window, rect: ScreenRect, style: RectStyle) {
        window.paint_quad(quad(
            self.bounds(rect),
            Corners::all(px(0.0)),
            to_rgba(style.fill),
            Edges::all(px(style.stroke_width)),
            to_rgba(style.stroke),
            BorderStyle::default(),
        ));
    }

    fn polygon(&self, window: &mut Window, points: &[ScreenPoint], fill: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.len() < 2 {
            return;
        }
        let mut builder = PathBuilder::fill();
        builder.move_to(self.point(*first));
        for &pt in rest {
            builder.line_to(self.point(pt));
        }
        builder.close();
        if let Ok(path) = builder.build() {
            window.paint_path(path, to_rgba(fill));
        }
    }

    fn measure(&self, window: &Window, text: &str, size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let shaped = window
            .text_system()
            .shape_line(text.to_string().into(), px(size), &[text_run(text, Color::BLACK)], None);
        f32::from(shaped.width)
    }

    fn text(&self, window: &mut Window, cx: &mut App, position: ScreenPoint, text: &str, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let shaped = window.text_system().shape_line(
            text.to_string().into(),
            px(style.size),
            &[text_run(text, style.color)],
            None,
        );
        let width = f32::from(shaped.width);
        let x = match style.anchor {
            TextAnchor::Start => position.x,
            TextAnchor::Middle => position.x - width * 0.5,
            TextAnchor::End => position.x - width,
        };
        let line_height = shaped.ascent + shaped.descent;
        let _ = shaped.paint(self.point(ScreenPoint::new(x, position.y)), line_height, window, cx);
    }
}

fn text_run(text: &str, color: Color) -> TextRun {
    TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: to_hsla(color),
        background_color: None,
        underline: None,
        strikethrough: None,
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn with_clip(window: &mut Window, stack: &[ContentMask<Pixels>], f: impl FnOnce(&mut Window)) {
    if let Some(mask) = stack.last() {
        window.with_content_mask(Some(mask.clone()), f);
    } else {
        f(window);
    }
}
