//! Interactive line chart state.
//!
//! [`LineChart`] owns the current payload, the data-to-screen mapping and the
//! hover/selection indices. Pointer handlers return whether a redraw is
//! needed and queue [`ChartEvent`]s for the host to drain.

use crate::axis::{AxisConfig, DEFAULT_PRECISION, format_general};
use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::{HoverState, find_category_band, find_nearest_segment};
use crate::payload::ChartPayload;
use crate::render::{RenderList, build_frame};
use crate::style::Theme;
use crate::transform::Transform;
use crate::view::{Viewport, ViewportState};

/// Notifications produced by pointer interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartEvent {
    /// The hovered segment or band changed.
    HoverChanged(HoverState),
    /// The selected segment changed.
    SelectionChanged(Option<usize>),
    /// Input rows picked by a click; empty when the click hit nothing.
    SelectionPublished(Vec<usize>),
}

/// Coarse interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// No payload, or too few samples to draw a line.
    Empty,
    /// Drawable with nothing hovered or selected.
    Ready,
    /// Pointer is over a segment or band.
    Hovering,
    /// A segment is selected.
    Selected,
}

/// Interactive line chart.
#[derive(Debug, Clone)]
pub struct LineChart {
    theme: Theme,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    payload: Option<ChartPayload>,
    show_envelope: bool,
    size: (f32, f32),
    viewport: Option<ViewportState>,
    hover: HoverState,
    selected: Option<usize>,
    events: Vec<ChartEvent>,
}

impl LineChart {
    /// Create an empty chart with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a chart with custom configuration.
    pub fn builder() -> LineChartBuilder {
        LineChartBuilder::default()
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Access the X axis configuration.
    pub fn x_axis(&self) -> &AxisConfig {
        &self.x_axis
    }

    /// Access the Y axis configuration.
    pub fn y_axis(&self) -> &AxisConfig {
        &self.y_axis
    }

    /// Access the current payload.
    pub fn payload(&self) -> Option<&ChartPayload> {
        self.payload.as_ref()
    }

    /// Replace the payload, resetting hover and selection.
    pub fn set_payload(&mut self, payload: Option<ChartPayload>) {
        tracing::debug!(
            samples = payload.as_ref().map_or(0, |payload| payload.series.len()),
            "chart payload replaced"
        );
        self.payload = payload;
        self.hover = HoverState::default();
        self.selected = None;
        self.refresh_viewport();
    }

    /// Drop the payload.
    pub fn clear(&mut self) {
        self.set_payload(None);
    }

    /// Widget size in pixels.
    pub fn size(&self) -> (f32, f32) {
        self.size
    }

    /// Update the widget size. Only the mapping is recomputed.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = (width.max(0.0), height.max(0.0));
        self.refresh_viewport();
    }

    /// Whether the envelope and original series are shown.
    pub fn show_envelope(&self) -> bool {
        self.show_envelope
    }

    /// Toggle the envelope; the axis ranges include the original series while
    /// it is shown.
    pub fn set_show_envelope(&mut self, show: bool) {
        if self.show_envelope != show {
            self.show_envelope = show;
            self.refresh_viewport();
        }
    }

    /// Current data-to-screen mapping parameters.
    pub fn viewport_state(&self) -> Option<ViewportState> {
        self.viewport
    }

    /// Current hover state.
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Currently selected segment.
    pub fn selected_segment(&self) -> Option<usize> {
        self.selected
    }

    /// Coarse interaction state.
    pub fn state(&self) -> ChartState {
        if !self.is_drawable() {
            ChartState::Empty
        } else if self.selected.is_some() {
            ChartState::Selected
        } else if self.hover.is_active() {
            ChartState::Hovering
        } else {
            ChartState::Ready
        }
    }

    /// Tight bounds of everything that is drawn, before padding.
    pub fn data_bounds(&self) -> Option<Viewport> {
        let payload = self.payload.as_ref()?;
        let primary = payload.series.bounds();
        let original = if self.show_envelope {
            payload.original.as_ref().and_then(|series| series.bounds())
        } else {
            None
        };
        match (primary, original) {
            (Some(a), Some(b)) => Viewport::union(a, b),
            (a, b) => a.or(b),
        }
    }

    /// Plot area inside the margins. May be empty for small widgets.
    pub fn plot_rect(&self) -> ScreenRect {
        let margins = self.theme.margins;
        ScreenRect::new(
            ScreenPoint::new(margins.left, margins.top),
            ScreenPoint::new(self.size.0 - margins.right, self.size.1 - margins.bottom),
        )
    }

    /// Strip above the plot area holding the category bands.
    pub fn band_rect(&self) -> ScreenRect {
        let plot = self.plot_rect();
        let top = (plot.min.y - self.theme.band_height - self.theme.band_gap).max(0.0);
        ScreenRect::new(
            ScreenPoint::new(plot.min.x, top),
            ScreenPoint::new(plot.max.x, top + self.theme.band_height),
        )
    }

    /// Build the current mapping, if the plot area is usable.
    pub fn transform(&self) -> Option<Transform> {
        let state = self.viewport?;
        Transform::new(state.viewport, state.screen)
    }

    /// Handle pointer movement. Returns true when the hover state changed.
    pub fn pointer_moved(&mut self, position: ScreenPoint) -> bool {
        let next = self.hit_test(position);
        self.update_hover(next)
    }

    /// Handle the pointer leaving the widget.
    pub fn pointer_left(&mut self) -> bool {
        self.update_hover(HoverState::default())
    }

    /// Handle a primary button press.
    ///
    /// A segment hit selects it and publishes its two endpoint rows. A band
    /// hit publishes every row sharing the band's label. A miss clears the
    /// selection and publishes an empty set. Returns true when the selection
    /// changed.
    pub fn pointer_pressed(&mut self, position: ScreenPoint) -> bool {
        let hit = self.hit_test(position);
        let (selected, rows) = match (hit.segment, hit.band) {
            (Some(segment), _) => (Some(segment), self.rows_for([segment, segment + 1])),
            (None, Some(band)) => {
                let samples = self
                    .payload
                    .as_ref()
                    .and_then(|payload| {
                        let category = payload.category(band)?;
                        Some(payload.samples_with_label(&category.label))
                    })
                    .unwrap_or_default();
                (None, self.rows_for(samples))
            }
            (None, None) => (None, Vec::new()),
        };

        let changed = selected != self.selected;
        if changed {
            self.selected = selected;
            tracing::debug!(?selected, "selection changed");
            self.events.push(ChartEvent::SelectionChanged(selected));
        }
        self.events.push(ChartEvent::SelectionPublished(rows));
        changed
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<ChartEvent> {
        std::mem::take(&mut self.events)
    }

    /// Text for the hovered band or segment.
    pub fn tooltip(&self) -> Option<String> {
        let payload = self.payload.as_ref()?;
        if let Some(band) = self.hover.band
            && let Some(category) = payload.category(band)
        {
            return Some(category.label.clone());
        }
        let segment = self.hover.segment?;
        let point = payload.series.point(segment)?;
        let mut text = format!(
            "x: {}\ny: {}",
            format_general(point.x, DEFAULT_PRECISION),
            format_general(point.y, DEFAULT_PRECISION)
        );
        if let Some(category) = payload.category(segment) {
            text.push_str("\nCategory: ");
            text.push_str(&category.label);
        }
        Some(text)
    }

    /// Screen-space drawing commands for the current state.
    pub fn render_list(&self) -> RenderList {
        build_frame(self)
    }

    pub(crate) fn is_drawable(&self) -> bool {
        self.payload
            .as_ref()
            .is_some_and(|payload| payload.series.len() >= 2)
    }

    fn refresh_viewport(&mut self) {
        self.viewport = self.data_bounds().map(|bounds| ViewportState {
            viewport: bounds.fitted(),
            screen: self.plot_rect(),
        });
        if let Some(state) = self.viewport {
            tracing::trace!(
                x_min = state.viewport.x.min,
                x_max = state.viewport.x.max,
                y_min = state.viewport.y.min,
                y_max = state.viewport.y.max,
                "viewport refreshed"
            );
        }
    }

    fn hit_test(&self, position: ScreenPoint) -> HoverState {
        let (Some(payload), Some(transform)) = (self.payload.as_ref(), self.transform()) else {
            return HoverState::default();
        };
        if !self.is_drawable() {
            return HoverState::default();
        }
        let points = payload.series.points();
        let segment = find_nearest_segment(points, &transform, position, self.theme.hover_tolerance);
        let band = if payload.categories.is_some() {
            find_category_band(points, &transform, self.band_rect(), position)
                .filter(|&band| payload.category(band).is_some())
        } else {
            None
        };
        HoverState { segment, band }
    }

    fn update_hover(&mut self, next: HoverState) -> bool {
        if next == self.hover {
            return false;
        }
        self.hover = next;
        tracing::trace!(segment = ?next.segment, band = ?next.band, "hover changed");
        self.events.push(ChartEvent::HoverChanged(next));
        true
    }

    /// Map rendered sample indices to the input rows they stand for.
    fn rows_for(&self, samples: impl IntoIterator<Item = usize>) -> Vec<usize> {
        let Some(payload) = self.payload.as_ref() else {
            return Vec::new();
        };
        let mut rows: Vec<usize> = samples
            .into_iter()
            .filter_map(|index| payload.source_index(index))
            .collect();
        rows.dedup();
        rows
    }
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a chart before construction.
#[derive(Debug, Default)]
pub struct LineChartBuilder {
    theme: Theme,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    payload: Option<ChartPayload>,
    show_envelope: bool,
    size: (f32, f32),
}

impl LineChartBuilder {
    /// Set the theme used by the chart.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the X axis configuration.
    pub fn x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    /// Set the Y axis configuration.
    pub fn y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    /// Set the initial payload.
    pub fn payload(mut self, payload: ChartPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Show the envelope from the start.
    pub fn show_envelope(mut self, show: bool) -> Self {
        self.show_envelope = show;
        self
    }

    /// Set the initial widget size.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = (width, height);
        self
    }

    /// Build the chart.
    pub fn build(self) -> LineChart {
        let mut chart = LineChart {
            theme: self.theme,
            x_axis: self.x_axis,
            y_axis: self.y_axis,
            payload: None,
            show_envelope: self.show_envelope,
            size: (self.size.0.max(0.0), self.size.1.max(0.0)),
            viewport: None,
            hover: HoverState::default(),
            selected: None,
            events: Vec::new(),
        };
        chart.set_payload(self.payload);
        chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::Category;
    use crate::geom::Point;
    use crate::config::SmoothingKind;
    use crate::pipeline::{AssembleRequest, Smoothing, assemble};
    use crate::render::Color;
    use crate::series::Series;
    use crate::view::Range;

    fn payload() -> ChartPayload {
        assemble(&AssembleRequest::new(&[0.0, 0.0, 1.0, 1.0, 2.0, 0.0]).with_labels("x", "y"))
            .expect("valid payload")
    }

    fn chart() -> LineChart {
        LineChart::builder().size(400.0, 300.0).payload(payload()).build()
    }

    fn screen_of(chart: &LineChart, point: Point) -> ScreenPoint {
        chart.transform().unwrap().data_to_screen(point).unwrap()
    }

    fn midpoint(a: ScreenPoint, b: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    #[test]
    fn empty_chart_state() {
        let mut chart = LineChart::new();
        assert_eq!(chart.state(), ChartState::Empty);
        assert!(chart.viewport_state().is_none());
        assert!(!chart.pointer_moved(ScreenPoint::new(10.0, 10.0)));
    }

    #[test]
    fn viewport_is_padded_data_bounds() {
        let chart = chart();
        let state = chart.viewport_state().unwrap();
        assert!((state.viewport.x.min + 0.1).abs() < 1e-12);
        assert!((state.viewport.x.max - 2.1).abs() < 1e-12);
        assert!((state.viewport.y.min + 0.1).abs() < 1e-12);
        assert!((state.viewport.y.max - 1.1).abs() < 1e-12);
        assert_eq!(state.screen, ScreenRect::new(ScreenPoint::new(60.0, 60.0), ScreenPoint::new(370.0, 260.0)));
    }

    #[test]
    fn resize_recomputes_mapping_only() {
        let mut chart = chart();
        let before = chart.viewport_state().unwrap();
        chart.resize(800.0, 600.0);
        let after = chart.viewport_state().unwrap();
        assert_eq!(before.viewport, after.viewport);
        assert_eq!(after.screen.max, ScreenPoint::new(770.0, 560.0));
    }

    #[test]
    fn hover_events_fire_only_on_change() {
        let mut chart = chart();
        let a = screen_of(&chart, Point::new(0.0, 0.0));
        let b = screen_of(&chart, Point::new(1.0, 1.0));
        let mid = midpoint(a, b);
        assert!(chart.pointer_moved(mid));
        assert!(!chart.pointer_moved(mid));
        assert_eq!(chart.state(), ChartState::Hovering);
        assert_eq!(chart.hover().segment, Some(0));
        assert!(chart.pointer_left());
        assert!(!chart.pointer_left());
        let events = chart.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], ChartEvent::HoverChanged(HoverState::default()));
        assert_eq!(chart.state(), ChartState::Ready);
    }

    #[test]
    fn click_selects_segment_and_publishes_rows() {
        let mut chart = chart();
        let a = screen_of(&chart, Point::new(1.0, 1.0));
        let b = screen_of(&chart, Point::new(2.0, 0.0));
        assert!(chart.pointer_pressed(midpoint(a, b)));
        assert_eq!(chart.selected_segment(), Some(1));
        assert_eq!(chart.state(), ChartState::Selected);
        assert_eq!(
            chart.take_events(),
            vec![
                ChartEvent::SelectionChanged(Some(1)),
                ChartEvent::SelectionPublished(vec![1, 2]),
            ]
        );

        assert!(chart.pointer_pressed(ScreenPoint::new(5.0, 5.0)));
        assert_eq!(chart.selected_segment(), None);
        assert_eq!(
            chart.take_events(),
            vec![ChartEvent::SelectionChanged(None), ChartEvent::SelectionPublished(Vec::new())]
        );
    }

    #[test]
    fn click_on_reordered_window_series_publishes_input_rows() {
        let payload = assemble(
            &AssembleRequest::new(&[3.0, 3.0, 2.0, 0.0, 1.0, 5.0, 0.0, 1.0])
                .with_smoothing(Smoothing::new(SmoothingKind::MovingAverage, 9)),
        )
        .unwrap();
        let mut chart = LineChart::builder().size(400.0, 300.0).payload(payload).build();
        let a = screen_of(&chart, Point::new(0.0, 1.0));
        let b = screen_of(&chart, Point::new(1.0, 5.0));
        chart.pointer_pressed(midpoint(a, b));
        assert_eq!(chart.selected_segment(), Some(0));
        assert_eq!(
            chart.take_events().last(),
            Some(&ChartEvent::SelectionPublished(vec![3, 2]))
        );
    }

    #[test]
    fn band_click_publishes_label_members() {
        let red = Color::from_hex("#ff0000");
        let categories = vec![
            Category::new("hot", red),
            Category::new("cold", Color::from_hex("#0000ff")),
            Category::new("hot", red),
        ];
        let payload = assemble(
            &AssembleRequest::new(&[0.0, 0.0, 1.0, 1.0, 2.0, 0.0]).with_categories(&categories),
        )
        .unwrap();
        let mut chart = LineChart::builder().size(400.0, 300.0).payload(payload).build();
        let band = chart.band_rect();
        let x = screen_of(&chart, Point::new(0.5, 0.0)).x;
        let cursor = ScreenPoint::new(x, band.center().y);

        assert!(chart.pointer_moved(cursor));
        assert_eq!(chart.hover().band, Some(0));
        assert_eq!(chart.tooltip().as_deref(), Some("hot"));

        chart.pointer_pressed(cursor);
        let events = chart.take_events();
        assert_eq!(events.last(), Some(&ChartEvent::SelectionPublished(vec![0, 2])));
    }

    #[test]
    fn segment_tooltip_lists_coordinates() {
        let mut chart = chart();
        let a = screen_of(&chart, Point::new(0.0, 0.0));
        let b = screen_of(&chart, Point::new(1.0, 1.0));
        chart.pointer_moved(midpoint(a, b));
        assert_eq!(chart.tooltip().as_deref(), Some("x: 0\ny: 0"));
    }

    #[test]
    fn new_payload_resets_interaction() {
        let mut chart = chart();
        let a = screen_of(&chart, Point::new(0.0, 0.0));
        let b = screen_of(&chart, Point::new(1.0, 1.0));
        chart.pointer_pressed(midpoint(a, b));
        chart.set_payload(Some(payload()));
        assert_eq!(chart.state(), ChartState::Ready);
        assert!(!chart.hover().is_active());
    }

    #[test]
    fn envelope_widens_bounds() {
        let mut payload = payload();
        payload.original = Some(Series::from_pairs([(0.0, -5.0), (2.0, 5.0)]));
        let mut chart = LineChart::builder().size(400.0, 300.0).payload(payload).build();
        assert_eq!(chart.data_bounds().unwrap().y, Range::new(0.0, 1.0));
        chart.set_show_envelope(true);
        assert_eq!(chart.data_bounds().unwrap().y, Range::new(-5.0, 5.0));
    }

    #[test]
    fn small_widget_has_no_transform() {
        let chart = LineChart::builder().size(50.0, 50.0).payload(payload()).build();
        assert!(chart.viewport_state().is_some());
        assert!(chart.transform().is_none());
        assert_eq!(chart.state(), ChartState::Ready);
    }
}
