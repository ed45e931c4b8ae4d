use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{MouseButton, MouseDownEvent, MouseMoveEvent, Pixels, Point, Window, canvas, div};

use crate::chart::{ChartEvent, LineChart};
use crate::geom::ScreenPoint;

use super::paint::{paint_frame, paint_tooltip, to_hsla};

type EventCallback = Arc<dyn Fn(&ChartEvent) + Send + Sync>;

#[derive(Debug)]
struct ViewState {
    origin: ScreenPoint,
    cursor: Option<ScreenPoint>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            origin: ScreenPoint::new(0.0, 0.0),
            cursor: None,
        }
    }
}

/// A GPUI view that renders a [`LineChart`] and forwards pointer input.
///
/// Mouse movement drives hover and tooltips, a left click drives selection,
/// and leaving the view clears hover.
#[derive(Clone)]
pub struct GpuiLineChartView {
    chart: Arc<RwLock<LineChart>>,
    state: Arc<RwLock<ViewState>>,
    on_event: Option<EventCallback>,
}

impl GpuiLineChartView {
    /// Create a new view for the given chart.
    pub fn new(chart: LineChart) -> Self {
        Self {
            chart: Arc::new(RwLock::new(chart)),
            state: Arc::new(RwLock::new(ViewState::default())),
            on_event: None,
        }
    }

    /// Receive chart events produced by pointer input.
    ///
    /// Without a callback, events are discarded after each handler.
    pub fn on_event(mut self, callback: impl Fn(&ChartEvent) + Send + Sync + 'static) -> Self {
        self.on_event = Some(Arc::new(callback));
        self
    }

    /// Get a handle for replacing the payload or reading chart state.
    pub fn chart_handle(&self) -> ChartHandle {
        ChartHandle {
            chart: Arc::clone(&self.chart),
        }
    }

    fn local_point(&self, position: Point<Pixels>) -> ScreenPoint {
        let origin = self.state.read().expect("chart view state lock").origin;
        ScreenPoint::new(f32::from(position.x) - origin.x, f32::from(position.y) - origin.y)
    }

    fn dispatch_events(&self, chart: &mut LineChart) {
        let events = chart.take_events();
        if let Some(callback) = self.on_event.as_ref() {
            for event in &events {
                callback(event);
            }
        }
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = self.local_point(ev.position);
        self.state.write().expect("chart view state lock").cursor = Some(pos);
        let mut chart = self.chart.write().expect("chart lock");
        let changed = chart.pointer_moved(pos);
        let hovering = chart.hover().is_active();
        self.dispatch_events(&mut chart);
        if changed || hovering {
            cx.notify();
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = self.local_point(ev.position);
        let mut chart = self.chart.write().expect("chart lock");
        chart.pointer_pressed(pos);
        self.dispatch_events(&mut chart);
        cx.notify();
    }

    fn on_hover_change(&mut self, hovered: bool, cx: &mut Context<Self>) {
        if hovered {
            return;
        }
        self.state.write().expect("chart view state lock").cursor = None;
        let mut chart = self.chart.write().expect("chart lock");
        if chart.pointer_left() {
            self.dispatch_events(&mut chart);
            cx.notify();
        }
    }
}

impl Render for GpuiLineChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let chart = Arc::clone(&self.chart);
        let state = Arc::clone(&self.state);
        let background = chart.read().expect("chart lock").theme().background;

        div()
            .id("gpui-lineplot")
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, _, _| {
                        let origin =
                            ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));
                        let mut chart = chart.write().expect("chart lock");
                        let size = (f32::from(bounds.size.width), f32::from(bounds.size.height));
                        if chart.size() != size {
                            chart.resize(size.0, size.1);
                        }
                        let mut state = state.write().expect("chart view state lock");
                        state.origin = origin;
                        let tooltip = chart.tooltip().zip(state.cursor);
                        (chart.render_list(), origin, tooltip)
                    },
                    move |_, (render, origin, tooltip), window, cx| {
                        paint_frame(&render, origin, window, cx);
                        if let Some((text, cursor)) = tooltip {
                            paint_tooltip(&text, cursor, origin, window, cx);
                        }
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_hover(cx.listener(|this, hovered: &bool, _, cx| {
                this.on_hover_change(*hovered, cx);
            }))
    }
}

/// A handle for mutating a [`LineChart`] held inside a `GpuiLineChartView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct ChartHandle {
    chart: Arc<RwLock<LineChart>>,
}

impl ChartHandle {
    /// Read the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&LineChart) -> R) -> R {
        let chart = self.chart.read().expect("chart lock");
        f(&chart)
    }

    /// Mutate the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut LineChart) -> R) -> R {
        let mut chart = self.chart.write().expect("chart lock");
        f(&mut chart)
    }
}
