//! Ties inputs and configuration to a chart.
//!
//! Every change re-runs the pipeline synchronously, so the newest inputs
//! always win. [`ChartController::batch`] suppresses the intermediate runs
//! of a group of edits and recomputes once at the end.

use crate::chart::LineChart;
use crate::config::{ChartConfig, NormalizationKind, SmoothingKind, SortAxis};
use crate::datasource::{CategorySource, PointBuffer};
use crate::payload::ChartPayload;
use crate::pipeline::prepare;

type PayloadListener = Box<dyn FnMut(Option<&ChartPayload>)>;

/// Owns a [`LineChart`] and keeps its payload in sync with the inputs.
pub struct ChartController {
    config: ChartConfig,
    input: Option<PointBuffer>,
    source: Option<CategorySource>,
    chart: LineChart,
    updating: bool,
    pending: bool,
    listeners: Vec<PayloadListener>,
}

impl ChartController {
    /// Controller around a default chart.
    pub fn new(config: ChartConfig) -> Self {
        Self::with_chart(config, LineChart::new())
    }

    /// Controller around an existing chart.
    pub fn with_chart(config: ChartConfig, chart: LineChart) -> Self {
        let mut controller = Self {
            config,
            input: None,
            source: None,
            chart,
            updating: false,
            pending: false,
            listeners: Vec::new(),
        };
        controller.chart.set_show_envelope(controller.config.show_envelope);
        controller
    }

    /// Current configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Current input buffer.
    pub fn input(&self) -> Option<&PointBuffer> {
        self.input.as_ref()
    }

    /// The managed chart.
    pub fn chart(&self) -> &LineChart {
        &self.chart
    }

    /// Mutable access for pointer handling and resizing.
    pub fn chart_mut(&mut self) -> &mut LineChart {
        &mut self.chart
    }

    /// Current payload, if the last run produced one.
    pub fn payload(&self) -> Option<&ChartPayload> {
        self.chart.payload()
    }

    /// Register a callback invoked after every recompute.
    pub fn on_payload_changed(&mut self, listener: impl FnMut(Option<&ChartPayload>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply several edits with a single recompute at the end.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let outer = self.updating;
        self.updating = true;
        let result = f(self);
        self.updating = outer;
        if !outer && std::mem::take(&mut self.pending) {
            self.recompute();
        }
        result
    }

    /// Replace the input buffer.
    pub fn set_input(&mut self, input: Option<PointBuffer>) {
        self.input = input;
        self.request_recompute();
    }

    /// Replace the category source.
    pub fn set_source(&mut self, source: Option<CategorySource>) {
        self.source = source;
        self.request_recompute();
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: ChartConfig) {
        self.config = config;
        self.request_recompute();
    }

    /// Change the smoothing kind and window.
    pub fn set_smoothing(&mut self, kind: SmoothingKind, window: usize) {
        self.config.smoothing = kind;
        self.config.smoothing_window = window;
        self.request_recompute();
    }

    /// Change the normalization.
    pub fn set_normalization(&mut self, kind: NormalizationKind) {
        self.config.normalization = kind;
        self.request_recompute();
    }

    /// Change the sort axis.
    pub fn set_sort_axis(&mut self, axis: SortAxis) {
        self.config.sort_axis = axis;
        self.request_recompute();
    }

    /// Change the palette used for continuous categories.
    pub fn set_palette(&mut self, name: impl Into<String>) {
        self.config.palette = name.into();
        self.request_recompute();
    }

    /// Change the plotted dimensions.
    pub fn set_dimensions(&mut self, x: usize, y: usize) {
        self.config.x_dimension = x;
        self.config.y_dimension = y;
        self.request_recompute();
    }

    /// Change the continuous color scale bounds.
    pub fn set_color_scale(&mut self, scale: Option<(f64, f64)>) {
        self.config.color_scale = scale;
        self.request_recompute();
    }

    /// Toggle the envelope overlay. Does not re-run the pipeline.
    pub fn set_show_envelope(&mut self, show: bool) {
        self.config.show_envelope = show;
        self.chart.set_show_envelope(show);
    }

    fn request_recompute(&mut self) {
        if self.updating {
            self.pending = true;
        } else {
            self.recompute();
        }
    }

    /// Re-run the pipeline and hand the result to the chart and listeners.
    pub fn recompute(&mut self) {
        let payload = self.input.as_ref().and_then(|input| {
            match prepare(input, self.source.as_ref(), &self.config) {
                Ok(payload) => Some(payload),
                Err(error) => {
                    tracing::debug!(%error, "payload rejected");
                    None
                }
            }
        });
        self.chart.set_show_envelope(self.config.show_envelope);
        self.chart.set_payload(payload);
        let payload = self.chart.payload();
        for listener in &mut self.listeners {
            listener(payload);
        }
    }
}

impl std::fmt::Debug for ChartController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartController")
            .field("config", &self.config)
            .field("input", &self.input)
            .field("chart", &self.chart)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::chart::ChartState;
    use crate::datasource::ClusterGroup;

    fn buffer() -> PointBuffer {
        PointBuffer::new(
            vec![0.0, 1.0, 1.0, 3.0, 2.0, 2.0, 3.0, 5.0],
            vec!["t".into(), "v".into()],
        )
        .unwrap()
    }

    fn counting(controller: &mut ChartController) -> Rc<RefCell<Vec<bool>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        controller.on_payload_changed(move |payload| sink.borrow_mut().push(payload.is_some()));
        calls
    }

    #[test]
    fn input_change_recomputes() {
        let mut controller = ChartController::new(ChartConfig::default());
        let calls = counting(&mut controller);
        controller.set_input(Some(buffer()));
        assert_eq!(*calls.borrow(), vec![true]);
        assert_eq!(controller.chart().state(), ChartState::Ready);
        assert_eq!(controller.payload().unwrap().title, "t vs v");

        controller.set_input(None);
        assert_eq!(*calls.borrow(), vec![true, false]);
        assert_eq!(controller.chart().state(), ChartState::Empty);
    }

    #[test]
    fn batch_recomputes_once() {
        let mut controller = ChartController::new(ChartConfig::default());
        let calls = counting(&mut controller);
        controller.batch(|controller| {
            controller.set_input(Some(buffer()));
            controller.set_smoothing(SmoothingKind::MovingAverage, 2);
            controller.set_normalization(NormalizationKind::MinMax);
        });
        assert_eq!(calls.borrow().len(), 1);
        let payload = controller.payload().unwrap();
        assert_eq!(payload.series.len(), 3);
        assert!(payload.original.is_some());
    }

    #[test]
    fn nested_batches_defer_to_outermost() {
        let mut controller = ChartController::new(ChartConfig::default());
        let calls = counting(&mut controller);
        controller.batch(|controller| {
            controller.set_input(Some(buffer()));
            controller.batch(|controller| controller.set_sort_axis(SortAxis::Y));
            assert!(calls.borrow().is_empty());
        });
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn invalid_dimensions_clear_the_chart() {
        let mut controller = ChartController::new(ChartConfig::default());
        controller.set_input(Some(buffer()));
        controller.set_dimensions(0, 5);
        assert!(controller.payload().is_none());
    }

    #[test]
    fn discrete_source_colors_samples() {
        let mut controller = ChartController::new(ChartConfig::default());
        controller.batch(|controller| {
            controller.set_input(Some(buffer()));
            controller.set_source(Some(CategorySource::Discrete(vec![ClusterGroup::new(
                "low",
                "#00ff00",
                vec![0, 2],
            )])));
        });
        let payload = controller.payload().unwrap();
        assert_eq!(payload.samples_with_label("low"), vec![0, 2]);
    }

    #[test]
    fn envelope_toggle_skips_pipeline() {
        let mut controller = ChartController::new(ChartConfig::default());
        controller.set_input(Some(buffer()));
        let calls = counting(&mut controller);
        controller.set_show_envelope(true);
        assert!(calls.borrow().is_empty());
        assert!(controller.chart().show_envelope());
        assert!(controller.config().show_envelope);
    }
}
