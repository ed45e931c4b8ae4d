use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};

use gpui_lineplot::{
    CategorySource, ChartConfig, ChartController, ChartEvent, ClusterGroup, GpuiLineChartView,
    LineChart, PointBuffer, SmoothingKind, Theme,
};

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.0), px(480.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let values: Vec<f64> = (0..120)
                .flat_map(|i| {
                    let t = i as f64 * 0.1;
                    [t, t.sin() + (t * 3.7).cos() * 0.3, t.cos()]
                })
                .collect();
            let buffer = PointBuffer::new(
                values,
                vec!["time".into(), "signal".into(), "phase".into()],
            )
            .expect("demo buffer is rectangular");

            let config = ChartConfig::new()
                .with_smoothing(SmoothingKind::Gaussian, 7)
                .with_envelope(true);
            let mut controller = ChartController::with_chart(
                config,
                LineChart::builder().theme(Theme::new().with_points(true)).build(),
            );
            controller.batch(|controller| {
                controller.set_input(Some(buffer));
                controller.set_source(Some(CategorySource::Discrete(vec![
                    ClusterGroup::new("rising", "#2ca02c", (0..40).collect()),
                    ClusterGroup::new("falling", "#ff7f0e", (60..100).collect()),
                ])));
            });

            let chart = controller.chart().clone();
            let view = GpuiLineChartView::new(chart).on_event(|event| {
                if let ChartEvent::SelectionPublished(rows) = event {
                    println!("selected rows: {rows:?}");
                }
            });
            cx.new(|_| view)
        })
        .unwrap();
    });
}
