//! The renderable result of one pipeline run.

use serde_json::{Map, Value, json};

use crate::datasource::Category;
use crate::pipeline::SummaryLine;
use crate::render::Color;
use crate::series::Series;

/// Everything a chart needs to draw one dataset.
///
/// A payload is rebuilt on every pipeline run and replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPayload {
    /// Normalized and smoothed samples.
    pub series: Series,
    /// Per-sample categories joined by index, or `None` when no sample has one.
    pub categories: Option<Vec<Category>>,
    /// Trend line computed before smoothing.
    pub summary_line: Option<SummaryLine>,
    /// Chart title.
    pub title: String,
    /// X axis label.
    pub x_axis_label: String,
    /// Y axis label.
    pub y_axis_label: String,
    /// Main line color.
    pub line_color: Color,
    /// Normalized series before smoothing, kept only when smoothing changed it.
    pub original: Option<Series>,
    /// Input row each rendered sample stands for.
    pub source_indices: Vec<usize>,
}

impl ChartPayload {
    /// Category of sample `index`, if it has a non-empty one.
    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories
            .as_ref()?
            .get(index)
            .filter(|category| !category.is_empty())
    }

    /// Input row for rendered sample `index`.
    pub fn source_index(&self, index: usize) -> Option<usize> {
        self.source_indices.get(index).copied()
    }

    /// Rendered sample indices sharing `label`.
    pub fn samples_with_label(&self, label: &str) -> Vec<usize> {
        let Some(categories) = self.categories.as_ref() else {
            return Vec::new();
        };
        categories
            .iter()
            .take(self.series.len())
            .enumerate()
            .filter(|(_, category)| !category.is_empty() && category.label == label)
            .map(|(index, _)| index)
            .collect()
    }

    /// Loosely typed map for hosts that exchange JSON-like values.
    ///
    /// Keys: `data` (list of `{x, y, category?: [color, label]}`), `statLine`
    /// (when present), `lineColor`, `title`, `xAxisName`, `yAxisName`.
    pub fn to_host_value(&self) -> Value {
        let data: Vec<Value> = self
            .series
            .points()
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let mut entry = Map::new();
                entry.insert("x".into(), json!(point.x));
                entry.insert("y".into(), json!(point.y));
                if let Some(category) = self.category(index) {
                    let color = category.color.map(|color| color.to_hex_string()).unwrap_or_default();
                    entry.insert("category".into(), json!([color, category.label]));
                }
                Value::Object(entry)
            })
            .collect();

        let mut root = Map::new();
        root.insert("data".into(), Value::Array(data));
        if let Some(line) = &self.summary_line {
            root.insert("statLine".into(), json!(line.record()));
        }
        root.insert("lineColor".into(), json!(self.line_color.to_hex_string()));
        root.insert("title".into(), json!(self.title));
        root.insert("xAxisName".into(), json!(self.x_axis_label));
        root.insert("yAxisName".into(), json!(self.y_axis_label));
        Value::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn payload() -> ChartPayload {
        ChartPayload {
            series: Series::from_pairs([(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]),
            categories: Some(vec![
                Category::new("a", Color::from_hex("#ff0000")),
                Category::default(),
                Category::new("a", Color::from_hex("#ff0000")),
            ]),
            summary_line: None,
            title: "x vs y".into(),
            x_axis_label: "x".into(),
            y_axis_label: "y".into(),
            line_color: Color::from_rgb_u32(0x1f77b4),
            original: None,
            source_indices: vec![2, 0, 1],
        }
    }

    #[test]
    fn host_value_uses_host_keys() {
        let value = payload().to_host_value();
        assert_eq!(value["lineColor"], "#1f77b4");
        assert_eq!(value["title"], "x vs y");
        assert_eq!(value["xAxisName"], "x");
        assert_eq!(value["data"][0]["category"][0], "#ff0000");
        assert_eq!(value["data"][0]["category"][1], "a");
        assert!(value["data"][1].get("category").is_none());
        assert!(value.get("statLine").is_none());
    }

    #[test]
    fn host_value_includes_summary_line() {
        let mut payload = payload();
        payload.summary_line = Some(SummaryLine {
            start: Point::new(0.5, 1.5),
            end: Point::new(1.5, 2.5),
            start_label: "Mean first 2".into(),
            end_label: "Mean last 2".into(),
            color: Color::BLACK,
            n_start: 2,
            n_end: 2,
        });
        let value = payload.to_host_value();
        assert_eq!(value["statLine"]["start_x"], 0.5);
        assert_eq!(value["statLine"]["color"], "#000000");
        assert_eq!(value["statLine"]["n_end"], 2);
    }

    #[test]
    fn label_lookup_skips_empty_categories() {
        let payload = payload();
        assert_eq!(payload.samples_with_label("a"), vec![0, 2]);
        assert!(payload.category(1).is_none());
        assert_eq!(payload.source_index(0), Some(2));
    }
}
