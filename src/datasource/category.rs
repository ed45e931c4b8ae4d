//! Per-sample category labels and colors.

use serde::{Deserialize, Serialize};

use crate::axis::format_general;
use crate::colormap::{Palette, color_at};
use crate::datasource::PointBuffer;
use crate::render::Color;

/// Significant digits used for continuous-value labels.
const LABEL_PRECISION: usize = 6;

/// Label and color attached to one sample.
///
/// An empty label means the sample has no category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
    /// Display label.
    pub label: String,
    /// Color, if any.
    pub color: Option<Color>,
}

impl Category {
    /// Create a category.
    pub fn new(label: impl Into<String>, color: Option<Color>) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }

    /// Check whether this is the "no category" value.
    pub fn is_empty(&self) -> bool {
        self.label.is_empty()
    }
}

/// A named group of sample indices with a shared color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterGroup {
    /// Group name, used as the category label.
    pub name: String,
    /// Color as `#RRGGBB`.
    pub color: String,
    /// Member sample indices.
    pub indices: Vec<usize>,
}

impl ClusterGroup {
    /// Create a group.
    pub fn new(name: impl Into<String>, color: impl Into<String>, indices: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            indices,
        }
    }
}

/// A secondary dataset whose values drive a color gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousSource {
    /// Values aligned by row with the primary samples.
    pub data: PointBuffer,
    /// Dimension of `data` that carries the scalar.
    pub dimension: usize,
}

/// How samples get their categories.
#[derive(Debug, Clone, PartialEq)]
pub enum CategorySource {
    /// Ordered groups; later groups overwrite earlier ones.
    Discrete(Vec<ClusterGroup>),
    /// Scalar values mapped through a palette.
    Continuous(ContinuousSource),
}

/// Build one category per sample.
///
/// `color_scale` overrides the continuous domain; otherwise the global
/// min/max of the source dimension is used.
pub fn assign_categories(
    len: usize,
    source: Option<&CategorySource>,
    palette: Palette,
    color_scale: Option<(f64, f64)>,
) -> Vec<Category> {
    let mut categories = vec![Category::default(); len];
    match source {
        None => {}
        Some(CategorySource::Discrete(groups)) => assign_discrete(&mut categories, groups),
        Some(CategorySource::Continuous(source)) => {
            assign_continuous(&mut categories, source, palette, color_scale)
        }
    }
    tracing::debug!(
        samples = len,
        labeled = categories.iter().filter(|category| !category.is_empty()).count(),
        "assigned categories"
    );
    categories
}

fn assign_discrete(categories: &mut [Category], groups: &[ClusterGroup]) {
    for group in groups {
        if group.name.is_empty() || group.indices.is_empty() {
            continue;
        }
        let Some(color) = Color::from_hex(&group.color) else {
            tracing::debug!(group = %group.name, color = %group.color, "skipping group with invalid color");
            continue;
        };
        for &index in &group.indices {
            if let Some(category) = categories.get_mut(index) {
                *category = Category::new(group.name.clone(), Some(color));
            }
        }
    }
}

fn assign_continuous(
    categories: &mut [Category],
    source: &ContinuousSource,
    palette: Palette,
    color_scale: Option<(f64, f64)>,
) {
    let (min, max) = match color_scale {
        Some(bounds) => bounds,
        None => {
            let mut bounds: Option<(f64, f64)> = None;
            for value in source.data.column(source.dimension).filter(|value| value.is_finite()) {
                bounds = Some(match bounds {
                    None => (value, value),
                    Some((min, max)) => (min.min(value), max.max(value)),
                });
            }
            let Some(bounds) = bounds else {
                return;
            };
            bounds
        }
    };
    // A flat domain maps every value to the palette start.
    let max = if max == min { min + 1.0 } else { max };

    for (row, category) in categories.iter_mut().enumerate() {
        let Some(value) = source.data.value(row, source.dimension) else {
            break;
        };
        if !value.is_finite() {
            continue;
        }
        *category = Category::new(
            format_general(value, LABEL_PRECISION),
            Some(color_at(value, palette, min, max)),
        );
    }
}
