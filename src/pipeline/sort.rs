//! Stable ordering of samples with their categories.

use crate::config::SortAxis;
use crate::datasource::Category;
use crate::series::Series;

/// Result of ordering a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Sorted {
    /// Ordered series.
    pub series: Series,
    /// Categories permuted alongside the series.
    pub categories: Vec<Category>,
    /// `permutation[i]` is the input index of output sample `i`.
    pub permutation: Vec<usize>,
}

/// Stable sort of `series` by `axis`, carrying `categories` along.
///
/// An empty category list stays empty. Otherwise the output has one category
/// per sample: extra categories are dropped and missing ones become empty.
/// Input that is already ordered is returned as is.
pub fn sort_series(series: &Series, categories: &[Category], axis: SortAxis) -> Sorted {
    let len = series.len();
    if series.is_sorted_by(axis) {
        let permutation: Vec<usize> = (0..len).collect();
        return Sorted {
            series: series.clone(),
            categories: permute(categories, &permutation),
            permutation,
        };
    }

    let points = series.points();
    let mut permutation: Vec<usize> = (0..len).collect();
    permutation.sort_by(|&a, &b| axis.key(&points[a]).total_cmp(&axis.key(&points[b])));

    Sorted {
        series: permutation.iter().map(|&index| points[index]).collect(),
        categories: permute(categories, &permutation),
        permutation,
    }
}

fn permute(categories: &[Category], permutation: &[usize]) -> Vec<Category> {
    if categories.is_empty() {
        return Vec::new();
    }
    permutation
        .iter()
        .map(|&index| categories.get(index).cloned().unwrap_or_default())
        .collect()
}
