//! Input data sources.
//!
//! The host hands over a row-major [`PointBuffer`] with named dimensions and,
//! optionally, a [`CategorySource`] describing how samples are colored. This
//! module validates the shape of that input and extracts the two plotted
//! dimensions as a flat `x0, y0, x1, y1, ...` buffer.

mod category;

pub use category::{Category, CategorySource, ClusterGroup, ContinuousSource, assign_categories};

use crate::error::PayloadError;
use crate::geom::Point;
use crate::series::Series;

/// Row-major multi-dimensional sample buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer {
    values: Vec<f64>,
    dimension_names: Vec<String>,
}

impl PointBuffer {
    /// Create a buffer, checking that values divide evenly into rows.
    pub fn new(values: Vec<f64>, dimension_names: Vec<String>) -> Result<Self, PayloadError> {
        let dimensions = dimension_names.len();
        if dimensions == 0 {
            return Err(PayloadError::TooFewDimensions(0));
        }
        if values.len() % dimensions != 0 {
            return Err(PayloadError::RaggedBuffer {
                values: values.len(),
                dimensions,
            });
        }
        Ok(Self {
            values,
            dimension_names,
        })
    }

    /// Build a buffer from rows, naming dimensions `dim0`, `dim1`, ...
    pub fn from_rows<const D: usize>(rows: &[[f64; D]]) -> Result<Self, PayloadError> {
        let names = (0..D).map(|index| format!("dim{index}")).collect();
        Self::new(rows.iter().flatten().copied().collect(), names)
    }

    /// Number of dimensions per row.
    pub fn num_dimensions(&self) -> usize {
        self.dimension_names.len()
    }

    /// Number of rows.
    pub fn num_points(&self) -> usize {
        self.values.len() / self.num_dimensions()
    }

    /// Check whether the buffer has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dimension names in column order.
    pub fn dimension_names(&self) -> &[String] {
        &self.dimension_names
    }

    /// Name of one dimension.
    pub fn dimension_name(&self, index: usize) -> Option<&str> {
        self.dimension_names.get(index).map(String::as_str)
    }

    /// Value at `row` in dimension `dimension`.
    pub fn value(&self, row: usize, dimension: usize) -> Option<f64> {
        let dimensions = self.num_dimensions();
        if dimension >= dimensions {
            return None;
        }
        self.values.get(row * dimensions + dimension).copied()
    }

    /// Iterate over one column.
    pub fn column(&self, dimension: usize) -> impl Iterator<Item = f64> + '_ {
        let dimensions = self.num_dimensions();
        let valid = dimension < dimensions;
        self.values
            .iter()
            .skip(if valid { dimension } else { self.values.len() })
            .step_by(dimensions)
            .copied()
    }
}

/// Pull two dimensions out of a buffer as interleaved `x, y` values.
pub fn extract_coordinates(
    buffer: &PointBuffer,
    x_dimension: usize,
    y_dimension: usize,
) -> Result<Vec<f64>, PayloadError> {
    let count = buffer.num_dimensions();
    if count < 2 {
        return Err(PayloadError::TooFewDimensions(count));
    }
    for index in [x_dimension, y_dimension] {
        if index >= count {
            return Err(PayloadError::DimensionOutOfRange { index, count });
        }
    }
    if buffer.is_empty() {
        return Err(PayloadError::EmptyInput);
    }
    let mut flat = Vec::with_capacity(buffer.num_points() * 2);
    for (x, y) in buffer.column(x_dimension).zip(buffer.column(y_dimension)) {
        flat.push(x);
        flat.push(y);
    }
    Ok(flat)
}

/// Pair an interleaved `x, y` buffer into a series.
pub fn pair_coordinates(flat: &[f64]) -> Result<Series, PayloadError> {
    if flat.is_empty() {
        return Err(PayloadError::EmptyInput);
    }
    if flat.len() % 2 != 0 {
        return Err(PayloadError::OddCoordinateBuffer(flat.len()));
    }
    Ok(flat
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("d{index}")).collect()
    }

    #[test]
    fn ragged_buffer_is_rejected() {
        let result = PointBuffer::new(vec![1.0, 2.0, 3.0], names(2));
        assert_eq!(
            result,
            Err(PayloadError::RaggedBuffer {
                values: 3,
                dimensions: 2
            })
        );
    }

    #[test]
    fn extracts_selected_columns() {
        let buffer = PointBuffer::from_rows(&[[1.0, 10.0, 100.0], [2.0, 20.0, 200.0]]).unwrap();
        assert_eq!(buffer.num_points(), 2);
        assert_eq!(buffer.value(1, 2), Some(200.0));
        assert_eq!(buffer.value(0, 3), None);
        let flat = extract_coordinates(&buffer, 2, 0).unwrap();
        assert_eq!(flat, vec![100.0, 1.0, 200.0, 2.0]);
    }

    #[test]
    fn extraction_needs_two_dimensions() {
        let buffer = PointBuffer::from_rows(&[[1.0], [2.0]]).unwrap();
        assert_eq!(
            extract_coordinates(&buffer, 0, 0),
            Err(PayloadError::TooFewDimensions(1))
        );
        let wide = PointBuffer::from_rows(&[[1.0, 2.0]]).unwrap();
        assert_eq!(
            extract_coordinates(&wide, 0, 5),
            Err(PayloadError::DimensionOutOfRange { index: 5, count: 2 })
        );
        let empty = PointBuffer::new(Vec::new(), names(2)).unwrap();
        assert_eq!(extract_coordinates(&empty, 0, 1), Err(PayloadError::EmptyInput));
    }

    #[test]
    fn pairing_rejects_bad_lengths() {
        assert_eq!(pair_coordinates(&[]), Err(PayloadError::EmptyInput));
        assert_eq!(
            pair_coordinates(&[1.0, 2.0, 3.0]),
            Err(PayloadError::OddCoordinateBuffer(3))
        );
        let series = pair_coordinates(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(series.points(), &[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn out_of_range_column_is_empty() {
        let buffer = PointBuffer::from_rows(&[[1.0, 2.0]]).unwrap();
        assert_eq!(buffer.column(7).count(), 0);
    }
}
