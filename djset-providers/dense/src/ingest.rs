//! Accumulates `FixedSizeList<Float32, D>` batches into one row-major buffer.
use arrow_array::{Array, FixedSizeListArray, Float32Array};
use arrow_schema::{DataType, Field};

use crate::errors::DenseProviderError;

/// Reads the point dimension from a schema field, rejecting nullable lists
/// and non-`Float32` children.
pub(crate) fn field_dimension(field: &Field, column: &str) -> Result<usize, DenseProviderError> {
    let DataType::FixedSizeList(child, width) = field.data_type() else {
        return Err(DenseProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: field.data_type().clone(),
        });
    };
    if field.is_nullable() || child.is_nullable() {
        return Err(DenseProviderError::NullableField {
            column: column.to_owned(),
            nullable_child: child.is_nullable(),
        });
    }
    if child.data_type() != &DataType::Float32 {
        return Err(DenseProviderError::InvalidListValueType {
            actual: child.data_type().clone(),
        });
    }
    list_width(*width)
}

fn list_width(width: i32) -> Result<usize, DenseProviderError> {
    match usize::try_from(width) {
        Ok(dimension) if dimension > 0 => Ok(dimension),
        _ => Err(DenseProviderError::InvalidDimension { actual: width }),
    }
}

/// Row-major coordinates gathered across one or more list arrays.
#[derive(Debug, Default)]
pub(crate) struct PointBuffer {
    values: Vec<f32>,
    rows: usize,
    dimension: Option<usize>,
}

impl PointBuffer {
    /// Starts a buffer whose batches must all have `dimension` columns.
    pub(crate) fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: Some(dimension),
            ..Self::default()
        }
    }

    /// Appends every row of `array`, numbering errors from the rows already
    /// buffered.
    pub(crate) fn append(&mut self, array: &FixedSizeListArray) -> Result<(), DenseProviderError> {
        let value_type = array.value_type();
        if value_type != DataType::Float32 {
            return Err(DenseProviderError::InvalidListValueType { actual: value_type });
        }
        let dimension = list_width(array.value_length())?;
        match self.dimension {
            Some(expected) if expected != dimension => {
                return Err(DenseProviderError::InconsistentBatchDimension {
                    expected,
                    actual: dimension,
                });
            }
            Some(_) => {}
            None => self.dimension = Some(dimension),
        }

        let batch_rows = array.len();
        let additional = batch_rows
            .checked_mul(dimension)
            .ok_or(DenseProviderError::CapacityOverflow {
                rows: batch_rows,
                dimension,
            })?;
        self.values.reserve(additional);
        for index in 0..batch_rows {
            let row = self.rows + index;
            if array.is_null(index) {
                return Err(DenseProviderError::NullRow { row });
            }
            let list = array.value(index);
            let coords = list.as_any().downcast_ref::<Float32Array>().ok_or_else(|| {
                DenseProviderError::InvalidListValueType {
                    actual: list.data_type().clone(),
                }
            })?;
            if coords.len() != dimension {
                return Err(DenseProviderError::InvalidRowLength {
                    row,
                    expected: dimension,
                    actual: coords.len(),
                });
            }
            if coords.null_count() > 0
                && let Some(value_index) = (0..dimension).find(|&i| coords.is_null(i))
            {
                return Err(DenseProviderError::NullValue { row, value_index });
            }
            self.values.extend_from_slice(coords.values());
        }
        self.rows += batch_rows;
        Ok(())
    }

    /// Returns `(rows, dimension, values)`; the dimension is zero when no
    /// batch fixed it.
    pub(crate) fn into_parts(self) -> (usize, usize, Vec<f32>) {
        (self.rows, self.dimension.unwrap_or(0), self.values)
    }
}
