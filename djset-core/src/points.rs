//! Row-major point storage consumed by the spatial builder.

use crate::error::{PartitionError, Result};

/// Dense `rows x cols` matrix of `f32` coordinates stored row-major in a
/// single contiguous buffer.
///
/// Each row is one point; each column is one spatial (or feature) dimension.
///
/// # Examples
/// ```
/// use djset_core::PointMatrix;
///
/// let points = PointMatrix::try_new(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])?;
/// assert_eq!(points.shape(), (2, 3));
/// assert_eq!(points.row(1), Some(&[3.0, 4.0, 5.0][..]));
/// # Ok::<(), djset_core::PartitionError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl PointMatrix {
    /// Wraps a row-major buffer holding `rows * cols` values.
    ///
    /// # Errors
    /// Returns [`PartitionError::CapacityOverflow`] when `rows * cols`
    /// overflows and [`PartitionError::ShapeMismatch`] when `values` does not
    /// hold exactly `rows * cols` entries.
    pub fn try_new(rows: usize, cols: usize, values: Vec<f32>) -> Result<Self> {
        check_buffer_len(rows, cols, values.len())?;
        Ok(Self { rows, cols, values })
    }

    /// Builds a matrix from nested rows, inferring the shape from the input.
    ///
    /// An empty input yields an empty `0 x 0` matrix.
    ///
    /// # Errors
    /// Returns [`PartitionError::RaggedRows`] if any row differs in length
    /// from the first.
    ///
    /// # Examples
    /// ```
    /// use djset_core::{PartitionError, PointMatrix};
    ///
    /// let points = PointMatrix::try_from_rows(vec![vec![0.0], vec![1.0], vec![3.0]])?;
    /// assert_eq!(points.shape(), (3, 1));
    ///
    /// let err = PointMatrix::try_from_rows(vec![vec![0.0], vec![1.0, 2.0]]);
    /// assert!(matches!(err, Err(PartitionError::RaggedRows { row: 1, .. })));
    /// # Ok::<(), PartitionError>(())
    /// ```
    pub fn try_from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let cols = first.len();
        let row_count = rows.len();
        let total = row_count
            .checked_mul(cols)
            .ok_or(PartitionError::CapacityOverflow {
                rows: row_count,
                cols,
            })?;
        let mut values = Vec::with_capacity(total);
        for (row, coords) in rows.into_iter().enumerate() {
            if coords.len() != cols {
                return Err(PartitionError::RaggedRows {
                    row,
                    expected: cols,
                    actual: coords.len(),
                });
            }
            values.extend(coords);
        }
        Ok(Self {
            rows: row_count,
            cols,
            values,
        })
    }

    /// Number of points.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of dimensions per point.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns `true` when the matrix holds no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the underlying row-major buffer.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.values
    }

    /// Returns the coordinates of point `index`, or `None` if out of range.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        if index >= self.rows {
            return None;
        }
        let start = index.checked_mul(self.cols)?;
        let end = start.checked_add(self.cols)?;
        self.values.get(start..end)
    }

    /// Consumes the matrix, returning the row-major buffer.
    #[must_use]
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

/// Checks that a row-major buffer of `len` values holds exactly `rows` points
/// of `cols` dimensions.
pub(crate) fn check_buffer_len(rows: usize, cols: usize, len: usize) -> Result<()> {
    let expected = rows
        .checked_mul(cols)
        .ok_or(PartitionError::CapacityOverflow { rows, cols })?;
    if len == expected {
        return Ok(());
    }
    let (actual_rows, actual_cols) = infer_shape(len, cols);
    Err(PartitionError::ShapeMismatch {
        expected_rows: rows,
        expected_cols: cols,
        rows: actual_rows,
        cols: actual_cols,
    })
}

/// Best-effort shape of a buffer of `len` values read with `cols` columns,
/// used only to report what a mismatching buffer looks like.
fn infer_shape(len: usize, cols: usize) -> (usize, usize) {
    match len.checked_div(cols) {
        Some(rows) if rows.saturating_mul(cols) == len => (rows, cols),
        _ => (1, len),
    }
}
