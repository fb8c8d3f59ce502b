use arrow_schema::{ArrowError, DataType};
use djset_core::PartitionError;
use thiserror::Error;

/// Failures raised while loading a point column.
#[derive(Debug, Error)]
pub enum DenseProviderError {
    /// The requested column is absent from the file schema.
    #[error("point column `{column}` is missing from the Parquet schema")]
    ColumnNotFound { column: String },
    /// The column is not a fixed-size list.
    #[error("point column `{column}` has type {actual:?}; expected FixedSizeList<Float32, D>")]
    InvalidColumnType { column: String, actual: DataType },
    /// The list child is not `Float32`.
    #[error("point coordinates must be Float32, found {actual:?}")]
    InvalidListValueType { actual: DataType },
    /// The list width is not positive.
    #[error("point dimension must be positive, found {actual}")]
    InvalidDimension { actual: i32 },
    /// The column or its child field admits nulls.
    #[error(
        "column `{column}` must not be nullable (nullable child values: {nullable_child})"
    )]
    NullableField { column: String, nullable_child: bool },
    #[error("point {row} is null")]
    NullRow { row: usize },
    #[error("point {row} has a null coordinate at index {value_index}")]
    NullValue { row: usize, value_index: usize },
    #[error("point {row} has {actual} coordinates; expected {expected}")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{rows} points of dimension {dimension} do not fit in memory")]
    CapacityOverflow { rows: usize, dimension: usize },
    /// A later record batch disagrees with the first batch's dimension.
    #[error("record batch has dimension {actual}; earlier batches had {expected}")]
    InconsistentBatchDimension { expected: usize, actual: usize },
    #[error("loaded values do not form a point matrix: {0}")]
    Points(#[from] PartitionError),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
