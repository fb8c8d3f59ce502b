//! Point provider backed by a dense [`PointMatrix`].
use std::{fs::File, path::Path};

use arrow_array::{Array, FixedSizeListArray, RecordBatchReader};
use djset_core::PointMatrix;
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use tracing::{debug, instrument};

use crate::errors::DenseProviderError;
use crate::ingest::{PointBuffer, field_dimension};

/// Named point set loaded from Arrow or Parquet.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array};
/// use arrow_schema::{DataType, Field};
/// use djset_providers_dense::DensePointProvider;
///
/// let values = Float32Array::from(vec![0.0_f32, 0.0, 3.0, 4.0]);
/// let item = Arc::new(Field::new("item", DataType::Float32, false));
/// let array = FixedSizeListArray::new(item, 2, Arc::new(values) as ArrayRef, None);
///
/// let provider = DensePointProvider::try_from_fixed_size_list("demo", &array)?;
/// assert_eq!(provider.name(), "demo");
/// assert_eq!(provider.points().shape(), (2, 2));
/// # Ok::<(), djset_providers_dense::DenseProviderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DensePointProvider {
    name: String,
    points: PointMatrix,
}

impl DensePointProvider {
    fn from_buffer(name: impl Into<String>, buffer: PointBuffer) -> Result<Self, DenseProviderError> {
        let (rows, dimension, values) = buffer.into_parts();
        Ok(Self {
            name: name.into(),
            points: PointMatrix::try_new(rows, dimension, values)?,
        })
    }

    /// Name of the data source, used in summaries and logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Loaded points, one row per list entry.
    #[must_use]
    pub fn points(&self) -> &PointMatrix {
        &self.points
    }

    /// Consumes the provider, returning its points.
    #[must_use]
    pub fn into_points(self) -> PointMatrix {
        self.points
    }

    /// Loads points from an Arrow [`FixedSizeListArray`] of `Float32`.
    ///
    /// # Errors
    /// Returns [`DenseProviderError`] when the child type is not `Float32`, a
    /// row or value is null, or the matrix size overflows.
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseProviderError> {
        let mut buffer = PointBuffer::default();
        buffer.append(array)?;
        Self::from_buffer(name, buffer)
    }

    /// Loads points from a Parquet file column of `FixedSizeList<Float32, D>`.
    ///
    /// # Errors
    /// Returns [`DenseProviderError::Io`] when the file cannot be opened, and
    /// otherwise the errors of [`Self::try_from_parquet_reader`].
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, DenseProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads points from any Parquet [`ChunkReader`], reading every record
    /// batch of `column`.
    ///
    /// # Errors
    /// Returns [`DenseProviderError`] when the column is missing, has the
    /// wrong or a nullable type, holds null data, or when batches disagree on
    /// the dimension.
    #[instrument(name = "dense.load_parquet", skip(name, reader), err)]
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, DenseProviderError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let batches = builder.with_projection(mask).build()?;
        let schema = batches.schema();
        let index = schema
            .index_of(column)
            .map_err(|_| DenseProviderError::ColumnNotFound {
                column: column.to_owned(),
            })?;
        let mut buffer = PointBuffer::with_dimension(field_dimension(schema.field(index), column)?);
        let mut batch_count = 0_usize;
        for batch in batches {
            let batch = batch?;
            let array = batch.column(index);
            let list = array
                .as_any()
                .downcast_ref::<FixedSizeListArray>()
                .ok_or_else(|| DenseProviderError::InvalidColumnType {
                    column: column.to_owned(),
                    actual: array.data_type().clone(),
                })?;
            buffer.append(list)?;
            batch_count += 1;
        }
        let provider = Self::from_buffer(name, buffer)?;
        debug!(
            rows = provider.points.rows(),
            dimension = provider.points.cols(),
            batches = batch_count,
            "loaded parquet points"
        );
        Ok(provider)
    }
}
