//! Builders for in-memory Arrow arrays and Parquet payloads.
use super::DenseProviderError;
use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::sync::Arc;

pub(crate) const COLUMN: &str = "points";

fn width(dimension: usize) -> i32 {
    i32::try_from(dimension).expect("dimension fits in i32")
}

pub(crate) fn list_array(rows: &[&[f32]], dimension: usize) -> FixedSizeListArray {
    assert!(rows.iter().all(|row| row.len() == dimension));
    let values = Float32Array::from_iter_values(rows.iter().flat_map(|row| row.iter().copied()));
    FixedSizeListArray::new(
        Arc::new(Field::new("item", DataType::Float32, false)),
        width(dimension),
        Arc::new(values) as ArrayRef,
        None,
    )
}

pub(crate) fn points_field(dimension: usize, child_nullable: bool, list_nullable: bool) -> Field {
    Field::new(
        COLUMN,
        DataType::FixedSizeList(
            Arc::new(Field::new("item", DataType::Float32, child_nullable)),
            width(dimension),
        ),
        list_nullable,
    )
}

/// Writes each array as its own record batch under a single schema.
pub(crate) fn parquet_bytes(field: Field, batches: Vec<ArrayRef>) -> Bytes {
    let schema = Arc::new(Schema::new(vec![field]));
    let mut buffer = Vec::new();
    {
        let mut writer =
            ArrowWriter::try_new(&mut buffer, Arc::clone(&schema), None).expect("writer");
        for column in batches {
            let batch = RecordBatch::try_new(Arc::clone(&schema), vec![column]).expect("batch");
            writer.write(&batch).expect("write");
        }
        writer.close().expect("close");
    }
    Bytes::from(buffer)
}

pub(crate) fn parquet_points(rows: &[&[f32]], dimension: usize) -> Bytes {
    let array = list_array(rows, dimension);
    parquet_bytes(points_field(dimension, false, false), vec![Arc::new(array)])
}

pub(crate) fn load(bytes: Bytes, column: &str) -> Result<super::DensePointProvider, DenseProviderError> {
    super::DensePointProvider::try_from_parquet_reader("fixture", bytes, column)
}
