//! Threshold clustering of points by brute-force pairwise distance.
//!
//! Two points are joined when their Euclidean distance is at most the
//! threshold. Distances are compared squared, accumulated one dimension at a
//! time in `f64`, and a pair is abandoned as soon as the running sum passes
//! `threshold²`. No spatial index is built: every unordered pair is visited.
//!
//! With the `parallel` feature the per-row neighbour scans run on the rayon
//! pool; merges are still applied in `(i, j)` order, so the resulting forest
//! matches the sequential build exactly.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    error::{PartitionError, Result},
    partition::Partition,
    points::{PointMatrix, check_buffer_len},
};

impl Partition {
    /// Builds a partition from `points`, joining every pair of rows whose
    /// Euclidean distance is at most `threshold`.
    ///
    /// An empty matrix produces an empty partition.
    ///
    /// # Errors
    /// Returns [`PartitionError::InvalidThreshold`] if `threshold` is NaN or
    /// negative.
    ///
    /// # Examples
    /// ```
    /// use djset_core::{Partition, PointMatrix};
    ///
    /// let points = PointMatrix::try_from_rows(vec![vec![0.0], vec![1.0], vec![3.0]])?;
    /// let mut partition = Partition::from_points(&points, 1.5)?;
    /// assert_eq!(partition.component_count(), 2);
    /// assert!(partition.connected(0, 1)?);
    /// assert!(!partition.connected(1, 2)?);
    /// # Ok::<(), djset_core::PartitionError>(())
    /// ```
    #[instrument(
        name = "partition.from_points",
        skip(points),
        fields(rows = points.rows(), cols = points.cols()),
        err
    )]
    pub fn from_points(points: &PointMatrix, threshold: f32) -> Result<Self> {
        build(points.data(), points.rows(), points.cols(), threshold)
    }

    /// Like [`Self::from_points`], but first checks that `points` has the
    /// declared `(rows, cols)` shape.
    ///
    /// # Errors
    /// Returns [`PartitionError::ShapeMismatch`] when the shapes disagree and
    /// [`PartitionError::InvalidThreshold`] for a NaN or negative threshold.
    pub fn from_points_with_shape(
        points: &PointMatrix,
        rows: usize,
        cols: usize,
        threshold: f32,
    ) -> Result<Self> {
        if points.shape() != (rows, cols) {
            return Err(PartitionError::ShapeMismatch {
                expected_rows: rows,
                expected_cols: cols,
                rows: points.rows(),
                cols: points.cols(),
            });
        }
        Self::from_points(points, threshold)
    }

    /// Builds a partition from a borrowed row-major buffer of `rows` points
    /// with `cols` coordinates each.
    ///
    /// # Errors
    /// Returns [`PartitionError::ShapeMismatch`] when `values.len()` is not
    /// `rows * cols`, [`PartitionError::CapacityOverflow`] when that product
    /// overflows, and [`PartitionError::InvalidThreshold`] for a NaN or
    /// negative threshold.
    #[instrument(name = "partition.from_flat", skip(values), err)]
    pub fn from_flat(values: &[f32], rows: usize, cols: usize, threshold: f32) -> Result<Self> {
        check_buffer_len(rows, cols, values.len())?;
        build(values, rows, cols, threshold)
    }
}

fn build(values: &[f32], rows: usize, cols: usize, threshold: f32) -> Result<Partition> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(PartitionError::InvalidThreshold { got: threshold });
    }
    let limit = f64::from(threshold) * f64::from(threshold);
    let points = row_slices(values, rows, cols);
    let mut partition = Partition::new(rows);
    let stats = unite_within(&mut partition, &points, limit);
    debug!(
        pairs = stats.pairs,
        unions = stats.unions,
        early_exits = stats.early_exits,
        components = partition.component_count(),
        "spatial build complete"
    );
    Ok(partition)
}

fn row_slices(values: &[f32], rows: usize, cols: usize) -> Vec<&[f32]> {
    if cols == 0 {
        return vec![&[][..]; rows];
    }
    values.chunks_exact(cols).take(rows).collect()
}

/// Outcome of comparing one pair of points against the squared threshold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Proximity {
    /// Squared distance is at most the limit.
    Within,
    /// Every dimension was accumulated and the sum exceeds the limit.
    Beyond,
    /// The partial sum exceeded the limit before the last dimension.
    EarlyExit,
}

pub(crate) fn proximity(left: &[f32], right: &[f32], limit: f64) -> Proximity {
    let last = left.len().saturating_sub(1);
    let mut sum = 0.0_f64;
    for (index, (&l, &r)) in left.iter().zip(right).enumerate() {
        let diff = f64::from(l) - f64::from(r);
        sum += diff * diff;
        if sum > limit {
            return if index < last {
                Proximity::EarlyExit
            } else {
                Proximity::Beyond
            };
        }
    }
    // NaN coordinates leave `sum` as NaN, which fails this comparison.
    if sum <= limit {
        Proximity::Within
    } else {
        Proximity::Beyond
    }
}

#[derive(Debug, Default)]
struct RowScan {
    neighbours: Vec<usize>,
    pairs: u64,
    early_exits: u64,
}

impl RowScan {
    /// Compares row `index` with every later row.
    fn collect(points: &[&[f32]], index: usize, limit: f64) -> Self {
        let mut scan = Self::default();
        let Some((left, rest)) = points.get(index..).and_then(<[_]>::split_first) else {
            return scan;
        };
        for (offset, right) in rest.iter().enumerate() {
            scan.pairs += 1;
            match proximity(left, right, limit) {
                Proximity::Within => scan.neighbours.push(index + 1 + offset),
                Proximity::EarlyExit => scan.early_exits += 1,
                Proximity::Beyond => {}
            }
        }
        scan
    }
}

#[derive(Debug, Default)]
struct SpatialStats {
    pairs: u64,
    unions: usize,
    early_exits: u64,
}

impl SpatialStats {
    fn apply(&mut self, partition: &mut Partition, index: usize, scan: RowScan) {
        self.pairs += scan.pairs;
        self.early_exits += scan.early_exits;
        for neighbour in scan.neighbours {
            if partition.merge(index, neighbour) {
                self.unions += 1;
            }
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn unite_within(partition: &mut Partition, points: &[&[f32]], limit: f64) -> SpatialStats {
    let mut stats = SpatialStats::default();
    for index in 0..points.len() {
        let scan = RowScan::collect(points, index, limit);
        stats.apply(partition, index, scan);
    }
    stats
}

#[cfg(feature = "parallel")]
fn unite_within(partition: &mut Partition, points: &[&[f32]], limit: f64) -> SpatialStats {
    let scans: Vec<RowScan> = (0..points.len())
        .into_par_iter()
        .map(|index| RowScan::collect(points, index, limit))
        .collect();
    let mut stats = SpatialStats::default();
    for (index, scan) in scans.into_iter().enumerate() {
        stats.apply(partition, index, scan);
    }
    stats
}
