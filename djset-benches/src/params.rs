//! Benchmark parameter types, rendered as Criterion parameter labels.

use std::fmt;

/// Parameters for a spatial-build benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct SpatialBenchParams {
    /// Number of points.
    pub point_count: usize,
    /// Dimensionality of each point.
    pub dimensions: usize,
    /// Distance threshold passed to the builder.
    pub threshold: f32,
}

impl fmt::Display for SpatialBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},d={},t={}",
            self.point_count, self.dimensions, self.threshold
        )
    }
}

/// Parameters for a bulk edge ingestion benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct EdgeBenchParams {
    /// Number of elements in the partition.
    pub node_count: usize,
    /// Neighbours listed per source element.
    pub degree: usize,
}

impl fmt::Display for EdgeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.node_count, self.degree)
    }
}
