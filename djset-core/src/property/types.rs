//! Fixture types shared by the partition property strategies.

use test_strategy::Arbitrary;

use crate::PointMatrix;

/// Shape of a generated edge list.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum EdgeLayout {
    /// Each pair is joined independently with a sampled probability.
    #[weight(3)]
    Random,
    /// A few disjoint chains with no edges between them.
    #[weight(2)]
    Islands,
    /// Hubs fan out to many neighbours, with repeated and reflexive edges.
    #[weight(1)]
    Star,
}

/// Spatial arrangement of generated points.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum PointLayout {
    /// Points sampled uniformly inside a hypercube.
    #[weight(3)]
    Uniform,
    /// Tight blobs around random centres.
    #[weight(3)]
    Clustered,
    /// Uniform points with exact duplicates mixed in.
    #[weight(1)]
    Duplicates,
}

/// Element count plus the unions to apply, in order.
#[derive(Clone, Debug)]
pub(super) struct EdgeFixture {
    pub node_count: usize,
    pub edges: Vec<(usize, usize)>,
    pub layout: EdgeLayout,
}

/// Point cloud and the threshold used to cluster it.
#[derive(Clone, Debug)]
pub(super) struct PointFixture {
    pub points: PointMatrix,
    pub threshold: f32,
    pub layout: PointLayout,
}
