//! Oracle equivalence for explicit unions and spatial builds.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::Partition;

use super::oracle::{canonicalise_roots, component_minima, threshold_edges};
use super::types::{EdgeFixture, PointFixture};

/// Applies every edge with `unite` and compares connectivity with the BFS
/// oracle.
pub(super) fn run_union_equivalence_property(fixture: &EdgeFixture) -> TestCaseResult {
    let mut partition = Partition::new(fixture.node_count);
    for &(a, b) in &fixture.edges {
        partition
            .unite(a, b)
            .map_err(|err| TestCaseError::fail(format!("unite({a}, {b}) failed: {err}")))?;
    }
    compare_with_oracle(
        &mut partition,
        &component_minima(fixture.node_count, &fixture.edges),
        &format!("{:?} edges", fixture.layout),
    )
}

/// Builds a partition from points and compares it with the partition implied
/// by exhaustively computed threshold edges.
pub(super) fn run_spatial_equivalence_property(fixture: &PointFixture) -> TestCaseResult {
    let points = &fixture.points;
    let mut partition = Partition::from_points(points, fixture.threshold)
        .map_err(|err| TestCaseError::fail(format!("from_points failed: {err}")))?;

    let rows: Vec<&[f32]> = (0..points.rows()).filter_map(|i| points.row(i)).collect();
    let edges = threshold_edges(&rows, fixture.threshold);
    compare_with_oracle(
        &mut partition,
        &component_minima(points.rows(), &edges),
        &format!(
            "{:?} points, shape {:?}, threshold {}",
            fixture.layout,
            points.shape(),
            fixture.threshold
        ),
    )
}

/// Checks that splitting the edges into hub batches for `add_edges` yields
/// the same components as uniting them one by one.
pub(super) fn run_bulk_equivalence_property(fixture: &EdgeFixture) -> TestCaseResult {
    let mut pairwise = Partition::new(fixture.node_count);
    let mut bulk = Partition::new(fixture.node_count);
    let mut hubs: Vec<Vec<usize>> = vec![Vec::new(); fixture.node_count];
    for &(a, b) in &fixture.edges {
        pairwise
            .unite(a, b)
            .map_err(|err| TestCaseError::fail(format!("unite({a}, {b}) failed: {err}")))?;
        hubs[a].push(b);
    }
    for (hub, neighbours) in hubs.iter().enumerate() {
        bulk.add_edges_with_len(hub, neighbours, neighbours.len())
            .map_err(|err| TestCaseError::fail(format!("add_edges({hub}) failed: {err}")))?;
    }

    let expected = canonicalise_roots(&pairwise.ancestors());
    let actual = canonicalise_roots(&bulk.ancestors());
    if expected != actual || pairwise.component_count() != bulk.component_count() {
        return Err(TestCaseError::fail(format!(
            "bulk and pairwise unions disagree ({:?}): {actual:?} != {expected:?}",
            fixture.layout
        )));
    }
    Ok(())
}

fn compare_with_oracle(
    partition: &mut Partition,
    expected: &[usize],
    context: &str,
) -> TestCaseResult {
    let actual = canonicalise_roots(&partition.ancestors());
    if actual != expected {
        return Err(TestCaseError::fail(format!(
            "component labels differ from oracle ({context}): {actual:?} != {expected:?}"
        )));
    }
    let oracle_components = expected
        .iter()
        .enumerate()
        .filter(|&(node, &minimum)| node == minimum)
        .count();
    if partition.component_count() != oracle_components {
        return Err(TestCaseError::fail(format!(
            "component count {} differs from oracle {oracle_components} ({context})",
            partition.component_count()
        )));
    }
    Ok(())
}
