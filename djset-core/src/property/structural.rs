//! Forest invariants that must hold after any sequence of unions.
//!
//! - The component count equals the number of distinct roots.
//! - Component sizes are positive and sum to the element count.
//! - Every member reports the size and rank of its root.
//! - Dense labels agree with the root ordering of `unique_ancestors`.
//! - Replaying every edge on the flattened forest changes nothing.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::Partition;

use super::types::EdgeFixture;

pub(super) fn run_structural_invariants_property(fixture: &EdgeFixture) -> TestCaseResult {
    let mut partition = Partition::new(fixture.node_count);
    let mut merges = 0_usize;
    for &(a, b) in &fixture.edges {
        let merged = partition
            .unite(a, b)
            .map_err(|err| TestCaseError::fail(format!("unite({a}, {b}) failed: {err}")))?;
        merges += usize::from(merged);
    }

    let n = fixture.node_count;
    check(
        partition.component_count() == n - merges,
        || format!("{merges} merges on {n} nodes left {} components", partition.component_count()),
    )?;

    let roots = partition.unique_ancestors();
    check(roots.len() == partition.component_count(), || {
        format!("{} roots for {} components", roots.len(), partition.component_count())
    })?;

    let mut total = 0;
    for &root in &roots {
        let size = component_size(&mut partition, root)?;
        check(size > 0, || format!("root {root} has empty component"))?;
        total += size;
    }
    check(total == n, || format!("sizes sum to {total}, expected {n}"))?;

    let ancestors = partition.ancestors();
    for node in 0..n {
        let root = ancestors[node];
        let node_size = component_size(&mut partition, node)?;
        let root_size = component_size(&mut partition, root)?;
        check(node_size == root_size, || {
            format!("node {node} reports size {node_size} but root {root} has {root_size}")
        })?;
    }

    let snapshot = partition.clone();
    for &(a, b) in &fixture.edges {
        let merged = partition
            .unite(a, b)
            .map_err(|err| TestCaseError::fail(format!("repeat unite({a}, {b}) failed: {err}")))?;
        check(!merged, || format!("repeat unite({a}, {b}) merged components"))?;
    }
    check(partition == snapshot, || {
        "replaying edges changed sizes, ranks or parents".to_owned()
    })?;

    let labels = partition.labels();
    check(labels.component_count() == roots.len(), || {
        format!("{} labels for {} roots", labels.component_count(), roots.len())
    })?;
    for (node, id) in labels.assignments().iter().enumerate() {
        let label = usize::try_from(id.get())
            .map_err(|err| TestCaseError::fail(format!("label overflow: {err}")))?;
        check(roots.get(label) == Some(&ancestors[node]), || {
            format!("node {node} has label {label} but root {}", ancestors[node])
        })?;
    }
    Ok(())
}

fn component_size(partition: &mut Partition, node: usize) -> Result<usize, TestCaseError> {
    partition
        .component_size(node)
        .map_err(|err| TestCaseError::fail(format!("component_size({node}) failed: {err}")))
}

fn check(condition: bool, message: impl FnOnce() -> String) -> TestCaseResult {
    if condition {
        Ok(())
    } else {
        Err(TestCaseError::fail(message()))
    }
}
