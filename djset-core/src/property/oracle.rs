//! Breadth-first-search connectivity oracle.
//!
//! Labels each element by the smallest index reachable from it, which is a
//! canonical labelling independent of how the forest was built.

use std::collections::VecDeque;

/// Returns, for every element, the minimum element index in its connected
/// component under the undirected `edges`.
pub(super) fn component_minima(node_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut adjacency = vec![Vec::new(); node_count];
    for &(a, b) in edges {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut minima = vec![usize::MAX; node_count];
    let mut queue = VecDeque::new();
    for start in 0..node_count {
        if minima[start] != usize::MAX {
            continue;
        }
        // Visiting in ascending order means `start` is the component minimum.
        minima[start] = start;
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            for &next in &adjacency[node] {
                if minima[next] == usize::MAX {
                    minima[next] = start;
                    queue.push_back(next);
                }
            }
        }
    }
    minima
}

/// Every pair `(i, j)` with `i < j` whose squared distance is at most
/// `threshold²`, computed without early exit.
pub(super) fn threshold_edges(rows: &[&[f32]], threshold: f32) -> Vec<(usize, usize)> {
    let limit = f64::from(threshold) * f64::from(threshold);
    let mut edges = Vec::new();
    for (i, left) in rows.iter().enumerate() {
        for (j, right) in rows.iter().enumerate().skip(i + 1) {
            let squared: f64 = left
                .iter()
                .zip(right.iter())
                .map(|(&l, &r)| {
                    let diff = f64::from(l) - f64::from(r);
                    diff * diff
                })
                .sum();
            if squared <= limit {
                edges.push((i, j));
            }
        }
    }
    edges
}

/// Rewrites root-based labels into component-minimum labels so they can be
/// compared with [`component_minima`].
pub(super) fn canonicalise_roots(roots: &[usize]) -> Vec<usize> {
    let mut minimum_of_root = vec![usize::MAX; roots.len()];
    for (node, &root) in roots.iter().enumerate() {
        minimum_of_root[root] = minimum_of_root[root].min(node);
    }
    roots.iter().map(|&root| minimum_of_root[root]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minima_of_disjoint_paths() {
        let minima = component_minima(6, &[(4, 1), (1, 5), (2, 3)]);
        assert_eq!(minima, vec![0, 1, 2, 2, 1, 1]);
    }

    #[test]
    fn minima_without_edges_are_identity() {
        assert_eq!(component_minima(3, &[]), vec![0, 1, 2]);
    }

    #[test]
    fn threshold_edges_include_boundary() {
        let rows: [&[f32]; 3] = [&[0.0], &[1.0], &[3.0]];
        assert_eq!(threshold_edges(&rows, 1.0), vec![(0, 1)]);
        assert_eq!(threshold_edges(&rows, 2.0), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn canonical_roots_use_smallest_member() {
        assert_eq!(canonicalise_roots(&[3, 3, 2, 3]), vec![0, 0, 2, 0]);
    }
}
