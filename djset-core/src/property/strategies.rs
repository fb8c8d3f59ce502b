//! Strategy builders for partition property tests.
//!
//! Fixtures are generated from a proptest-chosen seed with [`SmallRng`], so
//! the same seed can be replayed from the rstest cases.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::PointMatrix;

use super::types::{EdgeFixture, EdgeLayout, PointFixture, PointLayout};

/// Upper bound for generated element counts.
const MAX_NODES: usize = 64;
/// Upper bound for generated point counts (the spatial build is quadratic).
const MAX_POINTS: usize = 48;
/// Upper bound for generated point dimensionality.
const MAX_DIMS: usize = 5;
/// Half-width of the hypercube points are sampled from.
const BOUND: f32 = 10.0;

pub(super) fn edge_fixture_strategy() -> impl Strategy<Value = EdgeFixture> {
    (any::<EdgeLayout>(), any::<u64>()).prop_map(|(layout, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_edges(layout, &mut rng)
    })
}

pub(super) fn point_fixture_strategy() -> impl Strategy<Value = PointFixture> {
    (any::<PointLayout>(), any::<u64>()).prop_map(|(layout, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_points(layout, &mut rng)
    })
}

pub(super) fn generate_edges(layout: EdgeLayout, rng: &mut SmallRng) -> EdgeFixture {
    let node_count = rng.gen_range(1..=MAX_NODES);
    let edges = match layout {
        EdgeLayout::Random => random_edges(node_count, rng),
        EdgeLayout::Islands => island_edges(node_count, rng),
        EdgeLayout::Star => star_edges(node_count, rng),
    };
    EdgeFixture {
        node_count,
        edges,
        layout,
    }
}

fn random_edges(node_count: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let probability: f64 = rng.gen_range(0.0..=0.15);
    let mut edges = Vec::new();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            if rng.gen_bool(probability) {
                // Randomise the orientation so unite sees both argument orders.
                if rng.gen_bool(0.5) {
                    edges.push((i, j));
                } else {
                    edges.push((j, i));
                }
            }
        }
    }
    edges
}

fn island_edges(node_count: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let islands = rng.gen_range(1..=node_count.min(5));
    let mut edges = Vec::new();
    for island in 0..islands {
        let members: Vec<usize> = (island..node_count).step_by(islands).collect();
        for pair in members.windows(2) {
            edges.push((pair[1], pair[0]));
        }
    }
    edges
}

fn star_edges(node_count: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    let hubs = rng.gen_range(1..=node_count.min(3));
    let mut edges = Vec::new();
    for _ in 0..hubs {
        let hub = rng.gen_range(0..node_count);
        let fan_out = rng.gen_range(0..=node_count);
        for _ in 0..fan_out {
            edges.push((hub, rng.gen_range(0..node_count)));
        }
    }
    edges
}

pub(super) fn generate_points(layout: PointLayout, rng: &mut SmallRng) -> PointFixture {
    let rows = rng.gen_range(0..=MAX_POINTS);
    let cols = rng.gen_range(1..=MAX_DIMS);
    let values = match layout {
        PointLayout::Uniform => uniform_values(rows * cols, rng),
        PointLayout::Clustered => clustered_values(rows, cols, rng),
        PointLayout::Duplicates => duplicated_values(rows, cols, rng),
    };
    let threshold = rng.gen_range(0.0..=BOUND / 2.0);
    let points = match PointMatrix::try_new(rows, cols, values) {
        Ok(points) => points,
        Err(err) => panic!("generated buffer must match its shape: {err}"),
    };
    PointFixture {
        points,
        threshold,
        layout,
    }
}

fn uniform_values(len: usize, rng: &mut SmallRng) -> Vec<f32> {
    (0..len).map(|_| rng.gen_range(-BOUND..BOUND)).collect()
}

fn clustered_values(rows: usize, cols: usize, rng: &mut SmallRng) -> Vec<f32> {
    let centre_count = rng.gen_range(1..=4);
    let centres: Vec<Vec<f32>> = (0..centre_count)
        .map(|_| uniform_values(cols, rng))
        .collect();
    let spread = rng.gen_range(0.05_f32..1.0);
    let mut values = Vec::with_capacity(rows * cols);
    for _ in 0..rows {
        let centre = &centres[rng.gen_range(0..centres.len())];
        values.extend(centre.iter().map(|&c| c + rng.gen_range(-spread..spread)));
    }
    values
}

fn duplicated_values(rows: usize, cols: usize, rng: &mut SmallRng) -> Vec<f32> {
    let mut values = uniform_values(rows * cols, rng);
    if rows < 2 {
        return values;
    }
    for _ in 0..rows / 3 {
        let source = rng.gen_range(0..rows);
        let target = rng.gen_range(0..rows);
        values.copy_within(source * cols..(source + 1) * cols, target * cols);
    }
    values
}
