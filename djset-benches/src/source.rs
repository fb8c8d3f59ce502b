//! Seeded synthetic inputs for the benchmarks.
//!
//! Every generator is deterministic for a given seed so benchmark runs are
//! comparable across machines and commits.

use std::f32::consts::PI;

use djset_core::{PartitionError, PointMatrix};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors raised while generating synthetic inputs.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The requested point or node count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested dimension count was zero.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
    /// The requested cluster count was zero.
    #[error("cluster count must be greater than zero")]
    ZeroClusters,
    /// A float parameter was non-finite or non-positive.
    #[error("parameter `{parameter}` must be finite and positive")]
    InvalidFloatParameter {
        /// Name of the rejected parameter.
        parameter: &'static str,
    },
    /// The generated buffer could not be wrapped as a point matrix.
    #[error(transparent)]
    Points(#[from] PartitionError),
}

/// Uniform points in the unit hypercube.
#[derive(Clone, Debug)]
pub struct UniformConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each point.
    pub dimensions: usize,
    /// RNG seed.
    pub seed: u64,
}

/// Isotropic Gaussian blobs around uniformly placed centres.
#[derive(Clone, Debug)]
pub struct GaussianBlobConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each point.
    pub dimensions: usize,
    /// Number of blobs; points are assigned round-robin.
    pub cluster_count: usize,
    /// Side length of the hypercube the centres are drawn from.
    pub separation: f32,
    /// Standard deviation of each blob along every axis.
    pub spread: f32,
    /// RNG seed.
    pub seed: u64,
}

/// Random adjacency lists with a fixed out-degree.
#[derive(Clone, Debug)]
pub struct AdjacencyConfig {
    /// Number of elements.
    pub node_count: usize,
    /// Neighbours listed for each element.
    pub degree: usize,
    /// RNG seed.
    pub seed: u64,
}

/// Generates uniform points in `[0, 1)^d`.
///
/// # Errors
/// Returns [`SyntheticError`] when the point or dimension count is zero or
/// their product overflows.
pub fn uniform_points(config: &UniformConfig) -> Result<PointMatrix, SyntheticError> {
    validate_shape(config.point_count, config.dimensions)?;
    let len = buffer_len(config.point_count, config.dimensions)?;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let values = (0..len)
        .map(|_| rng.gen_range(0.0_f32..1.0))
        .collect();
    Ok(PointMatrix::try_new(
        config.point_count,
        config.dimensions,
        values,
    )?)
}

/// Generates Gaussian blobs and returns them with the blob index of each
/// point.
///
/// # Errors
/// Returns [`SyntheticError`] when a count is zero, the buffer size
/// overflows, or `separation`/`spread` is not finite and positive.
pub fn gaussian_blobs(
    config: &GaussianBlobConfig,
) -> Result<(PointMatrix, Vec<usize>), SyntheticError> {
    validate_shape(config.point_count, config.dimensions)?;
    if config.cluster_count == 0 {
        return Err(SyntheticError::ZeroClusters);
    }
    validate_positive(config.separation, "separation")?;
    validate_positive(config.spread, "spread")?;
    let len = buffer_len(config.point_count, config.dimensions)?;

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let centres: Vec<Vec<f32>> = (0..config.cluster_count)
        .map(|_| {
            (0..config.dimensions)
                .map(|_| rng.gen_range(0.0..config.separation))
                .collect()
        })
        .collect();

    let mut values = Vec::with_capacity(len);
    let mut labels = Vec::with_capacity(config.point_count);
    for (index, centre) in centres.iter().cycle().take(config.point_count).enumerate() {
        labels.push(index % config.cluster_count);
        for &coordinate in centre {
            values.push(coordinate + standard_normal_sample(&mut rng) * config.spread);
        }
    }
    let points = PointMatrix::try_new(config.point_count, config.dimensions, values)?;
    Ok((points, labels))
}

/// Generates one `(source, neighbours)` entry per element with
/// `config.degree` random neighbours each.
///
/// # Errors
/// Returns [`SyntheticError::ZeroPoints`] when `node_count` is zero.
pub fn random_adjacency(
    config: &AdjacencyConfig,
) -> Result<Vec<(usize, Vec<usize>)>, SyntheticError> {
    if config.node_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);
    Ok((0..config.node_count)
        .map(|source| {
            let neighbours = (0..config.degree)
                .map(|_| rng.gen_range(0..config.node_count))
                .collect();
            (source, neighbours)
        })
        .collect())
}

/// Box-Muller sample from the standard normal distribution.
fn standard_normal_sample(rng: &mut SmallRng) -> f32 {
    let u1 = rng.gen_range(f32::EPSILON..1.0);
    let u2 = rng.gen_range(0.0_f32..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

const fn validate_shape(point_count: usize, dimensions: usize) -> Result<(), SyntheticError> {
    if point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if dimensions == 0 {
        return Err(SyntheticError::ZeroDimensions);
    }
    Ok(())
}

fn buffer_len(point_count: usize, dimensions: usize) -> Result<usize, SyntheticError> {
    point_count
        .checked_mul(dimensions)
        .ok_or(SyntheticError::Points(PartitionError::CapacityOverflow {
            rows: point_count,
            cols: dimensions,
        }))
}

fn validate_positive(value: f32, parameter: &'static str) -> Result<(), SyntheticError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SyntheticError::InvalidFloatParameter { parameter })
    }
}
