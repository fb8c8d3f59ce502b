//! Disjoint-set partitions over dense element indices.
//!
//! [`Partition`] is a union-find forest with path compression and union by
//! rank. Besides explicit unions it can be built directly from a
//! [`PointMatrix`], joining every pair of points that lie within a Euclidean
//! distance threshold of each other.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod labels;
mod partition;
mod points;
mod spatial;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{PartitionError, PartitionErrorCode, Result},
    labels::{ComponentId, ComponentLabels},
    partition::Partition,
    points::PointMatrix,
};
