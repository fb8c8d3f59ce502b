//! Benchmark support crate for djset.
//!
//! Provides seeded synthetic point sets and adjacency lists plus the
//! parameter types used by the Criterion benchmarks for the spatial builder
//! and bulk edge ingestion.

pub mod error;
pub mod params;
pub mod source;
