//! Loads dense `f32` point sets from Arrow and Parquet into a
//! [`djset_core::PointMatrix`].

mod errors;
mod ingest;
mod provider;

pub use errors::DenseProviderError;
pub use provider::DensePointProvider;
