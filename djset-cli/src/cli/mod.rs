//! Command-line interface for building partitions.
//!
//! `cluster` loads points from Parquet and joins those within a distance
//! threshold; `edges` applies an adjacency list to a fixed set of elements.
//! Both print the resulting component labels.

mod adjacency;
mod commands;

pub use adjacency::{AdjacencyEntry, parse_adjacency};
pub use commands::{
    Cli, CliError, ClusterCommand, ClusterSource, Command, EdgesCommand, ExecutionSummary,
    ParquetArgs, render_summary, run_cli,
};
