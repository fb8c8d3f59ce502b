//! Command definitions and execution for the `djset` CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use djset_core::{ComponentLabels, Partition, PartitionError, PartitionErrorCode};
use djset_providers_dense::{DensePointProvider, DenseProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::adjacency::parse_adjacency;

const DEFAULT_THRESHOLD: f32 = 1.0;
const FALLBACK_SOURCE_NAME: &str = "data_source";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "djset", about = "Partition elements into connected components.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Join points that lie within a Euclidean distance threshold.
    Cluster(ClusterCommand),
    /// Join elements listed in an adjacency file.
    Edges(EdgesCommand),
}

/// Options accepted by the `cluster` command.
#[derive(Debug, Args, Clone)]
pub struct ClusterCommand {
    /// Maximum distance at which two points are joined (inclusive).
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,

    /// Point source.
    #[command(subcommand)]
    pub source: ClusterSource,
}

/// Point sources accepted by `cluster`.
#[derive(Debug, Subcommand, Clone)]
pub enum ClusterSource {
    /// Read a Parquet column of `FixedSizeList<Float32, D>` points.
    Parquet(ParquetArgs),
}

/// Parquet point arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file.
    pub path: PathBuf,

    /// Column holding one point per row.
    #[arg(long)]
    pub column: String,

    /// Name reported for the data source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Options accepted by the `edges` command.
#[derive(Debug, Args, Clone)]
pub struct EdgesCommand {
    /// Number of elements; valid indices are `0..nodes`.
    #[arg(long)]
    pub nodes: usize,

    /// Adjacency file with one `source: neighbour ...` entry per line.
    pub path: PathBuf,

    /// Name reported for the data source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Loading points failed.
    #[error(transparent)]
    Dense(#[from] DenseProviderError),
    /// The partition rejected its input.
    #[error(transparent)]
    Core(#[from] PartitionError),
    /// An adjacency line could not be parsed.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        /// File containing the bad line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
}

impl CliError {
    /// Stable code of the underlying partition error, if any.
    #[must_use]
    pub fn code(&self) -> Option<PartitionErrorCode> {
        match self {
            Self::Core(err) | Self::Dense(DenseProviderError::Points(err)) => Some(err.code()),
            _ => None,
        }
    }
}

/// Outcome of a command: the source name and per-element labels.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the data source.
    pub data_source: String,
    /// Component label of every element.
    pub labels: ComponentLabels,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, parsing, or partitioning fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use djset_cli::cli::{Cli, Command, EdgesCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0: 1 2\n3: 4\n")?;
/// let cli = Cli {
///     command: Command::Edges(EdgesCommand {
///         nodes: 6,
///         path: file.path().to_path_buf(),
///         name: Some("graph".into()),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.labels.component_count(), 3);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let summary = match cli.command {
        Command::Cluster(command) => {
            span.record("command", "cluster");
            run_cluster(command)?
        }
        Command::Edges(command) => {
            span.record("command", "edges");
            run_edges(command)?
        }
    };
    info!(
        data_source = summary.data_source.as_str(),
        elements = summary.labels.len(),
        components = summary.labels.component_count(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.cluster",
    err,
    skip(command),
    fields(threshold = command.threshold, source = field::Empty),
)]
pub(super) fn run_cluster(command: ClusterCommand) -> Result<ExecutionSummary, CliError> {
    match command.source {
        ClusterSource::Parquet(args) => {
            Span::current().record("source", "parquet");
            cluster_parquet(args, command.threshold)
        }
    }
}

#[instrument(
    name = "cli.cluster_parquet",
    err,
    skip(args),
    fields(path = field::Empty, column = field::Empty, override_name = field::Empty),
)]
pub(super) fn cluster_parquet(
    args: ParquetArgs,
    threshold: f32,
) -> Result<ExecutionSummary, CliError> {
    let ParquetArgs { path, column, name } = args;
    record_source_fields(&path, name.as_deref());
    Span::current().record("column", field::display(&column));

    let data_source = derive_data_source_name(&path, name.as_deref());
    let provider = DensePointProvider::try_from_parquet_path(data_source, &path, &column)?;
    let mut partition = Partition::from_points(provider.points(), threshold)?;
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        labels: partition.labels(),
    })
}

#[instrument(
    name = "cli.edges",
    err,
    skip(command),
    fields(nodes = command.nodes, path = field::Empty, override_name = field::Empty, lines = field::Empty),
)]
pub(super) fn run_edges(command: EdgesCommand) -> Result<ExecutionSummary, CliError> {
    let EdgesCommand { nodes, path, name } = command;
    record_source_fields(&path, name.as_deref());

    let reader = open_reader(&path)?;
    let entries = parse_adjacency(reader, &path)?;
    Span::current().record("lines", entries.len());

    let mut partition = Partition::new(nodes);
    for entry in &entries {
        partition.add_edges(entry.source, &entry.neighbours)?;
    }
    Ok(ExecutionSummary {
        data_source: derive_data_source_name(&path, name.as_deref()),
        labels: partition.labels(),
    })
}

fn record_source_fields(path: &Path, override_name: Option<&str>) {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("override_name", override_name.unwrap_or("<derived>"));
}

#[instrument(name = "cli.open_reader", err, fields(path = %path.display()))]
pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| FALLBACK_SOURCE_NAME.to_owned(), ToOwned::to_owned)
}

/// Writes `summary` to `writer` as plain text: a header followed by one
/// `index<TAB>label` line per element.
///
/// # Errors
/// Returns [`io::Error`] if writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use djset_cli::cli::{ExecutionSummary, render_summary};
/// # use djset_core::Partition;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mut partition = Partition::new(3);
/// partition.unite(1, 2)?;
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     labels: partition.labels(),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "data source: demo\ncomponents: 2\n0\t0\n1\t1\n2\t1\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "components: {}", summary.labels.component_count())?;
    for (index, label) in summary.labels.assignments().iter().enumerate() {
        writeln!(writer, "{index}\t{}", label.get())?;
    }
    Ok(())
}
