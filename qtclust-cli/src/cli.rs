//! Command-line interface orchestration for qtclust.
//!
//! The CLI offers a `run` command that loads either a numeric value file or
//! a line-based UTF-8 text corpus and executes one QT clustering pass.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use qtclust_core::{
    DistanceCalculator, ExecutionStrategy, OverlapPolicy, QtClustererBuilder, QtError,
};
use qtclust_providers_text::{TextCalculator, TextMetric, TextProviderError};
use qtclust_providers_values::{ValueCalculator, ValueProviderError};
use thiserror::Error;
use tracing::info;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "qtclust", about = "Quality-threshold clustering over simple datasets.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run one clustering pass and print the clusters.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Quality threshold: the maximum linkage distance a cluster may span.
    #[arg(long, short = 't')]
    pub threshold: f64,

    /// Worker threads for the parallel engine (defaults to all cores).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Engine to run the candidate-growth loop on.
    #[arg(long, value_enum, default_value = "parallel")]
    pub strategy: StrategyArg,

    /// Allow clusters to share instances.
    #[arg(long)]
    pub allow_overlap: bool,

    /// Data source configuration.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Input data sources supported by the CLI.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Cluster a file with one numeric value per line.
    Values(ValuesArgs),
    /// Cluster a UTF-8 text file, one instance per line.
    Text(TextArgs),
}

/// Value-file ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ValuesArgs {
    /// Path to the file containing one value per line.
    pub path: PathBuf,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Text ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct TextArgs {
    /// Path to a UTF-8 text file with one string per line.
    pub path: PathBuf,

    /// Distance metric to use when comparing lines.
    #[arg(long, value_enum, default_value = "length")]
    pub metric: MetricArg,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Engine selection flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Single-threaded reference engine.
    Sequential,
    /// Worker-pool engine.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Supported text metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Compare lines by character count.
    Length,
    /// Compute Levenshtein edit distance between lines.
    Levenshtein,
}

impl From<MetricArg> for TextMetric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Length => Self::Length,
            MetricArg::Levenshtein => Self::Levenshtein,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input source.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Value-file ingestion failed.
    #[error(transparent)]
    Values(#[from] ValueProviderError),
    /// Text ingestion failed.
    #[error(transparent)]
    Text(#[from] TextProviderError),
    /// Core clustering failed.
    #[error(transparent)]
    Core(#[from] QtError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Name of the clustered data source.
    pub source: String,
    /// Number of instances in the source.
    pub instances: usize,
    /// Quality threshold the pass ran with.
    pub threshold: f64,
    /// Final clusters in promotion order.
    pub clusters: Vec<Vec<usize>>,
}

/// Executes the parsed command.
///
/// # Errors
/// Returns [`CliError`] when the input cannot be loaded or clustering fails.
pub fn run_cli(cli: Cli) -> Result<RunSummary, CliError> {
    match cli.command {
        Command::Run(command) => run(command),
    }
}

fn run(command: RunCommand) -> Result<RunSummary, CliError> {
    match &command.source {
        RunSource::Values(args) => {
            let reader = open(&args.path)?;
            let calculator = ValueCalculator::from_lines(
                source_name(args.name.as_deref(), &args.path),
                reader,
            )?;
            let instances = calculator.len();
            cluster(command.clone(), calculator, instances)
        }
        RunSource::Text(args) => {
            let reader = open(&args.path)?;
            let calculator = TextCalculator::from_lines(
                source_name(args.name.as_deref(), &args.path),
                reader,
                args.metric.into(),
            )?;
            let instances = calculator.len();
            cluster(command.clone(), calculator, instances)
        }
    }
}

fn cluster<C>(
    command: RunCommand,
    mut calculator: C,
    instances: usize,
) -> Result<RunSummary, CliError>
where
    C: DistanceCalculator + Sync,
{
    let mut builder = QtClustererBuilder::new(instances)
        .with_execution_strategy(command.strategy.into())
        .with_overlap_policy(if command.allow_overlap {
            OverlapPolicy::Allow
        } else {
            OverlapPolicy::Disallow
        });
    if let Some(threads) = command.threads {
        builder = builder.with_threads(threads);
    }

    let mut clusterer = builder.build()?;
    let clusters = clusterer.cluster(&mut calculator, command.threshold)?;
    info!(
        source = calculator.name(),
        instances,
        clusters = clusters.len(),
        "clustering completed"
    );

    Ok(RunSummary {
        source: calculator.name().to_owned(),
        instances,
        threshold: command.threshold,
        clusters,
    })
}

fn open(path: &Path) -> Result<BufReader<File>, CliError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn source_name(name: Option<&str>, path: &Path) -> String {
    name.map(str::to_owned).unwrap_or_else(|| {
        path.file_name()
            .map_or_else(|| path.display().to_string(), |file| {
                file.to_string_lossy().into_owned()
            })
    })
}

/// Renders the summary as one header line plus one line per cluster.
///
/// # Errors
/// Returns any I/O error raised by the writer.
pub fn render_summary(summary: &RunSummary, writer: &mut impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "{}: {} instances, {} clusters at threshold {}",
        summary.source,
        summary.instances,
        summary.clusters.len(),
        summary.threshold
    )?;
    for (index, cluster) in summary.clusters.iter().enumerate() {
        write!(writer, "cluster {index} ({}):", cluster.len())?;
        for instance in cluster {
            write!(writer, " {instance}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
