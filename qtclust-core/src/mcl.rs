//! External MCL graph-clustering backend.
//!
//! A drop-in alternate strategy sharing the `cluster`/`clusters` surface of
//! [`crate::QtClusterer`]: every pair within the quality threshold is written
//! as one `i<TAB>j<TAB>weight` line to a temporary edge file, the external
//! `mcl` executable is invoked on it, and its output file (one
//! whitespace-separated cluster per line) is parsed back. See
//! <https://micans.org/mcl/> for the executable.

use std::{
    env, fs,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process::Command,
    sync::Arc,
};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::{Result, calculator::DistanceCalculator, error::QtError};

/// Environment variable naming the MCL executable to invoke.
pub const MCL_COMMAND_ENV: &str = "MCL_COMMAND";

const DEFAULT_MCL_COMMAND: &str = "mcl";

/// Clusters instances by shelling out to the external MCL executable.
///
/// Every failure along the way (temp-file I/O, spawning the executable, a
/// non-zero exit status, an unparseable output file) surfaces as
/// [`QtError::External`] and is fatal to that call only.
#[derive(Debug)]
pub struct MclClusterer {
    instance_count: usize,
    command: PathBuf,
    clusters: Vec<Vec<usize>>,
}

impl MclClusterer {
    /// Creates a clusterer for `instance_count` instances.
    ///
    /// The executable defaults to `mcl` on the search path and can be
    /// overridden with the `MCL_COMMAND` environment variable.
    #[must_use]
    pub fn new(instance_count: usize) -> Self {
        let command = env::var_os(MCL_COMMAND_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_MCL_COMMAND), PathBuf::from);
        Self::with_command(instance_count, command)
    }

    /// Creates a clusterer invoking an explicit executable.
    pub fn with_command(instance_count: usize, command: impl Into<PathBuf>) -> Self {
        Self {
            instance_count,
            command: command.into(),
            clusters: Vec::new(),
        }
    }

    /// Builds a result directly from an existing MCL output stream, skipping
    /// the executable entirely.
    ///
    /// # Errors
    /// Returns [`QtError::External`] when the stream cannot be read or
    /// contains an unparseable instance index.
    ///
    /// # Examples
    /// ```
    /// use qtclust_core::MclClusterer;
    ///
    /// let clusterer = MclClusterer::from_output("0 2\n1\n".as_bytes())?;
    /// assert_eq!(clusterer.clusters(), vec![vec![0, 2], vec![1]]);
    /// # Ok::<(), qtclust_core::QtError>(())
    /// ```
    pub fn from_output(reader: impl BufRead) -> Result<Self> {
        let clusters = parse_output(reader)?;
        let instance_count = clusters.iter().map(Vec::len).sum();
        Ok(Self {
            instance_count,
            command: PathBuf::from(DEFAULT_MCL_COMMAND),
            clusters,
        })
    }

    /// Returns the number of instances this clusterer was created for.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    /// Runs one clustering pass through the external executable.
    ///
    /// # Errors
    /// Returns [`QtError::Calculator`] when the calculator fails while the
    /// edge file is written, and [`QtError::External`] for every backend
    /// failure.
    #[instrument(
        name = "mcl.cluster",
        err,
        skip(self, calculator),
        fields(
            calculator = %calculator.name(),
            instances = self.instance_count,
            threshold = quality_threshold,
        ),
    )]
    pub fn cluster<C>(
        &mut self,
        calculator: &mut C,
        quality_threshold: f64,
    ) -> Result<Vec<Vec<usize>>>
    where
        C: DistanceCalculator,
    {
        self.clusters.clear();

        let label: Arc<str> = Arc::from(calculator.name());
        calculator
            .initialize(self.instance_count)
            .map_err(|error| QtError::Calculator {
                calculator: Arc::clone(&label),
                error,
            })?;

        let mut input =
            NamedTempFile::new().map_err(|error| external("failed to create edge file", &error))?;
        {
            let mut writer = BufWriter::new(input.as_file_mut());
            write_edges(
                &mut writer,
                &*calculator,
                &label,
                self.instance_count,
                quality_threshold,
            )?;
            writer
                .flush()
                .map_err(|error| external("failed to write edge file", &error))?;
        }

        let output = NamedTempFile::new()
            .map_err(|error| external("failed to create output file", &error))?;

        debug!(command = %self.command.display(), "invoking external clustering process");
        let result = Command::new(&self.command)
            .arg(input.path())
            .arg("--abc")
            .arg("-o")
            .arg(output.path())
            .output()
            .map_err(|error| {
                external(
                    &format!("failed to launch `{}`", self.command.display()),
                    &error,
                )
            })?;
        if !result.status.success() {
            return Err(QtError::External {
                detail: format!(
                    "`{}` exited with {}",
                    self.command.display(),
                    result.status
                )
                .into(),
            });
        }

        self.clusters = parse_output_file(output.path())?;
        Ok(self.clusters())
    }

    /// Returns the most recent clustering result.
    #[must_use]
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        self.clusters.clone()
    }
}

impl crate::clusterer::Clusterer for MclClusterer {
    fn cluster<C>(
        &mut self,
        calculator: &mut C,
        quality_threshold: f64,
    ) -> Result<Vec<Vec<usize>>>
    where
        C: DistanceCalculator + Sync,
    {
        MclClusterer::cluster(self, calculator, quality_threshold)
    }

    fn clusters(&self) -> Vec<Vec<usize>> {
        MclClusterer::clusters(self)
    }
}

fn external(context: &str, error: &io::Error) -> QtError {
    QtError::External {
        detail: format!("{context}: {error}").into(),
    }
}

/// Writes the within-threshold pairs of the upper triangle, plus every self
/// pair, as `i<TAB>j<TAB>1.0` lines.
fn write_edges<C>(
    writer: &mut impl Write,
    calculator: &C,
    label: &Arc<str>,
    instance_count: usize,
    quality_threshold: f64,
) -> Result<()>
where
    C: DistanceCalculator + ?Sized,
{
    for i in 0..instance_count {
        // Starting from the diagonal avoids duplicate undirected edges; self
        // pairs keep isolated instances visible to the executable.
        for j in i..instance_count {
            let distance = calculator
                .distance(i, j)
                .map_err(|error| QtError::Calculator {
                    calculator: Arc::clone(label),
                    error,
                })?;
            if distance <= quality_threshold || i == j {
                writeln!(writer, "{i}\t{j}\t1.0")
                    .map_err(|error| external("failed to write edge file", &error))?;
            }
        }
    }
    Ok(())
}

fn parse_output_file(path: &Path) -> Result<Vec<Vec<usize>>> {
    let file =
        fs::File::open(path).map_err(|error| external("failed to open output file", &error))?;
    parse_output(BufReader::new(file))
}

/// Parses MCL output: one cluster of whitespace-separated instance indices
/// per non-empty, non-comment line.
fn parse_output(reader: impl BufRead) -> Result<Vec<Vec<usize>>> {
    let mut clusters = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|error| external("failed to read output file", &error))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut cluster = Vec::new();
        for token in trimmed.split_whitespace() {
            let index = token.parse::<usize>().map_err(|error| QtError::External {
                detail: format!(
                    "unparseable instance index `{token}` on output line {}: {error}",
                    line_number + 1
                )
                .into(),
            })?;
            cluster.push(index);
        }
        clusters.push(cluster);
    }
    Ok(clusters)
}
