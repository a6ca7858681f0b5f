//! Text provider: line-based string distances for qtclust.

use std::io::BufRead;

use qtclust_core::{DistanceCalculator, DistanceError};
use thiserror::Error;

/// Errors raised while loading a text dataset.
#[derive(Debug, Error)]
pub enum TextProviderError {
    /// Reading the underlying source failed.
    #[error("failed to read lines: {source}")]
    Io {
        /// Underlying I/O failure.
        #[from]
        source: std::io::Error,
    },
}

/// Distance metric applied between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMetric {
    /// Absolute difference of the character counts.
    #[default]
    Length,
    /// Levenshtein edit distance.
    Levenshtein,
}

/// Line-based text data source.
///
/// # Examples
/// ```
/// use qtclust_core::DistanceCalculator;
/// use qtclust_providers_text::{TextCalculator, TextMetric};
///
/// let calc = TextCalculator::new(
///     "demo",
///     vec!["a".into(), "bbb".into()],
///     TextMetric::Length,
/// );
/// assert_eq!(calc.distance(0, 1)?, 2.0);
/// # Ok::<(), qtclust_core::DistanceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TextCalculator {
    name: String,
    lines: Vec<String>,
    lengths: Vec<usize>, // cached character counts
    metric: TextMetric,
}

impl TextCalculator {
    /// Creates a text source over explicit lines.
    #[must_use]
    pub fn new(name: impl Into<String>, lines: Vec<String>, metric: TextMetric) -> Self {
        let lengths = lines.iter().map(|line| line.chars().count()).collect();
        Self {
            name: name.into(),
            lines,
            lengths,
            metric,
        }
    }

    /// Reads one instance per line, keeping blank lines out of the dataset.
    ///
    /// # Errors
    /// Returns [`TextProviderError`] when the source cannot be read.
    pub fn from_lines(
        name: impl Into<String>,
        reader: impl BufRead,
        metric: TextMetric,
    ) -> Result<Self, TextProviderError> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        Ok(Self::new(name, lines, metric))
    }

    /// Returns the number of lines in the source.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns whether the source contains no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the metric this source compares lines with.
    #[must_use]
    pub fn metric(&self) -> TextMetric {
        self.metric
    }

    fn line(&self, index: usize) -> Result<&str, DistanceError> {
        self.lines
            .get(index)
            .map(String::as_str)
            .ok_or(DistanceError::OutOfBounds { index })
    }
}

impl DistanceCalculator for TextCalculator {
    fn name(&self) -> &str {
        &self.name
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DistanceError> {
        match self.metric {
            TextMetric::Length => {
                let a = *self
                    .lengths
                    .get(i)
                    .ok_or(DistanceError::OutOfBounds { index: i })?;
                let b = *self
                    .lengths
                    .get(j)
                    .ok_or(DistanceError::OutOfBounds { index: j })?;
                Ok(a.abs_diff(b) as f64)
            }
            TextMetric::Levenshtein => {
                let a = self.line(i)?;
                let b = self.line(j)?;
                Ok(strsim::levenshtein(a, b) as f64)
            }
        }
    }
}
