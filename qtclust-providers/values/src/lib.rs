//! Numeric value provider: absolute-difference distances for qtclust.

use std::io::BufRead;
use std::num::ParseFloatError;

use qtclust_core::{DistanceCalculator, DistanceError};
use thiserror::Error;

/// Errors raised while loading a value dataset.
#[derive(Debug, Error)]
pub enum ValueProviderError {
    /// Reading the underlying source failed.
    #[error("failed to read values: {source}")]
    Io {
        /// Underlying I/O failure.
        #[from]
        source: std::io::Error,
    },
    /// A line did not parse as a floating-point value.
    #[error("line {line} is not a number: {source}")]
    Parse {
        /// One-based line number of the offending entry.
        line: usize,
        /// Underlying parse failure.
        source: ParseFloatError,
    },
}

/// Numeric data source where the distance between two instances is the
/// absolute difference of their values.
///
/// # Examples
/// ```
/// use qtclust_core::DistanceCalculator;
/// use qtclust_providers_values::ValueCalculator;
///
/// let calc = ValueCalculator::new("demo", vec![1.0, 4.5]);
/// assert_eq!(calc.len(), 2);
/// assert_eq!(calc.distance(0, 1)?, 3.5);
/// # Ok::<(), qtclust_core::DistanceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ValueCalculator {
    name: String,
    values: Vec<f64>,
}

impl ValueCalculator {
    /// Creates a calculator over explicit values.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Reads one value per line, skipping blank lines.
    ///
    /// # Errors
    /// Returns [`ValueProviderError`] when the source cannot be read or a
    /// line does not parse as a number.
    ///
    /// # Examples
    /// ```
    /// use qtclust_providers_values::ValueCalculator;
    ///
    /// let calc = ValueCalculator::from_lines("demo", "1.0\n\n2.5\n".as_bytes())?;
    /// assert_eq!(calc.len(), 2);
    /// # Ok::<(), qtclust_providers_values::ValueProviderError>(())
    /// ```
    pub fn from_lines(
        name: impl Into<String>,
        reader: impl BufRead,
    ) -> Result<Self, ValueProviderError> {
        let mut values = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let value = trimmed
                .parse::<f64>()
                .map_err(|source| ValueProviderError::Parse {
                    line: index + 1,
                    source,
                })?;
            values.push(value);
        }
        Ok(Self::new(name, values))
    }

    /// Returns the number of values in the source.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the source contains no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl DistanceCalculator for ValueCalculator {
    fn name(&self) -> &str {
        &self.name
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DistanceError> {
        let a = self
            .values
            .get(i)
            .ok_or(DistanceError::OutOfBounds { index: i })?;
        let b = self
            .values
            .get(j)
            .ok_or(DistanceError::OutOfBounds { index: j })?;
        Ok((a - b).abs())
    }
}
