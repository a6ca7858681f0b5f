//! In-crate test fixtures.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::{DistanceCalculator, DistanceError};

/// Absolute-difference calculator that counts pairwise distance queries.
pub(crate) struct CountingCalculator {
    values: Vec<f64>,
    calls: Arc<AtomicUsize>,
}

impl CountingCalculator {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> &AtomicUsize {
        &self.calls
    }
}

impl DistanceCalculator for CountingCalculator {
    fn name(&self) -> &str {
        "counting"
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DistanceError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
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

/// Calculator backed by an explicit, possibly asymmetric distance matrix.
#[derive(Debug, Clone)]
pub(crate) struct MatrixCalculator {
    matrix: Vec<Vec<f64>>,
}

impl MatrixCalculator {
    /// Creates a calculator from an explicit matrix; `matrix[i][j]` is the
    /// distance from instance `i` to instance `j`.
    pub(crate) fn new(matrix: Vec<Vec<f64>>) -> Self {
        Self { matrix }
    }

    /// Creates an `n x n` matrix where every pair is `far` apart except
    /// the symmetric `(0, 1)` pair, which is at distance zero.
    pub(crate) fn zero_pair(n: usize, far: f64) -> Self {
        let matrix = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        if (i, j) == (0, 1) || (i, j) == (1, 0) {
                            0.0
                        } else {
                            far
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new(matrix)
    }
}

impl DistanceCalculator for MatrixCalculator {
    fn name(&self) -> &str {
        "matrix"
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DistanceError> {
        self.matrix
            .get(i)
            .ok_or(DistanceError::OutOfBounds { index: i })?
            .get(j)
            .copied()
            .ok_or(DistanceError::OutOfBounds { index: j })
    }
}

/// Absolute-difference calculator over a vector of values.
#[derive(Debug, Clone)]
pub(crate) struct AbsDiffCalculator {
    values: Vec<f64>,
}

impl AbsDiffCalculator {
    /// Creates a calculator over explicit values.
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl DistanceCalculator for AbsDiffCalculator {
    fn name(&self) -> &str {
        "abs-diff"
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

/// The value dataset exercised by the threshold-grid tests.
pub(crate) fn threshold_grid_values() -> Vec<f64> {
    vec![1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 42.0, 43.0, 4.0, 6.0]
}

/// The fixed sentence whose word lengths drive the word-length
/// clustering test.
pub(crate) fn gettysburg_words() -> Vec<&'static str> {
    let text = "Four score and seven years ago our fathers brought forth on this \
                continent a new nation conceived in liberty and dedicated to the \
                proposition that all men are created equal";
    text.split_whitespace().collect()
}

/// Word lengths of [`gettysburg_words`] as distance-calculator values.
pub(crate) fn gettysburg_word_lengths() -> Vec<f64> {
    gettysburg_words()
        .iter()
        .map(|word| word.chars().count() as f64)
        .collect()
}

/// Calculator that fails on one designated pair, for abort-path tests.
pub(crate) struct FailingCalculator {
    pub(crate) fail_on: (usize, usize),
}

impl DistanceCalculator for FailingCalculator {
    fn name(&self) -> &str {
        "failing"
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DistanceError> {
        if (i, j) == self.fail_on {
            return Err(DistanceError::Calculation {
                detail: "injected failure".into(),
            });
        }
        Ok(1.0)
    }
}
