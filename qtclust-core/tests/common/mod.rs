//! Shared fixtures for the integration tests.

use qtclust_core::{DistanceCalculator, DistanceError};

/// Calculator comparing words by the absolute difference of their lengths.
#[derive(Clone)]
pub struct WordLengths {
    lengths: Vec<f64>,
}

impl WordLengths {
    #[must_use]
    pub fn new(words: &[&str]) -> Self {
        let lengths = words
            .iter()
            .map(|word| word.chars().count() as f64)
            .collect();
        Self { lengths }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lengths.len()
    }
}

impl DistanceCalculator for WordLengths {
    fn name(&self) -> &str {
        "word-lengths"
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DistanceError> {
        let a = self
            .lengths
            .get(i)
            .ok_or(DistanceError::OutOfBounds { index: i })?;
        let b = self
            .lengths
            .get(j)
            .ok_or(DistanceError::OutOfBounds { index: j })?;
        Ok((a - b).abs())
    }
}
