//! Shared test fixtures used across qtclust crates.

pub mod fixtures {
    //! Deterministic calculators and canned datasets for clustering tests.

    use qtclust_core::{DistanceCalculator, DistanceError};

    /// Calculator backed by an explicit, possibly asymmetric distance matrix.
    #[derive(Debug, Clone)]
    pub struct MatrixCalculator {
        matrix: Vec<Vec<f64>>,
    }

    impl MatrixCalculator {
        /// Creates a calculator from an explicit matrix; `matrix[i][j]` is the
        /// distance from instance `i` to instance `j`.
        #[must_use]
        pub fn new(matrix: Vec<Vec<f64>>) -> Self {
            Self { matrix }
        }

        /// Creates an `n x n` matrix where every pair is `far` apart except
        /// the symmetric `(0, 1)` pair, which is at distance zero.
        ///
        /// This is the fixed scenario used by the threshold boundary tests:
        /// with `far` within the threshold everything chains into one
        /// cluster, one past it only the zero pair survives together.
        #[must_use]
        pub fn zero_pair(n: usize, far: f64) -> Self {
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
    pub struct AbsDiffCalculator {
        values: Vec<f64>,
    }

    impl AbsDiffCalculator {
        /// Creates a calculator over explicit values.
        #[must_use]
        pub fn new(values: Vec<f64>) -> Self {
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
    #[must_use]
    pub fn threshold_grid_values() -> Vec<f64> {
        vec![1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 42.0, 43.0, 4.0, 6.0]
    }

    /// The fixed sentence whose word lengths drive the word-length
    /// clustering test.
    #[must_use]
    pub fn gettysburg_words() -> Vec<&'static str> {
        let text = "Four score and seven years ago our fathers brought forth on this \
                    continent a new nation conceived in liberty and dedicated to the \
                    proposition that all men are created equal";
        text.split_whitespace().collect()
    }

    /// Word lengths of [`gettysburg_words`] as distance-calculator values.
    #[must_use]
    pub fn gettysburg_word_lengths() -> Vec<f64> {
        gettysburg_words()
            .iter()
            .map(|word| word.chars().count() as f64)
            .collect()
    }
}
