//! Precomputed all-pairs distance cache.

use tracing::debug;

use crate::{
    calculator::DistanceCalculator,
    error::DistanceError,
};

/// Wraps a [`DistanceCalculator`] with a precomputed `n x n` distance matrix.
///
/// [`DistanceCalculator::initialize`] fills the matrix, querying the inner
/// calculator for `[i][j]` and `[j][i]` independently; no symmetry is
/// assumed. Afterwards every pairwise query inside the cached range is a
/// table lookup, so the default max-linkage aggregation over a candidate of
/// `k` members costs `k` lookups instead of `k` recomputations. Queries
/// outside the cached range delegate to the inner calculator.
///
/// # Examples
/// ```
/// use qtclust_core::{CachingCalculator, DistanceCalculator, DistanceError};
///
/// struct AbsDiff(Vec<f64>);
///
/// impl DistanceCalculator for AbsDiff {
///     fn name(&self) -> &str { "abs-diff" }
///     fn distance(&self, i: usize, j: usize) -> Result<f64, DistanceError> {
///         let a = self.0.get(i).ok_or(DistanceError::OutOfBounds { index: i })?;
///         let b = self.0.get(j).ok_or(DistanceError::OutOfBounds { index: j })?;
///         Ok((a - b).abs())
///     }
/// }
///
/// let mut calc = CachingCalculator::new(AbsDiff(vec![1.0, 4.0]));
/// calc.initialize(2)?;
/// assert_eq!(calc.distance(0, 1)?, 3.0);
/// # Ok::<(), DistanceError>(())
/// ```
#[derive(Debug)]
pub struct CachingCalculator<C> {
    inner: C,
    matrix: Vec<f64>,
    cached: usize,
}

impl<C> CachingCalculator<C> {
    /// Creates an empty cache around `inner`; nothing is computed until
    /// [`DistanceCalculator::initialize`] runs.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            matrix: Vec::new(),
            cached: 0,
        }
    }

    /// Returns a reference to the wrapped calculator.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Consumes the cache and returns the wrapped calculator.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: DistanceCalculator> DistanceCalculator for CachingCalculator<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn initialize(&mut self, instance_count: usize) -> Result<(), DistanceError> {
        self.inner.initialize(instance_count)?;
        if self.cached == instance_count && instance_count > 0 {
            return Ok(());
        }

        debug!(
            calculator = self.inner.name(),
            instances = instance_count,
            "precomputing distance cache"
        );
        self.cached = 0;
        self.matrix.clear();
        self.matrix.reserve(instance_count * instance_count);
        for i in 0..instance_count {
            for j in 0..instance_count {
                self.matrix.push(self.inner.distance(i, j)?);
            }
        }
        self.cached = instance_count;
        Ok(())
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DistanceError> {
        if i < self.cached && j < self.cached {
            Ok(self.matrix[i * self.cached + j])
        } else {
            self.inner.distance(i, j)
        }
    }

    fn ignore_distance(&self) -> f64 {
        self.inner.ignore_distance()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::test_utils::CountingCalculator;

    #[test]
    fn initialize_caches_both_triangles() {
        struct Asymmetric;
        impl DistanceCalculator for Asymmetric {
            fn name(&self) -> &str {
                "asymmetric"
            }
            fn distance(&self, i: usize, j: usize) -> Result<f64, DistanceError> {
                Ok(if i < j { 1.0 } else { 2.0 })
            }
        }

        let mut calc = CachingCalculator::new(Asymmetric);
        calc.initialize(2).expect("initialize must succeed");
        assert_eq!(calc.distance(0, 1).expect("cached"), 1.0);
        assert_eq!(calc.distance(1, 0).expect("cached"), 2.0);
    }

    #[test]
    fn cached_lookups_do_not_query_the_inner_calculator() {
        let mut calc = CachingCalculator::new(CountingCalculator::new(vec![0.0, 2.0, 5.0]));
        calc.initialize(3).expect("initialize must succeed");
        let after_init = calc.inner().calls().load(Ordering::Relaxed);
        assert_eq!(after_init, 9);

        assert_eq!(calc.distance(0, 2).expect("cached"), 5.0);
        assert_eq!(calc.cluster_distance(&[0, 1], 2).expect("cached"), 5.0);
        assert_eq!(calc.inner().calls().load(Ordering::Relaxed), after_init);
    }

    #[test]
    fn reinitialize_with_same_count_is_a_no_op() {
        let mut calc = CachingCalculator::new(CountingCalculator::new(vec![0.0, 1.0]));
        calc.initialize(2).expect("initialize must succeed");
        let after_first = calc.inner().calls().load(Ordering::Relaxed);
        calc.initialize(2).expect("reinitialize must succeed");
        assert_eq!(calc.inner().calls().load(Ordering::Relaxed), after_first);
    }

    #[test]
    fn out_of_range_lookups_delegate_to_inner() {
        let mut calc = CachingCalculator::new(CountingCalculator::new(vec![0.0, 1.0, 2.0]));
        calc.initialize(2).expect("initialize must succeed");
        // Index 2 is outside the cached range but valid on the inner source.
        assert_eq!(calc.distance(0, 2).expect("delegated"), 2.0);
    }

    #[test]
    fn initialization_failures_propagate() {
        let mut calc = CachingCalculator::new(CountingCalculator::new(vec![0.0]));
        let err = calc
            .initialize(2)
            .expect_err("inner source is too small for 2 instances");
        assert!(matches!(err, DistanceError::OutOfBounds { index: 1 }));
    }
}
