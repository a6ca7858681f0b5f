//! Builder utilities for configuring QT clustering runs.
//!
//! Exposes the execution strategy and overlap policy surfaces and the builder
//! validation used before constructing [`QtClusterer`] instances.

use std::num::NonZeroUsize;

use crate::{Result, clusterer::QtClusterer, error::QtError};

/// Selects which engine runs the candidate-growth loop.
///
/// # Examples
/// ```
/// use qtclust_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Parallel;
/// assert!(matches!(strategy, ExecutionStrategy::Parallel));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Single-threaded reference engine.
    Sequential,
    /// Fan the per-seed growth loop across a worker pool.
    Parallel,
}

/// Controls whether an instance may belong to more than one final cluster.
///
/// Under [`OverlapPolicy::Disallow`] the output is a partition: every
/// instance appears in exactly one cluster. Under [`OverlapPolicy::Allow`]
/// candidate growth may absorb instances that earlier iterations already
/// committed, so clusters can share members; every instance still appears in
/// at least one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Committed instances never join another cluster.
    #[default]
    Disallow,
    /// Committed instances remain absorbable by later candidates.
    Allow,
}

/// Configures and constructs [`QtClusterer`] instances.
///
/// # Examples
/// ```
/// use qtclust_core::{ExecutionStrategy, QtClustererBuilder};
///
/// let clusterer = QtClustererBuilder::new(16)
///     .with_threads(4)
///     .with_execution_strategy(ExecutionStrategy::Parallel)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(clusterer.instance_count(), 16);
/// assert_eq!(clusterer.threads().get(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct QtClustererBuilder {
    instance_count: usize,
    threads: Option<usize>,
    strategy: ExecutionStrategy,
    overlap: OverlapPolicy,
}

impl QtClustererBuilder {
    /// Creates a builder for clustering `instance_count` instances.
    ///
    /// The instance count is fixed for the lifetime of the clusterer; a
    /// negative count is unrepresentable.
    #[must_use]
    pub fn new(instance_count: usize) -> Self {
        Self {
            instance_count,
            threads: None,
            strategy: ExecutionStrategy::Parallel,
            overlap: OverlapPolicy::Disallow,
        }
    }

    /// Overrides the worker-count hint for the parallel engine.
    ///
    /// The hint is validated at [`QtClustererBuilder::build`] time and
    /// clamped to the instance count when a pass runs. When not set, the
    /// hint defaults to the ambient rayon thread count.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets the engine used when clustering.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Sets the overlap policy applied by every engine.
    #[must_use]
    pub fn with_overlap_policy(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Returns the currently configured overlap policy.
    #[must_use]
    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap
    }

    /// Validates the configuration and constructs a [`QtClusterer`].
    ///
    /// # Errors
    /// Returns [`QtError::InvalidThreadCount`] when an explicit worker-count
    /// hint of zero was supplied.
    pub fn build(self) -> Result<QtClusterer> {
        let requested = self.threads.unwrap_or_else(rayon::current_num_threads);
        let threads = NonZeroUsize::new(requested)
            .ok_or(QtError::InvalidThreadCount { got: requested })?;

        Ok(QtClusterer::new(
            self.instance_count,
            threads,
            self.strategy,
            self.overlap,
        ))
    }
}
