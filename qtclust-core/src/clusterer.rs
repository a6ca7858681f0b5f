//! Core QT clustering entry point.
//!
//! Provides the [`QtClusterer`] runtime entry point that dispatches a
//! clustering pass to the sequential or parallel engine and retains the most
//! recent result.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{instrument, warn};

use crate::{
    Result,
    builder::{ExecutionStrategy, OverlapPolicy},
    calculator::DistanceCalculator,
    engine::{parallel, sequential},
    error::QtError,
    progress::{NoopProgress, ProgressObserver},
    store::ClusterStore,
};

/// Common surface shared by every clustering backend.
///
/// Implementations run one full pass over a fixed instance set and keep the
/// most recent result readable. [`crate::MclClusterer`] implements the same
/// surface, so the external backend is a drop-in replacement for the QT
/// engines.
pub trait Clusterer {
    /// Runs one full clustering pass and returns the final clusters.
    ///
    /// # Errors
    /// Returns [`QtError`] when the pass aborts; no partial result is
    /// produced.
    fn cluster<C>(&mut self, calculator: &mut C, quality_threshold: f64)
    -> Result<Vec<Vec<usize>>>
    where
        C: DistanceCalculator + Sync;

    /// Returns the most recent clustering result.
    fn clusters(&self) -> Vec<Vec<usize>>;
}

/// Groups a fixed set of instances into quality-threshold clusters.
///
/// One clusterer owns reusable cluster buffers sized to its instance count,
/// so a single instance must not run concurrent passes; `cluster` takes
/// `&mut self` to enforce this. Results are returned in promotion order, and
/// the most recent result stays available through [`QtClusterer::clusters`].
///
/// # Examples
/// ```
/// use qtclust_core::{DistanceCalculator, DistanceError, QtClustererBuilder};
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
/// let mut calculator = AbsDiff(vec![1.0, 2.0, 40.0]);
/// let mut clusterer = QtClustererBuilder::new(3)
///     .build()
///     .expect("builder must succeed");
/// let clusters = clusterer
///     .cluster(&mut calculator, 1.0)
///     .expect("clustering must succeed");
/// assert_eq!(clusters, vec![vec![0, 1], vec![2]]);
/// ```
#[derive(Debug)]
pub struct QtClusterer {
    instance_count: usize,
    threads: NonZeroUsize,
    strategy: ExecutionStrategy,
    overlap: OverlapPolicy,
    store: ClusterStore,
}

impl QtClusterer {
    pub(crate) fn new(
        instance_count: usize,
        threads: NonZeroUsize,
        strategy: ExecutionStrategy,
        overlap: OverlapPolicy,
    ) -> Self {
        Self {
            instance_count,
            threads,
            strategy,
            overlap,
            store: ClusterStore::new(instance_count),
        }
    }

    /// Returns the fixed number of instances this clusterer partitions.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    /// Returns the worker-count hint used by the parallel engine.
    #[must_use]
    pub fn threads(&self) -> NonZeroUsize {
        self.threads
    }

    /// Returns the engine selected at build time.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Returns the overlap policy applied to every pass.
    #[must_use]
    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap
    }

    /// Runs one full clustering pass and returns the final clusters in
    /// promotion order.
    ///
    /// The calculator's [`DistanceCalculator::initialize`] hook runs first
    /// with this clusterer's instance count.
    ///
    /// # Errors
    /// Returns [`QtError::Calculator`] when the calculator fails (including
    /// inside a parallel worker; the whole pass aborts with no partial
    /// result) and [`QtError::ThreadPool`] when the worker pool cannot be
    /// built.
    pub fn cluster<C>(
        &mut self,
        calculator: &mut C,
        quality_threshold: f64,
    ) -> Result<Vec<Vec<usize>>>
    where
        C: DistanceCalculator + Sync,
    {
        self.cluster_with_observer(calculator, quality_threshold, &mut NoopProgress)
    }

    /// Like [`QtClusterer::cluster`], reporting coarse progress to
    /// `observer`.
    ///
    /// Observer callbacks run on the calling thread only.
    ///
    /// # Errors
    /// Same as [`QtClusterer::cluster`].
    #[instrument(
        name = "qt.cluster",
        err,
        skip(self, calculator, observer),
        fields(
            calculator = %calculator.name(),
            instances = self.instance_count,
            strategy = ?self.strategy,
            threshold = quality_threshold,
        ),
    )]
    pub fn cluster_with_observer<C, P>(
        &mut self,
        calculator: &mut C,
        quality_threshold: f64,
        observer: &mut P,
    ) -> Result<Vec<Vec<usize>>>
    where
        C: DistanceCalculator + Sync,
        P: ProgressObserver,
    {
        let label: Arc<str> = Arc::from(calculator.name());
        calculator
            .initialize(self.instance_count)
            .map_err(|error| QtError::Calculator {
                calculator: Arc::clone(&label),
                error,
            })?;

        let outcome = match self.strategy {
            ExecutionStrategy::Sequential => sequential::run(
                &mut self.store,
                &*calculator,
                &label,
                quality_threshold,
                self.overlap,
                observer,
            ),
            ExecutionStrategy::Parallel => parallel::run(
                &mut self.store,
                &*calculator,
                &label,
                quality_threshold,
                self.overlap,
                self.threads,
                observer,
            ),
        };

        if let Err(error) = outcome {
            warn!(%error, "clustering pass aborted");
            // An aborted pass must not leave a partial result readable.
            self.store.begin_pass();
            return Err(error);
        }

        Ok(self.clusters())
    }

    /// Returns the most recent clustering result, trimmed to actual sizes,
    /// in promotion order.
    #[must_use]
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        self.store.clusters()
    }
}

impl Clusterer for QtClusterer {
    fn cluster<C>(
        &mut self,
        calculator: &mut C,
        quality_threshold: f64,
    ) -> Result<Vec<Vec<usize>>>
    where
        C: DistanceCalculator + Sync,
    {
        QtClusterer::cluster(self, calculator, quality_threshold)
    }

    fn clusters(&self) -> Vec<Vec<usize>> {
        QtClusterer::clusters(self)
    }
}
