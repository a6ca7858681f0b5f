//! Progress observation for clustering passes.
//!
//! Engines report coarse progress through an injected observer instead of a
//! global logger. Observers are only ever invoked from the coordinating
//! thread, and the no-op observer monomorphizes away entirely.

/// A coarse progress notification emitted during one clustering pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressEvent {
    /// A clustering pass started over `instances` instances.
    PassStarted {
        /// Total number of instances in the pass.
        instances: usize,
    },
    /// A candidate was promoted to a final cluster.
    ClusterPromoted {
        /// Zero-based promotion index of the new cluster.
        index: usize,
        /// Number of instances in the promoted cluster.
        size: usize,
        /// Number of instances still awaiting assignment.
        remaining: usize,
    },
    /// The pass completed with `clusters` final clusters.
    PassCompleted {
        /// Total number of clusters produced.
        clusters: usize,
    },
}

/// Receives [`ProgressEvent`] notifications from a clustering engine.
///
/// Any `FnMut(ProgressEvent)` closure is an observer:
///
/// ```
/// use qtclust_core::{ProgressEvent, ProgressObserver};
///
/// let mut promoted = 0_usize;
/// let mut observer = |event: ProgressEvent| {
///     if matches!(event, ProgressEvent::ClusterPromoted { .. }) {
///         promoted += 1;
///     }
/// };
/// observer.on_progress(ProgressEvent::PassStarted { instances: 3 });
/// ```
pub trait ProgressObserver {
    /// Handles one progress notification.
    fn on_progress(&mut self, event: ProgressEvent);
}

impl<F: FnMut(ProgressEvent)> ProgressObserver for F {
    fn on_progress(&mut self, event: ProgressEvent) {
        self(event);
    }
}

/// Observer that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_progress(&mut self, _event: ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_observe_events() {
        let mut seen = Vec::new();
        {
            let mut observer = |event: ProgressEvent| seen.push(event);
            observer.on_progress(ProgressEvent::PassStarted { instances: 2 });
            observer.on_progress(ProgressEvent::PassCompleted { clusters: 1 });
        }
        assert_eq!(
            seen,
            vec![
                ProgressEvent::PassStarted { instances: 2 },
                ProgressEvent::PassCompleted { clusters: 1 },
            ]
        );
    }
}
