//! Single-threaded reference QT engine.

use std::sync::Arc;

use tracing::debug;

use crate::{
    builder::OverlapPolicy,
    calculator::DistanceCalculator,
    error::QtError,
    progress::{ProgressEvent, ProgressObserver},
    store::ClusterStore,
};

use super::{grow_candidate, promote_singleton, retire_members, seed_position};

/// Runs one full clustering pass on the calling thread.
pub(crate) fn run<C, P>(
    store: &mut ClusterStore,
    calculator: &C,
    label: &Arc<str>,
    threshold: f64,
    overlap: OverlapPolicy,
    observer: &mut P,
) -> Result<(), QtError>
where
    C: DistanceCalculator + ?Sized,
    P: ProgressObserver,
{
    let instance_count = store.capacity();
    store.begin_pass();
    observer.on_progress(ProgressEvent::PassStarted {
        instances: instance_count,
    });

    let mut working: Vec<usize> = (0..instance_count).collect();
    let universe: Vec<usize> = (0..instance_count).collect();
    let mut retired = vec![false; instance_count];

    while !working.is_empty() {
        let size = if working.len() == 1 && overlap == OverlapPolicy::Disallow {
            let size = promote_singleton(store, working[0])?;
            working.clear();
            size
        } else {
            store.reset_candidates();
            let domain: &[usize] = match overlap {
                OverlapPolicy::Disallow => &working,
                OverlapPolicy::Allow => &universe,
            };
            let seeds = working.len();
            for (pos, buffer) in store.candidates_mut().iter_mut().take(seeds).enumerate() {
                let seed_pos = seed_position(overlap, pos, working[pos]);
                grow_candidate(seed_pos, domain, calculator, label, threshold, buffer)?;
            }

            let Some(selected) = store.widest_candidate(seeds) else {
                break;
            };
            let size = store.commit(selected)?;
            retire_members(&mut working, store.last_committed(), &mut retired);
            size
        };

        debug!(
            cluster = store.committed_count() - 1,
            size,
            remaining = working.len(),
            "cluster promoted"
        );
        observer.on_progress(ProgressEvent::ClusterPromoted {
            index: store.committed_count() - 1,
            size,
            remaining: working.len(),
        });
    }

    observer.on_progress(ProgressEvent::PassCompleted {
        clusters: store.committed_count(),
    });
    Ok(())
}
