//! Parallel QT engine.
//!
//! Fans the per-seed candidate growth across a dedicated worker pool within
//! each outer iteration. Every worker reads the same frozen working-set
//! snapshot and calculator, and writes only its own candidate slot, so the
//! parallel phase needs no locking. The coordinating thread joins the pool
//! before performing the reduction and working-set mutation alone, which
//! keeps the resulting partition identical to the sequential engine's.

use std::{num::NonZeroUsize, sync::Arc};

use rayon::prelude::*;
use tracing::debug;

use crate::{
    builder::OverlapPolicy,
    calculator::DistanceCalculator,
    error::QtError,
    progress::{ProgressEvent, ProgressObserver},
    store::ClusterStore,
};

use super::{grow_candidate, promote_singleton, retire_members, seed_position};

/// Runs one full clustering pass with a pool of up to `threads` workers.
///
/// The worker count is clamped to `max(1, min(threads, instance_count))`; any
/// error raised inside a worker aborts the whole pass.
pub(crate) fn run<C, P>(
    store: &mut ClusterStore,
    calculator: &C,
    label: &Arc<str>,
    threshold: f64,
    overlap: OverlapPolicy,
    threads: NonZeroUsize,
    observer: &mut P,
) -> Result<(), QtError>
where
    C: DistanceCalculator + Sync + ?Sized,
    P: ProgressObserver,
{
    let instance_count = store.capacity();
    store.begin_pass();
    observer.on_progress(ProgressEvent::PassStarted {
        instances: instance_count,
    });

    let workers = threads.get().min(instance_count.max(1));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|error| QtError::ThreadPool {
            detail: error.to_string().into(),
        })?;
    debug!(workers, instances = instance_count, "parallel pass started");

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
            let seed_of = &working;
            let slots = &mut store.candidates_mut()[..seeds];
            pool.install(|| {
                slots
                    .par_iter_mut()
                    .enumerate()
                    .try_for_each(|(pos, buffer)| {
                        let seed_pos = seed_position(overlap, pos, seed_of[pos]);
                        grow_candidate(seed_pos, domain, calculator, label, threshold, buffer)
                    })
            })?;

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
