//! QT clustering engines.
//!
//! Both engines share the same outer loop: grow one candidate cluster per
//! remaining seed, promote the widest candidate, retire its members, repeat
//! until the working set drains. They differ only in how the per-seed growth
//! step executes: in place on the calling thread, or fanned across a worker
//! pool. The growth step itself is the explicit task function below, so a
//! candidate depends only on its seed and the frozen working-set snapshot.

pub(crate) mod parallel;
pub(crate) mod sequential;

use std::sync::Arc;

use crate::{
    builder::OverlapPolicy,
    calculator::DistanceCalculator,
    error::{DistanceError, QtError},
    store::{ClusterStore, push_member},
};


pub(crate) fn wrap_calculator_error(label: &Arc<str>, error: DistanceError) -> QtError {
    QtError::Calculator {
        calculator: Arc::clone(label),
        error,
    }
}

/// Grows one candidate cluster rooted at `domain[seed_pos]` into `out`.
///
/// Starting from the seed alone, each round scans the unabsorbed instances of
/// `domain` for the minimum aggregated distance to the candidate and absorbs
/// it while the minimum stays within `threshold` (equal-to-threshold
/// absorbs). The scan uses strict `<`, so the lowest-indexed instance wins a
/// distance tie, and a NaN aggregate is never selected; a candidate whose
/// every remaining aggregate is NaN is complete.
pub(crate) fn grow_candidate<C>(
    seed_pos: usize,
    domain: &[usize],
    calculator: &C,
    label: &Arc<str>,
    threshold: f64,
    out: &mut Vec<usize>,
) -> Result<(), QtError>
where
    C: DistanceCalculator + ?Sized,
{
    out.clear();
    push_member(out, domain[seed_pos])?;

    // Absorption scratch is private to this candidate; no visited state is
    // ever shared between concurrent growths.
    let mut absorbed = vec![false; domain.len()];
    absorbed[seed_pos] = true;
    let mut open = domain.len() - 1;

    while open > 0 {
        let mut best_pos = None;
        let mut best_distance = f64::INFINITY;
        for (pos, &instance) in domain.iter().enumerate() {
            if absorbed[pos] {
                continue;
            }
            let aggregate = calculator
                .cluster_distance(out, instance)
                .map_err(|error| wrap_calculator_error(label, error))?;
            if aggregate < best_distance {
                best_distance = aggregate;
                best_pos = Some(pos);
            }
        }
        let Some(pos) = best_pos else { break };
        if best_distance > threshold {
            break;
        }
        absorbed[pos] = true;
        push_member(out, domain[pos])?;
        open -= 1;
    }

    Ok(())
}

/// Commits the lone remaining instance without running the growth search.
pub(crate) fn promote_singleton(
    store: &mut ClusterStore,
    instance: usize,
) -> Result<usize, QtError> {
    store.reset_candidates();
    store.record(0, instance)?;
    store.commit(0)
}

/// Removes the promoted members from the working set, preserving order.
///
/// `flags` is the engine's pass-scoped scratch (one slot per instance) and is
/// left fully cleared on return, so no allocation happens per iteration.
pub(crate) fn retire_members(working: &mut Vec<usize>, members: &[usize], flags: &mut [bool]) {
    for &member in members {
        if let Some(flag) = flags.get_mut(member) {
            *flag = true;
        }
    }
    working.retain(|&instance| !flags[instance]);
    for &member in members {
        if let Some(flag) = flags.get_mut(member) {
            *flag = false;
        }
    }
}

/// Resolves the growth domain and the seed's position inside it.
///
/// With no overlap the domain is the working set itself; with overlap
/// allowed, candidates may absorb committed instances again, so the domain is
/// the full instance universe.
pub(crate) fn seed_position(overlap: OverlapPolicy, pos: usize, seed: usize) -> usize {
    match overlap {
        OverlapPolicy::Disallow => pos,
        OverlapPolicy::Allow => seed,
    }
}
