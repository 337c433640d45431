//! Arc-consistency reduction (AC-3).
//!
//! Prunes values that can never participate in a consistent complete
//! assignment, either as pre-processing or interleaved with search. The
//! variant implemented here follows the AIMA formulation with two deliberate
//! deviations kept for behavioral parity with the reference driver, both
//! covered by brute-force property tests in the engine:
//!
//! - `revise` removes at most one value per call instead of sweeping the
//!   whole domain;
//! - after a revision of `xi`, the re-enqueued arcs range over `xi`'s table
//!   partners rather than the classical `neighbors(xi) \ {xj}` (equivalent
//!   here, because the table is built symmetric-complete).

use tracing::debug;

use crate::solver::{
    domains::DomainStore, graph::ConstraintGraph, stats::SearchStats, value::Value,
    variable::Variable, work_list::WorkList,
};

/// Removes from `domains[xi]` the first value with no support in
/// `domains[xj]`, returning whether anything changed.
///
/// At most one value is removed per call; the caller's worklist brings the
/// variable back around if more pruning is possible.
pub(crate) fn revise<V: Value>(
    graph: &ConstraintGraph<V>,
    domains: &mut DomainStore<V>,
    xi: &Variable,
    xj: &Variable,
    stats: &mut SearchStats,
) -> bool {
    stats.revise_calls += 1;
    let candidates: Vec<V> = domains.get(xi).iter().cloned().collect();
    for value in candidates {
        let supported = domains
            .get(xj)
            .iter()
            .any(|other| graph.compatible(xi, &value, xj, other));
        if !supported {
            domains.remove(xi, &value);
            stats.prunings += 1;
            debug!(variable = %xi, "pruned unsupported value");
            return true;
        }
    }
    false
}

/// Runs AC-3 over every arc in the constraint graph.
///
/// Returns `false` as soon as a domain is emptied (the instance admits no
/// solution); `true` once the worklist drains. Each successful revision
/// strictly shrinks a finite domain, so the loop terminates.
pub(crate) fn ac3<V: Value>(
    graph: &ConstraintGraph<V>,
    domains: &mut DomainStore<V>,
    stats: &mut SearchStats,
) -> bool {
    let arcs: Vec<(Variable, Variable)> = graph.arcs().cloned().collect();
    let mut worklist = WorkList::new();
    for arc in &arcs {
        worklist.push_back(arc.clone());
    }

    while let Some((xi, xj)) = worklist.pop_front() {
        if revise(graph, domains, &xi, &xj, stats) {
            if domains.get(&xi).is_empty() {
                debug!(variable = %xi, "domain emptied during propagation");
                return false;
            }
            // xi shrank, so its other partners may have lost support:
            // re-check every arc pointing at xi except the one just revised.
            for (a, b) in &arcs {
                if a == &xi && b != &xj {
                    worklist.push_back((b.clone(), a.clone()));
                }
            }
        }
    }
    true
}
