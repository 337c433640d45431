use im::{HashMap, HashSet};
use tracing::debug;

use crate::{
    error::Result,
    solver::{
        assignment::Assignment,
        domains::{DomainSnapshot, DomainStore},
        graph::{ConstraintGraph, Edge},
        propagation,
        stats::SearchStats,
        value::Value,
        variable::Variable,
    },
};

/// When the AC-3 reducer runs relative to the backtracking search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Backtracking search only.
    #[default]
    Off,
    /// One AC-3 pass over the initial domains, then plain backtracking.
    Preprocess,
    /// AC-3 before search and again after every accepted assignment, with
    /// the assigned variable's domain narrowed to the chosen value first.
    Maintained,
}

/// A binary constraint satisfaction problem and the engine that solves it.
///
/// Construction derives the immutable [`ConstraintGraph`] once; solving
/// mutates only the domain store, the assignment under construction and the
/// statistics. A `Csp` is exclusively owned by one search at a time; build a
/// fresh instance per independent solve.
#[derive(Debug, Clone)]
pub struct Csp<V: Value> {
    variables: Vec<Variable>,
    graph: ConstraintGraph<V>,
    domains: DomainStore<V>,
    stats: SearchStats,
}

/// One level of the search: a variable, the candidate values still to try
/// for it, and the domain snapshot to restore between attempts.
struct Frame<V: Value> {
    var: Variable,
    candidates: std::vec::IntoIter<V>,
    snapshot: DomainSnapshot<V>,
}

impl<V: Value> Csp<V> {
    /// Builds a problem instance from variables, their domains, and edges.
    ///
    /// Every edge is a "must differ" constraint between two distinct
    /// declared variables; [`Csp::restrict`] replaces the relation for an
    /// edge afterwards. Malformed instances (an edge naming an unknown
    /// variable, a variable without a domain, a domain for an undeclared
    /// variable, a self-loop) fail fast here rather than producing a wrong
    /// constraint table.
    pub fn new(
        variables: Vec<Variable>,
        domains: HashMap<Variable, HashSet<V>>,
        edges: Vec<Edge>,
    ) -> Result<Self> {
        let graph = ConstraintGraph::build(&variables, &domains, &edges)?;
        Ok(Self {
            variables,
            graph,
            domains: DomainStore::new(domains),
            stats: SearchStats::default(),
        })
    }

    /// Replaces the allowed value pairs for the edge `(a, b)`, turning the
    /// default all-different relation into an arbitrary binary one. `pairs`
    /// is oriented as `(value of a, value of b)`.
    pub fn restrict(
        &mut self,
        a: &Variable,
        b: &Variable,
        pairs: impl IntoIterator<Item = (V, V)>,
    ) -> Result<()> {
        self.graph.set_allowed(a, b, pairs.into_iter().collect())
    }

    /// The variables in declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn graph(&self) -> &ConstraintGraph<V> {
        &self.graph
    }

    pub fn domains(&self) -> &DomainStore<V> {
        &self.domains
    }

    /// Counters for the most recent (or in-progress) solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Runs one AC-3 pass over the current domains.
    ///
    /// Returns `false` if a domain was emptied, which proves the instance
    /// unsatisfiable. The pruning is kept; callers wanting the original
    /// domains back should solve on a fresh instance.
    pub fn propagate(&mut self) -> bool {
        propagation::ac3(&self.graph, &mut self.domains, &mut self.stats)
    }

    /// Solves with plain backtracking, no propagation.
    pub fn solve(&mut self) -> Option<Assignment<V>> {
        self.solve_with(Propagation::Off)
    }

    /// Finds a complete assignment satisfying every constraint, or `None`
    /// if none exists. Statistics are reset at the start of every call.
    pub fn solve_with(&mut self, propagation: Propagation) -> Option<Assignment<V>> {
        self.stats.reset();
        if propagation != Propagation::Off && !self.propagate() {
            debug!("propagation emptied a domain before search");
            return None;
        }
        self.search(propagation)
    }

    // Backtracking over an explicit stack of frames rather than native
    // recursion, so depth is bounded by the variable count and not by the
    // call stack.
    fn search(&mut self, propagation: Propagation) -> Option<Assignment<V>> {
        let mut assignment: Assignment<V> = Assignment::new();
        let mut stack: Vec<Frame<V>> = Vec::new();
        self.stats.visits += 1;

        loop {
            // Descend: open a frame for the next unassigned variable.
            let Some(var) = self.select_unassigned(&assignment) else {
                debug!(visits = self.stats.visits, "found a complete assignment");
                return Some(assignment);
            };
            let candidates: Vec<V> = self.domains.get(&var).iter().cloned().collect();
            stack.push(Frame {
                var,
                candidates: candidates.into_iter(),
                snapshot: self.domains.snapshot(),
            });

            // Advance: find the next consistent value on top of the stack,
            // retreating through exhausted frames.
            'retreat: loop {
                let Some(frame) = stack.last_mut() else {
                    debug!(visits = self.stats.visits, "search space exhausted");
                    return None;
                };
                // Undo any domain pruning a failed sibling branch left behind.
                self.domains.restore(&frame.snapshot);

                let mut extended = false;
                while let Some(value) = frame.candidates.next() {
                    if !consistent(&self.graph, &assignment, &frame.var, &value) {
                        continue;
                    }
                    assignment.bind(frame.var.clone(), value.clone());
                    self.stats.visits += 1;
                    if propagation == Propagation::Maintained {
                        self.domains.assign(&frame.var, &value);
                        if !propagation::ac3(&self.graph, &mut self.domains, &mut self.stats) {
                            assignment.unbind(&frame.var);
                            self.domains.restore(&frame.snapshot);
                            continue;
                        }
                    }
                    extended = true;
                    break;
                }
                if extended {
                    break 'retreat;
                }

                // Every candidate failed: give up on this variable and undo
                // the assignment that led to it.
                stack.pop();
                if let Some(parent) = stack.last() {
                    assignment.unbind(&parent.var);
                }
            }
        }
    }

    // First variable in declaration order without an assignment; no
    // minimum-remaining-values or other ordering heuristic.
    fn select_unassigned(&self, assignment: &Assignment<V>) -> Option<Variable> {
        self.variables
            .iter()
            .find(|var| !assignment.contains(var))
            .cloned()
    }
}

/// Whether binding `var = value` is compatible with every already-assigned
/// neighbor. Constraints towards unassigned neighbors are deferred: they get
/// checked once the other side is bound.
fn consistent<V: Value>(
    graph: &ConstraintGraph<V>,
    assignment: &Assignment<V>,
    var: &Variable,
    value: &V,
) -> bool {
    graph.neighbors(var).iter().all(|neighbor| {
        assignment
            .get(neighbor)
            .map_or(true, |bound| graph.compatible(var, value, neighbor, bound))
    })
}

#[cfg(test)]
mod tests {
    use im::{hashset, HashMap, HashSet};
    use pretty_assertions::assert_eq;

    use super::{Csp, Propagation};
    use crate::solver::{graph::alldiff, variable::Variable};

    fn var(name: &str) -> Variable {
        Variable::from(name)
    }

    fn csp(entries: &[(&str, &[u8])], edges: &[(&str, &str)]) -> Csp<u8> {
        let variables: Vec<Variable> = entries.iter().map(|(name, _)| var(name)).collect();
        let domains: HashMap<Variable, HashSet<u8>> = entries
            .iter()
            .map(|(name, values)| (var(name), values.iter().copied().collect()))
            .collect();
        let edges = edges.iter().map(|(a, b)| (var(a), var(b))).collect();
        Csp::new(variables, domains, edges).unwrap()
    }

    #[test]
    fn solves_a_triangle_with_three_values() {
        let mut csp = csp(
            &[("A", &[1, 2, 3]), ("B", &[1, 2, 3]), ("C", &[1, 2, 3])],
            &[("A", "B"), ("A", "C"), ("B", "C")],
        );
        let solution = csp.solve().unwrap();
        assert_eq!(solution.len(), 3);
        let values: HashSet<u8> = csp
            .variables()
            .iter()
            .map(|v| *solution.get(v).unwrap())
            .collect();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn single_value_clash_has_no_solution() {
        for policy in [Propagation::Off, Propagation::Preprocess, Propagation::Maintained] {
            let mut csp = csp(&[("A", &[1]), ("B", &[1])], &[("A", "B")]);
            assert!(csp.solve_with(policy).is_none());
        }
    }

    #[test]
    fn unconstrained_variables_still_get_values() {
        let mut csp = csp(&[("A", &[7]), ("B", &[1, 2])], &[]);
        let solution = csp.solve().unwrap();
        assert_eq!(solution.get(&var("A")), Some(&7));
        assert!(solution.get(&var("B")).is_some());
    }

    #[test]
    fn empty_problem_yields_an_empty_assignment() {
        let mut csp = csp(&[], &[]);
        let solution = csp.solve().unwrap();
        assert!(solution.is_empty());
        assert_eq!(csp.stats().visits, 1);
    }

    #[test]
    fn counts_one_visit_per_extension_plus_the_root() {
        // No constraints and singleton domains: the search walks straight
        // down, one visit per variable plus the root call.
        let mut csp = csp(&[("A", &[1]), ("B", &[2]), ("C", &[3])], &[]);
        assert!(csp.solve().is_some());
        assert_eq!(csp.stats().visits, 4);

        // A second solve resets the counters rather than accumulating.
        assert!(csp.solve().is_some());
        assert_eq!(csp.stats().visits, 4);
    }

    #[test]
    fn restrict_supports_arbitrary_relations() {
        let mut csp = csp(&[("A", &[1, 2]), ("B", &[1, 2])], &[("A", "B")]);
        // Flip the edge from not-equal to equal.
        csp.restrict(&var("A"), &var("B"), [(1, 1), (2, 2)]).unwrap();
        let solution = csp.solve().unwrap();
        assert_eq!(solution.get(&var("A")), solution.get(&var("B")));
    }

    #[test]
    fn maintained_propagation_agrees_with_plain_backtracking() {
        let entries: &[(&str, &[u8])] = &[
            ("A", &[1, 2]),
            ("B", &[1, 2]),
            ("C", &[1, 2]),
            ("D", &[1, 2, 3]),
        ];
        let edges: Vec<(&str, &str)> = vec![("A", "B"), ("B", "C"), ("A", "C"), ("C", "D")];

        let mut plain = csp(entries, &edges);
        let mut maintained = csp(entries, &edges);
        // The triangle A-B-C over two values is unsatisfiable.
        assert!(plain.solve().is_none());
        assert!(maintained.solve_with(Propagation::Maintained).is_none());
    }

    #[test]
    fn preprocess_prunes_before_searching() {
        let mut csp = csp(&[("A", &[1, 2]), ("B", &[1])], &[("A", "B")]);
        let solution = csp.solve_with(Propagation::Preprocess).unwrap();
        assert_eq!(solution.get(&var("A")), Some(&2));
        assert_eq!(csp.stats().prunings, 1);
    }

    #[test]
    fn alldiff_clique_forces_distinct_values() {
        let variables: Vec<Variable> = ["A", "B", "C"].iter().map(|n| var(n)).collect();
        let domains: HashMap<Variable, HashSet<u8>> = variables
            .iter()
            .map(|v| (v.clone(), hashset![1, 2, 3]))
            .collect();
        let mut csp = Csp::new(variables.clone(), domains, alldiff(&variables)).unwrap();

        let solution = csp.solve().unwrap();
        let values: HashSet<u8> = variables.iter().map(|v| *solution.get(v).unwrap()).collect();
        assert_eq!(values.len(), 3);
    }

    mod brute_force {
        use im::{HashMap, HashSet};
        use proptest::prelude::*;

        use super::super::{Csp, Propagation};
        use crate::solver::variable::Variable;

        fn var(index: usize) -> Variable {
            Variable::from(format!("v{index}"))
        }

        fn build(domains: &[Vec<u8>], edges: &[(usize, usize)]) -> Csp<u8> {
            let variables: Vec<Variable> = (0..domains.len()).map(var).collect();
            let domain_map: HashMap<Variable, HashSet<u8>> = domains
                .iter()
                .enumerate()
                .map(|(i, values)| (var(i), values.iter().copied().collect()))
                .collect();
            let edge_list = edges.iter().map(|&(i, j)| (var(i), var(j))).collect();
            Csp::new(variables, domain_map, edge_list).unwrap()
        }

        /// Enumerates every complete assignment and keeps the consistent
        /// ones. Only viable on the tiny instances generated below.
        fn enumerate_solutions(domains: &[Vec<u8>], edges: &[(usize, usize)]) -> Vec<Vec<u8>> {
            let n = domains.len();
            let mut solutions = Vec::new();
            let mut choice = vec![0usize; n];
            loop {
                let values: Vec<u8> = (0..n).map(|i| domains[i][choice[i]]).collect();
                if edges.iter().all(|&(i, j)| values[i] != values[j]) {
                    solutions.push(values);
                }
                let mut k = 0;
                loop {
                    if k == n {
                        return solutions;
                    }
                    choice[k] += 1;
                    if choice[k] < domains[k].len() {
                        break;
                    }
                    choice[k] = 0;
                    k += 1;
                }
            }
        }

        fn arbitrary_instance() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<(usize, usize)>)> {
            (1..5usize)
                .prop_flat_map(|n| {
                    let pairs: Vec<(usize, usize)> = (0..n)
                        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
                        .collect();
                    let domains = proptest::collection::vec(
                        proptest::collection::hash_set(0u8..4, 1..=3)
                            .prop_map(|s| s.into_iter().collect::<Vec<u8>>()),
                        n,
                    );
                    let mask = proptest::collection::vec(any::<bool>(), pairs.len());
                    (domains, Just(pairs), mask)
                })
                .prop_map(|(domains, pairs, mask)| {
                    let edges = pairs
                        .into_iter()
                        .zip(mask)
                        .filter(|&(_, keep)| keep)
                        .map(|(pair, _)| pair)
                        .collect();
                    (domains, edges)
                })
        }

        proptest! {
            // Completeness and soundness against exhaustive enumeration.
            #[test]
            fn solve_matches_brute_force(
                (domains, edges) in arbitrary_instance(),
            ) {
                let solutions = enumerate_solutions(&domains, &edges);
                for policy in [Propagation::Off, Propagation::Maintained] {
                    let mut csp = build(&domains, &edges);
                    match csp.solve_with(policy) {
                        Some(found) => {
                            prop_assert!(
                                !solutions.is_empty(),
                                "solver found an assignment for an unsatisfiable instance"
                            );
                            prop_assert_eq!(found.len(), domains.len());
                            for &(i, j) in &edges {
                                let vi = found.get(&var(i)).unwrap();
                                let vj = found.get(&var(j)).unwrap();
                                prop_assert!(csp.graph().compatible(&var(i), vi, &var(j), vj));
                            }
                            for (i, domain) in domains.iter().enumerate() {
                                prop_assert!(domain.contains(found.get(&var(i)).unwrap()));
                            }
                        }
                        None => prop_assert!(
                            solutions.is_empty(),
                            "solver missed {} solution(s)",
                            solutions.len()
                        ),
                    }
                }
            }

            // AC-3 never removes a value that participates in some
            // consistent complete assignment.
            #[test]
            fn propagation_keeps_every_solution_value(
                (domains, edges) in arbitrary_instance(),
            ) {
                let solutions = enumerate_solutions(&domains, &edges);
                let mut csp = build(&domains, &edges);
                if csp.propagate() {
                    for solution in &solutions {
                        for (i, value) in solution.iter().enumerate() {
                            prop_assert!(
                                csp.domains().get(&var(i)).contains(value),
                                "AC-3 pruned {} from v{}, which solution {:?} needs",
                                value,
                                i,
                                solution
                            );
                        }
                    }
                } else {
                    prop_assert!(solutions.is_empty());
                }
            }
        }
    }
}
