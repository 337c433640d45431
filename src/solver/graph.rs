use std::collections::{HashMap, HashSet};

use crate::{
    error::{Error, Result},
    solver::{domains::DomainSet, value::Value, variable::Variable},
};

/// An unordered pair of distinct variables declared mutually constrained.
pub type Edge = (Variable, Variable);

/// Returns the edges interconnecting all of the given variables, i.e. the
/// complete pairwise edge set of an all-different clique.
pub fn alldiff(variables: &[Variable]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(variables.len() * variables.len().saturating_sub(1) / 2);
    for i in 0..variables.len() {
        for j in (i + 1)..variables.len() {
            edges.push((variables[i].clone(), variables[j].clone()));
        }
    }
    edges
}

/// The static side of a problem: which variables constrain each other, and
/// which value pairs each constrained pair allows.
///
/// Built once at instance construction and never mutated by solving. The
/// allowed-pair table is keyed by *ordered* variable pairs and populated
/// symmetric-complete: every edge contributes entries under both orderings,
/// each holding pairs oriented to match its key. A pair of variables with no
/// table entry is unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintGraph<V: Value> {
    neighbors: HashMap<Variable, HashSet<Variable>>,
    allowed: HashMap<(Variable, Variable), HashSet<(V, V)>>,
}

impl<V: Value> ConstraintGraph<V> {
    /// Validates the instance and derives the neighbor relation and the
    /// allowed-pair tables. The default relation for every edge is
    /// "must differ": all value pairs except equal ones.
    pub(crate) fn build(
        variables: &[Variable],
        domains: &im::HashMap<Variable, DomainSet<V>>,
        edges: &[Edge],
    ) -> Result<Self> {
        let declared: HashSet<&Variable> = variables.iter().collect();
        for var in variables {
            if !domains.contains_key(var) {
                return Err(Error::MissingDomain(var.clone()));
            }
        }
        for var in domains.keys() {
            if !declared.contains(var) {
                return Err(Error::UndeclaredVariable(var.clone()));
            }
        }

        let mut neighbors: HashMap<Variable, HashSet<Variable>> = variables
            .iter()
            .map(|var| (var.clone(), HashSet::new()))
            .collect();
        let mut allowed = HashMap::new();

        for (a, b) in edges {
            if !declared.contains(a) {
                return Err(Error::UnknownVariable(a.clone()));
            }
            if !declared.contains(b) {
                return Err(Error::UnknownVariable(b.clone()));
            }
            if a == b {
                return Err(Error::SelfLoop(a.clone()));
            }

            neighbors.get_mut(a).unwrap().insert(b.clone());
            neighbors.get_mut(b).unwrap().insert(a.clone());

            let mut forward = HashSet::new();
            let mut backward = HashSet::new();
            for x in domains.get(a).unwrap() {
                for y in domains.get(b).unwrap() {
                    if x != y {
                        forward.insert((x.clone(), y.clone()));
                        backward.insert((y.clone(), x.clone()));
                    }
                }
            }
            allowed.insert((a.clone(), b.clone()), forward);
            allowed.insert((b.clone(), a.clone()), backward);
        }

        Ok(Self { neighbors, allowed })
    }

    /// Replaces the allowed value pairs for an existing edge, keeping both
    /// key orderings in sync. `pairs` is oriented as `(value of a, value of b)`.
    pub(crate) fn set_allowed(
        &mut self,
        a: &Variable,
        b: &Variable,
        pairs: HashSet<(V, V)>,
    ) -> Result<()> {
        if !self.allowed.contains_key(&(a.clone(), b.clone())) {
            return Err(Error::UnknownEdge(a.clone(), b.clone()));
        }
        let mirrored = pairs.iter().map(|(x, y)| (y.clone(), x.clone())).collect();
        self.allowed.insert((a.clone(), b.clone()), pairs);
        self.allowed.insert((b.clone(), a.clone()), mirrored);
        Ok(())
    }

    /// The variables sharing an edge with `var`.
    ///
    /// # Panics
    ///
    /// Panics if `var` was never declared.
    pub fn neighbors(&self, var: &Variable) -> &HashSet<Variable> {
        self.neighbors
            .get(var)
            .unwrap_or_else(|| panic!("no neighbor set for undeclared variable `{var}`"))
    }

    /// Every ordered arc with a table entry.
    pub fn arcs(&self) -> impl Iterator<Item = &(Variable, Variable)> {
        self.allowed.keys()
    }

    /// Whether `v1 = val1, v2 = val2` violates no binary constraint.
    ///
    /// Returns `false` only when a table entry exists for the pair (in
    /// either ordering) and the value pair is absent from it; an
    /// unconstrained pair is always compatible. Both orderings are checked
    /// because a table may be populated for only one of them.
    pub fn compatible(&self, v1: &Variable, val1: &V, v2: &Variable, val2: &V) -> bool {
        if let Some(pairs) = self.allowed.get(&(v1.clone(), v2.clone())) {
            if !pairs.contains(&(val1.clone(), val2.clone())) {
                return false;
            }
        }
        if let Some(pairs) = self.allowed.get(&(v2.clone(), v1.clone())) {
            if !pairs.contains(&(val2.clone(), val1.clone())) {
                return false;
            }
        }
        true
    }
}
