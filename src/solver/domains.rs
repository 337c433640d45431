use im::{HashMap, HashSet};

use crate::solver::{value::Value, variable::Variable};

/// The set of values currently considered possible for one variable.
pub type DomainSet<V> = HashSet<V>;

/// The mutable candidate-value sets, one per variable.
///
/// Domains only ever shrink after construction: propagation removes values
/// with no support, and the search narrows a variable to its chosen value.
/// An empty domain is a contradiction signal, checked by the caller after
/// every removal. The backing maps are persistent (`im`), so a
/// [`DomainSnapshot`] is a cheap structurally-shared copy and restoring one
/// undoes every in-place mutation made since it was taken.
#[derive(Debug, Clone)]
pub struct DomainStore<V: Value> {
    domains: HashMap<Variable, DomainSet<V>>,
}

/// A full copy of a [`DomainStore`] at a point in time.
#[derive(Debug, Clone)]
pub struct DomainSnapshot<V: Value>(HashMap<Variable, DomainSet<V>>);

impl<V: Value> DomainStore<V> {
    pub(crate) fn new(domains: HashMap<Variable, DomainSet<V>>) -> Self {
        Self { domains }
    }

    /// The current candidate set for `var`.
    ///
    /// # Panics
    ///
    /// Panics if `var` was never declared; construction validates every
    /// variable, so an unknown one here is a programming error.
    pub fn get(&self, var: &Variable) -> &DomainSet<V> {
        self.domains
            .get(var)
            .unwrap_or_else(|| panic!("no domain for undeclared variable `{var}`"))
    }

    /// Removes `value` from `var`'s domain, returning whether it was present.
    /// The caller must check for emptiness afterwards.
    pub fn remove(&mut self, var: &Variable, value: &V) -> bool {
        match self.domains.get_mut(var) {
            Some(domain) => domain.remove(value).is_some(),
            None => panic!("no domain for undeclared variable `{var}`"),
        }
    }

    /// Narrows `var`'s domain to the single chosen `value`.
    pub fn assign(&mut self, var: &Variable, value: &V) {
        let singleton: DomainSet<V> = std::iter::once(value.clone()).collect();
        self.domains.insert(var.clone(), singleton);
    }

    pub fn snapshot(&self) -> DomainSnapshot<V> {
        DomainSnapshot(self.domains.clone())
    }

    pub fn restore(&mut self, snapshot: &DomainSnapshot<V>) {
        self.domains = snapshot.0.clone();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &DomainSet<V>)> {
        self.domains.iter()
    }
}
