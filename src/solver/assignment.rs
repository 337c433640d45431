use im::HashMap;

use crate::solver::{value::Value, variable::Variable};

/// A partial mapping of variables to chosen values, built up during search.
///
/// Complete once it covers every variable of the problem; the engine only
/// returns complete assignments. Every bound pair of neighboring variables
/// satisfies the constraint table at all times, because the engine checks
/// compatibility before binding.
#[derive(Debug, Clone)]
pub struct Assignment<V: Value> {
    bindings: HashMap<Variable, V>,
}

impl<V: Value> Assignment<V> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn get(&self, var: &Variable) -> Option<&V> {
        self.bindings.get(var)
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.bindings.contains_key(var)
    }

    pub(crate) fn bind(&mut self, var: Variable, value: V) {
        self.bindings.insert(var, value);
    }

    pub(crate) fn unbind(&mut self, var: &Variable) {
        self.bindings.remove(var);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &V)> {
        self.bindings.iter()
    }
}

impl<V: Value> Default for Assignment<V> {
    fn default() -> Self {
        Self::new()
    }
}
