use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// An opaque identifier for a variable in a constraint problem.
///
/// Variables are compared and hashed by name, and the name is immutable for
/// the lifetime of the problem. The backing storage is reference-counted, so
/// cloning a `Variable` is cheap; the solver clones them freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(Arc<str>);

impl Variable {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for Variable {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Variable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
