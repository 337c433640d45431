/// The base trait for any value that can appear in a variable's domain.
///
/// This is a marker trait with a blanket impl: anything cloneable,
/// debuggable, equatable and hashable qualifies. Domains are homogeneous
/// across a problem, so a single value type serves the whole instance even
/// when individual variables start from different candidate sets.
pub trait Value: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
impl<T> Value for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
