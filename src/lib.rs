//! Vincolo is a solver for binary constraint satisfaction problems (CSPs).
//!
//! A problem is described by a set of variables, a finite domain of candidate
//! values per variable, and edges between pairs of variables that constrain
//! which value pairs they may take together. By default an edge means "must
//! differ", which is enough to express all-different cliques such as Sudoku
//! rows or the regions of a map; [`Csp::restrict`](solver::engine::Csp::restrict)
//! swaps in an arbitrary binary relation for an edge.
//!
//! The engine combines AC-3 constraint propagation with backtracking search.
//! An unsatisfiable instance is a normal outcome (`solve` returns `None`),
//! not an error; errors only arise from malformed instances at construction.
//!
//! # Example
//!
//! Two variables that must differ, where `B` can only be `1`, so `A` has to
//! end up as `2`:
//!
//! ```
//! use im::{hashset, HashMap};
//! use vincolo::solver::engine::Csp;
//! use vincolo::solver::variable::Variable;
//!
//! let a = Variable::from("A");
//! let b = Variable::from("B");
//!
//! let mut domains = HashMap::new();
//! domains.insert(a.clone(), hashset![1, 2]);
//! domains.insert(b.clone(), hashset![1]);
//!
//! let mut csp = Csp::new(
//!     vec![a.clone(), b.clone()],
//!     domains,
//!     vec![(a.clone(), b.clone())],
//! )
//! .unwrap();
//!
//! let solution = csp.solve().unwrap();
//! assert_eq!(solution.get(&a), Some(&2));
//! assert_eq!(solution.get(&b), Some(&1));
//! ```
pub mod error;
pub mod problems;
pub mod solver;
