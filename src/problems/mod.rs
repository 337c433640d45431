//! Problem-specific harnesses built on the generic engine: instance
//! construction on the way in, rendering on the way out. The engine itself
//! knows nothing about maps or Sudoku grids.

pub mod map_coloring;
pub mod sudoku;
