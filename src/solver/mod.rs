pub mod assignment;
pub mod domains;
pub mod engine;
pub mod graph;
pub mod stats;
pub mod value;
pub mod variable;

pub(crate) mod propagation;
pub(crate) mod work_list;
