//! Cost matrices, probability vectors, and the pairwise-distance builders
//! every solver consumes.
mod distribution;
mod matrix;
mod metric;

pub use distribution::*;
pub use matrix::*;
pub use metric::*;
