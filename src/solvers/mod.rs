//! The four transport solvers, their shared log-domain machinery, and the
//! owned [`Problem`] / [`Solver`] pair for runtime dispatch.
mod adjacency;
mod dense;
mod grid;
mod neighbors;
mod potential;
mod problem;
mod sliced;
mod solver;
mod sparse;
mod spatial;

#[cfg(test)]
mod scenarios;

pub use adjacency::*;
pub use dense::*;
pub use grid::*;
pub use neighbors::*;
pub use potential::*;
pub use problem::*;
pub use sliced::*;
pub use solver::*;
pub use sparse::*;
pub use spatial::*;
