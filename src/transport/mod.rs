//! Optimal transport abstractions shared by every solver.
//!
//! ## Core Types
//!
//! - [`Coupling`]: A transport plan between two distributions
//! - [`Density`]: A discrete probability distribution over indexed atoms
//! - [`Measure`]: Ground cost between atoms of the two sides
//! - [`Support`]: Marker for atom identifiers
//!
//! Solvers differ only in how they approximate the plan; callers drive every
//! one of them the same way: construct, [`Coupling::minimize`], then read
//! [`Coupling::cost`].
mod coupling;
mod density;
mod measure;
mod support;

pub use coupling::*;
pub use density::*;
pub use measure::*;
pub use support::*;
