use super::density::Density;
use super::measure::Measure;
use super::support::Support;
use crate::Energy;
use crate::Probability;

/// A transport plan (coupling) between two probability distributions.
///
/// A coupling is a joint distribution π(x,y) whose marginals approximate the
/// source distribution P and target distribution Q. The transport cost is the
/// expected ground cost under this joint distribution.
///
/// # Type Parameters
///
/// - `X`: Source support space
/// - `Y`: Target support space
/// - `M`: Ground metric defining transport costs
/// - `P`: Source distribution (marginal over X)
/// - `Q`: Target distribution (marginal over Y)
///
/// # Algorithm Contract
///
/// Implementations must ensure that after [`minimize`](Coupling::minimize) is called,
/// [`cost`](Coupling::cost) returns the solver's transport distance.
pub trait Coupling {
    /// Source support space.
    type X: Support;
    /// Target support space.
    type Y: Support;
    /// Ground metric for transport costs.
    type M: Measure<X = Self::X, Y = Self::Y>;
    /// Source probability distribution.
    type P: Density<Support = Self::X>;
    /// Target probability distribution.
    type Q: Density<Support = Self::Y>;
    /// Runs the solver's iteration and returns the optimized coupling.
    fn minimize(self) -> Self;
    /// Returns the mass transported from `x` to `y` in the coupling.
    ///
    /// For sparse couplings this is computed lazily and is zero outside the
    /// pruned support.
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Probability;
    /// Returns the total transport cost of this coupling.
    ///
    /// Different implementations use different strategies:
    /// - **Dense**: full double sum of `flow(x, y) * distance(x, y)`
    /// - **Sparse / Spatial**: the same sum restricted to candidate pairs
    /// - **Sliced**: mean of closed-form 1-D costs over projections
    fn cost(&self) -> Energy;
}
