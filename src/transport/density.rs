use super::support::Support;
use crate::Probability;

/// A discrete distribution (or dual potential) over a support set.
///
/// # Required Methods
///
/// - [`density`](Density::density): Query the value at a point
/// - [`support`](Density::support): Iterate over every point
pub trait Density {
    /// The type of elements in the distribution's support.
    type Support: Support;
    /// Returns the value at point `x`, or 0 if not in support.
    fn density(&self, x: &Self::Support) -> Probability;
    /// Iterates over all points of the support, in index order.
    fn support(&self) -> impl Iterator<Item = Self::Support>;
}
