/// Marker trait for types that form the support of a probability distribution.
///
/// The `Clone` bound enables copying support elements when constructing
/// transport plans and iterating over distributions.
pub trait Support: Clone {}

/// Atoms are addressed by their position in the input vectors.
impl Support for usize {}
