use crate::Arbitrary;
use crate::CostMatrix;
use crate::Distribution;
use crate::Energy;
use crate::Entropy;
use crate::Point;
use crate::euclidean;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// An owned transport instance: two marginals, their ground cost, the
/// regularization temperature, and optionally the 2-D coordinates the
/// geometric solvers need.
///
/// ```json
/// {
///   "source": [0.5, 0.5],
///   "target": [0.5, 0.5],
///   "cost": [[0.0, 1.0], [1.0, 0.0]],
///   "epsilon": 0.05,
///   "sources": [[0.0, 0.0], [1.0, 0.0]],
///   "targets": [[0.0, 0.0], [1.0, 0.0]]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub source: Distribution,
    pub target: Distribution,
    pub cost: CostMatrix,
    pub epsilon: Entropy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<Point>>,
}

impl Problem {
    pub fn new(
        source: Distribution,
        target: Distribution,
        cost: CostMatrix,
        epsilon: Entropy,
    ) -> Self {
        Self {
            source,
            target,
            cost,
            epsilon,
            sources: None,
            targets: None,
        }
    }
    /// Attaches coordinates for the spatial and sliced solvers.
    pub fn with_points(mut self, sources: Vec<Point>, targets: Vec<Point>) -> Self {
        self.sources = Some(sources);
        self.targets = Some(targets);
        self
    }
    /// Uniform weights over coordinates, Euclidean ground cost.
    pub fn euclidean(sources: Vec<Point>, targets: Vec<Point>, epsilon: Entropy) -> Self {
        Self::new(
            Distribution::uniform(sources.len()),
            Distribution::uniform(targets.len()),
            euclidean(&sources, &targets),
            epsilon,
        )
        .with_points(sources, targets)
    }
    /// N uniform-weight sources and targets scattered over the unit square.
    pub fn random_with<R>(n: usize, epsilon: Entropy, rng: &mut R) -> Self
    where
        R: Rng,
    {
        let sources = (0..n).map(|_| [rng.random(), rng.random()]).collect();
        let targets = (0..n).map(|_| [rng.random(), rng.random()]).collect();
        Self::euclidean(sources, targets, epsilon)
    }
    /// (source atoms, target atoms).
    pub fn size(&self) -> (usize, usize) {
        (self.source.len(), self.target.len())
    }
    pub fn is_square(&self) -> bool {
        self.source.len() == self.target.len() && self.cost.is_square()
    }
    /// Square n×n version for the equal-cardinality solvers.
    ///
    /// Added atoms carry zero weight, every cost touching them is `sentinel`,
    /// and their coordinates (if any) are `filler`.
    pub fn padded(&self, n: usize, sentinel: Energy, filler: Point) -> Self {
        let pad = |points: &Vec<Point>| {
            points
                .iter()
                .copied()
                .chain(std::iter::repeat(filler))
                .take(n)
                .collect::<Vec<_>>()
        };
        Self {
            source: self.source.padded(n),
            target: self.target.padded(n),
            cost: self.cost.padded(n, sentinel),
            epsilon: self.epsilon,
            sources: self.sources.as_ref().map(pad),
            targets: self.targets.as_ref().map(pad),
        }
    }
}

impl Arbitrary for Problem {
    fn random() -> Self {
        Self::random_with(64, 0.05, &mut rand::rng())
    }
}
