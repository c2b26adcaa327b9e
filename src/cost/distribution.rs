use crate::Energy;
use crate::Probability;
use crate::transport::Density;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;
use std::ops::Deref;

/// Probability vector over indexed atoms: N non-negative masses summing to 1.
///
/// Nothing here enforces the unit sum; construct through
/// [`normalize`](Distribution::normalize), [`uniform`](Distribution::uniform)
/// or [`random`](Distribution::random) when that matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution(Vec<Probability>);

impl Distribution {
    /// Equal mass 1/n on every atom.
    pub fn uniform(n: usize) -> Self {
        Self(vec![1. / n as Probability; n])
    }
    /// Divides every weight by the total.
    ///
    /// A zero total yields NaN/Inf entries; callers must supply positive mass.
    pub fn normalize(weights: &[Energy]) -> Self {
        let total = weights.iter().sum::<Energy>();
        Self(weights.iter().map(|w| w / total).collect())
    }
    /// Random normalized distribution of length n.
    pub fn random(n: usize) -> Self {
        Self::random_with(n, &mut rand::rng())
    }
    /// Random normalized distribution of length n drawn from `rng`.
    pub fn random_with<R>(n: usize, rng: &mut R) -> Self
    where
        R: Rng,
    {
        Self::normalize(&(0..n).map(|_| rng.random::<Energy>()).collect::<Vec<_>>())
    }
    /// Total mass.
    pub fn total(&self) -> Probability {
        self.0.iter().sum()
    }
    /// Extends to length n with zero-mass atoms.
    pub fn padded(&self, n: usize) -> Self {
        debug_assert!(n >= self.len(), "padding cannot shrink");
        Self(
            self.0
                .iter()
                .copied()
                .chain(std::iter::repeat(0.))
                .take(n)
                .collect(),
        )
    }
}

impl Deref for Distribution {
    type Target = [Probability];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Probability>> for Distribution {
    fn from(masses: Vec<Probability>) -> Self {
        Self(masses)
    }
}

impl Density for Distribution {
    type Support = usize;
    fn density(&self, x: &Self::Support) -> Probability {
        self.0.get(*x).copied().unwrap_or(0.)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        0..self.0.len()
    }
}
