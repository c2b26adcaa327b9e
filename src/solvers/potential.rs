use super::adjacency::Candidates;
use crate::Energy;
use crate::Entropy;
use crate::Probability;
use crate::transport::Density;
use std::ops::Index;

/// Log-domain dual potential (f on the source side, g on the target side).
///
/// The coupling is implicit: mass on (x, y) is exp((f[x] + g[y] - C[x][y]) / ε).
/// Scratch state of a single solve, never shared between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Potential(Vec<Entropy>);

impl Potential {
    /// Zero potential over n atoms.
    pub fn zeroes(n: usize) -> Self {
        Self(vec![0.; n])
    }
    /// Greedy warm start f[x] = -min C[x][y] over each row's candidates.
    pub fn greedy<C, F>(partners: &C, cost: F) -> Self
    where
        C: Candidates,
        F: Fn(usize, usize) -> Energy,
    {
        Self(
            (0..partners.len())
                .map(|x| {
                    partners
                        .candidates(x)
                        .iter()
                        .map(|&y| cost(x, y))
                        .fold(Energy::INFINITY, Energy::min)
                })
                .map(|c| -c)
                .collect(),
        )
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Recomputes every entry against the opposite potential so that each
    /// atom's marginal over its candidates equals the uniform mass 1/N.
    ///
    /// Entries are blended with their previous value by `omega`
    /// (`omega = 1` replaces them outright). Atoms without candidates keep
    /// their current value.
    pub fn sweep<C, F>(
        &mut self,
        other: &Self,
        partners: &C,
        epsilon: Entropy,
        omega: Entropy,
        cost: F,
    ) where
        C: Candidates,
        F: Fn(usize, usize) -> Energy,
    {
        let mass = (1. / self.len() as Entropy).ln();
        for x in 0..self.len() {
            let candidates = partners.candidates(x);
            if candidates.is_empty() {
                continue;
            }
            let next = softmin(epsilon, mass, candidates, |y| (other[y] - cost(x, y)) / epsilon);
            self.0[x] = omega * next + (1. - omega) * self.0[x];
        }
    }
}

/// ε·(μ − log Σ_y exp(e(y))) over the candidate set, where μ is a log-mass.
///
/// The maximum exponent is factored out before exponentiating.
pub fn softmin<F>(epsilon: Entropy, mass: Entropy, candidates: &[usize], exponent: F) -> Entropy
where
    F: Fn(usize) -> Entropy,
{
    let max = candidates
        .iter()
        .map(|&y| exponent(y))
        .fold(Entropy::NEG_INFINITY, Entropy::max);
    let sum = candidates
        .iter()
        .map(|&y| exponent(y) - max)
        .map(Entropy::exp)
        .sum::<Entropy>();
    epsilon * (mass - (max + sum.ln()))
}

impl Index<usize> for Potential {
    type Output = Entropy;
    fn index(&self, x: usize) -> &Self::Output {
        &self.0[x]
    }
}

impl Density for Potential {
    type Support = usize;
    fn density(&self, x: &Self::Support) -> Probability {
        self.0.get(*x).copied().unwrap_or(0.)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        0..self.0.len()
    }
}
