use super::adjacency::Candidates;
use super::grid::Grid;
use super::neighbors::Neighbors;
use super::potential::Potential;
use crate::CostMatrix;
use crate::Distribution;
use crate::Energy;
use crate::Entropy;
use crate::Point;
use crate::Probability;
use crate::transport::Coupling;

/// Grid-hashed log-domain Sinkhorn: the fastest-but-approximate solver.
///
/// Targets are bucketed into a ⌊√N/2⌋-wide grid over the unit square. Each
/// source takes up to 20 targets from its own cell and the eight around it,
/// in bucket enumeration order, and each target's candidates are the sources
/// that listed it. Two plain sweeps from zero potentials follow.
///
/// Costs come from the matrix; coordinates only decide who may be paired.
/// Near-duplicate points crowding one cell can push a source's closest
/// partners past the cap, so the distance is an estimate whose error depends
/// on density and clustering.
pub struct Spatial<'a> {
    cost: &'a CostMatrix,
    rows: Neighbors,
    cols: Neighbors,
    lhs: Potential,
    rhs: Potential,
    epsilon: Entropy,
    iterations: usize,
}

impl Spatial<'_> {
    /// Overrides the number of sweeps.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
    /// Candidate targets of each source.
    pub fn support(&self) -> &Neighbors {
        &self.rows
    }

    fn sinkhorn(&mut self) {
        let cost = self.cost;
        for _ in 0..self.iterations {
            self.rhs.sweep(&self.lhs, &self.cols, self.epsilon, 1., |j, i| cost[(i, j)]);
            self.lhs.sweep(&self.rhs, &self.rows, self.epsilon, 1., |i, j| cost[(i, j)]);
        }
        log::debug!(
            "spatial sinkhorn n={} edges={} sweeps={}",
            self.lhs.len(),
            self.rows.edges(),
            self.iterations
        );
    }
    /// Caps each source's grid neighbourhood at the candidate width.
    fn hash(sources: &[Point], targets: &[Point]) -> Neighbors {
        let n = sources.len();
        let grid = Grid::from((targets, Grid::size_for(n)));
        let mut rows = Neighbors::new(n, crate::SPATIAL_NEIGHBORS);
        for (i, source) in sources.iter().enumerate() {
            for j in grid.neighborhood(grid.cell(source)) {
                if !rows.insert(i, j) {
                    break;
                }
            }
        }
        rows
    }
}

impl Coupling for Spatial<'_> {
    type X = usize;
    type Y = usize;
    type M = CostMatrix;
    type P = Potential;
    type Q = Potential;

    fn minimize(mut self) -> Self {
        self.sinkhorn();
        self
    }
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Probability {
        match self.rows.candidates(*x).contains(y) {
            true => ((self.lhs[*x] + self.rhs[*y] - self.cost[(*x, *y)]) / self.epsilon).exp(),
            false => 0.,
        }
    }
    fn cost(&self) -> Energy {
        (0..self.rows.len())
            .flat_map(|i| self.rows.candidates(i).iter().map(move |&j| (i, j)))
            .map(|(i, j)| {
                let c = self.cost[(i, j)];
                ((self.lhs[i] + self.rhs[j] - c) / self.epsilon).exp() * c
            })
            .sum::<Energy>()
    }
}

impl<'a>
    From<(
        &'a Distribution,
        &'a Distribution,
        &'a CostMatrix,
        Entropy,
        &'a [Point],
        &'a [Point],
    )> for Spatial<'a>
{
    fn from(
        (source, target, cost, epsilon, sources, targets): (
            &'a Distribution,
            &'a Distribution,
            &'a CostMatrix,
            Entropy,
            &'a [Point],
            &'a [Point],
        ),
    ) -> Self {
        let n = source.len();
        debug_assert!(target.len() == n, "unequal cardinality");
        debug_assert!(cost.rows() == n && cost.cols() == n, "cost does not match weights");
        debug_assert!(sources.len() == n && targets.len() == n, "points do not match weights");
        let rows = Self::hash(sources, targets);
        let cols = rows.transpose(n);
        Self {
            cost,
            rows,
            cols,
            lhs: Potential::zeroes(n),
            rhs: Potential::zeroes(n),
            epsilon,
            iterations: crate::SPATIAL_ITERATIONS,
        }
    }
}
