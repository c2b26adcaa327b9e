use crate::CostMatrix;
use crate::Distribution;
use crate::Energy;
use crate::Entropy;
use crate::Matrix;
use crate::Plan;
use crate::Probability;
use crate::transport::Coupling;

/// Classic multiplicative Sinkhorn-Knopp over the full N×M support.
///
/// The ground-truth baseline: exact marginals in the limit, O(N·M) memory
/// for the Gibbs kernel and O(N·M) work per round.
///
/// # Algorithm
///
/// 1. Precompute the kernel K = exp(-C / ε)
/// 2. Alternately rescale v = b / (Kᵀu + δ) and u = a / (Kv + δ)
/// 3. Stop once the L1 change in u drops below tolerance
/// 4. The plan is P = diag(u) K diag(v)
///
/// # Stability
///
/// Small ε relative to the cost scale underflows the kernel: transported mass
/// collapses toward zero and the distance degrades to 0, NaN or infinity.
/// Only the δ = 1e-30 guard is applied; pick ε to suit the costs, or use a
/// log-domain solver.
pub struct Dense<'a> {
    /// Source marginal a.
    source: &'a Distribution,
    /// Target marginal b.
    target: &'a Distribution,
    /// Ground cost C.
    cost: &'a CostMatrix,
    /// Gibbs kernel exp(-C / ε).
    kernel: Matrix,
    /// Row scaling.
    u: Vec<Probability>,
    /// Column scaling.
    v: Vec<Probability>,
    /// L1 change in u after each round.
    trace: Vec<Energy>,
    iterations: usize,
    tolerance: Energy,
}

impl Dense<'_> {
    /// Overrides the maximum number of scaling rounds.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }
    /// Overrides the early stopping threshold.
    pub fn with_tolerance(mut self, tolerance: Energy) -> Self {
        self.tolerance = tolerance;
        self
    }
    /// Materialized transport plan P[i][j] = u[i]·K[i][j]·v[j].
    pub fn plan(&self) -> Plan {
        Plan::from_fn(self.kernel.rows(), self.kernel.cols(), |i, j| {
            self.flow(&i, &j)
        })
    }
    /// L1 change in the row scaling after each completed round.
    pub fn trace(&self) -> &[Energy] {
        &self.trace
    }
    /// Rounds actually run.
    pub fn rounds(&self) -> usize {
        self.trace.len()
    }

    fn sinkhorn(&mut self) {
        for t in 0..self.iterations {
            self.v = self.scale_v();
            let next = self.scale_u();
            let delta = Self::delta(&self.u, &next);
            self.u = next;
            self.trace.push(delta);
            log::trace!("dense sinkhorn round {:>4} delta {:.3e}", t, delta);
            if delta < self.tolerance {
                break;
            }
        }
        if self.u.iter().chain(self.v.iter()).any(|s| !s.is_finite()) {
            log::warn!("dense sinkhorn scaling overflow, consider raising epsilon");
        }
        log::debug!(
            "dense sinkhorn {}x{} converged in {} rounds",
            self.kernel.rows(),
            self.kernel.cols(),
            self.rounds()
        );
    }
    /// v[j] = b[j] / (Σ_i K[i][j]·u[i] + δ)
    fn scale_v(&self) -> Vec<Probability> {
        let mut marginal = vec![0.; self.kernel.cols()];
        for (i, u) in self.u.iter().enumerate() {
            for (m, k) in marginal.iter_mut().zip(self.kernel.row(i)) {
                *m += k * u;
            }
        }
        self.target
            .iter()
            .zip(marginal)
            .map(|(b, m)| b / (m + self.stabilizer()))
            .collect()
    }
    /// u[i] = a[i] / (Σ_j K[i][j]·v[j] + δ)
    fn scale_u(&self) -> Vec<Probability> {
        self.source
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let marginal = self
                    .kernel
                    .row(i)
                    .iter()
                    .zip(self.v.iter())
                    .map(|(k, v)| k * v)
                    .sum::<Probability>();
                a / (marginal + self.stabilizer())
            })
            .collect()
    }
    /// L1 distance between successive row scalings.
    fn delta(prev: &[Probability], next: &[Probability]) -> Energy {
        prev.iter().zip(next).map(|(p, n)| (n - p).abs()).sum()
    }
    const fn stabilizer(&self) -> Energy {
        crate::DENSE_STABILIZER
    }
}

impl Coupling for Dense<'_> {
    type X = usize;
    type Y = usize;
    type M = CostMatrix;
    type P = Distribution;
    type Q = Distribution;

    fn minimize(mut self) -> Self {
        self.sinkhorn();
        self
    }
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Probability {
        self.u[*x] * self.kernel[(*x, *y)] * self.v[*y]
    }
    fn cost(&self) -> Energy {
        (0..self.cost.rows())
            .flat_map(|i| (0..self.cost.cols()).map(move |j| (i, j)))
            .map(|(i, j)| self.flow(&i, &j) * self.cost[(i, j)])
            .sum::<Energy>()
    }
}

impl<'a> From<(&'a Distribution, &'a Distribution, &'a CostMatrix, Entropy)> for Dense<'a> {
    fn from(
        (source, target, cost, epsilon): (
            &'a Distribution,
            &'a Distribution,
            &'a CostMatrix,
            Entropy,
        ),
    ) -> Self {
        debug_assert!(source.len() == cost.rows(), "source marginal does not match cost rows");
        debug_assert!(target.len() == cost.cols(), "target marginal does not match cost cols");
        Self {
            source,
            target,
            cost,
            kernel: cost.map(|c| (-c / epsilon).exp()),
            u: vec![1.; cost.rows()],
            v: vec![1.; cost.cols()],
            trace: Vec::new(),
            iterations: crate::DENSE_ITERATIONS,
            tolerance: crate::DENSE_TOLERANCE,
        }
    }
}
