use super::dense::Dense;
use super::problem::Problem;
use super::sliced::Sliced;
use super::sparse::Sparse;
use super::spatial::Spatial;
use crate::Energy;
use crate::Point;
use crate::transport::Coupling;
use anyhow::bail;
use serde::Deserialize;
use serde::Serialize;

/// Runtime choice among the four solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Solver {
    Dense,
    Sparse,
    Spatial,
    Sliced,
}

impl Solver {
    pub const fn all() -> [Self; 4] {
        [Self::Dense, Self::Sparse, Self::Spatial, Self::Sliced]
    }
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Sparse => "sparse",
            Self::Spatial => "spatial",
            Self::Sliced => "sliced",
        }
    }
    /// Whether this solver reads 2-D coordinates.
    pub const fn geometric(&self) -> bool {
        matches!(self, Self::Spatial | Self::Sliced)
    }
    /// Rejects problems outside this solver's input contract.
    pub fn check(&self, problem: &Problem) -> anyhow::Result<()> {
        let (n, m) = problem.size();
        if problem.cost.rows() != n || problem.cost.cols() != m {
            bail!(
                "cost is {}x{} but weights are {}x{}",
                problem.cost.rows(),
                problem.cost.cols(),
                n,
                m
            );
        }
        if !(problem.epsilon > 0.) {
            bail!("epsilon must be positive, got {}", problem.epsilon);
        }
        if let Self::Dense = self {
            return Ok(());
        }
        if n != m {
            bail!(
                "{} solver needs equal cardinality, got {}x{}; pad the problem first",
                self,
                n,
                m
            );
        }
        if self.geometric() {
            match (&problem.sources, &problem.targets) {
                (Some(xs), Some(ys)) if xs.len() == n && ys.len() == n => {}
                (Some(xs), Some(ys)) => bail!(
                    "{} solver got {}/{} points for {} atoms",
                    self,
                    xs.len(),
                    ys.len(),
                    n
                ),
                _ => bail!("{} solver needs source and target coordinates", self),
            }
        }
        Ok(())
    }
    /// Checks the contract, then solves and returns the transport distance.
    pub fn distance(&self, problem: &Problem) -> anyhow::Result<Energy> {
        self.check(problem)?;
        let Problem {
            source: a,
            target: b,
            cost: c,
            epsilon,
            ..
        } = problem;
        let xs = problem.sources.as_deref().unwrap_or(&[] as &[Point]);
        let ys = problem.targets.as_deref().unwrap_or(&[] as &[Point]);
        let distance = match self {
            Self::Dense => Dense::from((a, b, c, *epsilon)).minimize().cost(),
            Self::Sparse => Sparse::from((a, b, c, *epsilon)).minimize().cost(),
            Self::Spatial => Spatial::from((a, b, c, *epsilon, xs, ys)).minimize().cost(),
            Self::Sliced => Sliced::from((a, b, c, *epsilon, xs, ys)).minimize().cost(),
        };
        if !distance.is_finite() {
            log::warn!("{} solver returned {} for n={}", self, distance, a.len());
        }
        log::debug!("{} distance {:.6} (n={}, ε={})", self, distance, a.len(), epsilon);
        Ok(distance)
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CostMatrix;
    use crate::Distribution;
    use crate::Entropy;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn every_solver_handles_a_square_problem() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let problem = Problem::random_with(30, 0.05, rng);
        for solver in Solver::all() {
            let distance = solver.distance(&problem).unwrap();
            assert!(distance.is_finite() && distance >= 0., "{solver}: {distance}");
        }
    }
    #[test]
    fn only_dense_accepts_rectangles() {
        let problem = Problem::euclidean(vec![[0., 0.], [1., 0.]], vec![[0., 1.]], 0.5);
        assert!(Solver::Dense.distance(&problem).is_ok());
        for solver in [Solver::Sparse, Solver::Spatial, Solver::Sliced] {
            let error = solver.distance(&problem).unwrap_err().to_string();
            assert!(error.contains("equal cardinality"), "{error}");
        }
        let padded = problem.padded(2, 1e3, [0.5, 0.5]);
        assert!(Solver::Sparse.distance(&padded).is_ok());
    }
    #[test]
    fn geometric_solvers_need_points() {
        let problem = Problem::new(
            Distribution::uniform(2),
            Distribution::uniform(2),
            CostMatrix::filled(2, 2, 1.),
            0.1,
        );
        assert!(Solver::Sparse.check(&problem).is_ok());
        assert!(Solver::Spatial.check(&problem).is_err());
        assert!(Solver::Sliced.check(&problem).is_err());
        let problem = problem.with_points(vec![[0., 0.]], vec![[0., 0.], [1., 1.]]);
        assert!(Solver::Sliced.check(&problem).is_err());
    }
    #[test]
    fn rejects_mismatched_cost_and_temperature() {
        let mut problem = Problem::new(
            Distribution::uniform(2),
            Distribution::uniform(2),
            CostMatrix::filled(3, 2, 1.),
            0.1,
        );
        assert!(Solver::Dense.check(&problem).is_err());
        problem.cost = CostMatrix::filled(2, 2, 1.);
        problem.epsilon = 0.;
        assert!(Solver::Dense.check(&problem).is_err());
        problem.epsilon = Entropy::NAN;
        assert!(Solver::Dense.check(&problem).is_err());
    }
    #[test]
    fn names_roundtrip_through_serde() {
        for solver in Solver::all() {
            let json = serde_json::to_string(&solver).unwrap();
            assert_eq!(json, format!("\"{}\"", solver));
            assert_eq!(serde_json::from_str::<Solver>(&json).unwrap(), solver);
        }
    }
}
