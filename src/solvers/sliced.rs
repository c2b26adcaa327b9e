use crate::CostMatrix;
use crate::Distribution;
use crate::Energy;
use crate::Entropy;
use crate::Point;
use crate::Probability;
use crate::transport::Coupling;
use std::f64::consts::TAU;

/// Sliced 1-D transport over fixed projection directions.
///
/// Both point sets are projected onto the unit directions at angles 2πs/S,
/// s = 0..S. Sorting each projection solves 1-D transport between uniform
/// N-atom measures exactly, so each slice costs Σ_k |x₍ₖ₎ - y₍ₖ₎| / N and the
/// distance is the mean over slices.
///
/// Weights, the cost matrix and ε are accepted for parity with the other
/// solvers and never read: the answer is always the uniform-mass one.
pub struct Sliced<'a> {
    sources: &'a [Point],
    targets: &'a [Point],
    /// Per slice, the target paired with each source.
    matches: Vec<Vec<usize>>,
    /// Per slice, the 1-D transport cost.
    gaps: Vec<Energy>,
    slices: usize,
}

impl Sliced<'_> {
    /// Overrides the number of projection directions.
    pub fn with_slices(mut self, slices: usize) -> Self {
        self.slices = slices;
        self
    }
    /// 1-D transport cost of each slice.
    pub fn gaps(&self) -> &[Energy] {
        &self.gaps
    }

    /// Unit direction of slice s.
    fn direction(&self, s: usize) -> Point {
        let angle = TAU * s as Energy / self.slices as Energy;
        [angle.cos(), angle.sin()]
    }
    fn project(points: &[Point], [dx, dy]: Point) -> Vec<Energy> {
        points.iter().map(|p| p[0] * dx + p[1] * dy).collect()
    }
    /// Indices ordered by ascending projection, ties by index.
    fn rank(projection: &[Energy]) -> Vec<usize> {
        let mut order = (0..projection.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| projection[a].total_cmp(&projection[b]));
        order
    }
    fn slice(&self, s: usize) -> (Vec<usize>, Energy) {
        let direction = self.direction(s);
        let xs = Self::project(self.sources, direction);
        let ys = Self::project(self.targets, direction);
        let mut matching = vec![0; xs.len()];
        let mut gap = 0.;
        for (i, j) in Self::rank(&xs).into_iter().zip(Self::rank(&ys)) {
            matching[i] = j;
            gap += (xs[i] - ys[j]).abs();
        }
        (matching, gap / xs.len() as Energy)
    }
}

impl Coupling for Sliced<'_> {
    type X = usize;
    type Y = usize;
    type M = CostMatrix;
    type P = Distribution;
    type Q = Distribution;

    fn minimize(mut self) -> Self {
        if self.sources.is_empty() {
            return self;
        }
        let (matches, gaps): (Vec<_>, Vec<_>) = (0..self.slices).map(|s| self.slice(s)).unzip();
        self.matches = matches;
        self.gaps = gaps;
        log::debug!(
            "sliced transport n={} slices={} gaps={:?}",
            self.sources.len(),
            self.slices,
            self.gaps
        );
        self
    }
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Probability {
        let hits = self.matches.iter().filter(|m| m[*x] == *y).count();
        match self.matches.len() {
            0 => 0.,
            k => hits as Probability / (k * self.sources.len()) as Probability,
        }
    }
    fn cost(&self) -> Energy {
        match self.gaps.len() {
            0 => 0.,
            k => self.gaps.iter().sum::<Energy>() / k as Energy,
        }
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
    )> for Sliced<'a>
{
    fn from(
        (_, _, _, _, sources, targets): (
            &'a Distribution,
            &'a Distribution,
            &'a CostMatrix,
            Entropy,
            &'a [Point],
            &'a [Point],
        ),
    ) -> Self {
        debug_assert!(sources.len() == targets.len(), "unequal cardinality");
        Self {
            sources,
            targets,
            matches: Vec::new(),
            gaps: Vec::new(),
            slices: crate::SLICED_PROJECTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Matrix;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn distance(a: &Distribution, xs: &[Point], ys: &[Point]) -> Energy {
        let c = Matrix::filled(xs.len(), ys.len(), 1.);
        Sliced::from((a, a, &c, 0.05, xs, ys)).minimize().cost()
    }
    fn scatter(rng: &mut SmallRng, n: usize) -> Vec<Point> {
        (0..n).map(|_| [rng.random(), rng.random()]).collect()
    }

    #[test]
    fn identical_sets_cost_exactly_zero() {
        let ref mut rng = SmallRng::seed_from_u64(5);
        for n in [1, 4, 33, 200] {
            let xs = scatter(rng, n);
            assert_eq!(distance(&Distribution::uniform(n), &xs, &xs), 0.);
        }
    }
    #[test]
    fn weights_are_ignored() {
        let ref mut rng = SmallRng::seed_from_u64(6);
        let xs = scatter(rng, 40);
        let ys = scatter(rng, 40);
        let uniform = distance(&Distribution::uniform(40), &xs, &ys);
        let skewed = distance(&Distribution::random_with(40, rng), &xs, &ys);
        assert_eq!(uniform, skewed);
    }
    #[test]
    fn translation_projects_onto_each_direction() {
        let xs: Vec<Point> = vec![[0., 0.], [1., 0.], [0., 1.], [1., 1.]];
        let ys = xs.iter().map(|p| [p[0] + 0.1, p[1]]).collect::<Vec<Point>>();
        let a = Distribution::uniform(4);
        let c = Matrix::filled(4, 4, 0.);
        let sliced = Sliced::from((&a, &a, &c, 0.05, &xs[..], &ys[..])).minimize();
        let expected = (0..5)
            .map(|s| (TAU * s as Energy / 5.).cos().abs() * 0.1)
            .sum::<Energy>()
            / 5.;
        assert_eq!(sliced.gaps().len(), 5);
        assert!((sliced.cost() - expected).abs() < 1e-9);
        assert!((sliced.cost() - 0.0647213595).abs() < 1e-9);
    }
    #[test]
    fn slices_are_deterministic() {
        let ref mut rng = SmallRng::seed_from_u64(8);
        let xs = scatter(rng, 25);
        let ys = scatter(rng, 25);
        let a = Distribution::uniform(25);
        assert_eq!(distance(&a, &xs, &ys), distance(&a, &xs, &ys));
    }
    #[test]
    fn flow_is_a_coupling() {
        let ref mut rng = SmallRng::seed_from_u64(9);
        let xs = scatter(rng, 12);
        let ys = scatter(rng, 12);
        let a = Distribution::uniform(12);
        let c = Matrix::filled(12, 12, 0.);
        let sliced = Sliced::from((&a, &a, &c, 0.05, &xs[..], &ys[..])).minimize();
        for i in 0..12 {
            let row = (0..12).map(|j| sliced.flow(&i, &j)).sum::<Probability>();
            let col = (0..12).map(|j| sliced.flow(&j, &i)).sum::<Probability>();
            assert!((row - 1. / 12.).abs() < 1e-12);
            assert!((col - 1. / 12.).abs() < 1e-12);
        }
    }
    #[test]
    fn single_slice_is_horizontal_matching() {
        let xs: Vec<Point> = vec![[0.3, 0.9], [0.1, 0.]];
        let ys: Vec<Point> = vec![[0.2, 0.5], [0.6, 0.5]];
        let a = Distribution::uniform(2);
        let c = Matrix::filled(2, 2, 0.);
        let sliced = Sliced::from((&a, &a, &c, 1., &xs[..], &ys[..]))
            .with_slices(1)
            .minimize();
        assert!((sliced.cost() - 0.2).abs() < 1e-12);
        assert_eq!(sliced.flow(&1, &0), 0.5);
        assert_eq!(sliced.flow(&0, &1), 0.5);
    }
    #[test]
    fn empty_sets_cost_nothing() {
        assert_eq!(distance(&Distribution::uniform(0), &[], &[]), 0.);
    }
}
