//! Cross-solver agreement on shared instances.
use super::problem::Problem;
use super::solver::Solver;
use crate::Distribution;
use crate::Energy;
use crate::Entropy;
use crate::Point;
use crate::euclidean;
use crate::squared_euclidean;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::f64::consts::TAU;

fn corners() -> Vec<Point> {
    vec![[0., 0.], [1., 0.], [0., 1.], [1., 1.]]
}
fn lattice(k: usize) -> Vec<Point> {
    let step = 1. / k as Energy;
    (0..k * k)
        .map(|n| [(n / k) as Energy * step + step / 2., (n % k) as Energy * step + step / 2.])
        .collect()
}
fn scatter(rng: &mut SmallRng, n: usize) -> Vec<Point> {
    (0..n).map(|_| [rng.random(), rng.random()]).collect()
}

#[test]
fn self_transport_is_free() {
    let problem = Problem::euclidean(corners(), corners(), 0.05);
    for solver in Solver::all() {
        let distance = solver.distance(&problem).unwrap();
        assert!(distance.abs() <= 1e-3, "{solver}: {distance}");
    }
}

#[test]
fn translation_costs_its_length() {
    let targets = corners().iter().map(|p| [p[0] + 0.1, p[1]]).collect();
    let problem = Problem::euclidean(corners(), targets, 0.05);
    for solver in [Solver::Dense, Solver::Sparse, Solver::Spatial] {
        let distance = solver.distance(&problem).unwrap();
        assert!((0.09..=0.12).contains(&distance), "{solver}: {distance}");
    }
    let sliced = Solver::Sliced.distance(&problem).unwrap();
    let projected = (0..5)
        .map(|s| (TAU * s as Energy / 5.).cos().abs() * 0.1)
        .sum::<Energy>()
        / 5.;
    assert!((sliced - projected).abs() < 1e-9, "sliced: {sliced} vs {projected}");
}

#[test]
fn spatial_tracks_sparse_on_rigid_motion() {
    const N: usize = 100;
    let ref mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    let sources = scatter(rng, N);
    let (sin, cos) = (0.1 as Energy).sin_cos();
    let targets = sources
        .iter()
        .map(|[x, y]| [x - 0.5, y - 0.5])
        .map(|[x, y]| [cos * x - sin * y, sin * x + cos * y])
        .map(|[x, y]| [0.9 * x + 0.52, 0.9 * y + 0.51])
        .collect();
    let problem = Problem::euclidean(sources, targets, 0.05);
    let sparse = Solver::Sparse.distance(&problem).unwrap();
    let spatial = Solver::Spatial.distance(&problem).unwrap();
    let ratio = spatial / sparse;
    assert!(sparse > 0.);
    assert!((0.5..=2.).contains(&ratio), "spatial {spatial} vs sparse {sparse}");
}

#[test]
fn coincident_points_cost_nothing() {
    const EPSILON: Entropy = 0.01;
    let ref mut rng = SmallRng::seed_from_u64(17);
    let points = lattice(5);
    let cost = euclidean(&points, &points);
    for _ in 0..4 {
        let weights = (0..25).map(|_| 0.05 + rng.random::<Energy>()).collect::<Vec<_>>();
        let a = Distribution::normalize(&weights);
        let problem = Problem::new(a.clone(), a, cost.clone(), EPSILON)
            .with_points(points.clone(), points.clone());
        for solver in [Solver::Dense, Solver::Sparse, Solver::Sliced] {
            let distance = solver.distance(&problem).unwrap();
            assert!(distance.abs() <= 1e-3, "{solver}: {distance}");
        }
    }
    let points = lattice(4);
    let problem = Problem::euclidean(points.clone(), points, EPSILON);
    let distance = Solver::Spatial.distance(&problem).unwrap();
    assert!(distance.abs() <= 1e-3, "spatial: {distance}");
}

#[test]
fn log_domain_bias_shrinks_with_epsilon() {
    let ref mut rng = SmallRng::seed_from_u64(23);
    for n in [50, 150, 300] {
        let points = scatter(rng, n);
        for solver in [Solver::Sparse, Solver::Spatial] {
            let [coarse, middle, fine] = [0.05, 0.02, 0.01].map(|epsilon| {
                let problem = Problem::euclidean(points.clone(), points.clone(), epsilon);
                solver.distance(&problem).unwrap()
            });
            assert!(fine < middle && middle < coarse, "{solver} n={n}: {coarse} {middle} {fine}");
        }
    }
}

#[test]
fn log_domain_solvers_stay_finite() {
    let ref mut rng = SmallRng::seed_from_u64(29);
    for n in [50, 200, 500] {
        for epsilon in [0.01, 0.05] {
            let xs = scatter(rng, n);
            let ys = scatter(rng, n);
            let a = Distribution::uniform(n);
            for cost in [euclidean(&xs, &ys), squared_euclidean(&xs, &ys)] {
                let problem = Problem::new(a.clone(), a.clone(), cost, epsilon)
                    .with_points(xs.clone(), ys.clone());
                for solver in [Solver::Sparse, Solver::Spatial, Solver::Sliced] {
                    let distance = solver.distance(&problem).unwrap();
                    assert!(distance.is_finite() && distance >= 0., "{solver} n={n}: {distance}");
                }
            }
        }
    }
}
