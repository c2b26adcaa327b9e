//! OTX Binary
//!
//! Latency sweeps over random unit-square problems, and one-off solves of
//! JSON problem files.
//!
//! Commands: bench, solve

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use otx::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Time every solver on random problems and write latency CSVs")]
    Bench {
        #[arg(long, value_delimiter = ',', default_values_t = [50, 200, 500])]
        sizes: Vec<usize>,
        #[arg(long, default_value_t = 0.01)]
        epsilon: Entropy,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value = "research")]
        output: PathBuf,
        #[arg(long, help = "Largest N the dense solver is timed at", default_value_t = 500)]
        dense_cap: usize,
    },
    #[command(about = "Solve a JSON problem file and print a JSON report")]
    Solve {
        #[arg(required = true)]
        problem: PathBuf,
        #[arg(long, value_enum)]
        solver: Vec<Solver>,
    },
}

#[derive(Serialize)]
struct Report {
    solver: Solver,
    distance: Energy,
    millis: f64,
}

fn main() -> anyhow::Result<()> {
    log()?;
    match Args::parse().command {
        Command::Bench {
            sizes,
            epsilon,
            seed,
            output,
            dense_cap,
        } => bench(&sizes, epsilon, seed, &output, dense_cap),
        Command::Solve { problem, solver } => solve(&problem, &solver),
    }
}

fn timed(solver: Solver, problem: &Problem) -> anyhow::Result<Report> {
    let start = Instant::now();
    let distance = solver.distance(problem)?;
    let millis = start.elapsed().as_secs_f64() * 1e3;
    Ok(Report {
        solver,
        distance,
        millis,
    })
}

fn bench(
    sizes: &[usize],
    epsilon: Entropy,
    seed: u64,
    output: &Path,
    cap: usize,
) -> anyhow::Result<()> {
    let ref mut rng = SmallRng::seed_from_u64(seed);
    let mut rows = Solver::all().map(|_| String::from("N,Latency\n"));
    for &n in sizes {
        let problem = Problem::random_with(n, epsilon, rng);
        log::info!("N={:<5} {}", n, "-".repeat(40));
        for (k, solver) in Solver::all().into_iter().enumerate() {
            if solver == Solver::Dense && n > cap {
                log::info!("{:>8} skipped above N={}", solver, cap);
                continue;
            }
            let report = timed(solver, &problem)?;
            log::info!("{:>8} {:>10.4} {:>10.2} ms", solver, report.distance, report.millis);
            rows[k].push_str(&format!("{},{:.2}\n", n, report.millis));
        }
    }
    std::fs::create_dir_all(output).with_context(|| format!("create {}", output.display()))?;
    for (solver, csv) in Solver::all().into_iter().zip(rows) {
        let path = output.join(format!("latency_{}.csv", solver));
        std::fs::write(&path, csv).with_context(|| format!("write {}", path.display()))?;
        log::info!("saved {}", path.display());
    }
    Ok(())
}

fn solve(path: &Path, solvers: &[Solver]) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let problem = serde_json::from_str::<Problem>(&json).context("parse problem")?;
    log::info!("loaded {}x{} problem, ε={}", problem.size().0, problem.size().1, problem.epsilon);
    let chosen = match solvers.is_empty() {
        false => solvers.to_vec(),
        true => Solver::all()
            .into_iter()
            .filter(|s| s.check(&problem).is_ok())
            .collect(),
    };
    let reports = chosen
        .into_iter()
        .map(|solver| timed(solver, &problem))
        .collect::<anyhow::Result<Vec<_>>>()?;
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
