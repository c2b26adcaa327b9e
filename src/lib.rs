//! Entropy-regularized optimal transport distances between weighted point sets.
//!
//! Four interchangeable solvers trade accuracy for latency over the same
//! problem: two probability vectors, a cost matrix, and (for the geometric
//! solvers) 2-D coordinates in the unit square.
//!
//! - [`Dense`]: multiplicative Sinkhorn-Knopp, the small-N ground truth
//! - [`Sparse`]: threshold-pruned log-domain Sinkhorn with momentum
//! - [`Spatial`]: grid-bucketed neighbours and two log-domain sweeps
//! - [`Sliced`]: exact 1-D transport on fixed projections, averaged
//!
//! Each solver is built from borrowed inputs, driven with
//! [`Coupling::minimize`], and read with [`Coupling::cost`]. [`Solver`] picks
//! one at runtime for an owned [`Problem`].
pub mod cost;
pub mod solvers;
pub mod transport;

pub use cost::*;
pub use solvers::*;
pub use transport::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Transport costs, distances, and convergence residuals.
pub type Energy = f64;
/// Regularization temperatures and log-domain dual potentials.
pub type Entropy = f64;
/// Atom masses and coupling entries.
pub type Probability = f64;
/// Coordinates in the unit square.
pub type Point = [Energy; 2];

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for tests and benchmarks.
pub trait Arbitrary {
    fn random() -> Self;
}

// ============================================================================
// DENSE SINKHORN-KNOPP
// Multiplicative scaling against a precomputed Gibbs kernel.
// ============================================================================
/// Maximum scaling rounds before stopping.
pub const DENSE_ITERATIONS: usize = 1000;
/// Early stopping threshold on the L1 change of the row scaling.
pub const DENSE_TOLERANCE: Energy = 1e-9;
/// Added to kernel-vector products before dividing.
pub const DENSE_STABILIZER: Energy = 1e-30;

// ============================================================================
// SPARSE STABILIZED SINKHORN
// Pruned log-domain iteration with over-relaxation after a warm-up.
// ============================================================================
/// Fixed number of g/f sweeps.
pub const SPARSE_ITERATIONS: usize = 25;
/// Candidates satisfy C[i][j] < SPARSE_THRESHOLD · ε.
pub const SPARSE_THRESHOLD: Entropy = 8.0;
/// Rows or columns with fewer threshold candidates fall back to nearest partners.
pub const SPARSE_MIN_CANDIDATES: usize = 5;
/// Size of the nearest-partner fallback set.
pub const SPARSE_FALLBACK: usize = 10;
/// Sweeps run without over-relaxation before momentum kicks in.
pub const SPARSE_WARMUP: usize = 3;
/// Over-relaxation factor ω applied after warm-up.
pub const SPARSE_MOMENTUM: Entropy = 1.6;

// ============================================================================
// SPATIAL HASH SINKHORN
// Grid-bucketed candidate discovery, two plain log-domain sweeps.
// ============================================================================
/// Cap on candidates per row and per column.
pub const SPATIAL_NEIGHBORS: usize = 20;
/// Fixed number of g/f sweeps.
pub const SPATIAL_ITERATIONS: usize = 2;

// ============================================================================
// SLICED PROJECTION
// ============================================================================
/// Equally spaced projection angles over [0, 2π).
pub const SLICED_PROJECTIONS: usize = 5;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}
