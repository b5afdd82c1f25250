//! Randomized walk-count estimation.
//!
//! Each trial draws a fresh Bernoulli coding, builds the coded matrix and
//! evaluates the walk sum `v`. The sample `|v| / k!` is an unbiased
//! estimate of the number of k-paths, because a random ±1 determinant
//! squared has expectation `k!`. The estimate is the mean over
//! `ceil(k² / ε²)` trials.
//!
//! # Reproducibility
//!
//! Trials never share an RNG. A master [`StdRng`] (seeded from
//! [`EstimatorConfig::seed`] or from entropy) hands out one `u64` per trial
//! in trial order, and each trial seeds its own generator from it. The
//! parallel estimator draws the same seeds in the same order, so both paths
//! produce identical results for a fixed seed.
//!
//! # Early stopping
//!
//! Off by default. When enabled, after every trial from the second on the
//! estimator stops once `mean − t·sd/√step > (1 − ε)·mean`, with `sd` the
//! standard deviation of the running means and `t` from
//! [`t_value`](crate::stats::t_value). A zero mean never stops early.

#[cfg(feature = "parallel")]
mod parallel;

#[cfg(feature = "parallel")]
pub use parallel::estimate_with_config_par;

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::coding::{self, MAX_WALK_LENGTH};
use crate::error::{Error, Result};
use crate::graph::Adjacency;
use crate::matrix::CodedMatrix;
use crate::stats::{factorial, SampleStats};
use crate::walk;

const BUDGET_ROUNDING: f64 = 1e-12;

/// Upper bound on the sample buffer reserved up front; larger runs grow it.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 12;

// ══════════════════════════════════════════════
//  Configuration and results
// ══════════════════════════════════════════════

/// Estimator settings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimatorConfig {
    /// Target relative error. Sets the trial budget `ceil(k² / ε²)`.
    pub epsilon: f64,
    /// Stop as soon as the confidence check passes.
    pub early_stopping: bool,
    /// Seed for the master RNG. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            epsilon: 0.5,
            early_stopping: false,
            seed: None,
        }
    }
}

impl EstimatorConfig {
    /// Set the target relative error.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Enable or disable the confidence-based early stop.
    pub fn with_early_stopping(mut self, early_stopping: bool) -> Self {
        self.early_stopping = early_stopping;
        self
    }

    /// Fix the master seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Why the sampling loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// All `ceil(k² / ε²)` trials ran.
    Budget,
    /// The early-stopping confidence check passed.
    Confident,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Budget => write!(f, "trial budget exhausted"),
            Termination::Confident => write!(f, "confidence bound reached"),
        }
    }
}

/// Outcome of a walk-count estimation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkEstimate {
    /// Final running mean of the samples.
    pub estimate: f64,
    /// Every sample `|v| / k!`, in trial order.
    pub samples: Vec<f64>,
    /// Population standard deviation of the sequence of running means.
    pub std_dev_of_means: f64,
    /// Number of trials evaluated.
    pub num_trials: usize,
    /// Trial budget `ceil(k² / ε²)`.
    pub budget: usize,
    /// Why sampling ended.
    pub termination: Termination,
}

// ══════════════════════════════════════════════
//  Entry points
// ══════════════════════════════════════════════

/// Number of trials for walk length `k` and relative error `epsilon`:
/// `ceil(k² / ε²)`, at least one.
///
/// The quotient is rounded up after dropping a relative `1e-12`, so exact
/// integer budgets such as `k = 7, ε = 0.7` are not pushed one trial higher
/// by floating-point noise.
///
/// # Errors
///
/// [`Error::InvalidEpsilon`] unless `epsilon` is positive and finite, or when
/// the budget does not fit in `usize`.
pub fn trial_budget(k: usize, epsilon: f64) -> Result<usize> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(Error::InvalidEpsilon { epsilon });
    }
    let k = k as f64;
    let q = k * k / (epsilon * epsilon);
    if !q.is_finite() || q >= usize::MAX as f64 {
        return Err(Error::InvalidEpsilon { epsilon });
    }
    Ok(((q * (1.0 - BUDGET_ROUNDING)).ceil() as usize).max(1))
}

/// Estimate the number of k-paths in `adjacency` within relative error
/// `epsilon`, running the full trial budget with an entropy-seeded RNG.
///
/// For a symmetric (undirected) adjacency every path is counted once per
/// direction.
pub fn estimate_walk_count(adjacency: &Adjacency, k: usize, epsilon: f64) -> Result<f64> {
    let config = EstimatorConfig::default().with_epsilon(epsilon);
    Ok(estimate_with_config(adjacency, k, &config)?.estimate)
}

/// Run the estimator with explicit settings.
///
/// # Errors
///
/// [`Error::InvalidWalkLength`] unless `1 <= k <= MAX_WALK_LENGTH`,
/// [`Error::InvalidEpsilon`] unless `epsilon` is positive and finite with a
/// budget that fits in `usize`. Errors from the trials themselves abort the
/// run.
pub fn estimate_with_config(
    adjacency: &Adjacency,
    k: usize,
    config: &EstimatorConfig,
) -> Result<WalkEstimate> {
    let budget = validate(k, config)?;
    let mut master = master_rng(config);
    let mut stats = sample_stats(budget);

    debug!(k, budget, vertices = adjacency.num_vertices(), "starting estimation");

    let mut termination = Termination::Budget;
    for _ in 0..budget {
        let x = run_trial(adjacency, k, master.gen())?;
        if record(&mut stats, x, config) {
            termination = Termination::Confident;
            break;
        }
    }

    Ok(finish(stats, budget, termination))
}

// ══════════════════════════════════════════════
//  Shared pieces
// ══════════════════════════════════════════════

fn validate(k: usize, config: &EstimatorConfig) -> Result<usize> {
    if k == 0 || k > MAX_WALK_LENGTH {
        return Err(Error::InvalidWalkLength { k });
    }
    trial_budget(k, config.epsilon)
}

fn sample_stats(budget: usize) -> SampleStats {
    SampleStats::with_capacity(budget.min(MAX_PREALLOCATED_SAMPLES))
}

fn master_rng(config: &EstimatorConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// One trial: fresh coding, fresh matrix, walk sum, normalized sample.
fn run_trial(adjacency: &Adjacency, k: usize, seed: u64) -> Result<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let coding = coding::bernoulli(adjacency.num_vertices(), k, &mut rng)?;
    let matrix = CodedMatrix::build(adjacency, &coding)?;
    let v = walk::compute_walk_sum(&matrix, &coding, k)?;
    Ok(v.unsigned_abs() as f64 / factorial(k))
}

/// Fold one sample into `stats`; returns `true` when sampling should stop.
fn record(stats: &mut SampleStats, x: f64, config: &EstimatorConfig) -> bool {
    stats.push(x);
    debug!(
        step = stats.step(),
        sample = x,
        mean = stats.mean().unwrap_or(0.0),
        sd = stats.std_dev_of_means().unwrap_or(0.0),
        "trial"
    );
    config.early_stopping && stats.is_confident(config.epsilon)
}

fn finish(stats: SampleStats, budget: usize, termination: Termination) -> WalkEstimate {
    let estimate = stats.mean().unwrap_or(0.0);
    let std_dev_of_means = stats.std_dev_of_means().unwrap_or(0.0);
    let num_trials = stats.step();

    info!(
        estimate,
        std_dev_of_means,
        num_trials,
        budget,
        %termination,
        "estimation finished"
    );

    WalkEstimate {
        estimate,
        samples: stats.into_samples(),
        std_dev_of_means,
        num_trials,
        budget,
        termination,
    }
}
