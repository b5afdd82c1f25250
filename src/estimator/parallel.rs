use rand::Rng;
use rayon::prelude::*;

use super::{finish, master_rng, record, run_trial, sample_stats, validate};
use super::{EstimatorConfig, Termination, WalkEstimate};
use crate::error::Result;
use crate::graph::Adjacency;

/// Parallel estimator: trials are evaluated in rayon batches.
///
/// Each worker owns its coding and matrix. Samples are folded into the
/// running statistics sequentially in trial order, and results of a batch
/// that arrive after early stopping fired are discarded, so the outcome
/// equals [`estimate_with_config`](super::estimate_with_config) for the
/// same seed.
pub fn estimate_with_config_par(
    adjacency: &Adjacency,
    k: usize,
    config: &EstimatorConfig,
) -> Result<WalkEstimate> {
    let budget = validate(k, config)?;
    let mut master = master_rng(config);
    let mut stats = sample_stats(budget);
    let batch = rayon::current_num_threads().max(1);

    tracing::debug!(k, budget, batch, "starting parallel estimation");

    let mut remaining = budget;
    while remaining > 0 {
        let n = batch.min(remaining);
        remaining -= n;

        let seeds: Vec<u64> = (0..n).map(|_| master.gen()).collect();
        let samples = seeds
            .into_par_iter()
            .map(|seed| run_trial(adjacency, k, seed))
            .collect::<Result<Vec<f64>>>()?;

        for x in samples {
            if record(&mut stats, x, config) {
                return Ok(finish(stats, budget, Termination::Confident));
            }
        }
    }

    Ok(finish(stats, budget, Termination::Budget))
}
