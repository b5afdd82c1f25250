use approx::assert_relative_eq;
use extensor_coding::estimator::trial_budget;
use extensor_coding::{
    estimate_walk_count, estimate_with_config, Adjacency, Error, EstimatorConfig, Termination,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ══════════════════════════════════════════════
//  Trial accounting
// ══════════════════════════════════════════════

#[test]
fn runs_full_budget_without_early_stopping() {
    init_tracing();
    let adj = Adjacency::path(4);
    let config = EstimatorConfig::default().with_seed(3);
    let res = estimate_with_config(&adj, 3, &config).unwrap();

    assert_eq!(res.budget, 36);
    assert_eq!(res.num_trials, trial_budget(3, 0.5).unwrap());
    assert_eq!(res.samples.len(), res.num_trials);
    assert_eq!(res.termination, Termination::Budget);
}

#[test]
fn huge_epsilon_still_runs_one_trial() {
    let adj = Adjacency::path(3);
    let config = EstimatorConfig::default().with_epsilon(1e200).with_seed(4);
    let res = estimate_with_config(&adj, 2, &config).unwrap();

    assert_eq!(res.budget, 1);
    assert_eq!(res.num_trials, 1);
    assert_eq!(res.samples.len(), 1);
    assert_eq!(res.estimate, res.samples[0]);
    assert_eq!(res.termination, Termination::Budget);
}

#[test]
fn early_stopping_never_exceeds_budget() {
    let adj = Adjacency::path(4);
    for seed in 0..5 {
        let config = EstimatorConfig::default()
            .with_epsilon(0.5)
            .with_early_stopping(true)
            .with_seed(seed);
        let res = estimate_with_config(&adj, 3, &config).unwrap();
        assert!(res.num_trials >= 1);
        assert!(res.num_trials <= res.budget);
        assert_eq!(res.samples.len(), res.num_trials);
        if res.termination == Termination::Confident {
            assert!(res.num_trials >= 2);
        }
    }
}

#[test]
fn constant_samples_stop_early() {
    // k = 1 samples are exactly the vertex count on every trial.
    let adj = Adjacency::path(5);
    let config = EstimatorConfig::default()
        .with_epsilon(0.1)
        .with_early_stopping(true)
        .with_seed(0);
    let res = estimate_with_config(&adj, 1, &config).unwrap();
    assert_eq!(res.termination, Termination::Confident);
    assert_eq!(res.num_trials, 2);
    assert_eq!(res.estimate, 5.0);
}

#[test]
fn seeded_runs_repeat() {
    let adj = Adjacency::path(4);
    let config = EstimatorConfig::default().with_seed(17);
    let a = estimate_with_config(&adj, 3, &config).unwrap();
    let b = estimate_with_config(&adj, 3, &config).unwrap();
    assert_eq!(a.samples, b.samples);
    assert_eq!(a.estimate, b.estimate);
}

// ══════════════════════════════════════════════
//  Accuracy
// ══════════════════════════════════════════════

#[test]
fn single_vertices_are_exact() {
    let adj = Adjacency::path(3);
    assert_eq!(estimate_walk_count(&adj, 1, 0.5).unwrap(), 3.0);
}

#[test]
fn edges_of_undirected_path() {
    // P3 as a symmetric matrix has 4 directed 2-paths.
    let adj = Adjacency::path(3);
    let config = EstimatorConfig::default().with_epsilon(0.25).with_seed(1);
    let res = estimate_with_config(&adj, 2, &config).unwrap();
    assert_eq!(res.num_trials, 64);
    assert_relative_eq!(res.estimate, 4.0, max_relative = 0.5);
}

#[test]
fn three_paths_of_undirected_path() {
    // 0-1-2 in both directions.
    let adj = Adjacency::path(3);
    let config = EstimatorConfig::default().with_epsilon(0.25).with_seed(2);
    let res = estimate_with_config(&adj, 3, &config).unwrap();
    assert_eq!(res.num_trials, 144);
    assert_relative_eq!(res.estimate, 2.0, max_relative = 0.5);
    assert!(res.samples.iter().all(|&x| x >= 0.0));
}

#[test]
fn graphs_without_paths_estimate_zero() {
    let adj = Adjacency::path(3);
    let config = EstimatorConfig::default()
        .with_early_stopping(true)
        .with_seed(5);
    let res = estimate_with_config(&adj, 4, &config).unwrap();
    assert_eq!(res.estimate, 0.0);
    assert_eq!(res.std_dev_of_means, 0.0);
    assert_eq!(res.termination, Termination::Budget);
    assert_eq!(res.num_trials, res.budget);
}

// ══════════════════════════════════════════════
//  Errors
// ══════════════════════════════════════════════

#[test]
fn invalid_parameters() {
    let adj = Adjacency::path(3);
    assert!(matches!(
        estimate_walk_count(&adj, 0, 0.5),
        Err(Error::InvalidWalkLength { k: 0 })
    ));
    assert!(matches!(
        estimate_walk_count(&adj, 16, 0.5),
        Err(Error::InvalidWalkLength { k: 16 })
    ));
    assert!(matches!(
        estimate_walk_count(&adj, 2, -1.0),
        Err(Error::InvalidEpsilon { .. })
    ));
}

#[test]
fn tiny_epsilon_is_rejected_before_sampling() {
    let adj = Adjacency::path(3);
    let config = EstimatorConfig::default().with_epsilon(1e-300);
    assert!(matches!(
        estimate_with_config(&adj, 2, &config),
        Err(Error::InvalidEpsilon { .. })
    ));
    assert!(matches!(
        estimate_walk_count(&adj, 15, 1e-9),
        Err(Error::InvalidEpsilon { .. })
    ));
}

#[test]
fn non_square_adjacency_is_rejected() {
    let adj = Adjacency::new(3, 2, vec![0, 1, 1, 0, 0, 1]).unwrap();
    let config = EstimatorConfig::default().with_seed(0);
    assert!(matches!(
        estimate_with_config(&adj, 2, &config),
        Err(Error::DimensionMismatch { .. })
    ));
}
