//! Scheduler and worker pool tests.

use std::sync::Arc;

use game_arena::config::ArenaConfig;
use game_arena::core::{Error, Result};
use game_arena::experiment::{
    plan_matches, AbTestExperiment, Experiment, MemoryStore, ParameterChartExperiment,
    ResultStore, Scheduler, SpecMultiset,
};
use game_arena::runner::{MatchResult, MatchRunner, MatchSpec};
use game_arena::strategy::{StrategyParameters, UctProvider};

fn ab_test(name: &str, game: &str, copies: usize) -> AbTestExperiment {
    AbTestExperiment::new(
        name,
        vec![
            "Random".to_string(),
            "NPlyLookahead:pliesToLookAhead=1".to_string(),
        ],
        vec![game.to_string()],
        copies,
    )
}

fn scheduler(store: Arc<MemoryStore>, workers: usize) -> Scheduler {
    let config = ArenaConfig::new()
        .with_worker_threads(workers)
        .with_queue_capacity(2);
    Scheduler::new(MatchRunner::with_defaults(), store, &config)
}

/// Counts match regardless of the order results arrived in.
fn assert_same_counts(actual: &SpecMultiset, expected: &SpecMultiset) {
    assert_eq!(actual.total(), expected.total());
    for (spec, count) in expected.iter() {
        assert_eq!(actual.count(spec), count, "{spec:?}");
    }
}

/// An experiment whose match list cannot be built.
struct Broken;

impl Experiment for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn matches_to_run(&self) -> Result<SpecMultiset> {
        Err(Error::UnknownStrategy("Missing".to_string()))
    }
}

// =============================================================================
// Planning
// =============================================================================

#[test]
fn test_plan_round_robin_order() {
    let spec = |id: &str| MatchSpec::new("exp", "TIC_TAC_TOE", vec![id.to_string(), "Random".to_string()]);
    let mut desired = SpecMultiset::new();
    desired.add(spec("A"), 3);
    desired.add(spec("B"), 1);

    let plan = plan_matches(&desired, &SpecMultiset::new());
    let order: Vec<&str> = plan.iter().map(|s| s.strategy_ids[0].as_str()).collect();
    assert_eq!(order, vec!["A", "B", "A", "A"]);
}

// =============================================================================
// Worker Pool
// =============================================================================

#[test]
fn test_pool_runs_every_match() {
    let store = Arc::new(MemoryStore::new());
    let experiment = ab_test("pool", "TIC_TAC_TOE", 3);

    let summary = scheduler(Arc::clone(&store), 2).run(&[&experiment]).unwrap();

    assert_eq!(summary.experiments_scheduled, 1);
    assert_eq!(summary.matches_enqueued, 6);
    assert_eq!(summary.matches_run, 6);
    assert_eq!(summary.matches_errored, 0);
    assert_eq!(summary.persist_failures, 0);

    let results = store.load("pool").unwrap();
    assert_eq!(results.len(), 6);
    assert_same_counts(
        &SpecMultiset::from_successes(&results),
        &experiment.matches_to_run().unwrap(),
    );
}

#[test]
fn test_rerun_skips_completed_matches() {
    let store = Arc::new(MemoryStore::new());
    let experiment = ab_test("resume", "TIC_TAC_TOE", 2);
    let scheduler = scheduler(Arc::clone(&store), 3);

    let first = scheduler.run(&[&experiment]).unwrap();
    assert_eq!(first.matches_run, 4);

    let second = scheduler.run(&[&experiment]).unwrap();
    assert_eq!(second.experiments_scheduled, 1);
    assert_eq!(second.matches_enqueued, 0);
    assert_eq!(store.results().len(), 4);
}

#[test]
fn test_partial_results_are_topped_up() {
    let experiment = ab_test("top-up", "TIC_TAC_TOE", 2);
    let desired = experiment.matches_to_run().unwrap();
    let (done, _) = desired.iter().next().unwrap();
    let earlier = MatchResult::success(done.clone(), vec![0; 4], vec![0.5, 0.5], vec![], 1);
    let store = Arc::new(MemoryStore::with_results(vec![earlier]));

    let summary = scheduler(Arc::clone(&store), 2).run(&[&experiment]).unwrap();
    assert_eq!(summary.matches_run, 3);

    let stored = SpecMultiset::from_successes(&store.load("top-up").unwrap());
    assert_same_counts(&stored, &desired);
}

#[test]
fn test_errored_matches_are_retried() {
    let store = Arc::new(MemoryStore::new());
    let experiment = ab_test("pennies", "MATCHING_PENNIES", 1);
    let scheduler = scheduler(Arc::clone(&store), 2);

    // the lookahead cannot play a simultaneous game
    let first = scheduler.run(&[&experiment]).unwrap();
    assert_eq!(first.matches_run, 2);
    assert_eq!(first.matches_errored, 2);

    let second = scheduler.run(&[&experiment]).unwrap();
    assert_eq!(second.matches_run, 2);
    assert_eq!(store.results().len(), 4);
    assert!(store.results().iter().all(|r| r.had_error));
}

#[test]
fn test_inline_execution() {
    let store = Arc::new(MemoryStore::new());
    let experiment = ab_test("inline", "TIC_TAC_TOE", 1);

    let summary = scheduler(Arc::clone(&store), 0).run(&[&experiment]).unwrap();
    assert_eq!(summary.matches_run, 2);
    assert_eq!(store.results().len(), 2);
}

#[test]
fn test_broken_experiment_is_skipped() {
    let store = Arc::new(MemoryStore::new());
    let experiment = ab_test("healthy", "TIC_TAC_TOE", 1);

    let summary = scheduler(Arc::clone(&store), 1)
        .run(&[&Broken, &experiment])
        .unwrap();
    assert_eq!(summary.experiments_skipped, 1);
    assert_eq!(summary.experiments_scheduled, 1);
    assert_eq!(summary.matches_run, 2);
}

#[test]
fn test_parameter_chart_through_pool() {
    let base = StrategyParameters::builder()
        .put(&UctProvider::iteration_count(), 20_i64)
        .unwrap()
        .build();
    let chart = ParameterChartExperiment::new(
        "chart",
        Arc::new(UctProvider::one_node_expansion()),
        base,
        "c_p",
        vec![(
            "TIC_TAC_TOE".to_string(),
            vec!["0.5".to_string(), "1.5".to_string()],
        )],
        2,
    )
    .unwrap();
    let store = Arc::new(MemoryStore::new());

    let summary = scheduler(Arc::clone(&store), 2).run(&[&chart]).unwrap();
    assert_eq!(summary.matches_run, 8);

    let cells = chart.summarize(&store.load("chart").unwrap()).unwrap();
    assert_eq!(cells.len(), 4);
    for cell in &cells {
        assert_eq!(cell.matches, 2);
        assert_eq!(cell.errors, 0);
        let mean = cell.first_role_mean().unwrap();
        assert!((0.0..=1.0).contains(&mean));
    }
}
