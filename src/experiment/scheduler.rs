//! Running experiments to completion on a worker pool.
//!
//! The scheduling thread compares what each experiment wants with what the
//! store already holds, and feeds the missing matches through a bounded
//! queue to `worker_threads` workers. Once every experiment has been
//! scanned it sends one stop marker per worker and waits for them to exit.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::config::ArenaConfig;
use crate::core::{Error, Result};
use crate::runner::{MatchRunner, MatchSpec};

use super::store::ResultStore;
use super::{Experiment, SpecMultiset};

/// Order in which the missing matches of an experiment are run.
///
/// Round `i` contains one copy of every spec that has at most `i` existing
/// results and more than `i` desired ones. Every configuration therefore
/// gets its first match before any gets its second.
#[must_use]
pub fn plan_matches(desired: &SpecMultiset, existing: &SpecMultiset) -> Vec<MatchSpec> {
    let rounds = desired.iter().map(|(_, count)| count).max().unwrap_or(0);
    let mut plan = Vec::new();
    for round in 0..rounds {
        for (spec, wanted) in desired.iter() {
            if existing.count(spec) <= round && wanted > round {
                plan.push(spec.clone());
            }
        }
    }
    plan
}

/// Unit of work on the queue.
#[derive(Clone, Debug)]
enum WorkItem {
    Run(MatchSpec),
    Stop,
}

/// What a call to [`Scheduler::run`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleSummary {
    /// Experiments whose existing results could be loaded.
    pub experiments_scheduled: usize,
    /// Experiments skipped because their specs or results could not be read.
    pub experiments_skipped: usize,
    pub matches_enqueued: usize,
    pub matches_run: usize,
    pub matches_errored: usize,
    /// Results that could not be stored.
    pub persist_failures: usize,
}

impl ScheduleSummary {
    fn absorb(&mut self, other: &WorkerTally) {
        self.matches_run += other.matches_run;
        self.matches_errored += other.matches_errored;
        self.persist_failures += other.persist_failures;
    }
}

#[derive(Debug, Default)]
struct WorkerTally {
    matches_run: usize,
    matches_errored: usize,
    persist_failures: usize,
}

impl WorkerTally {
    fn execute(&mut self, runner: &MatchRunner, store: &dyn ResultStore, spec: &MatchSpec) {
        let result = runner.run(spec, None);
        self.matches_run += 1;
        if result.had_error {
            self.matches_errored += 1;
        }
        if let Err(err) = store.append(&result) {
            self.persist_failures += 1;
            tracing::error!(
                experiment = %spec.experiment_name,
                game = %spec.game_id,
                error = %err,
                "failed to store match result"
            );
        }
    }
}

/// Runs the missing matches of experiments and stores their results.
pub struct Scheduler {
    runner: MatchRunner,
    store: Arc<dyn ResultStore>,
    worker_threads: usize,
    queue_capacity: usize,
}

impl Scheduler {
    pub fn new(runner: MatchRunner, store: Arc<dyn ResultStore>, config: &ArenaConfig) -> Self {
        Self {
            runner,
            store,
            worker_threads: config.worker_threads,
            queue_capacity: config.queue_capacity.max(1),
        }
    }

    /// Run every missing match of `experiments`.
    ///
    /// Individual match and storage failures are counted, not returned. Only
    /// a failure to start the pool is an error.
    pub fn run(&self, experiments: &[&dyn Experiment]) -> Result<ScheduleSummary> {
        let mut summary = ScheduleSummary::default();

        if self.worker_threads == 0 {
            let mut tally = WorkerTally::default();
            self.produce(experiments, &mut summary, |spec| {
                tally.execute(&self.runner, self.store.as_ref(), &spec);
                true
            });
            summary.absorb(&tally);
            return Ok(summary);
        }

        let (sender, receiver) = mpsc::sync_channel::<WorkItem>(self.queue_capacity);
        let receiver = Arc::new(Mutex::new(receiver));
        let workers = (0..self.worker_threads)
            .map(|index| self.spawn_worker(index, Arc::clone(&receiver)))
            .collect::<Result<Vec<_>>>();
        let workers = match workers {
            Ok(workers) => workers,
            Err(err) => {
                // dropping the sender stops any worker that did start
                drop(sender);
                return Err(err);
            }
        };

        self.produce(experiments, &mut summary, |spec| {
            send(&sender, WorkItem::Run(spec))
        });
        for _ in 0..workers.len() {
            if !send(&sender, WorkItem::Stop) {
                break;
            }
        }

        for handle in workers {
            match handle.join() {
                Ok(tally) => summary.absorb(&tally),
                Err(_) => tracing::error!("worker thread panicked"),
            }
        }

        tracing::info!(
            matches_run = summary.matches_run,
            matches_errored = summary.matches_errored,
            persist_failures = summary.persist_failures,
            "worker pool drained"
        );
        Ok(summary)
    }

    /// Hand every planned match to `dispatch`; stops early if it returns false.
    fn produce<F>(&self, experiments: &[&dyn Experiment], summary: &mut ScheduleSummary, mut dispatch: F)
    where
        F: FnMut(MatchSpec) -> bool,
    {
        for experiment in experiments {
            let name = experiment.name();
            let (plan, completed) = match self.plan_for(*experiment) {
                Ok(planned) => planned,
                Err(err) => {
                    tracing::error!(experiment = %name, error = %err, "skipping experiment");
                    summary.experiments_skipped += 1;
                    continue;
                }
            };
            summary.experiments_scheduled += 1;
            tracing::info!(
                experiment = %name,
                completed,
                pending = plan.len(),
                "scheduling experiment"
            );

            for spec in plan {
                summary.matches_enqueued += 1;
                if !dispatch(spec) {
                    tracing::error!(experiment = %name, "work queue closed, stopping");
                    return;
                }
            }
        }
    }

    /// Missing matches of one experiment, and how many successes are stored.
    fn plan_for(&self, experiment: &dyn Experiment) -> Result<(Vec<MatchSpec>, usize)> {
        let desired = experiment.matches_to_run()?;
        let stored = self.store.load(experiment.name())?;
        let existing = SpecMultiset::from_successes(&stored);
        Ok((plan_matches(&desired, &existing), existing.total()))
    }

    fn spawn_worker(
        &self,
        index: usize,
        receiver: Arc<Mutex<Receiver<WorkItem>>>,
    ) -> Result<JoinHandle<WorkerTally>> {
        let runner = self.runner.clone();
        let store = Arc::clone(&self.store);
        thread::Builder::new()
            .name(format!("arena-worker-{index}"))
            .spawn(move || {
                let mut tally = WorkerTally::default();
                loop {
                    let item = receiver.lock().recv();
                    match item {
                        Ok(WorkItem::Run(spec)) => tally.execute(&runner, store.as_ref(), &spec),
                        Ok(WorkItem::Stop) | Err(_) => break,
                    }
                }
                tracing::debug!(worker = index, matches = tally.matches_run, "worker stopped");
                tally
            })
            .map_err(|err| Error::io("spawn worker thread", err))
    }
}

fn send(sender: &SyncSender<WorkItem>, item: WorkItem) -> bool {
    sender.send(item).is_ok()
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("worker_threads", &self.worker_threads)
            .field("queue_capacity", &self.queue_capacity)
            .finish()
    }
}
