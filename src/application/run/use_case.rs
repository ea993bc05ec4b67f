//! Scenario Runner
//!
//! Schedules scenarios on named worker threads, at most `concurrency` at a
//! time, and polls their results with a short timeout so that per-scenario
//! deadlines and cancellation are noticed promptly. A scenario that misses
//! its deadline is reported as errored and its worker is abandoned; late
//! results from abandoned workers are discarded.
//!
//! Every worker carries the same deadline and cancel flag as an
//! [`Interrupt`], so an abandoned scenario stops at its next generator call
//! and removes its workspace. Before returning, the runner gives abandoned
//! workers a short grace period to finish that cleanup.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::application::invoker::GeneratorInvoker;
use crate::application::pipeline::ScenarioPipeline;
use crate::application::registry::ScenarioRegistry;
use crate::domain::entities::{Failure, ModuleTestSuite, RunReport, ScenarioResult, SuiteReport};
use crate::domain::ports::{Generator, NoopEventSink, RunEvent, RunEventSink};
use crate::domain::value_objects::{format_duration, Interrupt};

use super::options::{RunSelection, RunnerOptions};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long abandoned workers get to clean up before the run returns
const ABANDON_GRACE: Duration = Duration::from_millis(500);

/// One scheduled scenario: a suite and the index of a scenario in it
struct Job {
    suite: Arc<ModuleTestSuite>,
    /// Position of the suite's report in the run report
    report: usize,
    scenario: usize,
}

impl Job {
    fn module_id(&self) -> &str {
        &self.suite.module_id
    }

    fn scenario_name(&self) -> &str {
        &self.suite.scenarios[self.scenario].name
    }
}

/// A scenario handed to a worker thread
struct Worker {
    started: Instant,
    handle: JoinHandle<()>,
}

/// Results by job index; `None` for jobs that never finished
struct Outcome {
    results: Vec<Option<ScenarioResult>>,
    cancelled: bool,
}

/// Runs scenarios concurrently against one generator
pub struct ScenarioRunner {
    registry: Arc<ScenarioRegistry>,
    invoker: GeneratorInvoker,
    options: Arc<RunnerOptions>,
    events: Arc<dyn RunEventSink>,
    cancel: Arc<AtomicBool>,
}

impl ScenarioRunner {
    pub fn new(
        registry: ScenarioRegistry,
        generator: Arc<dyn Generator>,
        options: RunnerOptions,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            invoker: GeneratorInvoker::new(generator),
            options: Arc::new(options),
            events: Arc::new(NoopEventSink),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn RunEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Share an externally owned cancellation flag (e.g. set by Ctrl+C)
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Run every scenario of one suite.
    ///
    /// Dependencies are resolved against the runner's registry.
    pub fn run_suite(&self, suite: &ModuleTestSuite) -> SuiteReport {
        let report = self.run_suites(std::slice::from_ref(suite));
        report
            .suites
            .into_iter()
            .next()
            .unwrap_or_else(|| SuiteReport::new(&suite.module_id, &suite.module_name))
    }

    /// Run every scenario of every suite, results in declaration order
    pub fn run_suites(&self, suites: &[ModuleTestSuite]) -> RunReport {
        let selected: Vec<(Arc<ModuleTestSuite>, Vec<usize>)> = suites
            .iter()
            .map(|s| (Arc::new(s.clone()), (0..s.scenarios.len()).collect()))
            .collect();
        self.run_selected(selected)
    }

    /// Run the registry's scenarios that match `selection`
    pub fn run(&self, selection: &RunSelection) -> RunReport {
        let selected: Vec<(Arc<ModuleTestSuite>, Vec<usize>)> = self
            .registry
            .suites()
            .iter()
            .filter(|s| selection.includes_module(&s.module_id))
            .map(|s| {
                let picked = s
                    .scenarios
                    .iter()
                    .enumerate()
                    .filter(|(_, sc)| selection.includes_scenario(&sc.name))
                    .map(|(i, _)| i)
                    .collect();
                (Arc::new(s.clone()), picked)
            })
            .collect();
        self.run_selected(selected)
    }

    fn run_selected(&self, selected: Vec<(Arc<ModuleTestSuite>, Vec<usize>)>) -> RunReport {
        let started_at = Utc::now();
        let started = Instant::now();

        let jobs: Vec<Job> = selected
            .iter()
            .enumerate()
            .flat_map(|(report, (suite, picked))| {
                picked.iter().map(move |&scenario| Job {
                    suite: Arc::clone(suite),
                    report,
                    scenario,
                })
            })
            .collect();

        self.events.on_event(RunEvent::RunStarted {
            suites: selected.len(),
            scenarios: jobs.len(),
            concurrency: self.concurrency(),
        });

        let outcome = self.execute(&jobs);

        let mut suites: Vec<SuiteReport> = selected
            .iter()
            .map(|(s, _)| SuiteReport::new(&s.module_id, &s.module_name))
            .collect();
        let mut incomplete = Vec::new();
        for (job, result) in jobs.iter().zip(outcome.results) {
            let report = &mut suites[job.report];
            match result {
                Some(result) => report.push(result),
                None => {
                    incomplete.push(format!("{}/{}", job.module_id(), job.scenario_name()));
                    report.mark_incomplete(job.scenario_name());
                }
            }
        }

        if outcome.cancelled {
            self.events.on_event(RunEvent::RunCancelled { incomplete });
        }

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            cancelled: outcome.cancelled,
            suites,
        };

        self.events.on_event(RunEvent::RunCompleted {
            passed: report.passed(),
            failed: report.failed(),
            errored: report.errored(),
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        });

        report
    }

    fn concurrency(&self) -> usize {
        self.options.concurrency.max(1)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn execute(&self, jobs: &[Job]) -> Outcome {
        let (tx, rx) = mpsc::channel::<(usize, ScenarioResult)>();
        let mut results: Vec<Option<ScenarioResult>> = (0..jobs.len()).map(|_| None).collect();
        let mut in_flight: HashMap<usize, Worker> = HashMap::new();
        let mut abandoned: Vec<JoinHandle<()>> = Vec::new();
        let mut next = 0;
        let mut cancelled = false;

        loop {
            if self.is_cancelled() {
                cancelled = true;
                break;
            }

            while in_flight.len() < self.concurrency() && next < jobs.len() {
                let job = &jobs[next];
                self.events.on_event(RunEvent::ScenarioStarted {
                    module_id: job.module_id().to_string(),
                    scenario: job.scenario_name().to_string(),
                });
                let started = Instant::now();
                match self.spawn(next, job, tx.clone()) {
                    Ok(handle) => {
                        in_flight.insert(next, Worker { started, handle });
                    }
                    Err(e) => {
                        let result = ScenarioResult::errored(
                            job.module_id(),
                            job.scenario_name(),
                            Failure::generator(format!("cannot start worker: {}", e)),
                        );
                        self.finish(&mut results, next, result);
                    }
                }
                next += 1;
            }

            if in_flight.is_empty() {
                break;
            }

            match rx.recv_timeout(self.poll_wait(&in_flight)) {
                Ok((index, result)) => {
                    if let Some(worker) = in_flight.remove(&index) {
                        let _ = worker.handle.join();
                        self.finish(&mut results, index, result);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {}
            }

            if let Some(timeout) = self.options.timeout {
                let expired: Vec<usize> = in_flight
                    .iter()
                    .filter(|(_, worker)| worker.started.elapsed() >= timeout)
                    .map(|(&index, _)| index)
                    .collect();
                for index in expired {
                    if let Some(worker) = in_flight.remove(&index) {
                        abandoned.push(worker.handle);
                    }
                    let job = &jobs[index];
                    let cause = format!("timeout after {}", format_duration(timeout));
                    let result = ScenarioResult::errored(
                        job.module_id(),
                        job.scenario_name(),
                        Failure::generator(cause),
                    )
                    .with_duration_ms(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
                    self.finish(&mut results, index, result);
                }
            }
        }

        // Keep whatever finished while we were deciding to stop
        if cancelled {
            while let Ok((index, result)) = rx.try_recv() {
                if let Some(worker) = in_flight.remove(&index) {
                    let _ = worker.handle.join();
                    self.finish(&mut results, index, result);
                }
            }
            abandoned.extend(in_flight.into_values().map(|w| w.handle));
        }

        reap(abandoned);
        Outcome { results, cancelled }
    }

    fn spawn(
        &self,
        index: usize,
        job: &Job,
        tx: Sender<(usize, ScenarioResult)>,
    ) -> std::io::Result<JoinHandle<()>> {
        let interrupt = Interrupt::none()
            .with_timeout(self.options.timeout)
            .with_cancel_flag(Arc::clone(&self.cancel));
        let registry = Arc::clone(&self.registry);
        let invoker = self.invoker.clone();
        let options = Arc::clone(&self.options);
        let events = Arc::clone(&self.events);
        let suite = Arc::clone(&job.suite);
        let scenario = job.scenario;

        std::thread::Builder::new()
            .name(format!("scenario-{}", index))
            .spawn(move || {
                let scenario = &suite.scenarios[scenario];
                let run = catch_unwind(AssertUnwindSafe(|| {
                    ScenarioPipeline::new(&registry, &invoker, &options.pipeline, events.as_ref())
                        .with_interrupt(interrupt)
                        .run(&suite, scenario)
                }));
                let result = run.unwrap_or_else(|_| {
                    ScenarioResult::errored(
                        &suite.module_id,
                        &scenario.name,
                        Failure::generator("worker panicked"),
                    )
                });
                // The receiver is gone when the scenario was abandoned
                let _ = tx.send((index, result));
            })
    }

    fn finish(
        &self,
        results: &mut [Option<ScenarioResult>],
        index: usize,
        result: ScenarioResult,
    ) {
        self.events.on_event(RunEvent::ScenarioFinished {
            result: result.clone(),
        });
        results[index] = Some(result);
    }

    /// Wait no longer than the poll interval or the nearest deadline
    fn poll_wait(&self, in_flight: &HashMap<usize, Worker>) -> Duration {
        let Some(timeout) = self.options.timeout else {
            return POLL_INTERVAL;
        };
        in_flight
            .values()
            .map(|worker| timeout.saturating_sub(worker.started.elapsed()))
            .min()
            .unwrap_or(POLL_INTERVAL)
            .min(POLL_INTERVAL)
    }
}

/// Wait up to the grace period for abandoned workers to stop
fn reap(mut abandoned: Vec<JoinHandle<()>>) {
    let deadline = Instant::now() + ABANDON_GRACE;
    while !abandoned.is_empty() && Instant::now() < deadline {
        let (done, running): (Vec<_>, Vec<_>) =
            abandoned.into_iter().partition(JoinHandle::is_finished);
        for handle in done {
            let _ = handle.join();
        }
        abandoned = running;
        if !abandoned.is_empty() {
            let left = deadline.saturating_duration_since(Instant::now());
            std::thread::sleep(POLL_INTERVAL.min(left));
        }
    }
}
