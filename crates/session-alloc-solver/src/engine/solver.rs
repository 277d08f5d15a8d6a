// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::engine::err::SolveError;
use crate::engine::shared_incumbent::SharedIncumbent;
use crate::eval::weighted::{ScorePreset, WeightedEvaluator};
use crate::eval::{score::Score, ScheduleEvaluator};
use crate::opening::random_schedule;
use crate::search::local::HillClimb;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use session_alloc_model::prelude::{Roster, Schedule};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

const WATCHDOG_TICK: Duration = Duration::from_millis(25);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolverConfig {
    /// Hill-climbing iterations per restart.
    pub iterations: usize,
    /// Independent restarts to run.
    pub restarts: usize,
    /// Worker threads; clamped to at least one and at most `restarts`.
    pub num_workers: usize,
    /// Master seed. `None` draws one from the thread RNG per solve.
    pub seed: Option<u64>,
    /// Optional wall-clock budget for the whole solve.
    pub time_limit: Option<Duration>,
    /// Weight configuration used to score schedules.
    pub preset: ScorePreset,
}

impl Default for SolverConfig {
    #[inline]
    fn default() -> Self {
        Self {
            iterations: 1000,
            restarts: 10,
            num_workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            seed: None,
            time_limit: None,
            preset: ScorePreset::default(),
        }
    }
}

/// Outcome of one solve: the winning schedule, its score and how many
/// restarts reported a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub schedule: Schedule,
    pub score: Score,
    pub restarts_completed: usize,
}

/// Random-restart search engine.
///
/// Restart indices are handed out through a shared counter and every index
/// derives its own RNG stream from the master seed, so results for a fixed
/// seed do not depend on the number of workers or their interleaving.
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn builder() -> SolverBuilder {
        SolverBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs the configured number of restarts and returns the best schedule.
    ///
    /// A raised time limit stops all workers at the next iteration boundary;
    /// whatever the incumbent holds at that point is returned. If the stop
    /// fires before any restart reported, a fresh opening is built on the
    /// calling thread so the caller always receives a schedule.
    #[tracing::instrument(level = "info", skip(self, roster))]
    pub fn solve(&self, roster: &Roster) -> Result<SolveOutcome, SolveError> {
        let config = self.config;
        if config.restarts == 0 {
            return Err(SolveError::NoRestarts);
        }

        let evaluator = WeightedEvaluator::preset(config.preset);
        let climb = HillClimb::new(evaluator, config.iterations);
        let master_seed = match config.seed {
            Some(seed) => seed,
            None => rand::rng().next_u64(),
        };
        let workers = config.num_workers.max(1).min(config.restarts);
        tracing::info!(master_seed, workers, restarts = config.restarts, "Starting solve");

        let incumbent = SharedIncumbent::new();
        let stop = AtomicBool::new(false);
        let next_restart = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);

        let inc_ref = &incumbent;
        let stop_ref = &stop;
        let next_ref = &next_restart;
        let completed_ref = &completed;
        let roster_ref = roster;

        std::thread::scope(|scope| {
            if let Some(limit) = config.time_limit {
                let deadline = Instant::now() + limit;
                scope.spawn(move || loop {
                    if stop_ref.load(Ordering::Relaxed) {
                        break;
                    }
                    let now = Instant::now();
                    if now >= deadline {
                        stop_ref.store(true, Ordering::SeqCst);
                        break;
                    }
                    std::thread::sleep((deadline - now).min(WATCHDOG_TICK));
                });
            }

            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    scope.spawn(move || loop {
                        if stop_ref.load(Ordering::Relaxed) {
                            break;
                        }
                        let restart = next_ref.fetch_add(1, Ordering::Relaxed);
                        if restart >= config.restarts {
                            break;
                        }
                        let mut rng = restart_rng(master_seed, restart);
                        let (schedule, score) = climb.run(roster_ref, stop_ref, &mut rng);
                        tracing::debug!(worker, restart, score = score.value(), "Restart finished");
                        inc_ref.try_update(&schedule, score, restart, &evaluator);
                        completed_ref.fetch_add(1, Ordering::Relaxed);
                    })
                })
                .collect();

            let mut worker_panic = None;
            for handle in handles {
                if let Err(payload) = handle.join() {
                    worker_panic = Some(payload);
                }
            }
            // Release the watchdog once the workers are done.
            stop_ref.store(true, Ordering::SeqCst);
            if let Some(payload) = worker_panic {
                std::panic::resume_unwind(payload);
            }
        });

        let restarts_completed = completed.load(Ordering::Relaxed);
        let (schedule, score) = match incumbent.snapshot() {
            Some((schedule, score)) => (schedule, score),
            None => {
                let mut rng = restart_rng(master_seed, 0);
                let schedule = random_schedule(roster, &mut rng);
                let score = evaluator.evaluate(&schedule);
                (schedule, score)
            }
        };
        tracing::info!(score = score.value(), restarts_completed, "Search finished");
        Ok(SolveOutcome {
            schedule,
            score,
            restarts_completed,
        })
    }
}

/// Derives the RNG for one restart by mixing its index into the master seed.
#[inline]
fn restart_rng(master_seed: u64, restart: usize) -> ChaCha8Rng {
    let mixed = master_seed ^ ((restart as u64).rotate_left(17)) ^ 0x9E37_79B1_85EB_CA87u64;
    ChaCha8Rng::seed_from_u64(mixed)
}

#[derive(Debug, Clone, Default)]
pub struct SolverBuilder {
    config: SolverConfig,
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.config.restarts = restarts;
        self
    }

    pub fn with_worker_count(mut self, num_workers: usize) -> Self {
        self.config.num_workers = num_workers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.config.time_limit = Some(time_limit);
        self
    }

    pub fn with_preset(mut self, preset: ScorePreset) -> Self {
        self.config.preset = preset;
        self
    }

    pub fn build(self) -> Solver {
        Solver::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_alloc_model::prelude::{RosterBuilder, ScheduleValidator};

    fn roster_from(entries: &[(&str, u32)]) -> Roster {
        let mut builder = RosterBuilder::default();
        for (name, sessions) in entries {
            let _ = builder
                .add_subject(*name, *sessions)
                .expect("subject should be accepted");
        }
        builder.build()
    }

    #[test]
    fn test_builder_defaults() {
        let solver = Solver::builder().build();
        let config = solver.config();
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.restarts, 10);
        assert_eq!(config.preset, ScorePreset::Rich);
        assert_eq!(config.seed, None);
        assert_eq!(config.time_limit, None);
        assert!(config.num_workers >= 1);
    }

    #[test]
    fn test_zero_restarts_is_an_error() {
        let roster = roster_from(&[("Math", 1)]);
        let solver = Solver::builder().with_restarts(0).build();
        assert_eq!(solver.solve(&roster), Err(SolveError::NoRestarts));
    }

    #[test]
    fn test_solve_conserves_single_subject_roster() {
        let roster = roster_from(&[("Math", 2)]);
        let outcome = Solver::builder()
            .with_seed(1)
            .with_iterations(50)
            .with_restarts(2)
            .build()
            .solve(&roster)
            .expect("solve succeeds");

        assert_eq!(outcome.schedule.session_count(), 2);
        assert!(ScheduleValidator::validate_conservation(&outcome.schedule, &roster).is_ok());
        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        assert_eq!(evaluator.evaluate(&outcome.schedule), outcome.score);
        assert_eq!(outcome.restarts_completed, 2);
    }

    #[test]
    fn test_two_single_session_subjects_stay_intact() {
        let roster = roster_from(&[("A", 1), ("B", 1)]);
        for iterations in [0, 40] {
            let outcome = Solver::builder()
                .with_seed(13)
                .with_iterations(iterations)
                .with_restarts(3)
                .build()
                .solve(&roster)
                .expect("solve succeeds");
            assert_eq!(outcome.schedule.session_count(), 2);
            assert!(
                ScheduleValidator::validate_conservation(&outcome.schedule, &roster).is_ok()
            );
        }
    }

    #[test]
    fn test_empty_roster_scores_per_preset() {
        let roster = Roster::default();

        let rich = Solver::builder()
            .with_seed(2)
            .with_iterations(10)
            .with_restarts(2)
            .build()
            .solve(&roster)
            .expect("solve succeeds");
        assert!(rich.schedule.is_empty());
        assert_eq!(rich.score, Score::new(-60.0));

        let simple = Solver::builder()
            .with_seed(2)
            .with_iterations(10)
            .with_restarts(2)
            .with_preset(ScorePreset::Simple)
            .build()
            .solve(&roster)
            .expect("solve succeeds");
        assert!(simple.schedule.is_empty());
        assert_eq!(simple.score, Score::new(-30.0));
    }

    #[test]
    fn test_solver_is_deterministic_across_worker_counts() {
        let roster = roster_from(&[("Math", 3), ("Physics", 2), ("Chemistry", 2), ("English", 1)]);

        let serial = Solver::builder()
            .with_seed(42)
            .with_iterations(150)
            .with_restarts(6)
            .with_worker_count(1)
            .build()
            .solve(&roster)
            .expect("solve succeeds");
        let parallel = Solver::builder()
            .with_seed(42)
            .with_iterations(150)
            .with_restarts(6)
            .with_worker_count(4)
            .build()
            .solve(&roster)
            .expect("solve succeeds");

        assert_eq!(serial.schedule, parallel.schedule);
        assert_eq!(serial.score, parallel.score);
        assert_eq!(serial.restarts_completed, 6);
        assert_eq!(parallel.restarts_completed, 6);
    }

    #[test]
    fn test_result_matches_best_sequential_restart() {
        let roster = roster_from(&[("Math", 3), ("Physics", 2), ("English", 1)]);
        let seed = 9u64;
        let iterations = 100;
        let restarts = 4;

        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        let climb = HillClimb::new(evaluator, iterations);
        let stop = AtomicBool::new(false);
        let mut expected: Option<(Schedule, Score)> = None;
        for restart in 0..restarts {
            let mut rng = restart_rng(seed, restart);
            let (schedule, score) = climb.run(&roster, &stop, &mut rng);
            let improves = match &expected {
                None => true,
                Some((_, best)) => score > *best,
            };
            if improves {
                expected = Some((schedule, score));
            }
        }
        let (expected_schedule, expected_score) = expected.expect("restarts were run");

        let outcome = Solver::builder()
            .with_seed(seed)
            .with_iterations(iterations)
            .with_restarts(restarts)
            .with_worker_count(3)
            .build()
            .solve(&roster)
            .expect("solve succeeds");

        assert_eq!(outcome.score, expected_score);
        assert_eq!(outcome.schedule, expected_schedule);
        assert_eq!(outcome.restarts_completed, restarts);
    }

    #[test]
    fn test_zero_iterations_returns_best_opening() {
        let roster = roster_from(&[("Math", 2), ("Physics", 1)]);
        let seed = 7u64;
        let restarts = 3;

        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        let mut expected: Option<Score> = None;
        for restart in 0..restarts {
            let mut rng = restart_rng(seed, restart);
            let score = evaluator.evaluate(&random_schedule(&roster, &mut rng));
            let improves = expected.map_or(true, |best| score > best);
            if improves {
                expected = Some(score);
            }
        }

        let outcome = Solver::builder()
            .with_seed(seed)
            .with_iterations(0)
            .with_restarts(restarts)
            .build()
            .solve(&roster)
            .expect("solve succeeds");
        assert_eq!(Some(outcome.score), expected);
    }

    #[test]
    fn test_expired_time_limit_still_returns_a_schedule() {
        let roster = roster_from(&[("Math", 4), ("Physics", 3), ("Chemistry", 2)]);
        let outcome = Solver::builder()
            .with_seed(3)
            .with_iterations(100_000)
            .with_restarts(4)
            .with_time_limit(Duration::ZERO)
            .build()
            .solve(&roster)
            .expect("solve succeeds");

        assert!(ScheduleValidator::validate_conservation(&outcome.schedule, &roster).is_ok());
        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        assert_eq!(evaluator.evaluate(&outcome.schedule), outcome.score);
        assert!(outcome.restarts_completed <= 4);
    }

    #[test]
    fn test_zero_worker_config_is_clamped() {
        let roster = roster_from(&[("Math", 1), ("Physics", 1)]);
        let outcome = Solver::builder()
            .with_seed(5)
            .with_iterations(20)
            .with_restarts(2)
            .with_worker_count(0)
            .build()
            .solve(&roster)
            .expect("solve succeeds");
        assert_eq!(outcome.restarts_completed, 2);
    }

    #[test]
    fn test_restart_streams_differ() {
        use rand::Rng;
        let mut a = restart_rng(1, 0);
        let mut b = restart_rng(1, 1);
        let draws_a: Vec<u32> = (0..8).map(|_| a.random_range(0..1000)).collect();
        let draws_b: Vec<u32> = (0..8).map(|_| b.random_range(0..1000)).collect();
        assert_ne!(draws_a, draws_b);
    }
}
