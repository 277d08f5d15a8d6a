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

use crate::eval::{score::Score, ScheduleEvaluator};
use parking_lot::Mutex;
use session_alloc_model::prelude::Schedule;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
struct Incumbent {
    schedule: Schedule,
    score: Score,
    restart: usize,
}

/// Best schedule found across all restarts.
///
/// Workers race their results into this container. Ties on score are broken
/// towards the lowest restart index so a parallel run reports the same
/// winner a sequential sweep over the restarts would.
#[derive(Debug)]
pub struct SharedIncumbent {
    best: Mutex<Option<Incumbent>>,
    best_score_bits: AtomicU64, // avoid locking for simple reads
}

impl SharedIncumbent {
    #[inline]
    pub fn new() -> Self {
        Self {
            best: Mutex::new(None),
            best_score_bits: AtomicU64::new(Score::NEG_INFINITY.to_bits()),
        }
    }

    /// Lightweight best-known score without locking the schedule.
    #[inline]
    pub fn peek(&self) -> Score {
        Score::from_bits(self.best_score_bits.load(Ordering::Acquire))
    }

    /// Full cloned snapshot of the current best, if any restart reported one.
    #[inline]
    pub fn snapshot(&self) -> Option<(Schedule, Score)> {
        self.best
            .lock()
            .as_ref()
            .map(|incumbent| (incumbent.schedule.clone(), incumbent.score))
    }

    #[tracing::instrument(level = "debug", skip(self, candidate, evaluator))]
    pub fn try_update<E: ScheduleEvaluator>(
        &self,
        candidate: &Schedule,
        score: Score,
        restart: usize,
        evaluator: &E,
    ) -> bool {
        // Cheap pre-check; equal scores still have to take the lock since a
        // lower restart index may win the tie.
        if score < self.peek() {
            return false;
        }

        let mut guard = self.best.lock();
        let wins = match guard.as_ref() {
            None => true,
            Some(best) => {
                score > best.score || (score == best.score && restart < best.restart)
            }
        };
        if !wins {
            return false;
        }

        let old_score = guard
            .as_ref()
            .map_or(f64::NEG_INFINITY, |best| best.score.value());
        tracing::info!(
            old_score,
            new_score = score.value(),
            restart,
            "New incumbent"
        );

        #[cfg(debug_assertions)]
        {
            let recomputed = evaluator.evaluate(candidate);
            debug_assert_eq!(
                recomputed, score,
                "reported score differs from recomputed schedule score"
            );
        }

        *guard = Some(Incumbent {
            schedule: candidate.clone(),
            score,
            restart,
        });
        self.best_score_bits
            .store(score.to_bits(), Ordering::Release);
        true
    }
}

impl Default for SharedIncumbent {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::weighted::{ScorePreset, WeightedEvaluator};
    use session_alloc_model::prelude::{Day, Room, SessionId, Slot, SubjectIdentifier};
    use std::thread;

    fn session(subject: u32, occurrence: u32) -> SessionId {
        SessionId::new(SubjectIdentifier::new(subject), occurrence)
    }

    // Empty grid scores -60 under the rich preset.
    fn empty_schedule() -> Schedule {
        Schedule::new()
    }

    // Single Monday session, -40.375 under the rich preset.
    fn sparse_schedule() -> Schedule {
        let mut schedule = Schedule::new();
        schedule.place(Slot::new(Day::Monday, Room::Room1), session(1, 1));
        schedule
    }

    // Four spread-out sessions, +20 under the rich preset.
    fn spread_schedule() -> Schedule {
        let mut schedule = Schedule::new();
        schedule.place(Slot::new(Day::Monday, Room::Room1), session(1, 1));
        schedule.place(Slot::new(Day::Tuesday, Room::Room2), session(2, 1));
        schedule.place(Slot::new(Day::Wednesday, Room::Room3), session(3, 1));
        schedule.place(Slot::new(Day::Thursday, Room::Room4), session(4, 1));
        schedule
    }

    fn scored(schedule: Schedule) -> (Schedule, Score) {
        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        let score = evaluator.evaluate(&schedule);
        (schedule, score)
    }

    #[test]
    fn test_first_update_installs_candidate() {
        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        let incumbent = SharedIncumbent::new();
        assert_eq!(incumbent.peek(), Score::NEG_INFINITY);
        assert!(incumbent.snapshot().is_none());

        let (schedule, score) = scored(empty_schedule());
        assert!(incumbent.try_update(&schedule, score, 3, &evaluator));
        assert_eq!(incumbent.peek(), score);
        assert_eq!(incumbent.snapshot(), Some((schedule, score)));
    }

    #[test]
    fn test_lower_score_is_rejected() {
        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        let incumbent = SharedIncumbent::new();

        let (sparse, sparse_score) = scored(sparse_schedule());
        let (empty, empty_score) = scored(empty_schedule());
        assert!(incumbent.try_update(&sparse, sparse_score, 0, &evaluator));
        assert!(!incumbent.try_update(&empty, empty_score, 1, &evaluator));
        assert_eq!(incumbent.snapshot(), Some((sparse, sparse_score)));
    }

    #[test]
    fn test_higher_score_replaces_incumbent() {
        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        let incumbent = SharedIncumbent::new();

        let (empty, empty_score) = scored(empty_schedule());
        let (spread, spread_score) = scored(spread_schedule());
        assert!(incumbent.try_update(&empty, empty_score, 0, &evaluator));
        assert!(incumbent.try_update(&spread, spread_score, 4, &evaluator));
        assert_eq!(incumbent.peek(), spread_score);
        assert_eq!(incumbent.snapshot(), Some((spread, spread_score)));
    }

    #[test]
    fn test_score_tie_prefers_earlier_restart() {
        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        let incumbent = SharedIncumbent::new();

        let (schedule, score) = scored(sparse_schedule());
        assert!(incumbent.try_update(&schedule, score, 5, &evaluator));
        assert!(!incumbent.try_update(&schedule, score, 7, &evaluator));
        assert!(incumbent.try_update(&schedule, score, 2, &evaluator));
        assert!(!incumbent.try_update(&schedule, score, 2, &evaluator));
        assert_eq!(incumbent.peek(), score);
    }

    #[test]
    fn test_concurrent_updates_keep_the_maximum() {
        let evaluator = WeightedEvaluator::preset(ScorePreset::Rich);
        let incumbent = SharedIncumbent::new();
        let candidates = [
            scored(empty_schedule()),
            scored(sparse_schedule()),
            scored(spread_schedule()),
        ];
        let best_score = candidates
            .iter()
            .map(|(_, score)| *score)
            .max()
            .expect("candidate list is non-empty");

        thread::scope(|scope| {
            for worker in 0..4 {
                let incumbent = &incumbent;
                let evaluator = &evaluator;
                let candidates = &candidates;
                scope.spawn(move || {
                    for (offset, (schedule, score)) in candidates.iter().enumerate() {
                        incumbent.try_update(schedule, *score, worker * 3 + offset, evaluator);
                    }
                });
            }
        });

        assert_eq!(incumbent.peek(), best_score);
        let (schedule, score) = incumbent.snapshot().expect("an incumbent was installed");
        assert_eq!(score, best_score);
        assert_eq!(evaluator.evaluate(&schedule), best_score);
    }
}
