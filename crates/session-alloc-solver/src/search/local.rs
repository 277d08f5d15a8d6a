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
use crate::opening::random_schedule;
use crate::search::neighbor::neighbor;
use rand::Rng;
use session_alloc_model::prelude::{Roster, Schedule};
use std::sync::atomic::{AtomicBool, Ordering};

/// Hill climber with sideways moves.
///
/// Starting from a random opening, each iteration proposes one neighbor and
/// accepts it when its score is at least the current one, so plateaus can be
/// crossed. The best schedule seen so far is tracked separately and only
/// replaced on strict improvement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillClimb<E> {
    evaluator: E,
    iterations: usize,
}

impl<E> HillClimb<E> {
    #[inline]
    pub const fn new(evaluator: E, iterations: usize) -> Self {
        Self {
            evaluator,
            iterations,
        }
    }

    #[inline]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    #[inline]
    pub const fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

impl<E: ScheduleEvaluator> HillClimb<E> {
    /// Runs one climb and returns the best schedule with its score.
    ///
    /// The stop flag is polled once per iteration; a raised flag ends the
    /// climb early and the best schedule found up to that point is returned.
    /// With zero iterations (or an immediately raised flag) that is the
    /// opening itself.
    pub fn run<R: Rng>(&self, roster: &Roster, stop: &AtomicBool, rng: &mut R) -> (Schedule, Score) {
        let mut current = random_schedule(roster, rng);
        let mut current_score = self.evaluator.evaluate(&current);
        let mut best = current.clone();
        let mut best_score = current_score;

        for _ in 0..self.iterations {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            let candidate = neighbor(&current, roster, rng);
            let candidate_score = self.evaluator.evaluate(&candidate);
            if candidate_score >= current_score {
                current = candidate;
                current_score = candidate_score;
                if current_score > best_score {
                    best = current.clone();
                    best_score = current_score;
                }
            }
        }
        (best, best_score)
    }
}
