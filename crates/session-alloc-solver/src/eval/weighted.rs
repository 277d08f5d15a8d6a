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

use crate::eval::err::UnknownPresetError;
use crate::eval::score::Score;
use crate::eval::ScheduleEvaluator;
use session_alloc_model::prelude::{Day, Room, Schedule, SubjectIdentifier};
use std::collections::BTreeMap;

/// Weight table for the criterion mix.
///
/// Every criterion is always computed; a preset zeroes the weights it does
/// not use. All weights are magnitudes, the evaluator decides the sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Bonus per day that holds at least one session.
    pub day_present_bonus: f64,
    /// Penalty per day without any session.
    pub day_empty_penalty: f64,
    /// Bonus per occupied slot.
    pub occupied_slot_bonus: f64,
    /// Maximum number of sessions a day carries without penalty.
    pub overload_threshold: usize,
    /// Penalty per session above [`ScoreWeights::overload_threshold`] on a day.
    pub overload_per_session: f64,
    /// Flat penalty for a day above [`ScoreWeights::overload_threshold`].
    pub overload_flat: f64,
    /// Penalty factor on the squared deviation of per-room session counts.
    pub room_imbalance: f64,
    /// Penalty per additional session sharing one slot.
    pub crowding_per_extra: f64,
    /// Penalty per session of a subject beyond one on the same day.
    pub same_day_repeat: f64,
    /// Penalty per pair of adjacent days both holding the same subject.
    pub adjacent_days: f64,
    /// Penalty for a day carrying exactly as many sessions as there are
    /// rooms, stacked sessions included.
    pub full_day: f64,
}

impl ScoreWeights {
    /// Full criterion mix: day coverage, day load, room balance, crowding,
    /// subject spread, adjacency and full-day pressure.
    pub const fn rich() -> Self {
        Self {
            day_present_bonus: 10.0,
            day_empty_penalty: 10.0,
            occupied_slot_bonus: 0.0,
            overload_threshold: 4,
            overload_per_session: 5.0,
            overload_flat: 0.0,
            room_imbalance: 0.5,
            crowding_per_extra: 3.0,
            same_day_repeat: 5.0,
            adjacent_days: 2.0,
            full_day: 8.0,
        }
    }

    /// Coarse mix that only rewards slot usage and penalizes empty or
    /// overloaded days.
    pub const fn simple() -> Self {
        Self {
            day_present_bonus: 0.0,
            day_empty_penalty: 5.0,
            occupied_slot_bonus: 10.0,
            overload_threshold: 4,
            overload_per_session: 0.0,
            overload_flat: 5.0,
            room_imbalance: 0.0,
            crowding_per_extra: 0.0,
            same_day_repeat: 0.0,
            adjacent_days: 0.0,
            full_day: 0.0,
        }
    }
}

/// Named weight configuration selectable at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScorePreset {
    #[default]
    Rich,
    Simple,
}

impl ScorePreset {
    #[inline]
    pub const fn weights(self) -> ScoreWeights {
        match self {
            ScorePreset::Rich => ScoreWeights::rich(),
            ScorePreset::Simple => ScoreWeights::simple(),
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            ScorePreset::Rich => "rich",
            ScorePreset::Simple => "simple",
        }
    }
}

impl std::fmt::Display for ScorePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ScorePreset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rich" => Ok(ScorePreset::Rich),
            "simple" => Ok(ScorePreset::Simple),
            _ => Err(UnknownPresetError::new(s)),
        }
    }
}

/// Evaluator that sums the weighted criteria over a schedule in one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEvaluator {
    weights: ScoreWeights,
}

impl WeightedEvaluator {
    #[inline]
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    #[inline]
    pub const fn preset(preset: ScorePreset) -> Self {
        Self::new(preset.weights())
    }

    #[inline]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }
}

impl ScheduleEvaluator for WeightedEvaluator {
    fn evaluate(&self, schedule: &Schedule) -> Score {
        let w = &self.weights;

        let mut day_sessions = [0usize; Day::COUNT];
        let mut day_occupied = [0usize; Day::COUNT];
        let mut room_sessions = [0usize; Room::COUNT];
        let mut crowding_extra = 0usize;
        let mut subject_days: BTreeMap<SubjectIdentifier, [u32; Day::COUNT]> = BTreeMap::new();

        for (slot, ids) in schedule.iter() {
            if ids.is_empty() {
                continue;
            }
            let day = slot.day().index();
            day_sessions[day] += ids.len();
            day_occupied[day] += 1;
            room_sessions[slot.room().index()] += ids.len();
            crowding_extra += ids.len() - 1;
            for id in ids {
                subject_days.entry(id.subject()).or_default()[day] += 1;
            }
        }

        let mut total = 0.0;

        for day in 0..Day::COUNT {
            let sessions = day_sessions[day];
            if sessions > 0 {
                total += w.day_present_bonus;
            } else {
                total -= w.day_empty_penalty;
            }
            if sessions > w.overload_threshold {
                total -= w.overload_per_session * (sessions - w.overload_threshold) as f64;
                total -= w.overload_flat;
            }
            if sessions == Room::COUNT {
                total -= w.full_day;
            }
        }

        let occupied: usize = day_occupied.iter().sum();
        total += w.occupied_slot_bonus * occupied as f64;

        let placed: usize = room_sessions.iter().sum();
        let mean = placed as f64 / Room::COUNT as f64;
        let imbalance: f64 = room_sessions
            .iter()
            .map(|&count| {
                let deviation = count as f64 - mean;
                deviation * deviation
            })
            .sum();
        total -= w.room_imbalance * imbalance;

        total -= w.crowding_per_extra * crowding_extra as f64;

        for hits in subject_days.values() {
            let sessions: u32 = hits.iter().sum();
            let distinct = hits.iter().filter(|&&count| count > 0).count() as u32;
            if distinct < sessions {
                total -= w.same_day_repeat * (sessions - distinct) as f64;
            }
            for day in 0..Day::COUNT - 1 {
                if hits[day] > 0 && hits[day + 1] > 0 {
                    total -= w.adjacent_days;
                }
            }
        }

        Score::new(total)
    }
}
