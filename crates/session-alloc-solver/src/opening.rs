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

use crate::expand::expand;
use rand::Rng;
use session_alloc_model::prelude::{Day, Roster, Schedule, Slot};

/// Builds a fully random opening schedule: every session of the roster is
/// placed exactly once, at a uniformly drawn day and its freshly drawn room.
pub fn random_schedule<R: Rng>(roster: &Roster, rng: &mut R) -> Schedule {
    let mut schedule = Schedule::new();
    for candidate in expand(roster, rng) {
        let day = Day::ALL[rng.random_range(0..Day::COUNT)];
        schedule.place(Slot::new(day, candidate.room), candidate.id);
    }
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use session_alloc_model::prelude::{RosterBuilder, ScheduleValidator};

    fn sample_roster() -> Roster {
        let mut builder = RosterBuilder::default();
        let _ = builder
            .add_subject("Math", 4)
            .expect("subject should be accepted");
        let _ = builder
            .add_subject("Physics", 3)
            .expect("subject should be accepted");
        let _ = builder
            .add_subject("English", 2)
            .expect("subject should be accepted");
        builder.build()
    }

    #[test]
    fn test_opening_places_every_session_exactly_once() {
        let roster = sample_roster();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let schedule = random_schedule(&roster, &mut rng);
        assert_eq!(schedule.session_count(), roster.total_sessions() as usize);
        assert!(ScheduleValidator::validate_conservation(&schedule, &roster).is_ok());
    }

    #[test]
    fn test_opening_is_reproducible_for_a_seed() {
        let roster = sample_roster();
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(random_schedule(&roster, &mut a), random_schedule(&roster, &mut b));
    }

    #[test]
    fn test_opening_of_empty_roster_is_empty() {
        let roster = Roster::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let schedule = random_schedule(&roster, &mut rng);
        assert!(schedule.is_empty());
    }
}
