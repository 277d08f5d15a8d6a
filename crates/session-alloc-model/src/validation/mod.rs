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

pub mod err;

use crate::{
    problem::{roster::Roster, subject::SessionId},
    solution::sched::Schedule,
    validation::err::{
        ConservationError, DuplicateSessionError, MissingSessionError, UnknownSessionError,
    },
};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct ScheduleValidator;

impl ScheduleValidator {
    /// Checks that the schedule holds exactly the session set the roster
    /// expands to: nothing missing, nothing duplicated, nothing foreign.
    pub fn validate_conservation(
        schedule: &Schedule,
        roster: &Roster,
    ) -> Result<(), ConservationError> {
        let expected: BTreeSet<SessionId> = roster.session_ids().collect();
        let mut seen: BTreeSet<SessionId> = BTreeSet::new();

        for (_, ids) in schedule.iter() {
            for id in ids {
                if !expected.contains(id) {
                    return Err(UnknownSessionError::new(*id).into());
                }
                if !seen.insert(*id) {
                    return Err(DuplicateSessionError::new(*id).into());
                }
            }
        }

        if let Some(missing) = expected.difference(&seen).next() {
            return Err(MissingSessionError::new(*missing).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{
        grid::{Day, Room, Slot},
        roster::RosterBuilder,
        subject::SubjectIdentifier,
    };

    fn roster_of(entries: &[(&str, u32)]) -> Roster {
        let mut builder = RosterBuilder::new();
        for (name, sessions) in entries {
            let _ = builder.add_subject(*name, *sessions).unwrap();
        }
        builder.build()
    }

    fn place_all(roster: &Roster) -> Schedule {
        let mut schedule = Schedule::new();
        let slot = Slot::new(Day::Monday, Room::Room1);
        for id in roster.session_ids() {
            schedule.place(slot, id);
        }
        schedule
    }

    #[test]
    fn test_full_placement_is_conserved() {
        let roster = roster_of(&[("A", 2), ("B", 1)]);
        let schedule = place_all(&roster);
        assert!(ScheduleValidator::validate_conservation(&schedule, &roster).is_ok());
    }

    #[test]
    fn test_empty_roster_and_schedule_are_conserved() {
        let roster = Roster::default();
        assert!(ScheduleValidator::validate_conservation(&Schedule::new(), &roster).is_ok());
    }

    #[test]
    fn test_detects_missing_session() {
        let roster = roster_of(&[("A", 2)]);
        let mut schedule = place_all(&roster);
        let id = roster.session_ids().next().unwrap();
        schedule.remove(Slot::new(Day::Monday, Room::Room1), id);

        let err = ScheduleValidator::validate_conservation(&schedule, &roster).unwrap_err();
        assert!(matches!(err, ConservationError::Missing(e) if e.id() == id));
    }

    #[test]
    fn test_detects_duplicated_session() {
        let roster = roster_of(&[("A", 1)]);
        let mut schedule = place_all(&roster);
        let id = roster.session_ids().next().unwrap();
        schedule.place(Slot::new(Day::Friday, Room::Room2), id);

        let err = ScheduleValidator::validate_conservation(&schedule, &roster).unwrap_err();
        assert!(matches!(err, ConservationError::Duplicate(e) if e.id() == id));
    }

    #[test]
    fn test_detects_foreign_session() {
        let roster = roster_of(&[("A", 1)]);
        let mut schedule = place_all(&roster);
        let foreign = SessionId::new(SubjectIdentifier::new(42), 1);
        schedule.place(Slot::new(Day::Tuesday, Room::Room1), foreign);

        let err = ScheduleValidator::validate_conservation(&schedule, &roster).unwrap_err();
        assert!(matches!(err, ConservationError::Unknown(e) if e.id() == foreign));
    }
}
