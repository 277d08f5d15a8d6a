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

use crate::{
    problem::{
        grid::{Day, Room, Slot},
        roster::Roster,
    },
    solution::sched::Schedule,
};
use serde::Serialize;

/// Display projection of a schedule: one row per room, one column per
/// day, each cell the session display names in placement order. Built
/// once after a run; the optimizer never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridView {
    days: Vec<String>,
    rooms: Vec<String>,
    cells: Vec<Vec<Vec<String>>>,
}

impl GridView {
    pub fn new(schedule: &Schedule, roster: &Roster) -> Self {
        let days = Day::ALL.iter().map(|d| d.to_string()).collect();
        let rooms = Room::ALL.iter().map(|r| r.to_string()).collect();
        let cells = Room::ALL
            .iter()
            .map(|room| {
                Day::ALL
                    .iter()
                    .map(|day| {
                        schedule
                            .sessions_at(Slot::new(*day, *room))
                            .iter()
                            .map(|id| {
                                roster
                                    .display_name(*id)
                                    .unwrap_or_else(|| id.to_string())
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();
        Self { days, rooms, cells }
    }

    #[inline]
    pub fn cell(&self, room: Room, day: Day) -> &[String] {
        &self.cells[room.index()][day.index()]
    }

    /// Plain-text table. Stacked sessions occupy extra lines within
    /// their room row.
    pub fn to_table(&self) -> String {
        let mut widths = [0usize; Day::COUNT + 1];
        widths[0] = self.rooms.iter().map(|r| r.len()).max().unwrap_or(0);
        for (d, header) in self.days.iter().enumerate() {
            let mut w = header.len();
            for row in &self.cells {
                for name in &row[d] {
                    w = w.max(name.len());
                }
            }
            widths[d + 1] = w;
        }

        let mut out = String::new();
        out.push_str(&format!("{:w$}", "", w = widths[0]));
        for (d, header) in self.days.iter().enumerate() {
            out.push_str(&format!(" | {:w$}", header, w = widths[d + 1]));
        }
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 3 * Day::COUNT));
        out.push('\n');

        for (r, room) in self.rooms.iter().enumerate() {
            let height = self.cells[r].iter().map(|c| c.len()).max().unwrap_or(0).max(1);
            for line in 0..height {
                let label = if line == 0 { room.as_str() } else { "" };
                out.push_str(&format!("{:w$}", label, w = widths[0]));
                for (d, cell) in self.cells[r].iter().enumerate() {
                    let text = cell.get(line).map(String::as_str).unwrap_or("");
                    out.push_str(&format!(" | {:w$}", text, w = widths[d + 1]));
                }
                out.push('\n');
            }
        }
        out
    }
}

impl std::fmt::Display for GridView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::roster::RosterBuilder;

    fn sample_roster() -> Roster {
        let mut builder = RosterBuilder::new();
        let _ = builder.add_subject("Math", 2).unwrap();
        let _ = builder.add_subject("Physics", 1).unwrap();
        builder.build()
    }

    #[test]
    fn test_empty_schedule_renders_empty_cells() {
        let roster = Roster::default();
        let view = GridView::new(&Schedule::new(), &roster);
        for room in Room::ALL {
            for day in Day::ALL {
                assert!(view.cell(room, day).is_empty());
            }
        }
        let table = view.to_table();
        assert!(table.contains("Monday"));
        assert!(table.contains("Room 4"));
    }

    #[test]
    fn test_cells_resolve_names_in_placement_order() {
        let roster = sample_roster();
        let mut schedule = Schedule::new();
        let ids: Vec<_> = roster.session_ids().collect();
        let slot = Slot::new(Day::Tuesday, Room::Room2);
        schedule.place(slot, ids[1]); // Math (2)
        schedule.place(slot, ids[2]); // Physics (1)

        let view = GridView::new(&schedule, &roster);
        assert_eq!(
            view.cell(Room::Room2, Day::Tuesday),
            &["Math (2)".to_string(), "Physics (1)".to_string()]
        );
        assert!(view.cell(Room::Room1, Day::Tuesday).is_empty());
    }

    #[test]
    fn test_table_lists_stacked_sessions_on_separate_lines() {
        let roster = sample_roster();
        let mut schedule = Schedule::new();
        let ids: Vec<_> = roster.session_ids().collect();
        let slot = Slot::new(Day::Monday, Room::Room1);
        schedule.place(slot, ids[0]);
        schedule.place(slot, ids[1]);

        let table = GridView::new(&schedule, &roster).to_table();
        assert!(table.contains("Math (1)"));
        assert!(table.contains("Math (2)"));
    }

    #[test]
    fn test_serializes_with_row_per_room() {
        let roster = sample_roster();
        let view = GridView::new(&Schedule::new(), &roster);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["rooms"].as_array().unwrap().len(), Room::COUNT);
        assert_eq!(value["days"].as_array().unwrap().len(), Day::COUNT);
        assert_eq!(value["cells"].as_array().unwrap().len(), Room::COUNT);
    }
}
