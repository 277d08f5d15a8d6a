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

/// Teaching day of the week. The declaration order is the weekday order
/// and is relied upon for adjacency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const COUNT: usize = 6;

    pub const ALL: [Day; Day::COUNT] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Day> {
        match index {
            0 => Some(Day::Monday),
            1 => Some(Day::Tuesday),
            2 => Some(Day::Wednesday),
            3 => Some(Day::Thursday),
            4 => Some(Day::Friday),
            5 => Some(Day::Saturday),
            _ => None,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One of the four interchangeable rooms. Rooms carry no ordering
/// semantics; the indices exist only to address the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Room1,
    Room2,
    Room3,
    Room4,
}

impl Room {
    pub const COUNT: usize = 4;

    pub const ALL: [Room; Room::COUNT] = [Room::Room1, Room::Room2, Room::Room3, Room::Room4];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Room> {
        match index {
            0 => Some(Room::Room1),
            1 => Some(Room::Room2),
            2 => Some(Room::Room3),
            3 => Some(Room::Room4),
            _ => None,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Room::Room1 => "Room 1",
            Room::Room2 => "Room 2",
            Room::Room3 => "Room 3",
            Room::Room4 => "Room 4",
        }
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Number of grid cells; fixed for the lifetime of a run.
pub const SLOT_COUNT: usize = Day::COUNT * Room::COUNT;

/// One cell of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    day: Day,
    room: Room,
}

impl Slot {
    #[inline]
    pub const fn new(day: Day, room: Room) -> Self {
        Self { day, room }
    }

    #[inline]
    pub const fn day(&self) -> Day {
        self.day
    }

    #[inline]
    pub const fn room(&self) -> Room {
        self.room
    }

    /// Position of this slot in row-major day/room order, in `0..SLOT_COUNT`.
    #[inline]
    pub const fn ordinal(&self) -> usize {
        self.day.index() * Room::COUNT + self.room.index()
    }

    /// All 24 slots in row-major day/room order.
    pub fn all() -> impl Iterator<Item = Slot> {
        Day::ALL
            .iter()
            .flat_map(|d| Room::ALL.iter().map(move |r| Slot::new(*d, *r)))
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.day, self.room)
    }
}
