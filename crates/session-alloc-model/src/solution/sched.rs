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

use crate::problem::{
    grid::{Day, Room, Slot},
    subject::SessionId,
};
use std::collections::HashMap;

/// Assignment of sessions to the fixed 6x4 grid. A plain value: search
/// moves clone the whole schedule and mutate the copy, so a candidate
/// never shares slot storage with the schedule it came from.
///
/// A slot holds its sessions in placement order; stacking several
/// sessions into one slot is allowed and left to the scorer to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    slots: [[Vec<SessionId>; Room::COUNT]; Day::COUNT],
}

impl Schedule {
    #[inline]
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| std::array::from_fn(|_| Vec::new())),
        }
    }

    #[inline]
    pub fn sessions_at(&self, slot: Slot) -> &[SessionId] {
        &self.slots[slot.day().index()][slot.room().index()]
    }

    /// Appends a session to a slot.
    #[inline]
    pub fn place(&mut self, slot: Slot, id: SessionId) {
        self.slots[slot.day().index()][slot.room().index()].push(id);
    }

    /// Removes the first occurrence of `id` from `slot`, keeping the
    /// order of the remaining sessions. Returns whether it was present.
    pub fn remove(&mut self, slot: Slot, id: SessionId) -> bool {
        let cell = &mut self.slots[slot.day().index()][slot.room().index()];
        match cell.iter().position(|s| *s == id) {
            Some(pos) => {
                cell.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Scans the grid for the slot currently holding `id`.
    pub fn locate(&self, id: SessionId) -> Option<Slot> {
        self.iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(slot, _)| slot)
    }

    /// Lookup table from every placed session to its slot.
    pub fn locations(&self) -> HashMap<SessionId, Slot> {
        let mut map = HashMap::with_capacity(self.session_count());
        for (slot, ids) in self.iter() {
            for id in ids {
                map.insert(*id, slot);
            }
        }
        map
    }

    /// All 24 slots with their contents, in row-major day/room order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &[SessionId])> + '_ {
        Slot::all().map(move |slot| (slot, self.sessions_at(slot)))
    }

    #[inline]
    pub fn session_count(&self) -> usize {
        self.slots
            .iter()
            .map(|row| row.iter().map(|cell| cell.len()).sum::<usize>())
            .sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.session_count() == 0
    }

    /// Total sessions placed on a day, counting stacked slots.
    #[inline]
    pub fn day_sessions(&self, day: Day) -> usize {
        self.slots[day.index()].iter().map(|cell| cell.len()).sum()
    }

    /// Total sessions placed in a room across the week.
    #[inline]
    pub fn room_sessions(&self, room: Room) -> usize {
        self.slots
            .iter()
            .map(|row| row[room.index()].len())
            .sum()
    }
}

impl Default for Schedule {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
