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

use rand::Rng;
use session_alloc_model::prelude::{Room, Roster, SessionId};

/// A single session occurrence paired with a provisional room tag.
///
/// The tag is re-drawn on every expansion. Only the [`SessionId`] is stable
/// between calls; two expansions of the same roster agree on the ids but
/// usually not on the rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateSession {
    pub id: SessionId,
    pub room: Room,
}

/// Flattens the roster into one [`CandidateSession`] per occurrence, tagging
/// each with a uniformly drawn room.
///
/// The order is deterministic given the roster (subjects in insertion order,
/// occurrences ascending); only the room tags depend on the RNG.
pub fn expand<R: Rng>(roster: &Roster, rng: &mut R) -> Vec<CandidateSession> {
    let mut candidates = Vec::with_capacity(roster.total_sessions() as usize);
    for subject in roster.subjects() {
        for id in subject.session_ids() {
            let room = Room::ALL[rng.random_range(0..Room::COUNT)];
            candidates.push(CandidateSession { id, room });
        }
    }
    candidates
}
