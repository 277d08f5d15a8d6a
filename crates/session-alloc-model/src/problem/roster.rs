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
    err::{
        AddSubjectError, BlankSubjectNameError, DuplicateSubjectNameError, RosterCapacityError,
        ZeroSessionCountError,
    },
    grid::SLOT_COUNT,
    subject::{SessionId, Subject, SubjectIdentifier},
};

/// Validated, read-only subject list handed to the solver for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    subjects: Vec<Subject>,
}

impl Roster {
    #[inline]
    pub fn builder() -> RosterBuilder {
        RosterBuilder::new()
    }

    #[inline]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    #[inline]
    pub fn total_sessions(&self) -> u32 {
        self.subjects.iter().map(|s| s.sessions()).sum()
    }

    #[inline]
    pub fn get(&self, id: SubjectIdentifier) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id() == id)
    }

    /// Identities of every session the roster expands to.
    pub fn session_ids(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.subjects.iter().flat_map(|s| s.session_ids())
    }

    /// Resolves a session identity to its display name, e.g. `"Math (2)"`.
    #[inline]
    pub fn display_name(&self, id: SessionId) -> Option<String> {
        self.get(id.subject()).map(|s| s.session_name(id.occurrence()))
    }
}

/// Caller-side assembly of a [`Roster`]. Rejections happen eagerly at
/// `add_subject` time; the solver never re-validates capacity.
#[derive(Debug, Clone, Default)]
pub struct RosterBuilder {
    subjects: Vec<Subject>,
}

impl RosterBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn total_sessions(&self) -> u32 {
        self.subjects.iter().map(|s| s.sessions()).sum()
    }

    #[inline]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Adds one subject. Rejects blank names, zero session counts,
    /// duplicate names and anything that would push the committed total
    /// past the 24 grid slots.
    pub fn add_subject(
        &mut self,
        name: impl Into<String>,
        sessions: u32,
    ) -> Result<SubjectIdentifier, AddSubjectError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BlankSubjectNameError.into());
        }
        if sessions == 0 {
            return Err(ZeroSessionCountError::new(name).into());
        }
        if self.subjects.iter().any(|s| s.name() == name) {
            return Err(DuplicateSubjectNameError::new(name).into());
        }
        let committed = self.total_sessions();
        if committed as usize + sessions as usize > SLOT_COUNT {
            return Err(RosterCapacityError::new(name, sessions, committed, SLOT_COUNT).into());
        }

        let id = SubjectIdentifier::new(self.subjects.len() as u32 + 1);
        self.subjects.push(Subject::new(id, name, sessions));
        Ok(id)
    }

    /// Drops every subject added so far.
    #[inline]
    pub fn clear(&mut self) {
        self.subjects.clear();
    }

    #[inline]
    pub fn build(self) -> Roster {
        Roster {
            subjects: self.subjects,
        }
    }
}
