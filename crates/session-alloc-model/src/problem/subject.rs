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

use crate::common::{Identifier, IdentifierMarkerName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectIdentifierMarker;

impl IdentifierMarkerName for SubjectIdentifierMarker {
    const NAME: &'static str = "Subject";
}

pub type SubjectIdentifier = Identifier<u32, SubjectIdentifierMarker>;

/// A course as entered by the caller: a display name plus how many
/// weekly sessions it requires. Validation happens in the roster
/// builder, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    id: SubjectIdentifier,
    name: String,
    sessions: u32,
}

impl Subject {
    #[inline]
    pub fn new(id: SubjectIdentifier, name: impl Into<String>, sessions: u32) -> Self {
        Self {
            id,
            name: name.into(),
            sessions,
        }
    }

    #[inline]
    pub fn id(&self) -> SubjectIdentifier {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Identities of all sessions of this subject, occurrence indices
    /// starting at 1.
    pub fn session_ids(&self) -> impl Iterator<Item = SessionId> + '_ {
        let id = self.id;
        (1..=self.sessions).map(move |occurrence| SessionId::new(id, occurrence))
    }

    /// Display name of one occurrence, e.g. `"Math (2)"`.
    #[inline]
    pub fn session_name(&self, occurrence: u32) -> String {
        format!("{} ({})", self.name, occurrence)
    }
}

/// Identity of one scheduled occurrence of a subject. Stable for the
/// whole run; the provisional room tag drawn during expansion is *not*
/// part of the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId {
    subject: SubjectIdentifier,
    occurrence: u32,
}

impl SessionId {
    #[inline]
    pub const fn new(subject: SubjectIdentifier, occurrence: u32) -> Self {
        Self {
            subject,
            occurrence,
        }
    }

    #[inline]
    pub const fn subject(&self) -> SubjectIdentifier {
        self.subject
    }

    #[inline]
    pub const fn occurrence(&self) -> u32 {
        self.occurrence
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.subject, self.occurrence)
    }
}
