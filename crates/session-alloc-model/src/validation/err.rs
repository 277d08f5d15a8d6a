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

use crate::problem::subject::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MissingSessionError {
    id: SessionId,
}

impl MissingSessionError {
    #[inline]
    pub fn new(id: SessionId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl std::fmt::Display for MissingSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session {} is missing from the schedule", self.id)
    }
}

impl std::error::Error for MissingSessionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateSessionError {
    id: SessionId,
}

impl DuplicateSessionError {
    #[inline]
    pub fn new(id: SessionId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl std::fmt::Display for DuplicateSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session {} is placed more than once", self.id)
    }
}

impl std::error::Error for DuplicateSessionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownSessionError {
    id: SessionId,
}

impl UnknownSessionError {
    #[inline]
    pub fn new(id: SessionId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl std::fmt::Display for UnknownSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session {} does not belong to any roster subject",
            self.id
        )
    }
}

impl std::error::Error for UnknownSessionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConservationError {
    Missing(MissingSessionError),
    Duplicate(DuplicateSessionError),
    Unknown(UnknownSessionError),
}

impl std::fmt::Display for ConservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConservationError::Missing(e) => write!(f, "{}", e),
            ConservationError::Duplicate(e) => write!(f, "{}", e),
            ConservationError::Unknown(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConservationError {}

impl From<MissingSessionError> for ConservationError {
    fn from(err: MissingSessionError) -> Self {
        ConservationError::Missing(err)
    }
}

impl From<DuplicateSessionError> for ConservationError {
    fn from(err: DuplicateSessionError) -> Self {
        ConservationError::Duplicate(err)
    }
}

impl From<UnknownSessionError> for ConservationError {
    fn from(err: UnknownSessionError) -> Self {
        ConservationError::Unknown(err)
    }
}
