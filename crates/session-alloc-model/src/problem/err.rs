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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlankSubjectNameError;

impl std::fmt::Display for BlankSubjectNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subject name must not be blank")
    }
}

impl std::error::Error for BlankSubjectNameError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZeroSessionCountError {
    name: String,
}

impl ZeroSessionCountError {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for ZeroSessionCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subject {:?} must have at least one session",
            self.name
        )
    }
}

impl std::error::Error for ZeroSessionCountError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateSubjectNameError {
    name: String,
}

impl DuplicateSubjectNameError {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for DuplicateSubjectNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subject {:?} was already added", self.name)
    }
}

impl std::error::Error for DuplicateSubjectNameError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RosterCapacityError {
    name: String,
    requested: u32,
    committed: u32,
    capacity: usize,
}

impl RosterCapacityError {
    #[inline]
    pub fn new(name: impl Into<String>, requested: u32, committed: u32, capacity: usize) -> Self {
        Self {
            name: name.into(),
            requested,
            committed,
            capacity,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn requested(&self) -> u32 {
        self.requested
    }

    #[inline]
    pub fn committed(&self) -> u32 {
        self.committed
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl std::fmt::Display for RosterCapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Adding subject {:?} with {} sessions exceeds the {}-slot grid ({} sessions already committed)",
            self.name, self.requested, self.capacity, self.committed
        )
    }
}

impl std::error::Error for RosterCapacityError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddSubjectError {
    BlankName(BlankSubjectNameError),
    ZeroSessions(ZeroSessionCountError),
    DuplicateName(DuplicateSubjectNameError),
    CapacityExceeded(RosterCapacityError),
}

impl std::fmt::Display for AddSubjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddSubjectError::BlankName(e) => write!(f, "{}", e),
            AddSubjectError::ZeroSessions(e) => write!(f, "{}", e),
            AddSubjectError::DuplicateName(e) => write!(f, "{}", e),
            AddSubjectError::CapacityExceeded(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AddSubjectError {}

impl From<BlankSubjectNameError> for AddSubjectError {
    fn from(err: BlankSubjectNameError) -> Self {
        AddSubjectError::BlankName(err)
    }
}

impl From<ZeroSessionCountError> for AddSubjectError {
    fn from(err: ZeroSessionCountError) -> Self {
        AddSubjectError::ZeroSessions(err)
    }
}

impl From<DuplicateSubjectNameError> for AddSubjectError {
    fn from(err: DuplicateSubjectNameError) -> Self {
        AddSubjectError::DuplicateName(err)
    }
}

impl From<RosterCapacityError> for AddSubjectError {
    fn from(err: RosterCapacityError) -> Self {
        AddSubjectError::CapacityExceeded(err)
    }
}

#[derive(Debug)]
pub enum RosterLoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Subject(AddSubjectError),
}

impl From<std::io::Error> for RosterLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for RosterLoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<AddSubjectError> for RosterLoadError {
    fn from(e: AddSubjectError) -> Self {
        Self::Subject(e)
    }
}

impl std::fmt::Display for RosterLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RosterLoadError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            Parse(e) => write!(f, "JSON parse error: {e}"),
            Subject(e) => write!(f, "invalid subject: {e}"),
        }
    }
}

impl std::error::Error for RosterLoadError {}
