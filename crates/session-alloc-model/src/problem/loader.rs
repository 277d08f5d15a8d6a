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
    err::RosterLoadError,
    roster::{Roster, RosterBuilder},
};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// One subject entry as it appears in a roster file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectSpec {
    pub name: String,
    pub sessions: u32,
}

/// Reads a roster from JSON, an array of `{"name", "sessions"}` objects.
/// Every entry passes through the validating builder, so a file that
/// overcommits the grid is rejected the same way interactive input is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterLoader;

impl RosterLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Roster, RosterLoadError> {
        let specs: Vec<SubjectSpec> = serde_json::from_reader(reader)?;
        Self::assemble(specs)
    }

    pub fn from_str(&self, s: &str) -> Result<Roster, RosterLoadError> {
        let specs: Vec<SubjectSpec> = serde_json::from_str(s)?;
        Self::assemble(specs)
    }

    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Roster, RosterLoadError> {
        let file = File::open(path)?;
        self.from_reader(BufReader::new(file))
    }

    fn assemble(specs: Vec<SubjectSpec>) -> Result<Roster, RosterLoadError> {
        let mut builder = RosterBuilder::new();
        for spec in specs {
            let _ = builder.add_subject(spec.name, spec.sessions)?;
        }
        Ok(builder.build())
    }
}
