//! Ordered line sequences
//!
//! A [`LineSequence`] is the unit the aligner and renderers work on:
//! an ordered, 0-based, immutable list of lines. Two instances exist
//! per run, one per side. Inputs are read fully before alignment
//! begins; there is no streaming.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Index;
use std::path::Path;

use crate::error::DiffError;

/// An ordered, 0-based, immutable sequence of text lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Create a sequence from already-split lines.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Read a text file fully into a line sequence.
    ///
    /// Lines are split on line boundaries with terminators stripped,
    /// original order and content preserved. An empty file yields an
    /// empty sequence.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DiffError> {
        let path = path.as_ref();
        let to_err = |source| DiffError::Io {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).map_err(to_err)?;
        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            lines.push(line.map_err(to_err)?);
        }
        Ok(Self { lines })
    }

    /// Number of lines in the sequence.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get a line by 0-based index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Iterate over the lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// View the sequence as a slice of lines.
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

impl Index<usize> for LineSequence {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.lines[index]
    }
}

impl<S: Into<String>> FromIterator<S> for LineSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}
