//! Diff summary counters
//!
//! One [`Summary`] is produced per run by whichever renderer runs. It
//! is built up as a value owned by the renderer and handed back to the
//! caller, so the counts can be asserted in isolation from the
//! rendered text.

use std::fmt;

use crate::charmap::CharMatchMap;

/// Aggregated line and character counts for one diff run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Total lines on the left side.
    pub left_lines: usize,
    /// Total lines on the right side.
    pub right_lines: usize,
    /// Lines present only on the left side.
    pub left_only_lines: usize,
    /// Lines present only on the right side.
    pub right_only_lines: usize,
    /// Lines matched by the alignment.
    pub lines_match: usize,
    /// Paired but unequal lines.
    pub lines_diff: usize,
    /// Characters inside matched runs, left side.
    pub left_chars_match: usize,
    /// Characters outside matched runs, left side.
    pub left_chars_diff: usize,
    /// Characters inside matched runs, right side.
    pub right_chars_match: usize,
    /// Characters outside matched runs, right side.
    pub right_chars_diff: usize,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the char maps of one compared pair into the counters.
    /// Character counts accumulate only through here, so lines that
    /// were never paired contribute nothing.
    pub(crate) fn record_pair(&mut self, left: &CharMatchMap, right: &CharMatchMap) {
        self.left_chars_match += left.matched();
        self.left_chars_diff += left.mismatched();
        self.right_chars_match += right.matched();
        self.right_chars_diff += right.mismatched();
    }

    /// The trailing key/value report, one counter per line.
    pub fn report(&self) -> String {
        let rows = [
            ("summary: lines match", self.lines_match),
            ("summary: lines differ", self.lines_diff),
            ("summary: left lines", self.left_lines),
            ("summary: left only lines", self.left_only_lines),
            ("summary: left chars differ", self.left_chars_diff),
            ("summary: left chars match", self.left_chars_match),
            ("summary: right lines", self.right_lines),
            ("summary: right only lines", self.right_only_lines),
            ("summary: right chars differ", self.right_chars_diff),
            ("summary: right chars match", self.right_chars_match),
        ];

        let mut out = String::new();
        for (key, value) in rows {
            out.push_str(&format!("{key:<30} : {value:>6}\n"));
        }
        out
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}
