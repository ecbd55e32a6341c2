//! Line preprocessing rewrites
//!
//! Before alignment, every line of both sequences can be rewritten by
//! an ordered list of pattern -> replacement rules. This is how
//! volatile content (timestamps, addresses, counters) is normalized so
//! that lines differing only in noise align as matches.

use regex::Regex;

use crate::error::DiffError;
use crate::sequence::LineSequence;

/// A single pattern -> replacement rewrite.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pattern: Regex,
    replacement: String,
}

impl Rewrite {
    /// Compile a rewrite rule.
    ///
    /// An invalid pattern is reported here, before the diff runs.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, DiffError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Apply this rewrite to one line, replacing every match.
    pub fn apply(&self, line: &str) -> String {
        self.pattern
            .replace_all(line, self.replacement.as_str())
            .into_owned()
    }
}

/// An ordered set of rewrites. The empty set is the identity.
#[derive(Debug, Clone, Default)]
pub struct RewriteSet {
    rewrites: Vec<Rewrite>,
}

impl RewriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rewrite; rules run in insertion order.
    pub fn push(&mut self, rewrite: Rewrite) {
        self.rewrites.push(rewrite);
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn add(mut self, rewrite: Rewrite) -> Self {
        self.rewrites.push(rewrite);
        self
    }

    pub fn len(&self) -> usize {
        self.rewrites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewrites.is_empty()
    }

    /// Run every rewrite over one line, in order.
    pub fn apply_line(&self, line: &str) -> String {
        let mut line = line.to_string();
        for rewrite in &self.rewrites {
            line = rewrite.apply(&line);
        }
        line
    }

    /// Rewrite every line of a sequence.
    pub fn apply(&self, seq: &LineSequence) -> LineSequence {
        if self.rewrites.is_empty() {
            return seq.clone();
        }
        seq.iter().map(|line| self.apply_line(line)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rewrite() {
        let rewrite = Rewrite::new(r"\d+", "N").unwrap();
        assert_eq!(rewrite.apply("port 8080 open"), "port N open");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Rewrite::new(r"(unclosed", "x").unwrap_err();
        assert!(matches!(err, DiffError::Pattern(_)));
    }

    #[test]
    fn test_rewrites_run_in_order() {
        let set = RewriteSet::new()
            .add(Rewrite::new("a", "b").unwrap())
            .add(Rewrite::new("b", "c").unwrap());
        // The first rule's output feeds the second rule.
        assert_eq!(set.apply_line("a"), "c");
    }

    #[test]
    fn test_empty_set_is_identity() {
        let set = RewriteSet::new();
        let seq: LineSequence = ["unchanged"].into_iter().collect();
        assert_eq!(set.apply(&seq), seq);
    }

    #[test]
    fn test_apply_sequence() {
        let set = RewriteSet::new()
            .add(Rewrite::new(r"\d{2}:\d{2}:\d{2}", "HH:MM:SS").unwrap());
        let seq: LineSequence = ["12:34:56 started", "done"].into_iter().collect();
        let rewritten = set.apply(&seq);
        assert_eq!(
            rewritten.iter().collect::<Vec<_>>(),
            vec!["HH:MM:SS started", "done"]
        );
    }
}
