//! Diff renderers
//!
//! Both renderers walk the match points with the same grouping state
//! machine: the open interval before each match point is emitted as a
//! group, then the matched pair itself, and after the final match
//! point a trailing group covers any remaining unmatched tail. They
//! differ only in what a group and a matched pair look like on the
//! page.

pub mod side_by_side;
pub mod unified;

pub use side_by_side::render_side_by_side;
pub use unified::render_unified;

use std::ops::Range;

use crate::style::ColorScheme;

/// Output layout selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Two aligned columns with a separator symbol (the default).
    #[default]
    SideBySide,
    /// Grouped change blocks, matched lines omitted.
    Unified,
}

/// Configuration shared by both renderers.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Total display width for the side-by-side layout.
    pub width: usize,
    /// Omit matched lines entirely in the side-by-side layout.
    pub suppress_common: bool,
    /// Emit color escape sequences.
    pub colorize: bool,
    /// Colors used when `colorize` is on.
    pub scheme: ColorScheme,
    /// Display name for the left input (side-by-side header).
    pub left_name: String,
    /// Display name for the right input (side-by-side header).
    pub right_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 80,
            suppress_common: false,
            colorize: true,
            scheme: ColorScheme::default(),
            left_name: String::new(),
            right_name: String::new(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_suppress_common(mut self, suppress: bool) -> Self {
        self.suppress_common = suppress;
        self
    }

    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    pub fn with_scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_names(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_name = left.into();
        self.right_name = right.into();
        self
    }

    /// The scheme the renderer actually styles with: the configured
    /// one, or the no-op scheme when colorization is off.
    pub(crate) fn effective_scheme(&self) -> ColorScheme {
        if self.colorize {
            self.scheme.clone()
        } else {
            ColorScheme::plain()
        }
    }
}

/// The open interval of unmatched lines between two consecutive match
/// points (or between a sequence edge and the nearest match point).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Group {
    pub left: Range<usize>,
    pub right: Range<usize>,
}

impl Group {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Walk the group's positions in lock-step. Each step yields the
    /// line index available on each side; at least one side is always
    /// present, so a `(None, None)` step would mean the aligner and
    /// renderer disagree about the interval bounds.
    pub fn positions(&self) -> impl Iterator<Item = (Option<usize>, Option<usize>)> + '_ {
        let steps = self.left.len().max(self.right.len());
        (0..steps).map(move |k| {
            let left = self.left.clone().nth(k);
            let right = self.right.clone().nth(k);
            (left, right)
        })
    }
}

/// Truncate to `width` characters, replacing the last visible one with
/// a `$` sentinel when the line does not fit. A width below 1 disables
/// truncation.
pub(crate) fn truncate(line: &str, width: usize) -> String {
    if width < 1 || line.chars().count() <= width {
        return line.to_string();
    }
    let mut out: String = line.chars().take(width - 1).collect();
    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_positions_pairs_then_remainder() {
        let group = Group {
            left: 2..4,
            right: 5..8,
        };
        let positions: Vec<_> = group.positions().collect();
        assert_eq!(
            positions,
            vec![
                (Some(2), Some(5)),
                (Some(3), Some(6)),
                (None, Some(7)),
            ]
        );
    }

    #[test]
    fn test_group_positions_never_yield_empty_step() {
        let group = Group {
            left: 0..3,
            right: 1..1,
        };
        for (left, right) in group.positions() {
            assert!(left.is_some() || right.is_some());
        }
    }

    #[test]
    fn test_empty_group() {
        let group = Group {
            left: 4..4,
            right: 7..7,
        };
        assert!(group.is_empty());
        assert_eq!(group.positions().count(), 0);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten..", 13), "exactly ten..");
        assert_eq!(truncate("much too long for this", 8), "much to$");
        assert_eq!(truncate("anything goes", 0), "anything goes");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("ééééé", 3), "éé$");
    }
}
