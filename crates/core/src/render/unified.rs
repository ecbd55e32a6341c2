//! Unified grouped diff rendering
//!
//! Prints only the change groups between match points: a line-range
//! header, the left side's lines prefixed with `< `, a `---` separator
//! when the group has right-side lines, then the right side's lines
//! prefixed with `> `. Matched lines are never printed. Better suited
//! to long lines than the side-by-side layout.

use std::io::Write;
use std::ops::Range;

use tracing::debug;

use crate::align::MatchPoint;
use crate::charmap::map_common_substrings;
use crate::error::DiffError;
use crate::render::{Group, RenderConfig};
use crate::sequence::LineSequence;
use crate::style::{decorate, paint, ColorScheme, Role};
use crate::summary::Summary;

/// Render the grouped diff of two sequences to `out`, returning the
/// accumulated summary.
pub fn render_unified(
    cfg: &RenderConfig,
    left: &LineSequence,
    right: &LineSequence,
    points: &[MatchPoint],
    out: &mut impl Write,
) -> Result<Summary, DiffError> {
    let scheme = cfg.effective_scheme();
    let mut sum = Summary::new();
    sum.left_lines = left.len();
    sum.right_lines = right.len();
    debug!(match_points = points.len(), "rendering unified diff");

    let mut next_left = 0;
    let mut next_right = 0;
    for point in points {
        let group = Group {
            left: next_left..point.left,
            right: next_right..point.right,
        };
        emit_group(&group, left, right, &scheme, &mut sum, out)?;
        sum.lines_match += 1;
        next_left = point.left + 1;
        next_right = point.right + 1;
    }

    let trailing = Group {
        left: next_left..left.len(),
        right: next_right..right.len(),
    };
    emit_group(&trailing, left, right, &scheme, &mut sum, out)?;
    writeln!(out)?;

    Ok(sum)
}

/// One change group: header, left lines, separator, right lines.
fn emit_group(
    group: &Group,
    left: &LineSequence,
    right: &LineSequence,
    scheme: &ColorScheme,
    sum: &mut Summary,
    out: &mut impl Write,
) -> Result<(), DiffError> {
    if group.is_empty() {
        return Ok(());
    }

    for (l, r) in group.positions() {
        match (l, r) {
            (Some(_), Some(_)) => sum.lines_diff += 1,
            (Some(_), None) => sum.left_only_lines += 1,
            (None, Some(_)) => sum.right_only_lines += 1,
            (None, None) => debug_assert!(false, "interval step with neither side present"),
        }
    }

    write_range(out, &group.left)?;
    write!(out, "c")?;
    write_range(out, &group.right)?;
    writeln!(out)?;

    // Left side of the group.
    for (l, r) in group.positions() {
        let Some(i) = l else { continue };
        write!(out, "{}", paint("< ", Role::Symbol, scheme))?;
        let line = &left[i];
        match r {
            Some(j) => {
                let (map_left, map_right) = map_common_substrings(line, &right[j]);
                sum.record_pair(&map_left, &map_right);
                writeln!(out, "{}", decorate(line, &map_left, scheme))?;
            }
            None => writeln!(out, "{}", paint(line, Role::LeftOnly, scheme))?,
        }
    }

    // Right side, separated from the left when present.
    let mut first = true;
    for (l, r) in group.positions() {
        let Some(j) = r else { continue };
        if first {
            writeln!(out, "---")?;
            first = false;
        }
        write!(out, "{}", paint("> ", Role::Symbol, scheme))?;
        let line = &right[j];
        match l {
            Some(i) => {
                let (_, map_right) = map_common_substrings(&left[i], line);
                writeln!(out, "{}", decorate(line, &map_right, scheme))?;
            }
            None => writeln!(out, "{}", paint(line, Role::RightOnly, scheme))?,
        }
    }

    Ok(())
}

/// A 1-based line range: a single line prints as `N`, a longer (or
/// empty) range as `N,M`.
fn write_range(out: &mut impl Write, range: &Range<usize>) -> std::io::Result<()> {
    let start = range.start + 1;
    let end = range.end;
    if start == end {
        write!(out, "{start}")
    } else {
        write!(out, "{start},{end}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seq(lines: &[&str]) -> LineSequence {
        lines.iter().copied().collect()
    }

    fn run(left: &[&str], right: &[&str]) -> (String, Summary) {
        let left = seq(left);
        let right = seq(right);
        let points = crate::align::align(&left, &right);
        let cfg = RenderConfig::new().with_colorize(false);
        let mut out = Vec::new();
        let sum = render_unified(&cfg, &left, &right, &points, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), sum)
    }

    #[test]
    fn test_changed_pair_group() {
        let (text, sum) = run(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(text, "2c2\n< b\n---\n> x\n\n");
        assert_eq!(sum.lines_match, 2);
        assert_eq!(sum.lines_diff, 1);
        assert_eq!(sum.left_only_lines, 0);
        assert_eq!(sum.right_only_lines, 0);
    }

    #[test]
    fn test_identical_inputs_print_nothing_but_trailer() {
        let (text, sum) = run(&["a", "b"], &["a", "b"]);
        assert_eq!(text, "\n");
        assert_eq!(sum.lines_match, 2);
        assert_eq!(sum.lines_diff, 0);
        assert_eq!(sum.left_chars_diff + sum.right_chars_diff, 0);
    }

    #[test]
    fn test_right_only_group() {
        let (text, sum) = run(&["a", "b"], &["a", "infix", "b"]);
        assert_eq!(text, "2,1c2\n---\n> infix\n\n");
        assert_eq!(sum.right_only_lines, 1);
        assert_eq!(sum.left_only_lines, 0);
        assert_eq!(sum.lines_match, 2);
        // No pair was compared, so no character counts accumulate.
        assert_eq!(sum.right_chars_match + sum.right_chars_diff, 0);
    }

    #[test]
    fn test_left_only_group() {
        let (text, sum) = run(&["a", "extra", "b"], &["a", "b"]);
        assert_eq!(text, "2c2,1\n< extra\n\n");
        assert_eq!(sum.left_only_lines, 1);
        assert_eq!(sum.right_only_lines, 0);
    }

    #[test]
    fn test_multi_line_group_header() {
        let (text, _) = run(&["a", "b", "c", "z"], &["a", "x", "y", "z"]);
        assert_eq!(text, "2,3c2,3\n< b\n< c\n---\n> x\n> y\n\n");
    }

    #[test]
    fn test_disjoint_inputs_one_group() {
        let (text, sum) = run(&["a", "b"], &["x", "y", "z"]);
        assert_eq!(text, "1,2c1,3\n< a\n< b\n---\n> x\n> y\n> z\n\n");
        assert_eq!(sum.lines_match, 0);
        assert_eq!(sum.lines_diff, 2);
        assert_eq!(sum.right_only_lines, 1);
    }

    #[test]
    fn test_char_counts_accumulate_for_compared_pairs() {
        let (_, sum) = run(&["abc"], &["abx"]);
        assert_eq!(sum.lines_diff, 1);
        assert_eq!(sum.left_chars_match, 2);
        assert_eq!(sum.left_chars_diff, 1);
        assert_eq!(sum.right_chars_match, 2);
        assert_eq!(sum.right_chars_diff, 1);
    }

    #[test]
    fn test_colorized_markers() {
        let left = seq(&["a"]);
        let right = seq(&["b"]);
        let points = crate::align::align(&left, &right);
        let cfg = RenderConfig::new();
        let mut out = Vec::new();
        render_unified(&cfg, &left, &right, &points, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // The symbol prefix carries the symbol color.
        assert!(text.contains("\x1b[31;1m< \x1b[0m"));
        assert!(text.contains("\x1b[31;1m> \x1b[0m"));
    }
}
