//! Side-by-side aligned diff rendering
//!
//! Prints every position of the alignment in two columns with a
//! separator symbol between them: `|` for a differing pair, `<` and
//! `>` for one-sided lines, blank for a matched pair. Each column gets
//! a 6-digit line-number gutter; lines that do not fit the column are
//! truncated and marked with a trailing `$`.

use std::io::Write;

use tracing::debug;

use crate::align::MatchPoint;
use crate::charmap::{map_common_substrings, CharMatchMap};
use crate::error::DiffError;
use crate::render::{truncate, Group, RenderConfig};
use crate::sequence::LineSequence;
use crate::style::{decorate, paint, ColorScheme, Role};
use crate::summary::Summary;

/// Per-column geometry derived from the configured total width.
#[derive(Debug, Clone, Copy)]
struct Columns {
    /// Full width of one column including the line-number gutter.
    half: usize,
    /// Characters available for line content after the gutter.
    content: usize,
}

impl Columns {
    /// Split the total width evenly, reserving two characters for the
    /// separator and seven per side for the gutter.
    fn for_width(total: usize) -> Self {
        let mut half = total.saturating_sub(2) / 2;
        if total % 2 == 0 {
            half = half.saturating_sub(1);
        }
        Self {
            half,
            content: half.saturating_sub(7),
        }
    }
}

/// Render the aligned two-column diff of two sequences to `out`,
/// returning the accumulated summary.
pub fn render_side_by_side(
    cfg: &RenderConfig,
    left: &LineSequence,
    right: &LineSequence,
    points: &[MatchPoint],
    out: &mut impl Write,
) -> Result<Summary, DiffError> {
    let scheme = cfg.effective_scheme();
    let columns = Columns::for_width(cfg.width);
    let mut sum = Summary::new();
    sum.left_lines = left.len();
    sum.right_lines = right.len();
    debug!(
        match_points = points.len(),
        width = cfg.width,
        "rendering side-by-side diff"
    );

    write_header(cfg, columns, out)?;

    let mut next_left = 0;
    let mut next_right = 0;
    for point in points {
        let group = Group {
            left: next_left..point.left,
            right: next_right..point.right,
        };
        emit_group(&group, left, right, &scheme, columns, &mut sum, out)?;

        sum.lines_match += 1;
        if !cfg.suppress_common {
            let line = &left[point.left];
            write!(
                out,
                "{}",
                column(point.left + 1, line, None, Role::LinesMatch, &scheme, columns, true)
            )?;
            write!(out, "{}", paint("   ", Role::Symbol, &scheme))?;
            writeln!(
                out,
                "{}",
                column(
                    point.right + 1,
                    &right[point.right],
                    None,
                    Role::LinesMatch,
                    &scheme,
                    columns,
                    false,
                )
            )?;
        }
        next_left = point.left + 1;
        next_right = point.right + 1;
    }

    let trailing = Group {
        left: next_left..left.len(),
        right: next_right..right.len(),
    };
    emit_group(&trailing, left, right, &scheme, columns, &mut sum, out)?;
    writeln!(out)?;

    Ok(sum)
}

/// Blank header row carrying the truncated input names above their
/// columns.
fn write_header(
    cfg: &RenderConfig,
    columns: Columns,
    out: &mut impl Write,
) -> Result<(), DiffError> {
    writeln!(out)?;
    write!(out, "{:6} ", "")?;
    write!(
        out,
        "{:<width$}",
        truncate(&cfg.left_name, columns.content),
        width = columns.content
    )?;
    write!(out, "   ")?;
    write!(out, "{:6} ", "")?;
    writeln!(out, "{}", truncate(&cfg.right_name, columns.content))?;
    Ok(())
}

/// Every position of one open interval, one row per position.
fn emit_group(
    group: &Group,
    left: &LineSequence,
    right: &LineSequence,
    scheme: &ColorScheme,
    columns: Columns,
    sum: &mut Summary,
    out: &mut impl Write,
) -> Result<(), DiffError> {
    for (l, r) in group.positions() {
        let pair = match (l, r) {
            (Some(i), Some(j)) => {
                let maps = map_common_substrings(&left[i], &right[j]);
                sum.record_pair(&maps.0, &maps.1);
                Some(maps)
            }
            _ => None,
        };

        // Left column, padded so the separator lines up.
        match l {
            Some(i) => write!(
                out,
                "{}",
                column(
                    i + 1,
                    &left[i],
                    pair.as_ref().map(|(a, _)| a),
                    Role::LeftOnly,
                    scheme,
                    columns,
                    true,
                )
            )?,
            None => write!(out, "{:width$}", "", width = columns.half)?,
        }

        let symbol = match (l, r) {
            (Some(_), Some(_)) => " | ",
            (Some(_), None) => " < ",
            (None, Some(_)) => " > ",
            (None, None) => {
                debug_assert!(false, "interval step with neither side present");
                " * "
            }
        };
        write!(out, "{}", paint(symbol, Role::Symbol, scheme))?;

        if let Some(j) = r {
            write!(
                out,
                "{}",
                column(
                    j + 1,
                    &right[j],
                    pair.as_ref().map(|(_, b)| b),
                    Role::RightOnly,
                    scheme,
                    columns,
                    false,
                )
            )?;
        }
        writeln!(out)?;

        match (l, r) {
            (Some(_), Some(_)) => sum.lines_diff += 1,
            (Some(_), None) => sum.left_only_lines += 1,
            (None, Some(_)) => sum.right_only_lines += 1,
            (None, None) => {}
        }
    }
    Ok(())
}

/// One column cell: gutter, styled (possibly truncated) content, and
/// optional padding out to the column width.
fn column(
    line_num: usize,
    line: &str,
    map: Option<&CharMatchMap>,
    role: Role,
    scheme: &ColorScheme,
    columns: Columns,
    pad: bool,
) -> String {
    let mut out = format!("{line_num:>6} ");
    let visible = truncate(line, columns.content);
    let shown = visible.chars().count();
    match map {
        Some(map) => out.push_str(&decorate(&visible, map, scheme)),
        None => out.push_str(&paint(&visible, role, scheme)),
    }
    if pad {
        for _ in shown..columns.content {
            out.push(' ');
        }
    }
    out
}
