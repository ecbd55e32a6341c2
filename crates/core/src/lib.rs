//! # sidediff-core
//!
//! A line and character level text comparison library. Two line
//! sequences are aligned with a longest-common-subsequence pass, the
//! alignment is decomposed into match points and diff intervals, and
//! one of two renderers turns it into human-readable output: a
//! side-by-side two-column layout or a grouped unified layout. Pairs
//! of differing lines additionally get per-character match maps from a
//! recursive longest-common-substring decomposition, which drive
//! intra-line highlighting and the character counters of the summary.
//!
//! ## Core Concepts
//!
//! - **LineSequence**: an ordered, immutable list of input lines
//! - **RewriteSet**: pattern rewrites normalizing lines before alignment
//! - **MatchPoint**: an aligned pair of line indices from the LCS
//! - **CharMatchMap**: per-character matched/unmatched flags for one
//!   line of a compared pair
//! - **Renderers**: side-by-side and unified views over the alignment,
//!   each producing a [`Summary`]
//!
//! ## Example
//!
//! ```rust
//! use sidediff_core::{DiffOptions, Layout, RenderConfig};
//! use sidediff_core::render::render_unified;
//! use sidediff_core::sequence::LineSequence;
//!
//! let left: LineSequence = ["start", "Lorem ipsum"].into_iter().collect();
//! let right: LineSequence = ["prefix", "Lorem ipsum"].into_iter().collect();
//!
//! let points = sidediff_core::align::align(&left, &right);
//! let cfg = RenderConfig::new().with_colorize(false);
//!
//! let mut out = Vec::new();
//! let summary = render_unified(&cfg, &left, &right, &points, &mut out).unwrap();
//! assert_eq!(summary.lines_match, 1);
//! assert_eq!(summary.lines_diff, 1);
//! ```

pub mod align;
pub mod charmap;
pub mod config;
pub mod error;
pub mod render;
pub mod rewrite;
pub mod sequence;
pub mod style;
pub mod summary;

// Re-export main types
pub use align::{align, MatchPoint};
pub use charmap::{map_common_substrings, CharMatchMap};
pub use config::DiffOptions;
pub use error::DiffError;
pub use render::{Layout, RenderConfig};
pub use rewrite::{Rewrite, RewriteSet};
pub use sequence::LineSequence;
pub use style::{ColorScheme, Role};
pub use summary::Summary;

use std::io::Write;
use std::path::Path;

use render::{render_side_by_side, render_unified};

/// Run a complete diff over two in-memory sequences: preprocess,
/// align, render, and optionally append the summary report.
///
/// The summary is returned either way so callers can inspect counts
/// without reparsing output.
pub fn diff_sequences(
    left: &LineSequence,
    right: &LineSequence,
    opts: &DiffOptions,
    out: &mut impl Write,
) -> Result<Summary, DiffError> {
    let left = opts.rewrites.apply(left);
    let right = opts.rewrites.apply(right);
    let points = align(&left, &right);

    let summary = match opts.layout {
        Layout::SideBySide => render_side_by_side(&opts.render, &left, &right, &points, out)?,
        Layout::Unified => render_unified(&opts.render, &left, &right, &points, out)?,
    };

    if opts.summary {
        write!(out, "{}", summary.report())?;
    }
    Ok(summary)
}

/// Main entry point: read both files, then [`diff_sequences`].
///
/// When the render configuration carries no display names, the file
/// paths are used for the side-by-side header.
pub fn run(
    left_path: impl AsRef<Path>,
    right_path: impl AsRef<Path>,
    opts: &DiffOptions,
    out: &mut impl Write,
) -> Result<Summary, DiffError> {
    let left_path = left_path.as_ref();
    let right_path = right_path.as_ref();
    let left = LineSequence::from_path(left_path)?;
    let right = LineSequence::from_path(right_path)?;

    let mut opts = opts.clone();
    if opts.render.left_name.is_empty() {
        opts.render.left_name = left_path.display().to_string();
    }
    if opts.render.right_name.is_empty() {
        opts.render.right_name = right_path.display().to_string();
    }

    diff_sequences(&left, &right, &opts, out)
}
