//! Command-line interface for sidediff.
//!
//! Argument parsing, terminal-size discovery and logging setup live
//! here; everything after that is delegated to `sidediff-core`.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;

use sidediff_core::style::print_color_tables;
use sidediff_core::{ColorScheme, DiffOptions, Layout, RenderConfig, Rewrite, RewriteSet};

#[derive(Parser)]
#[command(name = "sidediff")]
#[command(version)]
#[command(about = "Compare two text files side by side with character-level highlighting")]
#[command(long_about = None)]
struct Cli {
    /// First file to compare
    #[arg(value_name = "FILE1", required_unless_present = "color_tables")]
    file1: Option<PathBuf>,

    /// Second file to compare
    #[arg(value_name = "FILE2", required_unless_present = "color_tables")]
    file2: Option<PathBuf>,

    /// Print a grouped diff instead of the side-by-side layout
    #[arg(short = 'd', long = "diff")]
    unified: bool,

    /// Omit matching lines from the side-by-side layout
    #[arg(short = 's', long = "suppress-common-lines")]
    suppress: bool,

    /// Total output width; defaults to the terminal width
    #[arg(
        short = 'w',
        long = "width",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(8..=100_000)
    )]
    width: Option<u32>,

    /// Disable colorized output
    #[arg(short = 'n', long = "no-colorize")]
    no_colorize: bool,

    /// Reset every color target to the terminal default rendition;
    /// overridden by any later --config or --color-map assignment
    #[arg(long)]
    clear: bool,

    /// Color assignments: target=attr[,attr][;target=...]
    ///
    /// Targets: charsmatch|cm, charsdiff|cd, linesmatch|lm,
    /// leftlineonly|left|llo, rightlineonly|right|rlo, symbol|sym|s.
    /// Attributes are color names like "red,bold", "bgLightGrey" or
    /// indexed 256-color entries like "fg256[9]".
    #[arg(short = 'c', long = "color-map", value_name = "SPEC")]
    color_map: Vec<String>,

    /// Read color assignments from a file, one spec per line
    /// ('#' starts a comment, blank lines are ignored)
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rewrite PATTERN to REPLACEMENT on every line before comparing;
    /// may be given multiple times, rules run in order
    #[arg(
        short = 'r',
        long = "replace",
        num_args = 2,
        value_names = ["PATTERN", "REPLACEMENT"],
        action = clap::ArgAction::Append
    )]
    replace: Vec<String>,

    /// Print a trailing key/value summary report
    #[arg(long)]
    summary: bool,

    /// Print the 256-color reference tables and exit
    #[arg(long = "256")]
    color_tables: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    if cli.color_tables {
        print_color_tables(&mut stdout)?;
        return Ok(());
    }
    let (Some(file1), Some(file2)) = (&cli.file1, &cli.file2) else {
        bail!("two input files are required");
    };

    let scheme = build_scheme(&cli)?;
    let rewrites = build_rewrites(&cli)?;

    let width = match cli.width {
        Some(w) => w as usize,
        None => terminal_width(),
    };
    debug!(width, unified = cli.unified, "resolved output configuration");

    let render = RenderConfig::new()
        .with_width(width)
        .with_suppress_common(cli.suppress)
        .with_colorize(!cli.no_colorize)
        .with_scheme(scheme)
        .with_names(file1.display().to_string(), file2.display().to_string());

    let layout = if cli.unified {
        Layout::Unified
    } else {
        Layout::SideBySide
    };
    let opts = DiffOptions::new()
        .with_layout(layout)
        .with_rewrites(rewrites)
        .with_render(render)
        .with_summary(cli.summary);

    sidediff_core::run(file1, file2, &opts, &mut stdout)?;
    Ok(())
}

/// Default colors, overridden first by the config file and then by any
/// command-line color maps.
fn build_scheme(cli: &Cli) -> Result<ColorScheme> {
    let mut scheme = if cli.clear {
        ColorScheme::cleared()
    } else {
        ColorScheme::default()
    };

    if let Some(path) = &cli.config {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read color config '{}'", path.display()))?;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            scheme
                .apply_spec(line)
                .with_context(|| format!("in color config '{}'", path.display()))?;
        }
    }

    for spec in &cli.color_map {
        scheme.apply_spec(spec)?;
    }
    Ok(scheme)
}

fn build_rewrites(cli: &Cli) -> Result<RewriteSet> {
    let mut rewrites = RewriteSet::new();
    // clap guarantees the values arrive in pattern/replacement pairs.
    for pair in cli.replace.chunks(2) {
        rewrites.push(Rewrite::new(&pair[0], pair[1].as_str())?);
    }
    Ok(rewrites)
}

fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) => cols as usize,
        Err(_) => 80,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_basic_invocation() {
        let cli = Cli::try_parse_from(["sidediff", "a.txt", "b.txt"]).unwrap();
        assert_eq!(cli.file1.unwrap(), PathBuf::from("a.txt"));
        assert_eq!(cli.file2.unwrap(), PathBuf::from("b.txt"));
        assert!(!cli.unified);
        assert!(!cli.suppress);
        assert!(cli.width.is_none());
    }

    #[test]
    fn test_cli_requires_two_files() {
        assert!(Cli::try_parse_from(["sidediff", "only.txt"]).is_err());
        assert!(Cli::try_parse_from(["sidediff"]).is_err());
        // ...unless only the color tables were requested.
        assert!(Cli::try_parse_from(["sidediff", "--256"]).is_ok());
    }

    #[test]
    fn test_cli_width_range() {
        assert!(Cli::try_parse_from(["sidediff", "-w", "7", "a", "b"]).is_err());
        let cli = Cli::try_parse_from(["sidediff", "-w", "120", "a", "b"]).unwrap();
        assert_eq!(cli.width, Some(120));
    }

    #[test]
    fn test_cli_replace_pairs() {
        let cli = Cli::try_parse_from([
            "sidediff", "-r", "foo", "bar", "-r", "baz", "qux", "a", "b",
        ])
        .unwrap();
        assert_eq!(cli.replace, vec!["foo", "bar", "baz", "qux"]);

        let rewrites = build_rewrites(&cli).unwrap();
        assert_eq!(rewrites.len(), 2);
        assert_eq!(rewrites.apply_line("foo baz"), "bar qux");
    }

    #[test]
    fn test_cli_replace_rejects_bad_pattern() {
        let cli = Cli::try_parse_from(["sidediff", "-r", "(oops", "x", "a", "b"]).unwrap();
        assert!(build_rewrites(&cli).is_err());
    }

    #[test]
    fn test_cli_color_map_applies() {
        let cli =
            Cli::try_parse_from(["sidediff", "-c", "cd=green;sym=blue", "a", "b"]).unwrap();
        let scheme = build_scheme(&cli).unwrap();
        assert_eq!(
            scheme.color_for(sidediff_core::Role::CharsDiff),
            "\x1b[32m"
        );
        assert_eq!(scheme.color_for(sidediff_core::Role::Symbol), "\x1b[34m");
    }

    #[test]
    fn test_cli_clear_resets_all_targets() {
        let cli = Cli::try_parse_from(["sidediff", "--clear", "a", "b"]).unwrap();
        let scheme = build_scheme(&cli).unwrap();
        assert_eq!(scheme.color_for(sidediff_core::Role::CharsDiff), "\x1b[0m");
        assert_eq!(scheme.color_for(sidediff_core::Role::Symbol), "\x1b[0m");

        // Explicit assignments still win over --clear.
        let cli =
            Cli::try_parse_from(["sidediff", "--clear", "-c", "sym=red", "a", "b"]).unwrap();
        let scheme = build_scheme(&cli).unwrap();
        assert_eq!(scheme.color_for(sidediff_core::Role::Symbol), "\x1b[31m");
        assert_eq!(scheme.color_for(sidediff_core::Role::CharsDiff), "\x1b[0m");
    }

    #[test]
    fn test_cli_rejects_bad_color_map() {
        let cli = Cli::try_parse_from(["sidediff", "-c", "cd=nosuch", "a", "b"]).unwrap();
        assert!(build_scheme(&cli).is_err());
    }
}
