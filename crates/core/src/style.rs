//! ANSI color styling
//!
//! The renderers never build escape sequences themselves; they ask a
//! [`ColorScheme`] for the sequence attached to a logical [`Role`] and
//! signal *when* a role transition happens. Color expressions like
//! `red,bold`, `bgLightGrey` or `fg256[9]` are parsed against a fixed
//! name table into raw escape sequences, so a scheme is just a handful
//! of strings and a fully empty scheme renders plain text.

use std::collections::HashMap;
use std::io::{self, Write};

use lazy_static::lazy_static;

use crate::charmap::CharMatchMap;
use crate::error::DiffError;

/// Logical rendering role a color is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Characters inside a matched run of a compared pair.
    CharsMatch,
    /// Characters outside every matched run of a compared pair.
    CharsDiff,
    /// A fully matched line.
    LinesMatch,
    /// A line present only on the left side.
    LeftOnly,
    /// A line present only on the right side.
    RightOnly,
    /// The separator symbols (`|`, `<`, `>`) and markers.
    Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Plain,
    Fg256,
    Bg256,
}

#[derive(Debug, Clone, Copy)]
struct ColorCode {
    mode: Mode,
    value: u16,
}

macro_rules! plain {
    ($value:expr) => {
        ColorCode {
            mode: Mode::Plain,
            value: $value,
        }
    };
}

lazy_static! {
    /// Color and attribute names accepted in color expressions. Keys
    /// are lowercase; lookups lowercase their input first.
    static ref COLOR_MAP: HashMap<&'static str, ColorCode> = {
        let mut m = HashMap::new();

        // Attributes.
        m.insert("blink", plain!(5));
        m.insert("bold", plain!(1));
        m.insert("clear", plain!(0));
        m.insert("dim", plain!(2));
        m.insert("hidden", plain!(6));
        m.insert("init", plain!(0));
        m.insert("italics", plain!(3));
        m.insert("reset", plain!(0));
        m.insert("resetblink", plain!(25));
        m.insert("resetbold", plain!(21));
        m.insert("resetdim", plain!(22));
        m.insert("resethidden", plain!(26));
        m.insert("resetitalics", plain!(23));
        m.insert("resetreverse", plain!(27));
        m.insert("resetstrikethrough", plain!(29));
        m.insert("resetunderline", plain!(24));
        m.insert("reverse", plain!(7));
        m.insert("underline", plain!(4));

        // Standard foreground.
        m.insert("black", plain!(30));
        m.insert("red", plain!(31));
        m.insert("green", plain!(32));
        m.insert("yellow", plain!(33));
        m.insert("blue", plain!(34));
        m.insert("magenta", plain!(35));
        m.insert("cyan", plain!(36));
        m.insert("lightgray", plain!(37));
        m.insert("lightgrey", plain!(37));
        m.insert("fgblack", plain!(30));
        m.insert("fgred", plain!(31));
        m.insert("fggreen", plain!(32));
        m.insert("fgyellow", plain!(33));
        m.insert("fgblue", plain!(34));
        m.insert("fgmagenta", plain!(35));
        m.insert("fgcyan", plain!(36));
        m.insert("fglightgray", plain!(37));
        m.insert("fglightgrey", plain!(37));
        m.insert("fgdefault", plain!(39));

        // High intensity foreground.
        m.insert("darkgray", plain!(90));
        m.insert("darkgrey", plain!(90));
        m.insert("brightred", plain!(91));
        m.insert("brightgreen", plain!(92));
        m.insert("brightyellow", plain!(93));
        m.insert("brightblue", plain!(94));
        m.insert("brightmagenta", plain!(95));
        m.insert("brightcyan", plain!(96));
        m.insert("brightwhite", plain!(97));
        m.insert("fgdarkgray", plain!(90));
        m.insert("fgdarkgrey", plain!(90));
        m.insert("fgbrightred", plain!(91));
        m.insert("fgbrightgreen", plain!(92));
        m.insert("fgbrightyellow", plain!(93));
        m.insert("fgbrightblue", plain!(94));
        m.insert("fgbrightmagenta", plain!(95));
        m.insert("fgbrightcyan", plain!(96));
        m.insert("fgbrightwhite", plain!(97));

        // Standard background.
        m.insert("bgblack", plain!(40));
        m.insert("bgred", plain!(41));
        m.insert("bggreen", plain!(42));
        m.insert("bgyellow", plain!(43));
        m.insert("bgblue", plain!(44));
        m.insert("bgmagenta", plain!(45));
        m.insert("bgcyan", plain!(46));
        m.insert("bglightgray", plain!(47));
        m.insert("bglightgrey", plain!(47));
        m.insert("bgdefault", plain!(49));

        // High intensity background.
        m.insert("bgdarkgray", plain!(100));
        m.insert("bgdarkgrey", plain!(100));
        m.insert("bgbrightred", plain!(101));
        m.insert("bgbrightgreen", plain!(102));
        m.insert("bgbrightyellow", plain!(103));
        m.insert("bgbrightblue", plain!(104));
        m.insert("bgbrightmagenta", plain!(105));
        m.insert("bgbrightcyan", plain!(106));
        m.insert("bgbrightwhite", plain!(107));

        // 256-color indexed, value supplied as fg256[N] / bg256[N].
        m.insert("fg256", ColorCode { mode: Mode::Fg256, value: 0 });
        m.insert("bg256", ColorCode { mode: Mode::Bg256, value: 0 });

        m
    };
}

/// Parse a color expression into one ANSI escape sequence.
///
/// The expression is a comma-separated, case-insensitive list of
/// names from the color table. The 256-color entries take an index:
/// `fg256[9]` is foreground color 9, `bg256[252]` background 252.
///
/// ```
/// use sidediff_core::style::parse_color_expr;
///
/// assert_eq!(parse_color_expr("fgred,bold").unwrap(), "\x1b[31;1m");
/// assert_eq!(parse_color_expr("fg256[9]").unwrap(), "\x1b[38;5;9m");
/// ```
pub fn parse_color_expr(expr: &str) -> Result<String, DiffError> {
    let mut codes = Vec::new();
    for token in expr.split(',') {
        let token = token.trim().to_lowercase();
        let (key, index) = match token.find('[') {
            Some(open) => {
                // Look for the closing bracket after the opening one;
                // a stray ']' earlier in the token must not match.
                let close = token[open..]
                    .find(']')
                    .map(|off| open + off)
                    .ok_or_else(|| {
                        DiffError::ColorExpr(format!("missing ']' in '{expr}'"))
                    })?;
                let index: u16 = token[open + 1..close].trim().parse().map_err(|_| {
                    DiffError::ColorExpr(format!("bad color index in '{expr}'"))
                })?;
                (token[..open].to_string(), Some(index))
            }
            None => (token.clone(), None),
        };

        let code = COLOR_MAP
            .get(key.as_str())
            .ok_or_else(|| DiffError::ColorExpr(format!("unknown name '{key}' in '{expr}'")))?;
        codes.push(ColorCode {
            mode: code.mode,
            value: index.unwrap_or(code.value),
        });
    }

    // Consecutive values in the same mode share one escape sequence,
    // joined with ';'. A mode switch closes the sequence and opens the
    // next one.
    let mut out = String::new();
    let mut mode = None;
    for code in codes {
        if mode != Some(code.mode) {
            if mode.is_some() {
                out.push('m');
            }
            out.push_str(match code.mode {
                Mode::Plain => "\x1b[",
                Mode::Fg256 => "\x1b[38;5;",
                Mode::Bg256 => "\x1b[48;5;",
            });
            mode = Some(code.mode);
        } else {
            out.push(';');
        }
        out.push_str(&code.value.to_string());
    }
    out.push('m');
    Ok(out)
}

/// The escape sequences attached to each rendering role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    chars_match: String,
    chars_diff: String,
    lines_match: String,
    left_only: String,
    right_only: String,
    symbol: String,
    reset: String,
}

impl Default for ColorScheme {
    /// Background-based defaults so differences remain visible even
    /// when terminals remap foreground palettes: matches render
    /// unstyled, differing content on `bgLightGrey`, symbols `red,bold`.
    fn default() -> Self {
        const RESET: &str = "\x1b[0m"; // clear
        const DIFF: &str = "\x1b[47m"; // bglightgrey
        const SYMBOL: &str = "\x1b[31;1m"; // red,bold
        Self {
            chars_match: RESET.to_string(),
            chars_diff: DIFF.to_string(),
            lines_match: RESET.to_string(),
            left_only: DIFF.to_string(),
            right_only: DIFF.to_string(),
            symbol: SYMBOL.to_string(),
            reset: RESET.to_string(),
        }
    }
}

impl ColorScheme {
    /// A scheme with every sequence empty: styling becomes a no-op and
    /// output is plain text.
    pub fn plain() -> Self {
        Self {
            chars_match: String::new(),
            chars_diff: String::new(),
            lines_match: String::new(),
            left_only: String::new(),
            right_only: String::new(),
            symbol: String::new(),
            reset: String::new(),
        }
    }

    /// A scheme with every role set to the `clear` escape: escape
    /// sequences are still emitted, but each one returns the terminal
    /// to its default rendition.
    pub fn cleared() -> Self {
        const CLEAR: &str = "\x1b[0m";
        Self {
            chars_match: CLEAR.to_string(),
            chars_diff: CLEAR.to_string(),
            lines_match: CLEAR.to_string(),
            left_only: CLEAR.to_string(),
            right_only: CLEAR.to_string(),
            symbol: CLEAR.to_string(),
            reset: CLEAR.to_string(),
        }
    }

    /// The escape sequence for one role.
    pub fn color_for(&self, role: Role) -> &str {
        match role {
            Role::CharsMatch => &self.chars_match,
            Role::CharsDiff => &self.chars_diff,
            Role::LinesMatch => &self.lines_match,
            Role::LeftOnly => &self.left_only,
            Role::RightOnly => &self.right_only,
            Role::Symbol => &self.symbol,
        }
    }

    /// The sequence that returns the terminal to its default state.
    pub fn reset(&self) -> &str {
        &self.reset
    }

    /// Assign one target a parsed color expression. Accepted targets
    /// (case-insensitive, with short aliases): `charsmatch|cm`,
    /// `charsdiff|cd`, `linesmatch|lm`, `leftlineonly|left|llo`,
    /// `rightlineonly|right|rlo`, `symbol|sym|s`.
    pub fn set(&mut self, target: &str, expr: &str) -> Result<(), DiffError> {
        let seq = parse_color_expr(expr)?;
        match target.trim().to_lowercase().as_str() {
            "charsmatch" | "cm" => self.chars_match = seq,
            "charsdiff" | "cd" => self.chars_diff = seq,
            "linesmatch" | "lm" => self.lines_match = seq,
            "leftlineonly" | "left" | "llo" => self.left_only = seq,
            "rightlineonly" | "right" | "rlo" => self.right_only = seq,
            "symbol" | "sym" | "s" => self.symbol = seq,
            other => return Err(DiffError::ColorKey(other.to_string())),
        }
        Ok(())
    }

    /// Apply a `target=expr[;target=expr]` assignment list, the format
    /// of the CLI color-map option and of color config file lines.
    pub fn apply_spec(&mut self, spec: &str) -> Result<(), DiffError> {
        for assignment in spec.split(';') {
            let (target, expr) = assignment.split_once('=').ok_or_else(|| {
                DiffError::Config(format!("expected target=expr, got '{assignment}'"))
            })?;
            self.set(target, expr)?;
        }
        Ok(())
    }
}

/// Style a whole line with the color for one role.
pub fn paint(text: &str, role: Role, scheme: &ColorScheme) -> String {
    format!("{}{}{}", scheme.color_for(role), text, scheme.reset())
}

/// Turn one line and its match map into styled spans.
///
/// A color transition is emitted exactly when the match flag changes
/// between consecutive characters, and at position 0. Characters past
/// the end of the map (the truncation sentinel) read as unmatched.
/// With a plain scheme the output is the input text.
pub fn decorate(text: &str, map: &CharMatchMap, scheme: &ColorScheme) -> String {
    let mut out = String::new();
    let mut state = None;
    for (i, ch) in text.chars().enumerate() {
        let matched = map.is_match(i);
        if state != Some(matched) {
            out.push_str(scheme.reset());
            out.push_str(scheme.color_for(if matched {
                Role::CharsMatch
            } else {
                Role::CharsDiff
            }));
            state = Some(matched);
        }
        out.push(ch);
    }
    out.push_str(scheme.reset());
    out
}

/// Whether a 256-color swatch needs a light foreground to stay
/// readable.
fn dark_cell(index: usize) -> bool {
    matches!(index, 0..=6 | 8 | 12 | 16..=21 | 52..=57 | 232..=243)
}

/// Print the 8-color and 256-color reference tables, used to pick
/// values for color expressions.
pub fn print_color_tables(out: &mut impl Write) -> io::Result<()> {
    const NAMES: [&str; 8] = [
        "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "White",
    ];

    writeln!(out)?;
    writeln!(out, "8 Color Mode - Background (ESC[40m .. ESC[47m)")?;
    write!(out, "   ")?;
    for (i, name) in NAMES.iter().enumerate() {
        let fg = if i == 7 { 30 } else { 37 };
        write!(out, "\x1b[{};{};1m {:<7} \x1b[0m", 40 + i, fg, name)?;
    }
    writeln!(out)?;

    writeln!(out)?;
    writeln!(out, "8 Color Mode - Foreground (ESC[30m .. ESC[37m)")?;
    write!(out, "   ")?;
    for (i, name) in NAMES.iter().enumerate() {
        let bg = if i == 7 { 40 } else { 47 };
        write!(out, "\x1b[{};{};1m {:<7} \x1b[0m", 30 + i, bg, name)?;
    }
    writeln!(out)?;

    writeln!(out)?;
    write!(out, "256 Color Mode - Background (ESC[48;5;Nm)")?;
    for i in 0..256 {
        if i % 16 == 0 {
            write!(out, "\n   ")?;
        }
        let fg = if dark_cell(i) { 37 } else { 30 };
        write!(out, "\x1b[{fg}m\x1b[48;5;{i}m {i:>3} \x1b[0m")?;
    }
    writeln!(out)?;

    writeln!(out)?;
    write!(out, "256 Color Mode - Foreground (ESC[38;5;Nm)")?;
    for i in 0..256 {
        if i % 16 == 0 {
            write!(out, "\n   ")?;
        }
        let bg = if dark_cell(i) { "47;1" } else { "40;1" };
        write!(out, "\x1b[{bg}m\x1b[38;5;{i}m {i:>3} \x1b[0m")?;
    }
    writeln!(out)?;
    writeln!(out)
}
