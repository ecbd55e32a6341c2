//! Error types for the edges of the diff pipeline.
//!
//! The alignment and char-mapping algorithms themselves are total
//! functions and never fail; errors only arise while materializing
//! inputs and configuration (file reading, replacement patterns,
//! color expressions) or while writing output.

use thiserror::Error;

/// Errors surfaced by the diff pipeline.
#[derive(Debug, Error)]
pub enum DiffError {
    /// An input file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A replacement pattern failed to compile.
    #[error("invalid replacement pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A color expression could not be parsed.
    #[error("invalid color expression: {0}")]
    ColorExpr(String),

    /// A color-map assignment named an unknown target.
    #[error("unknown color target '{0}', expected one of charsmatch, charsdiff, linesmatch, leftlineonly, rightlineonly, symbol")]
    ColorKey(String),

    /// A configuration value was malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing rendered output failed.
    #[error(transparent)]
    Write(#[from] std::io::Error),
}
