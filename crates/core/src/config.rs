//! Configuration for a complete diff run

use crate::render::{Layout, RenderConfig};
use crate::rewrite::RewriteSet;

/// Configuration for one diff run: which layout to render, how lines
/// are preprocessed, and whether the trailing summary is reported.
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Which renderer consumes the alignment.
    pub layout: Layout,

    /// Ordered rewrites applied to every line of both sides before
    /// alignment.
    pub rewrites: RewriteSet,

    /// Rendering configuration shared by both layouts.
    pub render: RenderConfig,

    /// Print the trailing key/value summary report.
    pub summary: bool,
}

impl DiffOptions {
    /// Create the default configuration: side-by-side layout, no
    /// rewrites, no summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the preprocessing rewrites.
    pub fn with_rewrites(mut self, rewrites: RewriteSet) -> Self {
        self.rewrites = rewrites;
        self
    }

    /// Set the rendering configuration.
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Enable or disable the trailing summary report.
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }
}
