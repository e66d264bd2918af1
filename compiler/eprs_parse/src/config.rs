//! Parser configuration.

use eprs_diagnostic::ColorMode;

/// Default nesting limit for grammar terms.
///
/// Unbounded on native targets, where the stack grows on demand. On
/// `wasm32` the stack is fixed, so nesting is capped.
#[cfg(not(target_arch = "wasm32"))]
pub const DEFAULT_MAX_DEPTH: usize = usize::MAX;

#[cfg(target_arch = "wasm32")]
pub const DEFAULT_MAX_DEPTH: usize = 2048;

/// Knobs for a [`Parser`](crate::Parser) and the [`parse`](crate::parse)
/// convenience entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum nesting during one parse. Each rule reference and each
    /// group counts as one level. Exceeding it fails the parse with a
    /// recursion-limit error.
    /// Left-recursive rules never terminate without a finite limit.
    pub max_depth: usize,
    /// Color mode for rendered diagnostics.
    pub color: ColorMode,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            color: ColorMode::Never,
        }
    }
}

impl ParseConfig {
    /// Set the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the diagnostic color mode.
    #[must_use]
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }
}
