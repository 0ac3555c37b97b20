//! Resource limits for a parse.

/// The default maximum nesting depth (e.g. `[[[]]]`), protecting the
/// builder's recursion.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// The default maximum input size (10 MiB).
pub const MAX_JSON_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Limits applied by [`parse_with_options`](crate::parse_with_options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed container nesting. The root container is depth 1.
    pub max_depth: usize,
    /// Longest accepted input, in bytes.
    pub max_input_size: usize,
}

impl ParseOptions {
    pub const fn new() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_size: MAX_JSON_SIZE_BYTES,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub const fn with_max_input_size(mut self, max_input_size: usize) -> Self {
        self.max_input_size = max_input_size;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.max_depth, 100);
        assert_eq!(options.max_input_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_setters() {
        const TIGHT: ParseOptions = ParseOptions::new().with_max_depth(4).with_max_input_size(64);
        assert_eq!(TIGHT.max_depth, 4);
        assert_eq!(TIGHT.max_input_size, 64);
    }
}
