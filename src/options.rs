//! Extraction options

/// Knobs for a single extraction.
///
/// The defaults extract everything; turning collectors off only drops data,
/// it never changes which inputs are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Record the functions each definition calls
    pub collect_calls: bool,
    /// Record `#include` directives
    pub collect_includes: bool,
    /// Report references to undeclared types as warnings
    pub warn_unresolved: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            collect_calls: true,
            collect_includes: true,
            warn_unresolved: true,
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calls(mut self, collect: bool) -> Self {
        self.collect_calls = collect;
        self
    }

    pub fn with_includes(mut self, collect: bool) -> Self {
        self.collect_includes = collect;
        self
    }

    pub fn with_unresolved_warnings(mut self, warn: bool) -> Self {
        self.warn_unresolved = warn;
        self
    }
}
