//! Foundation types for the extractor.
//!
//! - [`Span`] - 1-based source line ranges attached to symbols
//! - [`TextSize`], [`TextRange`] - byte offsets of tokens
//!
//! This module has NO dependencies on other cdecl modules.

mod position;

pub use position::Span;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
