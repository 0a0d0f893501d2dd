//! Extraction error handling module
//!
//! - Fatal errors ([`ExtractError`], [`LexError`]) abort extraction
//! - Non-fatal [`Warning`]s are collected on the symbol table
//! - Categorized error codes for filtering and documentation

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{ExtractError, LexError, LexErrorKind, Severity, Warning};

#[cfg(test)]
mod tests;
