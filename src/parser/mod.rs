//! Declaration-level parser for C
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind and line numbers
//!     ↓
//! Parser → ParsedUnit (declarations + type references + includes)
//!     ↓
//! semantic → SymbolTable
//! ```
//!
//! Preprocessor lines are lexed as single opaque tokens and skipped.
//! Function bodies are consumed by brace counting; nothing inside them is
//! interpreted beyond noting call sites.

#[allow(clippy::module_inception)]
mod parser;

pub mod errors;
mod lexer;
mod syntax_kind;

pub use errors::{ErrorCode, ExtractError, LexError, LexErrorKind, Severity, Warning};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{ParsedUnit, parse};
pub use syntax_kind::SyntaxKind;

#[cfg(test)]
mod tests;
