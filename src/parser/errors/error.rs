//! Error and warning types
//!
//! Every fatal error carries the 1-based line it was detected on and maps to
//! an [`ErrorCode`]. Warnings never stop extraction.

use smol_str::SmolStr;
use thiserror::Error;

use super::codes::ErrorCode;
use crate::syntax::{Namespace, SymbolKind};

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// A hard error that prevents extraction
    #[default]
    Error,
    /// A problem that leaves the table incomplete
    Warning,
    /// An informational notice
    Hint,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Hint => "hint",
        }
    }
}

/// What went wrong inside the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid character")]
    InvalidCharacter,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("unterminated block comment")]
    UnterminatedComment,
}

/// A malformed token stream. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind} near `{snippet}`")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Line the offending token starts on
    pub line: u32,
    /// Start of the offending text, for the message
    pub snippet: SmolStr,
}

impl LexError {
    const SNIPPET_CHARS: usize = 16;

    pub fn new(kind: LexErrorKind, line: u32, text: &str) -> Self {
        let first_line = text.lines().next().unwrap_or("");
        Self {
            kind,
            line,
            snippet: first_line.chars().take(Self::SNIPPET_CHARS).collect(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::InvalidCharacter => ErrorCode::E0101,
            LexErrorKind::UnterminatedString => ErrorCode::E0102,
            LexErrorKind::UnterminatedComment => ErrorCode::E0103,
            LexErrorKind::UnterminatedChar => ErrorCode::E0104,
        }
    }
}

/// Errors that abort extraction of a translation unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Malformed declaration
    #[error("line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: u32,
        expected: String,
        found: String,
    },

    /// Valid C that falls outside the supported declaration shapes
    #[error("line {line}: unsupported declaration: {message}")]
    UnsupportedDeclaration { line: u32, message: String },

    /// End of input inside a function body
    #[error("line {line}: `{{` opened here is never closed")]
    UnbalancedBraces { line: u32 },

    /// Same name redeclared incompatibly within one namespace
    #[error("line {line}: {kind} `{name}` conflicts with the declaration on line {previous_line}")]
    DuplicateSymbol {
        line: u32,
        kind: SymbolKind,
        name: SmolStr,
        previous_line: u32,
    },
}

impl ExtractError {
    pub fn unexpected(line: u32, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            line,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unsupported(line: u32, message: impl Into<String>) -> Self {
        Self::UnsupportedDeclaration {
            line,
            message: message.into(),
        }
    }

    /// Line the error was detected on
    pub fn line(&self) -> u32 {
        match self {
            Self::Lex(err) => err.line,
            Self::UnexpectedToken { line, .. }
            | Self::UnsupportedDeclaration { line, .. }
            | Self::UnbalancedBraces { line }
            | Self::DuplicateSymbol { line, .. } => *line,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Lex(err) => err.code(),
            Self::UnexpectedToken { .. } => ErrorCode::E0901,
            Self::UnsupportedDeclaration { .. } => ErrorCode::E0302,
            Self::UnbalancedBraces { .. } => ErrorCode::E0202,
            Self::DuplicateSymbol { .. } => ErrorCode::E0303,
        }
    }

    /// Format the error for display, prefixed with its code
    pub fn format(&self) -> String {
        format!("{}: {}", self.code(), self)
    }
}

/// Non-fatal findings reported alongside a finished symbol table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(tag = "type", rename_all = "snake_case"))]
pub enum Warning {
    /// A type name used somewhere in the unit but never declared in it
    #[error("line {line}: unresolved reference to {namespace} `{name}`")]
    UnresolvedReference {
        name: SmolStr,
        namespace: Namespace,
        line: u32,
    },

    /// The same prototype written twice
    #[error("line {line}: prototype for `{name}` repeats the one on line {first_line}")]
    DuplicatePrototype {
        name: SmolStr,
        line: u32,
        first_line: u32,
    },

    /// A typedef, struct or enum defined twice with the same body
    #[error("line {line}: {kind} `{name}` redefined identically (first on line {first_line})")]
    IdenticalRedefinition {
        kind: SymbolKind,
        name: SmolStr,
        line: u32,
        first_line: u32,
    },
}

impl Warning {
    pub fn line(&self) -> u32 {
        match self {
            Self::UnresolvedReference { line, .. }
            | Self::DuplicatePrototype { line, .. }
            | Self::IdenticalRedefinition { line, .. } => *line,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnresolvedReference { .. } => ErrorCode::E0501,
            Self::DuplicatePrototype { .. } => ErrorCode::E0304,
            Self::IdenticalRedefinition { .. } => ErrorCode::E0305,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::UnresolvedReference { .. } => Severity::Warning,
            Self::DuplicatePrototype { .. } | Self::IdenticalRedefinition { .. } => Severity::Hint,
        }
    }

    pub fn is_unresolved_reference(&self) -> bool {
        matches!(self, Self::UnresolvedReference { .. })
    }
}
