//! Error code definitions for extraction diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces)
//! - E03xx: Declaration errors
//! - E05xx: Name resolution
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for extraction diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated block comment
    E0103,
    /// Unterminated character literal
    E0104,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Unclosed brace `{`
    E0202,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Declaration shape outside the supported subset
    E0302,
    /// Conflicting redeclaration
    E0303,
    /// Repeated identical prototype
    E0304,
    /// Repeated identical type definition
    E0305,

    // =========================================================================
    // E05xx: Name resolution
    // =========================================================================
    /// Type referenced but never declared
    E0501,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0202")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0202 => "E0202",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0501 => "E0501",
            Self::E0901 => "E0901",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 => "lexical error",
            Self::E0202 => "structural error",
            Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 => "declaration error",
            Self::E0501 => "resolution error",
            Self::E0901 => "syntax error",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::E0202)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
