//! Integration tests for the errors module

use super::*;
use crate::syntax::{Namespace, SymbolKind};

#[test]
fn test_lex_error_maps_to_lexical_codes() {
    let err = LexError::new(LexErrorKind::UnterminatedComment, 3, "/* never\nclosed");
    assert_eq!(err.code(), ErrorCode::E0103);
    assert_eq!(err.snippet, "/* never");
    assert_eq!(err.code().category_description(), "lexical error");
}

#[test]
fn test_lex_error_snippet_is_truncated() {
    let err = LexError::new(
        LexErrorKind::UnterminatedString,
        1,
        "\"a very long string literal that never ends",
    );
    assert_eq!(err.snippet.chars().count(), 16);
}

#[test]
fn test_extract_error_line_and_code() {
    let err: ExtractError = LexError::new(LexErrorKind::InvalidCharacter, 7, "@").into();
    assert_eq!(err.line(), 7);
    assert_eq!(err.code(), ErrorCode::E0101);

    let err = ExtractError::UnbalancedBraces { line: 2 };
    assert_eq!(err.line(), 2);
    assert!(err.code().is_structural());
    assert_eq!(err.to_string(), "line 2: `{` opened here is never closed");
}

#[test]
fn test_duplicate_symbol_message() {
    let err = ExtractError::DuplicateSymbol {
        line: 9,
        kind: SymbolKind::Function,
        name: "add".into(),
        previous_line: 4,
    };
    assert_eq!(
        err.format(),
        "E0303: line 9: function `add` conflicts with the declaration on line 4"
    );
}

#[test]
fn test_warning_severity() {
    let unresolved = Warning::UnresolvedReference {
        name: "Missing".into(),
        namespace: Namespace::Struct,
        line: 1,
    };
    assert_eq!(unresolved.severity(), Severity::Warning);
    assert!(unresolved.is_unresolved_reference());
    assert_eq!(
        unresolved.to_string(),
        "line 1: unresolved reference to struct `Missing`"
    );

    let repeat = Warning::DuplicatePrototype {
        name: "add".into(),
        line: 5,
        first_line: 4,
    };
    assert_eq!(repeat.severity(), Severity::Hint);
    assert!(!repeat.severity().is_error());
    assert_eq!(repeat.code(), ErrorCode::E0304);
}
