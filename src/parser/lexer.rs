//! Logos-based lexer for C source text
//!
//! Produces every token, trivia included; the parser filters what it needs.

use logos::Logos;
use text_size::TextSize;

use super::errors::LexError;
use super::syntax_kind::SyntaxKind;

/// A token with its kind, text and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
    /// 1-based line the token starts on
    pub line: u32,
}

/// Lexer wrapping the logos-generated tokenizer.
///
/// A clone resumes from the same position independently of the original.
#[derive(Clone)]
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, SyntaxKind>,
    line: u32,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: SyntaxKind::lexer(input),
            line: 1,
            failed: false,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.inner.next()?;
        let text = self.inner.slice();
        let line = self.line;
        self.line += text.bytes().filter(|&b| b == b'\n').count() as u32;

        match result {
            Ok(kind) => Some(Ok(Token {
                kind,
                text,
                offset: TextSize::new(self.inner.span().start as u32),
                line,
            })),
            Err(kind) => {
                // The stream is unusable past a lexical error
                self.failed = true;
                Some(Err(LexError::new(kind, line, text)))
            }
        }
    }
}

/// Tokenize an entire string, stopping at the first lexical error
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(input).collect()
}
