//! Token kinds produced by the logos lexer
//!
//! The full C punctuator set is covered so that function bodies, which are
//! skipped rather than parsed, still tokenize cleanly.

use logos::Logos;

use super::errors::LexErrorKind;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexErrorKind)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Blank space, including backslash-newline line splices
    #[regex(r"([ \t\r\n\x0B\x0C]|\\\r?\n)+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    /// A whole preprocessor line, continuations included
    #[token("#", directive)]
    Directive,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]([eEpP][+-]|[0-9a-zA-Z_.])*")]
    #[regex(r"\.[0-9]([eEpP][+-]|[0-9a-zA-Z_.])*")]
    Number,

    #[token("\"", string_literal)]
    #[regex(r#"(L|u8|u|U)""#, string_literal)]
    String,

    #[token("'", char_literal)]
    #[regex(r"(L|u|U)'", char_literal)]
    Char,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("typedef")]
    TypedefKw,
    #[token("struct")]
    StructKw,
    #[token("union")]
    UnionKw,
    #[token("enum")]
    EnumKw,

    #[token("void")]
    VoidKw,
    #[token("char")]
    CharKw,
    #[token("short")]
    ShortKw,
    #[token("int")]
    IntKw,
    #[token("long")]
    LongKw,
    #[token("float")]
    FloatKw,
    #[token("double")]
    DoubleKw,
    #[token("signed")]
    SignedKw,
    #[token("unsigned")]
    UnsignedKw,
    #[token("_Bool")]
    BoolKw,

    #[token("const")]
    ConstKw,
    #[token("volatile")]
    VolatileKw,
    #[token("restrict")]
    RestrictKw,

    #[token("static")]
    StaticKw,
    #[token("extern")]
    ExternKw,
    #[token("inline")]
    InlineKw,
    #[token("register")]
    RegisterKw,
    #[token("auto")]
    AutoKw,

    #[token("sizeof")]
    SizeofKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("while")]
    WhileKw,
    #[token("for")]
    ForKw,
    #[token("do")]
    DoKw,
    #[token("switch")]
    SwitchKw,
    #[token("case")]
    CaseKw,
    #[token("default")]
    DefaultKw,
    #[token("return")]
    ReturnKw,
    #[token("break")]
    BreakKw,
    #[token("continue")]
    ContinueKw,
    #[token("goto")]
    GotoKw,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    Ellipsis,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("->")]
    Arrow,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("*")]
    Star,
    #[token("&")]
    Amp,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
}

impl SyntaxKind {
    /// Tokens the declaration parser never looks at
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment | Self::Directive
        )
    }

    /// Keywords that spell a builtin type
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            Self::VoidKw
                | Self::CharKw
                | Self::ShortKw
                | Self::IntKw
                | Self::LongKw
                | Self::FloatKw
                | Self::DoubleKw
                | Self::SignedKw
                | Self::UnsignedKw
                | Self::BoolKw
        )
    }

    pub fn is_qualifier(self) -> bool {
        matches!(self, Self::ConstKw | Self::VolatileKw | Self::RestrictKw)
    }

    pub fn is_storage_class(self) -> bool {
        matches!(
            self,
            Self::StaticKw | Self::ExternKw | Self::InlineKw | Self::RegisterKw | Self::AutoKw
        )
    }
}

// =============================================================================
// Callbacks
// =============================================================================

type LogosLexer<'a> = logos::Lexer<'a, SyntaxKind>;

fn block_comment(lex: &mut LogosLexer<'_>) -> Result<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}

fn directive(lex: &mut LogosLexer<'_>) {
    let bytes = lex.remainder().as_bytes();
    let mut end = bytes.len();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if bytes[i + 1..].starts_with(b"\n") => i += 2,
            b'\\' if bytes[i + 1..].starts_with(b"\r\n") => i += 3,
            b'\n' => {
                end = i;
                break;
            }
            _ => i += 1,
        }
    }
    lex.bump(end);
}

fn string_literal(lex: &mut LogosLexer<'_>) -> Result<(), LexErrorKind> {
    quoted(lex, '"', LexErrorKind::UnterminatedString)
}

fn char_literal(lex: &mut LogosLexer<'_>) -> Result<(), LexErrorKind> {
    quoted(lex, '\'', LexErrorKind::UnterminatedChar)
}

/// Consume up to and including the closing `quote`. Literals may not span
/// lines except through a backslash-newline continuation.
fn quoted(lex: &mut LogosLexer<'_>, quote: char, err: LexErrorKind) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        match c {
            '\r' if escaped => {}
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '\n' => {
                lex.bump(i);
                return Err(err);
            }
            c if c == quote => {
                lex.bump(i + c.len_utf8());
                return Ok(());
            }
            _ => {}
        }
    }
    lex.bump(rest.len());
    Err(err)
}
