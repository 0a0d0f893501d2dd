//! Lookahead declaration parser for C
//!
//! Recognises typedefs, struct and enum definitions, and function
//! prototypes/definitions at file scope. Function bodies are skipped by
//! brace counting and never interpreted.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::errors::ExtractError;
use super::lexer::{Token, tokenize};
use super::syntax_kind::SyntaxKind;
use crate::base::Span;
use crate::options::ExtractOptions;
use crate::syntax::{
    AggregateType, Declaration, EnumType, Enumerator, Field, FunctionSignature, Include,
    Namespace, Parameter, TypeDescriptor, TypeReference,
};

type PResult<T> = Result<T, ExtractError>;

/// Everything the parser found in one translation unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUnit {
    pub declarations: Vec<Declaration>,
    pub references: Vec<TypeReference>,
    pub includes: Vec<Include>,
}

/// Parse C source text into declarations
pub fn parse(input: &str, options: &ExtractOptions) -> PResult<ParsedUnit> {
    let all = tokenize(input)?;

    let includes = if options.collect_includes {
        all.iter()
            .filter(|t| t.kind == SyntaxKind::Directive)
            .filter_map(|t| Include::from_directive(t.text, t.line))
            .collect()
    } else {
        Vec::new()
    };

    let tokens: Vec<_> = all.into_iter().filter(|t| !t.kind.is_trivia()).collect();
    let mut parser = Parser::new(&tokens, options);
    parser.parse_translation_unit()?;

    let mut unit = parser.finish();
    unit.includes = includes;
    Ok(unit)
}

/// Result of parsing declaration specifiers
struct Specifiers {
    ty: TypeDescriptor,
    /// `struct Tag` / `enum Tag` with nothing else
    bare_tag: Option<(Namespace, SmolStr)>,
    /// A tagged body or an anonymous enum body was emitted
    declares_body: bool,
}

struct Declarator {
    name: Option<(SmolStr, u32)>,
    ty: TypeDescriptor,
}

enum Suffix {
    Array(Option<u64>),
    Function(Vec<Parameter>, bool),
}

/// The parser state
struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    options: &'t ExtractOptions,
    declarations: Vec<Declaration>,
    references: Vec<TypeReference>,
    /// Enumerator constants seen so far, for constant expressions
    constants: FxHashMap<SmolStr, i64>,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], options: &'t ExtractOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
            declarations: Vec::new(),
            references: Vec::new(),
            constants: FxHashMap::default(),
        }
    }

    fn finish(self) -> ParsedUnit {
        ParsedUnit {
            declarations: self.declarations,
            references: self.references,
            includes: Vec::new(),
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<SyntaxKind> {
        self.current().map(|t| t.kind)
    }

    fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    /// Line of the current token, or of the last token at end of input
    fn current_line(&self) -> u32 {
        self.current()
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    /// Line of the most recently consumed token
    fn previous_line(&self) -> u32 {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn nth(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, expected: &str) -> PResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self, expected: &str) -> PResult<(SmolStr, u32)> {
        if self.at(SyntaxKind::Ident) {
            let name = SmolStr::new(self.current_text());
            let line = self.current_line();
            self.bump();
            Ok((name, line))
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn skip_qualifiers(&mut self) {
        while self.current_kind().is_some_and(SyntaxKind::is_qualifier) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn unexpected(&self, expected: &str) -> ExtractError {
        let found = match self.current() {
            Some(token) => format!("`{}`", token.text),
            None => "end of input".to_string(),
        };
        ExtractError::unexpected(self.current_line(), expected, found)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_translation_unit(&mut self) -> PResult<()> {
        while !self.at_eof() {
            if self.eat(SyntaxKind::Semicolon) {
                continue;
            }
            self.parse_external_declaration()?;
        }
        Ok(())
    }

    fn parse_external_declaration(&mut self) -> PResult<()> {
        let start_line = self.current_line();
        if self.at(SyntaxKind::TypedefKw) {
            return self.parse_typedef(start_line);
        }

        let specifiers = self.parse_specifiers("declaration")?;

        if self.at(SyntaxKind::Semicolon) {
            if let Some((namespace, name)) = specifiers.bare_tag {
                self.bump();
                trace!("forward declaration of {namespace} {name}");
                self.declarations.push(Declaration::TagForward {
                    namespace,
                    name,
                    line: start_line,
                });
                return Ok(());
            }
            if specifiers.declares_body {
                self.bump();
                return Ok(());
            }
            return Err(ExtractError::unsupported(
                start_line,
                "declaration does not declare anything",
            ));
        }

        loop {
            let declarator = self.parse_declarator(specifiers.ty.clone())?;
            let Some((name, name_line)) = declarator.name else {
                return Err(self.unexpected("identifier"));
            };
            let TypeDescriptor::Function {
                returns,
                params,
                variadic,
            } = declarator.ty
            else {
                return Err(ExtractError::unsupported(
                    name_line,
                    format!("top-level variable `{name}` is not supported"),
                ));
            };

            let mut function = FunctionSignature {
                name,
                returns: *returns,
                params,
                variadic,
                has_body: false,
                span: Span::line(start_line),
                calls: Vec::new(),
            };

            if self.at(SyntaxKind::LBrace) {
                let calls = self.skip_body()?;
                function.has_body = true;
                function.calls = calls;
                function.span = Span::new(start_line, self.previous_line());
                debug!(name = %function.name, line = start_line, "function definition");
                self.declarations.push(Declaration::Function(function));
                return Ok(());
            }

            let more = self.at(SyntaxKind::Comma);
            if !more && !self.at(SyntaxKind::Semicolon) {
                return Err(self.unexpected("`;` or `{`"));
            }
            self.bump();
            function.span = Span::new(start_line, self.previous_line());
            debug!(name = %function.name, line = start_line, "function prototype");
            self.declarations.push(Declaration::Function(function));
            if !more {
                return Ok(());
            }
        }
    }

    fn parse_typedef(&mut self, start_line: u32) -> PResult<()> {
        self.bump();
        let specifiers = self.parse_specifiers("type specifier")?;
        let mut aliases = Vec::new();
        loop {
            let declarator = self.parse_declarator(specifiers.ty.clone())?;
            let Some((name, _)) = declarator.name else {
                return Err(self.unexpected("typedef name"));
            };
            aliases.push((name, declarator.ty));
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::Semicolon, "`;`")?;

        let span = Span::new(start_line, self.previous_line());
        for (name, ty) in aliases {
            debug!(name = %name, line = start_line, "typedef");
            self.declarations
                .push(Declaration::Typedef { name, ty, span });
        }
        Ok(())
    }

    // =========================================================================
    // Type specifiers
    // =========================================================================

    fn parse_specifiers(&mut self, expected: &str) -> PResult<Specifiers> {
        let mut words: Vec<&'a str> = Vec::new();
        let mut named: Option<TypeDescriptor> = None;
        let mut bare_tag = None;
        let mut declares_body = false;

        while let Some(kind) = self.current_kind() {
            match kind {
                k if k.is_qualifier() || k.is_storage_class() => self.bump(),
                k if k.is_type_keyword() => {
                    if named.is_some() {
                        return Err(self.unexpected("declarator"));
                    }
                    words.push(self.current_text());
                    self.bump();
                }
                SyntaxKind::StructKw | SyntaxKind::EnumKw => {
                    if named.is_some() || !words.is_empty() {
                        return Err(self.unexpected("declarator"));
                    }
                    let (ty, body) = self.parse_tag_specifier()?;
                    declares_body = body;
                    if let (false, TypeDescriptor::Named { namespace, name }) = (body, &ty) {
                        bare_tag = Some((*namespace, name.clone()));
                    }
                    named = Some(ty);
                }
                SyntaxKind::UnionKw => {
                    return Err(ExtractError::unsupported(
                        self.current_line(),
                        "unions are not supported",
                    ));
                }
                SyntaxKind::Ident if named.is_none() && words.is_empty() => {
                    let (name, line) = self.expect_ident("type name")?;
                    self.reference(Namespace::Typedef, name.clone(), line);
                    named = Some(TypeDescriptor::named(Namespace::Typedef, name));
                }
                _ => break,
            }
        }

        let ty = match (named, words.is_empty()) {
            (Some(ty), true) => ty,
            (None, false) => TypeDescriptor::Primitive(primitive_name(&words)),
            _ => return Err(self.unexpected(expected)),
        };
        Ok(Specifiers {
            ty,
            bare_tag,
            declares_body,
        })
    }

    /// `struct Tag`, `struct Tag { ... }` or `struct { ... }`, enums alike.
    ///
    /// Returns the type and whether a body was declared.
    fn parse_tag_specifier(&mut self) -> PResult<(TypeDescriptor, bool)> {
        let keyword_line = self.current_line();
        let namespace = if self.at(SyntaxKind::StructKw) {
            Namespace::Struct
        } else {
            Namespace::Enum
        };
        self.bump();

        let tag = if self.at(SyntaxKind::Ident) {
            Some(self.expect_ident("tag")?)
        } else {
            None
        };

        if !self.at(SyntaxKind::LBrace) {
            let Some((name, line)) = tag else {
                return Err(self.unexpected("tag name or `{`"));
            };
            self.reference(namespace, name.clone(), line);
            return Ok((TypeDescriptor::named(namespace, name), false));
        }

        let tag_name = tag.map(|(name, _)| name);
        match namespace {
            Namespace::Struct => {
                let fields = self.parse_struct_body()?;
                let aggregate = AggregateType {
                    tag: tag_name.clone(),
                    fields,
                };
                let Some(name) = tag_name else {
                    return Ok((TypeDescriptor::AnonymousStruct(aggregate), false));
                };
                let span = Span::new(keyword_line, self.previous_line());
                debug!(name = %name, line = keyword_line, "struct definition");
                self.declarations
                    .push(Declaration::Struct { aggregate, span });
                Ok((TypeDescriptor::named(Namespace::Struct, name), true))
            }
            _ => {
                let enumerators = self.parse_enum_body()?;
                let enumeration = EnumType {
                    tag: tag_name.clone(),
                    enumerators,
                };
                let span = Span::new(keyword_line, self.previous_line());
                debug!(tag = ?tag_name, line = keyword_line, "enum definition");
                self.declarations.push(Declaration::Enum {
                    enumeration: enumeration.clone(),
                    span,
                });
                let ty = match tag_name {
                    Some(name) => TypeDescriptor::named(Namespace::Enum, name),
                    None => TypeDescriptor::AnonymousEnum(enumeration),
                };
                Ok((ty, true))
            }
        }
    }

    fn parse_struct_body(&mut self) -> PResult<Vec<Field>> {
        self.expect(SyntaxKind::LBrace, "`{`")?;
        let mut fields = Vec::new();
        while !self.eat(SyntaxKind::RBrace) {
            if self.at_eof() {
                return Err(self.unexpected("`}`"));
            }
            let specifiers = self.parse_specifiers("member declaration")?;
            if self.at(SyntaxKind::Semicolon) {
                if specifiers.declares_body || specifiers.bare_tag.is_some() {
                    self.bump();
                    continue;
                }
                return Err(ExtractError::unsupported(
                    self.current_line(),
                    "anonymous members are not supported",
                ));
            }
            loop {
                let declarator = self.parse_declarator(specifiers.ty.clone())?;
                let Some((name, line)) = declarator.name else {
                    return Err(self.unexpected("member name"));
                };
                if self.at(SyntaxKind::Colon) {
                    return Err(ExtractError::unsupported(
                        line,
                        format!("bit-field `{name}` is not supported"),
                    ));
                }
                if declarator.ty.is_function() {
                    return Err(ExtractError::unsupported(
                        line,
                        format!("member `{name}` has function type"),
                    ));
                }
                fields.push(Field {
                    name,
                    ty: declarator.ty,
                });
                if !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
            self.expect(SyntaxKind::Semicolon, "`;`")?;
        }
        Ok(fields)
    }

    fn parse_enum_body(&mut self) -> PResult<Vec<Enumerator>> {
        self.expect(SyntaxKind::LBrace, "`{`")?;
        let mut enumerators = Vec::new();
        let mut next_value: i64 = 0;
        loop {
            if self.at(SyntaxKind::RBrace) && !enumerators.is_empty() {
                break;
            }
            let (name, _) = self.expect_ident("enumerator")?;
            let explicit = if self.eat(SyntaxKind::Eq) {
                Some(self.parse_constant_expr()?)
            } else {
                None
            };
            let value = explicit.unwrap_or(next_value);
            next_value = value.wrapping_add(1);
            self.constants.insert(name.clone(), value);
            enumerators.push(Enumerator {
                name,
                explicit,
                value,
            });
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RBrace, "`,` or `}`")?;
        Ok(enumerators)
    }

    fn reference(&mut self, namespace: Namespace, name: SmolStr, line: u32) {
        self.references.push(TypeReference {
            namespace,
            name,
            line,
        });
    }

    // =========================================================================
    // Declarators
    // =========================================================================

    /// Parse a (possibly abstract) declarator, building the type inside out.
    ///
    /// A parenthesised inner declarator such as `(*handler)` binds looser than
    /// the suffixes after it, so those are parsed first and the inner part is
    /// then parsed on top of them.
    fn parse_declarator(&mut self, base: TypeDescriptor) -> PResult<Declarator> {
        let mut ty = base;
        while self.eat(SyntaxKind::Star) {
            self.skip_qualifiers();
            ty = ty.pointer_to();
        }

        if self.at(SyntaxKind::LParen) && self.nth(1) == Some(SyntaxKind::Star) {
            let open = self.pos;
            let close = self.matching_paren(open)?;
            self.pos = close + 1;
            let outer = self.parse_declarator_suffixes(ty)?;
            let resume = self.pos;

            self.pos = open + 1;
            let inner = self.parse_declarator(outer)?;
            if self.pos != close {
                return Err(self.unexpected("`)`"));
            }
            self.pos = resume;
            return Ok(inner);
        }

        let name = if self.at(SyntaxKind::Ident) {
            Some(self.expect_ident("identifier")?)
        } else {
            None
        };
        let ty = self.parse_declarator_suffixes(ty)?;
        Ok(Declarator { name, ty })
    }

    fn parse_declarator_suffixes(&mut self, base: TypeDescriptor) -> PResult<TypeDescriptor> {
        let mut suffixes = Vec::new();
        loop {
            if self.eat(SyntaxKind::LBracket) {
                while self.current_kind().is_some_and(|k| k.is_qualifier())
                    || self.at(SyntaxKind::StaticKw)
                {
                    self.bump();
                }
                let length = if self.at(SyntaxKind::RBracket) {
                    None
                } else {
                    let line = self.current_line();
                    let value = self.parse_constant_expr()?;
                    let length = u64::try_from(value).map_err(|_| {
                        ExtractError::unexpected(line, "non-negative array length", value.to_string())
                    })?;
                    Some(length)
                };
                self.expect(SyntaxKind::RBracket, "`]`")?;
                suffixes.push(Suffix::Array(length));
            } else if self.eat(SyntaxKind::LParen) {
                let (params, variadic) = self.parse_param_list()?;
                suffixes.push(Suffix::Function(params, variadic));
            } else {
                break;
            }
        }

        let ty = suffixes.into_iter().rev().fold(base, |ty, suffix| match suffix {
            Suffix::Array(length) => ty.array_of(length),
            Suffix::Function(params, variadic) => TypeDescriptor::Function {
                returns: Box::new(ty),
                params,
                variadic,
            },
        });
        Ok(ty)
    }

    /// Parameters after the opening `(`, through the closing `)`
    fn parse_param_list(&mut self) -> PResult<(Vec<Parameter>, bool)> {
        if self.eat(SyntaxKind::RParen) {
            return Ok((Vec::new(), false));
        }
        if self.at(SyntaxKind::VoidKw) && self.nth(1) == Some(SyntaxKind::RParen) {
            self.bump();
            self.bump();
            return Ok((Vec::new(), false));
        }

        let mut params = Vec::new();
        let mut variadic = false;
        loop {
            if self.eat(SyntaxKind::Ellipsis) {
                variadic = true;
                self.expect(SyntaxKind::RParen, "`)`")?;
                break;
            }
            let specifiers = self.parse_specifiers("parameter type")?;
            let declarator = self.parse_declarator(specifiers.ty)?;
            params.push(Parameter {
                name: declarator.name.map(|(name, _)| name),
                ty: declarator.ty.adjust_for_parameter(),
            });
            if self.eat(SyntaxKind::Comma) {
                continue;
            }
            self.expect(SyntaxKind::RParen, "`,` or `)`")?;
            break;
        }
        Ok((params, variadic))
    }

    /// Index of the `)` matching the `(` at `open`
    fn matching_paren(&self, open: usize) -> PResult<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                SyntaxKind::LParen => depth += 1,
                SyntaxKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i);
                    }
                }
                SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::Semicolon => break,
                _ => {}
            }
        }
        let line = self.tokens.get(open).map(|t| t.line).unwrap_or(1);
        Err(ExtractError::unexpected(line, "`)`", "unbalanced `(`"))
    }

    // =========================================================================
    // Function bodies
    // =========================================================================

    /// Skip a `{ ... }` body by brace counting, collecting called names.
    fn skip_body(&mut self) -> PResult<Vec<SmolStr>> {
        let open_line = self.current_line();
        self.bump();
        let mut depth = 1usize;
        let mut calls = Vec::new();
        let mut seen = FxHashSet::default();

        while depth > 0 {
            let Some(token) = self.current() else {
                return Err(ExtractError::UnbalancedBraces { line: open_line });
            };
            match token.kind {
                SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RBrace => depth -= 1,
                SyntaxKind::Ident if self.options.collect_calls && self.is_call_site() => {
                    let name = SmolStr::new(token.text);
                    if seen.insert(name.clone()) {
                        calls.push(name);
                    }
                }
                _ => {}
            }
            self.bump();
        }
        trace!(depth, open_line, calls = calls.len(), "skipped function body");
        Ok(calls)
    }

    /// Identifier at `pos` followed by `(`, and not a member access
    fn is_call_site(&self) -> bool {
        let member = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .is_some_and(|t| matches!(t.kind, SyntaxKind::Dot | SyntaxKind::Arrow));
        !member && self.nth(1) == Some(SyntaxKind::LParen)
    }

    // =========================================================================
    // Constant expressions
    // =========================================================================

    /// Integer constant expression, as used by enumerators and array lengths
    fn parse_constant_expr(&mut self) -> PResult<i64> {
        self.parse_binary(0)
    }

    fn parse_binary(&mut self, min_prec: u8) -> PResult<i64> {
        let mut lhs = self.parse_unary()?;
        while let Some(op) = self.current_kind() {
            let Some(prec) = binary_precedence(op) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            let line = self.current_line();
            self.bump();
            let rhs = self.parse_binary(prec + 1)?;
            lhs = apply_binary(op, lhs, rhs)
                .ok_or_else(|| ExtractError::unexpected(line, "non-zero divisor", "`0`"))?;
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult<i64> {
        match self.current_kind() {
            Some(SyntaxKind::Minus) => {
                self.bump();
                Ok(self.parse_unary()?.wrapping_neg())
            }
            Some(SyntaxKind::Plus) => {
                self.bump();
                self.parse_unary()
            }
            Some(SyntaxKind::Tilde) => {
                self.bump();
                Ok(!self.parse_unary()?)
            }
            Some(SyntaxKind::Bang) => {
                self.bump();
                Ok(i64::from(self.parse_unary()? == 0))
            }
            Some(SyntaxKind::LParen) => {
                self.bump();
                let value = self.parse_binary(0)?;
                self.expect(SyntaxKind::RParen, "`)`")?;
                Ok(value)
            }
            Some(SyntaxKind::Number) => {
                let value = parse_int_literal(self.current_text())
                    .ok_or_else(|| self.unexpected("integer constant"))?;
                self.bump();
                Ok(value)
            }
            Some(SyntaxKind::Char) => {
                let value = parse_char_literal(self.current_text())
                    .ok_or_else(|| self.unexpected("character constant"))?;
                self.bump();
                Ok(value)
            }
            Some(SyntaxKind::Ident) => {
                let value = *self
                    .constants
                    .get(self.current_text())
                    .ok_or_else(|| self.unexpected("integer constant"))?;
                self.bump();
                Ok(value)
            }
            _ => Err(self.unexpected("constant expression")),
        }
    }
}

/// Canonical spelling of a keyword type.
///
/// Every spelling of a type maps to one form: `long int` and `long` are both
/// `long`, `signed` is `int`, a lone `unsigned` is `unsigned int`. Plain,
/// signed and unsigned `char` stay distinct.
fn primitive_name(words: &[&str]) -> SmolStr {
    let count = |word: &str| words.iter().filter(|w| **w == word).count();
    let unsigned = count("unsigned") > 0;
    let signed = count("signed") > 0;
    let size = match (count("short"), count("long")) {
        (0, 0) => None,
        (_, 0) => Some("short"),
        (_, 1) => Some("long"),
        _ => Some("long long"),
    };
    let base = words
        .iter()
        .copied()
        .find(|w| !matches!(*w, "signed" | "unsigned" | "short" | "long"));

    let name = match base {
        Some("char") if unsigned => "unsigned char".to_string(),
        Some("char") if signed => "signed char".to_string(),
        Some("double") if size.is_some() => "long double".to_string(),
        Some(base) if base != "int" => base.to_string(),
        _ => {
            let sign = if unsigned { "unsigned " } else { "" };
            format!("{sign}{}", size.unwrap_or("int"))
        }
    };
    SmolStr::new(name)
}

fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    let prec = match kind {
        SyntaxKind::Pipe => 1,
        SyntaxKind::Caret => 2,
        SyntaxKind::Amp => 3,
        SyntaxKind::Shl | SyntaxKind::Shr => 4,
        SyntaxKind::Plus | SyntaxKind::Minus => 5,
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => 6,
        _ => return None,
    };
    Some(prec)
}

/// `None` on division by zero
fn apply_binary(op: SyntaxKind, lhs: i64, rhs: i64) -> Option<i64> {
    let value = match op {
        SyntaxKind::Pipe => lhs | rhs,
        SyntaxKind::Caret => lhs ^ rhs,
        SyntaxKind::Amp => lhs & rhs,
        SyntaxKind::Shl => lhs.wrapping_shl(rhs as u32),
        SyntaxKind::Shr => lhs.wrapping_shr(rhs as u32),
        SyntaxKind::Plus => lhs.wrapping_add(rhs),
        SyntaxKind::Minus => lhs.wrapping_sub(rhs),
        SyntaxKind::Star => lhs.wrapping_mul(rhs),
        SyntaxKind::Slash | SyntaxKind::Percent if rhs == 0 => return None,
        SyntaxKind::Slash => lhs.wrapping_div(rhs),
        SyntaxKind::Percent => lhs.wrapping_rem(rhs),
        _ => return None,
    };
    Some(value)
}

/// Decimal, octal or hex literal with optional `u`/`l` suffixes.
///
/// Values above `i64::MAX` wrap, matching the evaluator's arithmetic.
fn parse_int_literal(text: &str) -> Option<i64> {
    let digits = text.trim_end_matches(['u', 'U', 'l', 'L']);
    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        u64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<u64>().ok()?
    };
    Some(value as i64)
}

/// Value of a single-character literal such as `'a'` or `'\n'`
fn parse_char_literal(text: &str) -> Option<i64> {
    let body = text
        .trim_start_matches(['L', 'u', 'U'])
        .strip_prefix('\'')?
        .strip_suffix('\'')?;
    let mut chars = body.chars();
    let value = match chars.next()? {
        '\\' => {
            let escape = chars.next()?;
            match escape {
                'n' => 10,
                't' => 9,
                'r' => 13,
                'a' => 7,
                'b' => 8,
                'f' => 12,
                'v' => 11,
                'x' => {
                    let hex: String = chars.by_ref().collect();
                    return i64::from_str_radix(&hex, 16).ok();
                }
                '0'..='7' => {
                    let octal: String = std::iter::once(escape).chain(chars.by_ref()).collect();
                    return i64::from_str_radix(&octal, 8).ok();
                }
                other => other as i64,
            }
        }
        c => c as i64,
    };
    chars.next().is_none().then_some(value)
}
