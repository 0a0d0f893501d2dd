use std::fmt;

use smol_str::SmolStr;

use super::types::{Namespace, TypeDescriptor, write_params};
use crate::base::Span;

/// A single member of a struct, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct Field {
    pub name: SmolStr,
    pub ty: TypeDescriptor,
}

/// A struct body.
///
/// Field order matches the source and is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct AggregateType {
    pub tag: Option<SmolStr>,
    pub fields: Vec<Field>,
}

impl AggregateType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct Enumerator {
    pub name: SmolStr,
    /// Value written in the source, if any
    pub explicit: Option<i64>,
    /// Effective value: `explicit`, or the previous value + 1 (0 for the first)
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct EnumType {
    pub tag: Option<SmolStr>,
    pub enumerators: Vec<Enumerator>,
}

impl EnumType {
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.enumerators
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct Parameter {
    pub name: Option<SmolStr>,
    pub ty: TypeDescriptor,
}

/// A function prototype (`has_body == false`) or definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct FunctionSignature {
    pub name: SmolStr,
    pub returns: TypeDescriptor,
    pub params: Vec<Parameter>,
    pub variadic: bool,
    pub has_body: bool,
    pub span: Span,
    /// Functions called from the body, first occurrence order, no repeats.
    /// Always empty for prototypes.
    pub calls: Vec<SmolStr>,
}

impl FunctionSignature {
    /// Whether two declarations of the same name agree on their type.
    ///
    /// Parameter names are not part of a function's type and are ignored.
    pub fn is_compatible_with(&self, other: &FunctionSignature) -> bool {
        self.returns == other.returns
            && self.variadic == other.variadic
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.ty == b.ty)
    }

    /// Whether `other` is the same declaration written again
    pub fn is_repeat_of(&self, other: &FunctionSignature) -> bool {
        self.is_compatible_with(other) && self.has_body == other.has_body && !self.has_body
    }

    pub fn param_types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.params.iter().map(|param| &param.ty)
    }

    /// The declaration rendered as C text, e.g. `int add(int a, int b)`
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.returns.pointer_depth() > 0 { "" } else { " " };
        write!(f, "{}{sep}{}(", self.returns, self.name)?;
        write_params(f, &self.params, self.variadic, true)?;
        f.write_str(")")
    }
}

/// An `#include` directive. Recorded, never followed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct Include {
    pub path: SmolStr,
    /// `<...>` rather than `"..."`
    pub system: bool,
    pub line: u32,
}

impl Include {
    /// Parse the text of a directive token; `None` unless it is an include.
    pub fn from_directive(text: &str, line: u32) -> Option<Self> {
        let body = text.strip_prefix('#')?.trim_start();
        let rest = body.strip_prefix("include")?.trim();
        let (system, close) = match rest.chars().next()? {
            '<' => (true, '>'),
            '"' => (false, '"'),
            _ => return None,
        };
        let inner = &rest[1..];
        let end = inner.find(close)?;
        Some(Self {
            path: SmolStr::new(&inner[..end]),
            system,
            line,
        })
    }
}

/// One declaration recognised by the parser, in source order.
///
/// Tagged struct and enum bodies nested inside other declarations are
/// reported as their own entries, ahead of the declaration containing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Typedef {
        name: SmolStr,
        ty: TypeDescriptor,
        span: Span,
    },
    Struct {
        aggregate: AggregateType,
        span: Span,
    },
    /// An enum body; anonymous ones only contribute enumerator constants
    Enum {
        enumeration: EnumType,
        span: Span,
    },
    /// `struct Tag;` or `enum Tag;` without a body
    TagForward {
        namespace: Namespace,
        name: SmolStr,
        line: u32,
    },
    Function(FunctionSignature),
}

/// A use of a type name, recorded for the resolution pass
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeReference {
    pub namespace: Namespace,
    pub name: SmolStr,
    pub line: u32,
}
