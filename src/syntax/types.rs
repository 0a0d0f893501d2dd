use std::fmt;

use smol_str::SmolStr;

use super::decl::{AggregateType, EnumType, Parameter};

/// Name space a type reference is looked up in.
///
/// Struct tags, enum tags and typedef names are kept apart, so `struct Point`
/// and a typedef `Point` never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "snake_case"))]
pub enum Namespace {
    Typedef,
    Struct,
    Enum,
}

impl Namespace {
    /// Keyword that introduces a reference in this namespace, if any
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Typedef => None,
            Self::Struct => Some("struct"),
            Self::Enum => Some("enum"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Typedef => "typedef",
            Self::Struct => "struct",
            Self::Enum => "enum",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recursive description of a C type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "snake_case"))]
pub enum TypeDescriptor {
    /// Builtin type spelled with keywords, e.g. `int` or `unsigned long`
    Primitive(SmolStr),
    /// Reference to a typedef, struct or enum by name
    Named { namespace: Namespace, name: SmolStr },
    Pointer(Box<TypeDescriptor>),
    Array {
        element: Box<TypeDescriptor>,
        length: Option<u64>,
    },
    Function {
        returns: Box<TypeDescriptor>,
        params: Vec<Parameter>,
        variadic: bool,
    },
    /// `struct { ... }` without a tag
    AnonymousStruct(AggregateType),
    /// `enum { ... }` without a tag
    AnonymousEnum(EnumType),
}

impl TypeDescriptor {
    pub fn primitive(name: impl Into<SmolStr>) -> Self {
        Self::Primitive(name.into())
    }

    pub fn named(namespace: Namespace, name: impl Into<SmolStr>) -> Self {
        Self::Named {
            namespace,
            name: name.into(),
        }
    }

    pub fn pointer_to(self) -> Self {
        Self::Pointer(Box::new(self))
    }

    pub fn array_of(self, length: Option<u64>) -> Self {
        Self::Array {
            element: Box::new(self),
            length,
        }
    }

    /// Apply C parameter adjustment: arrays and functions decay to pointers.
    pub fn adjust_for_parameter(self) -> Self {
        match self {
            Self::Array { element, .. } => Self::Pointer(element),
            function @ Self::Function { .. } => function.pointer_to(),
            other => other,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function { .. })
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Self::Primitive(name) if name == "void")
    }

    /// Number of pointer levels wrapped around the innermost type
    pub fn pointer_depth(&self) -> usize {
        match self {
            Self::Pointer(inner) => 1 + inner.pointer_depth(),
            _ => 0,
        }
    }

    /// Call `f` on every named reference reachable from this descriptor
    pub fn visit_references<'a>(&'a self, f: &mut impl FnMut(Namespace, &'a SmolStr)) {
        match self {
            Self::Primitive(_) => {}
            Self::Named { namespace, name } => f(*namespace, name),
            Self::Pointer(inner) => inner.visit_references(f),
            Self::Array { element, .. } => element.visit_references(f),
            Self::Function {
                returns, params, ..
            } => {
                returns.visit_references(f);
                for param in params {
                    param.ty.visit_references(f);
                }
            }
            Self::AnonymousStruct(aggregate) => {
                for field in &aggregate.fields {
                    field.ty.visit_references(f);
                }
            }
            Self::AnonymousEnum(_) => {}
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) => f.write_str(name),
            Self::Named { namespace, name } => match namespace.keyword() {
                Some(keyword) => write!(f, "{keyword} {name}"),
                None => f.write_str(name),
            },
            Self::Pointer(inner) => match inner.as_ref() {
                Self::Function {
                    returns,
                    params,
                    variadic,
                } => {
                    write!(f, "{returns} (*)(")?;
                    write_params(f, params, *variadic, false)?;
                    f.write_str(")")
                }
                Self::Pointer(_) => write!(f, "{inner}*"),
                _ => write!(f, "{inner} *"),
            },
            Self::Array { element, length } => match length {
                Some(length) => write!(f, "{element}[{length}]"),
                None => write!(f, "{element}[]"),
            },
            Self::Function {
                returns,
                params,
                variadic,
            } => {
                write!(f, "{returns} (")?;
                write_params(f, params, *variadic, false)?;
                f.write_str(")")
            }
            Self::AnonymousStruct(aggregate) => {
                f.write_str("struct {")?;
                for field in &aggregate.fields {
                    write!(f, " {} {};", field.ty, field.name)?;
                }
                f.write_str(" }")
            }
            Self::AnonymousEnum(enumeration) => {
                f.write_str("enum {")?;
                for (i, enumerator) in enumeration.enumerators.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{}", enumerator.name)?;
                }
                f.write_str(" }")
            }
        }
    }
}

/// Render a parameter list without the surrounding parentheses
pub(super) fn write_params(
    f: &mut fmt::Formatter<'_>,
    params: &[Parameter],
    variadic: bool,
    with_names: bool,
) -> fmt::Result {
    if params.is_empty() && !variadic {
        return f.write_str("void");
    }
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match (&param.name, with_names) {
            (Some(name), true) => {
                let ty = param.ty.to_string();
                let sep = if ty.ends_with('*') { "" } else { " " };
                write!(f, "{ty}{sep}{name}")?
            }
            _ => write!(f, "{}", param.ty)?,
        }
    }
    if variadic {
        if !params.is_empty() {
            f.write_str(", ")?;
        }
        f.write_str("...")?;
    }
    Ok(())
}

/// Kind of a top-level symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "snake_case"))]
pub enum SymbolKind {
    TypedefAlias,
    Struct,
    Enum,
    Function,
    /// A constant declared inside an enum body
    Enumerator,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypedefAlias => "typedef",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Function => "function",
            Self::Enumerator => "enumerator",
        }
    }
}

impl From<Namespace> for SymbolKind {
    fn from(namespace: Namespace) -> Self {
        match namespace {
            Namespace::Typedef => Self::TypedefAlias,
            Namespace::Struct => Self::Struct,
            Namespace::Enum => Self::Enum,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
