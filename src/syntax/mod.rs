//! Declaration data model
//!
//! Plain values produced by the parser and stored in the symbol table:
//! - [`TypeDescriptor`] - recursive description of a C type
//! - [`AggregateType`], [`EnumType`] - struct and enum bodies
//! - [`FunctionSignature`] - prototypes and definitions
//! - [`Include`] - `#include` directives seen while lexing
//!
//! Everything here is immutable once built; references to other types are
//! kept by name ([`TypeDescriptor::Named`]) and resolved lazily.

mod decl;
mod types;

pub use decl::{
    AggregateType, Declaration, EnumType, Enumerator, Field, FunctionSignature, Include,
    Parameter, TypeReference,
};
pub use types::{Namespace, SymbolKind, TypeDescriptor};
