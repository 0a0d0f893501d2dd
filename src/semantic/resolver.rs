//! Lazy name resolution over a finished [`SymbolTable`]
//!
//! Type references are stored by name; nothing is resolved while parsing.
//! The resolver answers lookups afterwards and performs the second pass that
//! reports references to types the unit never declares.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use thiserror::Error;
use tracing::{trace, warn};

use crate::parser::Warning;
use crate::semantic::symbol_table::SymbolTable;
use crate::syntax::{AggregateType, EnumType, Namespace, TypeDescriptor, TypeReference};

/// A name that is not declared in the requested namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("unresolved reference to {namespace} `{name}`")]
pub struct UnresolvedReference {
    pub name: SmolStr,
    pub namespace: Namespace,
}

/// Why a descriptor could not be followed to a concrete type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Unresolved(#[from] UnresolvedReference),
    #[error("typedef `{0}` refers to itself")]
    Cycle(SmolStr),
}

/// What a name resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The type a typedef aliases
    Typedef(&'a TypeDescriptor),
    Struct(&'a AggregateType),
    Enum(&'a EnumType),
    /// A tag that was forward-declared but never given a body
    Opaque,
}

/// Resolver provides lookup algorithms over a symbol table.
///
/// All resolution logic lives here, keeping SymbolTable a plain data structure.
pub struct Resolver<'a> {
    symbol_table: &'a SymbolTable,
}

impl<'a> Resolver<'a> {
    pub fn new(symbol_table: &'a SymbolTable) -> Self {
        Self { symbol_table }
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        self.symbol_table
    }

    /// Resolve `name` in one namespace
    pub fn resolve(
        &self,
        name: &str,
        namespace: Namespace,
    ) -> Result<Resolved<'a>, UnresolvedReference> {
        let table = self.symbol_table;
        let resolved = match namespace {
            Namespace::Typedef => table.typedef(name).map(Resolved::Typedef),
            Namespace::Struct => table.struct_type(name).map(Resolved::Struct),
            Namespace::Enum => table.enum_type(name).map(Resolved::Enum),
        };
        trace!(name, %namespace, found = resolved.is_some(), "resolve");
        match resolved {
            Some(resolved) => Ok(resolved),
            None if table.is_forward_declared(namespace, name) => Ok(Resolved::Opaque),
            None => Err(UnresolvedReference {
                name: SmolStr::new(name),
                namespace,
            }),
        }
    }

    /// Follow typedef names until reaching a descriptor that is not a typedef
    /// reference. Struct and enum references are returned as they are.
    pub fn resolve_descriptor(
        &self,
        descriptor: &'a TypeDescriptor,
    ) -> Result<&'a TypeDescriptor, ResolveError> {
        let mut current = descriptor;
        let mut visited = FxHashSet::default();
        while let TypeDescriptor::Named {
            namespace: Namespace::Typedef,
            name,
        } = current
        {
            if !visited.insert(name) {
                return Err(ResolveError::Cycle(name.clone()));
            }
            current = self
                .symbol_table
                .typedef(name)
                .ok_or_else(|| UnresolvedReference {
                    name: name.clone(),
                    namespace: Namespace::Typedef,
                })?;
        }
        Ok(current)
    }

    /// Check every recorded reference against the table.
    ///
    /// Returns one [`UnresolvedReference`] per distinct (namespace, name),
    /// with the line of its first use.
    pub fn unresolved(&self, references: &[TypeReference]) -> Vec<Warning> {
        let mut seen = FxHashSet::default();
        let mut warnings = Vec::new();
        for reference in references {
            if !seen.insert((reference.namespace, &reference.name)) {
                continue;
            }
            if self
                .symbol_table
                .declares(reference.namespace, &reference.name)
            {
                continue;
            }
            warn!(
                name = %reference.name,
                namespace = %reference.namespace,
                line = reference.line,
                "unresolved type reference"
            );
            warnings.push(Warning::UnresolvedReference {
                name: reference.name.clone(),
                namespace: reference.namespace,
                line: reference.line,
            });
        }
        warnings
    }
}

impl SymbolTable {
    /// Resolve `name` in `namespace`; see [`Resolver::resolve`]
    pub fn resolve(
        &self,
        name: &str,
        namespace: Namespace,
    ) -> Result<Resolved<'_>, UnresolvedReference> {
        Resolver::new(self).resolve(name, namespace)
    }

    /// See [`Resolver::resolve_descriptor`]
    pub fn resolve_descriptor<'a>(
        &'a self,
        descriptor: &'a TypeDescriptor,
    ) -> Result<&'a TypeDescriptor, ResolveError> {
        Resolver::new(self).resolve_descriptor(descriptor)
    }
}
