//! # cdecl
//!
//! Declaration-level extraction of C translation units: typedefs, structs,
//! enums and function signatures, collected into a [`SymbolTable`].
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! semantic  → SymbolTable, builder, lazy resolver
//!   ↓
//! parser    → Logos lexer, lookahead declaration parser, errors
//!   ↓
//! syntax    → TypeDescriptor, AggregateType, EnumType, FunctionSignature
//!   ↓
//! base      → Span, TextSize
//! ```
//!
//! ```
//! let table = cdecl::extract("struct Color { int r; int g; int b; };").unwrap();
//! assert_eq!(table.struct_type("Color").unwrap().fields.len(), 3);
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → parser → semantic)
// ============================================================================

/// Foundation types: Span, TextSize
pub mod base;

/// Declaration data model
pub mod syntax;

/// Parser: Logos lexer, declaration parser, errors
pub mod parser;

/// Symbol table and name resolution
pub mod semantic;

mod options;

/// Serialization of symbol tables
#[cfg(feature = "interchange")]
pub mod interchange;

use rayon::prelude::*;
use tracing::debug;

pub use options::ExtractOptions;
pub use parser::{ErrorCode, ExtractError, LexError, Severity, Warning};
pub use semantic::{Resolved, SymbolTable, UnresolvedReference};
pub use syntax::{
    AggregateType, EnumType, Enumerator, Field, FunctionSignature, Include, Namespace,
    Parameter, SymbolKind, TypeDescriptor,
};

/// Extract the symbol table of one translation unit with default options
pub fn extract(source: &str) -> Result<SymbolTable, ExtractError> {
    extract_with(source, &ExtractOptions::default())
}

/// Extract the symbol table of one translation unit
pub fn extract_with(source: &str, options: &ExtractOptions) -> Result<SymbolTable, ExtractError> {
    let unit = parser::parse(source, options)?;
    semantic::SymbolTableBuilder::new(options).build(unit)
}

/// Extract many independent units in parallel.
///
/// Each unit gets its own lexer and table; results come back in input order.
pub fn extract_all<N, S>(
    units: &[(N, S)],
    options: &ExtractOptions,
) -> Vec<Result<SymbolTable, ExtractError>>
where
    N: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    units
        .par_iter()
        .map(|(name, source)| {
            debug!(unit = name.as_ref(), "extracting");
            extract_with(source.as_ref(), options)
        })
        .collect()
}
