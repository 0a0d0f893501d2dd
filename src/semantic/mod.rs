//! # Semantic Analysis
//!
//! Turns parsed declarations into a queryable [`SymbolTable`]:
//! - [`SymbolTableBuilder`] stores declarations and enforces duplicate rules
//! - [`Resolver`] answers name lookups and reports unresolved references

mod builder;
pub mod resolver;
pub mod symbol_table;

pub use builder::SymbolTableBuilder;
pub use resolver::{ResolveError, Resolved, Resolver, UnresolvedReference};
pub use symbol_table::{Symbol, SymbolId, SymbolTable};
