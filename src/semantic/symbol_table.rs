//! Per-unit registry of declared names, one map per kind
mod symbol;
mod table;

pub use symbol::{Symbol, SymbolId};
pub use table::SymbolTable;

#[cfg(test)]
mod tests;
