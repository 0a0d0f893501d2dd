//! Serialization of symbol tables.
//!
//! Tables serialize through serde; maps keep declaration order, so the same
//! input always produces byte-identical output.
//!
//! ```ignore
//! use cdecl::interchange::{Json, TableFormat};
//!
//! let table = cdecl::extract(source)?;
//! let bytes = Json.write(&table)?;
//! ```

mod error;
mod json;

pub use error::InterchangeError;
pub use json::{Json, to_json};

use crate::semantic::SymbolTable;

/// A format a symbol table can be written in
pub trait TableFormat {
    /// Short name of the format, e.g. "json"
    fn name(&self) -> &'static str;

    fn write(&self, table: &SymbolTable) -> Result<Vec<u8>, InterchangeError>;
}
