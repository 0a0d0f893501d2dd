//! Symbol table construction from parsed declarations
//!
//! Pass one stores declarations in source order, enforcing the duplicate
//! rules of each namespace. Pass two checks the recorded type references.

use tracing::{debug, info};

use crate::options::ExtractOptions;
use crate::parser::{ExtractError, ParsedUnit};
use crate::semantic::resolver::Resolver;
use crate::semantic::symbol_table::SymbolTable;
use crate::syntax::Declaration;

pub struct SymbolTableBuilder<'o> {
    options: &'o ExtractOptions,
    table: SymbolTable,
}

impl<'o> SymbolTableBuilder<'o> {
    pub fn new(options: &'o ExtractOptions) -> Self {
        Self {
            options,
            table: SymbolTable::new(),
        }
    }

    /// Add one declaration to the table under construction
    pub fn declare(&mut self, declaration: Declaration) -> Result<(), ExtractError> {
        match declaration {
            Declaration::Typedef { name, ty, span } => self.table.add_typedef(name, ty, span),
            Declaration::Struct { aggregate, span } => self.table.add_struct(aggregate, span),
            Declaration::Enum { enumeration, span } => self.table.add_enum(enumeration, span),
            Declaration::TagForward {
                namespace, name, ..
            } => {
                self.table.add_forward(namespace, name);
                Ok(())
            }
            Declaration::Function(function) => self.table.add_function(function),
        }
    }

    /// Run both passes over a parsed unit and return the finished table
    pub fn build(mut self, unit: ParsedUnit) -> Result<SymbolTable, ExtractError> {
        let ParsedUnit {
            declarations,
            references,
            includes,
        } = unit;

        debug!(
            declarations = declarations.len(),
            references = references.len(),
            "building symbol table"
        );
        for declaration in declarations {
            self.declare(declaration)?;
        }
        self.table.set_includes(includes);

        let unresolved = Resolver::new(&self.table).unresolved(&references);
        if !unresolved.is_empty() {
            self.table.mark_incomplete();
        }
        if self.options.warn_unresolved {
            for warning in unresolved {
                self.table.push_warning(warning);
            }
        }

        info!(
            symbols = self.table.symbol_count(),
            warnings = self.table.warnings().len(),
            complete = self.table.is_complete(),
            "symbol table built"
        );
        Ok(self.table)
    }
}
