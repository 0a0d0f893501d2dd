use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::symbol::{Symbol, SymbolId};
use crate::base::Span;
use crate::parser::{ExtractError, Warning};
use crate::syntax::{
    AggregateType, EnumType, FunctionSignature, Include, Namespace, SymbolKind, TypeDescriptor,
};

/// Symbols of one translation unit.
///
/// Each kind keeps its own insertion-ordered map, so a struct tag and a
/// typedef may share a name. Functions map to every stored declaration of
/// that name (a prototype and its definition, say).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct SymbolTable {
    /// Arena storage for all symbols, in declaration order
    pub(super) arena: Vec<Symbol>,
    pub(super) typedefs: IndexMap<SmolStr, TypeDescriptor>,
    pub(super) structs: IndexMap<SmolStr, AggregateType>,
    pub(super) enums: IndexMap<SmolStr, EnumType>,
    pub(super) functions: IndexMap<SmolStr, Vec<FunctionSignature>>,
    /// `enum { ... };` bodies without a tag
    pub(super) anonymous_enums: Vec<EnumType>,
    /// Every enumerator constant in the unit
    pub(super) enumerators: IndexMap<SmolStr, i64>,
    /// Tags declared with `struct Tag;` / `enum Tag;`
    pub(super) forward_declared: IndexSet<(Namespace, SmolStr)>,
    pub(super) includes: Vec<Include>,
    pub(super) warnings: Vec<Warning>,
    pub(super) incomplete: bool,
    /// First symbol of each (kind, name), for O(1) lookups
    #[cfg_attr(feature = "interchange", serde(skip))]
    pub(super) by_name: FxHashMap<(SymbolKind, SmolStr), SymbolId>,
    #[cfg_attr(feature = "interchange", serde(skip))]
    pub(super) enumerator_lines: FxHashMap<SmolStr, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn typedefs(&self) -> &IndexMap<SmolStr, TypeDescriptor> {
        &self.typedefs
    }

    pub fn structs(&self) -> &IndexMap<SmolStr, AggregateType> {
        &self.structs
    }

    pub fn enums(&self) -> &IndexMap<SmolStr, EnumType> {
        &self.enums
    }

    pub fn functions(&self) -> &IndexMap<SmolStr, Vec<FunctionSignature>> {
        &self.functions
    }

    pub fn typedef(&self, name: &str) -> Option<&TypeDescriptor> {
        self.typedefs.get(name)
    }

    pub fn struct_type(&self, name: &str) -> Option<&AggregateType> {
        self.structs.get(name)
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enums.get(name)
    }

    /// All stored declarations of a function, in source order
    pub fn function(&self, name: &str) -> &[FunctionSignature] {
        self.functions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The declaration of `name` that has a body, if any
    pub fn definition(&self, name: &str) -> Option<&FunctionSignature> {
        self.function(name).iter().find(|f| f.has_body)
    }

    pub fn anonymous_enums(&self) -> &[EnumType] {
        &self.anonymous_enums
    }

    /// Value of an enumerator constant from any enum in the unit
    pub fn enumerator_value(&self, name: &str) -> Option<i64> {
        self.enumerators.get(name).copied()
    }

    pub fn is_forward_declared(&self, namespace: Namespace, name: &str) -> bool {
        self.forward_declared
            .contains(&(namespace, SmolStr::new(name)))
    }

    pub fn includes(&self) -> &[Include] {
        &self.includes
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// False when some referenced type was never declared in the unit
    pub fn is_complete(&self) -> bool {
        !self.incomplete
    }

    pub fn iter_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.arena.iter()
    }

    pub fn symbol_count(&self) -> usize {
        self.arena.len()
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.arena.get(id.index())
    }

    /// First symbol declared with this kind and name
    pub fn lookup(&self, kind: SymbolKind, name: &str) -> Option<&Symbol> {
        self.by_name
            .get(&(kind, SmolStr::new(name)))
            .and_then(|id| self.get(*id))
    }

    /// Whether `name` is declared in `namespace`, forward declarations included
    pub fn declares(&self, namespace: Namespace, name: &str) -> bool {
        match namespace {
            Namespace::Typedef => self.typedefs.contains_key(name),
            Namespace::Struct => {
                self.structs.contains_key(name) || self.is_forward_declared(namespace, name)
            }
            Namespace::Enum => {
                self.enums.contains_key(name) || self.is_forward_declared(namespace, name)
            }
        }
    }

    // ============================================================
    // Population
    // ============================================================

    fn insert_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId::new(self.arena.len());
        self.by_name
            .entry((symbol.kind, symbol.name.clone()))
            .or_insert(id);
        trace!(name = %symbol.name, kind = %symbol.kind, "symbol inserted");
        self.arena.push(symbol);
        id
    }

    fn first_line(&self, kind: SymbolKind, name: &str) -> u32 {
        self.lookup(kind, name)
            .map(|symbol| symbol.span.start_line)
            .unwrap_or(0)
    }

    fn conflict(&self, kind: SymbolKind, name: SmolStr, line: u32) -> ExtractError {
        ExtractError::DuplicateSymbol {
            line,
            previous_line: self.first_line(kind, &name),
            kind,
            name,
        }
    }

    fn redefined(&mut self, kind: SymbolKind, name: SmolStr, line: u32) {
        let first_line = self.first_line(kind, &name);
        self.warnings.push(Warning::IdenticalRedefinition {
            kind,
            name,
            line,
            first_line,
        });
    }

    pub(crate) fn add_typedef(
        &mut self,
        name: SmolStr,
        ty: TypeDescriptor,
        span: Span,
    ) -> Result<(), ExtractError> {
        match self.typedefs.get(&name) {
            Some(existing) if *existing == ty => {
                self.redefined(SymbolKind::TypedefAlias, name, span.start_line);
                Ok(())
            }
            Some(_) => Err(self.conflict(SymbolKind::TypedefAlias, name, span.start_line)),
            None => {
                self.insert_symbol(Symbol::new(name.clone(), SymbolKind::TypedefAlias, span));
                self.typedefs.insert(name, ty);
                Ok(())
            }
        }
    }

    pub(crate) fn add_struct(
        &mut self,
        aggregate: AggregateType,
        span: Span,
    ) -> Result<(), ExtractError> {
        let Some(name) = aggregate.tag.clone() else {
            return Ok(());
        };
        match self.structs.get(&name) {
            Some(existing) if *existing == aggregate => {
                self.redefined(SymbolKind::Struct, name, span.start_line);
                Ok(())
            }
            Some(_) => Err(self.conflict(SymbolKind::Struct, name, span.start_line)),
            None => {
                self.insert_symbol(Symbol::new(name.clone(), SymbolKind::Struct, span));
                self.structs.insert(name, aggregate);
                Ok(())
            }
        }
    }

    pub(crate) fn add_enum(&mut self, enumeration: EnumType, span: Span) -> Result<(), ExtractError> {
        match enumeration.tag.clone() {
            Some(name) => match self.enums.get(&name) {
                Some(existing) if *existing == enumeration => {
                    self.redefined(SymbolKind::Enum, name, span.start_line);
                    Ok(())
                }
                Some(_) => Err(self.conflict(SymbolKind::Enum, name, span.start_line)),
                None => {
                    self.add_enumerators(&enumeration, span.start_line)?;
                    self.insert_symbol(Symbol::new(name.clone(), SymbolKind::Enum, span));
                    self.enums.insert(name, enumeration);
                    Ok(())
                }
            },
            None => {
                self.add_enumerators(&enumeration, span.start_line)?;
                self.anonymous_enums.push(enumeration);
                Ok(())
            }
        }
    }

    fn add_enumerators(&mut self, enumeration: &EnumType, line: u32) -> Result<(), ExtractError> {
        for enumerator in &enumeration.enumerators {
            if let Some(&previous_line) = self.enumerator_lines.get(&enumerator.name) {
                return Err(ExtractError::DuplicateSymbol {
                    line,
                    kind: SymbolKind::Enumerator,
                    name: enumerator.name.clone(),
                    previous_line,
                });
            }
            self.enumerator_lines.insert(enumerator.name.clone(), line);
            self.enumerators
                .insert(enumerator.name.clone(), enumerator.value);
        }
        Ok(())
    }

    pub(crate) fn add_forward(&mut self, namespace: Namespace, name: SmolStr) {
        self.forward_declared.insert((namespace, name));
    }

    /// Store a prototype or definition.
    ///
    /// First declaration wins; later ones must agree with every stored one.
    /// A repeated prototype is dropped with a notice.
    pub(crate) fn add_function(&mut self, function: FunctionSignature) -> Result<(), ExtractError> {
        let line = function.span.start_line;
        let existing = self.function(&function.name);

        for previous in existing {
            if !previous.is_compatible_with(&function) || (previous.has_body && function.has_body)
            {
                return Err(ExtractError::DuplicateSymbol {
                    line,
                    kind: SymbolKind::Function,
                    name: function.name.clone(),
                    previous_line: previous.span.start_line,
                });
            }
        }

        if let Some(previous) = existing.iter().find(|p| p.is_repeat_of(&function)) {
            let first_line = previous.span.start_line;
            self.warnings.push(Warning::DuplicatePrototype {
                name: function.name,
                line,
                first_line,
            });
            return Ok(());
        }

        self.insert_symbol(Symbol::new(
            function.name.clone(),
            SymbolKind::Function,
            function.span,
        ));
        self.functions
            .entry(function.name.clone())
            .or_default()
            .push(function);
        Ok(())
    }

    pub(crate) fn set_includes(&mut self, includes: Vec<Include>) {
        self.includes = includes;
    }

    pub(crate) fn push_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub(crate) fn mark_incomplete(&mut self) {
        self.incomplete = true;
    }
}
