use smol_str::SmolStr;

use crate::base::Span;
use crate::syntax::{Namespace, SymbolKind};

/// Unique identifier for a symbol in the arena.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Create a new SymbolId from an index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named top-level declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(serde::Serialize))]
pub struct Symbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub span: Span,
}

impl Symbol {
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            span,
        }
    }

    /// Returns true if this symbol can be used as a type
    pub fn is_type(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::TypedefAlias | SymbolKind::Struct | SymbolKind::Enum
        )
    }

    /// Namespace the symbol's name lives in, for type symbols
    pub fn namespace(&self) -> Option<Namespace> {
        match self.kind {
            SymbolKind::TypedefAlias => Some(Namespace::Typedef),
            SymbolKind::Struct => Some(Namespace::Struct),
            SymbolKind::Enum => Some(Namespace::Enum),
            SymbolKind::Function | SymbolKind::Enumerator => None,
        }
    }
}
