//! Symbols and scopes produced by binding.

use bitflags::bitflags;
use modlower_ast::NodeId;
use rustc_hash::FxHashMap;

use crate::ImportBinding;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u32 {
        /// `var` or an internal `import x = a.b`
        const FUNCTION_SCOPED_VARIABLE = 1 << 0;
        /// `let` / `const`
        const BLOCK_SCOPED_VARIABLE = 1 << 1;
        const FUNCTION = 1 << 2;
        const CLASS = 1 << 3;
        const PARAMETER = 1 << 4;
        const CATCH_VARIABLE = 1 << 5;
        /// Import binding or import-equals declaration.
        const ALIAS = 1 << 6;
        /// Erased at runtime: `import type`, interfaces, `declare` bindings.
        const TYPE_ONLY = 1 << 7;
        /// Exported by the source file.
        const EXPORTED = 1 << 8;

        const VALUE = Self::FUNCTION_SCOPED_VARIABLE.bits()
            | Self::BLOCK_SCOPED_VARIABLE.bits()
            | Self::FUNCTION.bits()
            | Self::CLASS.bits()
            | Self::PARAMETER.bits()
            | Self::CATCH_VARIABLE.bits()
            | Self::ALIAS.bits();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

#[derive(Clone, Debug)]
pub struct Symbol {
    pub name: String,
    pub flags: SymbolFlags,
    /// Id of the first binding identifier that declared the symbol.
    pub declaration: NodeId,
    pub scope: ScopeId,
    /// Set for import bindings.
    pub import: Option<ImportBinding>,
}

impl Symbol {
    #[must_use]
    pub fn is_value(&self) -> bool {
        self.flags.intersects(SymbolFlags::VALUE) && !self.flags.contains(SymbolFlags::TYPE_ONLY)
    }

    #[must_use]
    pub const fn is_exported(&self) -> bool {
        self.flags.contains(SymbolFlags::EXPORTED)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Function,
    Block,
    Catch,
    /// Holds only the name of a named function or class expression.
    ExpressionName,
}

impl ScopeKind {
    /// `var` declarations stop at these scopes.
    #[must_use]
    pub const fn is_var_container(self) -> bool {
        matches!(self, Self::Module | Self::Function)
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub symbols: FxHashMap<String, SymbolId>,
}

impl Scope {
    #[must_use]
    pub fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            symbols: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }
}
