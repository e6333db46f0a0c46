//! Binder state: symbol and scope arenas plus the per-node symbol map.

use modlower_ast::{Ident, NodeId, SourceFile};
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span};

use crate::symbols::{Scope, ScopeId, ScopeKind, Symbol, SymbolFlags, SymbolId};

/// Counters reported after binding a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindingStats {
    pub symbols: usize,
    pub scopes: usize,
    pub resolved_references: usize,
    pub unresolved_references: usize,
}

#[derive(Debug, Default)]
pub struct BinderState {
    /// Id of the bound file; reported as the export container.
    pub(crate) file_id: Option<NodeId>,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) scopes: Vec<Scope>,
    /// Identifier node (binding or reference) -> symbol
    pub(crate) node_symbols: FxHashMap<NodeId, SymbolId>,
    /// Local export specifier -> symbol of its local name
    pub(crate) export_specifier_symbols: FxHashMap<NodeId, SymbolId>,
    pub(crate) scope_stack: Vec<ScopeId>,
    pub(crate) depth: u32,
    pub(crate) stats: BindingStats,
}

impl BinderState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a file, discarding any previous binding.
    pub fn bind_source_file(&mut self, file: &SourceFile) {
        let _span = debug_span!("bind_source_file", file = %file.file_name).entered();
        self.reset();
        self.file_id = Some(file.id);

        self.enter_scope(ScopeKind::Module);
        self.hoist_var_declarations(&file.statements);
        self.declare_lexical_declarations(&file.statements, true);
        self.bind_statements(&file.statements);
        self.mark_local_exports(&file.statements);
        self.exit_scope();

        self.stats.symbols = self.symbols.len();
        self.stats.scopes = self.scopes.len();
        debug!(
            symbols = self.stats.symbols,
            scopes = self.stats.scopes,
            resolved = self.stats.resolved_references,
            unresolved = self.stats.unresolved_references,
            "bound source file"
        );
    }

    /// Convenience constructor: a state bound to `file`.
    #[must_use]
    pub fn bind(file: &SourceFile) -> Self {
        let mut state = Self::new();
        state.bind_source_file(file);
        state
    }

    fn reset(&mut self) {
        self.file_id = None;
        self.symbols.clear();
        self.scopes.clear();
        self.node_symbols.clear();
        self.export_specifier_symbols.clear();
        self.scope_stack.clear();
        self.depth = 0;
        self.stats = BindingStats::default();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn stats(&self) -> BindingStats {
        self.stats
    }

    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    /// Symbol an identifier node declares or refers to.
    #[must_use]
    pub fn symbol_of(&self, ident: &Ident) -> Option<&Symbol> {
        if ident.id.is_synthetic() {
            return None;
        }
        self.node_symbols
            .get(&ident.id)
            .and_then(|&id| self.symbol(id))
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    pub(crate) fn enter_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes
            .push(Scope::new(kind, self.scope_stack.last().copied()));
        self.scope_stack.push(id);
        id
    }

    pub(crate) fn exit_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// Nearest scope on the stack that holds `var` declarations.
    fn var_container(&self) -> Option<ScopeId> {
        self.scope_stack.iter().rev().copied().find(|&id| {
            self.scopes
                .get(id.0 as usize)
                .is_some_and(|scope| scope.kind.is_var_container())
        })
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    /// Declare `ident` in the current scope, or in the nearest `var`
    /// container when `function_scoped` is set.
    ///
    /// Redeclaring a name in the same scope merges into the existing symbol
    /// and maps the new identifier node to it.
    pub(crate) fn declare_symbol(
        &mut self,
        ident: &Ident,
        flags: SymbolFlags,
        function_scoped: bool,
    ) -> Option<SymbolId> {
        let scope_id = if function_scoped {
            self.var_container()?
        } else {
            *self.scope_stack.last()?
        };
        let scope = self.scopes.get_mut(scope_id.0 as usize)?;

        let sym_id = if let Some(existing) = scope.get(&ident.name) {
            if let Some(sym) = self.symbols.get_mut(existing.0 as usize) {
                sym.flags |= flags;
            }
            existing
        } else {
            let sym_id = SymbolId(self.symbols.len() as u32);
            scope.symbols.insert(ident.name.clone(), sym_id);
            self.symbols.push(Symbol {
                name: ident.name.clone(),
                flags,
                declaration: ident.id,
                scope: scope_id,
                import: None,
            });
            sym_id
        };
        self.node_symbols.insert(ident.id, sym_id);
        Some(sym_id)
    }

    pub(crate) fn symbol_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    /// Look `name` up through the scope chain of the current scope.
    pub(crate) fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut current = self.scope_stack.last().copied();
        while let Some(scope_id) = current {
            let scope = self.scopes.get(scope_id.0 as usize)?;
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Resolve a reference and remember the result for its node.
    pub(crate) fn resolve_reference(&mut self, ident: &Ident) {
        if self.node_symbols.contains_key(&ident.id) {
            return;
        }
        match self.lookup(&ident.name) {
            Some(symbol) => {
                self.node_symbols.insert(ident.id, symbol);
                self.stats.resolved_references += 1;
            }
            None => self.stats.unresolved_references += 1,
        }
    }
}

#[cfg(test)]
#[path = "../tests/binder.rs"]
mod tests;
