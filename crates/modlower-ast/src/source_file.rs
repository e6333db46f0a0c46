//! Source file root node.

use crate::node::NodeId;
use crate::stmt::Stmt;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct SourceFile {
    pub id: NodeId,
    pub file_name: String,
    pub statements: Vec<Stmt>,
    /// Explicit module name (`/// <amd-module name="..."/>`), emitted as the
    /// first argument of the registration call.
    pub module_name: Option<String>,
    /// Specifier aliases supplied by a bundler: a specifier found as a key is
    /// grouped and registered under its value.
    pub renamed_dependencies: FxHashMap<String, String>,
}

impl SourceFile {
    pub fn new(id: NodeId, file_name: impl Into<String>, statements: Vec<Stmt>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            statements,
            module_name: None,
            renamed_dependencies: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_renamed_dependency(
        mut self,
        specifier: impl Into<String>,
        renamed: impl Into<String>,
    ) -> Self {
        self.renamed_dependencies
            .insert(specifier.into(), renamed.into());
        self
    }

    /// Applies the rename table to a module specifier.
    #[must_use]
    pub fn resolve_specifier<'a>(&'a self, specifier: &'a str) -> &'a str {
        self.renamed_dependencies
            .get(specifier)
            .map_or(specifier, String::as_str)
    }
}
