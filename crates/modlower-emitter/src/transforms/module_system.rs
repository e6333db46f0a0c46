//! System module transform.
//!
//! Lowers one bound ES module to a single registration call:
//!
//! ```javascript
//! System.register(["dep"], function (exports_1, context_1) {
//!     "use strict";
//!     var dep_1, counter;
//!     var __moduleName = context_1 && context_1.id;
//!     function bump() {
//!         exports_1("counter", counter = counter + dep_1.step);
//!     }
//!     exports_1("bump", bump);
//!     return {
//!         setters: [
//!             function (dep_1_1) {
//!                 dep_1 = dep_1_1;
//!             }
//!         ],
//!         execute: function () {
//!             exports_1("counter", counter = 0);
//!         }
//!     };
//! });
//! ```
//!
//! The pass runs in two stages. `ModuleInfo` and the dependency groups are
//! computed from the input first; the rewrite then walks the file once:
//! - top-level declarations become hoisted `var`s plus assignments
//! - imported names are read off the module alias a setter fills in
//! - writes to exported names are routed through the exporter
//!
//! Everything it produces is rebuilt from the input; the input tree is only
//! read.
//!
//! The rewrite is split across:
//! - `module_system_statements.rs` - statement rewriting and hoisting
//! - `module_system_substitution.rs` - expression substitution
//! - `module_system_assembly.rs` - setters, the star-export helper and the
//!   registration call

use indexmap::IndexSet;
use modlower_ast::{Expr, NodeId, SourceFile, Stmt};
use modlower_binder::Resolver;
use modlower_common::limits::MAX_AST_DEPTH;
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span};

use crate::emit_context::EmitContext;
use crate::error::TransformError;
use crate::options::SystemModuleOptions;
use crate::transforms::dependency_groups::group_dependencies;
use crate::transforms::module_info::ModuleInfo;

#[path = "module_system_assembly.rs"]
mod assembly;
#[path = "module_system_statements.rs"]
mod statements;
#[path = "module_system_substitution.rs"]
mod substitution;

/// Result of lowering one file.
#[derive(Clone, Debug, PartialEq)]
pub struct LoweredModule {
    /// Dependency names in setter order.
    pub dependencies: Vec<String>,
    /// Number of setter functions; always `dependencies.len()`.
    pub setter_count: usize,
    /// The registration call statement.
    pub statement: Stmt,
}

/// State that lives exactly as long as one file's transform.
#[derive(Debug)]
pub(crate) struct FileTransformState {
    pub(crate) file_name: String,
    /// Name of the exporter parameter (`exports_1`).
    pub(crate) exporter: String,
    /// Name of the context parameter (`context_1`).
    pub(crate) context: String,
    /// Locally exported names, in declaration order.
    pub(crate) exported_names: IndexSet<String>,
    /// Export calls for hoisted functions, emitted before `execute`.
    pub(crate) pending_function_exports: Vec<Stmt>,
}

impl FileTransformState {
    fn new(file: &SourceFile, ctx: &mut EmitContext) -> Self {
        Self {
            file_name: file.file_name.clone(),
            exporter: ctx.unique_name("exports"),
            context: ctx.unique_name("context"),
            exported_names: IndexSet::new(),
            pending_function_exports: Vec::new(),
        }
    }
}

/// Lowers ES modules to `System.register` calls.
///
/// One transformer can lower any number of files, one at a time.
#[derive(Debug)]
pub struct SystemModuleTransformer {
    options: SystemModuleOptions,
    current: Option<FileTransformState>,
}

impl SystemModuleTransformer {
    #[must_use]
    pub const fn new(options: SystemModuleOptions) -> Self {
        Self {
            options,
            current: None,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &SystemModuleOptions {
        &self.options
    }

    /// Whether a file is being lowered right now.
    #[must_use]
    pub const fn is_in_file(&self) -> bool {
        self.current.is_some()
    }

    /// Lower `file`, resolving its names through `resolver`.
    ///
    /// `resolver` must have been bound to `file`.
    pub fn transform_source_file<R: Resolver + ?Sized>(
        &mut self,
        file: &SourceFile,
        resolver: &R,
    ) -> Result<LoweredModule, TransformError> {
        let _span = debug_span!("system_module", file = %file.file_name).entered();

        let options = self.options.clone();
        let mut ctx = EmitContext::for_source_file(file);
        let state = FileTransformState::new(file, &mut ctx);
        let state = self.begin_file(state);

        let result = lower_file(&options, file, resolver, state, ctx);
        self.end_file();
        result
    }

    /// Install the state of a new file.
    ///
    /// # Panics
    ///
    /// Panics if the previous file's state was not cleared.
    pub(crate) fn begin_file(&mut self, state: FileTransformState) -> &mut FileTransformState {
        assert!(
            self.current.is_none(),
            "began lowering {} while {} was still in progress",
            state.file_name,
            self.current
                .as_ref()
                .map_or("<none>", |current| current.file_name.as_str()),
        );
        self.current.insert(state)
    }

    pub(crate) fn end_file(&mut self) {
        self.current = None;
    }
}

fn lower_file<R: Resolver + ?Sized>(
    options: &SystemModuleOptions,
    file: &SourceFile,
    resolver: &R,
    state: &mut FileTransformState,
    ctx: EmitContext,
) -> Result<LoweredModule, TransformError> {
    let info = ModuleInfo::collect(file, resolver);
    let groups = group_dependencies(file, &info.external_imports)?;
    debug!(groups = groups.len(), "grouped dependencies");

    let mut transform = FileTransform {
        options,
        resolver,
        file,
        info,
        state,
        ctx,
        aliases: FxHashMap::default(),
        needs_rest_helper: false,
        depth: 0,
    };
    transform.ctx.start_lexical_environment();
    transform.assign_module_aliases();

    let execute_body = transform.visit_top_level_statements(&file.statements)?;
    let statement = transform.assemble(&groups, execute_body)?;

    Ok(LoweredModule {
        dependencies: groups.iter().map(|group| group.name.clone()).collect(),
        setter_count: groups.len(),
        statement,
    })
}

/// The rewrite of one file.
pub(crate) struct FileTransform<'a, R: ?Sized> {
    pub(crate) options: &'a SystemModuleOptions,
    pub(crate) resolver: &'a R,
    pub(crate) file: &'a SourceFile,
    pub(crate) info: ModuleInfo<'a>,
    pub(crate) state: &'a mut FileTransformState,
    pub(crate) ctx: EmitContext,
    /// Local alias of each external import, keyed by declaration id.
    pub(crate) aliases: FxHashMap<NodeId, String>,
    pub(crate) needs_rest_helper: bool,
    depth: u32,
}

impl<R: Resolver + ?Sized> FileTransform<'_, R> {
    pub(crate) fn enter_node(&mut self) -> Result<(), TransformError> {
        if self.depth >= MAX_AST_DEPTH {
            return Err(TransformError::MaxDepthExceeded {
                file: self.state.file_name.clone(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) const fn exit_node(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// `exports_1("name", value)`
    pub(crate) fn export_call(&self, name: &str, value: Expr) -> Expr {
        Expr::call(
            Expr::id(self.state.exporter.as_str()),
            vec![Expr::string(name), value],
        )
    }
}

#[cfg(test)]
#[path = "../../tests/module_system.rs"]
mod tests;
