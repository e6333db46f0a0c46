//! Name generation and hoisted declarations for one file.
//!
//! `EmitContext` owns two things a transform needs while it rebuilds a
//! file:
//! - collision-free generated names (`exports_1`, `dep_1`, `_a`, ...)
//! - a stack of lexical environments collecting `var` names and function
//!   declarations that must be emitted at the top of the enclosing function
//!
//! The bottom environment is the module factory body. Every function body
//! the transform rebuilds pushes its own environment, so temporaries created
//! inside a function are declared in that function.

use indexmap::IndexSet;
use modlower_ast::walk::collect_identifier_names;
use modlower_ast::{SourceFile, Stmt};
use modlower_common::limits::MAX_UNIQUE_NAME_ATTEMPTS;
use rustc_hash::FxHashSet;
use tracing::trace;

#[derive(Debug, Default)]
struct LexicalEnvironment {
    variables: IndexSet<String>,
    functions: Vec<Stmt>,
}

#[derive(Debug, Default)]
pub struct EmitContext {
    /// Names present in the file plus every name generated so far.
    used_names: FxHashSet<String>,
    temp_count: u32,
    environments: Vec<LexicalEnvironment>,
}

impl EmitContext {
    #[must_use]
    pub fn new(used_names: FxHashSet<String>) -> Self {
        Self {
            used_names,
            temp_count: 0,
            environments: Vec::new(),
        }
    }

    /// Context whose generated names avoid every name in `file`.
    #[must_use]
    pub fn for_source_file(file: &SourceFile) -> Self {
        Self::new(collect_identifier_names(file))
    }

    #[must_use]
    pub fn is_name_used(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    // =========================================================================
    // Unique names
    // =========================================================================

    /// `base_1`, `base_2`, ...: the first candidate not used in the file or
    /// generated before. A base already ending in `_` (including the empty
    /// base, which yields `_1`) gets no second underscore.
    pub fn unique_name(&mut self, base: &str) -> String {
        let prefix = if base.ends_with('_') {
            base.to_string()
        } else {
            format!("{base}_")
        };
        for suffix in 1..=MAX_UNIQUE_NAME_ATTEMPTS {
            let candidate = format!("{prefix}{suffix}");
            if self.used_names.insert(candidate.clone()) {
                return candidate;
            }
        }
        let fallback = format!("{prefix}{}", MAX_UNIQUE_NAME_ATTEMPTS + 1);
        self.used_names.insert(fallback.clone());
        fallback
    }

    /// Temporary name: `_a` through `_z`, then `_27`, `_28`, ...
    pub fn temp_name(&mut self) -> String {
        loop {
            let index = self.temp_count;
            self.temp_count += 1;
            let candidate = if index < 26 {
                format!("_{}", char::from(b'a' + index as u8))
            } else {
                format!("_{}", index + 1)
            };
            if self.used_names.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// A fresh temporary declared in the current lexical environment.
    pub fn create_temp_variable(&mut self) -> String {
        let name = self.temp_name();
        self.hoist_variable_declaration(&name);
        name
    }

    // =========================================================================
    // Lexical environments
    // =========================================================================

    pub fn start_lexical_environment(&mut self) {
        self.environments.push(LexicalEnvironment::default());
    }

    /// Pop the current environment and return its declarations: one `var`
    /// statement for the hoisted names (if any), then the hoisted functions.
    pub fn end_lexical_environment(&mut self) -> Vec<Stmt> {
        let Some(environment) = self.environments.pop() else {
            return Vec::new();
        };
        let mut statements = Vec::with_capacity(environment.functions.len() + 1);
        if !environment.variables.is_empty() {
            let names: Vec<&str> = environment.variables.iter().map(String::as_str).collect();
            statements.push(Stmt::var_names(&names));
        }
        statements.extend(environment.functions);
        statements
    }

    /// Like [`end_lexical_environment`](Self::end_lexical_environment), but
    /// keeps the `var` statement and the functions apart.
    pub fn end_lexical_environment_split(&mut self) -> (Option<Stmt>, Vec<Stmt>) {
        let Some(environment) = self.environments.pop() else {
            return (None, Vec::new());
        };
        let variables = (!environment.variables.is_empty()).then(|| {
            let names: Vec<&str> = environment.variables.iter().map(String::as_str).collect();
            Stmt::var_names(&names)
        });
        (variables, environment.functions)
    }

    /// Declare `name` as a `var` of the current environment. Repeated
    /// declarations of one name are merged.
    pub fn hoist_variable_declaration(&mut self, name: &str) {
        if let Some(environment) = self.environments.last_mut()
            && !environment.variables.contains(name)
        {
            trace!(name, "hoisted variable");
            environment.variables.insert(name.to_string());
        }
    }

    /// Emit `decl` at the top of the current environment.
    pub fn hoist_function_declaration(&mut self, decl: Stmt) {
        if let Some(environment) = self.environments.last_mut() {
            environment.functions.push(decl);
        }
    }

    #[must_use]
    pub fn environment_depth(&self) -> usize {
        self.environments.len()
    }
}

#[cfg(test)]
#[path = "../tests/emit_context.rs"]
mod tests;
