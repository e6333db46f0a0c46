//! Options for the System module transform.

use modlower_common::ScriptTarget;
use serde::{Deserialize, Serialize};

/// Settings shared by every file a transformer lowers.
///
/// Per-file settings (explicit module name, specifier renames) live on the
/// `SourceFile` itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemModuleOptions {
    /// Output language level; ES3 reads imports through element access.
    pub target: ScriptTarget,
    /// Dotted name of the registration function.
    pub register_function: String,
    /// Emit `"use strict";` at the top of the factory body.
    pub emit_use_strict: bool,
    /// Emit `var __moduleName = context_1 && context_1.id;`.
    pub emit_module_name_binding: bool,
}

impl Default for SystemModuleOptions {
    fn default() -> Self {
        Self {
            target: ScriptTarget::default(),
            register_function: "System.register".to_string(),
            emit_use_strict: true,
            emit_module_name_binding: true,
        }
    }
}

impl SystemModuleOptions {
    /// Parse options from a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_target(mut self, target: ScriptTarget) -> Self {
        self.target = target;
        self
    }
}

#[cfg(test)]
#[path = "../tests/options.rs"]
mod tests;
