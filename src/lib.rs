//! Lowers ECMAScript modules to the `System.register` loader format.
//!
//! The work is split across the workspace crates and re-exported here:
//! - [`ast`] - the module syntax tree and node builders
//! - [`binder`] - scope binding and the [`Resolver`] queries
//! - [`emitter`] - the System transform and the JavaScript printer
//!
//! [`batch`] ties them together for a list of files.

pub use modlower_ast as ast;
pub use modlower_binder as binder;
pub use modlower_common as common;
pub use modlower_emitter as emitter;

pub use modlower_binder::{BinderState, Resolver};
pub use modlower_common::ScriptTarget;
pub use modlower_emitter::{
    LoweredModule, Printer, SystemModuleOptions, SystemModuleTransformer, TransformError,
};

pub mod batch;
pub use batch::{LoweredFile, lower_files, lower_files_with_json_options, lower_source_file};

pub mod tracing_config;
