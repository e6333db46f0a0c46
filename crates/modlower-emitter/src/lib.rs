//! System.register lowering for modlower.
//!
//! This crate provides:
//! - `transforms` - the System module transform and the analyses it runs
//!   (module info collection, dependency grouping, destructuring flattening)
//! - `emit_context` - unique names and hoisted declarations for one file
//! - `printer` - JavaScript text for the produced tree

pub mod emit_context;
pub mod error;
pub mod options;
pub mod printer;
pub mod transforms;

pub use emit_context::EmitContext;
pub use error::TransformError;
pub use options::SystemModuleOptions;
pub use printer::{Emit, Printer};
pub use transforms::module_system::{LoweredModule, SystemModuleTransformer};
