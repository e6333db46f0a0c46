//! Module-format transforms.
//!
//! `module_system` lowers a bound source file to a `System.register` call.
//! It runs the analyses in this module first:
//! - `module_info` - the file's import/export constructs
//! - `dependency_groups` - external imports grouped by specifier
//!
//! and rewrites destructuring through `destructuring`.

pub mod dependency_groups;
mod destructuring;
pub mod helpers;
pub mod module_info;
pub mod module_system;
