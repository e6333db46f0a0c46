//! Common types and utilities for the modlower crates.
//!
//! This crate provides foundational types used across all modlower crates:
//! - Common enums (`ScriptTarget`)
//! - Recursion limits shared by the binder and the emitter

// Common types - Shared constants to break circular dependencies
pub mod common;
pub use common::ScriptTarget;

// Centralized limits and thresholds
pub mod limits;
