//! Tracing configuration for inspecting a lowering run.
//!
//! Supports three output formats controlled by `MODLOWER_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one span per
//!   lowered file
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! MODLOWER_LOG=debug MODLOWER_LOG_FORMAT=tree cargo test
//! MODLOWER_LOG="modlower_emitter=trace" cargo test
//! ```
//!
//! The subscriber is only installed when `MODLOWER_LOG` (or `RUST_LOG`) is
//! set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `MODLOWER_LOG_FORMAT` value; anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("MODLOWER_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `MODLOWER_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("MODLOWER_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global tracing subscriber.
///
/// Does nothing when neither `MODLOWER_LOG` nor `RUST_LOG` is set, or when a
/// subscriber is already installed. Output goes to stderr.
pub fn init_tracing() {
    let has_own_log = std::env::var("MODLOWER_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_own_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    // `try_init` keeps the first subscriber when called more than once.
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            let _ = Registry::default().with(filter).with(tree_layer).try_init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            let _ = Registry::default().with(filter).with(json_layer).try_init();
        }
        LogFormat::Text => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
