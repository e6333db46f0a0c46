//! Batch lowering: bind and lower a set of files with one transformer.

use anyhow::{Context, Result};
use modlower_ast::SourceFile;
use modlower_binder::BinderState;
use modlower_emitter::{Printer, SystemModuleOptions, SystemModuleTransformer};
use serde::Serialize;
use tracing::{debug, debug_span};

/// JavaScript produced for one input file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoweredFile {
    pub file_name: String,
    /// Dependency names in setter order.
    pub dependencies: Vec<String>,
    pub code: String,
}

/// Lower every file in order, stopping at the first failure.
///
/// The error names the file that failed.
pub fn lower_files(files: &[SourceFile], options: SystemModuleOptions) -> Result<Vec<LoweredFile>> {
    let _span = debug_span!("lower_files", files = files.len()).entered();
    let mut transformer = SystemModuleTransformer::new(options);
    let mut lowered = Vec::with_capacity(files.len());
    for file in files {
        lowered.push(lower_with(&mut transformer, file)?);
    }
    debug!(files = lowered.len(), "lowered batch");
    Ok(lowered)
}

/// Like [`lower_files`], with options given as a JSON object
/// (`{"target": "es5", "registerFunction": "System.register"}`).
pub fn lower_files_with_json_options(
    files: &[SourceFile],
    options_json: &str,
) -> Result<Vec<LoweredFile>> {
    let options =
        SystemModuleOptions::from_json(options_json).context("invalid lowering options")?;
    lower_files(files, options)
}

/// Lower a single file.
pub fn lower_source_file(file: &SourceFile, options: SystemModuleOptions) -> Result<LoweredFile> {
    lower_with(&mut SystemModuleTransformer::new(options), file)
}

fn lower_with(
    transformer: &mut SystemModuleTransformer,
    file: &SourceFile,
) -> Result<LoweredFile> {
    let binder = BinderState::bind(file);
    let lowered = transformer
        .transform_source_file(file, &binder)
        .with_context(|| format!("failed to lower {}", file.file_name))?;
    Ok(LoweredFile {
        file_name: file.file_name.clone(),
        dependencies: lowered.dependencies,
        code: Printer::emit_to_string(&lowered.statement),
    })
}

/// Serialize a batch result as a JSON array.
pub fn to_json(files: &[LoweredFile]) -> Result<String> {
    serde_json::to_string_pretty(files).context("failed to serialize lowered files")
}
