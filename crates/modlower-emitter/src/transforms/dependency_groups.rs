//! Grouping of external imports by module specifier.

use indexmap::IndexMap;
use modlower_ast::SourceFile;
use tracing::trace;

use crate::error::TransformError;
use crate::transforms::module_info::ExternalImportEntry;

/// Every import/re-export of one module, serviced by one setter.
#[derive(Clone, Debug)]
pub struct DependencyGroup<'a> {
    /// Specifier text after the file's rename table is applied.
    pub name: String,
    /// Entries in source order.
    pub entries: Vec<ExternalImportEntry<'a>>,
}

/// Groups `entries` by specifier. Groups are ordered by the first occurrence
/// of their specifier; entries keep source order within a group.
pub fn group_dependencies<'a>(
    file: &SourceFile,
    entries: &[ExternalImportEntry<'a>],
) -> Result<Vec<DependencyGroup<'a>>, TransformError> {
    let mut groups: IndexMap<String, Vec<ExternalImportEntry<'a>>> = IndexMap::new();
    for &entry in entries {
        let Some(text) = entry.specifier().as_string_literal() else {
            return Err(TransformError::UnreadableSpecifier {
                file: file.file_name.clone(),
                span: entry.span(),
            });
        };
        let name = file.resolve_specifier(text);
        trace!(specifier = text, group = name, "grouping dependency");
        groups.entry(name.to_string()).or_default().push(entry);
    }
    Ok(groups
        .into_iter()
        .map(|(name, entries)| DependencyGroup { name, entries })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/dependency_groups.rs"]
mod tests;
