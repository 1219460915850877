//! Renaming every occurrence of the entity under the cursor.

use std::collections::BTreeMap;

use ast::typed::Root;
use files::{FileId, SourceLocation, SourcePosition};
use serde::Serialize;
use smol_str::SmolStr;

use crate::locate::target_at;
use crate::occurrences::occurrences;

/// Replaces the text at `loc` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub loc: SourceLocation,
    pub new_text: SmolStr,
}

/// Edits grouped by file, each group ordered by location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkspaceEdit {
    pub changes: BTreeMap<FileId, Vec<TextEdit>>,
}

impl WorkspaceEdit {
    pub fn edits(&self) -> impl Iterator<Item = &TextEdit> {
        self.changes.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.changes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenameResult {
    Success(WorkspaceEdit),
    InvalidRequest(String),
}

/// Renames the entity at `position` to `new_name`.
///
/// Nothing renameable at the position is reported as
/// [`RenameResult::InvalidRequest`].
#[tracing::instrument(skip_all, name = "process_rename")]
pub fn process_rename(
    root: &Root,
    new_name: &str,
    file: FileId,
    position: SourcePosition,
) -> RenameResult {
    let Some(target) = target_at(root, file, position) else {
        let message = match root.files.path(file) {
            Some(path) => format!("Nothing found in '{path}' at {position}."),
            None => format!("Nothing found in unknown file {file} at {position}."),
        };
        return RenameResult::InvalidRequest(message);
    };

    let new_text = SmolStr::new(new_name);
    let mut changes: BTreeMap<FileId, Vec<TextEdit>> = BTreeMap::new();
    for loc in occurrences(root, &target) {
        let edit = TextEdit { loc, new_text: new_text.clone() };
        changes.entry(loc.file).or_default().push(edit);
    }

    tracing::debug!(%target, files = changes.len(), "renaming");
    RenameResult::Success(WorkspaceEdit { changes })
}
