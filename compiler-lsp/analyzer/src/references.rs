use ast::typed::Root;
use files::{FileId, SourceLocation, SourcePosition};

use crate::locate::target_at;
use crate::occurrences::occurrences;

/// Every occurrence of the entity at `position`, declaration included.
#[tracing::instrument(skip_all, name = "find_references")]
pub fn find_references(
    root: &Root,
    file: FileId,
    position: SourcePosition,
) -> Option<Vec<SourceLocation>> {
    let target = target_at(root, file, position)?;
    Some(occurrences(root, &target))
}
