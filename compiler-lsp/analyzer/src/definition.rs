use ast::typed::Root;
use files::{FileId, SourceLocation, SourcePosition};

use crate::locate::{Target, target_at};

/// The declaration site of the entity at `position`.
#[tracing::instrument(skip_all, name = "goto_definition")]
pub fn goto_definition(
    root: &Root,
    file: FileId,
    position: SourcePosition,
) -> Option<SourceLocation> {
    match target_at(root, file, position)? {
        Target::Symbol(symbol) => Some(symbol.loc()),
        Target::Predicate(name) => root.relation(&name).map(|relation| relation.name.loc),
    }
}
