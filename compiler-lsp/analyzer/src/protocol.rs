//! Conversions between analyzer results and `lsp_types`.
//!
//! Locations are 1-based, protocol positions are 0-based.

use std::collections::HashMap;

use async_lsp::lsp_types::{
    self, Diagnostic, DiagnosticSeverity, DiagnosticTag, HoverContents, Location, MarkupContent,
    MarkupKind, Position, Range, Url,
};
use files::{FileId, Files, SourceLocation, SourcePosition};

use crate::AnalyzerError;
use crate::hints::{Hint, HintKind};
use crate::hover::Hover;
use crate::rename::WorkspaceEdit;

pub fn to_position(position: SourcePosition) -> Position {
    let line = position.line.saturating_sub(1);
    let character = position.column.saturating_sub(1);
    Position { line, character }
}

pub fn from_position(position: Position) -> SourcePosition {
    SourcePosition::new(position.line + 1, position.character + 1)
}

pub fn to_range(loc: SourceLocation) -> Range {
    Range { start: to_position(loc.start), end: to_position(loc.end) }
}

/// The URI of a registered file; plain paths become `file://` URIs.
pub fn to_url(files: &Files, file: FileId) -> Result<Url, AnalyzerError> {
    let path = files.path(file).ok_or(AnalyzerError::UnknownFile(file))?;
    match Url::parse(path) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = path.trim_start_matches('/');
            Ok(Url::parse(&format!("file:///{path}"))?)
        }
        Err(error) => Err(error.into()),
    }
}

/// Finds a registered file by URI, accepting both URIs and plain paths.
pub fn from_url(files: &Files, url: &Url) -> Option<FileId> {
    files.id(url.as_str()).or_else(|| {
        let path = url.path();
        files.id(path).or_else(|| files.id(path.trim_start_matches('/')))
    })
}

pub fn to_location(files: &Files, loc: SourceLocation) -> Result<Location, AnalyzerError> {
    let uri = to_url(files, loc.file)?;
    Ok(Location { uri, range: to_range(loc) })
}

pub fn to_locations(
    files: &Files,
    locations: &[SourceLocation],
) -> Result<Vec<Location>, AnalyzerError> {
    locations.iter().map(|&loc| to_location(files, loc)).collect()
}

pub fn to_workspace_edit(
    files: &Files,
    edit: &WorkspaceEdit,
) -> Result<lsp_types::WorkspaceEdit, AnalyzerError> {
    let mut changes = HashMap::new();
    for (&file, edits) in &edit.changes {
        let uri = to_url(files, file)?;
        let edits = edits
            .iter()
            .map(|edit| lsp_types::TextEdit {
                range: to_range(edit.loc),
                new_text: edit.new_text.to_string(),
            })
            .collect();
        changes.insert(uri, edits);
    }
    Ok(lsp_types::WorkspaceEdit::new(changes))
}

pub fn to_hover(hover: &Hover) -> lsp_types::Hover {
    let contents = HoverContents::Markup(MarkupContent {
        kind: MarkupKind::Markdown,
        value: hover.contents.clone(),
    });
    lsp_types::Hover { contents, range: Some(to_range(hover.loc)) }
}

pub fn to_diagnostic(hint: &Hint) -> Diagnostic {
    let (message, tags) = match hint.kind {
        HintKind::Deprecated => {
            ("Use of deprecated declaration.", Some(vec![DiagnosticTag::DEPRECATED]))
        }
        HintKind::Experimental => ("Use of experimental declaration.", None),
    };
    Diagnostic {
        range: to_range(hint.loc),
        severity: Some(DiagnosticSeverity::HINT),
        source: Some("flint".to_string()),
        message: message.to_string(),
        tags,
        ..Diagnostic::default()
    }
}

#[cfg(test)]
mod tests {
    use async_lsp::lsp_types::{DiagnosticTag, Position};
    use files::{Files, SourceLocation, SourcePosition};
    use smol_str::SmolStr;

    use super::*;
    use crate::rename::TextEdit;

    #[test]
    fn positions_are_zero_based() {
        let position = to_position(SourcePosition::new(3, 7));
        assert_eq!(position, Position { line: 2, character: 6 });
        assert_eq!(from_position(position), SourcePosition::new(3, 7));
    }

    #[test]
    fn plain_paths_become_file_urls() {
        let mut files = Files::default();
        let main = files.insert("src/Main.flint");
        let remote = files.insert("untitled:Scratch.flint");

        let url = to_url(&files, main).unwrap();
        assert_eq!(url.as_str(), "file:///src/Main.flint");
        assert_eq!(from_url(&files, &url), Some(main));

        let url = to_url(&files, remote).unwrap();
        assert_eq!(url.as_str(), "untitled:Scratch.flint");
        assert_eq!(from_url(&files, &url), Some(remote));
    }

    #[test]
    fn workspace_edit_per_file() {
        let mut files = Files::default();
        let main = files.insert("Main.flint");
        let list = files.insert("List.flint");

        let mut edit = WorkspaceEdit::default();
        for loc in [
            SourceLocation::on_line(main, 1, 5, 8),
            SourceLocation::on_line(main, 4, 12, 15),
            SourceLocation::on_line(list, 2, 1, 4),
        ] {
            let text_edit = TextEdit { loc, new_text: SmolStr::new("bar") };
            edit.changes.entry(loc.file).or_default().push(text_edit);
        }

        let converted = to_workspace_edit(&files, &edit).unwrap();
        let changes = converted.changes.unwrap();
        assert_eq!(changes.len(), 2);

        let main_url = to_url(&files, main).unwrap();
        let main_edits = &changes[&main_url];
        assert_eq!(main_edits.len(), 2);
        assert_eq!(main_edits[1].range.start, Position { line: 3, character: 11 });
        assert_eq!(main_edits[1].new_text, "bar");
    }

    #[test]
    fn deprecated_hint_is_tagged() {
        let mut files = Files::default();
        let main = files.insert("Main.flint");
        let loc = SourceLocation::on_line(main, 1, 1, 4);
        let hint = Hint { kind: HintKind::Deprecated, loc };

        let diagnostic = to_diagnostic(&hint);
        assert_eq!(diagnostic.tags, Some(vec![DiagnosticTag::DEPRECATED]));
        assert_eq!(diagnostic.range.end, Position { line: 0, character: 3 });
    }

    #[test]
    fn unknown_file_is_an_error() {
        let files = Files::default();
        let mut other = Files::default();
        let file = other.insert("Main.flint");
        assert!(to_url(&files, file).is_err());
    }
}
