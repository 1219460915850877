//! Position ranges over source files.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FileId;

/// A 1-based `(line, column)` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub const fn new(line: u32, column: u32) -> SourcePosition {
        SourcePosition { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` within a single file.
///
/// Locations are ordered by file and then by start position. Locations
/// introduced by desugaring are marked as synthetic through [`real`]; they
/// never take part in occurrence search or rename.
///
/// [`real`]: SourceLocation::real
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: FileId,
    pub start: SourcePosition,
    pub end: SourcePosition,
    #[serde(default = "default_real")]
    pub real: bool,
}

fn default_real() -> bool {
    true
}

impl SourceLocation {
    pub fn new(file: FileId, start: SourcePosition, end: SourcePosition) -> SourceLocation {
        SourceLocation { file, start, end, real: true }
    }

    /// Creates a location on a single line spanning `[start_column, end_column)`.
    pub fn on_line(file: FileId, line: u32, start_column: u32, end_column: u32) -> SourceLocation {
        let start = SourcePosition::new(line, start_column);
        let end = SourcePosition::new(line, end_column);
        SourceLocation::new(file, start, end)
    }

    /// Marks this location as synthesized.
    pub fn synthetic(self) -> SourceLocation {
        SourceLocation { real: false, ..self }
    }

    pub fn is_real(&self) -> bool {
        self.real
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Number of columns covered by a single-line location.
    pub fn width(&self) -> Option<u32> {
        if self.is_single_line() { self.end.column.checked_sub(self.start.column) } else { None }
    }

    pub fn contains(&self, position: SourcePosition) -> bool {
        self.start <= position && position < self.end
    }

    pub fn contains_location(&self, other: &SourceLocation) -> bool {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &SourceLocation) -> bool {
        self.file == other.file && self.start < other.end && other.start < self.end
    }

    /// Creates a sub-span on the starting line of this location.
    pub fn columns(&self, start_column: u32, end_column: u32) -> SourceLocation {
        let start = SourcePosition::new(self.start.line, start_column);
        let end = SourcePosition::new(self.start.line, end_column);
        SourceLocation { start, end, ..*self }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}-{}", self.file, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Files, SourceLocation, SourcePosition};

    #[test]
    fn containment_is_half_open() {
        let mut files = Files::default();
        let file = files.insert("Main.flint");

        let location = SourceLocation::on_line(file, 3, 5, 9);

        assert!(!location.contains(SourcePosition::new(3, 4)));
        assert!(location.contains(SourcePosition::new(3, 5)));
        assert!(location.contains(SourcePosition::new(3, 8)));
        assert!(!location.contains(SourcePosition::new(3, 9)));
        assert!(!location.contains(SourcePosition::new(4, 6)));
    }

    #[test]
    fn nested_locations() {
        let mut files = Files::default();
        let main = files.insert("Main.flint");
        let list = files.insert("List.flint");

        let outer = SourceLocation::new(main, SourcePosition::new(1, 1), SourcePosition::new(4, 2));
        let inner = SourceLocation::on_line(main, 2, 5, 10);
        let elsewhere = SourceLocation::on_line(list, 2, 5, 10);

        assert!(outer.contains_location(&inner));
        assert!(!inner.contains_location(&outer));
        assert!(!outer.contains_location(&elsewhere));
        assert!(outer.overlaps(&inner));
        assert!(!inner.overlaps(&SourceLocation::on_line(main, 2, 10, 12)));
    }

    #[test]
    fn ordering_is_by_file_then_start() {
        let mut files = Files::default();
        let main = files.insert("Main.flint");
        let list = files.insert("List.flint");

        let mut locations = vec![
            SourceLocation::on_line(list, 1, 1, 4),
            SourceLocation::on_line(main, 2, 1, 4),
            SourceLocation::on_line(main, 1, 7, 9),
        ];
        locations.sort();

        assert_eq!(
            locations,
            [
                SourceLocation::on_line(main, 1, 7, 9),
                SourceLocation::on_line(main, 2, 1, 4),
                SourceLocation::on_line(list, 1, 1, 4),
            ]
        );
    }

    #[test]
    fn width_and_columns() {
        let mut files = Files::default();
        let file = files.insert("Main.flint");

        let location = SourceLocation::on_line(file, 7, 3, 12);
        assert_eq!(location.width(), Some(9));
        assert_eq!(location.columns(3, 8), SourceLocation::on_line(file, 7, 3, 8));

        let multi = SourceLocation::new(file, SourcePosition::new(1, 1), SourcePosition::new(2, 1));
        assert_eq!(multi.width(), None);

        let synthetic = location.synthetic();
        assert!(!synthetic.is_real());
        assert!(!synthetic.columns(3, 5).is_real());
    }
}
