//! Position arithmetic for compound spans such as `Trait.sig`.

use files::{SourceLocation, SourcePosition};

/// A compound span split at its separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// The span of the qualifier, absent when the span could not be split.
    pub prefix: Option<SourceLocation>,
    pub suffix: SourceLocation,
}

impl Split {
    pub fn in_prefix(&self, position: SourcePosition) -> bool {
        self.prefix.is_some_and(|prefix| prefix.contains(position))
    }
}

/// Splits `loc`, written as `prefix.suffix`, into its two names.
///
/// The split only happens when the width of `loc` is exactly the width of
/// both names and the separator; otherwise the qualifier was not written out
/// and the whole span belongs to the suffix.
pub fn split_compound(loc: SourceLocation, prefix: &str, suffix: &str) -> Split {
    let prefix_width = prefix.chars().count() as u32;
    let suffix_width = suffix.chars().count() as u32;

    if loc.width() != Some(prefix_width + suffix_width + 1) {
        return Split { prefix: None, suffix: loc };
    }

    let separator = loc.start.column + prefix_width;
    let prefix = loc.columns(loc.start.column, separator);
    let suffix = loc.columns(separator + 1, loc.end.column);

    Split { prefix: Some(prefix), suffix }
}

#[cfg(test)]
mod tests {
    use files::{Files, SourceLocation, SourcePosition};

    use super::split_compound;

    #[test]
    fn splits_qualified_use() {
        let mut files = Files::default();
        let file = files.insert("Main.flint");

        // `Show.show` at columns 10..19
        let loc = SourceLocation::on_line(file, 4, 10, 19);
        let split = split_compound(loc, "Show", "show");

        let prefix = split.prefix.unwrap();
        assert_eq!(prefix, SourceLocation::on_line(file, 4, 10, 14));
        assert_eq!(prefix.width(), Some(4));
        assert_eq!(split.suffix, SourceLocation::on_line(file, 4, 15, 19));
        assert_eq!(split.suffix.width(), Some(4));

        assert!(split.in_prefix(SourcePosition::new(4, 13)));
        assert!(!split.in_prefix(SourcePosition::new(4, 14)));
        assert!(!split.in_prefix(SourcePosition::new(4, 15)));
    }

    #[test]
    fn unqualified_use_belongs_to_suffix() {
        let mut files = Files::default();
        let file = files.insert("Main.flint");

        let loc = SourceLocation::on_line(file, 2, 5, 9);
        let split = split_compound(loc, "Show", "show");

        assert_eq!(split.prefix, None);
        assert_eq!(split.suffix, loc);
        assert!(!split.in_prefix(SourcePosition::new(2, 5)));
    }
}
