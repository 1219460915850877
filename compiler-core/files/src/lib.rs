//! A registry of the source files taking part in an analysis session.
//!
//! Unlike a virtual file system, [`Files`] does not store file contents.
//! Parsing happens elsewhere; this crate only hands out stable [`FileId`]
//! values and the [`SourceLocation`] model that every later phase uses
//! to point back into the source text.

mod location;

pub use location::*;

use std::fmt;

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(u32);

impl FileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Files {
    paths: IndexSet<SmolStr, FxBuildHasher>,
}

impl Files {
    /// Returns the [`FileId`] for `path`, allocating one if needed.
    pub fn insert(&mut self, path: impl Into<SmolStr>) -> FileId {
        let (index, _) = self.paths.insert_full(path.into());
        assert!(index < u32::MAX as usize);
        FileId(index as u32)
    }

    pub fn id(&self, path: &str) -> Option<FileId> {
        self.paths.get_index_of(path).map(|index| FileId(index as u32))
    }

    pub fn path(&self, id: FileId) -> Option<&str> {
        self.paths.get_index(id.index()).map(SmolStr::as_str)
    }

    pub fn iter_id(&self) -> impl Iterator<Item = FileId> + '_ {
        (0..self.paths.len()).map(|index| FileId(index as u32))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{FileId, Files};

    #[test]
    fn api() {
        let mut files = Files::default();

        let main = files.insert("Main.flint");
        let list = files.insert("List.flint");

        // Identity
        assert_eq!(files.insert("Main.flint"), main);
        assert_ne!(main, list);

        assert_eq!(files.id("List.flint"), Some(list));
        assert_eq!(files.id("Missing.flint"), None);
        assert_eq!(files.path(main), Some("Main.flint"));
        assert_eq!(files.path(FileId(7)), None);

        let ids: Vec<_> = files.iter_id().collect();
        assert_eq!(ids, [main, list]);
    }
}
