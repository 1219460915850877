use files::{FileId, SourceLocation, SourcePosition};

/// Decides whether the visitor descends into a located node.
///
/// A rejected node is skipped together with everything beneath it.
pub trait Acceptor {
    fn accept(&self, loc: &SourceLocation) -> bool;
}

/// Accepts every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllAcceptor;

impl Acceptor for AllAcceptor {
    fn accept(&self, _: &SourceLocation) -> bool {
        true
    }
}

/// Accepts nodes from a single file.
#[derive(Debug, Clone, Copy)]
pub struct FileAcceptor(pub FileId);

impl Acceptor for FileAcceptor {
    fn accept(&self, loc: &SourceLocation) -> bool {
        loc.file == self.0
    }
}

/// Accepts nodes whose location contains a position.
#[derive(Debug, Clone, Copy)]
pub struct InsideAcceptor {
    pub file: FileId,
    pub position: SourcePosition,
}

impl InsideAcceptor {
    pub fn new(file: FileId, position: SourcePosition) -> InsideAcceptor {
        InsideAcceptor { file, position }
    }
}

impl Acceptor for InsideAcceptor {
    fn accept(&self, loc: &SourceLocation) -> bool {
        loc.file == self.file && loc.contains(self.position)
    }
}

#[cfg(test)]
mod tests {
    use files::{Files, SourceLocation, SourcePosition};

    use super::*;

    #[test]
    fn acceptors() {
        let mut files = Files::default();
        let main = files.insert("Main.flint");
        let list = files.insert("List.flint");

        let in_main = SourceLocation::on_line(main, 2, 5, 10);
        let in_list = SourceLocation::on_line(list, 2, 5, 10);

        assert!(AllAcceptor.accept(&in_main));
        assert!(AllAcceptor.accept(&in_list));

        assert!(FileAcceptor(main).accept(&in_main));
        assert!(!FileAcceptor(main).accept(&in_list));

        let inside = InsideAcceptor::new(main, SourcePosition::new(2, 7));
        assert!(inside.accept(&in_main));
        assert!(!inside.accept(&in_list));
        assert!(!inside.accept(&SourceLocation::on_line(main, 2, 8, 10)));
    }
}
