use ast::typed::{Def, Expr, Pattern};
use symbols::{CaseSym, SymUse};
use tests_integration::fixtures;
use visiting::{AllAcceptor, Consumer, FileAcceptor, InsideAcceptor, visit_root};

#[derive(Debug, Default, PartialEq, Eq)]
struct Counts {
    defs: usize,
    exprs: usize,
    patterns: usize,
    case_uses: usize,
}

impl<'r> Consumer<'r> for Counts {
    fn consume_def(&mut self, _: &'r Def) {
        self.defs += 1;
    }

    fn consume_expr(&mut self, _: &'r Expr) {
        self.exprs += 1;
    }

    fn consume_pattern(&mut self, _: &'r Pattern) {
        self.patterns += 1;
    }

    fn consume_case_use(&mut self, _: &'r SymUse<CaseSym>) {
        self.case_uses += 1;
    }
}

#[test]
fn all_nodes() {
    let fixtures::Colors { program, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let mut counts = Counts::default();
    visit_root(&root, &mut counts, &AllAcceptor);

    assert_eq!(counts, Counts { defs: 2, exprs: 11, patterns: 2, case_uses: 4 });
}

#[test]
fn nodes_around_position() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let mut counts = Counts::default();
    let acceptor = InsideAcceptor::new(main, program.position(main, "Color.Red", 1, 7));
    visit_root(&root, &mut counts, &acceptor);

    // The sum, the call and the tag.
    assert_eq!(counts, Counts { defs: 1, exprs: 3, patterns: 0, case_uses: 1 });
}

#[test]
fn nodes_of_one_file() {
    let fixtures::Shades { program, other, .. } = fixtures::shades();
    let root = program.check().unwrap();

    let mut counts = Counts::default();
    visit_root(&root, &mut counts, &FileAcceptor(other));

    assert_eq!(counts, Counts { defs: 1, exprs: 2, patterns: 0, case_uses: 0 });
}
