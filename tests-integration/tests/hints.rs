use analyzer::hints::{Hint, scan_hints};
use itertools::Itertools;
use tests_integration::{Program, fixtures};

fn report_hints(program: &Program, hints: &[Hint]) -> String {
    hints.iter().map(|hint| format!("{:?} {}", hint.kind, program.quote(hint.loc))).join("\n")
}

#[test]
fn annotated_uses_in_requested_file() {
    let fixtures::Shades { program, main, .. } = fixtures::shades();
    let root = program.check().unwrap();

    let hints = scan_hints(&root, &[main]);

    insta::assert_snapshot!(report_hints(&program, &hints), @r"
    Deprecated 3:12 'Shade'
    Experimental 3:24 'legacy'
    Deprecated 3:38 'Shade.Dark'
    Deprecated 3:54 'Shade.Dark'
    ");
}

#[test]
fn every_requested_file() {
    let fixtures::Shades { program, main, other } = fixtures::shades();
    let root = program.check().unwrap();

    let hints = scan_hints(&root, &[other, main]);

    assert_eq!(hints.len(), 5);
    insta::assert_snapshot!(report_hints(&program, &hints[4..]), @"Experimental 1:22 'legacy'");
}

#[test]
fn nothing_without_annotations() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    assert!(scan_hints(&root, &[main]).is_empty());
}
