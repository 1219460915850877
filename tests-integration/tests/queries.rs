use analyzer::definition::goto_definition;
use analyzer::hover::hover;
use analyzer::locate::{Node, locate};
use analyzer::references::find_references;
use tests_integration::fixtures;
use tests_integration::report::{report_expr, report_locations};

#[test]
fn references_of_enum_include_qualifiers() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let locations = find_references(&root, main, program.position(main, "Color", 0, 0)).unwrap();

    insta::assert_snapshot!(report_locations(&program, &locations), @r"
    1:6 'Color'
    2:14 'Color'
    2:45 'Color'
    2:65 'Color'
    3:27 'Color'
    3:46 'Color'
    ");
}

#[test]
fn references_of_constraint_variable() {
    let fixtures::Paths { program, main, .. } = fixtures::paths();
    let root = program.check().unwrap();

    let locations = find_references(&root, main, program.position(main, "Edge(x", 0, 5)).unwrap();

    insta::assert_snapshot!(report_locations(&program, &locations), @r"
    3:31 'x'
    3:45 'x'
    ");
}

#[test]
fn references_outside_any_entity() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    assert_eq!(find_references(&root, main, program.position(main, "=>", 0, 0)), None);
}

#[test]
fn definition_of_case_suffix() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let definition = goto_definition(&root, main, program.position(main, "Color.Red", 1, 6));

    assert_eq!(definition.map(|loc| program.quote(loc)).as_deref(), Some("1:19 'Red'"));
}

#[test]
fn definition_of_case_qualifier() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let definition = goto_definition(&root, main, program.position(main, "Color.Green", 0, 4));

    assert_eq!(definition.map(|loc| program.quote(loc)).as_deref(), Some("1:6 'Color'"));
}

#[test]
fn definition_of_signature_use() {
    let fixtures::Show { program, main, .. } = fixtures::show();
    let root = program.check().unwrap();

    let definition = goto_definition(&root, main, program.position(main, "Show.show", 0, 6));

    assert_eq!(definition.map(|loc| program.quote(loc)).as_deref(), Some("1:21 'show'"));
}

#[test]
fn definition_of_body_predicate() {
    let fixtures::Paths { program, main, .. } = fixtures::paths();
    let root = program.check().unwrap();

    let definition = goto_definition(&root, main, program.position(main, "Edge", 1, 1));

    assert_eq!(definition.map(|loc| program.quote(loc)).as_deref(), Some("1:5 'Edge'"));
}

#[test]
fn hover_on_def_name() {
    let fixtures::Colors { program, main, paint, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let hover = hover(&root, main, program.position(main, "paint", 0, 2)).unwrap();

    assert_eq!(hover.loc, paint.loc);
    insta::assert_snapshot!(hover.contents, @r"
    ```flint
    def paint: Color -> Int32
    ```
    ");
}

#[test]
fn hover_on_expressions_and_binders() {
    let fixtures::Colors { program, main, c, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let at = |needle: &str, nth: usize, column: u32| {
        let hover = hover(&root, main, program.position(main, needle, nth, column)).unwrap();
        hover.contents
    };

    assert_eq!(at("c: Color", 0, 0), "```flint\nc: Color\n```");
    assert_eq!(at("match c", 0, 6), "```flint\nColor\n```");
    assert_eq!(at("paint(Color.Red)", 0, 5), "```flint\nInt32\n```");
    assert_eq!(at("Color.Green =>", 0, 7), "```flint\nColor\n```");

    let loc = hover(&root, main, c.loc.start).unwrap().loc;
    assert_eq!(program.quote(loc), "2:11 'c: Color'");
}

#[test]
fn hover_on_signature_use_and_relation() {
    let fixtures::Show { program, main, .. } = fixtures::show();
    let root = program.check().unwrap();
    let contents = hover(&root, main, program.position(main, "Show.show", 0, 6)).unwrap().contents;
    assert_eq!(contents, "```flint\nInt32 -> String\n```");

    let fixtures::Paths { program, main, .. } = fixtures::paths();
    let root = program.check().unwrap();
    let contents = hover(&root, main, program.position(main, "Edge", 0, 0)).unwrap().contents;
    assert_eq!(contents, "```flint\nEdge: Relation(Int32, Int32)\n```");
}

#[test]
fn locate_innermost_written_node() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    // On the parenthesis of the first call, which belongs to the call alone.
    let position = program.position(main, "paint(Color.Red)", 0, 5);
    let Some(Node::Expr(exp)) = locate(&root, main, position) else {
        panic!("expected an expression");
    };
    insta::assert_snapshot!(report_expr(exp), @"Apply(Def(paint): Color -> Int32, Tag(Color.Red): Color): Int32");

    let node = locate(&root, main, program.position(main, "=>", 0, 0));
    assert!(matches!(node, Some(Node::MatchRule(_))), "{node:?}");
}

#[test]
fn handler_resumption_binder() {
    let fixtures::Effects { program, main, k, .. } = fixtures::effects();
    let root = program.check().unwrap();

    let locations = find_references(&root, main, k.loc.start).unwrap();
    insta::assert_snapshot!(report_locations(&program, &locations), @r"
    2:57 'k'
    2:62 'k'
    ");

    let hover = hover(&root, main, k.loc.start).unwrap();
    assert_eq!(hover.contents, "```flint\nk: Int32 -> Int32\n```");
}
