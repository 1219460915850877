use analyzer::locate::Target;
use analyzer::occurrences::occurrences;
use analyzer::rename::{RenameResult, WorkspaceEdit, process_rename};
use ast::typed;
use files::{FileId, Files, SourcePosition};
use tests_integration::Program;
use tests_integration::fixtures::{self, COLORS, EFFECTS, ELEMS, OTHER, PATHS, SHADES, SHAPES, SHOW};

fn rename(
    root: &typed::Root,
    file: FileId,
    position: SourcePosition,
    new_name: &str,
) -> WorkspaceEdit {
    match process_rename(root, new_name, file, position) {
        RenameResult::Success(edit) => edit,
        RenameResult::InvalidRequest(message) => panic!("{message}"),
    }
}

#[test]
fn enum_from_annotation() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "Color", 1, 2), "Colour");

    assert_eq!(edit.len(), 6);
    assert_eq!(program.apply_edits(main, edit.edits()), COLORS.replace("Color", "Colour"));
}

#[test]
fn case_from_qualified_use() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    // On 'Red' in the second 'Color.Red', which is the argument on line 3.
    let edit = rename(&root, main, program.position(main, "Color.Red", 1, 7), "Crimson");

    assert_eq!(edit.len(), 3);
    assert_eq!(program.apply_edits(main, edit.edits()), COLORS.replace("Red", "Crimson"));
}

/// Renaming from any occurrence of each target yields one and the same edit.
fn assert_same_edit_everywhere(program: &Program, main: FileId, targets: Vec<Target>) {
    let root = program.check().unwrap();
    for target in targets {
        let locations = occurrences(&root, &target);
        let expected = rename(&root, main, locations[0].start, "Renamed");
        for loc in &locations[1..] {
            let actual = rename(&root, main, loc.start, "Renamed");
            assert_eq!(actual, expected, "renaming {target} from {}", program.quote(*loc));
        }
    }
}

#[test]
fn same_edit_from_every_occurrence() {
    let fixtures::Colors { program, main, color, red, .. } = fixtures::colors();
    let targets = vec![Target::symbol(color), Target::symbol(red)];
    assert_same_edit_everywhere(&program, main, targets);

    let fixtures::Effects { program, main, ask_effect, ask, .. } = fixtures::effects();
    let targets = vec![Target::symbol(ask_effect), Target::symbol(ask)];
    assert_same_edit_everywhere(&program, main, targets);

    let fixtures::Shapes { program, main, point, x, coord } = fixtures::shapes();
    let targets = vec![Target::symbol(point), Target::symbol(x), Target::symbol(coord)];
    assert_same_edit_everywhere(&program, main, targets);

    let fixtures::Elems { program, main, coll, elm, .. } = fixtures::elems();
    let targets = vec![Target::symbol(coll), Target::symbol(elm)];
    assert_same_edit_everywhere(&program, main, targets);
}

#[test]
fn def_and_its_calls() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "paint", 0, 0), "draw");

    assert_eq!(program.apply_edits(main, edit.edits()), COLORS.replace("paint", "draw"));
}

#[test]
fn parameter_and_its_uses() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "c: Color", 0, 0), "colour");

    let expected = COLORS.replace("paint(c:", "paint(colour:").replace("match c {", "match colour {");
    assert_eq!(edit.len(), 2);
    assert_eq!(program.apply_edits(main, edit.edits()), expected);
}

#[test]
fn nothing_at_position() {
    let fixtures::Colors { program, main, .. } = fixtures::colors();
    let root = program.check().unwrap();

    // The opening brace of the enum body.
    let result = process_rename(&root, "Anything", main, SourcePosition::new(1, 12));

    assert_eq!(
        result,
        RenameResult::InvalidRequest("Nothing found in 'Main.flint' at 1:12.".to_string())
    );
}

#[test]
fn def_across_files() {
    let fixtures::Shades { program, main, other } = fixtures::shades();
    let root = program.check().unwrap();

    let edit = rename(&root, other, program.position(other, "legacy", 0, 2), "old");

    assert_eq!(edit.changes.len(), 2);
    assert_eq!(edit.changes[&main].len(), 2);
    assert_eq!(edit.changes[&other].len(), 1);
    assert_eq!(program.apply_edits(main, edit.edits()), SHADES.replace("legacy", "old"));
    assert_eq!(program.apply_edits(other, edit.edits()), OTHER.replace("legacy", "old"));
}

#[test]
fn signature_with_instance_definitions() {
    let fixtures::Show { program, main, .. } = fixtures::show();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "show", 0, 1), "display");

    assert_eq!(edit.len(), 3);
    assert_eq!(program.apply_edits(main, edit.edits()), SHOW.replace("show", "display"));
}

#[test]
fn signature_from_instance_definition() {
    let fixtures::Show { program, main, .. } = fixtures::show();
    let root = program.check().unwrap();

    let from_sig = rename(&root, main, program.position(main, "show", 0, 1), "display");
    let from_def = rename(&root, main, program.position(main, "show", 1, 1), "display");

    assert_eq!(from_def.len(), 3);
    assert_eq!(from_def, from_sig);
    assert_eq!(program.apply_edits(main, from_def.edits()), SHOW.replace("show", "display"));
}

#[test]
fn trait_from_qualified_signature_use() {
    let fixtures::Show { program, main, .. } = fixtures::show();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "Show.show", 0, 1), "Display");

    assert_eq!(program.apply_edits(main, edit.edits()), SHOW.replace("Show", "Display"));
}

#[test]
fn trait_type_parameter() {
    let fixtures::Show { program, main, .. } = fixtures::show();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "[a]", 0, 1), "b");

    let expected = SHOW.replacen("[a]", "[b]", 1).replacen("x: a", "x: b", 1);
    assert_eq!(edit.len(), 2);
    assert_eq!(program.apply_edits(main, edit.edits()), expected);
}

#[test]
fn predicate_from_body_atom() {
    let fixtures::Paths { program, main, .. } = fixtures::paths();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "Edge", 1, 0), "Link");

    assert_eq!(program.apply_edits(main, edit.edits()), PATHS.replace("Edge", "Link"));
}

#[test]
fn unknown_file() {
    let fixtures::Colors { program, .. } = fixtures::colors();
    let root = program.check().unwrap();

    let mut files = Files::default();
    files.insert("Main.flint");
    let unknown = files.insert("Elsewhere.flint");
    let result = process_rename(&root, "Anything", unknown, SourcePosition::new(1, 1));

    assert_eq!(
        result,
        RenameResult::InvalidRequest("Nothing found in unknown file #1 at 1:1.".to_string())
    );
}

#[test]
fn operation_from_perform() {
    let fixtures::Effects { program, main, .. } = fixtures::effects();
    let root = program.check().unwrap();

    // On 'ask' in 'Ask.ask()', past the effect qualifier.
    let edit = rename(&root, main, program.position(main, "Ask.ask", 0, 4), "query");

    assert_eq!(edit.len(), 3);
    assert_eq!(program.apply_edits(main, edit.edits()), EFFECTS.replace("ask", "query"));
}

#[test]
fn effect_from_perform_qualifier() {
    let fixtures::Effects { program, main, .. } = fixtures::effects();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "Ask.ask", 0, 0), "Question");

    assert_eq!(edit.len(), 3);
    assert_eq!(program.apply_edits(main, edit.edits()), EFFECTS.replace("Ask", "Question"));
}

#[test]
fn struct_from_construction() {
    let fixtures::Shapes { program, main, .. } = fixtures::shapes();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "new Point", 0, 4), "Pt");

    assert_eq!(edit.len(), 4);
    assert_eq!(program.apply_edits(main, edit.edits()), SHAPES.replace("Point", "Pt"));
}

#[test]
fn field_from_access() {
    let fixtures::Shapes { program, main, .. } = fixtures::shapes();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "p.x", 0, 2), "h");

    let expected = SHAPES.replace("{ x:", "{ h:").replace("{ x =", "{ h =").replace("p.x", "p.h");
    assert_eq!(edit.len(), 3);
    assert_eq!(program.apply_edits(main, edit.edits()), expected);
}

#[test]
fn alias_from_return_annotation() {
    let fixtures::Shapes { program, main, .. } = fixtures::shapes();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "Coord", 1, 0), "Coordinate");

    assert_eq!(edit.len(), 2);
    assert_eq!(program.apply_edits(main, edit.edits()), SHAPES.replace("Coord", "Coordinate"));
}

#[test]
fn associated_type_from_declaration() {
    let fixtures::Elems { program, main, .. } = fixtures::elems();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "Elm", 0, 0), "Item");

    assert_eq!(edit.len(), 3);
    assert_eq!(program.apply_edits(main, edit.edits()), ELEMS.replace("Elm", "Item"));
}

#[test]
fn trait_from_associated_type_qualifier() {
    let fixtures::Elems { program, main, .. } = fixtures::elems();
    let root = program.check().unwrap();

    let edit = rename(&root, main, program.position(main, "Coll.Elm", 0, 0), "Bag");

    assert_eq!(edit.len(), 4);
    assert_eq!(program.apply_edits(main, edit.edits()), ELEMS.replace("Coll", "Bag"));
}
