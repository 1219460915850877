use ast::named::{ExprKind, FieldInit};
use ast::{BinaryOp, Constant, named};
use checking::{CheckError, InternalError, TypeError};
use symbols::SymUse;
use tests_integration::Program;
use tests_integration::fixtures;
use tests_integration::report::{report_expr, report_schemes};
use types::{Type, TypeConstructor};

#[test]
fn arithmetic_on_annotated_parameter() {
    let mut program = Program::new();
    let main = program.file("Main.flint", "def f(x: Int32): Int32 = x + 1\n");

    let line = program.line(main, 1);
    // The first 'f' belongs to 'def'.
    let f = program.defn_sym("f", program.span_in(line, "f", 1));
    let x = program.var_sym("x", program.span_in(line, "x", 0));
    let annotation = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 1));
    let spec_loc = program.between(f.loc, ret.loc());
    let spec = program.spec(vec![], vec![program.fparam(&x, Some(annotation))], ret, spec_loc);
    let exp = program.binary(
        BinaryOp::Plus,
        program.var(&x, program.span_in(line, "x", 1)),
        program.cst(Constant::Int32(1), program.span_in(line, "1", 0)),
    );
    program.def(&f, spec, exp, line);

    let root = program.check().unwrap();
    let def = root.def(&f).unwrap();

    insta::assert_snapshot!(report_expr(&def.exp), @"Binary(Plus, Var(x): Int32, Cst(Int32(1)): Int32): Int32");
    insta::assert_snapshot!(report_schemes(&root), @"f: Int32 -> Int32");
}

#[test]
fn branches_must_agree() {
    let mut program = Program::new();
    let main = program.file("Main.flint", "def g(): Bool = if (true) 1 else 2.0\n");

    let line = program.line(main, 1);
    let g = program.defn_sym("g", program.span_in(line, "g", 0));
    let ret = program.primitive(TypeConstructor::Bool, program.span_in(line, "Bool", 0));
    let spec_loc = program.between(g.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);

    let else_loc = program.span_in(line, "2.0", 0);
    let exp = program.if_then_else(
        program.cst(Constant::Bool(true), program.span_in(line, "true", 0)),
        program.cst(Constant::Int32(1), program.span_in(line, "1", 0)),
        program.cst(Constant::Float64(2.0), else_loc),
        program.between(program.span_in(line, "if", 0), else_loc),
    );
    program.def(&g, spec, exp, line);

    let error = program.check().unwrap_err();
    assert_eq!(
        error,
        CheckError::Type(TypeError::UnificationFailure {
            expected: Type::INT32,
            actual: Type::FLOAT64,
            loc: else_loc,
        })
    );
    assert_eq!(program.quote(else_loc), "1:34 '2.0'");
}

#[test]
fn numeric_operands_widen() {
    let mut program = Program::new();
    let main = program.file("Main.flint", "def h(): Float64 = let y = 2; y * 1.5\n");

    let line = program.line(main, 1);
    let h = program.defn_sym("h", program.span_in(line, "h", 0));
    let ret = program.primitive(TypeConstructor::Float64, program.span_in(line, "Float64", 0));
    let spec_loc = program.between(h.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);

    let y = program.var_sym("y", program.span_in(line, "y", 0));
    let bound = program.cst(Constant::Int32(2), program.span_in(line, "2", 0));
    let body = program.binary(
        BinaryOp::Times,
        program.var(&y, program.span_in(line, "y", 1)),
        program.cst(Constant::Float64(1.5), program.span_in(line, "1.5", 0)),
    );
    let let_loc = program.between(program.span_in(line, "let", 0), body.loc);
    let exp = program.let_(&y, bound, body, let_loc);
    program.def(&h, spec, exp, line);

    let root = program.check().unwrap();
    let def = root.def(&h).unwrap();

    insta::assert_snapshot!(report_expr(&def.exp), @"Let(y, Cst(Int32(2)): Int32, Binary(Times, Var(y): Int32, Cst(Float64(1.5)): Float64): Float64): Float64");
}

#[test]
fn polymorphic_def_is_instantiated_per_use() {
    let mut program = Program::new();
    let main = program.file("Main.flint", "def id[t](v: t): t = v\ndef one(): Int32 = id(1)\n");

    let line = program.line(main, 1);
    let id = program.defn_sym("id", program.span_in(line, "id", 0));
    let t = program.type_param("t", program.span_in(program.span_in(line, "[t]", 0), "t", 0));
    let v = program.var_sym("v", program.span_in(line, "v", 0));
    let annotation =
        program.type_var(&t, program.span_in(program.span_in(line, "v: t", 0), "t", 0));
    let ret = program.type_var(&t, program.span_in(program.span_in(line, "): t", 0), "t", 0));
    let spec_loc = program.between(id.loc, ret.loc());
    let spec = program.spec(vec![t], vec![program.fparam(&v, Some(annotation))], ret, spec_loc);
    let exp = program.var(&v, program.span_in(line, "v", 1));
    program.def(&id, spec, exp, line);

    let line = program.line(main, 2);
    let one = program.defn_sym("one", program.span_in(line, "one", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(one.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let exp = program.apply(
        program.def_use(&id, program.span_in(line, "id", 0)),
        vec![program.cst(Constant::Int32(1), program.span_in(line, "1", 0))],
        program.span_in(line, "id(1)", 0),
    );
    program.def(&one, spec, exp, line);

    let root = program.check().unwrap();

    insta::assert_snapshot!(report_expr(&root.def(&one).unwrap().exp), @"Apply(Def(id): Int32 -> Int32, Cst(Int32(1)): Int32): Int32");
    insta::assert_snapshot!(report_schemes(&root), @r"
    id: ∀(t). t -> t
    one: () -> Int32
    ");
}

#[test]
fn too_many_arguments() {
    let mut program = Program::new();
    let main = program.file("Main.flint", "def inc(n: Int32): Int32 = n\ndef two(): Int32 = inc(1, 2)\n");

    let line = program.line(main, 1);
    let inc = program.defn_sym("inc", program.span_in(line, "inc", 0));
    let n = program.var_sym("n", program.span_in(program.span_in(line, "n:", 0), "n", 0));
    let annotation = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 1));
    let spec_loc = program.between(inc.loc, ret.loc());
    let spec = program.spec(vec![], vec![program.fparam(&n, Some(annotation))], ret, spec_loc);
    let exp = program.var(&n, program.span_in(program.span_in(line, "= n", 0), "n", 0));
    program.def(&inc, spec, exp, line);

    let line = program.line(main, 2);
    let two = program.defn_sym("two", program.span_in(line, "two", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(two.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let call_loc = program.span_in(line, "inc(1, 2)", 0);
    let exp = program.apply(
        program.def_use(&inc, program.span_in(call_loc, "inc", 0)),
        vec![
            program.cst(Constant::Int32(1), program.span_in(call_loc, "1", 0)),
            program.cst(Constant::Int32(2), program.span_in(call_loc, "2", 0)),
        ],
        call_loc,
    );
    program.def(&two, spec, exp, line);

    let error = program.check().unwrap_err();
    assert_eq!(
        error,
        CheckError::Type(TypeError::ArityMismatch { expected: 1, actual: 2, loc: call_loc })
    );
}

#[test]
fn match_on_enum_cases() {
    let fixtures::Colors { program, paint, .. } = fixtures::colors();

    let root = program.check().unwrap();

    insta::assert_snapshot!(report_expr(&root.def(&paint).unwrap().exp), @"Match(Var(c): Color, Color.Red => Cst(Int32(1)): Int32, Color.Green => Cst(Int32(2)): Int32): Int32");
    insta::assert_snapshot!(report_schemes(&root), @r"
    main: () -> Int32
    paint: Color -> Int32
    ");
}

#[test]
fn trait_signature_instantiated_at_use() {
    let fixtures::Show { program, show, .. } = fixtures::show();

    let root = program.check().unwrap();

    let sig = root.sig(&show).unwrap();
    assert_eq!(sig.spec.scheme.to_string(), "∀(a). a -> String with Show[a]");
    assert_eq!(root.instances_of(&show.trait_sym).len(), 1);
    insta::assert_snapshot!(report_schemes(&root), @"greet: () -> String");

    let greet = root.defs.values().find(|def| def.sym.name == "greet").unwrap();
    insta::assert_snapshot!(report_expr(&greet.exp), @"Apply(Sig(Show.show): Int32 -> String, Cst(Int32(42)): Int32): String");
}

#[test]
fn constraint_terms_take_attribute_types() {
    let fixtures::Paths { program, .. } = fixtures::paths();

    let root = program.check().unwrap();

    insta::assert_snapshot!(report_schemes(&root), @"paths: () -> Schema");
    assert_eq!(root.relation("Edge").unwrap().tpe().to_string(), "Relation(Int32, Int32)");
}

#[test]
fn atom_with_too_few_terms() {
    let fixtures::Paths { program, main, .. } =
        fixtures::paths_with_rule("Path(x) :- Edge(x, y).");

    let error = program.check().unwrap_err();

    let head = program.span(main, "Path(x)", 0);
    assert_eq!(
        error,
        CheckError::Type(TypeError::ArityMismatch { expected: 2, actual: 1, loc: head })
    );
    assert_eq!(program.quote(head), "3:26 'Path(x)'");
}

#[test]
fn atom_naming_undeclared_relation() {
    let fixtures::Paths { program, main, .. } =
        fixtures::paths_with_rule("Path(x, y) :- Link(x, y).");

    let error = program.check().unwrap_err();

    let pred = program.span(main, "Link", 0);
    assert_eq!(
        error,
        CheckError::Type(TypeError::UnresolvedReference { name: "Link".into(), loc: pred })
    );
    assert_eq!(program.quote(pred), "3:40 'Link'");
}

#[test]
fn parameter_without_annotation_is_rejected() {
    let mut program = Program::new();
    let main = program.file("Main.flint", "def g(x): Int32 = x + 1\ndef h(): Int32 = g(true)\n");

    let line = program.line(main, 1);
    let g = program.defn_sym("g", program.span_in(line, "g", 0));
    let x = program.var_sym("x", program.span_in(line, "x", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(g.loc, ret.loc());
    let spec = program.spec(vec![], vec![program.fparam(&x, None)], ret, spec_loc);
    let exp = program.binary(
        BinaryOp::Plus,
        program.var(&x, program.span_in(line, "x", 1)),
        program.cst(Constant::Int32(1), program.span_in(line, "1", 0)),
    );
    program.def(&g, spec, exp, line);

    let line = program.line(main, 2);
    let h = program.defn_sym("h", program.span_in(line, "h", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(h.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let exp = program.apply(
        program.def_use(&g, program.span_in(line, "g", 0)),
        vec![program.cst(Constant::Bool(true), program.span_in(line, "true", 0))],
        program.span_in(line, "g(true)", 0),
    );
    program.def(&h, spec, exp, line);

    let error = program.check().unwrap_err();
    assert_eq!(error, CheckError::Internal(InternalError::UnannotatedParameter { sym: x }));
    insta::assert_snapshot!(error, @"#0@1:7-1:8: parameter 'x' of a declaration has no type annotation");
}

#[test]
fn self_application_fails_occurs_check() {
    let mut program = Program::new();
    let main = program.file("Main.flint", "def loop(): Int32 = (y -> y(y))(1)\n");

    let line = program.line(main, 1);
    let sym = program.defn_sym("loop", program.span_in(line, "loop", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);

    let y = program.var_sym("y", program.span_in(line, "y", 0));
    let inner_loc = program.span_in(line, "y(y)", 0);
    let body = program.apply(
        program.var(&y, program.span_in(inner_loc, "y", 0)),
        vec![program.var(&y, program.span_in(inner_loc, "y", 1))],
        inner_loc,
    );
    let lambda = program.expr(
        ExprKind::Lambda { fparam: program.fparam(&y, None), exp: Box::new(body) },
        program.span_in(line, "(y -> y(y))", 0),
    );
    let exp = program.apply(
        lambda,
        vec![program.cst(Constant::Int32(1), program.span_in(line, "1", 0))],
        program.span_in(line, "(y -> y(y))(1)", 0),
    );
    program.def(&sym, spec, exp, line);

    let error = program.check().unwrap_err();
    assert!(matches!(error, CheckError::Internal(InternalError::OccursCheck { .. })), "{error}");
}

#[test]
fn field_initialized_twice() {
    let mut program = Program::new();
    let main = program.file(
        "Main.flint",
        "struct Point { x: Int32, y: Int32 }\ndef twice(): Point = new Point { x = 0, x = 1 }\n",
    );

    let line = program.line(main, 1);
    let (point, x, _) = fixtures::declare_point(&mut program, line);

    let line = program.line(main, 2);
    let sym = program.defn_sym("twice", program.span_in(line, "twice", 0));
    let ret = program.struct_type(&point, program.span_in(line, "Point", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let new_loc = program.span_in(line, "new Point { x = 0, x = 1 }", 0);
    let fields = [("x = 0", 0), ("x = 1", 1)]
        .into_iter()
        .map(|(text, value)| {
            let loc = program.span_in(new_loc, text, 0);
            FieldInit {
                field: SymUse::new(x.clone(), program.span_in(loc, "x", 0)),
                exp: program
                    .cst(Constant::Int32(value), program.span_in(loc, &value.to_string(), 0)),
            }
        })
        .collect();
    let sym_use = SymUse::new(point.clone(), program.span_in(new_loc, "Point", 0));
    let exp = program.expr(ExprKind::StructNew { sym: sym_use, fields }, new_loc);
    program.def(&sym, spec, exp, line);

    let error = program.check().unwrap_err();
    let CheckError::Type(TypeError::DuplicateField { name, loc }) = error else {
        panic!("expected a duplicate field, got {error}");
    };
    assert_eq!(name, "x");
    assert_eq!(program.quote(loc), "2:41 'x'");
}

#[test]
fn handler_resumes_with_operation_result() {
    let fixtures::Effects { program, ask, .. } = fixtures::effects();

    let root = program.check().unwrap();

    assert_eq!(root.op(&ask).unwrap().spec.scheme.to_string(), "() -> Int32");
    insta::assert_snapshot!(report_schemes(&root), @"run: () -> Int32");
    let run = root.defs.values().find(|def| def.sym.name == "run").unwrap();
    insta::assert_snapshot!(report_expr(&run.exp), @"TryWith(..): Int32");
}

#[test]
fn struct_fields_and_alias_expansion() {
    let fixtures::Shapes { program, .. } = fixtures::shapes();

    let root = program.check().unwrap();

    insta::assert_snapshot!(report_schemes(&root), @r"
    getx: Point -> Coord
    origin: () -> Point
    ");
    let getx = root.defs.values().find(|def| def.sym.name == "getx").unwrap();
    insta::assert_snapshot!(report_expr(&getx.exp), @"StructGet(..): Int32");
}

#[test]
fn signature_returning_associated_type() {
    let fixtures::Elems { program, first, .. } = fixtures::elems();

    let root = program.check().unwrap();

    let sig = root.sig(&first).unwrap();
    assert_eq!(sig.spec.scheme.to_string(), "∀(c). c -> Coll.Elm[c] with Coll[c]");
    let instance = &root.instances_of(&first.trait_sym)[0];
    assert_eq!(instance.assocs[0].tpe.tpe.to_string(), "Char");
}

#[test]
fn named_root_survives_json() {
    let fixtures::Colors { program, .. } = fixtures::colors();

    let json = serde_json::to_string(&program.named()).unwrap();
    let root: named::Root = serde_json::from_str(&json).unwrap();
    let checked = checking::check(&root).unwrap();

    assert_eq!(report_schemes(&checked), report_schemes(&program.check().unwrap()));
}
