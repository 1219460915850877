//! Small programs shared across integration tests.

use ast::named::{
    AssocTypeDef, AssocTypeSig, Body, Case, Constraint, ConstraintParam, Effect, Enum, ExprKind,
    FieldInit, HandlerRule, Head, Instance, MatchRule, Op, PatternKind, Relation, Sig, Struct,
    StructField, Trait, TypeAlias,
};
use ast::{AnnotationKind, Annotations, BinaryOp, Constant, Ident, Polarity, TypeExpr};
use files::{FileId, SourceLocation};
use smol_str::SmolStr;
use symbols::{
    AssocTypeSym, CaseSym, DefnSym, EffectSym, EnumSym, OpSym, SigSym, StructFieldSym, StructSym,
    SymUse, TraitSym, TypeAliasSym, TypeVarSym, VarSym,
};
use types::{Denotation, TypeConstructor};

use crate::Program;

pub const COLORS: &str = "\
enum Color { case Red, case Green }
def paint(c: Color): Int32 = match c { case Color.Red => 1 case Color.Green => 2 }
def main(): Int32 = paint(Color.Red) + paint(Color.Green)
";

pub struct Colors {
    pub program: Program,
    pub main: FileId,
    pub color: EnumSym,
    pub red: CaseSym,
    pub paint: DefnSym,
    pub c: VarSym,
}

pub fn colors() -> Colors {
    let mut program = Program::new();
    let main = program.file("Main.flint", COLORS);

    let line = program.line(main, 1);
    let color = program.enum_sym("Color", program.span_in(line, "Color", 0));
    let red = program.case_sym(&color, "Red", program.span_in(line, "Red", 0));
    let green = program.case_sym(&color, "Green", program.span_in(line, "Green", 0));
    let cases = [(&red, "case Red"), (&green, "case Green")]
        .into_iter()
        .map(|(sym, text)| Case { sym: sym.clone(), tpe: None, loc: program.span_in(line, text, 0) })
        .collect();
    program.root.enums.push(Enum {
        ann: Annotations::default(),
        sym: color.clone(),
        tparams: vec![],
        cases,
        loc: line,
    });

    let line = program.line(main, 2);
    let paint = program.defn_sym("paint", program.span_in(line, "paint", 0));
    let c = program.var_sym("c", program.span_in(line, "c", 0));
    let annotation = program.enum_type(&color, program.span_in(line, "Color", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(paint.loc, ret.loc());
    let spec = program.spec(vec![], vec![program.fparam(&c, Some(annotation))], ret, spec_loc);

    let match_loc =
        program.span_in(line, "match c { case Color.Red => 1 case Color.Green => 2 }", 0);
    // The first 'c' belongs to 'match'.
    let scrutinee = program.var(&c, program.span_in(match_loc, "c", 1));
    let rules = [(&red, "case Color.Red => 1", 1), (&green, "case Color.Green => 2", 2)]
        .into_iter()
        .map(|(case, text, value)| {
            let loc = program.span_in(line, text, 0);
            let qualified = format!("Color.{}", case.name);
            let pat = program.tag_pattern(case, program.span_in(loc, &qualified, 0));
            let exp =
                program.cst(Constant::Int32(value), program.span_in(loc, &value.to_string(), 0));
            MatchRule { pat, guard: None, exp, loc }
        })
        .collect();
    let exp = program.expr(ExprKind::Match { exp: Box::new(scrutinee), rules }, match_loc);
    program.def(&paint, spec, exp, line);

    let line = program.line(main, 3);
    let sym = program.defn_sym("main", program.span_in(line, "main", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let call = |case: &CaseSym| {
        let qualified = format!("Color.{}", case.name);
        let loc = program.span_in(line, &format!("paint({qualified})"), 0);
        let callee = program.def_use(&paint, program.span_in(loc, "paint", 0));
        let tag = program.tag(case, None, program.span_in(loc, &qualified, 0));
        program.apply(callee, vec![tag], loc)
    };
    let exp = program.binary(BinaryOp::Plus, call(&red), call(&green));
    program.def(&sym, spec, exp, line);

    Colors { program, main, color, red, paint, c }
}

pub const SHADES: &str = "\
@Deprecated enum Shade { case Dark }
@Experimental def legacy(): Int32 = 1
def use(): Shade = if (legacy() > 0) Shade.Dark else Shade.Dark
";

pub const OTHER: &str = "\
def other(): Int32 = legacy()
";

pub struct Shades {
    pub program: Program,
    pub main: FileId,
    pub other: FileId,
}

/// A deprecated enum and an experimental def, used from two files.
pub fn shades() -> Shades {
    let mut program = Program::new();
    let main = program.file("Main.flint", SHADES);
    let other = program.file("Other.flint", OTHER);

    let line = program.line(main, 1);
    let shade = program.enum_sym("Shade", program.span_in(line, "Shade", 0));
    let dark = program.case_sym(&shade, "Dark", program.span_in(line, "Dark", 0));
    program.root.enums.push(Enum {
        ann: Annotations { values: vec![AnnotationKind::Deprecated] },
        sym: shade.clone(),
        tparams: vec![],
        cases: vec![Case { sym: dark.clone(), tpe: None, loc: program.span_in(line, "case Dark", 0) }],
        loc: line,
    });

    let line = program.line(main, 2);
    let legacy = program.defn_sym("legacy", program.span_in(line, "legacy", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(legacy.loc, ret.loc());
    let mut spec = program.spec(vec![], vec![], ret, spec_loc);
    spec.ann = Annotations { values: vec![AnnotationKind::Experimental] };
    let exp = program.cst(Constant::Int32(1), program.span_in(line, "1", 0));
    program.def(&legacy, spec, exp, line);

    let line = program.line(main, 3);
    let sym = program.defn_sym("use", program.span_in(line, "use", 0));
    let ret = program.enum_type(&shade, program.span_in(line, "Shade", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let call_loc = program.span_in(line, "legacy()", 0);
    let call = program.apply(
        program.def_use(&legacy, program.span_in(call_loc, "legacy", 0)),
        vec![],
        call_loc,
    );
    let zero = program.cst(Constant::Int32(0), program.span_in(line, "0", 0));
    let condition = program.binary(BinaryOp::Greater, call, zero);
    let then_ = program.tag(&dark, None, program.span_in(line, "Shade.Dark", 0));
    let else_ = program.tag(&dark, None, program.span_in(line, "Shade.Dark", 1));
    let if_loc = program.between(program.span_in(line, "if", 0), else_.loc);
    let exp = program.if_then_else(condition, then_, else_, if_loc);
    program.def(&sym, spec, exp, line);

    let line = program.line(other, 1);
    let sym = program.defn_sym("other", program.span_in(line, "other", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let call_loc = program.span_in(line, "legacy()", 0);
    let exp = program.apply(
        program.def_use(&legacy, program.span_in(call_loc, "legacy", 0)),
        vec![],
        call_loc,
    );
    program.def(&sym, spec, exp, line);

    Shades { program, main, other }
}

pub const SHOW: &str = "\
trait Show[a] { def show(x: a): String }
instance Show[Int32] { def show(x: Int32): String = \"int\" }
def greet(): String = Show.show(42)
";

pub struct Show {
    pub program: Program,
    pub main: FileId,
    pub show_trait: TraitSym,
    pub show: SigSym,
    pub a: TypeVarSym,
}

/// A single-parameter trait with one instance and one qualified use.
pub fn show() -> Show {
    let mut program = Program::new();
    let main = program.file("Main.flint", SHOW);

    let line = program.line(main, 1);
    let show_trait = program.trait_sym("Show", program.span_in(line, "Show", 0));
    let a = program.type_param("a", program.span_in(program.span_in(line, "[a]", 0), "a", 0));
    let show = program.sig_sym(&show_trait, "show", program.span_in(line, "show", 0));
    let x = program.var_sym("x", program.span_in(line, "x", 0));
    let annotation = program.type_var(&a, program.span_in(program.span_in(line, "x: a", 0), "a", 0));
    let ret = program.primitive(TypeConstructor::Str, program.span_in(line, "String", 0));
    let spec_loc = program.between(show.loc, ret.loc());
    let spec = program.spec(vec![], vec![program.fparam(&x, Some(annotation))], ret, spec_loc);
    let sig_loc = program.span_in(line, "def show(x: a): String", 0);
    program.root.traits.push(Trait {
        ann: Annotations::default(),
        sym: show_trait.clone(),
        tparam: a.clone(),
        super_traits: vec![],
        assocs: vec![],
        sigs: vec![Sig { sym: show.clone(), spec, exp: None, loc: sig_loc }],
        loc: line,
    });

    let line = program.line(main, 2);
    let trait_use = SymUse::new(show_trait.clone(), program.span_in(line, "Show", 0));
    let tpe = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let sym = program.defn_sym("show", program.span_in(line, "show", 0));
    let x = program.var_sym("x", program.span_in(line, "x", 0));
    let annotation = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 1));
    let ret = program.primitive(TypeConstructor::Str, program.span_in(line, "String", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![program.fparam(&x, Some(annotation))], ret, spec_loc);
    let exp = program.cst(Constant::Str("int".into()), program.span_in(line, "\"int\"", 0));
    let def_loc = program.span_in(line, "def show(x: Int32): String = \"int\"", 0);
    let def = ast::named::Def { sym, spec, exp, loc: def_loc };
    program.root.instances.push(Instance {
        ann: Annotations::default(),
        trait_use,
        tpe,
        tconstrs: vec![],
        assocs: vec![],
        defs: vec![def],
        loc: line,
    });

    let line = program.line(main, 3);
    let sym = program.defn_sym("greet", program.span_in(line, "greet", 0));
    let ret = program.primitive(TypeConstructor::Str, program.span_in(line, "String", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let callee = program.sig_use(&show, program.span_in(line, "Show.show", 0));
    let argument = program.cst(Constant::Int32(42), program.span_in(line, "42", 0));
    let exp = program.apply(callee, vec![argument], program.span_in(line, "Show.show(42)", 0));
    program.def(&sym, spec, exp, line);

    Show { program, main, show_trait, show, a }
}

pub const PATHS: &str = "\
rel Edge(Int32, Int32)
rel Path(Int32, Int32)
def paths(): Schema = #{ Path(x, y) :- Edge(x, y). }
";

pub struct Paths {
    pub program: Program,
    pub main: FileId,
    pub x: VarSym,
}

/// Two relations and a constraint set deriving one from the other.
pub fn paths() -> Paths {
    paths_with_rule("Path(x, y) :- Edge(x, y).")
}

/// The relations of [`PATHS`] with `rule` as the only constraint.
///
/// The rule is written `Head(a, b) :- Body(a, b).` with one-letter variables.
pub fn paths_with_rule(rule: &str) -> Paths {
    let mut program = Program::new();
    let text = PATHS.replace("Path(x, y) :- Edge(x, y).", rule);
    let main = program.file("Main.flint", &text);

    for (number, name) in [(1, "Edge"), (2, "Path")] {
        let line = program.line(main, number);
        let attributes = (0..2)
            .map(|nth| program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", nth)))
            .collect();
        program.root.relations.push(Relation {
            ann: Annotations::default(),
            name: Ident { name: SmolStr::new(name), loc: program.span_in(line, name, 0) },
            den: Denotation::Relational,
            attributes,
            loc: line,
        });
    }

    let line = program.line(main, 3);
    let sym = program.defn_sym("paths", program.span_in(line, "paths", 0));
    let ret = program.primitive(TypeConstructor::Schema, program.span_in(line, "Schema", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);

    let (head_text, body_text) = rule.trim_end_matches('.').split_once(" :- ").unwrap();
    let mut vars: Vec<VarSym> = vec![];

    let (pred, terms) = atom(&program, line, head_text);
    let terms = terms
        .into_iter()
        .map(|(name, loc)| program.var(&bind(&program, &mut vars, name, loc), loc))
        .collect();
    let head = Head::Atom { pred, terms, loc: program.span_in(line, head_text, 0) };

    let (pred, terms) = atom(&program, line, body_text);
    let terms = terms
        .into_iter()
        .map(|(name, loc)| {
            let sym = bind(&program, &mut vars, name, loc);
            program.pattern(PatternKind::Var(sym), loc)
        })
        .collect();
    let body = Body::Atom {
        pred,
        polarity: Polarity::Positive,
        terms,
        loc: program.span_in(line, body_text, 0),
    };

    let cparams =
        vars.iter().map(|sym| ConstraintParam { sym: sym.clone(), loc: sym.loc }).collect();
    let constraint =
        Constraint { cparams, head, body: vec![body], loc: program.span_in(line, rule, 0) };
    let set_loc = program.span_in(line, &format!("#{{ {rule} }}"), 0);
    let exp = program.expr(ExprKind::FixpointConstraintSet(vec![constraint]), set_loc);
    program.def(&sym, spec, exp, line);

    let x = vars.into_iter().find(|sym| sym.text == "x").unwrap();
    Paths { program, main, x }
}

/// The predicate of `Pred(a, b)` and the location of each of its terms.
fn atom<'t>(
    program: &Program,
    line: SourceLocation,
    text: &'t str,
) -> (Ident, Vec<(&'t str, SourceLocation)>) {
    let loc = program.span_in(line, text, 0);
    let (name, arguments) = text.split_once('(').unwrap();
    let arguments_loc = program.span_in(loc, arguments, 0);
    let names: Vec<&str> = arguments.trim_end_matches(')').split(", ").collect();
    let terms = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let nth = names[..index].iter().filter(|earlier| *earlier == name).count();
            (*name, program.span_in(arguments_loc, name, nth))
        })
        .collect();
    (Ident { name: SmolStr::new(name), loc: program.span_in(loc, name, 0) }, terms)
}

/// The variable named `name`, bound at `loc` on its first occurrence.
fn bind(program: &Program, vars: &mut Vec<VarSym>, name: &str, loc: SourceLocation) -> VarSym {
    if let Some(sym) = vars.iter().find(|sym| sym.text == name) {
        return sym.clone();
    }
    let sym = program.var_sym(name, loc);
    vars.push(sym.clone());
    sym
}

pub const EFFECTS: &str = "\
eff Ask { def ask(): Int32 }
def run(): Int32 = try Ask.ask() + 1 with Ask { def ask(k) = k(41) }
";

pub struct Effects {
    pub program: Program,
    pub main: FileId,
    pub ask_effect: EffectSym,
    pub ask: OpSym,
    pub k: VarSym,
}

/// An effect with one operation, performed and handled by one def.
pub fn effects() -> Effects {
    let mut program = Program::new();
    let main = program.file("Main.flint", EFFECTS);

    let line = program.line(main, 1);
    let ask_effect = program.effect_sym("Ask", program.span_in(line, "Ask", 0));
    let ask = program.op_sym(&ask_effect, "ask", program.span_in(line, "ask", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(ask.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let op_loc = program.span_in(line, "def ask(): Int32", 0);
    program.root.effects.push(Effect {
        ann: Annotations::default(),
        sym: ask_effect.clone(),
        ops: vec![Op { sym: ask.clone(), spec, loc: op_loc }],
        loc: line,
    });

    let line = program.line(main, 2);
    let sym = program.defn_sym("run", program.span_in(line, "run", 0));
    let ret = program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);

    let do_loc = program.span_in(line, "Ask.ask()", 0);
    let op = SymUse::new(ask.clone(), program.span_in(do_loc, "Ask.ask", 0));
    let perform = program.expr(ExprKind::Do { op, exps: vec![] }, do_loc);
    let one = program.cst(Constant::Int32(1), program.span_in(line, "1", 0));
    let body = program.binary(BinaryOp::Plus, perform, one);

    let rule_loc = program.span_in(line, "def ask(k) = k(41)", 0);
    // The first 'k' belongs to 'ask'.
    let k = program.var_sym("k", program.span_in(rule_loc, "k", 1));
    let call_loc = program.span_in(rule_loc, "k(41)", 0);
    let resume = program.apply(
        program.var(&k, program.span_in(rule_loc, "k", 2)),
        vec![program.cst(Constant::Int32(41), program.span_in(call_loc, "41", 0))],
        call_loc,
    );
    let rule = HandlerRule {
        op: SymUse::new(ask.clone(), program.span_in(rule_loc, "ask", 0)),
        fparams: vec![program.fparam(&k, None)],
        exp: resume,
        loc: rule_loc,
    };
    let kind = ExprKind::TryWith {
        exp: Box::new(body),
        effect: SymUse::new(ask_effect.clone(), program.span_in(line, "Ask", 1)),
        rules: vec![rule],
    };
    let try_loc = program.between(program.span_in(line, "try", 0), program.span_in(line, "}", 0));
    let exp = program.expr(kind, try_loc);
    program.def(&sym, spec, exp, line);

    Effects { program, main, ask_effect, ask, k }
}

pub const SHAPES: &str = "\
struct Point { x: Int32, y: Int32 }
type alias Coord = Int32
def origin(): Point = new Point { x = 0, y = 0 }
def getx(p: Point): Coord = p.x
";

pub struct Shapes {
    pub program: Program,
    pub main: FileId,
    pub point: StructSym,
    pub x: StructFieldSym,
    pub coord: TypeAliasSym,
}

/// A struct with two fields and an alias of a primitive type.
pub fn shapes() -> Shapes {
    let mut program = Program::new();
    let main = program.file("Main.flint", SHAPES);

    let line = program.line(main, 1);
    let (point, x, y) = declare_point(&mut program, line);

    let line = program.line(main, 2);
    let coord = program.alias_sym("Coord", program.span_in(line, "Coord", 0));
    program.root.aliases.push(TypeAlias {
        ann: Annotations::default(),
        sym: coord.clone(),
        tparams: vec![],
        tpe: program.primitive(TypeConstructor::Int32, program.span_in(line, "Int32", 0)),
        loc: line,
    });

    let line = program.line(main, 3);
    let sym = program.defn_sym("origin", program.span_in(line, "origin", 0));
    let ret = program.struct_type(&point, program.span_in(line, "Point", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![], ret, spec_loc);
    let new_loc = program.span_in(line, "new Point { x = 0, y = 0 }", 0);
    let fields = [(&x, "x = 0"), (&y, "y = 0")]
        .into_iter()
        .map(|(field, text)| {
            let loc = program.span_in(new_loc, text, 0);
            FieldInit {
                field: SymUse::new(field.clone(), program.span_in(loc, &field.name, 0)),
                exp: program.cst(Constant::Int32(0), program.span_in(loc, "0", 0)),
            }
        })
        .collect();
    let sym_use = SymUse::new(point.clone(), program.span_in(new_loc, "Point", 0));
    let exp = program.expr(ExprKind::StructNew { sym: sym_use, fields }, new_loc);
    program.def(&sym, spec, exp, line);

    let line = program.line(main, 4);
    let sym = program.defn_sym("getx", program.span_in(line, "getx", 0));
    let p = program.var_sym("p", program.span_in(line, "p", 0));
    let annotation = program.struct_type(&point, program.span_in(line, "Point", 0));
    let ret = program.alias_type(&coord, program.span_in(line, "Coord", 0));
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![program.fparam(&p, Some(annotation))], ret, spec_loc);
    let get_loc = program.span_in(line, "p.x", 0);
    let target = program.var(&p, program.span_in(get_loc, "p", 0));
    let field = SymUse::new(x.clone(), program.span_in(get_loc, "x", 0));
    let exp = program.expr(ExprKind::StructGet { exp: Box::new(target), field }, get_loc);
    program.def(&sym, spec, exp, line);

    Shapes { program, main, point, x, coord }
}

/// Declares `struct Point { x: Int32, y: Int32 }` written on `line`.
pub fn declare_point(
    program: &mut Program,
    line: SourceLocation,
) -> (StructSym, StructFieldSym, StructFieldSym) {
    let point = program.struct_sym("Point", program.span_in(line, "Point", 0));
    let [x, y] = ["x", "y"].map(|name| {
        let loc = program.span_in(line, &format!("{name}: Int32"), 0);
        let sym = program.field_sym(&point, name, program.span_in(loc, name, 0));
        let tpe = program.primitive(TypeConstructor::Int32, program.span_in(loc, "Int32", 0));
        StructField { sym, tpe, loc }
    });
    let (x_sym, y_sym) = (x.sym.clone(), y.sym.clone());
    program.root.structs.push(Struct {
        ann: Annotations::default(),
        sym: point.clone(),
        tparams: vec![],
        fields: vec![x, y],
        loc: line,
    });
    (point, x_sym, y_sym)
}

pub const ELEMS: &str = "\
trait Coll[c] { type Elm; def first(x: c): Coll.Elm[c] }
instance Coll[String] { type Coll.Elm[String] = Char; def first(x: String): Char = 'a' }
";

pub struct Elems {
    pub program: Program,
    pub main: FileId,
    pub coll: TraitSym,
    pub elm: AssocTypeSym,
    pub first: SigSym,
}

/// A trait with an associated type, defined by its only instance.
pub fn elems() -> Elems {
    let mut program = Program::new();
    let main = program.file("Main.flint", ELEMS);

    let line = program.line(main, 1);
    let coll = program.trait_sym("Coll", program.span_in(line, "Coll", 0));
    let c = program.type_param("c", program.span_in(line, "c", 0));
    let elm = program.assoc_type_sym(&coll, "Elm", program.span_in(line, "Elm", 0));
    let first = program.sig_sym(&coll, "first", program.span_in(line, "first", 0));
    let x = program.var_sym("x", program.span_in(line, "x", 0));
    let annotation = program.type_var(&c, program.span_in(line, "c", 1));
    let ret_loc = program.span_in(line, "Coll.Elm[c]", 0);
    let ret = TypeExpr::AssocType {
        sym: SymUse::new(elm.clone(), program.span_in(ret_loc, "Coll.Elm", 0)),
        arg: Box::new(program.type_var(&c, program.span_in(line, "c", 2))),
        loc: ret_loc,
    };
    let spec = program.spec(
        vec![],
        vec![program.fparam(&x, Some(annotation))],
        ret,
        program.between(first.loc, ret_loc),
    );
    program.root.traits.push(Trait {
        ann: Annotations::default(),
        sym: coll.clone(),
        tparam: c,
        super_traits: vec![],
        assocs: vec![AssocTypeSig { sym: elm.clone(), loc: program.span_in(line, "type Elm", 0) }],
        sigs: vec![Sig {
            sym: first.clone(),
            spec,
            exp: None,
            loc: program.span_in(line, "def first(x: c): Coll.Elm[c]", 0),
        }],
        loc: line,
    });

    let line = program.line(main, 2);
    let trait_use = SymUse::new(coll.clone(), program.span_in(line, "Coll", 0));
    let string = |nth| program.primitive(TypeConstructor::Str, program.span_in(line, "String", nth));
    let char_ = |nth| program.primitive(TypeConstructor::Char, program.span_in(line, "Char", nth));
    let assoc_loc = program.span_in(line, "type Coll.Elm[String] = Char", 0);
    let assoc = AssocTypeDef {
        sym: SymUse::new(elm.clone(), program.span_in(assoc_loc, "Coll.Elm", 0)),
        arg: string(1),
        tpe: char_(0),
        loc: assoc_loc,
    };
    let sym = program.defn_sym("first", program.span_in(line, "first", 0));
    let x = program.var_sym("x", program.span_in(line, "x", 0));
    let ret = char_(1);
    let spec_loc = program.between(sym.loc, ret.loc());
    let spec = program.spec(vec![], vec![program.fparam(&x, Some(string(2)))], ret, spec_loc);
    let exp = program.cst(Constant::Char('a'), program.span_in(line, "'a'", 0));
    let def_loc = program.span_in(line, "def first(x: String): Char = 'a'", 0);
    let def = ast::named::Def { sym, spec, exp, loc: def_loc };
    let tpe = string(0);
    program.root.instances.push(Instance {
        ann: Annotations::default(),
        trait_use,
        tpe,
        tconstrs: vec![],
        assocs: vec![assoc],
        defs: vec![def],
        loc: line,
    });

    Elems { program, main, coll, elm, first }
}
