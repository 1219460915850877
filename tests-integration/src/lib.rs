//! Builders for name-resolved programs whose locations point into real text.
//!
//! Tests write a program as source text, then build its name-resolved AST
//! node by node. Every location is found by searching the text with
//! [`Program::span`], so positions in assertions match what an editor
//! would report.

pub mod fixtures;
pub mod report;

use std::fmt::Write;

use analyzer::rename::TextEdit;
use ast::named::{self, Expr, ExprKind, FormalParam, Pattern, PatternKind};
use ast::{BinaryOp, Constant, TypeExpr};
use checking::CheckError;
use files::{FileId, Files, SourceLocation, SourcePosition};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use symbols::{
    AssocTypeSym, CaseSym, DefnSym, EffectSym, EnumSym, Fresh, Kind, OpSym, SigSym, StructFieldSym,
    StructSym, SymUse, TraitSym, TypeAliasSym, TypeVarSym, VarSym,
};
use types::TypeConstructor;

#[derive(Debug, Default)]
pub struct Program {
    pub root: named::Root,
    files: Files,
    texts: FxHashMap<FileId, String>,
    fresh: Fresh,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn file(&mut self, path: &str, text: &str) -> FileId {
        let file = self.files.insert(path);
        self.texts.insert(file, text.to_string());
        file
    }

    pub fn files(&self) -> &Files {
        &self.files
    }

    pub fn text(&self, file: FileId) -> &str {
        &self.texts[&file]
    }

    /// The location of the `nth` occurrence of `needle`, counting from zero.
    pub fn span(&self, file: FileId, needle: &str, nth: usize) -> SourceLocation {
        let text = self.text(file);
        let Some((offset, _)) = text.match_indices(needle).nth(nth) else {
            panic!("'{needle}' does not occur {} times", nth + 1);
        };
        let start = position_at(text, offset);
        let end = position_at(text, offset + needle.len());
        SourceLocation::new(file, start, end)
    }

    /// The location of the `nth` occurrence of `needle` inside `outer`.
    pub fn span_in(&self, outer: SourceLocation, needle: &str, nth: usize) -> SourceLocation {
        let text = self.text(outer.file);
        let (start, end) = (offset_at(text, outer.start), offset_at(text, outer.end));
        let Some((offset, _)) = text[start..end].match_indices(needle).nth(nth) else {
            panic!("'{needle}' does not occur {} times in {outer}", nth + 1);
        };
        let offset = start + offset;
        let start = position_at(text, offset);
        let end = position_at(text, offset + needle.len());
        SourceLocation::new(outer.file, start, end)
    }

    /// A position `column` characters into the `nth` occurrence of `needle`.
    pub fn position(&self, file: FileId, needle: &str, nth: usize, column: u32) -> SourcePosition {
        let start = self.span(file, needle, nth).start;
        SourcePosition::new(start.line, start.column + column)
    }

    /// The whole of a 1-based line, excluding the line break.
    pub fn line(&self, file: FileId, line: u32) -> SourceLocation {
        let Some(content) = self.text(file).lines().nth(line as usize - 1) else {
            panic!("line {line} does not exist");
        };
        let width = content.chars().count() as u32;
        SourceLocation::on_line(file, line, 1, width + 1)
    }

    /// Spans from the start of `first` to the end of `last`.
    pub fn between(&self, first: SourceLocation, last: SourceLocation) -> SourceLocation {
        SourceLocation::new(first.file, first.start, last.end)
    }

    pub fn defn_sym(&self, name: &str, loc: SourceLocation) -> DefnSym {
        DefnSym { namespace: vec![], name: SmolStr::new(name), loc }
    }

    pub fn enum_sym(&self, name: &str, loc: SourceLocation) -> EnumSym {
        EnumSym { namespace: vec![], name: SmolStr::new(name), loc }
    }

    pub fn case_sym(&self, enum_sym: &EnumSym, name: &str, loc: SourceLocation) -> CaseSym {
        CaseSym { enum_sym: enum_sym.clone(), name: SmolStr::new(name), loc }
    }

    pub fn trait_sym(&self, name: &str, loc: SourceLocation) -> TraitSym {
        TraitSym { namespace: vec![], name: SmolStr::new(name), loc }
    }

    pub fn sig_sym(&self, trait_sym: &TraitSym, name: &str, loc: SourceLocation) -> SigSym {
        SigSym { trait_sym: trait_sym.clone(), name: SmolStr::new(name), loc }
    }

    pub fn struct_sym(&self, name: &str, loc: SourceLocation) -> StructSym {
        StructSym { namespace: vec![], name: SmolStr::new(name), loc }
    }

    pub fn field_sym(&self, struct_sym: &StructSym, name: &str, loc: SourceLocation) -> StructFieldSym {
        StructFieldSym { struct_sym: struct_sym.clone(), name: SmolStr::new(name), loc }
    }

    pub fn alias_sym(&self, name: &str, loc: SourceLocation) -> TypeAliasSym {
        TypeAliasSym { namespace: vec![], name: SmolStr::new(name), loc }
    }

    pub fn assoc_type_sym(&self, trait_sym: &TraitSym, name: &str, loc: SourceLocation) -> AssocTypeSym {
        AssocTypeSym { trait_sym: trait_sym.clone(), name: SmolStr::new(name), loc }
    }

    pub fn effect_sym(&self, name: &str, loc: SourceLocation) -> EffectSym {
        EffectSym { namespace: vec![], name: SmolStr::new(name), loc }
    }

    pub fn op_sym(&self, effect_sym: &EffectSym, name: &str, loc: SourceLocation) -> OpSym {
        OpSym { effect_sym: effect_sym.clone(), name: SmolStr::new(name), loc }
    }

    pub fn var_sym(&self, text: &str, loc: SourceLocation) -> VarSym {
        self.fresh.fresh_var_sym(text, loc)
    }

    pub fn type_param(&self, text: &str, loc: SourceLocation) -> TypeVarSym {
        self.fresh.fresh_rigid(text, Kind::Star, loc)
    }

    pub fn primitive(&self, constructor: TypeConstructor, loc: SourceLocation) -> TypeExpr {
        TypeExpr::Primitive { constructor, loc }
    }

    pub fn type_var(&self, sym: &TypeVarSym, loc: SourceLocation) -> TypeExpr {
        TypeExpr::Var { sym: sym.clone(), loc }
    }

    pub fn enum_type(&self, sym: &EnumSym, loc: SourceLocation) -> TypeExpr {
        TypeExpr::Enum { sym: SymUse::new(sym.clone(), loc), args: vec![], loc }
    }

    pub fn struct_type(&self, sym: &StructSym, loc: SourceLocation) -> TypeExpr {
        TypeExpr::Struct { sym: SymUse::new(sym.clone(), loc), args: vec![], loc }
    }

    pub fn alias_type(&self, sym: &TypeAliasSym, loc: SourceLocation) -> TypeExpr {
        TypeExpr::Alias { sym: SymUse::new(sym.clone(), loc), args: vec![], loc }
    }

    /// A parameter spanning from its name to the end of its annotation.
    pub fn fparam(&self, sym: &VarSym, tpe: Option<TypeExpr>) -> FormalParam {
        let loc = match &tpe {
            Some(tpe) => self.between(sym.loc, tpe.loc()),
            None => sym.loc,
        };
        FormalParam { sym: sym.clone(), tpe, loc }
    }

    pub fn spec(
        &self,
        tparams: Vec<TypeVarSym>,
        fparams: Vec<FormalParam>,
        ret: TypeExpr,
        loc: SourceLocation,
    ) -> named::Spec {
        named::Spec { ann: Default::default(), tparams, fparams, ret, tconstrs: vec![], loc }
    }

    pub fn def(&mut self, sym: &DefnSym, spec: named::Spec, exp: Expr, loc: SourceLocation) {
        self.root.defs.push(named::Def { sym: sym.clone(), spec, exp, loc });
    }

    pub fn expr(&self, kind: ExprKind, loc: SourceLocation) -> Expr {
        let tvar = self.fresh.fresh_type_var(Kind::Star, loc);
        Expr { kind, tvar, loc }
    }

    pub fn cst(&self, constant: Constant, loc: SourceLocation) -> Expr {
        self.expr(ExprKind::Cst(constant), loc)
    }

    pub fn var(&self, sym: &VarSym, loc: SourceLocation) -> Expr {
        self.expr(ExprKind::Var(sym.clone()), loc)
    }

    pub fn def_use(&self, sym: &DefnSym, loc: SourceLocation) -> Expr {
        self.expr(ExprKind::Def(sym.clone()), loc)
    }

    pub fn sig_use(&self, sym: &SigSym, loc: SourceLocation) -> Expr {
        self.expr(ExprKind::Sig(sym.clone()), loc)
    }

    /// `callee(args...)`, spanning from the callee to the end of `loc`.
    pub fn apply(&self, callee: Expr, exps: Vec<Expr>, loc: SourceLocation) -> Expr {
        self.expr(ExprKind::Apply { exp: Box::new(callee), exps }, loc)
    }

    pub fn binary(&self, op: BinaryOp, exp1: Expr, exp2: Expr) -> Expr {
        let loc = self.between(exp1.loc, exp2.loc);
        self.expr(ExprKind::Binary { op, exp1: Box::new(exp1), exp2: Box::new(exp2) }, loc)
    }

    pub fn if_then_else(&self, exp1: Expr, exp2: Expr, exp3: Expr, loc: SourceLocation) -> Expr {
        let kind =
            ExprKind::IfThenElse { exp1: Box::new(exp1), exp2: Box::new(exp2), exp3: Box::new(exp3) };
        self.expr(kind, loc)
    }

    pub fn let_(&self, sym: &VarSym, exp1: Expr, exp2: Expr, loc: SourceLocation) -> Expr {
        let kind = ExprKind::Let { sym: sym.clone(), exp1: Box::new(exp1), exp2: Box::new(exp2) };
        self.expr(kind, loc)
    }

    pub fn tag(&self, sym: &CaseSym, payload: Option<Expr>, loc: SourceLocation) -> Expr {
        let kind = ExprKind::Tag { sym: SymUse::new(sym.clone(), loc), exp: payload.map(Box::new) };
        self.expr(kind, loc)
    }

    pub fn pattern(&self, kind: PatternKind, loc: SourceLocation) -> Pattern {
        let tvar = self.fresh.fresh_type_var(Kind::Star, loc);
        Pattern { kind, tvar, loc }
    }

    pub fn tag_pattern(&self, sym: &CaseSym, loc: SourceLocation) -> Pattern {
        self.pattern(PatternKind::Tag { sym: SymUse::new(sym.clone(), loc), pat: None }, loc)
    }

    /// The program as handed to inference.
    pub fn named(&self) -> named::Root {
        let mut root = self.root.clone();
        root.files = self.files.clone();
        root.next_id = self.fresh.fresh_id();
        root
    }

    pub fn check(&self) -> Result<ast::typed::Root, CheckError> {
        checking::check(&self.named())
    }

    /// Applies `edits` to the text of `file`.
    pub fn apply_edits<'e>(
        &self,
        file: FileId,
        edits: impl IntoIterator<Item = &'e TextEdit>,
    ) -> String {
        let text = self.text(file);
        let mut edits: Vec<_> = edits.into_iter().filter(|edit| edit.loc.file == file).collect();
        edits.sort_by_key(|edit| std::cmp::Reverse(edit.loc.start));

        let mut result = text.to_string();
        for edit in edits {
            let start = offset_at(text, edit.loc.start);
            let end = offset_at(text, edit.loc.end);
            result.replace_range(start..end, &edit.new_text);
        }
        result
    }

    /// Renders `loc` as the text it covers, prefixed with its position.
    pub fn quote(&self, loc: SourceLocation) -> String {
        let text = self.text(loc.file);
        let (start, end) = (offset_at(text, loc.start), offset_at(text, loc.end));
        let mut buffer = String::default();
        write!(buffer, "{}:{} '{}'", loc.start.line, loc.start.column, &text[start..end]).unwrap();
        buffer
    }
}

fn position_at(text: &str, offset: usize) -> SourcePosition {
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32 + 1;
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    let column = text[line_start..offset].chars().count() as u32 + 1;
    SourcePosition::new(line, column)
}

fn offset_at(text: &str, position: SourcePosition) -> usize {
    let mut line_start = 0;
    for _ in 1..position.line {
        line_start += text[line_start..].find('\n').map_or(text.len() - line_start, |i| i + 1);
    }
    text[line_start..]
        .char_indices()
        .nth(position.column as usize - 1)
        .map_or(text.len(), |(index, _)| line_start + index)
}
