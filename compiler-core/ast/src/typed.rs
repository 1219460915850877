//! Fully-typed programs, as produced by inference.
//!
//! The [`Root`] owns every declaration; nodes refer to each other only
//! through symbols, which are resolved with the lookup methods on [`Root`].

use files::{Files, SourceLocation};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use symbols::{
    AssocTypeSym, CaseSym, DefnSym, EffectSym, EnumSym, OpSym, SigSym, StructFieldSym, StructSym,
    SymUse, TraitSym, TypeAliasSym, TypeVarSym, VarSym,
};
use types::{Denotation, Scheme, Type};

use crate::{Annotations, BinaryOp, Constant, Ident, Polarity, TypeExpr, UnaryOp};

#[derive(Debug, Default)]
pub struct Root {
    pub files: Files,
    pub defs: FxHashMap<DefnSym, Def>,
    pub enums: FxHashMap<EnumSym, Enum>,
    pub structs: FxHashMap<StructSym, Struct>,
    pub aliases: FxHashMap<TypeAliasSym, TypeAlias>,
    pub traits: FxHashMap<TraitSym, Trait>,
    pub instances: FxHashMap<TraitSym, Vec<Instance>>,
    pub effects: FxHashMap<EffectSym, Effect>,
    pub relations: FxHashMap<SmolStr, Relation>,
}

impl Root {
    pub fn def(&self, sym: &DefnSym) -> Option<&Def> {
        self.defs.get(sym)
    }

    pub fn enum_(&self, sym: &EnumSym) -> Option<&Enum> {
        self.enums.get(sym)
    }

    pub fn case(&self, sym: &CaseSym) -> Option<&Case> {
        self.enum_(&sym.enum_sym)?.cases.iter().find(|case| &case.sym == sym)
    }

    pub fn struct_(&self, sym: &StructSym) -> Option<&Struct> {
        self.structs.get(sym)
    }

    pub fn field(&self, sym: &StructFieldSym) -> Option<&StructField> {
        self.struct_(&sym.struct_sym)?.fields.iter().find(|field| &field.sym == sym)
    }

    pub fn alias(&self, sym: &TypeAliasSym) -> Option<&TypeAlias> {
        self.aliases.get(sym)
    }

    pub fn trait_(&self, sym: &TraitSym) -> Option<&Trait> {
        self.traits.get(sym)
    }

    pub fn sig(&self, sym: &SigSym) -> Option<&Sig> {
        self.trait_(&sym.trait_sym)?.sigs.iter().find(|sig| &sig.sym == sym)
    }

    pub fn assoc_type(&self, sym: &AssocTypeSym) -> Option<&AssocTypeSig> {
        self.trait_(&sym.trait_sym)?.assocs.iter().find(|assoc| &assoc.sym == sym)
    }

    pub fn instances_of(&self, sym: &TraitSym) -> &[Instance] {
        self.instances.get(sym).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn effect(&self, sym: &EffectSym) -> Option<&Effect> {
        self.effects.get(sym)
    }

    pub fn op(&self, sym: &OpSym) -> Option<&Op> {
        self.effect(&sym.effect_sym)?.ops.iter().find(|op| &op.sym == sym)
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }
}

/// A written type together with the type it denotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub syntax: TypeExpr,
    pub tpe: Type,
}

impl Annotation {
    pub fn loc(&self) -> SourceLocation {
        self.syntax.loc()
    }
}

#[derive(Debug, Clone)]
pub struct TraitConstraint {
    pub head: SymUse<TraitSym>,
    pub arg: Annotation,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Spec {
    pub ann: Annotations,
    pub tparams: Vec<TypeVarSym>,
    pub fparams: Vec<FormalParam>,
    pub ret: Annotation,
    pub tconstrs: Vec<TraitConstraint>,
    /// The declared type, generalised over `tparams`.
    pub scheme: Scheme,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct FormalParam {
    pub sym: VarSym,
    pub ann: Option<Annotation>,
    pub tpe: Type,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Def {
    pub sym: DefnSym,
    pub spec: Spec,
    pub exp: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Enum {
    pub ann: Annotations,
    pub sym: EnumSym,
    pub tparams: Vec<TypeVarSym>,
    pub cases: Vec<Case>,
    pub loc: SourceLocation,
}

impl Enum {
    pub fn tpe(&self) -> Type {
        let arguments = self.tparams.iter().cloned().map(Type::Var).collect();
        Type::Enum(self.sym.clone(), arguments)
    }
}

#[derive(Debug, Clone)]
pub struct Case {
    pub sym: CaseSym,
    pub tpe: Option<Annotation>,
    pub loc: SourceLocation,
}

impl Case {
    /// The payload type, `Unit` for cases without one.
    pub fn payload(&self) -> Type {
        self.tpe.as_ref().map_or(Type::UNIT, |annotation| annotation.tpe.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Struct {
    pub ann: Annotations,
    pub sym: StructSym,
    pub tparams: Vec<TypeVarSym>,
    pub fields: Vec<StructField>,
    pub loc: SourceLocation,
}

impl Struct {
    pub fn tpe(&self) -> Type {
        let arguments = self.tparams.iter().cloned().map(Type::Var).collect();
        Type::Struct(self.sym.clone(), arguments)
    }
}

#[derive(Debug, Clone)]
pub struct StructField {
    pub sym: StructFieldSym,
    pub tpe: Annotation,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct TypeAlias {
    pub ann: Annotations,
    pub sym: TypeAliasSym,
    pub tparams: Vec<TypeVarSym>,
    pub tpe: Annotation,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Trait {
    pub ann: Annotations,
    pub sym: TraitSym,
    pub tparam: TypeVarSym,
    pub super_traits: Vec<TraitConstraint>,
    pub assocs: Vec<AssocTypeSig>,
    pub sigs: Vec<Sig>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct AssocTypeSig {
    pub sym: AssocTypeSym,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Sig {
    pub sym: SigSym,
    pub spec: Spec,
    pub exp: Option<Expr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Instance {
    pub ann: Annotations,
    pub trait_use: SymUse<TraitSym>,
    pub tpe: Annotation,
    pub tconstrs: Vec<TraitConstraint>,
    pub assocs: Vec<AssocTypeDef>,
    pub defs: Vec<Def>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct AssocTypeDef {
    pub sym: SymUse<AssocTypeSym>,
    pub arg: Annotation,
    pub tpe: Annotation,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Effect {
    pub ann: Annotations,
    pub sym: EffectSym,
    pub ops: Vec<Op>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Op {
    pub sym: OpSym,
    pub spec: Spec,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Relation {
    pub ann: Annotations,
    pub name: Ident,
    pub den: Denotation,
    pub attributes: Vec<Annotation>,
    pub loc: SourceLocation,
}

impl Relation {
    pub fn tpe(&self) -> Type {
        let attributes = self.attributes.iter().map(|a| a.tpe.clone()).collect();
        Type::Predicate(self.den, attributes)
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub tpe: Type,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Cst(Constant),
    Var(VarSym),
    Def(DefnSym),
    Sig(SigSym),
    Hole(Option<SmolStr>),
    Lambda { fparam: FormalParam, exp: Box<Expr> },
    Apply { exp: Box<Expr>, exps: Vec<Expr> },
    Unary { op: UnaryOp, exp: Box<Expr> },
    Binary { op: BinaryOp, exp1: Box<Expr>, exp2: Box<Expr> },
    IfThenElse { exp1: Box<Expr>, exp2: Box<Expr>, exp3: Box<Expr> },
    Stm { exp1: Box<Expr>, exp2: Box<Expr> },
    Let { sym: VarSym, exp1: Box<Expr>, exp2: Box<Expr> },
    Match { exp: Box<Expr>, rules: Vec<MatchRule> },
    TypeMatch { exp: Box<Expr>, rules: Vec<TypeMatchRule> },
    Tag { sym: SymUse<CaseSym>, exp: Option<Box<Expr>> },
    Tuple(Vec<Expr>),
    StructNew { sym: SymUse<StructSym>, fields: Vec<FieldInit> },
    StructGet { exp: Box<Expr>, field: SymUse<StructFieldSym> },
    Ascribe { exp: Box<Expr>, tpe: Annotation },
    Do { op: SymUse<OpSym>, exps: Vec<Expr> },
    TryWith { exp: Box<Expr>, effect: SymUse<EffectSym>, rules: Vec<HandlerRule> },
    FixpointConstraintSet(Vec<Constraint>),
    FixpointMerge { exp1: Box<Expr>, exp2: Box<Expr> },
}

#[derive(Debug, Clone)]
pub struct MatchRule {
    pub pat: Pattern,
    pub guard: Option<Expr>,
    pub exp: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct TypeMatchRule {
    pub sym: VarSym,
    pub tpe: Annotation,
    pub exp: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct FieldInit {
    pub field: SymUse<StructFieldSym>,
    pub exp: Expr,
}

#[derive(Debug, Clone)]
pub struct HandlerRule {
    pub op: SymUse<OpSym>,
    pub fparams: Vec<FormalParam>,
    pub exp: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct Pattern {
    pub kind: PatternKind,
    pub tpe: Type,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub enum PatternKind {
    Wild,
    Var(VarSym),
    Cst(Constant),
    Tag { sym: SymUse<CaseSym>, pat: Option<Box<Pattern>> },
    Tuple(Vec<Pattern>),
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub cparams: Vec<ConstraintParam>,
    pub head: Head,
    pub body: Vec<Body>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub struct ConstraintParam {
    pub sym: VarSym,
    pub tpe: Type,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone)]
pub enum Head {
    Atom { pred: Ident, den: Denotation, terms: Vec<Expr>, tpe: Type, loc: SourceLocation },
}

#[derive(Debug, Clone)]
pub enum Body {
    Atom {
        pred: Ident,
        den: Denotation,
        polarity: Polarity,
        terms: Vec<Pattern>,
        tpe: Type,
        loc: SourceLocation,
    },
    Guard { exp: Expr, loc: SourceLocation },
}
