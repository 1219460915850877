//! Name-resolved programs, as handed to inference.

use files::{Files, SourceLocation};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use symbols::{
    AssocTypeSym, CaseSym, DefnSym, EffectSym, EnumSym, OpSym, SigSym, StructFieldSym, StructSym,
    SymUse, TraitSym, TypeAliasSym, TypeVarSym, VarSym,
};
use types::Denotation;

use crate::{
    Annotations, BinaryOp, Constant, Ident, Polarity, TraitConstraintExpr, TypeExpr, UnaryOp,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Root {
    pub files: Files,
    /// The first id not yet used by any symbol in this program.
    pub next_id: u32,
    pub defs: Vec<Def>,
    pub enums: Vec<Enum>,
    pub structs: Vec<Struct>,
    pub aliases: Vec<TypeAlias>,
    pub traits: Vec<Trait>,
    pub instances: Vec<Instance>,
    pub effects: Vec<Effect>,
    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub ann: Annotations,
    pub tparams: Vec<TypeVarSym>,
    pub fparams: Vec<FormalParam>,
    pub ret: TypeExpr,
    #[serde(default)]
    pub tconstrs: Vec<TraitConstraintExpr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormalParam {
    pub sym: VarSym,
    pub tpe: Option<TypeExpr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Def {
    pub sym: DefnSym,
    pub spec: Spec,
    pub exp: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enum {
    #[serde(default)]
    pub ann: Annotations,
    pub sym: EnumSym,
    pub tparams: Vec<TypeVarSym>,
    pub cases: Vec<Case>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub sym: CaseSym,
    /// `None` for cases without a payload.
    pub tpe: Option<TypeExpr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Struct {
    #[serde(default)]
    pub ann: Annotations,
    pub sym: StructSym,
    pub tparams: Vec<TypeVarSym>,
    pub fields: Vec<StructField>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructField {
    pub sym: StructFieldSym,
    pub tpe: TypeExpr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeAlias {
    #[serde(default)]
    pub ann: Annotations,
    pub sym: TypeAliasSym,
    pub tparams: Vec<TypeVarSym>,
    pub tpe: TypeExpr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trait {
    #[serde(default)]
    pub ann: Annotations,
    pub sym: TraitSym,
    pub tparam: TypeVarSym,
    #[serde(default)]
    pub super_traits: Vec<TraitConstraintExpr>,
    #[serde(default)]
    pub assocs: Vec<AssocTypeSig>,
    pub sigs: Vec<Sig>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssocTypeSig {
    pub sym: AssocTypeSym,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sig {
    pub sym: SigSym,
    pub spec: Spec,
    /// The default implementation, if any.
    pub exp: Option<Expr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default)]
    pub ann: Annotations,
    pub trait_use: SymUse<TraitSym>,
    pub tpe: TypeExpr,
    #[serde(default)]
    pub tconstrs: Vec<TraitConstraintExpr>,
    #[serde(default)]
    pub assocs: Vec<AssocTypeDef>,
    pub defs: Vec<Def>,
    pub loc: SourceLocation,
}

/// `type Trait.Assoc[arg] = tpe` inside an instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssocTypeDef {
    pub sym: SymUse<AssocTypeSym>,
    pub arg: TypeExpr,
    pub tpe: TypeExpr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    #[serde(default)]
    pub ann: Annotations,
    pub sym: EffectSym,
    pub ops: Vec<Op>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Op {
    pub sym: OpSym,
    pub spec: Spec,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    #[serde(default)]
    pub ann: Annotations,
    pub name: Ident,
    pub den: Denotation,
    pub attributes: Vec<TypeExpr>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub tvar: TypeVarSym,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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
    Ascribe { exp: Box<Expr>, tpe: TypeExpr },
    Do { op: SymUse<OpSym>, exps: Vec<Expr> },
    TryWith { exp: Box<Expr>, effect: SymUse<EffectSym>, rules: Vec<HandlerRule> },
    FixpointConstraintSet(Vec<Constraint>),
    FixpointMerge { exp1: Box<Expr>, exp2: Box<Expr> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRule {
    pub pat: Pattern,
    pub guard: Option<Expr>,
    pub exp: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMatchRule {
    pub sym: VarSym,
    pub tpe: TypeExpr,
    pub exp: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInit {
    pub field: SymUse<StructFieldSym>,
    pub exp: Expr,
}

/// `def op(x, resume) = exp` inside a `with` block.
///
/// The last formal parameter is the resumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerRule {
    pub op: SymUse<OpSym>,
    pub fparams: Vec<FormalParam>,
    pub exp: Expr,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub tvar: TypeVarSym,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PatternKind {
    Wild,
    Var(VarSym),
    Cst(Constant),
    Tag { sym: SymUse<CaseSym>, pat: Option<Box<Pattern>> },
    Tuple(Vec<Pattern>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    pub cparams: Vec<ConstraintParam>,
    pub head: Head,
    pub body: Vec<Body>,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintParam {
    pub sym: VarSym,
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Head {
    Atom { pred: Ident, terms: Vec<Expr>, loc: SourceLocation },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Body {
    Atom { pred: Ident, polarity: Polarity, terms: Vec<Pattern>, loc: SourceLocation },
    Guard { exp: Expr, loc: SourceLocation },
}
