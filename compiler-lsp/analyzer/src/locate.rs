//! Finds the node under the cursor and the symbol it refers to.

use std::fmt;

use ast::typed::{
    Annotation, AssocTypeDef, AssocTypeSig, Body, Case, Constraint, ConstraintParam, Def, Effect,
    Enum, Expr, ExprKind, FormalParam, HandlerRule, Head, Instance, MatchRule, Op, Pattern,
    PatternKind, Relation, Root, Sig, Struct, StructField, Trait, TraitConstraint, TypeAlias,
    TypeMatchRule,
};
use ast::{Ident, TypeExpr};
use files::{FileId, SourceLocation, SourcePosition};
use smol_str::SmolStr;
use symbols::{
    AssocTypeSym, CaseSym, EffectSym, EnumSym, OpSym, StructFieldSym, StructSym, SymUse, Symbol,
    TraitSym, TypeAliasSym, TypeVarSym, VarSym,
};
use types::Type;
use visiting::{Consumer, InsideAcceptor, visit_root};

use crate::span::split_compound;

/// A node recorded while walking towards a position.
#[derive(Debug, Clone, Copy)]
pub enum Node<'r> {
    Def(&'r Def),
    Enum(&'r Enum),
    Case(&'r Case),
    Struct(&'r Struct),
    StructField(&'r StructField),
    TypeAlias(&'r TypeAlias),
    Trait(&'r Trait),
    AssocTypeSig(&'r AssocTypeSig),
    Sig(&'r Sig),
    Instance(&'r Instance),
    AssocTypeDef(&'r AssocTypeDef),
    Effect(&'r Effect),
    Op(&'r Op),
    Relation(&'r Relation),
    Expr(&'r Expr),
    Pattern(&'r Pattern),
    Annotation(&'r Annotation),
    TypeExpr(&'r TypeExpr),
    MatchRule(&'r MatchRule),
    TypeMatchRule(&'r TypeMatchRule),
    HandlerRule(&'r HandlerRule),
    Constraint(&'r Constraint),
    ConstraintParam(&'r ConstraintParam),
    HeadPred(&'r Head),
    BodyPred(&'r Body),
    TypeParam(&'r TypeVarSym),
    FormalParam(&'r FormalParam),
    VarBinder(&'r VarSym, &'r Type),
    TraitConstraint(&'r TraitConstraint),
    TraitUse(&'r SymUse<TraitSym>),
    EffectUse(&'r SymUse<EffectSym>),
    OpUse(&'r SymUse<OpSym>),
    EnumUse(&'r SymUse<EnumSym>),
    CaseUse(&'r SymUse<CaseSym>),
    StructUse(&'r SymUse<StructSym>),
    StructFieldUse(&'r SymUse<StructFieldSym>),
    TypeAliasUse(&'r SymUse<TypeAliasSym>),
    AssocTypeUse(&'r SymUse<AssocTypeSym>),
    PredUse(&'r Ident),
}

impl Node<'_> {
    pub fn loc(&self) -> SourceLocation {
        match self {
            Node::Def(def) => def.loc,
            Node::Enum(enum_) => enum_.loc,
            Node::Case(case) => case.loc,
            Node::Struct(struct_) => struct_.loc,
            Node::StructField(field) => field.loc,
            Node::TypeAlias(alias) => alias.loc,
            Node::Trait(trait_) => trait_.loc,
            Node::AssocTypeSig(assoc) => assoc.loc,
            Node::Sig(sig) => sig.loc,
            Node::Instance(instance) => instance.loc,
            Node::AssocTypeDef(assoc) => assoc.loc,
            Node::Effect(effect) => effect.loc,
            Node::Op(op) => op.loc,
            Node::Relation(relation) => relation.loc,
            Node::Expr(exp) => exp.loc,
            Node::Pattern(pat) => pat.loc,
            Node::Annotation(annotation) => annotation.loc(),
            Node::TypeExpr(tpe) => tpe.loc(),
            Node::MatchRule(rule) => rule.loc,
            Node::TypeMatchRule(rule) => rule.loc,
            Node::HandlerRule(rule) => rule.loc,
            Node::Constraint(constraint) => constraint.loc,
            Node::ConstraintParam(cparam) => cparam.loc,
            Node::HeadPred(Head::Atom { loc, .. }) => *loc,
            Node::BodyPred(Body::Atom { loc, .. } | Body::Guard { loc, .. }) => *loc,
            Node::TypeParam(tparam) => tparam.loc,
            Node::FormalParam(fparam) => fparam.loc,
            Node::VarBinder(sym, _) => sym.loc,
            Node::TraitConstraint(constraint) => constraint.loc,
            Node::TraitUse(u) => u.loc,
            Node::EffectUse(u) => u.loc,
            Node::OpUse(u) => u.loc,
            Node::EnumUse(u) => u.loc,
            Node::CaseUse(u) => u.loc,
            Node::StructUse(u) => u.loc,
            Node::StructFieldUse(u) => u.loc,
            Node::TypeAliasUse(u) => u.loc,
            Node::AssocTypeUse(u) => u.loc,
            Node::PredUse(ident) => ident.loc,
        }
    }

    /// Handler rules and type match rules count as written even when their
    /// location was synthesized.
    pub fn is_real(&self) -> bool {
        match self {
            Node::HandlerRule(_) | Node::TypeMatchRule(_) => true,
            _ => self.loc().is_real(),
        }
    }
}

#[derive(Default)]
struct StackConsumer<'r> {
    stack: Vec<Node<'r>>,
}

impl<'r> Consumer<'r> for StackConsumer<'r> {
    fn consume_def(&mut self, def: &'r Def) {
        self.stack.push(Node::Def(def));
    }

    fn consume_enum(&mut self, enum_: &'r Enum) {
        self.stack.push(Node::Enum(enum_));
    }

    fn consume_case(&mut self, case: &'r Case) {
        self.stack.push(Node::Case(case));
    }

    fn consume_struct(&mut self, struct_: &'r Struct) {
        self.stack.push(Node::Struct(struct_));
    }

    fn consume_struct_field(&mut self, field: &'r StructField) {
        self.stack.push(Node::StructField(field));
    }

    fn consume_type_alias(&mut self, alias: &'r TypeAlias) {
        self.stack.push(Node::TypeAlias(alias));
    }

    fn consume_trait(&mut self, trait_: &'r Trait) {
        self.stack.push(Node::Trait(trait_));
    }

    fn consume_assoc_type_sig(&mut self, assoc: &'r AssocTypeSig) {
        self.stack.push(Node::AssocTypeSig(assoc));
    }

    fn consume_sig(&mut self, sig: &'r Sig) {
        self.stack.push(Node::Sig(sig));
    }

    fn consume_instance(&mut self, instance: &'r Instance) {
        self.stack.push(Node::Instance(instance));
    }

    fn consume_assoc_type_def(&mut self, assoc: &'r AssocTypeDef) {
        self.stack.push(Node::AssocTypeDef(assoc));
    }

    fn consume_effect(&mut self, effect: &'r Effect) {
        self.stack.push(Node::Effect(effect));
    }

    fn consume_op(&mut self, op: &'r Op) {
        self.stack.push(Node::Op(op));
    }

    fn consume_relation(&mut self, relation: &'r Relation) {
        self.stack.push(Node::Relation(relation));
    }

    fn consume_expr(&mut self, exp: &'r Expr) {
        self.stack.push(Node::Expr(exp));
    }

    fn consume_pattern(&mut self, pat: &'r Pattern) {
        self.stack.push(Node::Pattern(pat));
    }

    fn consume_annotation(&mut self, annotation: &'r Annotation) {
        self.stack.push(Node::Annotation(annotation));
    }

    fn consume_type_expr(&mut self, tpe: &'r TypeExpr) {
        self.stack.push(Node::TypeExpr(tpe));
    }

    fn consume_match_rule(&mut self, rule: &'r MatchRule) {
        self.stack.push(Node::MatchRule(rule));
    }

    fn consume_type_match_rule(&mut self, rule: &'r TypeMatchRule) {
        self.stack.push(Node::TypeMatchRule(rule));
    }

    fn consume_handler_rule(&mut self, rule: &'r HandlerRule) {
        self.stack.push(Node::HandlerRule(rule));
    }

    fn consume_constraint(&mut self, constraint: &'r Constraint) {
        self.stack.push(Node::Constraint(constraint));
    }

    fn consume_constraint_param(&mut self, cparam: &'r ConstraintParam) {
        self.stack.push(Node::ConstraintParam(cparam));
    }

    fn consume_head_pred(&mut self, head: &'r Head) {
        self.stack.push(Node::HeadPred(head));
    }

    fn consume_body_pred(&mut self, body: &'r Body) {
        self.stack.push(Node::BodyPred(body));
    }

    fn consume_type_param(&mut self, tparam: &'r TypeVarSym) {
        self.stack.push(Node::TypeParam(tparam));
    }

    fn consume_formal_param(&mut self, fparam: &'r FormalParam) {
        self.stack.push(Node::FormalParam(fparam));
    }

    fn consume_var_binder(&mut self, sym: &'r VarSym, tpe: &'r Type) {
        self.stack.push(Node::VarBinder(sym, tpe));
    }

    fn consume_trait_constraint(&mut self, constraint: &'r TraitConstraint) {
        self.stack.push(Node::TraitConstraint(constraint));
    }

    fn consume_trait_use(&mut self, trait_use: &'r SymUse<TraitSym>) {
        self.stack.push(Node::TraitUse(trait_use));
    }

    fn consume_effect_use(&mut self, effect_use: &'r SymUse<EffectSym>) {
        self.stack.push(Node::EffectUse(effect_use));
    }

    fn consume_op_use(&mut self, op_use: &'r SymUse<OpSym>) {
        self.stack.push(Node::OpUse(op_use));
    }

    fn consume_enum_use(&mut self, enum_use: &'r SymUse<EnumSym>) {
        self.stack.push(Node::EnumUse(enum_use));
    }

    fn consume_case_use(&mut self, case_use: &'r SymUse<CaseSym>) {
        self.stack.push(Node::CaseUse(case_use));
    }

    fn consume_struct_use(&mut self, struct_use: &'r SymUse<StructSym>) {
        self.stack.push(Node::StructUse(struct_use));
    }

    fn consume_struct_field_use(&mut self, field_use: &'r SymUse<StructFieldSym>) {
        self.stack.push(Node::StructFieldUse(field_use));
    }

    fn consume_type_alias_use(&mut self, alias_use: &'r SymUse<TypeAliasSym>) {
        self.stack.push(Node::TypeAliasUse(alias_use));
    }

    fn consume_assoc_type_use(&mut self, assoc_use: &'r SymUse<AssocTypeSym>) {
        self.stack.push(Node::AssocTypeUse(assoc_use));
    }

    fn consume_pred_use(&mut self, pred: &'r Ident) {
        self.stack.push(Node::PredUse(pred));
    }
}

/// Every node whose location contains `position`, outermost first.
pub fn stack(root: &Root, file: FileId, position: SourcePosition) -> Vec<Node<'_>> {
    let mut consumer = StackConsumer::default();
    visit_root(root, &mut consumer, &InsideAcceptor::new(file, position));
    consumer.stack
}

/// The innermost written node at `position`.
#[tracing::instrument(skip_all, name = "locate")]
pub fn locate(root: &Root, file: FileId, position: SourcePosition) -> Option<Node<'_>> {
    let node = innermost(&stack(root, file, position));
    tracing::debug!(?position, found = node.is_some());
    node
}

fn innermost<'r>(stack: &[Node<'r>]) -> Option<Node<'r>> {
    stack.iter().rev().copied().find(Node::is_real)
}

/// What a cursor can point at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Symbol(Symbol),
    /// Relations are identified by name.
    Predicate(SmolStr),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Symbol(symbol) => write!(f, "{} {symbol}", symbol.describe()),
            Target::Predicate(name) => write!(f, "predicate {name}"),
        }
    }
}

impl Target {
    pub fn symbol(sym: impl Into<Symbol>) -> Target {
        Target::Symbol(sym.into())
    }
}

fn declared(loc: SourceLocation, position: SourcePosition, sym: impl Into<Symbol>) -> Option<Target> {
    loc.contains(position).then(|| Target::symbol(sym))
}

/// Classifies `node` into the entity it names, given the cursor position.
///
/// Declarations only name their symbol when the cursor is on the declared
/// name. Compound uses such as `Enum.Case` name the qualifier when the cursor
/// is on it.
pub fn classify(node: Node<'_>, position: SourcePosition) -> Option<Target> {
    match node {
        Node::Def(def) => declared(def.sym.loc, position, def.sym.clone()),
        Node::Enum(enum_) => declared(enum_.sym.loc, position, enum_.sym.clone()),
        Node::Case(case) => declared(case.sym.loc, position, case.sym.clone()),
        Node::Struct(struct_) => declared(struct_.sym.loc, position, struct_.sym.clone()),
        Node::StructField(field) => declared(field.sym.loc, position, field.sym.clone()),
        Node::TypeAlias(alias) => declared(alias.sym.loc, position, alias.sym.clone()),
        Node::Trait(trait_) => declared(trait_.sym.loc, position, trait_.sym.clone()),
        Node::AssocTypeSig(assoc) => Some(Target::symbol(assoc.sym.clone())),
        Node::Sig(sig) => declared(sig.sym.loc, position, sig.sym.clone()),
        Node::Effect(effect) => declared(effect.sym.loc, position, effect.sym.clone()),
        Node::Op(op) => declared(op.sym.loc, position, op.sym.clone()),
        Node::Relation(relation) => relation
            .name
            .loc
            .contains(position)
            .then(|| Target::Predicate(relation.name.name.clone())),

        Node::Expr(exp) => match &exp.kind {
            ExprKind::Var(sym) => Some(Target::symbol(sym.clone())),
            ExprKind::Def(sym) => Some(Target::symbol(sym.clone())),
            ExprKind::Sig(sym) => {
                let split = split_compound(exp.loc, &sym.trait_sym.name, &sym.name);
                if split.in_prefix(position) {
                    Some(Target::symbol(sym.trait_sym.clone()))
                } else {
                    Some(Target::symbol(sym.clone()))
                }
            }
            _ => None,
        },
        Node::Pattern(pat) => match &pat.kind {
            PatternKind::Var(sym) => Some(Target::symbol(sym.clone())),
            _ => None,
        },
        Node::TypeExpr(TypeExpr::Var { sym, .. }) => Some(Target::symbol(sym.clone())),

        Node::FormalParam(fparam) => declared(fparam.sym.loc, position, fparam.sym.clone()),
        Node::ConstraintParam(cparam) => Some(Target::symbol(cparam.sym.clone())),
        Node::VarBinder(sym, _) => Some(Target::symbol(sym.clone())),
        Node::TypeParam(tparam) => Some(Target::symbol(tparam.clone())),

        Node::TraitUse(u) => Some(Target::symbol(u.sym.clone())),
        Node::EffectUse(u) => Some(Target::symbol(u.sym.clone())),
        Node::EnumUse(u) => Some(Target::symbol(u.sym.clone())),
        Node::StructUse(u) => Some(Target::symbol(u.sym.clone())),
        Node::StructFieldUse(u) => Some(Target::symbol(u.sym.clone())),
        Node::TypeAliasUse(u) => Some(Target::symbol(u.sym.clone())),
        Node::OpUse(u) => {
            let split = split_compound(u.loc, &u.sym.effect_sym.name, &u.sym.name);
            if split.in_prefix(position) {
                Some(Target::symbol(u.sym.effect_sym.clone()))
            } else {
                Some(Target::symbol(u.sym.clone()))
            }
        }
        Node::CaseUse(u) => {
            let split = split_compound(u.loc, &u.sym.enum_sym.name, &u.sym.name);
            if split.in_prefix(position) {
                Some(Target::symbol(u.sym.enum_sym.clone()))
            } else {
                Some(Target::symbol(u.sym.clone()))
            }
        }
        Node::AssocTypeUse(u) => {
            let split = split_compound(u.loc, &u.sym.trait_sym.name, &u.sym.name);
            if split.in_prefix(position) {
                Some(Target::symbol(u.sym.trait_sym.clone()))
            } else {
                Some(Target::symbol(u.sym.clone()))
            }
        }

        Node::PredUse(ident) => Some(Target::Predicate(ident.name.clone())),
        Node::HeadPred(Head::Atom { pred, .. }) | Node::BodyPred(Body::Atom { pred, .. }) => {
            pred.loc.contains(position).then(|| Target::Predicate(pred.name.clone()))
        }

        Node::Instance(_)
        | Node::AssocTypeDef(_)
        | Node::Annotation(_)
        | Node::TypeExpr(_)
        | Node::MatchRule(_)
        | Node::TypeMatchRule(_)
        | Node::HandlerRule(_)
        | Node::Constraint(_)
        | Node::BodyPred(Body::Guard { .. })
        | Node::TraitConstraint(_) => None,
    }
}

/// The entity named at `position`, if any.
///
/// A def inside an instance names the trait signature it implements, so the
/// signature, its uses and every implementation are one entity.
pub fn target_at(root: &Root, file: FileId, position: SourcePosition) -> Option<Target> {
    let stack = stack(root, file, position);
    let node = innermost(&stack)?;
    let target = match node {
        Node::Def(def) => match implemented_sig(root, &stack, def) {
            Some(sig) => declared(def.sym.loc, position, sig.sym.clone()),
            None => classify(node, position),
        },
        _ => classify(node, position),
    };
    tracing::debug!(?position, found = ?target);
    target
}

/// The signature that `def` implements, when `def` belongs to an instance.
fn implemented_sig<'r>(root: &'r Root, stack: &[Node<'r>], def: &Def) -> Option<&'r Sig> {
    let instance = stack.iter().find_map(|node| match node {
        Node::Instance(instance) => Some(*instance),
        _ => None,
    })?;
    if !instance.defs.iter().any(|member| std::ptr::eq(member, def)) {
        return None;
    }
    let trait_ = root.trait_(&instance.trait_use.sym)?;
    trait_.sigs.iter().find(|sig| sig.sym.name == def.sym.name)
}
