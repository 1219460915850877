//! A single depth-first traversal of typed programs.
//!
//! [`visit_root`] walks every declaration, expression, pattern, constraint,
//! annotation and symbol use of a [`Root`]. Before entering a located node
//! the [`Acceptor`] is asked whether to descend; accepted nodes are passed
//! to the matching [`Consumer`] hook.

mod acceptor;
mod consumer;

pub use acceptor::*;
pub use consumer::*;

use ast::TypeExpr;
use ast::typed::{
    Annotation, Body, Constraint, Def, Effect, Enum, Expr, ExprKind, FormalParam, Head, Instance,
    Pattern, PatternKind, Relation, Root, Spec, Struct, Trait, TraitConstraint, TypeAlias,
};
use files::SourceLocation;

pub fn visit_root<'r>(root: &'r Root, consumer: &mut impl Consumer<'r>, acceptor: &impl Acceptor) {
    let mut visitor = Visitor { consumer, acceptor };

    for def in root.defs.values() {
        visitor.visit_def(def);
    }
    for enum_ in root.enums.values() {
        visitor.visit_enum(enum_);
    }
    for struct_ in root.structs.values() {
        visitor.visit_struct(struct_);
    }
    for alias in root.aliases.values() {
        visitor.visit_type_alias(alias);
    }
    for trait_ in root.traits.values() {
        visitor.visit_trait(trait_);
    }
    for instance in root.instances.values().flatten() {
        visitor.visit_instance(instance);
    }
    for effect in root.effects.values() {
        visitor.visit_effect(effect);
    }
    for relation in root.relations.values() {
        visitor.visit_relation(relation);
    }
}

struct Visitor<'a, C, A> {
    consumer: &'a mut C,
    acceptor: &'a A,
}

impl<'r, C, A> Visitor<'_, C, A>
where
    C: Consumer<'r>,
    A: Acceptor,
{
    fn accept(&self, loc: &SourceLocation) -> bool {
        self.acceptor.accept(loc)
    }

    fn visit_def(&mut self, def: &'r Def) {
        if !self.accept(&def.loc) {
            return;
        }
        self.consumer.consume_def(def);
        self.visit_spec(&def.spec);
        self.visit_expr(&def.exp);
    }

    fn visit_spec(&mut self, spec: &'r Spec) {
        for tparam in &spec.tparams {
            if self.accept(&tparam.loc) {
                self.consumer.consume_type_param(tparam);
            }
        }
        for fparam in &spec.fparams {
            self.visit_formal_param(fparam);
        }
        self.visit_annotation(&spec.ret);
        for constraint in &spec.tconstrs {
            self.visit_trait_constraint(constraint);
        }
    }

    fn visit_formal_param(&mut self, fparam: &'r FormalParam) {
        if !self.accept(&fparam.loc) {
            return;
        }
        self.consumer.consume_formal_param(fparam);
        if let Some(annotation) = &fparam.ann {
            self.visit_annotation(annotation);
        }
    }

    fn visit_trait_constraint(&mut self, constraint: &'r TraitConstraint) {
        if !self.accept(&constraint.loc) {
            return;
        }
        self.consumer.consume_trait_constraint(constraint);
        if self.accept(&constraint.head.loc) {
            self.consumer.consume_trait_use(&constraint.head);
        }
        self.visit_annotation(&constraint.arg);
    }

    fn visit_annotation(&mut self, annotation: &'r Annotation) {
        if !self.accept(&annotation.loc()) {
            return;
        }
        self.consumer.consume_annotation(annotation);
        self.visit_type_expr(&annotation.syntax);
    }

    fn visit_type_expr(&mut self, tpe: &'r TypeExpr) {
        if !self.accept(&tpe.loc()) {
            return;
        }
        self.consumer.consume_type_expr(tpe);
        match tpe {
            TypeExpr::Var { .. } | TypeExpr::Primitive { .. } => {}
            TypeExpr::Enum { sym, args, .. } => {
                if self.accept(&sym.loc) {
                    self.consumer.consume_enum_use(sym);
                }
                args.iter().for_each(|arg| self.visit_type_expr(arg));
            }
            TypeExpr::Struct { sym, args, .. } => {
                if self.accept(&sym.loc) {
                    self.consumer.consume_struct_use(sym);
                }
                args.iter().for_each(|arg| self.visit_type_expr(arg));
            }
            TypeExpr::Alias { sym, args, .. } => {
                if self.accept(&sym.loc) {
                    self.consumer.consume_type_alias_use(sym);
                }
                args.iter().for_each(|arg| self.visit_type_expr(arg));
            }
            TypeExpr::AssocType { sym, arg, .. } => {
                if self.accept(&sym.loc) {
                    self.consumer.consume_assoc_type_use(sym);
                }
                self.visit_type_expr(arg);
            }
            TypeExpr::Tuple { elms, .. } => {
                elms.iter().for_each(|elm| self.visit_type_expr(elm));
            }
            TypeExpr::Arrow { args, ret, .. } => {
                args.iter().for_each(|arg| self.visit_type_expr(arg));
                self.visit_type_expr(ret);
            }
        }
    }

    fn visit_enum(&mut self, enum_: &'r Enum) {
        if !self.accept(&enum_.loc) {
            return;
        }
        self.consumer.consume_enum(enum_);
        for tparam in &enum_.tparams {
            if self.accept(&tparam.loc) {
                self.consumer.consume_type_param(tparam);
            }
        }
        for case in &enum_.cases {
            if !self.accept(&case.loc) {
                continue;
            }
            self.consumer.consume_case(case);
            if let Some(annotation) = &case.tpe {
                self.visit_annotation(annotation);
            }
        }
    }

    fn visit_struct(&mut self, struct_: &'r Struct) {
        if !self.accept(&struct_.loc) {
            return;
        }
        self.consumer.consume_struct(struct_);
        for tparam in &struct_.tparams {
            if self.accept(&tparam.loc) {
                self.consumer.consume_type_param(tparam);
            }
        }
        for field in &struct_.fields {
            if !self.accept(&field.loc) {
                continue;
            }
            self.consumer.consume_struct_field(field);
            self.visit_annotation(&field.tpe);
        }
    }

    fn visit_type_alias(&mut self, alias: &'r TypeAlias) {
        if !self.accept(&alias.loc) {
            return;
        }
        self.consumer.consume_type_alias(alias);
        for tparam in &alias.tparams {
            if self.accept(&tparam.loc) {
                self.consumer.consume_type_param(tparam);
            }
        }
        self.visit_annotation(&alias.tpe);
    }

    fn visit_trait(&mut self, trait_: &'r Trait) {
        if !self.accept(&trait_.loc) {
            return;
        }
        self.consumer.consume_trait(trait_);
        if self.accept(&trait_.tparam.loc) {
            self.consumer.consume_type_param(&trait_.tparam);
        }
        for constraint in &trait_.super_traits {
            self.visit_trait_constraint(constraint);
        }
        for assoc in &trait_.assocs {
            if self.accept(&assoc.loc) {
                self.consumer.consume_assoc_type_sig(assoc);
            }
        }
        for sig in &trait_.sigs {
            if !self.accept(&sig.loc) {
                continue;
            }
            self.consumer.consume_sig(sig);
            self.visit_spec(&sig.spec);
            if let Some(exp) = &sig.exp {
                self.visit_expr(exp);
            }
        }
    }

    fn visit_instance(&mut self, instance: &'r Instance) {
        if !self.accept(&instance.loc) {
            return;
        }
        self.consumer.consume_instance(instance);
        if self.accept(&instance.trait_use.loc) {
            self.consumer.consume_trait_use(&instance.trait_use);
        }
        self.visit_annotation(&instance.tpe);
        for constraint in &instance.tconstrs {
            self.visit_trait_constraint(constraint);
        }
        for assoc in &instance.assocs {
            if !self.accept(&assoc.loc) {
                continue;
            }
            self.consumer.consume_assoc_type_def(assoc);
            if self.accept(&assoc.sym.loc) {
                self.consumer.consume_assoc_type_use(&assoc.sym);
            }
            self.visit_annotation(&assoc.arg);
            self.visit_annotation(&assoc.tpe);
        }
        for def in &instance.defs {
            self.visit_def(def);
        }
    }

    fn visit_effect(&mut self, effect: &'r Effect) {
        if !self.accept(&effect.loc) {
            return;
        }
        self.consumer.consume_effect(effect);
        for op in &effect.ops {
            if !self.accept(&op.loc) {
                continue;
            }
            self.consumer.consume_op(op);
            self.visit_spec(&op.spec);
        }
    }

    fn visit_relation(&mut self, relation: &'r Relation) {
        if !self.accept(&relation.loc) {
            return;
        }
        self.consumer.consume_relation(relation);
        for attribute in &relation.attributes {
            self.visit_annotation(attribute);
        }
    }

    fn visit_expr(&mut self, exp: &'r Expr) {
        if !self.accept(&exp.loc) {
            return;
        }
        self.consumer.consume_expr(exp);
        match &exp.kind {
            ExprKind::Cst(_)
            | ExprKind::Var(_)
            | ExprKind::Def(_)
            | ExprKind::Sig(_)
            | ExprKind::Hole(_) => {}

            ExprKind::Lambda { fparam, exp } => {
                self.visit_formal_param(fparam);
                self.visit_expr(exp);
            }
            ExprKind::Apply { exp, exps } => {
                self.visit_expr(exp);
                exps.iter().for_each(|exp| self.visit_expr(exp));
            }
            ExprKind::Unary { exp, .. } => self.visit_expr(exp),
            ExprKind::Binary { exp1, exp2, .. }
            | ExprKind::Stm { exp1, exp2 }
            | ExprKind::FixpointMerge { exp1, exp2 } => {
                self.visit_expr(exp1);
                self.visit_expr(exp2);
            }
            ExprKind::IfThenElse { exp1, exp2, exp3 } => {
                self.visit_expr(exp1);
                self.visit_expr(exp2);
                self.visit_expr(exp3);
            }
            ExprKind::Let { sym, exp1, exp2 } => {
                if self.accept(&sym.loc) {
                    self.consumer.consume_var_binder(sym, &exp1.tpe);
                }
                self.visit_expr(exp1);
                self.visit_expr(exp2);
            }
            ExprKind::Match { exp, rules } => {
                self.visit_expr(exp);
                for rule in rules {
                    if !self.accept(&rule.loc) {
                        continue;
                    }
                    self.consumer.consume_match_rule(rule);
                    self.visit_pattern(&rule.pat);
                    if let Some(guard) = &rule.guard {
                        self.visit_expr(guard);
                    }
                    self.visit_expr(&rule.exp);
                }
            }
            ExprKind::TypeMatch { exp, rules } => {
                self.visit_expr(exp);
                for rule in rules {
                    if !self.accept(&rule.loc) {
                        continue;
                    }
                    self.consumer.consume_type_match_rule(rule);
                    if self.accept(&rule.sym.loc) {
                        self.consumer.consume_var_binder(&rule.sym, &rule.tpe.tpe);
                    }
                    self.visit_annotation(&rule.tpe);
                    self.visit_expr(&rule.exp);
                }
            }
            ExprKind::Tag { sym, exp } => {
                if self.accept(&sym.loc) {
                    self.consumer.consume_case_use(sym);
                }
                if let Some(exp) = exp {
                    self.visit_expr(exp);
                }
            }
            ExprKind::Tuple(elms) => elms.iter().for_each(|elm| self.visit_expr(elm)),
            ExprKind::StructNew { sym, fields } => {
                if self.accept(&sym.loc) {
                    self.consumer.consume_struct_use(sym);
                }
                for init in fields {
                    if self.accept(&init.field.loc) {
                        self.consumer.consume_struct_field_use(&init.field);
                    }
                    self.visit_expr(&init.exp);
                }
            }
            ExprKind::StructGet { exp, field } => {
                self.visit_expr(exp);
                if self.accept(&field.loc) {
                    self.consumer.consume_struct_field_use(field);
                }
            }
            ExprKind::Ascribe { exp, tpe } => {
                self.visit_expr(exp);
                self.visit_annotation(tpe);
            }
            ExprKind::Do { op, exps } => {
                if self.accept(&op.loc) {
                    self.consumer.consume_op_use(op);
                }
                exps.iter().for_each(|exp| self.visit_expr(exp));
            }
            ExprKind::TryWith { exp, effect, rules } => {
                self.visit_expr(exp);
                if self.accept(&effect.loc) {
                    self.consumer.consume_effect_use(effect);
                }
                for rule in rules {
                    if !self.accept(&rule.loc) {
                        continue;
                    }
                    self.consumer.consume_handler_rule(rule);
                    if self.accept(&rule.op.loc) {
                        self.consumer.consume_op_use(&rule.op);
                    }
                    rule.fparams.iter().for_each(|fparam| self.visit_formal_param(fparam));
                    self.visit_expr(&rule.exp);
                }
            }
            ExprKind::FixpointConstraintSet(constraints) => {
                constraints.iter().for_each(|constraint| self.visit_constraint(constraint));
            }
        }
    }

    fn visit_pattern(&mut self, pat: &'r Pattern) {
        if !self.accept(&pat.loc) {
            return;
        }
        self.consumer.consume_pattern(pat);
        match &pat.kind {
            PatternKind::Wild | PatternKind::Var(_) | PatternKind::Cst(_) => {}
            PatternKind::Tag { sym, pat } => {
                if self.accept(&sym.loc) {
                    self.consumer.consume_case_use(sym);
                }
                if let Some(pat) = pat {
                    self.visit_pattern(pat);
                }
            }
            PatternKind::Tuple(elms) => elms.iter().for_each(|elm| self.visit_pattern(elm)),
        }
    }

    fn visit_constraint(&mut self, constraint: &'r Constraint) {
        if !self.accept(&constraint.loc) {
            return;
        }
        self.consumer.consume_constraint(constraint);
        for cparam in &constraint.cparams {
            if self.accept(&cparam.loc) {
                self.consumer.consume_constraint_param(cparam);
            }
        }

        let head = &constraint.head;
        let Head::Atom { pred, terms, loc, .. } = head;
        if self.accept(loc) {
            self.consumer.consume_head_pred(head);
            if self.accept(&pred.loc) {
                self.consumer.consume_pred_use(pred);
            }
            terms.iter().for_each(|term| self.visit_expr(term));
        }

        for body in &constraint.body {
            match body {
                Body::Atom { pred, terms, loc, .. } => {
                    if !self.accept(loc) {
                        continue;
                    }
                    self.consumer.consume_body_pred(body);
                    if self.accept(&pred.loc) {
                        self.consumer.consume_pred_use(pred);
                    }
                    terms.iter().for_each(|term| self.visit_pattern(term));
                }
                Body::Guard { exp, loc } => {
                    if !self.accept(loc) {
                        continue;
                    }
                    self.consumer.consume_body_pred(body);
                    self.visit_expr(exp);
                }
            }
        }
    }
}
