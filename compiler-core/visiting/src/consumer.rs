use ast::Ident;
use ast::TypeExpr;
use ast::typed::{
    Annotation, AssocTypeDef, AssocTypeSig, Body, Case, Constraint, ConstraintParam, Def, Effect,
    Enum, Expr, FormalParam, HandlerRule, Head, Instance, MatchRule, Op, Pattern, Relation, Sig,
    Struct, StructField, Trait, TraitConstraint, TypeAlias, TypeMatchRule,
};
use symbols::{
    AssocTypeSym, CaseSym, EffectSym, EnumSym, OpSym, StructFieldSym, StructSym, SymUse, TraitSym,
    TypeAliasSym, TypeVarSym, VarSym,
};
use types::Type;

/// Callbacks invoked by [`visit_root`] for every accepted node.
///
/// Every method defaults to doing nothing; implementors override the node
/// kinds they are interested in. References live as long as the root, so
/// consumers may keep them.
///
/// [`visit_root`]: crate::visit_root
#[allow(unused_variables)]
pub trait Consumer<'r> {
    fn consume_def(&mut self, def: &'r Def) {}
    fn consume_enum(&mut self, enum_: &'r Enum) {}
    fn consume_case(&mut self, case: &'r Case) {}
    fn consume_struct(&mut self, struct_: &'r Struct) {}
    fn consume_struct_field(&mut self, field: &'r StructField) {}
    fn consume_type_alias(&mut self, alias: &'r TypeAlias) {}
    fn consume_trait(&mut self, trait_: &'r Trait) {}
    fn consume_assoc_type_sig(&mut self, assoc: &'r AssocTypeSig) {}
    fn consume_sig(&mut self, sig: &'r Sig) {}
    fn consume_instance(&mut self, instance: &'r Instance) {}
    fn consume_assoc_type_def(&mut self, assoc: &'r AssocTypeDef) {}
    fn consume_effect(&mut self, effect: &'r Effect) {}
    fn consume_op(&mut self, op: &'r Op) {}
    fn consume_relation(&mut self, relation: &'r Relation) {}

    fn consume_expr(&mut self, exp: &'r Expr) {}
    fn consume_pattern(&mut self, pat: &'r Pattern) {}
    fn consume_annotation(&mut self, annotation: &'r Annotation) {}
    fn consume_type_expr(&mut self, tpe: &'r TypeExpr) {}

    fn consume_match_rule(&mut self, rule: &'r MatchRule) {}
    fn consume_type_match_rule(&mut self, rule: &'r TypeMatchRule) {}
    fn consume_handler_rule(&mut self, rule: &'r HandlerRule) {}

    fn consume_constraint(&mut self, constraint: &'r Constraint) {}
    fn consume_constraint_param(&mut self, cparam: &'r ConstraintParam) {}
    fn consume_head_pred(&mut self, head: &'r Head) {}
    fn consume_body_pred(&mut self, body: &'r Body) {}

    fn consume_type_param(&mut self, tparam: &'r TypeVarSym) {}
    fn consume_formal_param(&mut self, fparam: &'r FormalParam) {}
    /// A variable bound by `let` or a type match rule, with its type.
    fn consume_var_binder(&mut self, sym: &'r VarSym, tpe: &'r Type) {}
    fn consume_trait_constraint(&mut self, constraint: &'r TraitConstraint) {}

    fn consume_trait_use(&mut self, trait_use: &'r SymUse<TraitSym>) {}
    fn consume_effect_use(&mut self, effect_use: &'r SymUse<EffectSym>) {}
    fn consume_op_use(&mut self, op_use: &'r SymUse<OpSym>) {}
    fn consume_enum_use(&mut self, enum_use: &'r SymUse<EnumSym>) {}
    fn consume_case_use(&mut self, case_use: &'r SymUse<CaseSym>) {}
    fn consume_struct_use(&mut self, struct_use: &'r SymUse<StructSym>) {}
    fn consume_struct_field_use(&mut self, field_use: &'r SymUse<StructFieldSym>) {}
    fn consume_type_alias_use(&mut self, alias_use: &'r SymUse<TypeAliasSym>) {}
    fn consume_assoc_type_use(&mut self, assoc_use: &'r SymUse<AssocTypeSym>) {}
    fn consume_pred_use(&mut self, pred: &'r Ident) {}
}
