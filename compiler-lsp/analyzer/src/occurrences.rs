//! Every written occurrence of an entity.
//!
//! One collector per kind of entity walks the whole root and returns the
//! locations it found. Synthesized locations never count as occurrences.

use ast::typed::{
    AssocTypeSig, Case, ConstraintParam, Def, Effect, Enum, Expr, ExprKind, FormalParam, Instance,
    Op, Pattern, PatternKind, Relation, Root, Sig, Struct, StructField, Trait, TypeAlias,
};
use ast::{Ident, TypeExpr};
use files::SourceLocation;
use symbols::{
    AssocTypeSym, CaseSym, DefnSym, EffectSym, EnumSym, OpSym, SigSym, StructFieldSym, StructSym,
    SymUse, Symbol, TraitSym, TypeAliasSym, TypeVarSym, VarSym,
};
use types::Type;
use visiting::{AllAcceptor, Consumer, visit_root};

use crate::locate::Target;
use crate::span::split_compound;

/// The locations of every occurrence of `target`, sorted and without duplicates.
#[tracing::instrument(skip_all, name = "occurrences")]
pub fn occurrences(root: &Root, target: &Target) -> Vec<SourceLocation> {
    let found = match target {
        Target::Symbol(Symbol::Def(sym)) => collect(root, DefOccurrences::new(sym)),
        Target::Symbol(Symbol::Var(sym)) => collect(root, VarOccurrences::new(sym)),
        Target::Symbol(Symbol::Case(sym)) => collect(root, CaseOccurrences::new(sym)),
        Target::Symbol(Symbol::Enum(sym)) => collect(root, EnumOccurrences::new(sym)),
        Target::Symbol(Symbol::Struct(sym)) => collect(root, StructOccurrences::new(sym)),
        Target::Symbol(Symbol::StructField(sym)) => collect(root, FieldOccurrences::new(sym)),
        Target::Symbol(Symbol::Trait(sym)) => collect(root, TraitOccurrences::new(sym)),
        Target::Symbol(Symbol::Sig(sym)) => collect(root, SigOccurrences::new(sym)),
        Target::Symbol(Symbol::Effect(sym)) => collect(root, EffectOccurrences::new(sym)),
        Target::Symbol(Symbol::Op(sym)) => collect(root, OpOccurrences::new(sym)),
        Target::Symbol(Symbol::TypeVar(sym)) => collect(root, TypeVarOccurrences::new(sym)),
        Target::Symbol(Symbol::TypeAlias(sym)) => collect(root, AliasOccurrences::new(sym)),
        Target::Symbol(Symbol::AssocType(sym)) => collect(root, AssocTypeOccurrences::new(sym)),
        Target::Predicate(name) => collect(root, PredicateOccurrences::new(name)),
    };
    tracing::debug!(%target, count = found.len());
    found
}

/// An accumulator of written locations.
#[derive(Debug, Default)]
struct Found {
    locations: Vec<SourceLocation>,
}

impl Found {
    fn push(&mut self, loc: SourceLocation) {
        if loc.is_real() {
            self.locations.push(loc);
        }
    }

    fn push_some(&mut self, loc: Option<SourceLocation>) {
        if let Some(loc) = loc {
            self.push(loc);
        }
    }

    fn finish(mut self) -> Vec<SourceLocation> {
        self.locations.sort();
        self.locations.dedup();
        self.locations
    }
}

trait Collector<'r>: Consumer<'r> {
    fn into_found(self) -> Found;
}

fn collect<'r>(root: &'r Root, mut collector: impl Collector<'r>) -> Vec<SourceLocation> {
    visit_root(root, &mut collector, &AllAcceptor);
    collector.into_found().finish()
}

macro_rules! collector {
    ($name:ident, $sym:ty) => {
        struct $name<'s> {
            sym: &'s $sym,
            found: Found,
        }

        impl<'s> $name<'s> {
            fn new(sym: &'s $sym) -> $name<'s> {
                $name { sym, found: Found::default() }
            }
        }

        impl<'r> Collector<'r> for $name<'_> {
            fn into_found(self) -> Found {
                self.found
            }
        }
    };
}

collector!(DefOccurrences, DefnSym);
collector!(VarOccurrences, VarSym);
collector!(CaseOccurrences, CaseSym);
collector!(EnumOccurrences, EnumSym);
collector!(StructOccurrences, StructSym);
collector!(FieldOccurrences, StructFieldSym);
collector!(TraitOccurrences, TraitSym);
collector!(SigOccurrences, SigSym);
collector!(EffectOccurrences, EffectSym);
collector!(OpOccurrences, OpSym);
collector!(TypeVarOccurrences, TypeVarSym);
collector!(AliasOccurrences, TypeAliasSym);
collector!(AssocTypeOccurrences, AssocTypeSym);
collector!(PredicateOccurrences, str);

impl<'r> Consumer<'r> for DefOccurrences<'_> {
    fn consume_def(&mut self, def: &'r Def) {
        if &def.sym == self.sym {
            self.found.push(def.sym.loc);
        }
    }

    fn consume_expr(&mut self, exp: &'r Expr) {
        if let ExprKind::Def(sym) = &exp.kind
            && sym == self.sym
        {
            self.found.push(exp.loc);
        }
    }
}

impl<'r> Consumer<'r> for VarOccurrences<'_> {
    fn consume_formal_param(&mut self, fparam: &'r FormalParam) {
        if &fparam.sym == self.sym {
            self.found.push(fparam.sym.loc);
        }
    }

    fn consume_var_binder(&mut self, sym: &'r VarSym, _: &'r Type) {
        if sym == self.sym {
            self.found.push(sym.loc);
        }
    }

    fn consume_constraint_param(&mut self, cparam: &'r ConstraintParam) {
        if &cparam.sym == self.sym {
            self.found.push(cparam.sym.loc);
        }
    }

    fn consume_pattern(&mut self, pat: &'r Pattern) {
        if let PatternKind::Var(sym) = &pat.kind
            && sym == self.sym
        {
            self.found.push(pat.loc);
        }
    }

    fn consume_expr(&mut self, exp: &'r Expr) {
        if let ExprKind::Var(sym) = &exp.kind
            && sym == self.sym
        {
            self.found.push(exp.loc);
        }
    }
}

impl<'r> Consumer<'r> for CaseOccurrences<'_> {
    fn consume_case(&mut self, case: &'r Case) {
        if &case.sym == self.sym {
            self.found.push(case.sym.loc);
        }
    }

    fn consume_case_use(&mut self, case_use: &'r SymUse<CaseSym>) {
        if &case_use.sym == self.sym {
            let split = split_compound(case_use.loc, &self.sym.enum_sym.name, &self.sym.name);
            self.found.push(split.suffix);
        }
    }
}

impl<'r> Consumer<'r> for EnumOccurrences<'_> {
    fn consume_enum(&mut self, enum_: &'r Enum) {
        if &enum_.sym == self.sym {
            self.found.push(enum_.sym.loc);
        }
    }

    fn consume_enum_use(&mut self, enum_use: &'r SymUse<EnumSym>) {
        if &enum_use.sym == self.sym {
            self.found.push(enum_use.loc);
        }
    }

    fn consume_case_use(&mut self, case_use: &'r SymUse<CaseSym>) {
        if &case_use.sym.enum_sym == self.sym {
            let split = split_compound(case_use.loc, &self.sym.name, &case_use.sym.name);
            self.found.push_some(split.prefix);
        }
    }
}

impl<'r> Consumer<'r> for StructOccurrences<'_> {
    fn consume_struct(&mut self, struct_: &'r Struct) {
        if &struct_.sym == self.sym {
            self.found.push(struct_.sym.loc);
        }
    }

    fn consume_struct_use(&mut self, struct_use: &'r SymUse<StructSym>) {
        if &struct_use.sym == self.sym {
            self.found.push(struct_use.loc);
        }
    }
}

impl<'r> Consumer<'r> for FieldOccurrences<'_> {
    fn consume_struct_field(&mut self, field: &'r StructField) {
        if &field.sym == self.sym {
            self.found.push(field.sym.loc);
        }
    }

    fn consume_struct_field_use(&mut self, field_use: &'r SymUse<StructFieldSym>) {
        if &field_use.sym == self.sym {
            self.found.push(field_use.loc);
        }
    }
}

impl<'r> Consumer<'r> for TraitOccurrences<'_> {
    fn consume_trait(&mut self, trait_: &'r Trait) {
        if &trait_.sym == self.sym {
            self.found.push(trait_.sym.loc);
        }
    }

    fn consume_trait_use(&mut self, trait_use: &'r SymUse<TraitSym>) {
        if &trait_use.sym == self.sym {
            self.found.push(trait_use.loc);
        }
    }

    fn consume_expr(&mut self, exp: &'r Expr) {
        if let ExprKind::Sig(sym) = &exp.kind
            && &sym.trait_sym == self.sym
        {
            let split = split_compound(exp.loc, &self.sym.name, &sym.name);
            self.found.push_some(split.prefix);
        }
    }

    fn consume_assoc_type_use(&mut self, assoc_use: &'r SymUse<AssocTypeSym>) {
        if &assoc_use.sym.trait_sym == self.sym {
            let split = split_compound(assoc_use.loc, &self.sym.name, &assoc_use.sym.name);
            self.found.push_some(split.prefix);
        }
    }
}

impl<'r> Consumer<'r> for SigOccurrences<'_> {
    fn consume_sig(&mut self, sig: &'r Sig) {
        if &sig.sym == self.sym {
            self.found.push(sig.sym.loc);
        }
    }

    fn consume_expr(&mut self, exp: &'r Expr) {
        if let ExprKind::Sig(sym) = &exp.kind
            && sym == self.sym
        {
            let split = split_compound(exp.loc, &self.sym.trait_sym.name, &self.sym.name);
            self.found.push(split.suffix);
        }
    }

    fn consume_instance(&mut self, instance: &'r Instance) {
        if instance.trait_use.sym != self.sym.trait_sym {
            return;
        }
        for def in &instance.defs {
            if def.sym.name == self.sym.name {
                self.found.push(def.sym.loc);
            }
        }
    }
}

impl<'r> Consumer<'r> for EffectOccurrences<'_> {
    fn consume_effect(&mut self, effect: &'r Effect) {
        if &effect.sym == self.sym {
            self.found.push(effect.sym.loc);
        }
    }

    fn consume_effect_use(&mut self, effect_use: &'r SymUse<EffectSym>) {
        if &effect_use.sym == self.sym {
            self.found.push(effect_use.loc);
        }
    }

    fn consume_op_use(&mut self, op_use: &'r SymUse<OpSym>) {
        if &op_use.sym.effect_sym == self.sym {
            let split = split_compound(op_use.loc, &self.sym.name, &op_use.sym.name);
            self.found.push_some(split.prefix);
        }
    }
}

impl<'r> Consumer<'r> for OpOccurrences<'_> {
    fn consume_op(&mut self, op: &'r Op) {
        if &op.sym == self.sym {
            self.found.push(op.sym.loc);
        }
    }

    fn consume_op_use(&mut self, op_use: &'r SymUse<OpSym>) {
        if &op_use.sym == self.sym {
            let split = split_compound(op_use.loc, &self.sym.effect_sym.name, &self.sym.name);
            self.found.push(split.suffix);
        }
    }
}

impl<'r> Consumer<'r> for TypeVarOccurrences<'_> {
    fn consume_type_param(&mut self, tparam: &'r TypeVarSym) {
        if tparam == self.sym {
            self.found.push(tparam.loc);
        }
    }

    fn consume_type_expr(&mut self, tpe: &'r TypeExpr) {
        if let TypeExpr::Var { sym, loc } = tpe
            && sym == self.sym
        {
            self.found.push(*loc);
        }
    }
}

impl<'r> Consumer<'r> for AliasOccurrences<'_> {
    fn consume_type_alias(&mut self, alias: &'r TypeAlias) {
        if &alias.sym == self.sym {
            self.found.push(alias.sym.loc);
        }
    }

    fn consume_type_alias_use(&mut self, alias_use: &'r SymUse<TypeAliasSym>) {
        if &alias_use.sym == self.sym {
            self.found.push(alias_use.loc);
        }
    }
}

impl<'r> Consumer<'r> for AssocTypeOccurrences<'_> {
    fn consume_assoc_type_sig(&mut self, assoc: &'r AssocTypeSig) {
        if &assoc.sym == self.sym {
            self.found.push(assoc.sym.loc);
        }
    }

    fn consume_assoc_type_use(&mut self, assoc_use: &'r SymUse<AssocTypeSym>) {
        if &assoc_use.sym == self.sym {
            let split = split_compound(assoc_use.loc, &self.sym.trait_sym.name, &self.sym.name);
            self.found.push(split.suffix);
        }
    }
}

impl<'r> Consumer<'r> for PredicateOccurrences<'_> {
    fn consume_relation(&mut self, relation: &'r Relation) {
        if relation.name.name.as_str() == self.sym {
            self.found.push(relation.name.loc);
        }
    }

    fn consume_pred_use(&mut self, pred: &'r Ident) {
        if pred.name.as_str() == self.sym {
            self.found.push(pred.loc);
        }
    }
}
