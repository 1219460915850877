use files::SourceLocation;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use symbols::{Fresh, TraitSym, TypeVarSym};

use crate::Type;

/// A trait constraint `Trait[tpe]` attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitConstraint {
    pub trait_sym: TraitSym,
    pub arg: Type,
}

/// A type generalised over its declared type parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scheme {
    pub quantifiers: Vec<TypeVarSym>,
    pub constraints: Vec<TraitConstraint>,
    pub base: Type,
}

impl Scheme {
    pub fn mono(base: Type) -> Scheme {
        Scheme { quantifiers: vec![], constraints: vec![], base }
    }

    pub fn is_mono(&self) -> bool {
        self.quantifiers.is_empty()
    }

    /// Replaces every quantifier with a fresh flexible variable.
    pub fn instantiate(&self, fresh: &Fresh, loc: SourceLocation) -> (Type, Vec<TraitConstraint>) {
        if self.quantifiers.is_empty() {
            return (self.base.clone(), self.constraints.clone());
        }

        let renaming: FxHashMap<&TypeVarSym, Type> = self
            .quantifiers
            .iter()
            .map(|q| (q, Type::Var(fresh.fresh_type_var(q.kind.clone(), loc))))
            .collect();

        let mut rename = |var: &TypeVarSym| renaming.get(var).cloned();

        let base = self.base.map_vars(&mut rename);
        let constraints = self
            .constraints
            .iter()
            .map(|c| TraitConstraint { trait_sym: c.trait_sym.clone(), arg: c.arg.map_vars(&mut rename) })
            .collect();

        (base, constraints)
    }

    /// Variables of the base type that are not quantified.
    pub fn free_type_vars(&self) -> Vec<TypeVarSym> {
        self.base.free_type_vars().into_iter().filter(|v| !self.quantifiers.contains(v)).collect()
    }
}
