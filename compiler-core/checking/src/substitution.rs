use rustc_hash::FxHashMap;
use symbols::TypeVarSym;
use types::Type;

/// A finite map from type variables to types.
///
/// Substitutions built through [`Substitution::compose`] from the results of
/// [`unify`] are idempotent: no variable in the domain occurs in the range.
///
/// [`unify`]: crate::unify
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: FxHashMap<TypeVarSym, Type>,
}

impl Substitution {
    pub fn empty() -> Substitution {
        Substitution::default()
    }

    pub fn singleton(var: TypeVarSym, tpe: Type) -> Substitution {
        let mut bindings = FxHashMap::default();
        bindings.insert(var, tpe);
        Substitution { bindings }
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn get(&self, var: &TypeVarSym) -> Option<&Type> {
        self.bindings.get(var)
    }

    pub fn apply(&self, tpe: &Type) -> Type {
        if self.bindings.is_empty() {
            return tpe.clone();
        }
        tpe.map_vars(&mut |var| self.bindings.get(var).cloned())
    }

    /// Returns `self ∘ other`, the substitution that applies `other` first.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        if self.is_empty() {
            return other.clone();
        }

        let mut bindings: FxHashMap<TypeVarSym, Type> = other
            .bindings
            .iter()
            .map(|(var, tpe)| (var.clone(), self.apply(tpe)))
            .collect();

        for (var, tpe) in &self.bindings {
            bindings.entry(var.clone()).or_insert_with(|| tpe.clone());
        }

        Substitution { bindings }
    }
}

#[cfg(test)]
mod tests {
    use files::{Files, SourceLocation};
    use symbols::{Fresh, Kind};
    use types::Type;

    use super::Substitution;

    fn location() -> SourceLocation {
        let mut files = Files::default();
        SourceLocation::on_line(files.insert("Main.flint"), 1, 1, 2)
    }

    #[test]
    fn empty_is_identity() {
        let fresh = Fresh::new();
        let a = fresh.fresh_type_var(Kind::Star, location());
        let s = Substitution::singleton(a.clone(), Type::INT32);

        assert_eq!(Substitution::empty().compose(&s), s);
        assert_eq!(s.compose(&Substitution::empty()), s);
        assert_eq!(Substitution::empty().apply(&Type::Var(a.clone())), Type::Var(a));
    }

    #[test]
    fn compose_applies_right_first() {
        let fresh = Fresh::new();
        let a = fresh.fresh_type_var(Kind::Star, location());
        let b = fresh.fresh_type_var(Kind::Star, location());

        let s1 = Substitution::singleton(a.clone(), Type::Var(b.clone()));
        let s2 = Substitution::singleton(b.clone(), Type::BOOL);
        let composed = s2.compose(&s1);

        let tpe = Type::Tuple(vec![Type::Var(a), Type::Var(b)]);
        assert_eq!(composed.apply(&tpe), Type::Tuple(vec![Type::BOOL, Type::BOOL]));
        assert_eq!(composed.apply(&tpe), s2.apply(&s1.apply(&tpe)));
    }

    #[test]
    fn apply_is_idempotent() {
        let fresh = Fresh::new();
        let a = fresh.fresh_type_var(Kind::Star, location());
        let b = fresh.fresh_type_var(Kind::Star, location());
        let c = fresh.fresh_type_var(Kind::Star, location());

        let s1 = Substitution::singleton(a.clone(), Type::arrow([Type::Var(b.clone())], Type::Var(c.clone())));
        let s2 = Substitution::singleton(b.clone(), Type::STR);
        let s3 = Substitution::singleton(c.clone(), Type::Tuple(vec![Type::INT8, Type::BOOL]));
        let s = s3.compose(&s2.compose(&s1));

        let tpe = Type::Tuple(vec![Type::Var(a), Type::Var(b), Type::Var(c)]);
        let once = s.apply(&tpe);

        assert_eq!(s.apply(&once), once);
        assert!(once.free_type_vars().is_empty());
    }
}
