//! Syntactic unification over [`Type`].
//!
//! ```text
//! unify (?a -> Int32) (Bool -> ?b)
//!   unify ?a Bool         ?a := Bool
//!   unify Int32 ?b        ?b := Int32
//! ```
//!
//! Rigid variables only unify with themselves; aliases unify through their
//! expansion.

use itertools::Itertools;
use symbols::TypeVarSym;
use types::{Type, TypeConstructor};

use crate::Substitution;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    Mismatch { expected: Type, actual: Type },
    ArityMismatch { expected: usize, actual: usize },
    OccursCheck { var: TypeVarSym, tpe: Type },
}

pub fn unify(expected: &Type, actual: &Type) -> Result<Substitution, UnificationError> {
    tracing::trace!(%expected, %actual, "unify");
    match (expected, actual) {
        (Type::Var(a), Type::Var(b)) if a == b => Ok(Substitution::empty()),

        (Type::Var(var), tpe) if var.is_flexible() => bind(var, tpe),
        (tpe, Type::Var(var)) if var.is_flexible() => bind(var, tpe),

        (Type::Alias(_, _, expansion), tpe) => unify(expansion, tpe),
        (tpe, Type::Alias(_, _, expansion)) => unify(tpe, expansion),

        (Type::Cst(c1), Type::Cst(c2)) if c1 == c2 => Ok(Substitution::empty()),

        (Type::Enum(s1, a1), Type::Enum(s2, a2)) if s1 == s2 => unify_all(a1, a2),
        (Type::Struct(s1, a1), Type::Struct(s2, a2)) if s1 == s2 => unify_all(a1, a2),
        (Type::Tuple(e1), Type::Tuple(e2)) => unify_all(e1, e2),
        (Type::Predicate(d1, t1), Type::Predicate(d2, t2)) if d1 == d2 => unify_all(t1, t2),

        (Type::Arrow(a1, r1), Type::Arrow(a2, r2)) => {
            let arguments = unify_all(a1, a2)?;
            let result = unify(&arguments.apply(r1), &arguments.apply(r2))?;
            Ok(result.compose(&arguments))
        }

        (Type::AssocType(s1, a1), Type::AssocType(s2, a2)) if s1 == s2 => unify(a1, a2),

        _ => Err(UnificationError::Mismatch { expected: expected.clone(), actual: actual.clone() }),
    }
}

fn bind(var: &TypeVarSym, tpe: &Type) -> Result<Substitution, UnificationError> {
    if let Type::Var(other) = tpe
        && other == var
    {
        return Ok(Substitution::empty());
    }
    if tpe.contains_var(var) {
        return Err(UnificationError::OccursCheck { var: var.clone(), tpe: tpe.clone() });
    }
    tracing::trace!(%var, %tpe, "bind");
    Ok(Substitution::singleton(var.clone(), tpe.clone()))
}

/// Unifies two lists pairwise, threading the substitution.
pub fn unify_all(expected: &[Type], actual: &[Type]) -> Result<Substitution, UnificationError> {
    if expected.len() != actual.len() {
        return Err(UnificationError::ArityMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    expected.iter().zip_eq(actual).try_fold(Substitution::empty(), |substitution, (t1, t2)| {
        let next = unify(&substitution.apply(t1), &substitution.apply(t2))?;
        Ok(next.compose(&substitution))
    })
}

/// Folds the given types into their most general common type.
///
/// Returns `None` for an empty list.
pub fn unify_many(types: &[Type]) -> Result<Option<(Type, Substitution)>, UnificationError> {
    let Some((first, rest)) = types.split_first() else {
        return Ok(None);
    };

    let substitution = rest.iter().try_fold(Substitution::empty(), |substitution, tpe| {
        let next = unify(&substitution.apply(first), &substitution.apply(tpe))?;
        Ok(next.compose(&substitution))
    })?;

    Ok(Some((substitution.apply(first), substitution)))
}

fn numeric_rank(tpe: &Type) -> Option<u8> {
    let Type::Cst(constructor) = tpe.expand() else {
        return None;
    };
    let rank = match constructor {
        TypeConstructor::Float64 => 6,
        TypeConstructor::Float32 => 5,
        TypeConstructor::Int64 => 4,
        TypeConstructor::Int32 => 3,
        TypeConstructor::Int16 => 2,
        TypeConstructor::Int8 => 1,
        TypeConstructor::BigInt => 0,
        _ => return None,
    };
    Some(rank)
}

/// Picks the wider of two numeric types.
///
/// Only used for operands of binary arithmetic and comparison operators.
pub fn guesstimate_type(t1: &Type, t2: &Type) -> Option<Type> {
    let r1 = numeric_rank(t1)?;
    let r2 = numeric_rank(t2)?;
    let wider = if r1 >= r2 { t1 } else { t2 };
    Some(wider.expand().clone())
}

#[cfg(test)]
mod tests;
