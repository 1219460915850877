use files::SourceLocation;
use symbols::{Fresh, Kind, TypeVarSym};
use types::Type;

use crate::error::{CheckError, InternalError, TypeError};
use crate::unification::{self, UnificationError};
use crate::{Substitution, guesstimate_type};

/// Mutable state while checking a single declaration.
pub struct CheckState<'f> {
    pub fresh: &'f Fresh,
    pub substitution: Substitution,
}

impl<'f> CheckState<'f> {
    pub fn new(fresh: &'f Fresh) -> CheckState<'f> {
        CheckState { fresh, substitution: Substitution::empty() }
    }

    pub fn fresh_var(&self, loc: SourceLocation) -> Type {
        Type::Var(self.fresh.fresh_type_var(Kind::Star, loc))
    }

    pub fn apply(&self, tpe: &Type) -> Type {
        self.substitution.apply(tpe)
    }

    pub fn resolve(&self, var: &TypeVarSym) -> Type {
        self.substitution.apply(&Type::Var(var.clone()))
    }

    /// Unifies `expected` with `actual` under the current substitution.
    ///
    /// Errors are reported at `loc` with both sides fully applied.
    pub fn unify(
        &mut self,
        expected: &Type,
        actual: &Type,
        loc: SourceLocation,
    ) -> Result<(), CheckError> {
        let expected = self.apply(expected);
        let actual = self.apply(actual);
        match unification::unify(&expected, &actual) {
            Ok(substitution) => {
                self.substitution = substitution.compose(&self.substitution);
                Ok(())
            }
            Err(error) => Err(unification_error(error, expected, actual, loc)),
        }
    }

    pub fn unify_all(
        &mut self,
        expected: &[Type],
        actual: &[Type],
        loc: SourceLocation,
    ) -> Result<(), CheckError> {
        if expected.len() != actual.len() {
            let (expected, actual) = (expected.len(), actual.len());
            return Err(TypeError::ArityMismatch { expected, actual, loc }.into());
        }
        for (expected, actual) in expected.iter().zip(actual) {
            self.unify(expected, actual, loc)?;
        }
        Ok(())
    }

    /// Folds `types` into a single type; `None` for an empty list.
    pub fn unify_many(
        &mut self,
        types: &[Type],
        loc: SourceLocation,
    ) -> Result<Option<Type>, CheckError> {
        let types: Vec<Type> = types.iter().map(|t| self.apply(t)).collect();
        match unification::unify_many(&types) {
            Ok(Some((tpe, substitution))) => {
                self.substitution = substitution.compose(&self.substitution);
                Ok(Some(tpe))
            }
            Ok(None) => Ok(None),
            Err(error) => {
                let (expected, actual) = match types.as_slice() {
                    [first, .., last] => (first.clone(), last.clone()),
                    _ => unreachable!("invariant violated: a single type always unifies"),
                };
                Err(unification_error(error, expected, actual, loc))
            }
        }
    }

    /// Unifies the operands of an arithmetic or comparison operator.
    ///
    /// Two different numeric types are reconciled with [`guesstimate_type`]
    /// instead of being unified.
    pub fn unify_numeric(
        &mut self,
        t1: &Type,
        t2: &Type,
        loc: SourceLocation,
    ) -> Result<Type, CheckError> {
        let t1 = self.apply(t1);
        let t2 = self.apply(t2);
        if t1 != t2
            && let Some(wider) = guesstimate_type(&t1, &t2)
        {
            tracing::debug!(%t1, %t2, %wider, "numeric defaulting");
            return Ok(wider);
        }
        self.unify(&t1, &t2, loc)?;
        Ok(self.apply(&t1))
    }
}

fn unification_error(
    error: UnificationError,
    expected: Type,
    actual: Type,
    loc: SourceLocation,
) -> CheckError {
    match error {
        UnificationError::Mismatch { .. } => {
            TypeError::UnificationFailure { expected, actual, loc }.into()
        }
        UnificationError::ArityMismatch { expected, actual } => {
            TypeError::ArityMismatch { expected, actual, loc }.into()
        }
        UnificationError::OccursCheck { var, tpe } => InternalError::OccursCheck { var, tpe }.into(),
    }
}
