//! Constraint generation for Datalog constraints.
//!
//! Head terms are expressions and body terms are patterns; both are checked
//! against the attributes of the relation named by the atom.

use ast::named::{Body, Constraint, Head};
use files::SourceLocation;
use types::Type;

use crate::algorithm::{expression, pattern};
use crate::context::Context;
use crate::error::{CheckError, TypeError};
use crate::state::CheckState;

pub fn infer_constraint(
    state: &mut CheckState,
    context: &Context,
    constraint: &Constraint,
) -> Result<(), CheckError> {
    match &constraint.head {
        Head::Atom { pred, terms, loc } => {
            let relation = context.relation(pred)?;
            check_arity(relation.attributes.len(), terms.len(), *loc)?;
            for (attribute, term) in relation.attributes.iter().zip(terms) {
                let actual = expression::infer_expression(state, context, term)?;
                state.unify(attribute, &actual, term.loc)?;
            }
        }
    }

    for body in &constraint.body {
        match body {
            Body::Atom { pred, terms, loc, .. } => {
                let relation = context.relation(pred)?;
                check_arity(relation.attributes.len(), terms.len(), *loc)?;
                for (attribute, term) in relation.attributes.iter().zip(terms) {
                    let actual = pattern::infer_pattern(state, context, term)?;
                    state.unify(attribute, &actual, term.loc)?;
                }
            }
            Body::Guard { exp, .. } => {
                let actual = expression::infer_expression(state, context, exp)?;
                state.unify(&Type::BOOL, &actual, exp.loc)?;
            }
        }
    }

    Ok(())
}

fn check_arity(expected: usize, actual: usize, loc: SourceLocation) -> Result<(), CheckError> {
    if expected != actual {
        return Err(TypeError::ArityMismatch { expected, actual, loc }.into());
    }
    Ok(())
}
