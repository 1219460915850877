use ast::named::{Pattern, PatternKind};
use types::Type;

use crate::algorithm::expression;
use crate::context::Context;
use crate::error::CheckError;
use crate::state::CheckState;

/// Infers the type of `pat`, recording it in the pattern's slot.
pub fn infer_pattern(
    state: &mut CheckState,
    context: &Context,
    pat: &Pattern,
) -> Result<Type, CheckError> {
    let tpe = match &pat.kind {
        PatternKind::Wild => Type::Var(pat.tvar.clone()),
        PatternKind::Var(sym) => Type::Var(sym.tvar.clone()),
        PatternKind::Cst(constant) => constant.tpe(),
        PatternKind::Tag { sym, pat: payload } => {
            let (actual, loc) = match payload {
                Some(payload) => (infer_pattern(state, context, payload)?, payload.loc),
                None => (Type::UNIT, sym.loc),
            };
            expression::infer_tag(state, context, &sym.sym, &actual, loc)?
        }
        PatternKind::Tuple(elms) => {
            let elms = elms
                .iter()
                .map(|elm| infer_pattern(state, context, elm))
                .collect::<Result<Vec<_>, _>>()?;
            Type::Tuple(elms)
        }
    };
    state.unify(&Type::Var(pat.tvar.clone()), &tpe, pat.loc)?;
    Ok(tpe)
}
