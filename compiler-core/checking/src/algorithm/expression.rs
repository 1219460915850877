use ast::OperatorClass;
use ast::named::{Expr, ExprKind, FormalParam, HandlerRule, MatchRule, TypeMatchRule};
use files::SourceLocation;
use symbols::{CaseSym, OpSym};
use types::Type;

use crate::algorithm::{pattern, predicate};
use crate::context::{Context, instantiate};
use crate::error::{CheckError, TypeError};
use crate::state::CheckState;

/// Infers the type of `exp`, recording it in the expression's slot.
pub fn infer_expression(
    state: &mut CheckState,
    context: &Context,
    exp: &Expr,
) -> Result<Type, CheckError> {
    let tpe = infer_expression_core(state, context, exp)?;
    state.unify(&Type::Var(exp.tvar.clone()), &tpe, exp.loc)?;
    Ok(tpe)
}

fn infer_expressions(
    state: &mut CheckState,
    context: &Context,
    exps: &[Expr],
) -> Result<Vec<Type>, CheckError> {
    exps.iter().map(|exp| infer_expression(state, context, exp)).collect()
}

fn infer_expression_core(
    state: &mut CheckState,
    context: &Context,
    exp: &Expr,
) -> Result<Type, CheckError> {
    let loc = exp.loc;
    match &exp.kind {
        ExprKind::Cst(constant) => Ok(constant.tpe()),

        ExprKind::Var(sym) => Ok(Type::Var(sym.tvar.clone())),

        ExprKind::Def(sym) => {
            let (tpe, _) = context.def_scheme(sym)?.instantiate(state.fresh, loc);
            Ok(tpe)
        }

        ExprKind::Sig(sym) => {
            let (tpe, _) = context.sig_scheme(sym)?.instantiate(state.fresh, loc);
            Ok(tpe)
        }

        ExprKind::Hole(_) => Ok(Type::Var(exp.tvar.clone())),

        ExprKind::Lambda { fparam, exp: body } => {
            let parameter = check_fparam(state, context, fparam, None)?;
            let result = infer_expression(state, context, body)?;
            Ok(Type::arrow([parameter], result))
        }

        ExprKind::Apply { exp: callee, exps } => {
            let function = infer_expression(state, context, callee)?;
            let arguments = infer_expressions(state, context, exps)?;
            let result = state.fresh_var(loc);
            let actual = Type::Arrow(arguments, Box::new(result.clone()));
            state.unify(&function, &actual, loc)?;
            Ok(result)
        }

        ExprKind::Unary { op, exp: operand } => {
            let tpe = infer_expression(state, context, operand)?;
            if let ast::UnaryOp::Not = op {
                state.unify(&Type::BOOL, &tpe, operand.loc)?;
                Ok(Type::BOOL)
            } else {
                Ok(tpe)
            }
        }

        ExprKind::Binary { op, exp1, exp2 } => {
            let t1 = infer_expression(state, context, exp1)?;
            let t2 = infer_expression(state, context, exp2)?;
            match op.class() {
                OperatorClass::Arithmetic | OperatorClass::Bitwise => {
                    state.unify_numeric(&t1, &t2, exp2.loc)
                }
                OperatorClass::Comparison => {
                    state.unify_numeric(&t1, &t2, exp2.loc)?;
                    Ok(Type::BOOL)
                }
                OperatorClass::Equality => {
                    state.unify(&t1, &t2, exp2.loc)?;
                    Ok(Type::BOOL)
                }
                OperatorClass::Logical => {
                    state.unify(&Type::BOOL, &t1, exp1.loc)?;
                    state.unify(&Type::BOOL, &t2, exp2.loc)?;
                    Ok(Type::BOOL)
                }
            }
        }

        ExprKind::IfThenElse { exp1, exp2, exp3 } => {
            let condition = infer_expression(state, context, exp1)?;
            state.unify(&Type::BOOL, &condition, exp1.loc)?;

            let then_type = infer_expression(state, context, exp2)?;
            let else_type = infer_expression(state, context, exp3)?;
            state.unify(&then_type, &else_type, exp3.loc)?;

            Ok(then_type)
        }

        ExprKind::Stm { exp1, exp2 } => {
            infer_expression(state, context, exp1)?;
            infer_expression(state, context, exp2)
        }

        ExprKind::Let { sym, exp1, exp2 } => {
            let bound = infer_expression(state, context, exp1)?;
            state.unify(&Type::Var(sym.tvar.clone()), &bound, exp1.loc)?;
            infer_expression(state, context, exp2)
        }

        ExprKind::Match { exp: scrutinee, rules } => {
            let slot = Type::Var(exp.tvar.clone());
            infer_match(state, context, scrutinee, rules, &slot)?;
            Ok(slot)
        }

        ExprKind::TypeMatch { exp: scrutinee, rules } => {
            let slot = Type::Var(exp.tvar.clone());
            infer_type_match(state, context, scrutinee, rules, &slot)?;
            Ok(slot)
        }

        ExprKind::Tag { sym, exp: payload } => {
            let (actual, payload_loc) = match payload {
                Some(payload) => (infer_expression(state, context, payload)?, payload.loc),
                None => (Type::UNIT, sym.loc),
            };
            infer_tag(state, context, &sym.sym, &actual, payload_loc)
        }

        ExprKind::Tuple(elms) => Ok(Type::Tuple(infer_expressions(state, context, elms)?)),

        ExprKind::StructNew { sym, fields } => {
            let info = context.struct_(&sym.sym)?;
            if fields.len() != info.fields.len() {
                let (expected, actual) = (info.fields.len(), fields.len());
                return Err(TypeError::ArityMismatch { expected, actual, loc }.into());
            }

            let declared: Vec<&Type> = info.fields.iter().map(|(_, tpe)| tpe).collect();
            let (arguments, instantiated) = instantiate(state.fresh, &info.tparams, &declared, loc);

            let mut initialized = vec![false; info.fields.len()];
            for init in fields {
                let index = info
                    .fields
                    .iter()
                    .position(|(field, _)| field == &init.field.sym)
                    .ok_or_else(|| CheckError::missing(init.field.sym.clone()))?;
                if std::mem::replace(&mut initialized[index], true) {
                    let name = init.field.sym.name.clone();
                    let loc = init.field.loc;
                    return Err(TypeError::DuplicateField { name, loc }.into());
                }
                let actual = infer_expression(state, context, &init.exp)?;
                state.unify(&instantiated[index], &actual, init.exp.loc)?;
            }

            Ok(Type::Struct(info.sym.clone(), arguments))
        }

        ExprKind::StructGet { exp: target, field } => {
            let info = context.struct_(&field.sym.struct_sym)?;
            let index = info
                .fields
                .iter()
                .position(|(sym, _)| sym == &field.sym)
                .ok_or_else(|| CheckError::missing(field.sym.clone()))?;

            let declared: Vec<&Type> = info.fields.iter().map(|(_, tpe)| tpe).collect();
            let (arguments, mut instantiated) =
                instantiate(state.fresh, &info.tparams, &declared, loc);

            let actual = infer_expression(state, context, target)?;
            let expected = Type::Struct(info.sym.clone(), arguments);
            state.unify(&expected, &actual, target.loc)?;

            Ok(instantiated.swap_remove(index))
        }

        ExprKind::Ascribe { exp: inner, tpe } => {
            let annotation = context.resolve_type(tpe)?;
            let actual = infer_expression(state, context, inner)?;
            state.unify(&annotation, &actual, inner.loc)?;
            Ok(annotation)
        }

        ExprKind::Do { op, exps } => {
            let (parameters, result) = instantiate_op(state, context, &op.sym, loc)?;
            if exps.len() != parameters.len() {
                let (expected, actual) = (parameters.len(), exps.len());
                return Err(TypeError::ArityMismatch { expected, actual, loc }.into());
            }
            for (parameter, argument) in parameters.iter().zip(exps) {
                let actual = infer_expression(state, context, argument)?;
                state.unify(parameter, &actual, argument.loc)?;
            }
            Ok(result)
        }

        ExprKind::TryWith { exp: body, rules, .. } => {
            let tpe = infer_expression(state, context, body)?;
            for rule in rules {
                infer_handler_rule(state, context, rule, &tpe)?;
            }
            Ok(tpe)
        }

        ExprKind::FixpointConstraintSet(constraints) => {
            for constraint in constraints {
                predicate::infer_constraint(state, context, constraint)?;
            }
            Ok(Type::SCHEMA)
        }

        ExprKind::FixpointMerge { exp1, exp2 } => {
            let t1 = infer_expression(state, context, exp1)?;
            state.unify(&Type::SCHEMA, &t1, exp1.loc)?;
            let t2 = infer_expression(state, context, exp2)?;
            state.unify(&Type::SCHEMA, &t2, exp2.loc)?;
            Ok(Type::SCHEMA)
        }
    }
}

/// Unifies a formal parameter with its annotation and with `expected`, if given.
pub fn check_fparam(
    state: &mut CheckState,
    context: &Context,
    fparam: &FormalParam,
    expected: Option<&Type>,
) -> Result<Type, CheckError> {
    let parameter = Type::Var(fparam.sym.tvar.clone());
    if let Some(tpe) = &fparam.tpe {
        let annotation = context.resolve_type(tpe)?;
        state.unify(&annotation, &parameter, fparam.loc)?;
    }
    if let Some(expected) = expected {
        state.unify(expected, &parameter, fparam.loc)?;
    }
    Ok(parameter)
}

fn infer_match(
    state: &mut CheckState,
    context: &Context,
    scrutinee: &Expr,
    rules: &[MatchRule],
    slot: &Type,
) -> Result<(), CheckError> {
    let scrutinee_type = infer_expression(state, context, scrutinee)?;

    let patterns = rules
        .iter()
        .map(|rule| pattern::infer_pattern(state, context, &rule.pat))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(pattern_type) = state.unify_many(&patterns, scrutinee.loc)? {
        state.unify(&pattern_type, &scrutinee_type, scrutinee.loc)?;
    }

    for rule in rules {
        if let Some(guard) = &rule.guard {
            let guard_type = infer_expression(state, context, guard)?;
            state.unify(&Type::BOOL, &guard_type, guard.loc)?;
        }
        let body = infer_expression(state, context, &rule.exp)?;
        state.unify(slot, &body, rule.exp.loc)?;
    }

    Ok(())
}

fn infer_type_match(
    state: &mut CheckState,
    context: &Context,
    scrutinee: &Expr,
    rules: &[TypeMatchRule],
    slot: &Type,
) -> Result<(), CheckError> {
    infer_expression(state, context, scrutinee)?;

    for rule in rules {
        let annotation = context.resolve_type(&rule.tpe)?;
        let binder = Type::Var(rule.sym.tvar.clone());
        state.unify(&annotation, &binder, rule.tpe.loc())?;

        let body = infer_expression(state, context, &rule.exp)?;
        state.unify(slot, &body, rule.exp.loc)?;
    }

    Ok(())
}

/// Each rule binds the operation's parameters followed by a resumption
/// `op_result -> t`, where `t` is the type of the guarded expression.
fn infer_handler_rule(
    state: &mut CheckState,
    context: &Context,
    rule: &HandlerRule,
    tpe: &Type,
) -> Result<(), CheckError> {
    let (parameters, result) = instantiate_op(state, context, &rule.op.sym, rule.loc)?;

    let expected = parameters.len() + 1;
    let Some((resumption, fparams)) = rule.fparams.split_last() else {
        let actual = 0;
        return Err(TypeError::ArityMismatch { expected, actual, loc: rule.loc }.into());
    };
    if rule.fparams.len() != expected {
        let actual = rule.fparams.len();
        return Err(TypeError::ArityMismatch { expected, actual, loc: rule.loc }.into());
    }

    for (parameter, fparam) in parameters.iter().zip(fparams) {
        check_fparam(state, context, fparam, Some(parameter))?;
    }
    let continuation = Type::arrow([result], tpe.clone());
    check_fparam(state, context, resumption, Some(&continuation))?;

    let body = infer_expression(state, context, &rule.exp)?;
    state.unify(tpe, &body, rule.exp.loc)
}

pub fn infer_tag(
    state: &mut CheckState,
    context: &Context,
    sym: &CaseSym,
    actual: &Type,
    loc: SourceLocation,
) -> Result<Type, CheckError> {
    let case = context.case(sym)?;
    let (arguments, instantiated) = instantiate(state.fresh, &case.tparams, &[&case.payload], loc);
    state.unify(&instantiated[0], actual, loc)?;
    Ok(Type::Enum(case.enum_sym.clone(), arguments))
}

fn instantiate_op(
    state: &mut CheckState,
    context: &Context,
    sym: &OpSym,
    loc: SourceLocation,
) -> Result<(Vec<Type>, Type), CheckError> {
    let (tpe, _) = context.op_scheme(sym)?.instantiate(state.fresh, loc);
    match tpe {
        Type::Arrow(parameters, result) => Ok((parameters, *result)),
        _ => unreachable!("invariant violated: operation {sym} does not have a function type"),
    }
}
