//! Rebuilds named nodes as typed nodes once a declaration's constraints are solved.

use ast::{TraitConstraintExpr, TypeExpr, named, typed};
use types::{Scheme, Type};

use crate::context::Context;
use crate::error::CheckError;
use crate::state::CheckState;

pub fn annotation(context: &Context, syntax: &TypeExpr) -> Result<typed::Annotation, CheckError> {
    let tpe = context.resolve_type(syntax)?;
    Ok(typed::Annotation { syntax: syntax.clone(), tpe })
}

pub fn optional_annotation(
    context: &Context,
    syntax: Option<&TypeExpr>,
) -> Result<Option<typed::Annotation>, CheckError> {
    syntax.map(|syntax| annotation(context, syntax)).transpose()
}

pub fn trait_constraint(
    context: &Context,
    constraint: &TraitConstraintExpr,
) -> Result<typed::TraitConstraint, CheckError> {
    Ok(typed::TraitConstraint {
        head: constraint.head.clone(),
        arg: annotation(context, &constraint.arg)?,
        loc: constraint.loc,
    })
}

pub fn trait_constraints(
    context: &Context,
    constraints: &[TraitConstraintExpr],
) -> Result<Vec<typed::TraitConstraint>, CheckError> {
    constraints.iter().map(|constraint| trait_constraint(context, constraint)).collect()
}

pub fn fparam(
    state: &CheckState,
    context: &Context,
    fparam: &named::FormalParam,
) -> Result<typed::FormalParam, CheckError> {
    Ok(typed::FormalParam {
        sym: fparam.sym.clone(),
        ann: optional_annotation(context, fparam.tpe.as_ref())?,
        tpe: state.resolve(&fparam.sym.tvar),
        loc: fparam.loc,
    })
}

fn fparams(
    state: &CheckState,
    context: &Context,
    fparams: &[named::FormalParam],
) -> Result<Vec<typed::FormalParam>, CheckError> {
    fparams.iter().map(|f| fparam(state, context, f)).collect()
}

pub fn spec(
    state: &CheckState,
    context: &Context,
    spec: &named::Spec,
    scheme: Scheme,
) -> Result<typed::Spec, CheckError> {
    Ok(typed::Spec {
        ann: spec.ann.clone(),
        tparams: spec.tparams.clone(),
        fparams: fparams(state, context, &spec.fparams)?,
        ret: annotation(context, &spec.ret)?,
        tconstrs: trait_constraints(context, &spec.tconstrs)?,
        scheme,
        loc: spec.loc,
    })
}

pub fn expression(
    state: &CheckState,
    context: &Context,
    exp: &named::Expr,
) -> Result<typed::Expr, CheckError> {
    let kind = expression_kind(state, context, &exp.kind)?;
    Ok(typed::Expr { kind, tpe: state.resolve(&exp.tvar), loc: exp.loc })
}

fn boxed(
    state: &CheckState,
    context: &Context,
    exp: &named::Expr,
) -> Result<Box<typed::Expr>, CheckError> {
    expression(state, context, exp).map(Box::new)
}

fn expressions(
    state: &CheckState,
    context: &Context,
    exps: &[named::Expr],
) -> Result<Vec<typed::Expr>, CheckError> {
    exps.iter().map(|exp| expression(state, context, exp)).collect()
}

fn expression_kind(
    state: &CheckState,
    context: &Context,
    kind: &named::ExprKind,
) -> Result<typed::ExprKind, CheckError> {
    use named::ExprKind as N;
    use typed::ExprKind as T;

    let kind = match kind {
        N::Cst(constant) => T::Cst(constant.clone()),
        N::Var(sym) => T::Var(sym.clone()),
        N::Def(sym) => T::Def(sym.clone()),
        N::Sig(sym) => T::Sig(sym.clone()),
        N::Hole(name) => T::Hole(name.clone()),
        N::Lambda { fparam: f, exp } => {
            T::Lambda { fparam: fparam(state, context, f)?, exp: boxed(state, context, exp)? }
        }
        N::Apply { exp, exps } => T::Apply {
            exp: boxed(state, context, exp)?,
            exps: expressions(state, context, exps)?,
        },
        N::Unary { op, exp } => T::Unary { op: *op, exp: boxed(state, context, exp)? },
        N::Binary { op, exp1, exp2 } => T::Binary {
            op: *op,
            exp1: boxed(state, context, exp1)?,
            exp2: boxed(state, context, exp2)?,
        },
        N::IfThenElse { exp1, exp2, exp3 } => T::IfThenElse {
            exp1: boxed(state, context, exp1)?,
            exp2: boxed(state, context, exp2)?,
            exp3: boxed(state, context, exp3)?,
        },
        N::Stm { exp1, exp2 } => {
            T::Stm { exp1: boxed(state, context, exp1)?, exp2: boxed(state, context, exp2)? }
        }
        N::Let { sym, exp1, exp2 } => T::Let {
            sym: sym.clone(),
            exp1: boxed(state, context, exp1)?,
            exp2: boxed(state, context, exp2)?,
        },
        N::Match { exp, rules } => T::Match {
            exp: boxed(state, context, exp)?,
            rules: rules
                .iter()
                .map(|rule| {
                    Ok(typed::MatchRule {
                        pat: pattern(state, context, &rule.pat)?,
                        guard: rule.guard.as_ref().map(|g| expression(state, context, g)).transpose()?,
                        exp: expression(state, context, &rule.exp)?,
                        loc: rule.loc,
                    })
                })
                .collect::<Result<_, CheckError>>()?,
        },
        N::TypeMatch { exp, rules } => T::TypeMatch {
            exp: boxed(state, context, exp)?,
            rules: rules
                .iter()
                .map(|rule| {
                    Ok(typed::TypeMatchRule {
                        sym: rule.sym.clone(),
                        tpe: annotation(context, &rule.tpe)?,
                        exp: expression(state, context, &rule.exp)?,
                        loc: rule.loc,
                    })
                })
                .collect::<Result<_, CheckError>>()?,
        },
        N::Tag { sym, exp } => T::Tag {
            sym: sym.clone(),
            exp: exp.as_deref().map(|exp| boxed(state, context, exp)).transpose()?,
        },
        N::Tuple(elms) => T::Tuple(expressions(state, context, elms)?),
        N::StructNew { sym, fields } => T::StructNew {
            sym: sym.clone(),
            fields: fields
                .iter()
                .map(|init| {
                    let exp = expression(state, context, &init.exp)?;
                    Ok(typed::FieldInit { field: init.field.clone(), exp })
                })
                .collect::<Result<_, CheckError>>()?,
        },
        N::StructGet { exp, field } => {
            T::StructGet { exp: boxed(state, context, exp)?, field: field.clone() }
        }
        N::Ascribe { exp, tpe } => {
            T::Ascribe { exp: boxed(state, context, exp)?, tpe: annotation(context, tpe)? }
        }
        N::Do { op, exps } => T::Do { op: op.clone(), exps: expressions(state, context, exps)? },
        N::TryWith { exp, effect, rules } => T::TryWith {
            exp: boxed(state, context, exp)?,
            effect: effect.clone(),
            rules: rules
                .iter()
                .map(|rule| {
                    Ok(typed::HandlerRule {
                        op: rule.op.clone(),
                        fparams: fparams(state, context, &rule.fparams)?,
                        exp: expression(state, context, &rule.exp)?,
                        loc: rule.loc,
                    })
                })
                .collect::<Result<_, CheckError>>()?,
        },
        N::FixpointConstraintSet(constraints) => T::FixpointConstraintSet(
            constraints
                .iter()
                .map(|c| constraint(state, context, c))
                .collect::<Result<_, _>>()?,
        ),
        N::FixpointMerge { exp1, exp2 } => T::FixpointMerge {
            exp1: boxed(state, context, exp1)?,
            exp2: boxed(state, context, exp2)?,
        },
    };

    Ok(kind)
}

pub fn pattern(
    state: &CheckState,
    context: &Context,
    pat: &named::Pattern,
) -> Result<typed::Pattern, CheckError> {
    let kind = match &pat.kind {
        named::PatternKind::Wild => typed::PatternKind::Wild,
        named::PatternKind::Var(sym) => typed::PatternKind::Var(sym.clone()),
        named::PatternKind::Cst(constant) => typed::PatternKind::Cst(constant.clone()),
        named::PatternKind::Tag { sym, pat } => typed::PatternKind::Tag {
            sym: sym.clone(),
            pat: pat.as_deref().map(|p| pattern(state, context, p).map(Box::new)).transpose()?,
        },
        named::PatternKind::Tuple(elms) => typed::PatternKind::Tuple(
            elms.iter().map(|p| pattern(state, context, p)).collect::<Result<_, _>>()?,
        ),
    };
    Ok(typed::Pattern { kind, tpe: state.resolve(&pat.tvar), loc: pat.loc })
}

fn constraint(
    state: &CheckState,
    context: &Context,
    constraint: &named::Constraint,
) -> Result<typed::Constraint, CheckError> {
    let cparams = constraint
        .cparams
        .iter()
        .map(|cparam| typed::ConstraintParam {
            sym: cparam.sym.clone(),
            tpe: state.resolve(&cparam.sym.tvar),
            loc: cparam.loc,
        })
        .collect();

    let head = match &constraint.head {
        named::Head::Atom { pred, terms, loc } => {
            let relation = context.relation(pred)?;
            typed::Head::Atom {
                pred: pred.clone(),
                den: relation.den,
                terms: expressions(state, context, terms)?,
                tpe: relation.tpe(),
                loc: *loc,
            }
        }
    };

    let body = constraint
        .body
        .iter()
        .map(|body| match body {
            named::Body::Atom { pred, polarity, terms, loc } => {
                let relation = context.relation(pred)?;
                Ok(typed::Body::Atom {
                    pred: pred.clone(),
                    den: relation.den,
                    polarity: *polarity,
                    terms: terms
                        .iter()
                        .map(|term| pattern(state, context, term))
                        .collect::<Result<_, _>>()?,
                    tpe: relation.tpe(),
                    loc: *loc,
                })
            }
            named::Body::Guard { exp, loc } => {
                Ok(typed::Body::Guard { exp: expression(state, context, exp)?, loc: *loc })
            }
        })
        .collect::<Result<_, CheckError>>()?;

    Ok(typed::Constraint { cparams, head, body, loc: constraint.loc })
}

/// The type of a declaration after its constraints are solved.
pub fn principal_type(state: &CheckState, scheme: &Scheme) -> Type {
    state.apply(&scheme.base)
}
