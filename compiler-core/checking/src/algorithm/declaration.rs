use ast::{named, typed};
use symbols::Fresh;
use types::Scheme;

use crate::algorithm::expression::{check_fparam, infer_expression};
use crate::context::Context;
use crate::error::{CheckError, InternalError};
use crate::reassemble;
use crate::state::CheckState;

#[tracing::instrument(skip_all, name = "check_def", fields(def = %def.sym))]
pub fn check_def(
    fresh: &Fresh,
    context: &Context,
    def: &named::Def,
    scheme: Scheme,
) -> Result<typed::Def, CheckError> {
    let (spec, exp) = check_body(fresh, context, &def.spec, &def.exp, scheme)?;
    Ok(typed::Def { sym: def.sym.clone(), spec, exp, loc: def.loc })
}

#[tracing::instrument(skip_all, name = "check_trait", fields(trait_ = %trait_.sym))]
pub fn check_trait(
    fresh: &Fresh,
    context: &Context,
    trait_: &named::Trait,
) -> Result<typed::Trait, CheckError> {
    let sigs = trait_
        .sigs
        .iter()
        .map(|sig| {
            let scheme = context.sig_scheme(&sig.sym)?.clone();
            let (spec, exp) = match &sig.exp {
                Some(exp) => {
                    let (spec, exp) = check_body(fresh, context, &sig.spec, exp, scheme)?;
                    (spec, Some(exp))
                }
                None => (check_spec(fresh, context, &sig.spec, scheme)?, None),
            };
            Ok(typed::Sig { sym: sig.sym.clone(), spec, exp, loc: sig.loc })
        })
        .collect::<Result<_, CheckError>>()?;

    let assocs = trait_
        .assocs
        .iter()
        .map(|assoc| typed::AssocTypeSig { sym: assoc.sym.clone(), loc: assoc.loc })
        .collect();

    Ok(typed::Trait {
        ann: trait_.ann.clone(),
        sym: trait_.sym.clone(),
        tparam: trait_.tparam.clone(),
        super_traits: reassemble::trait_constraints(context, &trait_.super_traits)?,
        assocs,
        sigs,
        loc: trait_.loc,
    })
}

#[tracing::instrument(skip_all, name = "check_instance", fields(trait_ = %instance.trait_use.sym))]
pub fn check_instance(
    fresh: &Fresh,
    context: &Context,
    instance: &named::Instance,
) -> Result<typed::Instance, CheckError> {
    let assocs = instance
        .assocs
        .iter()
        .map(|assoc| {
            Ok(typed::AssocTypeDef {
                sym: assoc.sym.clone(),
                arg: reassemble::annotation(context, &assoc.arg)?,
                tpe: reassemble::annotation(context, &assoc.tpe)?,
                loc: assoc.loc,
            })
        })
        .collect::<Result<_, CheckError>>()?;

    let defs = instance
        .defs
        .iter()
        .map(|def| {
            let scheme = context.spec_scheme(&def.spec, None)?;
            check_def(fresh, context, def, scheme)
        })
        .collect::<Result<_, _>>()?;

    Ok(typed::Instance {
        ann: instance.ann.clone(),
        trait_use: instance.trait_use.clone(),
        tpe: reassemble::annotation(context, &instance.tpe)?,
        tconstrs: reassemble::trait_constraints(context, &instance.tconstrs)?,
        assocs,
        defs,
        loc: instance.loc,
    })
}

pub fn check_effect(
    fresh: &Fresh,
    context: &Context,
    effect: &named::Effect,
) -> Result<typed::Effect, CheckError> {
    let ops = effect
        .ops
        .iter()
        .map(|op| {
            let scheme = context.op_scheme(&op.sym)?.clone();
            let spec = check_spec(fresh, context, &op.spec, scheme)?;
            Ok(typed::Op { sym: op.sym.clone(), spec, loc: op.loc })
        })
        .collect::<Result<_, CheckError>>()?;

    Ok(typed::Effect { ann: effect.ann.clone(), sym: effect.sym.clone(), ops, loc: effect.loc })
}

pub fn check_enum(context: &Context, enum_: &named::Enum) -> Result<typed::Enum, CheckError> {
    let cases = enum_
        .cases
        .iter()
        .map(|case| {
            Ok(typed::Case {
                sym: case.sym.clone(),
                tpe: reassemble::optional_annotation(context, case.tpe.as_ref())?,
                loc: case.loc,
            })
        })
        .collect::<Result<_, CheckError>>()?;

    Ok(typed::Enum {
        ann: enum_.ann.clone(),
        sym: enum_.sym.clone(),
        tparams: enum_.tparams.clone(),
        cases,
        loc: enum_.loc,
    })
}

pub fn check_struct(
    context: &Context,
    struct_: &named::Struct,
) -> Result<typed::Struct, CheckError> {
    let fields = struct_
        .fields
        .iter()
        .map(|field| {
            Ok(typed::StructField {
                sym: field.sym.clone(),
                tpe: reassemble::annotation(context, &field.tpe)?,
                loc: field.loc,
            })
        })
        .collect::<Result<_, CheckError>>()?;

    Ok(typed::Struct {
        ann: struct_.ann.clone(),
        sym: struct_.sym.clone(),
        tparams: struct_.tparams.clone(),
        fields,
        loc: struct_.loc,
    })
}

pub fn check_alias(
    context: &Context,
    alias: &named::TypeAlias,
) -> Result<typed::TypeAlias, CheckError> {
    Ok(typed::TypeAlias {
        ann: alias.ann.clone(),
        sym: alias.sym.clone(),
        tparams: alias.tparams.clone(),
        tpe: reassemble::annotation(context, &alias.tpe)?,
        loc: alias.loc,
    })
}

pub fn check_relation(
    context: &Context,
    relation: &named::Relation,
) -> Result<typed::Relation, CheckError> {
    let attributes = relation
        .attributes
        .iter()
        .map(|attribute| reassemble::annotation(context, attribute))
        .collect::<Result<_, _>>()?;

    Ok(typed::Relation {
        ann: relation.ann.clone(),
        name: relation.name.clone(),
        den: relation.den,
        attributes,
        loc: relation.loc,
    })
}

/// Checks a body against its declared parameter and return types.
fn check_body(
    fresh: &Fresh,
    context: &Context,
    spec: &named::Spec,
    exp: &named::Expr,
    scheme: Scheme,
) -> Result<(typed::Spec, typed::Expr), CheckError> {
    let mut state = CheckState::new(fresh);
    for fparam in &spec.fparams {
        check_fparam(&mut state, context, fparam, None)?;
    }

    let expected = context.resolve_type(&spec.ret)?;
    let actual = infer_expression(&mut state, context, exp)?;
    state.unify(&expected, &actual, exp.loc)?;

    tracing::debug!(substitution = state.substitution.len(), "solved");

    let scheme = generalize(&state, scheme)?;
    let spec = reassemble::spec(&state, context, spec, scheme)?;
    let exp = reassemble::expression(&state, context, exp)?;

    Ok((spec, exp))
}

/// Checks a declaration without a body, such as an effect operation.
fn check_spec(
    fresh: &Fresh,
    context: &Context,
    spec: &named::Spec,
    scheme: Scheme,
) -> Result<typed::Spec, CheckError> {
    let mut state = CheckState::new(fresh);
    for fparam in &spec.fparams {
        check_fparam(&mut state, context, fparam, None)?;
    }
    let scheme = generalize(&state, scheme)?;
    reassemble::spec(&state, context, spec, scheme)
}

/// Applies the solved substitution to the declared scheme, which must then
/// be closed over its quantifiers.
fn generalize(state: &CheckState, scheme: Scheme) -> Result<Scheme, CheckError> {
    let base = reassemble::principal_type(state, &scheme);
    let scheme = Scheme { base, ..scheme };
    if let Some(symbol) = scheme.free_type_vars().into_iter().next() {
        return Err(InternalError::UnresolvedTypeVariable { symbol }.into());
    }
    Ok(scheme)
}
