use ast::named;
use files::SourceLocation;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use symbols::{
    AssocTypeSym, CaseSym, DefnSym, EnumSym, Fresh, OpSym, SigSym, StructFieldSym, StructSym,
    TraitSym, TypeAliasSym, TypeVarSym,
};
use types::{Denotation, Scheme, TraitConstraint, Type};

use crate::error::{CheckError, InternalError, TypeError};

/// The declared shape of an enum case.
#[derive(Debug, Clone)]
pub struct CaseInfo {
    pub enum_sym: EnumSym,
    pub tparams: Vec<TypeVarSym>,
    pub payload: Type,
}

#[derive(Debug, Clone)]
pub struct StructInfo {
    pub sym: StructSym,
    pub tparams: Vec<TypeVarSym>,
    pub fields: Vec<(StructFieldSym, Type)>,
}

#[derive(Debug, Clone)]
pub struct RelationInfo {
    pub den: Denotation,
    pub attributes: Vec<Type>,
}

impl RelationInfo {
    pub fn tpe(&self) -> Type {
        Type::Predicate(self.den, self.attributes.clone())
    }
}

/// Declaration signatures for a whole program, resolved before any body is checked.
pub struct Context<'r> {
    pub root: &'r named::Root,
    pub(crate) aliases: FxHashMap<TypeAliasSym, &'r named::TypeAlias>,
    pub(crate) enum_arities: FxHashMap<EnumSym, usize>,
    pub(crate) struct_arities: FxHashMap<StructSym, usize>,
    pub(crate) assoc_types: FxHashMap<AssocTypeSym, SourceLocation>,
    pub defs: FxHashMap<DefnSym, Scheme>,
    pub sigs: FxHashMap<SigSym, Scheme>,
    pub ops: FxHashMap<OpSym, Scheme>,
    pub cases: FxHashMap<CaseSym, CaseInfo>,
    pub structs: FxHashMap<StructSym, StructInfo>,
    pub relations: FxHashMap<SmolStr, RelationInfo>,
}

impl<'r> Context<'r> {
    #[tracing::instrument(skip_all, name = "build_context")]
    pub fn new(root: &'r named::Root) -> Result<Context<'r>, CheckError> {
        let aliases = root.aliases.iter().map(|alias| (alias.sym.clone(), alias)).collect();
        let enum_arities =
            root.enums.iter().map(|enum_| (enum_.sym.clone(), enum_.tparams.len())).collect();
        let struct_arities = root
            .structs
            .iter()
            .map(|struct_| (struct_.sym.clone(), struct_.tparams.len()))
            .collect();
        let assoc_types = root
            .traits
            .iter()
            .flat_map(|trait_| &trait_.assocs)
            .map(|assoc| (assoc.sym.clone(), assoc.loc))
            .collect();

        let mut context = Context {
            root,
            aliases,
            enum_arities,
            struct_arities,
            assoc_types,
            defs: FxHashMap::default(),
            sigs: FxHashMap::default(),
            ops: FxHashMap::default(),
            cases: FxHashMap::default(),
            structs: FxHashMap::default(),
            relations: FxHashMap::default(),
        };

        for enum_ in &root.enums {
            for case in &enum_.cases {
                let payload = match &case.tpe {
                    Some(tpe) => context.resolve_type(tpe)?,
                    None => Type::UNIT,
                };
                let tparams = enum_.tparams.clone();
                let info = CaseInfo { enum_sym: enum_.sym.clone(), tparams, payload };
                context.cases.insert(case.sym.clone(), info);
            }
        }

        for struct_ in &root.structs {
            let fields = struct_
                .fields
                .iter()
                .map(|field| Ok((field.sym.clone(), context.resolve_type(&field.tpe)?)))
                .collect::<Result<Vec<_>, CheckError>>()?;
            let tparams = struct_.tparams.clone();
            let info = StructInfo { sym: struct_.sym.clone(), tparams, fields };
            context.structs.insert(struct_.sym.clone(), info);
        }

        for relation in &root.relations {
            let attributes = relation
                .attributes
                .iter()
                .map(|attribute| context.resolve_type(attribute))
                .collect::<Result<Vec<_>, _>>()?;
            let info = RelationInfo { den: relation.den, attributes };
            context.relations.insert(relation.name.name.clone(), info);
        }

        for def in &root.defs {
            let scheme = context.spec_scheme(&def.spec, None)?;
            context.defs.insert(def.sym.clone(), scheme);
        }

        for trait_ in &root.traits {
            for sig in &trait_.sigs {
                let scheme = context.spec_scheme(&sig.spec, Some(trait_))?;
                context.sigs.insert(sig.sym.clone(), scheme);
            }
        }

        for effect in &root.effects {
            for op in &effect.ops {
                let scheme = context.spec_scheme(&op.spec, None)?;
                context.ops.insert(op.sym.clone(), scheme);
            }
        }

        tracing::debug!(
            defs = context.defs.len(),
            sigs = context.sigs.len(),
            ops = context.ops.len(),
            "resolved declarations"
        );

        Ok(context)
    }

    /// The declared type of a parameter of a def, sig or op.
    ///
    /// Declarations are checked one at a time, so a parameter type is never
    /// inferred from the body; it must be written.
    pub fn fparam_type(&self, fparam: &named::FormalParam) -> Result<Type, CheckError> {
        match &fparam.tpe {
            Some(tpe) => self.resolve_type(tpe),
            None => Err(InternalError::UnannotatedParameter { sym: fparam.sym.clone() }.into()),
        }
    }

    pub fn trait_constraint(
        &self,
        constraint: &ast::TraitConstraintExpr,
    ) -> Result<TraitConstraint, CheckError> {
        let arg = self.resolve_type(&constraint.arg)?;
        Ok(TraitConstraint { trait_sym: constraint.head.sym.clone(), arg })
    }

    /// The declared type of a def, sig or op, generalised over its type parameters.
    ///
    /// Signatures are additionally quantified over the parameter of their trait.
    pub fn spec_scheme(
        &self,
        spec: &named::Spec,
        owner: Option<&named::Trait>,
    ) -> Result<Scheme, CheckError> {
        let mut quantifiers = vec![];
        let mut constraints = vec![];

        if let Some(trait_) = owner {
            quantifiers.push(trait_.tparam.clone());
            let arg = Type::Var(trait_.tparam.clone());
            constraints.push(TraitConstraint { trait_sym: trait_.sym.clone(), arg });
        }

        quantifiers.extend(spec.tparams.iter().cloned());
        for constraint in &spec.tconstrs {
            constraints.push(self.trait_constraint(constraint)?);
        }

        let arguments = spec
            .fparams
            .iter()
            .map(|fparam| self.fparam_type(fparam))
            .collect::<Result<Vec<_>, _>>()?;
        let result = self.resolve_type(&spec.ret)?;

        Ok(Scheme { quantifiers, constraints, base: Type::arrow(arguments, result) })
    }

    pub fn def_scheme(&self, sym: &DefnSym) -> Result<&Scheme, CheckError> {
        self.defs.get(sym).ok_or_else(|| CheckError::missing(sym.clone()))
    }

    pub fn sig_scheme(&self, sym: &SigSym) -> Result<&Scheme, CheckError> {
        self.sigs.get(sym).ok_or_else(|| CheckError::missing(sym.clone()))
    }

    pub fn op_scheme(&self, sym: &OpSym) -> Result<&Scheme, CheckError> {
        self.ops.get(sym).ok_or_else(|| CheckError::missing(sym.clone()))
    }

    pub fn case(&self, sym: &CaseSym) -> Result<&CaseInfo, CheckError> {
        self.cases.get(sym).ok_or_else(|| CheckError::missing(sym.clone()))
    }

    pub fn struct_(&self, sym: &StructSym) -> Result<&StructInfo, CheckError> {
        self.structs.get(sym).ok_or_else(|| CheckError::missing(sym.clone()))
    }

    pub fn relation(&self, pred: &ast::Ident) -> Result<&RelationInfo, CheckError> {
        self.relations.get(&pred.name).ok_or_else(|| {
            let name = pred.name.clone();
            CheckError::Type(TypeError::UnresolvedReference { name, loc: pred.loc })
        })
    }

    pub fn trait_of(&self, sym: &TraitSym) -> Option<&'r named::Trait> {
        self.root.traits.iter().find(|trait_| &trait_.sym == sym)
    }
}

/// Replaces `tparams` with fresh flexible variables in each of `types`.
///
/// Returns the fresh arguments followed by the instantiated types.
pub fn instantiate(
    fresh: &Fresh,
    tparams: &[TypeVarSym],
    types: &[&Type],
    loc: SourceLocation,
) -> (Vec<Type>, Vec<Type>) {
    let arguments: Vec<Type> = tparams
        .iter()
        .map(|tparam| Type::Var(fresh.fresh_type_var(tparam.kind.clone(), loc)))
        .collect();

    let mut rename = |var: &TypeVarSym| {
        let index = tparams.iter().position(|tparam| tparam == var)?;
        Some(arguments[index].clone())
    };
    let instantiated = types.iter().map(|tpe| tpe.map_vars(&mut rename)).collect();

    (arguments, instantiated)
}
