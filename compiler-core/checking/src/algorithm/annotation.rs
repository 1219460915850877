//! Conversion of written types into [`Type`].

use ast::TypeExpr;
use files::SourceLocation;
use symbols::{TypeAliasSym, TypeVarSym};
use types::Type;

use crate::context::Context;
use crate::error::{CheckError, InternalError, TypeError};

impl Context<'_> {
    pub fn resolve_type(&self, tpe: &TypeExpr) -> Result<Type, CheckError> {
        let mut expanding = vec![];
        self.resolve_type_with(tpe, &mut expanding)
    }

    fn resolve_all(
        &self,
        types: &[TypeExpr],
        expanding: &mut Vec<TypeAliasSym>,
    ) -> Result<Vec<Type>, CheckError> {
        types.iter().map(|tpe| self.resolve_type_with(tpe, expanding)).collect()
    }

    fn resolve_type_with(
        &self,
        tpe: &TypeExpr,
        expanding: &mut Vec<TypeAliasSym>,
    ) -> Result<Type, CheckError> {
        match tpe {
            TypeExpr::Var { sym, .. } => Ok(Type::Var(sym.clone())),

            TypeExpr::Primitive { constructor, .. } => Ok(Type::Cst(*constructor)),

            TypeExpr::Enum { sym, args, loc } => {
                let arity = self
                    .enum_arities
                    .get(&sym.sym)
                    .ok_or_else(|| CheckError::missing(sym.sym.clone()))?;
                check_arity(*arity, args.len(), *loc)?;
                Ok(Type::Enum(sym.sym.clone(), self.resolve_all(args, expanding)?))
            }

            TypeExpr::Struct { sym, args, loc } => {
                let arity = self
                    .struct_arities
                    .get(&sym.sym)
                    .ok_or_else(|| CheckError::missing(sym.sym.clone()))?;
                check_arity(*arity, args.len(), *loc)?;
                Ok(Type::Struct(sym.sym.clone(), self.resolve_all(args, expanding)?))
            }

            TypeExpr::Alias { sym, args, loc } => {
                let alias = self
                    .aliases
                    .get(&sym.sym)
                    .ok_or_else(|| CheckError::missing(sym.sym.clone()))?;
                check_arity(alias.tparams.len(), args.len(), *loc)?;

                if expanding.contains(&sym.sym) {
                    let sym = sym.sym.clone();
                    return Err(InternalError::CyclicTypeAlias { sym }.into());
                }

                let arguments = self.resolve_all(args, expanding)?;

                expanding.push(sym.sym.clone());
                let body = self.resolve_type_with(&alias.tpe, expanding)?;
                expanding.pop();

                let expansion = substitute(&body, &alias.tparams, &arguments);
                Ok(Type::Alias(sym.sym.clone(), arguments, Box::new(expansion)))
            }

            TypeExpr::AssocType { sym, arg, .. } => {
                if !self.assoc_types.contains_key(&sym.sym) {
                    return Err(CheckError::missing(sym.sym.clone()));
                }
                let argument = self.resolve_type_with(arg, expanding)?;
                Ok(Type::AssocType(sym.sym.clone(), Box::new(argument)))
            }

            TypeExpr::Tuple { elms, .. } => Ok(Type::Tuple(self.resolve_all(elms, expanding)?)),

            TypeExpr::Arrow { args, ret, .. } => {
                let arguments = self.resolve_all(args, expanding)?;
                let result = self.resolve_type_with(ret, expanding)?;
                Ok(Type::Arrow(arguments, Box::new(result)))
            }
        }
    }
}

fn check_arity(expected: usize, actual: usize, loc: SourceLocation) -> Result<(), CheckError> {
    if expected != actual {
        return Err(TypeError::ArityMismatch { expected, actual, loc }.into());
    }
    Ok(())
}

fn substitute(tpe: &Type, tparams: &[TypeVarSym], arguments: &[Type]) -> Type {
    tpe.map_vars(&mut |var| {
        let index = tparams.iter().position(|tparam| tparam == var)?;
        arguments.get(index).cloned()
    })
}
