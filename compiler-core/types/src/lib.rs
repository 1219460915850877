//! The type language shared by inference and the query services.

mod pretty;
mod scheme;

pub use scheme::*;
pub use symbols::{Kind, Rigidity};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use symbols::{AssocTypeSym, EnumSym, StructSym, TypeAliasSym, TypeVarSym};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeConstructor {
    Unit,
    Bool,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    BigInt,
    Float32,
    Float64,
    Str,
    /// The type of first-class constraint sets.
    Schema,
}

impl TypeConstructor {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TypeConstructor::Int8
                | TypeConstructor::Int16
                | TypeConstructor::Int32
                | TypeConstructor::Int64
                | TypeConstructor::BigInt
                | TypeConstructor::Float32
                | TypeConstructor::Float64
        )
    }
}

/// Whether a relation holds plain facts or lattice values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Denotation {
    Relational,
    Latticenal,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Cst(TypeConstructor),
    Var(TypeVarSym),
    Enum(EnumSym, Vec<Type>),
    Struct(StructSym, Vec<Type>),
    Tuple(Vec<Type>),
    Arrow(Vec<Type>, Box<Type>),
    Predicate(Denotation, Vec<Type>),
    /// An alias application, kept alongside its expansion.
    Alias(TypeAliasSym, Vec<Type>, Box<Type>),
    AssocType(AssocTypeSym, Box<Type>),
}

impl Type {
    pub const UNIT: Type = Type::Cst(TypeConstructor::Unit);
    pub const BOOL: Type = Type::Cst(TypeConstructor::Bool);
    pub const CHAR: Type = Type::Cst(TypeConstructor::Char);
    pub const INT8: Type = Type::Cst(TypeConstructor::Int8);
    pub const INT16: Type = Type::Cst(TypeConstructor::Int16);
    pub const INT32: Type = Type::Cst(TypeConstructor::Int32);
    pub const INT64: Type = Type::Cst(TypeConstructor::Int64);
    pub const BIG_INT: Type = Type::Cst(TypeConstructor::BigInt);
    pub const FLOAT32: Type = Type::Cst(TypeConstructor::Float32);
    pub const FLOAT64: Type = Type::Cst(TypeConstructor::Float64);
    pub const STR: Type = Type::Cst(TypeConstructor::Str);
    pub const SCHEMA: Type = Type::Cst(TypeConstructor::Schema);

    pub fn arrow(arguments: impl IntoIterator<Item = Type>, result: Type) -> Type {
        Type::Arrow(arguments.into_iter().collect(), Box::new(result))
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            Type::Cst(constructor) => constructor.is_numeric(),
            Type::Alias(_, _, expansion) => expansion.is_numeric(),
            _ => false,
        }
    }

    /// Strips alias applications at the top of the type.
    pub fn expand(&self) -> &Type {
        let mut current = self;
        while let Type::Alias(_, _, expansion) = current {
            current = expansion;
        }
        current
    }

    pub fn contains_var(&self, var: &TypeVarSym) -> bool {
        match self {
            Type::Cst(_) => false,
            Type::Var(v) => v == var,
            Type::Enum(_, arguments)
            | Type::Struct(_, arguments)
            | Type::Tuple(arguments)
            | Type::Predicate(_, arguments) => arguments.iter().any(|t| t.contains_var(var)),
            Type::Arrow(arguments, result) => {
                arguments.iter().any(|t| t.contains_var(var)) || result.contains_var(var)
            }
            Type::Alias(_, arguments, expansion) => {
                arguments.iter().any(|t| t.contains_var(var)) || expansion.contains_var(var)
            }
            Type::AssocType(_, argument) => argument.contains_var(var),
        }
    }

    /// The type variables occurring in this type, ordered by id.
    pub fn free_type_vars(&self) -> BTreeSet<TypeVarSym> {
        let mut vars = BTreeSet::new();
        self.collect_type_vars(&mut vars);
        vars
    }

    fn collect_type_vars(&self, vars: &mut BTreeSet<TypeVarSym>) {
        match self {
            Type::Cst(_) => {}
            Type::Var(var) => {
                vars.insert(var.clone());
            }
            Type::Enum(_, arguments)
            | Type::Struct(_, arguments)
            | Type::Tuple(arguments)
            | Type::Predicate(_, arguments) => {
                arguments.iter().for_each(|t| t.collect_type_vars(vars));
            }
            Type::Arrow(arguments, result) => {
                arguments.iter().for_each(|t| t.collect_type_vars(vars));
                result.collect_type_vars(vars);
            }
            Type::Alias(_, arguments, expansion) => {
                arguments.iter().for_each(|t| t.collect_type_vars(vars));
                expansion.collect_type_vars(vars);
            }
            Type::AssocType(_, argument) => argument.collect_type_vars(vars),
        }
    }

    /// Replaces type variables bottom-up; variables mapped to `None` stay as they are.
    pub fn map_vars(&self, f: &mut impl FnMut(&TypeVarSym) -> Option<Type>) -> Type {
        match self {
            Type::Cst(constructor) => Type::Cst(*constructor),
            Type::Var(var) => f(var).unwrap_or_else(|| Type::Var(var.clone())),
            Type::Enum(sym, arguments) => Type::Enum(sym.clone(), map_all(arguments, f)),
            Type::Struct(sym, arguments) => Type::Struct(sym.clone(), map_all(arguments, f)),
            Type::Tuple(elements) => Type::Tuple(map_all(elements, f)),
            Type::Arrow(arguments, result) => {
                let arguments = map_all(arguments, f);
                Type::Arrow(arguments, Box::new(result.map_vars(f)))
            }
            Type::Predicate(denotation, terms) => Type::Predicate(*denotation, map_all(terms, f)),
            Type::Alias(sym, arguments, expansion) => {
                let arguments = map_all(arguments, f);
                Type::Alias(sym.clone(), arguments, Box::new(expansion.map_vars(f)))
            }
            Type::AssocType(sym, argument) => {
                Type::AssocType(sym.clone(), Box::new(argument.map_vars(f)))
            }
        }
    }
}

fn map_all(types: &[Type], f: &mut impl FnMut(&TypeVarSym) -> Option<Type>) -> Vec<Type> {
    types.iter().map(|t| t.map_vars(f)).collect()
}

#[cfg(test)]
mod tests;
