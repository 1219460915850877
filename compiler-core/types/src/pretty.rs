use std::fmt;

use itertools::Itertools;

use crate::{Denotation, Scheme, TraitConstraint, Type, TypeConstructor};

impl fmt::Display for TypeConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeConstructor::Unit => "Unit",
            TypeConstructor::Bool => "Bool",
            TypeConstructor::Char => "Char",
            TypeConstructor::Int8 => "Int8",
            TypeConstructor::Int16 => "Int16",
            TypeConstructor::Int32 => "Int32",
            TypeConstructor::Int64 => "Int64",
            TypeConstructor::BigInt => "BigInt",
            TypeConstructor::Float32 => "Float32",
            TypeConstructor::Float64 => "Float64",
            TypeConstructor::Str => "String",
            TypeConstructor::Schema => "Schema",
        };
        write!(f, "{name}")
    }
}

fn write_applied(f: &mut fmt::Formatter<'_>, head: impl fmt::Display, arguments: &[Type]) -> fmt::Result {
    if arguments.is_empty() {
        write!(f, "{head}")
    } else {
        write!(f, "{head}[{}]", arguments.iter().join(", "))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Cst(constructor) => write!(f, "{constructor}"),
            Type::Var(var) => write!(f, "{var}"),
            Type::Enum(sym, arguments) => write_applied(f, &sym.name, arguments),
            Type::Struct(sym, arguments) => write_applied(f, &sym.name, arguments),
            Type::Tuple(elements) => write!(f, "({})", elements.iter().join(", ")),
            Type::Arrow(arguments, result) => match arguments.as_slice() {
                [argument @ Type::Arrow(..)] => write!(f, "({argument}) -> {result}"),
                [argument] => write!(f, "{argument} -> {result}"),
                arguments => write!(f, "({}) -> {result}", arguments.iter().join(", ")),
            },
            Type::Predicate(Denotation::Relational, terms) => {
                write!(f, "Relation({})", terms.iter().join(", "))
            }
            Type::Predicate(Denotation::Latticenal, terms) => match terms.split_last() {
                Some((lattice, keys)) => {
                    write!(f, "Lattice({}; {lattice})", keys.iter().join(", "))
                }
                None => write!(f, "Lattice()"),
            },
            Type::Alias(sym, arguments, _) => write_applied(f, &sym.name, arguments),
            Type::AssocType(sym, argument) => write!(f, "{sym}[{argument}]"),
        }
    }
}

impl fmt::Display for TraitConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.trait_sym.name, self.arg)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.quantifiers.is_empty() {
            write!(f, "∀({}). ", self.quantifiers.iter().join(", "))?;
        }
        write!(f, "{}", self.base)?;
        if !self.constraints.is_empty() {
            write!(f, " with {}", self.constraints.iter().join(", "))?;
        }
        Ok(())
    }
}
