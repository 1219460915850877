//! Symbols for every declarable entity.
//!
//! A symbol's identity is its name together with its enclosing namespace or
//! parent symbol; local variables and type variables are identified by a
//! unique id handed out by [`Fresh`]. Every symbol also records the location
//! of its declaration, which is deliberately excluded from equality, hashing
//! and ordering.

mod fresh;
mod kind;

pub use fresh::*;
pub use kind::*;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use files::SourceLocation;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

macro_rules! symbol_identity {
    ($symbol:ident => $($field:ident),+) => {
        impl PartialEq for $symbol {
            fn eq(&self, other: &$symbol) -> bool {
                $(self.$field == other.$field)&&+
            }
        }

        impl Eq for $symbol {}

        impl Hash for $symbol {
            fn hash<H: Hasher>(&self, state: &mut H) {
                $(self.$field.hash(state);)+
            }
        }

        impl PartialOrd for $symbol {
            fn partial_cmp(&self, other: &$symbol) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $symbol {
            fn cmp(&self, other: &$symbol) -> Ordering {
                Ordering::Equal$(.then_with(|| self.$field.cmp(&other.$field)))+
            }
        }
    };
}

fn write_qualified(f: &mut fmt::Formatter<'_>, namespace: &[SmolStr], name: &str) -> fmt::Result {
    if namespace.is_empty() {
        write!(f, "{name}")
    } else {
        write!(f, "{}.{name}", namespace.iter().join("."))
    }
}

/// A top-level definition, `def f(x: Int32): Int32 = ...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefnSym {
    pub namespace: Vec<SmolStr>,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(DefnSym => namespace, name);

/// A local variable introduced by a binder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarSym {
    pub id: u32,
    pub text: SmolStr,
    /// The type slot allocated for this variable when it was bound.
    pub tvar: TypeVarSym,
    pub loc: SourceLocation,
}

symbol_identity!(VarSym => id);

/// A type variable, either declared or allocated during inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeVarSym {
    pub id: u32,
    pub text: Option<SmolStr>,
    pub kind: Kind,
    #[serde(default)]
    pub rigidity: Rigidity,
    pub loc: SourceLocation,
}

symbol_identity!(TypeVarSym => id);

impl TypeVarSym {
    pub fn is_rigid(&self) -> bool {
        self.rigidity == Rigidity::Rigid
    }

    pub fn is_flexible(&self) -> bool {
        self.rigidity == Rigidity::Flexible
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumSym {
    pub namespace: Vec<SmolStr>,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(EnumSym => namespace, name);

/// A case of an enum, written `Enum.Case` at use sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSym {
    pub enum_sym: EnumSym,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(CaseSym => enum_sym, name);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructSym {
    pub namespace: Vec<SmolStr>,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(StructSym => namespace, name);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructFieldSym {
    pub struct_sym: StructSym,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(StructFieldSym => struct_sym, name);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitSym {
    pub namespace: Vec<SmolStr>,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(TraitSym => namespace, name);

/// A trait signature, written `Trait.sig` at use sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigSym {
    pub trait_sym: TraitSym,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(SigSym => trait_sym, name);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectSym {
    pub namespace: Vec<SmolStr>,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(EffectSym => namespace, name);

/// An effect operation, written `Effect.op` at use sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpSym {
    pub effect_sym: EffectSym,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(OpSym => effect_sym, name);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeAliasSym {
    pub namespace: Vec<SmolStr>,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(TypeAliasSym => namespace, name);

/// An associated type of a trait, written `Trait.Assoc` at use sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssocTypeSym {
    pub trait_sym: TraitSym,
    pub name: SmolStr,
    pub loc: SourceLocation,
}

symbol_identity!(AssocTypeSym => trait_sym, name);

impl fmt::Display for DefnSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_qualified(f, &self.namespace, &self.name)
    }
}

impl fmt::Display for VarSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl fmt::Display for TypeVarSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "t{}", self.id),
        }
    }
}

impl fmt::Display for EnumSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_qualified(f, &self.namespace, &self.name)
    }
}

impl fmt::Display for CaseSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.enum_sym, self.name)
    }
}

impl fmt::Display for StructSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_qualified(f, &self.namespace, &self.name)
    }
}

impl fmt::Display for StructFieldSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.struct_sym, self.name)
    }
}

impl fmt::Display for TraitSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_qualified(f, &self.namespace, &self.name)
    }
}

impl fmt::Display for SigSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.trait_sym, self.name)
    }
}

impl fmt::Display for EffectSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_qualified(f, &self.namespace, &self.name)
    }
}

impl fmt::Display for OpSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.effect_sym, self.name)
    }
}

impl fmt::Display for TypeAliasSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_qualified(f, &self.namespace, &self.name)
    }
}

impl fmt::Display for AssocTypeSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.trait_sym, self.name)
    }
}

/// Any declarable entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Def(DefnSym),
    Var(VarSym),
    Case(CaseSym),
    Enum(EnumSym),
    Struct(StructSym),
    StructField(StructFieldSym),
    Trait(TraitSym),
    Sig(SigSym),
    Effect(EffectSym),
    Op(OpSym),
    TypeVar(TypeVarSym),
    TypeAlias(TypeAliasSym),
    AssocType(AssocTypeSym),
}

impl Symbol {
    /// The location of the declaration of this symbol.
    pub fn loc(&self) -> SourceLocation {
        match self {
            Symbol::Def(sym) => sym.loc,
            Symbol::Var(sym) => sym.loc,
            Symbol::Case(sym) => sym.loc,
            Symbol::Enum(sym) => sym.loc,
            Symbol::Struct(sym) => sym.loc,
            Symbol::StructField(sym) => sym.loc,
            Symbol::Trait(sym) => sym.loc,
            Symbol::Sig(sym) => sym.loc,
            Symbol::Effect(sym) => sym.loc,
            Symbol::Op(sym) => sym.loc,
            Symbol::TypeVar(sym) => sym.loc,
            Symbol::TypeAlias(sym) => sym.loc,
            Symbol::AssocType(sym) => sym.loc,
        }
    }

    /// The unqualified name as written at the declaration.
    pub fn name(&self) -> SmolStr {
        match self {
            Symbol::Def(sym) => sym.name.clone(),
            Symbol::Var(sym) => sym.text.clone(),
            Symbol::Case(sym) => sym.name.clone(),
            Symbol::Enum(sym) => sym.name.clone(),
            Symbol::Struct(sym) => sym.name.clone(),
            Symbol::StructField(sym) => sym.name.clone(),
            Symbol::Trait(sym) => sym.name.clone(),
            Symbol::Sig(sym) => sym.name.clone(),
            Symbol::Effect(sym) => sym.name.clone(),
            Symbol::Op(sym) => sym.name.clone(),
            Symbol::TypeVar(sym) => sym.to_string().into(),
            Symbol::TypeAlias(sym) => sym.name.clone(),
            Symbol::AssocType(sym) => sym.name.clone(),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Symbol::Def(_) => "definition",
            Symbol::Var(_) => "variable",
            Symbol::Case(_) => "case",
            Symbol::Enum(_) => "enum",
            Symbol::Struct(_) => "struct",
            Symbol::StructField(_) => "struct field",
            Symbol::Trait(_) => "trait",
            Symbol::Sig(_) => "signature",
            Symbol::Effect(_) => "effect",
            Symbol::Op(_) => "operation",
            Symbol::TypeVar(_) => "type variable",
            Symbol::TypeAlias(_) => "type alias",
            Symbol::AssocType(_) => "associated type",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Def(sym) => write!(f, "{sym}"),
            Symbol::Var(sym) => write!(f, "{sym}"),
            Symbol::Case(sym) => write!(f, "{sym}"),
            Symbol::Enum(sym) => write!(f, "{sym}"),
            Symbol::Struct(sym) => write!(f, "{sym}"),
            Symbol::StructField(sym) => write!(f, "{sym}"),
            Symbol::Trait(sym) => write!(f, "{sym}"),
            Symbol::Sig(sym) => write!(f, "{sym}"),
            Symbol::Effect(sym) => write!(f, "{sym}"),
            Symbol::Op(sym) => write!(f, "{sym}"),
            Symbol::TypeVar(sym) => write!(f, "{sym}"),
            Symbol::TypeAlias(sym) => write!(f, "{sym}"),
            Symbol::AssocType(sym) => write!(f, "{sym}"),
        }
    }
}

macro_rules! symbol_from {
    ($($variant:ident($symbol:ident)),+ $(,)?) => {
        $(impl From<$symbol> for Symbol {
            fn from(sym: $symbol) -> Symbol {
                Symbol::$variant(sym)
            }
        })+
    };
}

symbol_from!(
    Def(DefnSym),
    Var(VarSym),
    Case(CaseSym),
    Enum(EnumSym),
    Struct(StructSym),
    StructField(StructFieldSym),
    Trait(TraitSym),
    Sig(SigSym),
    Effect(EffectSym),
    Op(OpSym),
    TypeVar(TypeVarSym),
    TypeAlias(TypeAliasSym),
    AssocType(AssocTypeSym),
);

/// A written reference to a symbol, located where the use appears.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymUse<S> {
    pub sym: S,
    pub loc: SourceLocation,
}

impl<S> SymUse<S> {
    pub fn new(sym: S, loc: SourceLocation) -> SymUse<S> {
        SymUse { sym, loc }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use files::{Files, SourceLocation};

    use super::*;

    fn locations() -> (SourceLocation, SourceLocation) {
        let mut files = Files::default();
        let file = files.insert("Main.flint");
        (SourceLocation::on_line(file, 1, 1, 5), SourceLocation::on_line(file, 9, 3, 7))
    }

    #[test]
    fn identity_ignores_location() {
        let (a, b) = locations();

        let first = DefnSym { namespace: vec!["List".into()], name: "map".into(), loc: a };
        let second = DefnSym { namespace: vec!["List".into()], name: "map".into(), loc: b };
        let other = DefnSym { namespace: vec![], name: "map".into(), loc: a };

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(HashSet::from([first.clone(), second]).len(), 1);
        assert_eq!(first.to_string(), "List.map");
        assert_eq!(other.to_string(), "map");
    }

    #[test]
    fn child_symbols_include_parent() {
        let (a, b) = locations();

        let color = EnumSym { namespace: vec![], name: "Color".into(), loc: a };
        let shade = EnumSym { namespace: vec![], name: "Shade".into(), loc: a };

        let red = CaseSym { enum_sym: color.clone(), name: "Red".into(), loc: b };
        let other_red = CaseSym { enum_sym: shade, name: "Red".into(), loc: b };

        assert_ne!(red, other_red);
        assert_eq!(red.to_string(), "Color.Red");
        assert_eq!(Symbol::Case(red.clone()).name(), "Red");
        assert_eq!(Symbol::Case(red).loc(), b);
    }

    #[test]
    fn variables_are_identified_by_id() {
        let (a, b) = locations();
        let fresh = Fresh::default();

        let x = fresh.fresh_var_sym("x", a);
        let y = fresh.fresh_var_sym("x", b);

        assert_ne!(x, y);
        assert_ne!(x.tvar, y.tvar);
        assert_eq!(x.clone(), VarSym { loc: b, ..x });
    }
}
