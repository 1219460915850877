use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a type variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Star,
    Predicate,
    Arrow(Box<Kind>, Box<Kind>),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Star => write!(f, "Type"),
            Kind::Predicate => write!(f, "Predicate"),
            Kind::Arrow(argument, result) => match argument.as_ref() {
                Kind::Arrow(_, _) => write!(f, "({argument}) -> {result}"),
                _ => write!(f, "{argument} -> {result}"),
            },
        }
    }
}

/// Whether a type variable may be solved by unification.
///
/// Declared type parameters are rigid within the declaration that binds
/// them; every variable allocated by inference is flexible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rigidity {
    #[default]
    Flexible,
    Rigid,
}
